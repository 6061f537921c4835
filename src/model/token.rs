//! Positioned text tokens, the input unit of page analysis.

use serde::{Deserialize, Serialize};

/// A positioned text token (usually one word) extracted from a source page.
///
/// Geometry uses a top-left origin: `top`/`bottom` grow downward, and the
/// source guarantees `x0 <= x1` and `top <= bottom` for well-formed tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Font size in points, when the source reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

impl Token {
    /// Create a token without font size information.
    pub fn new(text: impl Into<String>, x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1,
            bottom,
            size: None,
        }
    }

    /// Create a token with a font size.
    pub fn with_size(
        text: impl Into<String>,
        x0: f32,
        top: f32,
        x1: f32,
        bottom: f32,
        size: f32,
    ) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1,
            bottom,
            size: Some(size),
        }
    }

    /// Check that the bounding box is usable for geometric analysis.
    ///
    /// Tokens failing this are filtered out before any threshold comparison
    /// runs; a NaN must never reach the clustering state machines.
    pub fn has_valid_geometry(&self) -> bool {
        self.x0.is_finite()
            && self.x1.is_finite()
            && self.top.is_finite()
            && self.bottom.is_finite()
            && self.x0 <= self.x1
            && self.top <= self.bottom
    }

    /// Width of the token's bounding box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }
}

/// One page's worth of extracted tokens, as produced by a token source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTokens {
    /// Tokens in source extraction order (possibly empty)
    pub tokens: Vec<Token>,
    /// Page width in the same units as token coordinates
    pub width: f32,
}

impl PageTokens {
    /// Create a new page token set.
    pub fn new(tokens: Vec<Token>, width: f32) -> Self {
        Self { tokens, width }
    }

    /// Total trimmed character count across all tokens.
    pub fn text_chars(&self) -> usize {
        self.tokens.iter().map(|t| t.text.trim().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geometry() {
        let tok = Token::new("hello", 10.0, 20.0, 40.0, 32.0);
        assert!(tok.has_valid_geometry());
        assert!((tok.width() - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let nan = Token::new("x", f32::NAN, 0.0, 10.0, 10.0);
        assert!(!nan.has_valid_geometry());

        let inverted = Token::new("x", 50.0, 0.0, 10.0, 10.0);
        assert!(!inverted.has_valid_geometry());

        let upside_down = Token::new("x", 0.0, 30.0, 10.0, 10.0);
        assert!(!upside_down.has_valid_geometry());
    }

    #[test]
    fn test_text_chars() {
        let page = PageTokens::new(
            vec![
                Token::new("ab ", 0.0, 0.0, 10.0, 10.0),
                Token::new("cde", 12.0, 0.0, 22.0, 10.0),
            ],
            612.0,
        );
        assert_eq!(page.text_chars(), 5);
    }
}
