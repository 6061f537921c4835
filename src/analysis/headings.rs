//! Heading detection: reclassifies short, large-font, title-like paragraphs.

use std::collections::HashMap;

/// Paragraphs longer than this many words are never headings.
const MAX_HEADING_WORDS: usize = 8;

/// A heading's mean font size must strictly exceed the page average times
/// this factor; a tie at the threshold is rejected.
const HEADING_SIZE_SCALE: f32 = 1.25;

/// Shape test: entirely uppercase, or at least half the words title-cased.
fn looks_like_heading(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if !letters.is_empty() && letters.iter().all(|c| c.is_uppercase()) {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }

    let title_case = words
        .iter()
        .filter(|w| w.chars().next().map(char::is_uppercase).unwrap_or(false))
        .count();
    title_case >= (words.len() / 2).max(1)
}

/// Split paragraphs into (headings, remaining), order preserved in both.
///
/// `word_sizes` maps each paragraph's exact text to the font sizes of its
/// constituent tokens; paragraphs without size data stay paragraphs.
pub fn detect_headings(
    paragraphs: &[String],
    avg_font_size: f32,
    word_sizes: &HashMap<String, Vec<f32>>,
) -> (Vec<String>, Vec<String>) {
    let mut headings: Vec<String> = Vec::new();
    let mut remaining: Vec<String> = Vec::new();

    for text in paragraphs {
        if text.is_empty() {
            continue;
        }

        if text.split_whitespace().count() > MAX_HEADING_WORDS {
            remaining.push(text.clone());
            continue;
        }

        let sizes = match word_sizes.get(text) {
            Some(sizes) if !sizes.is_empty() => sizes,
            _ => {
                remaining.push(text.clone());
                continue;
            }
        };

        let mean_size = sizes.iter().sum::<f32>() / sizes.len() as f32;
        if mean_size <= avg_font_size * HEADING_SIZE_SCALE {
            remaining.push(text.clone());
            continue;
        }

        if !looks_like_heading(text) {
            remaining.push(text.clone());
            continue;
        }

        headings.push(text.clone());
    }

    (headings, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes_for(text: &str, size: f32, count: usize) -> HashMap<String, Vec<f32>> {
        let mut map = HashMap::new();
        map.insert(text.to_string(), vec![size; count]);
        map
    }

    #[test]
    fn test_large_title_case_paragraph_is_heading() {
        let paragraphs = vec!["Getting Started Guide".to_string()];
        let sizes = sizes_for("Getting Started Guide", 16.0, 3);
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &sizes);
        assert_eq!(headings, vec!["Getting Started Guide"]);
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_long_paragraph_rejected() {
        let text = "this line has quite a few more than eight whole words in it";
        let paragraphs = vec![text.to_string()];
        let sizes = sizes_for(text, 20.0, 12);
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &sizes);
        assert!(headings.is_empty());
        assert_eq!(remaining, vec![text]);
    }

    #[test]
    fn test_missing_size_data_rejected() {
        let paragraphs = vec!["Orphan Heading".to_string()];
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &HashMap::new());
        assert!(headings.is_empty());
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn test_threshold_tie_rejected() {
        // Mean exactly avg * 1.25 must be rejected: strict inequality.
        let paragraphs = vec!["Borderline Heading".to_string()];
        let sizes = sizes_for("Borderline Heading", 12.5, 2);
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &sizes);
        assert!(headings.is_empty());
        assert_eq!(remaining, vec!["Borderline Heading"]);

        // Just above passes.
        let sizes = sizes_for("Borderline Heading", 12.6, 2);
        let (headings, _) = detect_headings(&paragraphs, 10.0, &sizes);
        assert_eq!(headings, vec!["Borderline Heading"]);
    }

    #[test]
    fn test_uppercase_shape_accepted() {
        let paragraphs = vec!["TERMS AND CONDITIONS".to_string()];
        let sizes = sizes_for("TERMS AND CONDITIONS", 16.0, 3);
        let (headings, _) = detect_headings(&paragraphs, 10.0, &sizes);
        assert_eq!(headings.len(), 1);
    }

    #[test]
    fn test_lowercase_shape_rejected() {
        // Large font but no heading shape: fewer than half the words
        // title-cased.
        let paragraphs = vec!["a quiet lowercase phrase".to_string()];
        let sizes = sizes_for("a quiet lowercase phrase", 20.0, 4);
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &sizes);
        assert!(headings.is_empty());
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn test_order_preserved_across_outputs() {
        let mut sizes = HashMap::new();
        sizes.insert("First Heading".to_string(), vec![16.0, 16.0]);
        sizes.insert("Second Heading".to_string(), vec![16.0, 16.0]);
        let paragraphs = vec![
            "First Heading".to_string(),
            "plain body text between the two.".to_string(),
            "Second Heading".to_string(),
        ];
        let (headings, remaining) = detect_headings(&paragraphs, 10.0, &sizes);
        assert_eq!(headings, vec!["First Heading", "Second Heading"]);
        assert_eq!(remaining, vec!["plain body text between the two."]);
    }
}
