//! Paragraph merging: turns ordered text lines into paragraph strings using
//! vertical gaps and sentence-continuation heuristics.

use std::collections::HashMap;

use super::geometry::Line;

/// Vertical gap beyond which a new paragraph starts.
const PARAGRAPH_GAP_THRESHOLD: f32 = 12.0;

/// Sentence-final punctuation: a line ending in one of these closes its
/// sentence, so the next line starts fresh rather than continuing it.
const LINE_END_PUNCT: [char; 4] = ['.', '?', '!', ':'];

fn ends_sentence(text: &str) -> bool {
    text.chars()
        .last()
        .map(|c| LINE_END_PUNCT.contains(&c))
        .unwrap_or(false)
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Merge ordered lines into paragraph strings.
///
/// A vertical gap above 12 units closes the open paragraph. Within an open
/// paragraph, a line continues the previous line's sentence (joined onto the
/// same string) when the accumulated text lacks sentence-final punctuation
/// and the new line does not start uppercase; otherwise it is kept as a new
/// inner line. Inner lines join with single spaces on flush. Empty lines are
/// skipped and never produce empty paragraphs.
pub fn merge_lines_into_paragraphs(lines: &[Line]) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut last_top: Option<f32> = None;

    for line in lines {
        if line.text.is_empty() {
            continue;
        }

        if let Some(top) = last_top {
            if (line.top - top).abs() > PARAGRAPH_GAP_THRESHOLD && !current.is_empty() {
                paragraphs.push(current.join(" ").trim().to_string());
                current.clear();
            }
        }

        match current.last_mut() {
            Some(prev) if !ends_sentence(prev) && !starts_uppercase(&line.text) => {
                // Wrapped sentence: glue onto the previous accumulated text.
                prev.push(' ');
                prev.push_str(&line.text);
            }
            _ => current.push(line.text.clone()),
        }

        last_top = Some(line.top);
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" ").trim().to_string());
    }

    paragraphs
}

/// Map each paragraph's text to the font sizes of its constituent tokens.
///
/// Paragraphs are exact space-joins of consecutive non-empty line texts, so
/// each one is reconstructed by consuming lines front-to-back while the
/// remaining paragraph text starts with the next line's text.
pub fn paragraph_font_sizes(paragraphs: &[String], lines: &[Line]) -> HashMap<String, Vec<f32>> {
    let mut map: HashMap<String, Vec<f32>> = HashMap::new();
    let mut line_iter = lines.iter().filter(|l| !l.text.is_empty()).peekable();

    for paragraph in paragraphs {
        let mut remaining = paragraph.as_str();
        let mut sizes: Vec<f32> = Vec::new();

        while let Some(line) = line_iter.peek() {
            if let Some(rest) = remaining.strip_prefix(line.text.as_str()) {
                sizes.extend_from_slice(&line.sizes);
                remaining = rest.strip_prefix(' ').unwrap_or(rest);
                line_iter.next();
                if remaining.is_empty() {
                    break;
                }
            } else {
                break;
            }
        }

        map.insert(paragraph.clone(), sizes);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(top: f32, text: &str) -> Line {
        Line {
            top,
            text: text.to_string(),
            sizes: vec![],
        }
    }

    fn sized_line(top: f32, text: &str, sizes: &[f32]) -> Line {
        Line {
            top,
            text: text.to_string(),
            sizes: sizes.to_vec(),
        }
    }

    #[test]
    fn test_gap_starts_new_paragraph() {
        let lines = vec![
            line(10.0, "First paragraph here."),
            line(22.0, "Second line of it."),
            line(60.0, "New paragraph after a gap."),
        ];
        let paragraphs = merge_lines_into_paragraphs(&lines);
        assert_eq!(
            paragraphs,
            vec![
                "First paragraph here. Second line of it.",
                "New paragraph after a gap.",
            ]
        );
    }

    #[test]
    fn test_wrapped_sentence_continuation() {
        // No closing punctuation and lowercase continuation: one sentence.
        let lines = vec![
            line(10.0, "This sentence wraps across"),
            line(20.0, "two physical lines."),
        ];
        let paragraphs = merge_lines_into_paragraphs(&lines);
        assert_eq!(paragraphs, vec!["This sentence wraps across two physical lines."]);
    }

    #[test]
    fn test_uppercase_starts_inner_line() {
        let lines = vec![
            line(10.0, "Item one has no final punctuation"),
            line(20.0, "Item Two starts uppercase"),
        ];
        let paragraphs = merge_lines_into_paragraphs(&lines);
        // Both stay within one paragraph but as separate inner lines,
        // space-joined on flush.
        assert_eq!(
            paragraphs,
            vec!["Item one has no final punctuation Item Two starts uppercase"]
        );
    }

    #[test]
    fn test_empty_lines_skipped() {
        let lines = vec![line(10.0, ""), line(40.0, "Only real text.")];
        let paragraphs = merge_lines_into_paragraphs(&lines);
        assert_eq!(paragraphs, vec!["Only real text."]);
    }

    #[test]
    fn test_no_input_no_paragraphs() {
        assert!(merge_lines_into_paragraphs(&[]).is_empty());
    }

    #[test]
    fn test_paragraph_font_sizes_prefix_consumption() {
        let lines = vec![
            sized_line(10.0, "Big Heading", &[18.0, 18.0]),
            sized_line(40.0, "Body text continues", &[11.0, 11.0, 11.0]),
            sized_line(52.0, "onto another line.", &[11.0, 11.0, 11.0]),
        ];
        let paragraphs = merge_lines_into_paragraphs(&lines);
        assert_eq!(paragraphs.len(), 2);

        let map = paragraph_font_sizes(&paragraphs, &lines);
        assert_eq!(map.get("Big Heading"), Some(&vec![18.0, 18.0]));
        assert_eq!(
            map.get(paragraphs[1].as_str()).map(Vec::len),
            Some(6),
            "both body lines contribute sizes"
        );
    }
}
