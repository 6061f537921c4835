//! List detection: reclassifies runs of bullet or numbered paragraphs into
//! list groups.

use regex::Regex;

use crate::model::{ListKind, TextList};

/// Detects bullet and numbered list runs in an ordered paragraph sequence.
pub struct ListDetector {
    bullet: Regex,
    numbered: Regex,
}

impl ListDetector {
    /// Create a detector with the marker patterns compiled once.
    pub fn new() -> Self {
        Self {
            bullet: Regex::new(r"^\s*([•\-–*])\s+(.*)").unwrap(),
            numbered: Regex::new(r"^\s*((\d+[.)])|(\(\d+\))|([a-z]\)))\s+(.*)").unwrap(),
        }
    }

    /// Walk paragraphs in order, accumulating runs of one marker class.
    ///
    /// A change of marker class or a non-matching paragraph flushes the run.
    /// Runs of two or more items become a [`TextList`] with markers stripped;
    /// shorter runs return to the residual sequence with their original text
    /// untouched. Order is preserved in both outputs.
    pub fn detect(&self, paragraphs: &[String]) -> (Vec<TextList>, Vec<String>) {
        let mut lists: Vec<TextList> = Vec::new();
        let mut remaining: Vec<String> = Vec::new();

        // Run items carry (original, stripped) so short runs can be returned
        // unmodified.
        let mut run: Vec<(String, String)> = Vec::new();
        let mut run_kind: Option<ListKind> = None;

        fn flush(
            run: &mut Vec<(String, String)>,
            run_kind: &mut Option<ListKind>,
            lists: &mut Vec<TextList>,
            remaining: &mut Vec<String>,
        ) {
            if run.len() >= 2 {
                let kind = run_kind.unwrap_or(ListKind::Bullet);
                let items = run.drain(..).map(|(_, stripped)| stripped).collect();
                lists.push(TextList::new(kind, items));
            } else {
                remaining.extend(run.drain(..).map(|(original, _)| original));
            }
            *run_kind = None;
        }

        for paragraph in paragraphs {
            if let Some(caps) = self.bullet.captures(paragraph) {
                if run_kind.is_some() && run_kind != Some(ListKind::Bullet) {
                    flush(&mut run, &mut run_kind, &mut lists, &mut remaining);
                }
                run_kind = Some(ListKind::Bullet);
                let item = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                run.push((paragraph.clone(), item.trim().to_string()));
                continue;
            }

            if let Some(caps) = self.numbered.captures(paragraph) {
                if run_kind.is_some() && run_kind != Some(ListKind::Numbered) {
                    flush(&mut run, &mut run_kind, &mut lists, &mut remaining);
                }
                run_kind = Some(ListKind::Numbered);
                let item = caps.get(5).map(|m| m.as_str()).unwrap_or("");
                run.push((paragraph.clone(), item.trim().to_string()));
                continue;
            }

            flush(&mut run, &mut run_kind, &mut lists, &mut remaining);
            remaining.push(paragraph.clone());
        }

        flush(&mut run, &mut run_kind, &mut lists, &mut remaining);

        (lists, remaining)
    }
}

impl Default for ListDetector {
    fn default() -> Self {
        Self::new()
    }
}
