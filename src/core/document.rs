//! # Documents
//!
//! Plain text split two ways:
//!
//! - **sections**: blocks separated by a line containing only `---`, one per
//!   full-screen panel in deck mode
//! - **pages**: the same text wrapped to a width and chunked to a height, for
//!   pages mode. Every section starts on a fresh page.

use std::fs;
use std::io;
use std::path::Path;

const SECTION_SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Split `text` into sections. Blank sections are skipped; a document with
    /// no content still has one (empty) section.
    pub fn parse(text: &str) -> Self {
        let mut blocks: Vec<Vec<String>> = vec![Vec::new()];
        for line in text.lines() {
            if line.trim() == SECTION_SEPARATOR {
                blocks.push(Vec::new());
            } else if let Some(block) = blocks.last_mut() {
                block.push(line.trim_end().to_string());
            }
        }

        let mut sections: Vec<Section> = blocks
            .into_iter()
            .map(trim_blank_edges)
            .filter(|lines| !lines.is_empty())
            .enumerate()
            .map(|(i, lines)| Section {
                title: derive_title(&lines).unwrap_or_else(|| format!("Section {}", i + 1)),
                lines,
            })
            .collect();

        if sections.is_empty() {
            sections.push(Section {
                title: "Section 1".to_string(),
                lines: Vec::new(),
            });
        }
        Self { sections }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Wrap to `width` columns and chunk into pages of `height` lines.
    /// Always returns at least one page.
    pub fn pages(&self, width: usize, height: usize) -> Vec<Vec<String>> {
        let width = width.max(1);
        let height = height.max(1);
        let mut pages = Vec::new();

        for section in &self.sections {
            let wrapped: Vec<String> = section
                .lines
                .iter()
                .flat_map(|line| {
                    textwrap::wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.into_owned())
                        .collect::<Vec<_>>()
                })
                .collect();
            pages.extend(wrapped.chunks(height).map(<[String]>::to_vec));
        }

        if pages.is_empty() {
            pages.push(Vec::new());
        }
        pages
    }
}

fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..leading);
    lines
}

/// First non-empty line, without markdown heading markers.
fn derive_title(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .map(|l| l.trim().trim_start_matches('#').trim())
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Intro\nHello there.\n\n---\n\n## Middle\nline a\nline b\n---\nEnd\n";

    #[test]
    fn test_parse_splits_on_separator() {
        let doc = Document::parse(SAMPLE);
        assert_eq!(doc.section_count(), 3);
        assert_eq!(doc.sections[0].title, "Intro");
        assert_eq!(doc.sections[0].lines, vec!["# Intro", "Hello there."]);
        assert_eq!(doc.sections[1].title, "Middle");
        assert_eq!(doc.sections[1].lines.len(), 3);
        assert_eq!(doc.sections[2].lines, vec!["End"]);
    }

    #[test]
    fn test_blank_sections_are_skipped() {
        let doc = Document::parse("---\n\n---\nonly\n---\n   \n");
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].title, "only");
    }

    #[test]
    fn test_empty_text_has_one_section() {
        let doc = Document::parse("");
        assert_eq!(doc.section_count(), 1);
        assert!(doc.sections[0].lines.is_empty());
        assert_eq!(doc.pages(40, 10), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_pages_start_fresh_per_section() {
        let doc = Document::parse("a\nb\nc\n---\nd\n");
        let pages = doc.pages(80, 2);
        assert_eq!(pages, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_pages_wrap_long_lines() {
        let doc = Document::parse("one two three four");
        let pages = doc.pages(9, 10);
        assert_eq!(pages, vec![vec!["one two", "three", "four"]]);
    }
}
