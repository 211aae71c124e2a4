//! # Deck Component
//!
//! Draws the section stack at the surface's current offset. Each section is
//! rendered whole into a scratch buffer the size of the viewport, then only
//! the rows that are on screen are copied into the frame. That keeps borders
//! and wrapping identical whether a section is fully visible or sliding in.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::core::document::Section;
use crate::tui::component::Component;

pub struct Deck<'a> {
    pub sections: &'a [Section],
    /// Displacement in sections (1.0 = one full viewport).
    pub offset: f32,
}

impl<'a> Deck<'a> {
    pub fn new(sections: &'a [Section], offset: f32) -> Self {
        Self { sections, offset }
    }
}

/// Screen rows a section occupies: `(first visible row, rows to skip at the
/// top of the section, visible row count)`, or `None` when off screen.
fn visible_rows(index: usize, offset: f32, height: u16) -> Option<(u16, u16, u16)> {
    let h = i32::from(height);
    let top = ((index as f32 - offset) * f32::from(height)).round() as i32;
    if top >= h || top + h <= 0 {
        return None;
    }
    let first = top.max(0);
    let last = (top + h).min(h);
    Some((first as u16, (first - top) as u16, (last - first) as u16))
}

impl Component for Deck<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let count = self.sections.len();
        let local = Rect::new(0, 0, area.width, area.height);

        for (i, section) in self.sections.iter().enumerate() {
            let Some((first, skip, rows)) = visible_rows(i, self.offset, area.height) else {
                continue;
            };

            let block = Block::bordered()
                .title(format!(" {} / {} · {} ", i + 1, count, section.title))
                .border_style(Style::default().fg(Color::DarkGray));
            let paragraph = Paragraph::new(section.lines.join("\n"))
                .block(block)
                .wrap(Wrap { trim: false });

            let mut scratch = Buffer::empty(local);
            paragraph.render(local, &mut scratch);

            let target = frame.buffer_mut();
            for row in 0..rows {
                for col in 0..area.width {
                    let src = scratch.cell((col, skip + row));
                    let dst = target.cell_mut((area.x + col, area.y + first + row));
                    if let (Some(src), Some(dst)) = (src, dst) {
                        *dst = src.clone();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_offset_shows_one_section() {
        assert_eq!(visible_rows(0, 0.0, 20), Some((0, 0, 20)));
        assert_eq!(visible_rows(1, 0.0, 20), None);
        assert_eq!(visible_rows(2, 2.0, 20), Some((0, 0, 20)));
        assert_eq!(visible_rows(1, 2.0, 20), None);
    }

    #[test]
    fn test_mid_transition_splits_viewport() {
        // Quarter of the way from section 0 to 1
        assert_eq!(visible_rows(0, 0.25, 20), Some((0, 5, 15)));
        assert_eq!(visible_rows(1, 0.25, 20), Some((15, 0, 5)));
    }

    #[test]
    fn test_zero_height_is_never_visible() {
        assert_eq!(visible_rows(0, 0.0, 0), None);
    }
}
