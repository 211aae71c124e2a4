//! # Pager Bar Component
//!
//! One-line row of pager buttons, centered:
//!
//! ```text
//!      « First  ‹ Prev   1  2 [3] 4  5   Next ›  Last »
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PagerSlot` is the pager's host; it keeps the latest mounted view and
//!   the click regions from the last draw
//! - `PagerBar` is created each frame with borrowed slot

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::pager::{PagerCommand, PagerHost, PagerView};
use crate::tui::component::Component;

const BUTTON_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonKind {
    Shortcut,
    Number,
    Current,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedButton {
    text: String,
    kind: ButtonKind,
    command: PagerCommand,
    area: Rect,
}

/// Host for the pager inside the terminal UI.
#[derive(Default)]
pub struct PagerSlot {
    view: Option<PagerView>,
    /// Set on every mount, cleared by the event loop after a redraw.
    pub dirty: bool,
    hit_regions: Vec<(Rect, PagerCommand)>,
}

impl PagerHost for PagerSlot {
    fn mount(&mut self, view: &PagerView) {
        self.view = Some(view.clone());
        self.dirty = true;
    }
}

impl PagerSlot {
    /// Command under the given cell, if an enabled button was drawn there.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<PagerCommand> {
        let position = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, command)| *command)
    }
}

/// Lay out the view's buttons left to right, centered in `area`.
fn place_buttons(view: &PagerView, area: Rect) -> Vec<PlacedButton> {
    let b = &view.buttons;
    let shortcut = |label: &str, disabled: bool, command| {
        let kind = if disabled { ButtonKind::Disabled } else { ButtonKind::Shortcut };
        (format!(" {label} "), kind, command)
    };

    let mut items = vec![
        shortcut(&b.first.label, b.first.disabled, PagerCommand::First),
        shortcut(&b.prev.label, b.prev.disabled, PagerCommand::Prev),
    ];
    items.extend(view.numbers.iter().map(|n| {
        let kind = if n.current { ButtonKind::Current } else { ButtonKind::Number };
        (format!(" {} ", n.label), kind, PagerCommand::Number(n.page))
    }));
    items.push(shortcut(&b.next.label, b.next.disabled, PagerCommand::Next));
    items.push(shortcut(&b.last.label, b.last.disabled, PagerCommand::Last));

    let widths: Vec<u16> = items
        .iter()
        .map(|(text, _, _)| u16::try_from(text.width()).unwrap_or(u16::MAX))
        .collect();
    let gaps = BUTTON_GAP.saturating_mul(u16::try_from(items.len().saturating_sub(1)).unwrap_or(u16::MAX));
    let total = widths.iter().fold(gaps, |acc, w| acc.saturating_add(*w));

    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let right = area.x.saturating_add(area.width);
    let mut placed = Vec::with_capacity(items.len());
    for ((text, kind, command), width) in items.into_iter().zip(widths) {
        // Buttons past the right edge collapse to zero width there
        let left = x.min(right);
        let visible = width.min(right - left);
        placed.push(PlacedButton {
            text,
            kind,
            command,
            area: Rect::new(left, area.y, visible, area.height.min(1)),
        });
        x = x.saturating_add(width.saturating_add(BUTTON_GAP));
    }
    placed
}

fn style_for(kind: ButtonKind) -> Style {
    match kind {
        ButtonKind::Shortcut => Style::default().fg(Color::White),
        ButtonKind::Number => Style::default().fg(Color::Gray),
        ButtonKind::Current => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ButtonKind::Disabled => Style::default().fg(Color::DarkGray),
    }
}

/// Transient render wrapper for the pager bar.
pub struct PagerBar<'a> {
    slot: &'a mut PagerSlot,
}

impl<'a> PagerBar<'a> {
    pub fn new(slot: &'a mut PagerSlot) -> Self {
        Self { slot }
    }
}

impl Component for PagerBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(view) = self.slot.view.as_ref() else {
            self.slot.hit_regions.clear();
            return;
        };
        let placed = place_buttons(view, area);

        let mut spans = Vec::with_capacity(placed.len() * 2);
        let mut cursor = area.x;
        for button in &placed {
            if button.area.x > cursor {
                spans.push(Span::raw(" ".repeat((button.area.x - cursor) as usize)));
            }
            spans.push(Span::styled(button.text.clone(), style_for(button.kind)));
            cursor = button.area.x.saturating_add(u16::try_from(button.text.width()).unwrap_or(u16::MAX));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        self.slot.hit_regions = placed
            .into_iter()
            .filter(|b| b.kind != ButtonKind::Disabled && !b.area.is_empty())
            .map(|b| (b.area, b.command))
            .collect();
    }
}
