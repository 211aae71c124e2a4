use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

use crate::core::gesture::Direction;

/// Minimum drag distance, in cells, before a drag counts as a swipe.
/// Rows are roughly twice as tall as columns, hence the separate values.
const SWIPE_MIN_COLS: u16 = 6;
const SWIPE_MIN_ROWS: u16 = 3;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    ToggleMode,
    Resize,

    // Deck mode
    Forward,
    Backward,
    Wheel(i32),

    // Pages mode
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,

    // Mouse button: press and release positions (column, row)
    Press(u16, u16),
    Release(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    // A failing terminal read is treated like "no event"; the loop keeps running
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    let raw = match event::read() {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            return None;
        }
    };
    match raw {
        Event::Key(key_event) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Esc | KeyCode::Char('q')) => Some(TuiEvent::Quit),
                (_, KeyCode::Tab) => Some(TuiEvent::ToggleMode),
                (_, KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k')) => Some(TuiEvent::Backward),
                (_, KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Char(' ')) => {
                    Some(TuiEvent::Forward)
                }
                (_, KeyCode::Home) => Some(TuiEvent::FirstPage),
                (_, KeyCode::Left | KeyCode::Char('h')) => Some(TuiEvent::PrevPage),
                (_, KeyCode::Right | KeyCode::Char('l')) => Some(TuiEvent::NextPage),
                (_, KeyCode::End) => Some(TuiEvent::LastPage),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::Wheel(-1)),
            MouseEventKind::ScrollDown => Some(TuiEvent::Wheel(1)),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::Press(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                Some(TuiEvent::Release(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Classify a drag from `start` to `end` (column, row) as a swipe.
///
/// The axis with the larger travel (relative to its threshold) wins. Drags
/// shorter than the threshold on both axes are taps, not swipes.
pub fn classify_swipe(start: (u16, u16), end: (u16, u16)) -> Option<Direction> {
    let dx = i32::from(end.0) - i32::from(start.0);
    let dy = i32::from(end.1) - i32::from(start.1);
    // Compare in row units: one row ≈ two columns
    let horizontal = dx.abs() * i32::from(SWIPE_MIN_ROWS);
    let vertical = dy.abs() * i32::from(SWIPE_MIN_COLS);

    if dx.unsigned_abs() < u32::from(SWIPE_MIN_COLS) && dy.unsigned_abs() < u32::from(SWIPE_MIN_ROWS) {
        return None;
    }
    if vertical >= horizontal {
        Some(if dy < 0 { Direction::Up } else { Direction::Down })
    } else {
        Some(if dx < 0 { Direction::Left } else { Direction::Right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_drag_is_a_tap() {
        assert_eq!(classify_swipe((10, 10), (10, 10)), None);
        assert_eq!(classify_swipe((10, 10), (14, 12)), None);
    }

    #[test]
    fn test_vertical_swipes() {
        assert_eq!(classify_swipe((10, 20), (10, 5)), Some(Direction::Up));
        assert_eq!(classify_swipe((10, 5), (11, 20)), Some(Direction::Down));
    }

    #[test]
    fn test_horizontal_swipes() {
        assert_eq!(classify_swipe((40, 10), (10, 10)), Some(Direction::Left));
        assert_eq!(classify_swipe((10, 10), (40, 11)), Some(Direction::Right));
    }

    #[test]
    fn test_dominant_axis_wins() {
        // 8 columns vs 5 rows: rows weigh double, so vertical wins
        assert_eq!(classify_swipe((10, 10), (18, 15)), Some(Direction::Down));
        // 20 columns vs 3 rows: horizontal wins
        assert_eq!(classify_swipe((30, 10), (10, 7)), Some(Direction::Left));
    }
}
