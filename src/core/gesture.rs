//! Directional intent → target section index.
//!
//! The navigator never looks at input itself. Callers classify raw input into
//! a [`Gesture`] and ask [`target_for`] which index to request.

/// Output of the swipe classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Vertical wheel movement; positive scrolls forward.
    Wheel { delta_y: i32 },
    /// A classified swipe. Swiping up pushes content up, revealing the next
    /// section.
    Swipe(Direction),
}

/// Resolves a gesture into the index to request, or `None` for gestures
/// without vertical intent.
///
/// The result is not range checked; the navigator rejects out-of-range
/// targets itself.
pub fn target_for(current_index: usize, gesture: Gesture) -> Option<isize> {
    let step = match gesture {
        Gesture::Wheel { delta_y } if delta_y > 0 => 1,
        Gesture::Wheel { delta_y } if delta_y < 0 => -1,
        Gesture::Wheel { .. } => return None,
        Gesture::Swipe(Direction::Up) => 1,
        Gesture::Swipe(Direction::Down) => -1,
        Gesture::Swipe(Direction::Left | Direction::Right) => return None,
    };
    let current = isize::try_from(current_index).ok()?;
    Some(current + step)
}
