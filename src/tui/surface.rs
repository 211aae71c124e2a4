//! # Deck Surface
//!
//! The terminal's [`RenderSurface`]: a vertical stack of sections, each one
//! viewport tall, sharing a single offset measured in sections.
//!
//! `apply_offset` starts an eased animation from wherever the stack currently
//! is to the target. The event loop calls [`TuiSurface::tick`] every frame;
//! the tick that sees the animation finish fires the transition signal.
//!
//! ```text
//!   offset 0.0      offset 1.4      offset 2.0
//!  ┌─────────┐     ┌─────────┐     ┌─────────┐
//!  │ sect 0  │     │ sect 1  │     │ sect 2  │
//!  │         │     │─────────│     │         │
//!  └─────────┘     └─sect 2──┘     └─────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::oneshot;

use crate::core::navigator::{RenderSurface, TransitionSignal};

struct Animation {
    from: f32,
    to: f32,
    started: Instant,
    done: oneshot::Sender<()>,
}

struct SurfaceState {
    settled: f32,
    animation: Option<Animation>,
}

pub struct TuiSurface {
    sections: usize,
    duration: Duration,
    state: Mutex<SurfaceState>,
}

impl TuiSurface {
    pub fn new(sections: usize, duration: Duration) -> Self {
        Self {
            sections,
            duration,
            state: Mutex::new(SurfaceState {
                settled: 0.0,
                animation: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current displacement in sections, interpolated mid-animation.
    pub fn offset(&self) -> f32 {
        self.offset_at(Instant::now())
    }

    pub fn offset_at(&self, now: Instant) -> f32 {
        let state = self.lock();
        match &state.animation {
            Some(anim) => {
                let t = ease_out(self.progress(anim, now));
                anim.from + (anim.to - anim.from) * t
            }
            None => state.settled,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.lock().animation.is_some()
    }

    /// Finish the running animation if its time is up. Returns true when a
    /// transition signal was fired.
    pub fn tick(&self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&self, now: Instant) -> bool {
        let mut state = self.lock();
        let finished = state
            .animation
            .as_ref()
            .is_some_and(|anim| self.progress(anim, now) >= 1.0);
        if !finished {
            return false;
        }
        match state.animation.take() {
            Some(anim) => {
                state.settled = anim.to;
                // Receiver may already be gone; the offset still settles
                let _ = anim.done.send(());
                debug!("Deck animation settled at {}", anim.to);
                true
            }
            None => false,
        }
    }

    fn progress(&self, anim: &Animation, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(anim.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl RenderSurface for TuiSurface {
    fn section_count(&self) -> usize {
        self.sections
    }

    fn apply_offset(&self, target_index: usize) -> TransitionSignal {
        let now = Instant::now();
        let from = self.offset_at(now);
        let (tx, rx) = oneshot::channel();
        let mut state = self.lock();
        state.animation = Some(Animation {
            from,
            to: target_index as f32,
            started: now,
            done: tx,
        });
        rx
    }
}

/// Cubic ease-out: fast start, gentle landing.
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_settled_at_zero() {
        let surface = TuiSurface::new(3, Duration::from_millis(100));
        assert_eq!(surface.offset(), 0.0);
        assert!(!surface.is_animating());
        assert!(!surface.tick());
    }

    #[test]
    fn test_animation_interpolates_then_settles() {
        let surface = TuiSurface::new(3, Duration::from_millis(100));
        let mut signal = surface.apply_offset(2);
        let start = Instant::now();

        let mid = surface.offset_at(start + Duration::from_millis(50));
        assert!(mid > 0.0 && mid < 2.0, "mid-animation offset {mid}");
        assert!(surface.is_animating());
        assert!(signal.try_recv().is_err());

        assert!(surface.tick_at(start + Duration::from_millis(200)));
        assert_eq!(signal.try_recv(), Ok(()));
        assert_eq!(surface.offset(), 2.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_signal_fires_only_once() {
        let surface = TuiSurface::new(2, Duration::ZERO);
        let _signal = surface.apply_offset(1);
        assert!(surface.tick());
        assert!(!surface.tick());
    }

    #[test]
    fn test_zero_duration_finishes_on_next_tick() {
        let surface = TuiSurface::new(2, Duration::ZERO);
        let mut signal = surface.apply_offset(1);
        assert_eq!(surface.offset(), 1.0);
        assert!(surface.tick());
        assert_eq!(signal.try_recv(), Ok(()));
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
    }
}
