//! # Section Navigator
//!
//! Snaps a stack of full-size sections into view one at a time.
//!
//! ```text
//!   request_transition(t)
//!          │
//!          ├─ t outside 0..count ──────────────► Err(OutOfRange)
//!          ├─ transition in flight ────────────► Err(Busy)
//!          │
//!          ├─ in_flight = true
//!          ├─ surface.apply_offset(t) ──► TransitionSignal
//!          │        ...await signal...
//!          └─ in_flight = false, current = t ──► Ok(())
//! ```
//!
//! Requests that arrive while a transition is running are rejected, not
//! queued. There is no timeout and no cancellation: a surface that never
//! fires its signal leaves the navigator busy for good.
//!
//! Dropping the returned future does not cancel the transition either. The
//! finish signal is handed to a background task on the current tokio runtime,
//! which completes the transition when the signal fires.
//!
//! State sits behind a `Mutex` that is never held across an `.await`, so a
//! navigator can be shared via `Arc` with spawned tasks.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use super::error::ConfigurationError;

/// Fires once when the transition started by `apply_offset` has finished.
pub type TransitionSignal = oneshot::Receiver<()>;

/// The visual side of the navigator: an ordered, fixed-size set of sections.
pub trait RenderSurface {
    /// Number of sections. Read once, at construction.
    fn section_count(&self) -> usize;

    /// Move every section by `target_index` sections' worth of displacement
    /// and return the signal that fires when the movement is done.
    fn apply_offset(&self, target_index: usize) -> TransitionSignal;
}

/// Why a transition request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// Target index is below zero or past the last section.
    OutOfRange,
    /// Another transition is still running.
    Busy,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::OutOfRange => write!(f, "target section out of range"),
            NavigationError::Busy => write!(f, "transition already in flight"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Construction options for [`SectionNavigator`].
pub struct NavigatorOptions<S> {
    /// Host surface holding the sections. Required.
    pub element: Option<S>,
}

impl<S> Default for NavigatorOptions<S> {
    fn default() -> Self {
        Self { element: None }
    }
}

impl<S> NavigatorOptions<S> {
    pub fn new(element: S) -> Self {
        Self {
            element: Some(element),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub section_count: usize,
    pub transition_in_flight: bool,
}

pub struct SectionNavigator<S> {
    surface: S,
    state: Arc<Mutex<NavigationState>>,
}

fn lock_state(state: &Mutex<NavigationState>) -> MutexGuard<'_, NavigationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn complete(state: &Mutex<NavigationState>, target: usize) {
    let mut state = lock_state(state);
    state.transition_in_flight = false;
    state.current_index = target;
    debug!("Transition to section {} finished", target);
}

/// A started transition whose finish signal has not been consumed yet.
///
/// If the owning future is dropped early, `Drop` makes sure the signal still
/// completes the transition.
struct PendingTransition {
    state: Arc<Mutex<NavigationState>>,
    target: usize,
    signal: Option<TransitionSignal>,
}

impl PendingTransition {
    /// Wait for the finish signal. Returns `false` if the sender was dropped.
    async fn finish(&mut self) -> bool {
        let Some(signal) = self.signal.as_mut() else {
            return false;
        };
        let fired = signal.await.is_ok();
        self.signal = None;
        if fired {
            complete(&self.state, self.target);
        }
        fired
    }
}

impl Drop for PendingTransition {
    fn drop(&mut self) {
        let Some(mut signal) = self.signal.take() else {
            return;
        };
        match signal.try_recv() {
            Ok(()) => complete(&self.state, self.target),
            Err(TryRecvError::Closed) => {
                warn!("Transition to section {} lost its finish signal; navigator stays busy", self.target);
            }
            Err(TryRecvError::Empty) => match Handle::try_current() {
                Ok(handle) => {
                    debug!("Transition to section {} detached from its caller", self.target);
                    let state = Arc::clone(&self.state);
                    let target = self.target;
                    handle.spawn(async move {
                        if signal.await.is_ok() {
                            complete(&state, target);
                        } else {
                            warn!("Transition to section {} lost its finish signal; navigator stays busy", target);
                        }
                    });
                }
                Err(_) => {
                    warn!("No runtime to finish detached transition to section {}; navigator stays busy", self.target);
                }
            },
        }
    }
}

impl<S: RenderSurface> SectionNavigator<S> {
    pub fn new(options: NavigatorOptions<S>) -> Result<Self, ConfigurationError> {
        let surface = options.element.ok_or(ConfigurationError::MissingElement)?;
        let section_count = surface.section_count();
        if section_count == 0 {
            return Err(ConfigurationError::NoSections);
        }
        debug!("Section navigator ready with {} sections", section_count);
        Ok(Self {
            surface,
            state: Arc::new(Mutex::new(NavigationState {
                current_index: 0,
                section_count,
                transition_in_flight: false,
            })),
        })
    }

    /// Move to `target_index`, resolving once the surface reports that the
    /// transition has finished.
    ///
    /// The target is signed so that callers can pass `current - 1` from the
    /// first section and get `OutOfRange` back.
    pub async fn request_transition(&self, target_index: isize) -> Result<(), NavigationError> {
        let target = self.begin(target_index)?;
        let mut pending = PendingTransition {
            state: Arc::clone(&self.state),
            target,
            signal: Some(self.surface.apply_offset(target)),
        };

        if !pending.finish().await {
            // The surface dropped the sender: the finish signal can never
            // arrive, which is the same as an animation that never ends.
            warn!("Transition to section {} lost its finish signal; navigator stays busy", target);
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    /// Validates the request and claims the in-flight slot.
    fn begin(&self, target_index: isize) -> Result<usize, NavigationError> {
        let mut state = self.lock();
        let target = usize::try_from(target_index)
            .ok()
            .filter(|t| *t < state.section_count)
            .ok_or(NavigationError::OutOfRange)?;
        if state.transition_in_flight {
            return Err(NavigationError::Busy);
        }
        state.transition_in_flight = true;
        debug!(
            "Transition {} -> {} started",
            state.current_index, target
        );
        Ok(target)
    }

    fn lock(&self) -> MutexGuard<'_, NavigationState> {
        lock_state(&self.state)
    }

    pub fn state(&self) -> NavigationState {
        *self.lock()
    }

    pub fn current_index(&self) -> usize {
        self.lock().current_index
    }

    pub fn section_count(&self) -> usize {
        self.lock().section_count
    }

    pub fn is_busy(&self) -> bool {
        self.lock().transition_in_flight
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
