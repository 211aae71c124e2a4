//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::core::navigator::{RenderSurface, TransitionSignal};
use crate::core::pager::{PagerHost, PagerView};

/// A surface that records every applied offset and lets the test decide
/// when (or whether) each transition finishes.
pub struct RecordingSurface {
    sections: usize,
    applied: Mutex<Vec<usize>>,
    pending: Mutex<Vec<oneshot::Sender<()>>>,
}

impl RecordingSurface {
    pub fn new(sections: usize) -> Self {
        Self {
            sections,
            applied: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Target indices passed to `apply_offset`, in call order.
    pub fn applied(&self) -> Vec<usize> {
        self.applied.lock().unwrap().clone()
    }

    /// Fire the finish signal of every outstanding transition.
    pub fn finish_all(&self) {
        for sender in self.pending.lock().unwrap().drain(..) {
            let _ = sender.send(());
        }
    }

    /// Drop every outstanding finish signal without firing it.
    pub fn drop_all(&self) {
        self.pending.lock().unwrap().clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn section_count(&self) -> usize {
        self.sections
    }

    fn apply_offset(&self, target_index: usize) -> TransitionSignal {
        let (tx, rx) = oneshot::channel();
        self.applied.lock().unwrap().push(target_index);
        self.pending.lock().unwrap().push(tx);
        rx
    }
}

/// A pager host that keeps every view it was handed.
#[derive(Default)]
pub struct RecordingHost {
    pub views: Vec<PagerView>,
}

impl RecordingHost {
    pub fn last(&self) -> &PagerView {
        self.views.last().expect("host has not been rendered")
    }
}

impl PagerHost for RecordingHost {
    fn mount(&mut self, view: &PagerView) {
        self.views.push(view.clone());
    }
}
