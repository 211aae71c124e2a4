//! Flipbook library exports for testing

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the document is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One full-screen section at a time, driven by the section navigator
    #[default]
    Deck,
    /// Fixed-height pages, driven by the pager
    Pages,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Mode as ValueEnum>::from_str(s, true)
    }
}
