//! # Core Interaction Logic
//!
//! The two controllers and everything they need. Nothing in here knows about
//! any specific UI technology.
//!
//! ```text
//!                    ┌───────────────────────────────┐
//!                    │             CORE              │
//!                    │        (this module)          │
//!                    │                               │
//!                    │  • SectionNavigator (async)   │
//!                    │  • PagerController  (sync)    │
//!                    │  • compute_window   (pure)    │
//!                    └───────────────┬───────────────┘
//!                                    │ traits
//!            ┌───────────────────────┼───────────────────────┐
//!            ▼                       ▼                       ▼
//!     ┌──────────────┐       ┌──────────────┐       ┌──────────────┐
//!     │RenderSurface │       │  PagerHost   │       │  QueryStore  │
//!     │ (TuiSurface) │       │ (PagerSlot)  │       │ (file/memory)│
//!     └──────────────┘       └──────────────┘       └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`navigator`]: single-flight section transitions
//! - [`pager`]: page changes, button states, rendered view
//! - [`window`]: which page numbers the pager shows
//! - [`gesture`]: wheel/swipe intent → target section
//! - [`store`]: where the current page is persisted
//! - [`document`]: text → sections and pages
//! - [`config`]: config file, env and CLI resolution

pub mod config;
pub mod document;
pub mod error;
pub mod gesture;
pub mod navigator;
pub mod pager;
pub mod store;
pub mod window;

pub use error::ConfigurationError;
pub use navigator::{NavigationError, NavigatorOptions, RenderSurface, SectionNavigator};
pub use pager::{PageChange, PagerCommand, PagerController, PagerHost, PagerOptions, PagerView};
