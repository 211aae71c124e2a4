//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: top line with document, mode and position
//! - `Deck`: the section stack drawn at the surface's current offset
//!
//! ### Stateful Components
//!
//! - `PagerBar`: pager buttons. Its persistent half, `PagerSlot`, is the host
//!   the pager controller mounts its view on; it also remembers where each
//!   button was drawn so clicks can be mapped back to pager commands.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── status_bar.rs  (top line)
//! ├── deck.rs        (section stack)
//! └── pager_bar.rs   (pager buttons + click regions)
//! ```

pub mod deck;
pub mod pager_bar;
pub mod status_bar;

pub use deck::Deck;
pub use pager_bar::{PagerBar, PagerSlot};
pub use status_bar::StatusBar;
