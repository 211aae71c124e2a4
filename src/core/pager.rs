//! # Pager Controller
//!
//! Moves through a bounded run of pages with a sliding window of numbered
//! buttons plus first/prev/next/last shortcuts.
//!
//! ```text
//!  « First  ‹ Prev  [4] [5] [6] (7) [8] [9] ...  Next ›  Last »
//!  └─disabled on 1─┘     window from compute_window    └─disabled on total─┘
//! ```
//!
//! `go_to_page` silently ignores page 0, pages past the end and the page that
//! is already current. Anything else updates state, persists the page (when a
//! query key is configured), notifies subscribers and re-renders the whole
//! view onto the host.

use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, warn};

use super::error::ConfigurationError;
use super::store::QueryStore;
use super::window::compute_window;

pub const DEFAULT_BUTTON_COUNT: u32 = 10;

const PAGE_PLACEHOLDER: &str = "%page%";

/// Label formats for the pager buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// Numbered button; `%page%` is replaced with the page number.
    pub number: String,
    pub prev: String,
    pub next: String,
    pub first: String,
    pub last: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            number: "%page%".to_string(),
            prev: "‹ Prev".to_string(),
            next: "Next ›".to_string(),
            first: "« First".to_string(),
            last: "Last »".to_string(),
        }
    }
}

impl Templates {
    pub fn render_number(&self, page: u32) -> String {
        self.number.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

/// Construction options for [`PagerController`].
pub struct PagerOptions<H> {
    /// Host the rendered view is mounted on. Required.
    pub element: Option<H>,
    pub button_count: u32,
    pub current_page: u32,
    pub total_page: u32,
    /// Store key for the current page. Empty disables persistence.
    pub page_query: String,
    pub templates: Templates,
}

impl<H> Default for PagerOptions<H> {
    fn default() -> Self {
        Self {
            element: None,
            button_count: DEFAULT_BUTTON_COUNT,
            current_page: 1,
            total_page: 1,
            page_query: String::new(),
            templates: Templates::default(),
        }
    }
}

impl<H> PagerOptions<H> {
    pub fn new(element: H) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }
}

/// Receives the pager's rendered view, initially and after every change.
pub trait PagerHost {
    fn mount(&mut self, view: &PagerView);
}

/// Notification emitted after every successful page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page: u32,
}

/// Clicks on the pager, as explicit input messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerCommand {
    First,
    Prev,
    Next,
    Last,
    Number(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStates {
    pub first: Button,
    pub prev: Button,
    pub next: Button,
    pub last: Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberButton {
    pub page: u32,
    pub label: String,
    pub current: bool,
}

/// Everything the pager shows, rebuilt from scratch on each render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub buttons: ButtonStates,
    pub numbers: Vec<NumberButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub current_page: u32,
    pub total_page: u32,
    pub window_size: u32,
}

pub struct PagerController<H> {
    host: H,
    state: PagerState,
    page_query: String,
    templates: Templates,
    store: Option<Box<dyn QueryStore>>,
    listeners: Vec<Sender<PageChange>>,
    view: PagerView,
}

impl<H: PagerHost> PagerController<H> {
    pub fn new(options: PagerOptions<H>) -> Result<Self, ConfigurationError> {
        let host = options.element.ok_or(ConfigurationError::MissingElement)?;
        let state = normalize(options.current_page, options.total_page, options.button_count);
        let view = build_view(&state, &options.templates);

        let mut pager = Self {
            host,
            state,
            page_query: options.page_query,
            templates: options.templates,
            store: None,
            listeners: Vec::new(),
            view,
        };
        pager.host.mount(&pager.view);
        debug!(
            "Pager ready: page {} of {}, {} buttons",
            state.current_page, state.total_page, state.window_size
        );
        Ok(pager)
    }

    /// Attach the store that receives the page under `page_query`.
    pub fn with_store(mut self, store: impl QueryStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Register a listener for [`PageChange`] notifications.
    pub fn subscribe(&mut self) -> Receiver<PageChange> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    pub fn go_to_page(&mut self, page: u32) {
        if page == 0 || page > self.state.total_page || page == self.state.current_page {
            return;
        }

        if !self.page_query.is_empty() {
            match self.store.as_mut() {
                Some(store) => store.set(&self.page_query, &page.to_string()),
                None => debug!("No store attached, page {} not persisted", page),
            }
        }

        self.state.current_page = page;

        let event = PageChange { page };
        self.listeners.retain(|tx| tx.send(event).is_ok());

        self.rerender();
    }

    pub fn apply(&mut self, command: PagerCommand) {
        let page = match command {
            PagerCommand::First => 1,
            PagerCommand::Prev => self.state.current_page.saturating_sub(1),
            PagerCommand::Next => self.state.current_page.saturating_add(1),
            PagerCommand::Last => self.state.total_page,
            PagerCommand::Number(page) => page,
        };
        self.go_to_page(page);
    }

    fn rerender(&mut self) {
        self.view = build_view(&self.state, &self.templates);
        self.host.mount(&self.view);
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn total_page(&self) -> u32 {
        self.state.total_page
    }

    pub fn view(&self) -> &PagerView {
        &self.view
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Brings configured values into `1 <= current <= total`, `window >= 1`.
fn normalize(current_page: u32, total_page: u32, button_count: u32) -> PagerState {
    let total_page = if total_page == 0 {
        warn!("Pager total_page is 0, using 1");
        1
    } else {
        total_page
    };
    let current_page = if current_page == 0 {
        1
    } else if current_page > total_page {
        warn!("Pager current_page {} exceeds total {}, clamping", current_page, total_page);
        total_page
    } else {
        current_page
    };
    let window_size = if button_count == 0 {
        warn!("Pager button_count is 0, using 1");
        1
    } else {
        button_count
    };
    PagerState {
        current_page,
        total_page,
        window_size,
    }
}

fn build_view(state: &PagerState, templates: &Templates) -> PagerView {
    let at_first = state.current_page == 1;
    let at_last = state.current_page == state.total_page;
    let button = |label: &str, disabled: bool| Button {
        label: label.to_string(),
        disabled,
    };

    PagerView {
        buttons: ButtonStates {
            first: button(&templates.first, at_first),
            prev: button(&templates.prev, at_first),
            next: button(&templates.next, at_last),
            last: button(&templates.last, at_last),
        },
        numbers: compute_window(state.current_page, state.total_page, state.window_size)
            .map(|page| NumberButton {
                page,
                label: templates.render_number(page),
                current: page == state.current_page,
            })
            .collect(),
    }
}
