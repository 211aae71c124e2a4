//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates terminal events into navigator requests and pager commands.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a section transition is running): draws every ~16ms and
//!   ticks the surface so the transition signal fires on the finishing frame.
//! - **Idle**: sleeps up to 250ms, only redraws on events, pager re-renders,
//!   or when the navigator's busy flag flips.
//!
//! ## Transitions
//!
//! Section requests are spawned onto the tokio runtime. The navigator
//! rejects them while another transition is in flight; rejected requests are
//! logged and dropped.

mod component;
pub mod components;
mod event;
pub mod surface;
mod ui;

use log::{debug, info, warn};
use std::io;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::Mode;
use crate::core::config::ResolvedConfig;
use crate::core::document::Document;
use crate::core::gesture::{Gesture, target_for};
use crate::core::navigator::{NavigatorOptions, SectionNavigator};
use crate::core::pager::{PageChange, PagerCommand, PagerController, PagerOptions, Templates};
use crate::core::store::{FileQueryStore, QueryStore, state_path};
use crate::tui::components::PagerSlot;
use crate::tui::event::{TuiEvent, classify_swipe, poll_event_immediate, poll_event_timeout};
use crate::tui::surface::TuiSurface;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state
pub struct TuiState {
    pub mode: Mode,
    pub document: Document,
    pub document_name: String,
    pub navigator: Arc<SectionNavigator<TuiSurface>>,
    pub pager: PagerController<PagerSlot>,
    pub page_changes: Receiver<PageChange>,
    /// Document wrapped and chunked for the current terminal size.
    pub pages: Vec<Vec<String>>,
    /// Where the left mouse button went down, for swipe classification.
    pub press: Option<(u16, u16)>,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Everything needed to (re)build the pager.
struct PagerSetup {
    button_count: u32,
    page_query: String,
    templates: Templates,
    store_path: Option<PathBuf>,
}

impl PagerSetup {
    fn build(&self, current_page: u32, total_page: u32) -> io::Result<PagerController<PagerSlot>> {
        let pager = PagerController::new(PagerOptions {
            button_count: self.button_count,
            current_page,
            total_page,
            page_query: self.page_query.clone(),
            templates: self.templates.clone(),
            ..PagerOptions::new(PagerSlot::default())
        })
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(match &self.store_path {
            Some(path) => pager.with_store(FileQueryStore::open(path)),
            None => pager,
        })
    }

    fn start_page(&self, cli_page: Option<u32>) -> u32 {
        let store = self.store_path.as_ref().map(FileQueryStore::open);
        start_page(cli_page, &self.page_query, store.as_ref().map(|s| s as &dyn QueryStore))
    }
}

/// Page to open on. An explicit `--page` wins; otherwise the stored page, if
/// persistence is on and the stored value parses; otherwise page 1.
///
/// Out-of-range results are left for the pager to clamp.
fn start_page(cli_page: Option<u32>, page_query: &str, store: Option<&dyn QueryStore>) -> u32 {
    if let Some(page) = cli_page {
        return page;
    }
    if page_query.is_empty() {
        return 1;
    }
    let stored = store.and_then(|s| s.get(page_query));
    match stored.as_deref().map(str::parse::<u32>) {
        Some(Ok(page)) => {
            debug!("Restored page {} under key {:?}", page, page_query);
            page
        }
        Some(Err(e)) => {
            warn!("Ignoring stored page {:?}: {}", stored, e);
            1
        }
        None => 1,
    }
}

fn page_count(pages: &[Vec<String>]) -> u32 {
    u32::try_from(pages.len()).unwrap_or(u32::MAX).max(1)
}

fn paginate(document: &Document, frame_area: Rect) -> Vec<Vec<String>> {
    let text = ui::page_text_area(frame_area);
    document.pages(text.width as usize, text.height as usize)
}

/// Spawn a transition for `gesture`. Failures are dropped, not retried.
fn request_section(navigator: &Arc<SectionNavigator<TuiSurface>>, gesture: Gesture) {
    let Some(target) = target_for(navigator.current_index(), gesture) else {
        return;
    };
    let navigator = Arc::clone(navigator);
    tokio::spawn(async move {
        match navigator.request_transition(target).await {
            Ok(()) => debug!("Now on section {}", target),
            Err(e) => debug!("Section request {} dropped: {}", target, e),
        }
    });
}

pub fn run(config: ResolvedConfig, document: Document, document_name: String) -> io::Result<()> {
    let surface = TuiSurface::new(document.section_count(), config.transition);
    let navigator = SectionNavigator::new(NavigatorOptions::new(surface))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let setup = PagerSetup {
        button_count: config.button_count,
        page_query: config.page_query.clone(),
        templates: config.templates.clone(),
        store_path: state_path(),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Mouse capture unavailable: {}", e))
        .ok();

    let size = terminal.size()?;
    let pages = paginate(&document, Rect::new(0, 0, size.width, size.height));
    let mut pager = setup.build(setup.start_page(config.start_page), page_count(&pages))?;
    let page_changes = pager.subscribe();

    let mut tui = TuiState {
        mode: config.mode,
        document,
        document_name,
        navigator: Arc::new(navigator),
        pager,
        page_changes,
        pages,
        press: None,
    };

    let result = event_loop(&mut terminal, &mut tui, &setup);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    tui: &mut TuiState,
    setup: &PagerSetup,
) -> io::Result<()> {
    let mut needs_redraw = true; // Force first frame
    let mut was_busy = false;

    loop {
        let surface = tui.navigator.surface();
        if surface.tick() {
            needs_redraw = true;
        }
        let animating = surface.is_animating();
        let busy = tui.navigator.is_busy();
        if animating || busy != was_busy || tui.pager.host().dirty {
            needs_redraw = true;
        }
        was_busy = busy;

        for change in tui.page_changes.try_iter() {
            info!("Page changed to {}", change.page);
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, tui))?;
            tui.pager.host_mut().dirty = false;
            needs_redraw = false;
        }

        let timeout = if animating || busy { FRAME_INTERVAL } else { IDLE_INTERVAL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => {
                    info!("Quit requested");
                    return Ok(());
                }
                TuiEvent::ToggleMode => {
                    tui.mode = match tui.mode {
                        Mode::Deck => Mode::Pages,
                        Mode::Pages => Mode::Deck,
                    };
                    tui.press = None;
                    debug!("Switched to {:?} mode", tui.mode);
                }
                TuiEvent::Resize => repaginate(terminal, tui, setup)?,
                _ => match tui.mode {
                    Mode::Deck => handle_deck_event(tui, event),
                    Mode::Pages => handle_pages_event(tui, event),
                },
            }
        }
    }
}

fn handle_deck_event(tui: &mut TuiState, event: TuiEvent) {
    let gesture = match event {
        TuiEvent::Forward => Some(Gesture::Wheel { delta_y: 1 }),
        TuiEvent::Backward => Some(Gesture::Wheel { delta_y: -1 }),
        TuiEvent::Wheel(delta_y) => Some(Gesture::Wheel { delta_y }),
        TuiEvent::Press(col, row) => {
            tui.press = Some((col, row));
            None
        }
        TuiEvent::Release(col, row) => tui
            .press
            .take()
            .and_then(|start| classify_swipe(start, (col, row)))
            .map(Gesture::Swipe),
        _ => None,
    };
    if let Some(gesture) = gesture {
        request_section(&tui.navigator, gesture);
    }
}

fn handle_pages_event(tui: &mut TuiState, event: TuiEvent) {
    let command = match event {
        TuiEvent::FirstPage => Some(PagerCommand::First),
        TuiEvent::PrevPage | TuiEvent::Backward => Some(PagerCommand::Prev),
        TuiEvent::NextPage | TuiEvent::Forward => Some(PagerCommand::Next),
        TuiEvent::LastPage => Some(PagerCommand::Last),
        TuiEvent::Wheel(delta) if delta < 0 => Some(PagerCommand::Prev),
        TuiEvent::Wheel(delta) if delta > 0 => Some(PagerCommand::Next),
        TuiEvent::Press(col, row) => tui.pager.host().hit_test(col, row),
        _ => None,
    };
    if let Some(command) = command {
        tui.pager.apply(command);
    }
}

/// Re-wrap pages for the new terminal size. A changed page count means a
/// new pager; the current page carries over, clamped to the new total.
fn repaginate(
    terminal: &mut ratatui::DefaultTerminal,
    tui: &mut TuiState,
    setup: &PagerSetup,
) -> io::Result<()> {
    let size = terminal.size()?;
    let pages = paginate(&tui.document, Rect::new(0, 0, size.width, size.height));
    let total = page_count(&pages);
    if total != tui.pager.total_page() {
        let current = tui.pager.current_page().min(total);
        debug!("Page count {} -> {}, rebuilding pager", tui.pager.total_page(), total);
        tui.pager = setup.build(current, total)?;
        tui.page_changes = tui.pager.subscribe();
    }
    tui.pages = pages;
    Ok(())
}
