use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use flipbook::core::gesture::{Direction, Gesture, target_for};
use flipbook::core::navigator::{
    NavigationError, NavigatorOptions, RenderSurface, SectionNavigator, TransitionSignal,
};
use flipbook::core::pager::{
    PageChange, PagerCommand, PagerController, PagerHost, PagerOptions, PagerView,
};
use flipbook::core::store::{MemoryQueryStore, QueryStore};
use flipbook::core::window::compute_window;
use tokio::sync::oneshot;

// ============================================================================
// Helpers
// ============================================================================

/// Finishes every transition from a separate task, like a real animation
/// completing on a later frame.
struct AutoSurface {
    sections: usize,
    offsets: Arc<Mutex<Vec<usize>>>,
}

impl AutoSurface {
    fn new(sections: usize) -> Self {
        Self {
            sections,
            offsets: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RenderSurface for AutoSurface {
    fn section_count(&self) -> usize {
        self.sections
    }

    fn apply_offset(&self, target_index: usize) -> TransitionSignal {
        self.offsets.lock().unwrap().push(target_index);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let _ = tx.send(());
        });
        rx
    }
}

/// Counts mounts and keeps the last view.
#[derive(Default)]
struct CountingHost {
    mounts: Arc<AtomicUsize>,
    last: Option<PagerView>,
}

impl PagerHost for CountingHost {
    fn mount(&mut self, view: &PagerView) {
        self.mounts.fetch_add(1, Ordering::SeqCst);
        self.last = Some(view.clone());
    }
}

fn navigator(sections: usize) -> Arc<SectionNavigator<AutoSurface>> {
    Arc::new(SectionNavigator::new(NavigatorOptions::new(AutoSurface::new(sections))).unwrap())
}

// ============================================================================
// Section Navigator
// ============================================================================

#[tokio::test]
async fn test_gestures_walk_through_sections() {
    let nav = navigator(3);

    for expected in [1, 2] {
        let target = target_for(nav.current_index(), Gesture::Wheel { delta_y: 1 }).unwrap();
        assert_eq!(nav.request_transition(target).await, Ok(()));
        assert_eq!(nav.current_index(), expected);
    }

    // Past the last section
    let target = target_for(nav.current_index(), Gesture::Swipe(Direction::Up)).unwrap();
    assert_eq!(nav.request_transition(target).await, Err(NavigationError::OutOfRange));
    assert_eq!(nav.current_index(), 2);

    // Horizontal swipes produce no request at all
    assert_eq!(target_for(nav.current_index(), Gesture::Swipe(Direction::Left)), None);

    let target = target_for(nav.current_index(), Gesture::Swipe(Direction::Down)).unwrap();
    assert_eq!(nav.request_transition(target).await, Ok(()));
    assert_eq!(nav.current_index(), 1);
    assert_eq!(*nav.surface().offsets.lock().unwrap(), vec![1, 2, 1]);
}

#[tokio::test]
async fn test_concurrent_requests_are_single_flight() {
    let nav = navigator(4);

    let (first, second) = tokio::join!(nav.request_transition(1), nav.request_transition(2));

    assert_eq!(first, Ok(()));
    assert_eq!(second, Err(NavigationError::Busy));
    assert_eq!(nav.current_index(), 1);
    assert!(!nav.is_busy());
    assert_eq!(*nav.surface().offsets.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_spawned_transitions_share_navigator() {
    let nav = navigator(3);

    let task = tokio::spawn({
        let nav = Arc::clone(&nav);
        async move { nav.request_transition(2).await }
    });

    assert_eq!(task.await.unwrap(), Ok(()));
    assert_eq!(nav.current_index(), 2);
    assert!(!nav.is_busy());
}

#[tokio::test]
async fn test_first_section_rejects_backward_request() {
    let nav = navigator(2);
    let target = target_for(nav.current_index(), Gesture::Wheel { delta_y: -1 }).unwrap();
    assert_eq!(target, -1);
    assert_eq!(nav.request_transition(target).await, Err(NavigationError::OutOfRange));
    assert_eq!(nav.current_index(), 0);
    assert!(nav.surface().offsets.lock().unwrap().is_empty());
}

// ============================================================================
// Pager
// ============================================================================

#[test]
fn test_pager_session_with_persistence() {
    let store = MemoryQueryStore::new();
    let host = CountingHost::default();
    let mounts = Arc::clone(&host.mounts);

    let mut pager = PagerController::new(PagerOptions {
        total_page: 20,
        page_query: "page".to_string(),
        ..PagerOptions::new(host)
    })
    .unwrap()
    .with_store(store.clone());
    let changes = pager.subscribe();
    assert_eq!(mounts.load(Ordering::SeqCst), 1);

    pager.apply(PagerCommand::Number(10));
    pager.apply(PagerCommand::Number(10));
    pager.apply(PagerCommand::Last);
    pager.apply(PagerCommand::Next);
    pager.apply(PagerCommand::Prev);

    assert_eq!(
        changes.try_iter().collect::<Vec<_>>(),
        vec![
            PageChange { page: 10 },
            PageChange { page: 20 },
            PageChange { page: 19 },
        ]
    );
    assert_eq!(mounts.load(Ordering::SeqCst), 4);
    assert_eq!(store.get("page").as_deref(), Some("19"));
    assert_eq!(store.writes(), 3);

    let view = pager.host().last.as_ref().unwrap();
    let numbers: Vec<u32> = view.numbers.iter().map(|n| n.page).collect();
    assert_eq!(numbers, compute_window(19, 20, 10).collect::<Vec<_>>());
    assert!(!view.buttons.first.disabled);
    assert!(!view.buttons.next.disabled);
}

#[test]
fn test_pager_window_matches_calculator_on_every_page() {
    let mut pager = PagerController::new(PagerOptions {
        total_page: 13,
        button_count: 4,
        ..PagerOptions::new(CountingHost::default())
    })
    .unwrap();

    for page in 1..=13 {
        pager.go_to_page(page);
        let numbers: Vec<u32> = pager.view().numbers.iter().map(|n| n.page).collect();
        assert_eq!(numbers, compute_window(page, 13, 4).collect::<Vec<_>>());
        let buttons = &pager.view().buttons;
        assert_eq!(buttons.first.disabled, page == 1);
        assert_eq!(buttons.last.disabled, page == 13);
    }
}
