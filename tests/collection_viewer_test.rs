//! End-to-end tests for a collection screen
//!
//! Drives a `CollectionViewer` the way the terminal does: events in, frame
//! rendered to a `TestBackend`, mouse clicks aimed at the recorded hit areas.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use serde::Serialize;

use ptwtui::logic::gesture::GestureGuard;
use ptwtui::viewer::fetcher::{FetchStatus, ListOperation};
use ptwtui::viewer::input::TableEvent;
use ptwtui::viewer::query::{PerPage, QueryDescriptor};
use ptwtui::viewer::table::{Column, RowAction};
use ptwtui::viewer::{CollectionPage, CollectionViewer, Record};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Division {
    id: u64,
    name: String,
}

impl Record for Division {
    fn id(&self) -> u64 {
        self.id
    }
}

/// `total` divisions served a page at a time; records every descriptor asked for
fn division_list(total: u64) -> (impl ListOperation<Division>, Arc<Mutex<Vec<QueryDescriptor>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let list = move |d: QueryDescriptor| {
        log.lock().unwrap().push(d.clone());
        async move {
            let per_page = u64::from(d.per_page.get());
            let start = u64::from(d.page - 1) * per_page;
            let end = (start + per_page).min(total);
            let rows = (start..end)
                .map(|i| Division {
                    id: i + 1,
                    name: format!("Division {}", i + 1),
                })
                .collect();
            Ok::<_, anyhow::Error>(CollectionPage { rows, total })
        }
    };
    (list, seen)
}

fn draw(viewer: &mut CollectionViewer<Division>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            viewer.render(f, area);
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn click(area: Rect, kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: area.x,
        row: area.y,
        modifiers: KeyModifiers::NONE,
    }
}

async fn loaded(total: u64) -> (CollectionViewer<Division>, Arc<Mutex<Vec<QueryDescriptor>>>) {
    let (list, seen) = division_list(total);
    let mut viewer =
        CollectionViewer::new("Divisions", PerPage::Ten, list).with_columns(vec![Column::new("name", "Name")]);
    viewer.mount();
    assert!(viewer.next_outcome().await);
    (viewer, seen)
}

/// Scenario: first page of 25 records
#[tokio::test]
async fn test_first_page_footer_and_controls() {
    let (mut viewer, _) = loaded(25).await;
    let screen = draw(&mut viewer);

    assert!(screen.contains("Showing 1 to 10 of 25 entries"), "{}", screen);
    assert!(screen.contains("Page 1 of 3"));
    assert!(screen.contains("Division 10"));
    assert!(!screen.contains("Division 11"));
    assert!(viewer.hits().prev.is_none(), "Prev should be disabled on page 1");
    assert!(viewer.hits().next.is_some(), "Next should be enabled on page 1");
}

/// Scenario: last, partial page
#[tokio::test]
async fn test_last_partial_page() {
    let (mut viewer, _) = loaded(25).await;
    viewer.dispatch(TableEvent::PageChanged(3), Instant::now());
    viewer.next_outcome().await;

    assert_eq!(viewer.fetcher().rows().len(), 5);
    let screen = draw(&mut viewer);
    assert!(screen.contains("Showing 21 to 25 of 25 entries"), "{}", screen);
    // Sequence numbers continue from the previous pages
    assert!(screen.contains("21"));
    assert!(screen.contains("Division 25"));
    assert!(viewer.hits().next.is_none(), "Next should be disabled on the last page");
    assert!(viewer.hits().prev.is_some());
}

/// Scenario: clicking Next and Prev walks the pages
#[tokio::test]
async fn test_footer_clicks_change_page() {
    let (mut viewer, seen) = loaded(25).await;
    draw(&mut viewer);

    let next = viewer.hits().next.expect("Next should be clickable");
    viewer.handle_mouse(click(next, MouseEventKind::Down(MouseButton::Left)), Instant::now());
    // Release over the same button does nothing more
    viewer.handle_mouse(click(next, MouseEventKind::Up(MouseButton::Left)), Instant::now());
    viewer.next_outcome().await;
    assert_eq!(viewer.descriptor().page, 2);
    assert_eq!(seen.lock().unwrap().len(), 2);

    draw(&mut viewer);
    let prev = viewer.hits().prev.expect("Prev should be clickable");
    viewer.handle_mouse(click(prev, MouseEventKind::Down(MouseButton::Left)), Instant::now());
    viewer.next_outcome().await;
    assert_eq!(viewer.descriptor().page, 1);
}

/// Scenario: network failure, then Retry
#[tokio::test]
async fn test_error_then_retry_reissues_same_descriptor() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let list = move |d: QueryDescriptor| {
        let attempt = {
            let mut log = log.lock().unwrap();
            log.push(d.clone());
            log.len()
        };
        async move {
            if attempt == 1 {
                anyhow::bail!("Network Error");
            }
            Ok(CollectionPage {
                rows: vec![Division {
                    id: 1,
                    name: "Division 1".to_string(),
                }],
                total: 1,
            })
        }
    };
    let mut viewer =
        CollectionViewer::new("Divisions", PerPage::Ten, list).with_columns(vec![Column::new("name", "Name")]);
    viewer.mount();
    viewer.next_outcome().await;

    assert_eq!(viewer.fetcher().status(), FetchStatus::Error);
    let screen = draw(&mut viewer);
    assert!(screen.contains("Network Error"), "{}", screen);
    assert!(screen.contains("Retry"));

    let retry = viewer.hits().retry.expect("Retry should be clickable");
    viewer.handle_mouse(click(retry, MouseEventKind::Down(MouseButton::Left)), Instant::now());
    assert!(viewer.fetcher().loading());
    viewer.next_outcome().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1], "Retry should repeat the failed request exactly");
    assert_eq!(viewer.fetcher().status(), FetchStatus::Success);
    assert!(draw(&mut viewer).contains("Division 1"));
}

/// Scenario: empty collection
#[tokio::test]
async fn test_empty_collection() {
    let (mut viewer, _) = loaded(0).await;
    let screen = draw(&mut viewer);

    assert!(screen.contains("No records found"), "{}", screen);
    assert!(screen.contains("Showing 0 to 0 of 0 entries"));
    assert!(viewer.hits().prev.is_none());
    assert!(viewer.hits().next.is_none());
    assert!(viewer.hits().actions.is_empty());
}

/// Scenario: touch then click on the same action
#[tokio::test]
async fn test_press_and_release_fire_action_once() {
    let (list, _) = division_list(25);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut viewer = CollectionViewer::new("Divisions", PerPage::Ten, list)
        .with_columns(vec![Column::new("name", "Name")])
        .with_actions(vec![RowAction::new("View", 'v', move |_: &Division| {
            counter.fetch_add(1, Ordering::SeqCst);
        })])
        .with_gesture_guard(GestureGuard::with_window(Duration::from_millis(500)));
    viewer.mount();
    viewer.next_outcome().await;
    draw(&mut viewer);

    let target = viewer.hits().actions[0].area;
    let start = Instant::now();
    viewer.handle_mouse(click(target, MouseEventKind::Down(MouseButton::Left)), start);
    viewer.handle_mouse(
        click(target, MouseEventKind::Up(MouseButton::Left)),
        start + Duration::from_millis(350),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1, "One gesture should fire one callback");

    // A deliberate second click later on is a new gesture
    viewer.handle_mouse(
        click(target, MouseEventKind::Down(MouseButton::Left)),
        start + Duration::from_secs(2),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// Holding the button down longer than the repeat window
///
/// Bug: Action cells answered both the press and the release, and only the
/// 300ms repeat window joined the two. A click held for longer fired twice.
///
/// Fix: Controls react to the press only; the release of the same click is
/// ignored however late it arrives.
#[tokio::test]
async fn test_long_press_fires_action_once() {
    let (list, _) = division_list(25);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut viewer = CollectionViewer::new("Divisions", PerPage::Ten, list)
        .with_columns(vec![Column::new("name", "Name")])
        .with_actions(vec![RowAction::new("View", 'v', move |_: &Division| {
            counter.fetch_add(1, Ordering::SeqCst);
        })]);
    viewer.mount();
    viewer.next_outcome().await;
    draw(&mut viewer);

    let target = viewer.hits().actions[0].area;
    let start = Instant::now();
    viewer.handle_mouse(click(target, MouseEventKind::Down(MouseButton::Left)), start);
    viewer.handle_mouse(
        click(target, MouseEventKind::Up(MouseButton::Left)),
        start + Duration::from_millis(450),
    );
    viewer.handle_mouse(
        click(target, MouseEventKind::Up(MouseButton::Left)),
        start + Duration::from_secs(5),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1, "One click should fire one callback");
}

/// Hotkey and click landing on the same action count as one gesture
#[tokio::test]
async fn test_hotkey_then_click_fires_once() {
    let (list, _) = division_list(25);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut viewer = CollectionViewer::new("Divisions", PerPage::Ten, list)
        .with_columns(vec![Column::new("name", "Name")])
        .with_actions(vec![RowAction::new("View", 'v', move |_: &Division| {
            counter.fetch_add(1, Ordering::SeqCst);
        })]);
    viewer.mount();
    viewer.next_outcome().await;
    draw(&mut viewer);

    let start = Instant::now();
    viewer.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE), start);
    let target = viewer.hits().actions[0].area;
    viewer.handle_mouse(
        click(target, MouseEventKind::Down(MouseButton::Left)),
        start + Duration::from_millis(60),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Scenario: actions stay dead while the next page is loading
#[tokio::test]
async fn test_actions_disabled_while_loading() {
    let (list, _) = division_list(25);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut viewer = CollectionViewer::new("Divisions", PerPage::Ten, list).with_actions(vec![RowAction::new(
        "View",
        'v',
        move |_: &Division| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )]);
    viewer.mount();
    viewer.next_outcome().await;

    viewer.dispatch(TableEvent::PageChanged(2), Instant::now());
    assert!(!viewer.invoke_action(0, 0, Instant::now()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    viewer.next_outcome().await;
    assert!(viewer.invoke_action(0, 0, Instant::now()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Footer while the requested page is loading or has failed
///
/// Bug: The footer paired the requested page number with the row count of
/// the last good page, so moving from page 2 to page 3 of 25 read
/// "Showing 21 to 30 of 25 entries" until a fetch succeeded.
///
/// Fix: Only rows actually on screen are counted.
#[tokio::test]
async fn test_footer_range_during_failed_page_change() {
    let failing = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let fail = failing.clone();
    let (inner, _) = division_list(25);
    let list = move |d: QueryDescriptor| {
        let fail = fail.load(Ordering::SeqCst);
        let page = inner.list(d);
        async move {
            if fail {
                anyhow::bail!("Network Error");
            }
            page.await
        }
    };
    let mut viewer =
        CollectionViewer::new("Divisions", PerPage::Ten, list).with_columns(vec![Column::new("name", "Name")]);
    viewer.mount();
    viewer.next_outcome().await;
    viewer.dispatch(TableEvent::PageChanged(2), Instant::now());
    viewer.next_outcome().await;
    assert!(draw(&mut viewer).contains("Showing 11 to 20 of 25 entries"));

    failing.store(true, Ordering::SeqCst);
    viewer.dispatch(TableEvent::PageChanged(3), Instant::now());
    let screen = draw(&mut viewer);
    assert!(screen.contains("Showing 0 to 0 of 25 entries"), "{}", screen);
    assert!(!screen.contains("21 to 30"));

    viewer.next_outcome().await;
    assert_eq!(viewer.fetcher().status(), FetchStatus::Error);
    let screen = draw(&mut viewer);
    assert!(screen.contains("Network Error"));
    assert!(screen.contains("Showing 0 to 0 of 25 entries"), "{}", screen);
    assert!(screen.contains("Page 3 of 3"));

    // Recovery shows the real range
    failing.store(false, Ordering::SeqCst);
    viewer.dispatch(TableEvent::Retry, Instant::now());
    viewer.next_outcome().await;
    assert!(draw(&mut viewer).contains("Showing 21 to 25 of 25 entries"));
}

/// Footer after shrinking the page size mid-load never counts more than a page
#[tokio::test]
async fn test_footer_range_while_page_size_changes() {
    let (list, _) = division_list(250);
    let mut viewer = CollectionViewer::new("Divisions", PerPage::Fifty, list);
    viewer.mount();
    viewer.next_outcome().await;

    viewer.dispatch(TableEvent::PerPageChanged(PerPage::Ten), Instant::now());
    let screen = draw(&mut viewer);
    assert!(screen.contains("Showing 0 to 0 of 250 entries"), "{}", screen);

    viewer.next_outcome().await;
    assert!(draw(&mut viewer).contains("Showing 1 to 10 of 250 entries"));
}
