//! Paged table behaviour against an in-memory collection.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use artic_lib::controller::Applied;
use artic_lib::controller::ResponseOrder;
use artic_lib::controller::WidgetState;
use artic_lib::error::ApiError;
use artic_lib::error::Error;
use artic_lib::fetch::FetchCompletion;
use artic_lib::fetch::FetchRequest;
use artic_lib::model::Artwork;
use artic_lib::model::PageWindow;
use artic_lib::model::ResultSet;
use artic_lib::Fetcher;
use artic_lib::PageSource;
use artic_lib::TableController;

/// Artworks with ids `1..=total`, served a page at a time.
struct Collection {
    total: u64,
    failing: AtomicBool,
    requests: Mutex<Vec<PageWindow>>,
}

impl Collection {
    fn new(total: u64) -> Arc<Self> {
        Arc::new(Self {
            total,
            failing: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn page(&self, window: PageWindow) -> ResultSet {
        let start = window.first() as u64 + 1;
        let end = (start + window.size() as u64).min(self.total + 1);
        let records = (start..end)
            .map(|id| Artwork::new(id, format!("Artwork {id}")))
            .collect();
        ResultSet::new(records, self.total)
    }
}

#[async_trait]
impl PageSource for Collection {
    async fn fetch(&self, window: PageWindow) -> Result<ResultSet, Error> {
        self.requests.lock().unwrap().push(window);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::http(503, "service unavailable").into());
        }
        Ok(self.page(window))
    }
}

async fn settle(
    table: &mut TableController,
    fetcher: &Fetcher,
    issue: impl FnOnce(&mut TableController) -> Option<FetchRequest>,
) {
    let request = issue(table).expect("window change should issue a request");
    let completion = fetcher.load(request).await;
    table.finish_fetch(completion);
}

fn completion(ticket: u64, window: PageWindow, result: Result<ResultSet, Error>) -> FetchCompletion {
    FetchCompletion {
        request: FetchRequest { ticket, window },
        result,
    }
}

// =============================================================================
// Fetching
// =============================================================================

#[tokio::test]
async fn test_mount_loads_first_page() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);
    assert_eq!(table.state(), WidgetState::Idle);

    let request = table.mount();
    assert!(table.is_loading());
    assert_eq!(table.state(), WidgetState::Loading);

    settle(&mut table, &fetcher, |_| Some(request)).await;

    assert!(!table.is_loading());
    assert_eq!(table.state(), WidgetState::Loaded);
    assert_eq!(table.total_records(), 25);
    assert_eq!(table.result().ids(), (1..=10).collect::<Vec<_>>());
    assert_eq!(table.page_count(), 3);
}

#[tokio::test]
async fn test_total_tracks_requested_page() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);
    settle(&mut table, &fetcher, |t| Some(t.mount())).await;

    for index in [1, 2, 0, 2] {
        settle(&mut table, &fetcher, |t| t.go_to_page(index)).await;
        assert_eq!(table.window().index(), index);
        assert_eq!(table.total_records(), 25);
    }
    assert_eq!(table.result().ids(), vec![21, 22, 23, 24, 25]);
}

#[tokio::test]
async fn test_only_window_changes_issue_requests() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);
    settle(&mut table, &fetcher, |t| Some(t.mount())).await;

    assert!(table.go_to_page(0).is_none());
    assert!(table.set_page_size(10).is_none());
    table.select(&[1, 2]);

    let windows = collection.requests.lock().unwrap().clone();
    assert_eq!(windows, vec![PageWindow::first_page(10)]);
}

#[tokio::test]
async fn test_page_size_change_returns_to_first_page() {
    let collection = Collection::new(100);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);
    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    settle(&mut table, &fetcher, |t| t.go_to_page(4)).await;

    assert!(table.set_page_size(10).is_none());
    assert!(table.set_page_size(0).is_none());
    assert_eq!(table.window(), PageWindow::new(4, 10).unwrap());

    settle(&mut table, &fetcher, |t| t.set_page_size(20)).await;

    assert_eq!(table.window(), PageWindow::new(0, 20).unwrap());
    assert_eq!(table.result().ids(), (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_failure_yields_empty_page() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);
    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    table.select(&[3]);

    collection.fail(true);
    settle(&mut table, &fetcher, |t| t.go_to_page(1)).await;

    assert!(table.records().is_empty());
    assert_eq!(table.total_records(), 0);
    assert!(!table.is_loading());
    assert_eq!(table.state(), WidgetState::Errored);
    assert!(table.selection().contains(3));

    // next user action is the retry
    collection.fail(false);
    settle(&mut table, &fetcher, |t| Some(t.reload())).await;
    assert_eq!(table.state(), WidgetState::Loaded);
    assert_eq!(table.total_records(), 25);
}

#[tokio::test]
async fn test_load_window_degrades_to_empty() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    collection.fail(true);

    let page = fetcher.load_window(PageWindow::first_page(10)).await;

    assert_eq!(page, ResultSet::empty());
}

#[tokio::test]
async fn test_observer_sees_failures() {
    let seen: Arc<Mutex<Vec<(PageWindow, Option<u16>)>>> = Arc::default();
    let sink = seen.clone();

    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10).with_observer(move |window: PageWindow, error: &Error| {
        let Error::Api(api) = error;
        sink.lock().unwrap().push((window, api.status_code()));
    });

    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    assert!(seen.lock().unwrap().is_empty());

    collection.fail(true);
    settle(&mut table, &fetcher, |t| t.go_to_page(2)).await;

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![(PageWindow::new(2, 10).unwrap(), Some(503))]);
}

// =============================================================================
// Out-of-order completions
// =============================================================================

#[test]
fn test_last_write_wins_by_default() {
    let collection = Collection::new(25);
    let mut table = TableController::new(10);
    let first = table.mount();
    let second = table.go_to_page(1).unwrap();
    assert!(second.ticket > first.ticket);

    // page 1 answers first, then the slow page 0 response lands
    table.finish_fetch(completion(second.ticket, second.window, Ok(collection.page(second.window))));
    let applied = table.finish_fetch(completion(first.ticket, first.window, Ok(collection.page(first.window))));

    assert_eq!(applied, Applied::Loaded);
    assert_eq!(table.window().index(), 1);
    assert_eq!(table.result().ids(), (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_latest_only_discards_stale_completion() {
    let collection = Collection::new(25);
    let mut table = TableController::new(10).with_response_order(ResponseOrder::LatestOnly);
    let first = table.mount();
    let second = table.go_to_page(1).unwrap();

    let stale = table.finish_fetch(completion(first.ticket, first.window, Ok(collection.page(first.window))));
    assert_eq!(stale, Applied::Discarded);
    assert!(table.is_loading());

    table.finish_fetch(completion(second.ticket, second.window, Ok(collection.page(second.window))));
    assert!(!table.is_loading());
    assert_eq!(table.result().ids(), (11..=20).collect::<Vec<_>>());
}

// =============================================================================
// Selection across pages
// =============================================================================

#[tokio::test]
async fn test_selection_survives_navigation() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);

    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    assert_eq!(table.total_records(), 25);
    assert!(table.select(&[2, 5]));
    assert_eq!(table.visible_selection(), vec![2, 5]);

    settle(&mut table, &fetcher, |t| t.go_to_page(1)).await;
    assert_eq!(table.result().ids(), (11..=20).collect::<Vec<_>>());
    assert!(table.visible_selection().is_empty());
    table.select(&[12]);

    let mut all: Vec<_> = table.selection().iter().collect();
    all.sort_unstable();
    assert_eq!(all, vec![2, 5, 12]);

    settle(&mut table, &fetcher, |t| t.go_to_page(0)).await;
    assert_eq!(table.visible_selection(), vec![2, 5]);
    assert!(table.is_checked(2));
    assert!(!table.is_checked(12));
}

#[tokio::test]
async fn test_select_none_on_page() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);

    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    table.select(&[1, 2, 3]);
    settle(&mut table, &fetcher, |t| t.go_to_page(1)).await;
    table.select(&[11]);

    assert!(table.select(&[]));
    assert!(table.visible_selection().is_empty());
    assert_eq!(table.selection().iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_select_ignores_rows_off_page() {
    let collection = Collection::new(25);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);

    settle(&mut table, &fetcher, |t| Some(t.mount())).await;
    table.select(&[4]);
    settle(&mut table, &fetcher, |t| t.go_to_page(1)).await;

    table.select(&[13, 4, 99]);

    assert_eq!(table.selection().iter().collect::<Vec<_>>(), vec![4, 13]);
}

#[tokio::test]
async fn test_empty_collection() {
    let collection = Collection::new(0);
    let fetcher = Fetcher::new(collection.clone());
    let mut table = TableController::new(10);

    settle(&mut table, &fetcher, |t| Some(t.mount())).await;

    assert_eq!(table.state(), WidgetState::Loaded);
    assert!(table.records().is_empty());
    assert_eq!(table.page_count(), 0);
    assert!(!table.select(&[1]));
    assert!(table.visible_selection().is_empty());
}
