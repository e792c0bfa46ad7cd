//! Widget state and its transitions.
//!
//! [`TableController`] owns everything the paged table shows: the page
//! window, the loaded result set, the loading flag, the cross-page selection
//! and the widget state. It is mutated only through one method per event:
//!
//! | Event                    | Method                                  |
//! |--------------------------|-----------------------------------------|
//! | mount                    | [`mount`](TableController::mount)               |
//! | page-window change       | [`change_window`](TableController::change_window) |
//! | same window again        | [`reload`](TableController::reload)             |
//! | fetch settled            | [`finish_fetch`](TableController::finish_fetch) |
//! | checkbox interaction     | [`select`](TableController::select)             |
//!
//! Requests are not cancelled. With the default
//! [`ResponseOrder::LastWriteWins`], a slow response for an old window can
//! land after the response for the window the user moved to, and it wins.

use std::sync::Arc;

use log::debug;
use log::error;
use log::info;
use log::warn;

use crate::error::Error;
use crate::fetch::FetchCompletion;
use crate::fetch::FetchRequest;
use crate::fetch::Ticket;
use crate::model::Artwork;
use crate::model::ArtworkId;
use crate::model::PageWindow;
use crate::model::ResultSet;
use crate::selection::SelectionSet;

/// Lifecycle of the widget, per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last applied completion succeeded.
    Loaded,
    /// The last applied completion failed. Shown exactly like an empty page.
    Errored,
}

/// How completions that arrive out of order are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrder {
    /// Apply every completion in arrival order; the last one applied wins.
    #[default]
    LastWriteWins,
    /// Drop completions whose ticket is older than the latest issued request.
    LatestOnly,
}

/// Receives fetch failures that the table otherwise absorbs silently.
pub trait FetchObserver: Send + Sync {
    /// Called once per failed fetch that was applied to the table.
    fn on_fetch_failed(&self, window: PageWindow, error: &Error);
}

impl<F> FetchObserver for F
where
    F: Fn(PageWindow, &Error) + Send + Sync,
{
    fn on_fetch_failed(&self, window: PageWindow, error: &Error) {
        self(window, error)
    }
}

/// What a completion did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result set was replaced with the fetched page.
    Loaded,
    /// The fetch failed and the result set was cleared.
    Failed,
    /// The completion was stale and ignored ([`ResponseOrder::LatestOnly`]).
    Discarded,
}

/// State of one paged, selectable table.
pub struct TableController {
    window: PageWindow,
    result: ResultSet,
    loading: bool,
    state: WidgetState,
    selection: SelectionSet,
    order: ResponseOrder,
    observer: Option<Arc<dyn FetchObserver>>,
    next_ticket: Ticket,
    /// Window of the most recently issued request.
    requested: Option<FetchRequest>,
}

impl TableController {
    /// Creates a controller showing the first page with `page_size` rows.
    pub fn new(page_size: usize) -> Self {
        Self {
            window: PageWindow::first_page(page_size),
            result: ResultSet::empty(),
            loading: false,
            state: WidgetState::Idle,
            selection: SelectionSet::new(),
            order: ResponseOrder::default(),
            observer: None,
            next_ticket: 1,
            requested: None,
        }
    }

    /// Sets how out-of-order completions are handled.
    pub fn with_response_order(mut self, order: ResponseOrder) -> Self {
        self.order = order;
        self
    }

    /// Registers an observer for fetch failures.
    pub fn with_observer(mut self, observer: impl FetchObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Issues the initial request for the current window.
    pub fn mount(&mut self) -> FetchRequest {
        info!(
            "table mounted: page {} (limit {})",
            self.window.api_page(),
            self.window.size()
        );
        self.issue()
    }

    /// Moves to `window` and issues a request for it.
    ///
    /// Returns `None` when `window` is the one already shown; use
    /// [`reload`](Self::reload) to fetch it again.
    pub fn change_window(&mut self, window: PageWindow) -> Option<FetchRequest> {
        if window == self.window && self.requested.is_some() {
            return None;
        }
        self.window = window;
        Some(self.issue())
    }

    /// Moves to another page with the same size.
    pub fn go_to_page(&mut self, index: usize) -> Option<FetchRequest> {
        self.change_window(self.window.with_index(index))
    }

    /// Changes rows per page and returns to the first page.
    ///
    /// Returns `None` for a zero size or the size already shown.
    pub fn set_page_size(&mut self, size: usize) -> Option<FetchRequest> {
        if size == self.window.size() {
            return None;
        }
        let window = PageWindow::new(0, size)?;
        self.change_window(window)
    }

    /// Issues a fresh request for the current window.
    pub fn reload(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Applies a settled request.
    ///
    /// On success the result set is replaced; on failure it is cleared, the
    /// error is logged and the observer, if any, is notified. The loading
    /// flag is cleared either way.
    pub fn finish_fetch(&mut self, completion: FetchCompletion) -> Applied {
        let FetchCompletion { request, result } = completion;

        if self.order == ResponseOrder::LatestOnly && self.is_stale(&request) {
            warn!(
                "discarding stale fetch #{} for page {}",
                request.ticket,
                request.window.api_page()
            );
            return Applied::Discarded;
        }

        if self.is_stale(&request) {
            debug!(
                "applying out-of-order fetch #{} for page {}",
                request.ticket,
                request.window.api_page()
            );
        }

        self.loading = false;

        match result {
            Ok(page) => {
                self.result = page;
                self.state = WidgetState::Loaded;
                Applied::Loaded
            }
            Err(e) => {
                error!(
                    "page {} unavailable, showing empty table: {}",
                    request.window.api_page(),
                    e
                );
                self.result = ResultSet::empty();
                self.state = WidgetState::Errored;
                if let Some(observer) = &self.observer {
                    observer.on_fetch_failed(request.window, &e);
                }
                Applied::Failed
            }
        }
    }

    /// Applies the desired checked rows of the visible page.
    ///
    /// `checked` is the full list of rows the user wants checked on the
    /// current page, not a delta. Ids not on the loaded page are ignored, so
    /// selections on other pages are never affected.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, checked: &[ArtworkId]) -> bool {
        let visible = self.result.ids();
        let checked: Vec<ArtworkId> = checked
            .iter()
            .copied()
            .filter(|id| self.result.contains(*id))
            .collect();
        self.selection.reconcile(&visible, &checked)
    }

    fn issue(&mut self) -> FetchRequest {
        let request = FetchRequest {
            ticket: self.next_ticket,
            window: self.window,
        };
        self.next_ticket += 1;
        self.requested = Some(request);
        self.loading = true;
        self.state = WidgetState::Loading;
        request
    }

    fn is_stale(&self, request: &FetchRequest) -> bool {
        self.requested
            .is_some_and(|latest| request.ticket < latest.ticket)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The requested window.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Records of the loaded page.
    pub fn records(&self) -> &[Artwork] {
        self.result.records()
    }

    /// Total records reported by the last applied fetch.
    pub fn total_records(&self) -> u64 {
        self.result.total()
    }

    /// The last applied result set.
    pub fn result(&self) -> &ResultSet {
        &self.result
    }

    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current widget state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The cross-page selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selected ids present on the loaded page, in row order.
    pub fn visible_selection(&self) -> Vec<ArtworkId> {
        self.selection.visible(&self.result.ids())
    }

    /// Returns `true` if the row is on the loaded page and selected.
    pub fn is_checked(&self, id: ArtworkId) -> bool {
        self.selection.contains(id) && self.result.contains(id)
    }

    /// Number of pages for the loaded total at the current size.
    pub fn page_count(&self) -> usize {
        self.window.page_count(self.result.total())
    }

    /// The latest issued request, if any.
    pub fn latest_request(&self) -> Option<FetchRequest> {
        self.requested
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("window", &self.window)
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("records", &self.result.len())
            .field("total", &self.result.total())
            .field("selected", &self.selection.len())
            .field("order", &self.order)
            .finish()
    }
}
