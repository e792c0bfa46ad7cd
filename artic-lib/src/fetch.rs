//! Page fetching.
//!
//! The [`Fetcher`] runs one request per [`FetchRequest`] and hands back a
//! [`FetchCompletion`]. It never touches widget state: the caller applies the
//! completion through [`TableController::finish_fetch`].
//!
//! [`TableController::finish_fetch`]: crate::controller::TableController::finish_fetch

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use log::error;

use crate::error::Error;
use crate::model::PageWindow;
use crate::model::ResultSet;

/// Something that can produce one page of the collection.
///
/// Implemented by [`ArticClient`](crate::ArticClient); tests plug in
/// in-memory sources.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the records and total count for `window`.
    async fn fetch(&self, window: PageWindow) -> Result<ResultSet, Error>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch(&self, window: PageWindow) -> Result<ResultSet, Error> {
        (**self).fetch(window).await
    }
}

/// Monotonically increasing tag of an issued request.
pub type Ticket = u64;

/// A request issued by the controller for one page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Issue order; later requests carry larger tickets.
    pub ticket: Ticket,
    /// The window being requested.
    pub window: PageWindow,
}

/// The settled outcome of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchCompletion {
    /// The request this completes.
    pub request: FetchRequest,
    /// Records and total, or why the fetch failed.
    pub result: Result<ResultSet, Error>,
}

impl FetchCompletion {
    /// Collapses a failure into an empty result set.
    pub fn into_result_set(self) -> ResultSet {
        self.result.unwrap_or_else(|_| ResultSet::empty())
    }
}

/// Issues page requests against a [`PageSource`].
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn PageSource>,
}

impl Fetcher {
    /// Creates a fetcher over `source`.
    pub fn new(source: impl PageSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Creates a fetcher over an already shared source.
    pub fn from_shared(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Runs one request to completion.
    ///
    /// Failures are logged here and returned inside the completion.
    pub async fn load(&self, request: FetchRequest) -> FetchCompletion {
        let FetchRequest { ticket, window } = request;
        debug!(
            "fetch #{}: page {} (limit {})",
            ticket,
            window.api_page(),
            window.size()
        );

        let result = self.source.fetch(window).await;

        match &result {
            Ok(page) => debug!(
                "fetch #{}: {} records, {} total",
                ticket,
                page.len(),
                page.total()
            ),
            Err(e) => error!("fetch #{} for page {} failed: {}", ticket, window.api_page(), e),
        }

        FetchCompletion { request, result }
    }

    /// Loads a window and degrades any failure to an empty result set.
    pub async fn load_window(&self, window: PageWindow) -> ResultSet {
        self.load(FetchRequest { ticket: 0, window })
            .await
            .into_result_set()
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}
