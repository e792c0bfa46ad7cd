//! Artwork collection listing.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::fetch::PageSource;
use crate::model::Artwork;
use crate::model::PageWindow;
use crate::model::ResultSet;

impl ArticClient {
    /// Fetches one page of the collection.
    ///
    /// Sends `GET <endpoint>?page=<index + 1>&limit=<size>`. A missing `data`
    /// array decodes as no records, a missing `pagination.total` as zero.
    pub async fn fetch_page(&self, window: PageWindow) -> Result<ResultSet, Error> {
        let url = self.page_url(window);

        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), body).into());
        }

        let body = response.text().await.map_err(|e| self.send_error(e))?;
        let payload: ArtworksResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        Ok(payload.into_result_set())
    }

    /// Builds the request URL for a page window.
    pub fn page_url(&self, window: PageWindow) -> url::Url {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &window.api_page().to_string())
            .append_pair("limit", &window.size().to_string());
        url
    }
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch(&self, window: PageWindow) -> Result<ResultSet, Error> {
        self.fetch_page(window).await
    }
}

/// Listing response: `{ "data": [...], "pagination": { "total": n, ... } }`.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    #[serde(default)]
    data: Option<Vec<Artwork>>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    total: Option<u64>,
}

impl ArtworksResponse {
    fn into_result_set(self) -> ResultSet {
        let records = self.data.unwrap_or_default();
        let total = self.pagination.and_then(|p| p.total).unwrap_or(0);
        ResultSet::new(records, total)
    }
}
