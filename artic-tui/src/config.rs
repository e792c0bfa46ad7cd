//! Viewer configuration.

use std::time::Duration;

use artic_lib::DEFAULT_ENDPOINT;
use artic_lib::controller::ResponseOrder;
use simplelog::LevelFilter;

/// Settings for one viewer session.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Collection endpoint.
    pub endpoint: String,
    /// Rows per page at startup.
    pub page_size: usize,
    /// Rows-per-page choices, ascending.
    pub page_sizes: Vec<usize>,
    /// How out-of-order fetch completions are treated.
    pub response_order: ResponseOrder,
    /// Per-request timeout (None = wait indefinitely).
    pub request_timeout: Option<Duration>,
    /// Spinner frame duration.
    pub spinner_frame: Duration,
    /// Minimum level written to the log file.
    pub log_level: LevelFilter,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: 10,
            page_sizes: vec![5, 10, 20, 50],
            response_order: ResponseOrder::default(),
            request_timeout: None,
            spinner_frame: Duration::from_millis(60),
            log_level: LevelFilter::Debug,
        }
    }
}

impl ViewerConfig {
    /// Set the collection endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the initial rows per page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the rows-per-page choices. Zero entries are dropped.
    pub fn page_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut sizes: Vec<usize> = sizes.into_iter().filter(|s| *s > 0).collect();
        sizes.sort_unstable();
        sizes.dedup();
        self.page_sizes = sizes;
        self
    }

    /// Set the response-order policy.
    pub fn response_order(mut self, order: ResponseOrder) -> Self {
        self.response_order = order;
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// The next larger rows-per-page choice after `current`.
    pub fn larger_page_size(&self, current: usize) -> Option<usize> {
        self.page_sizes.iter().copied().find(|s| *s > current)
    }

    /// The next smaller rows-per-page choice before `current`.
    pub fn smaller_page_size(&self, current: usize) -> Option<usize> {
        self.page_sizes.iter().rev().copied().find(|s| *s < current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_steps() {
        let config = ViewerConfig::default();
        assert_eq!(config.larger_page_size(10), Some(20));
        assert_eq!(config.larger_page_size(50), None);
        assert_eq!(config.smaller_page_size(10), Some(5));
        assert_eq!(config.smaller_page_size(5), None);
        // a size outside the list still steps to its neighbours
        assert_eq!(config.larger_page_size(12), Some(20));
    }

    #[test]
    fn test_page_sizes_normalized() {
        let config = ViewerConfig::default().page_sizes([20, 0, 5, 20]);
        assert_eq!(config.page_sizes, vec![5, 20]);
    }
}
