//! Page window: which slice of the remote collection is requested.

/// A zero-based page index plus a positive page size.
///
/// The remote API is one-based; use [`PageWindow::api_page`] when building
/// requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    index: usize,
    size: usize,
}

impl PageWindow {
    /// Creates a window. Returns `None` when `size` is zero.
    pub fn new(index: usize, size: usize) -> Option<Self> {
        (size > 0).then_some(Self { index, size })
    }

    /// The first page with the given size.
    ///
    /// A zero size is bumped to one.
    pub fn first_page(size: usize) -> Self {
        Self {
            index: 0,
            size: size.max(1),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rows per page.
    pub fn size(&self) -> usize {
        self.size
    }

    /// One-based page number sent to the API.
    pub fn api_page(&self) -> usize {
        self.index + 1
    }

    /// Offset of the first row in the whole collection.
    pub fn first(&self) -> usize {
        self.index * self.size
    }

    /// Number of pages needed to show `total` rows.
    pub fn page_count(&self, total: u64) -> usize {
        (total as usize).div_ceil(self.size)
    }

    /// Same size, different index.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            size: self.size,
        }
    }
}
