//! Result set: one fetched page plus the collection total.

use super::Artwork;
use super::ArtworkId;

/// Records for the current page and the total record count.
///
/// Replaced wholesale on every fetch; never merged with a previous result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<Artwork>,
    total: u64,
}

impl ResultSet {
    /// Creates a result set.
    pub fn new(records: Vec<Artwork>, total: u64) -> Self {
        Self { records, total }
    }

    /// No records and a zero total. Used after a failed fetch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records on the current page, in server order.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Total records in the remote collection, as reported by the server.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Ids of the records on the current page, in row order.
    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Returns `true` if the record is on the current page.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
