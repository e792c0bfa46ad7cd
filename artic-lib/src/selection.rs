//! Cross-page selection tracking.

use std::collections::HashSet;

use crate::model::ArtworkId;

/// The durable set of selected record ids.
///
/// Survives page navigation and may hold ids that are not on the loaded page.
/// Iteration yields ids in the order they were first selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<ArtworkId>,
    members: HashSet<ArtworkId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the selection from the desired checked state of one page.
    ///
    /// Every id in `checked` is added. Every id in `visible` that is not in
    /// `checked` is removed. Ids outside `visible` are only ever added, and
    /// only when the caller lists them in `checked`; callers keep `checked`
    /// a subset of `visible` to scope a call to one page.
    ///
    /// Returns `true` if the selection changed.
    pub fn reconcile(&mut self, visible: &[ArtworkId], checked: &[ArtworkId]) -> bool {
        let mut changed = false;

        for &id in checked {
            changed |= self.insert(id);
        }

        let checked: HashSet<ArtworkId> = checked.iter().copied().collect();
        for id in visible {
            if !checked.contains(id) {
                changed |= self.remove(*id);
            }
        }

        changed
    }

    /// Check if an id is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.members.contains(&id)
    }

    /// The selected subset of `rows`, in row order.
    pub fn visible(&self, rows: &[ArtworkId]) -> Vec<ArtworkId> {
        rows.iter().copied().filter(|id| self.contains(*id)).collect()
    }

    /// Number of selected ids across all pages.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All selected ids, oldest selection first.
    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.order.iter().copied()
    }

    fn insert(&mut self, id: ArtworkId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: ArtworkId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|x| *x != id);
            true
        } else {
            false
        }
    }
}
