//! Selection tracking for bulk actions (export).
//!
//! The set holds record ids relative to the *currently filtered* list: a
//! select-all applies to what the user can see, and changing filters later
//! does not retroactively select newly-shown records.

use std::collections::BTreeSet;

/// Ids of records marked for a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<u64>,
}

impl SelectionSet {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a single id: add if absent, remove if present.
    pub fn toggle(&mut self, id: u64) {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
        }
    }

    /// Select-all against the visible (filtered) id set.
    ///
    /// If the selection already equals that exact set, clears it; otherwise
    /// replaces the selection with exactly the visible ids.
    pub fn toggle_all(&mut self, visible: &[u64]) {
        let visible_set: BTreeSet<u64> = visible.iter().copied().collect();
        if self.ids == visible_set {
            self.ids.clear();
        } else {
            self.ids = visible_set;
        }
    }

    /// Drop ids no longer present in the source collection.
    ///
    /// Keeps the invariant that the selection is a subset of the unfiltered
    /// record set when records reload.
    pub fn retain_within(&mut self, source_ids: &[u64]) {
        let source: BTreeSet<u64> = source_ids.iter().copied().collect();
        self.ids.retain(|id| source.contains(id));
    }

    /// Whether the id is selected.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Clear the selection (navigation away from the page).
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        sel.toggle(7);
        assert!(sel.contains(7));
        sel.toggle(7);
        assert!(!sel.contains(7));
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_all_selects_exactly_visible_then_clears() {
        let mut sel = SelectionSet::new();
        let visible = [3, 1, 5];

        sel.toggle_all(&visible);
        assert_eq!(sel.len(), 3);
        let ids: Vec<u64> = sel.ids().collect();
        assert_eq!(ids, vec![1, 3, 5]);

        sel.toggle_all(&visible);
        assert!(sel.is_empty());
    }

    #[test]
    fn partial_selection_becomes_full_not_cleared() {
        let mut sel = SelectionSet::new();
        sel.toggle(1);
        sel.toggle_all(&[1, 2, 3]);
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn superset_selection_is_replaced_not_cleared() {
        // Selection from a previous, wider filter is not equal to the
        // visible set, so select-all replaces it with the visible ids.
        let mut sel = SelectionSet::new();
        sel.toggle_all(&[1, 2, 3, 4]);
        sel.toggle_all(&[2, 3]);
        let ids: Vec<u64> = sel.ids().collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn retain_within_drops_stale_ids() {
        let mut sel = SelectionSet::new();
        sel.toggle_all(&[1, 2, 3]);
        sel.retain_within(&[2, 3, 9]);
        let ids: Vec<u64> = sel.ids().collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn toggle_all_on_empty_visible_list_is_noop_for_empty_selection() {
        let mut sel = SelectionSet::new();
        sel.toggle_all(&[]);
        assert!(sel.is_empty());
    }
}
