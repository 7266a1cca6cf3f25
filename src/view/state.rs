//! Elm-style state for one list page.
//!
//! All page state lives in [`ViewState`]. UI events arrive as [`ViewMsg`]
//! values; side-effects are represented as [`ViewCmd`] values returned from
//! [`ViewState::update`].
//!
//! **Design invariant:** `update` is deterministic and performs no I/O.
//! Messages that would leave the state invalid (unknown field names, ids
//! outside the source set) are rejected with an error and the state stays
//! untouched.

use crate::core::errors::{OdkError, Result};
use crate::view::collection::{self, Query, Record, SortSpec};
use crate::view::selection::SelectionSet;

/// Events a list page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMsg<R> {
    /// Search input changed.
    SearchChanged(String),
    /// An equality filter dropdown changed (value may be the `"all"` sentinel).
    FilterChanged {
        /// Field the filter constrains.
        field: String,
        /// Expected value, or `"all"` to lift the constraint.
        value: String,
    },
    /// A sortable column header was clicked.
    SortClicked {
        /// Field of the clicked column.
        field: String,
    },
    /// Page navigation.
    PageChanged(usize),
    /// Row checkbox toggled.
    ToggleSelect(u64),
    /// Header checkbox toggled (select-all over the filtered list).
    ToggleSelectAll,
    /// Selection dropped (navigation away).
    ClearSelection,
    /// Fresh records arrived from the record source.
    RecordsLoaded(Vec<R>),
    /// User asked for a reload.
    Refresh,
}

/// Side-effects the caller must execute after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCmd {
    /// Nothing to do.
    None,
    /// Re-fetch records from the page's record source.
    Refetch,
}

/// Complete state of one list page: records, query, selection, page cursor.
#[derive(Debug, Clone)]
pub struct ViewState<R> {
    records: Vec<R>,
    query: Query,
    selection: SelectionSet,
    page: usize,
    page_size: usize,
}

impl<R: Record> ViewState<R> {
    /// New state with an initial query (typically the configured default sort).
    #[must_use]
    pub fn new(query: Query, page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query,
            selection: SelectionSet::new(),
            page: 1,
            page_size,
        }
    }

    /// Apply one message; returns the command the caller should run.
    pub fn update(&mut self, msg: ViewMsg<R>) -> Result<ViewCmd> {
        match msg {
            ViewMsg::SearchChanged(search) => {
                self.query.search = search;
                self.page = 1;
                Ok(ViewCmd::None)
            }

            ViewMsg::FilterChanged { field, value } => {
                // Validate before mutating so a bad field leaves state intact.
                let mut next = self.query.clone();
                next.filters.insert(field, value);
                next.validate_for::<R>()?;
                self.query = next;
                self.page = 1;
                Ok(ViewCmd::None)
            }

            ViewMsg::SortClicked { field } => {
                let mut next = self.query.clone();
                next.sort = Some(match next.sort.take() {
                    Some(current) if current.field == field => SortSpec {
                        direction: current.direction.flipped(),
                        field,
                    },
                    _ => SortSpec {
                        field,
                        direction: collection::SortDirection::Asc,
                    },
                });
                next.validate_for::<R>()?;
                self.query = next;
                Ok(ViewCmd::None)
            }

            ViewMsg::PageChanged(page) => {
                let pages = collection::page_count(self.visible()?.len(), self.page_size);
                self.page = page.clamp(1, pages);
                Ok(ViewCmd::None)
            }

            ViewMsg::ToggleSelect(id) => {
                // The selection must stay a subset of the source id set, so a
                // stale id is rejected like an unknown field name.
                if !self.records.iter().any(|r| r.id() == id) {
                    return Err(OdkError::InvalidArgument {
                        details: format!("unknown record id {id}"),
                    });
                }
                self.selection.toggle(id);
                Ok(ViewCmd::None)
            }

            ViewMsg::ToggleSelectAll => {
                let visible_ids: Vec<u64> = self.visible()?.iter().map(|r| r.id()).collect();
                self.selection.toggle_all(&visible_ids);
                Ok(ViewCmd::None)
            }

            ViewMsg::ClearSelection => {
                self.selection.clear();
                Ok(ViewCmd::None)
            }

            ViewMsg::RecordsLoaded(records) => {
                self.records = records;
                let source_ids: Vec<u64> = self.records.iter().map(Record::id).collect();
                self.selection.retain_within(&source_ids);
                let pages = collection::page_count(self.visible()?.len(), self.page_size);
                self.page = self.page.clamp(1, pages);
                Ok(ViewCmd::None)
            }

            ViewMsg::Refresh => Ok(ViewCmd::Refetch),
        }
    }

    /// The full filtered+sorted display list.
    pub fn visible(&self) -> Result<Vec<&R>> {
        collection::apply(&self.records, &self.query)
    }

    /// The current page of the display list.
    pub fn visible_page(&self) -> Result<Vec<&R>> {
        let all = self.visible()?;
        Ok(collection::paginate(&all, self.page, self.page_size).to_vec())
    }

    /// Unfiltered source records.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Current query.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }
}
