//! Collection View: the search/filter/sort/select engine behind every list page.
//!
//! Split into three layers:
//! 1. [`collection`] — pure derivation of a display list from records + query
//! 2. [`selection`] — the set of record ids marked for bulk actions
//! 3. [`state`] — Elm-style view state fed by messages through a pure update

pub mod collection;
pub mod selection;
pub mod state;
