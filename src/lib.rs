#![forbid(unsafe_code)]

//! Outreach Desk (odk) — sales-outreach workbench over lead, campaign, and
//! email-activity collections.
//!
//! Every list page runs through one engine:
//! 1. **Collection view** — pure search/filter/sort derivation over records
//! 2. **Selection tracking** — ids marked for bulk export
//! 3. **View state** — Elm-style messages through a pure update function
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use outreach_desk::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use outreach_desk::core::config::Config;
//! use outreach_desk::view::collection::{Query, SortDirection};
//! ```

pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod export;
pub mod forms;
pub mod logger;
pub mod records;
pub mod source;
pub mod view;
