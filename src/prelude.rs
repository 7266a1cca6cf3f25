//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use outreach_desk::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{OdkError, Result};

// View engine
pub use crate::view::collection::{
    ALL_SENTINEL, FieldValue, Query, Record, SortDirection, SortSpec, apply, page_count, paginate,
};
pub use crate::view::selection::SelectionSet;
pub use crate::view::state::{ViewCmd, ViewMsg, ViewState};

// Records
pub use crate::records::{
    Campaign, CampaignStatus, EmailActivity, EmailStatus, Lead, LeadStatus,
};

// Sources and forms
pub use crate::forms::{CampaignForm, LeadForm, TopUpOrder};
pub use crate::source::{
    JsonFileSink, JsonFileSource, MemorySource, NewRecord, Receipt, RecordSource, SubmitSink,
};

// Export
pub use crate::export::{Exportable, write_csv, write_selected_csv};
