//! Record shapes for the three list collections plus the static catalog.
//!
//! Each shape implements [`crate::view::collection::Record`] so every list
//! page runs through the same collection-view engine, and
//! [`crate::export::Exportable`] for CSV bulk export.

pub mod campaign;
pub mod catalog;
pub mod email;
pub mod lead;

pub use campaign::{Campaign, CampaignStatus};
pub use email::{EmailActivity, EmailStatus};
pub use lead::{Lead, LeadStatus};
