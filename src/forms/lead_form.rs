//! The "add lead" form.

use chrono::Utc;

use crate::core::errors::Result;
use crate::forms::{require, require_email};
use crate::records::{Lead, LeadStatus};
use crate::source::NewRecord;

/// Input for a new lead. First name, last name, and email are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub source: String,
}

impl LeadForm {
    /// Required-field and email-shape checks; first failure wins.
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require_email("email", &self.email)?;
        Ok(())
    }

    /// Validate and convert into a submission. New leads start in `New`
    /// status, created today; the sink assigns the id.
    pub fn into_new_record(self) -> Result<NewRecord<Lead>> {
        self.validate()?;
        Ok(NewRecord::new(move |id| Lead {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            phone: self.phone.trim().to_string(),
            status: LeadStatus::New,
            source: if self.source.trim().is_empty() {
                "Manual".to_string()
            } else {
                self.source.trim().to_string()
            },
            created_at: Utc::now().date_naive(),
        }))
    }
}
