//! The "new campaign" wizard's final submission.

use chrono::Utc;

use crate::core::errors::Result;
use crate::forms::require;
use crate::records::{Campaign, CampaignStatus};
use crate::source::NewRecord;

/// Input for a new campaign. Only name and subject are hard requirements;
/// the wizard's remaining steps (audience, schedule) can be filled later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub name: String,
    pub subject: String,
    pub audience: String,
}

impl CampaignForm {
    /// Required-field checks; first failure wins.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("subject", &self.subject)?;
        Ok(())
    }

    /// Validate and convert into a submission. New campaigns start as drafts
    /// with zeroed counters; the sink assigns the id.
    pub fn into_new_record(self) -> Result<NewRecord<Campaign>> {
        self.validate()?;
        Ok(NewRecord::new(move |id| Campaign {
            id,
            name: self.name.trim().to_string(),
            subject: self.subject.trim().to_string(),
            status: CampaignStatus::Draft,
            audience: self.audience.trim().to_string(),
            sent: 0,
            opens: 0,
            clicks: 0,
            created_at: Utc::now().date_naive(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_subject_are_required() {
        let form = CampaignForm::default();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("name"));

        let form = CampaignForm {
            name: "Q2 Launch".to_string(),
            ..CampaignForm::default()
        };
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("subject"));

        let form = CampaignForm {
            name: "Q2 Launch".to_string(),
            subject: "It's here".to_string(),
            audience: String::new(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validation_error_carries_odk_code() {
        let err = CampaignForm::default().validate().unwrap_err();
        assert_eq!(err.code(), "ODK-2001");
        assert!(!err.is_retryable());
    }
}
