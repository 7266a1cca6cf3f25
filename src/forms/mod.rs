//! Form validation for the record-creating pages.
//!
//! The only user-visible validation the dashboard performs is required-field
//! checking on submission. Each form validates to [`OdkError::Validation`]
//! with the first offending field; anything past validation is the submit
//! boundary's problem.

pub mod campaign_form;
pub mod lead_form;
pub mod topup;

pub use campaign_form::CampaignForm;
pub use lead_form::LeadForm;
pub use topup::{TopUpOrder, TopUpReceipt};

use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{OdkError, Result};

/// Loose email shape: something@something.tld. Deliverability is the sending
/// provider's problem, not the form's.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Require a non-blank field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OdkError::missing_field(field));
    }
    Ok(())
}

/// Require a plausibly-shaped email address.
pub(crate) fn require_email(field: &'static str, value: &str) -> Result<()> {
    require(field, value)?;
    if !EMAIL_SHAPE.is_match(value.trim()) {
        return Err(OdkError::Validation {
            field,
            reason: format!("{value:?} is not a valid email address"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_and_whitespace() {
        assert!(require("x", "value").is_ok());
        assert!(require("x", "").is_err());
        assert!(require("x", "   ").is_err());
    }

    #[test]
    fn email_shape_accepts_normal_addresses() {
        for ok in ["a@b.co", "first.last@sub.domain.io", "x+tag@y.org"] {
            assert!(require_email("email", ok).is_ok(), "{ok} should pass");
        }
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        for bad in ["", "plain", "no@tld", "two@@at.com", "spaces in@x.co"] {
            assert!(require_email("email", bad).is_err(), "{bad} should fail");
        }
    }
}
