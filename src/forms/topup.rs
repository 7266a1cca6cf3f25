//! Credit top-up purchase from the billing page.

use serde::Serialize;

use crate::core::config::AccountConfig;
use crate::core::errors::{OdkError, Result};
use crate::records::catalog::{self, CreditPackage};

/// A top-up purchase. A selected package is the one required field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopUpOrder {
    /// Id of the chosen credit package, if any was picked.
    pub package: Option<String>,
}

/// Outcome of a completed top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUpReceipt {
    pub package_id: String,
    pub credits_added: u64,
    pub amount_cents: u32,
    pub new_balance: u64,
}

impl TopUpOrder {
    /// Resolve the chosen package, rejecting missing and unknown selections.
    pub fn resolve(&self) -> Result<&'static CreditPackage> {
        let Some(id) = self.package.as_deref().map(str::trim).filter(|s| !s.is_empty())
        else {
            return Err(OdkError::missing_field("package"));
        };
        catalog::package(id).ok_or_else(|| OdkError::Validation {
            field: "package",
            reason: format!("{id:?} is not a known credit package"),
        })
    }

    /// Validate and apply the purchase to the account's credit balance.
    pub fn apply_to(&self, account: &mut AccountConfig) -> Result<TopUpReceipt> {
        let package = self.resolve()?;
        account.credits = account.credits.saturating_add(package.credits);
        Ok(TopUpReceipt {
            package_id: package.id.to_string(),
            credits_added: package.credits,
            amount_cents: package.price_cents,
            new_balance: account.credits,
        })
    }
}
