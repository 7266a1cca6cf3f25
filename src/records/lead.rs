//! Lead records: the people the outreach pipeline works.

#![allow(clippy::cast_precision_loss)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::Exportable;
use crate::view::collection::{FieldValue, Record};

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Never contacted.
    New,
    /// At least one touch sent.
    Contacted,
    /// Responded and fits the profile.
    Qualified,
    /// Ruled out.
    Unqualified,
}

impl LeadStatus {
    /// Canonical display string; also the value equality filters match on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Unqualified => "Unqualified",
        }
    }
}

/// One row on the leads page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    pub status: LeadStatus,
    /// Where the lead came from ("Website", "LinkedIn", "Referral", ...).
    #[serde(default)]
    pub source: String,
    pub created_at: NaiveDate,
}

impl Lead {
    /// Display name, `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Lead {
    fn id(&self) -> u64 {
        self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email, &self.company]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "first_name" => Some(FieldValue::Text(&self.first_name)),
            "last_name" => Some(FieldValue::Text(&self.last_name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "company" => Some(FieldValue::Text(&self.company)),
            "phone" => Some(FieldValue::Text(&self.phone)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "source" => Some(FieldValue::Text(&self.source)),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "first_name",
            "last_name",
            "email",
            "company",
            "phone",
            "status",
            "source",
            "created_at",
        ]
    }
}

impl Exportable for Lead {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "first_name",
            "last_name",
            "email",
            "company",
            "phone",
            "status",
            "source",
            "created_at",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.phone.clone(),
            self.status.as_str().to_string(),
            self.source.clone(),
            self.created_at.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::collection::{Query, SortDirection, apply};

    fn lead(id: u64, first: &str, last: &str, status: LeadStatus, day: u32) -> Lead {
        Lead {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            company: "Acme Corp".to_string(),
            phone: String::new(),
            status,
            source: "Website".to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date"),
        }
    }

    #[test]
    fn status_filter_matches_display_string() {
        let leads = vec![
            lead(1, "Ada", "Lovelace", LeadStatus::Qualified, 1),
            lead(2, "Grace", "Hopper", LeadStatus::New, 2),
        ];
        let out = apply(&leads, &Query::new().with_filter("status", "Qualified")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn search_covers_name_email_and_company() {
        let leads = vec![lead(1, "Ada", "Lovelace", LeadStatus::New, 1)];
        for term in ["ada", "LOVELACE", "ada@example.com", "acme"] {
            let out = apply(&leads, &Query::new().with_search(term)).unwrap();
            assert_eq!(out.len(), 1, "term {term:?} should match");
        }
        assert!(
            apply(&leads, &Query::new().with_search("zzz"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn created_at_sorts_chronologically() {
        let leads = vec![
            lead(1, "Ada", "Lovelace", LeadStatus::New, 20),
            lead(2, "Grace", "Hopper", LeadStatus::New, 5),
        ];
        let out = apply(
            &leads,
            &Query::new().with_sort("created_at", SortDirection::Asc),
        )
        .unwrap();
        let ids: Vec<u64> = out.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn serde_round_trips_status_as_variant_name() {
        let l = lead(1, "Ada", "Lovelace", LeadStatus::Contacted, 1);
        let json = serde_json::to_string(&l).unwrap();
        assert!(json.contains("\"Contacted\""));
        let back: Lead = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }
}
