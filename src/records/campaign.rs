//! Campaign records: one outreach sequence each.

#![allow(clippy::cast_precision_loss)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::Exportable;
use crate::view::collection::{FieldValue, Record};

/// Lifecycle stage of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    /// Being written; nothing sent.
    Draft,
    /// Queued for a future send date.
    Scheduled,
    /// Currently sending.
    Active,
    /// Sending suspended by the user.
    Paused,
    /// All sends finished.
    Completed,
}

impl CampaignStatus {
    /// Canonical display string; also the value equality filters match on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}

/// One row on the campaigns page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    /// Email subject line the campaign sends with.
    pub subject: String,
    pub status: CampaignStatus,
    /// Audience segment label ("Enterprise", "Trial users", ...).
    #[serde(default)]
    pub audience: String,
    /// Emails sent so far.
    #[serde(default)]
    pub sent: u64,
    /// Unique opens recorded.
    #[serde(default)]
    pub opens: u64,
    /// Unique clicks recorded.
    #[serde(default)]
    pub clicks: u64,
    pub created_at: NaiveDate,
}

impl Campaign {
    /// Opens per sent email, 0.0 when nothing was sent.
    #[must_use]
    pub fn open_rate(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            self.opens as f64 / self.sent as f64
        }
    }
}

impl Record for Campaign {
    fn id(&self) -> u64 {
        self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name, &self.subject, &self.audience]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "name" => Some(FieldValue::Text(&self.name)),
            "subject" => Some(FieldValue::Text(&self.subject)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "audience" => Some(FieldValue::Text(&self.audience)),
            "sent" => Some(FieldValue::Number(self.sent as f64)),
            "opens" => Some(FieldValue::Number(self.opens as f64)),
            "clicks" => Some(FieldValue::Number(self.clicks as f64)),
            "created_at" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "subject",
            "status",
            "audience",
            "sent",
            "opens",
            "clicks",
            "created_at",
        ]
    }
}

impl Exportable for Campaign {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "subject",
            "status",
            "audience",
            "sent",
            "opens",
            "clicks",
            "created_at",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.subject.clone(),
            self.status.as_str().to_string(),
            self.audience.clone(),
            self.sent.to_string(),
            self.opens.to_string(),
            self.clicks.to_string(),
            self.created_at.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::collection::{Query, SortDirection, apply};

    fn campaign(id: u64, name: &str, status: CampaignStatus, sent: u64) -> Campaign {
        Campaign {
            id,
            name: name.to_string(),
            subject: format!("{name} — subject"),
            status,
            audience: "Enterprise".to_string(),
            sent,
            opens: sent / 2,
            clicks: sent / 10,
            created_at: NaiveDate::from_ymd_opt(2025, 2, 10).expect("valid date"),
        }
    }

    #[test]
    fn sent_sorts_numerically_not_lexicographically() {
        // 900 < 1200 numerically even though "900" > "1200" as strings.
        let campaigns = vec![
            campaign(1, "Big", CampaignStatus::Active, 1200),
            campaign(2, "Small", CampaignStatus::Active, 900),
        ];
        let out = apply(&campaigns, &Query::new().with_sort("sent", SortDirection::Asc)).unwrap();
        let ids: Vec<u64> = out.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn open_rate_handles_zero_sent() {
        let c = campaign(1, "Empty", CampaignStatus::Draft, 0);
        assert!((c.open_rate() - 0.0).abs() < f64::EPSILON);
        let c = campaign(2, "Half", CampaignStatus::Active, 100);
        assert!((c.open_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn status_filter_selects_active_only() {
        let campaigns = vec![
            campaign(1, "Q1 Launch", CampaignStatus::Active, 10),
            campaign(2, "Enterprise Outreach", CampaignStatus::Draft, 0),
        ];
        let out = apply(&campaigns, &Query::new().with_filter("status", "Active")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }
}
