//! Email-activity records: one delivery event per tracked message.

#![allow(clippy::cast_precision_loss)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::export::Exportable;
use crate::view::collection::{FieldValue, Record};

/// Furthest tracking stage a message reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailStatus {
    /// Accepted by the sending provider.
    Sent,
    /// Delivered to the recipient's server.
    Delivered,
    /// Recipient opened the message.
    Opened,
    /// Recipient clicked a tracked link.
    Clicked,
    /// Delivery failed.
    Bounced,
}

impl EmailStatus {
    /// Canonical display string; also the value equality filters match on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Opened => "Opened",
            Self::Clicked => "Clicked",
            Self::Bounced => "Bounced",
        }
    }
}

/// One row on the email-tracking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailActivity {
    pub id: u64,
    pub recipient: String,
    pub subject: String,
    /// Campaign the message belongs to.
    pub campaign_id: u64,
    pub status: EmailStatus,
    pub sent_at: DateTime<Utc>,
}

impl Record for EmailActivity {
    fn id(&self) -> u64 {
        self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.recipient, &self.subject]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "recipient" => Some(FieldValue::Text(&self.recipient)),
            "subject" => Some(FieldValue::Text(&self.subject)),
            "campaign_id" => Some(FieldValue::Number(self.campaign_id as f64)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "sent_at" => Some(FieldValue::Stamp(self.sent_at)),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "recipient", "subject", "campaign_id", "status", "sent_at"]
    }
}

impl Exportable for EmailActivity {
    fn headers() -> &'static [&'static str] {
        &["id", "recipient", "subject", "campaign_id", "status", "sent_at"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.recipient.clone(),
            self.subject.clone(),
            self.campaign_id.to_string(),
            self.status.as_str().to_string(),
            self.sent_at.to_rfc3339(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::view::collection::{Query, SortDirection, apply};

    fn activity(id: u64, recipient: &str, status: EmailStatus, hour: u32) -> EmailActivity {
        EmailActivity {
            id,
            recipient: recipient.to_string(),
            subject: "Your Q1 invite".to_string(),
            campaign_id: 1,
            status,
            sent_at: Utc
                .with_ymd_and_hms(2025, 3, 14, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn sent_at_sorts_chronologically() {
        let events = vec![
            activity(1, "a@x.com", EmailStatus::Opened, 15),
            activity(2, "b@x.com", EmailStatus::Sent, 9),
        ];
        let out = apply(&events, &Query::new().with_sort("sent_at", SortDirection::Asc)).unwrap();
        let ids: Vec<u64> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn campaign_id_filter_matches_numeric_value() {
        let mut events = vec![
            activity(1, "a@x.com", EmailStatus::Opened, 9),
            activity(2, "b@x.com", EmailStatus::Sent, 10),
        ];
        events[1].campaign_id = 7;
        let out = apply(&events, &Query::new().with_filter("campaign_id", "7")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn bounced_filter_finds_failures() {
        let events = vec![
            activity(1, "a@x.com", EmailStatus::Delivered, 9),
            activity(2, "b@x.com", EmailStatus::Bounced, 10),
        ];
        let out = apply(&events, &Query::new().with_filter("status", "Bounced")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].recipient, "b@x.com");
    }
}
