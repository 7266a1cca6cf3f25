//! Built-in sample datasets.
//!
//! These are the arrays the dashboard pages shipped hardcoded. List commands
//! fall back to them when no data file exists yet, so a fresh install renders
//! something, and tests lean on them for realistic shapes.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::records::{
    Campaign, CampaignStatus, EmailActivity, EmailStatus, Lead, LeadStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture dates are valid")
}

/// Sample leads page data.
#[must_use]
pub fn sample_leads() -> Vec<Lead> {
    let lead = |id, first: &str, last: &str, email: &str, company: &str, status, source: &str, created| {
        Lead {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            company: company.to_string(),
            phone: String::new(),
            status,
            source: source.to_string(),
            created_at: created,
        }
    };
    vec![
        lead(1, "Sarah", "Chen", "sarah.chen@northwind.io", "Northwind", LeadStatus::Qualified, "Website", date(2025, 1, 12)),
        lead(2, "Marcus", "Webb", "m.webb@contoso.com", "Contoso", LeadStatus::Contacted, "LinkedIn", date(2025, 1, 18)),
        lead(3, "Priya", "Natarajan", "priya@fabrikam.dev", "Fabrikam", LeadStatus::New, "Referral", date(2025, 2, 2)),
        lead(4, "Tom", "Okafor", "tokafor@adventure-works.com", "Adventure Works", LeadStatus::Contacted, "Webinar", date(2025, 2, 9)),
        lead(5, "Elena", "Vasquez", "elena.v@tailspin.co", "Tailspin", LeadStatus::Unqualified, "Website", date(2025, 2, 15)),
        lead(6, "James", "Park", "jpark@proseware.com", "Proseware", LeadStatus::New, "LinkedIn", date(2025, 2, 21)),
        lead(7, "Amara", "Diallo", "amara@wingtip.io", "Wingtip Toys", LeadStatus::Qualified, "Referral", date(2025, 3, 3)),
        lead(8, "Oliver", "Brandt", "o.brandt@litware.de", "Litware", LeadStatus::New, "Import", date(2025, 3, 10)),
    ]
}

/// Sample campaigns page data.
#[must_use]
pub fn sample_campaigns() -> Vec<Campaign> {
    let campaign = |id, name: &str, subject: &str, status, audience: &str, sent, opens, clicks, created| {
        Campaign {
            id,
            name: name.to_string(),
            subject: subject.to_string(),
            status,
            audience: audience.to_string(),
            sent,
            opens,
            clicks,
            created_at: created,
        }
    };
    vec![
        campaign(1, "Q1 Launch", "Introducing the new workspace", CampaignStatus::Active, "Enterprise", 1_240, 516, 98, date(2025, 1, 8)),
        campaign(2, "Enterprise Outreach", "A quick question about your team", CampaignStatus::Draft, "Enterprise", 0, 0, 0, date(2025, 1, 22)),
        campaign(3, "Trial Nurture", "Getting the most from your trial", CampaignStatus::Active, "Trial users", 3_480, 1_092, 310, date(2025, 2, 1)),
        campaign(4, "Renewal Push", "Your plan renews soon", CampaignStatus::Paused, "Existing customers", 860, 402, 55, date(2025, 2, 14)),
        campaign(5, "Webinar Follow-up", "Thanks for joining us", CampaignStatus::Completed, "Webinar attendees", 612, 298, 120, date(2025, 2, 27)),
        campaign(6, "Spring Promo", "20% off annual plans this month", CampaignStatus::Scheduled, "Newsletter", 0, 0, 0, date(2025, 3, 6)),
    ]
}

/// Sample email-tracking page data.
#[must_use]
pub fn sample_email_activity() -> Vec<EmailActivity> {
    let stamp = |d: u32, h: u32, min: u32| {
        Utc.with_ymd_and_hms(2025, 3, d, h, min, 0)
            .single()
            .expect("fixture timestamps are valid")
    };
    let event = |id, recipient: &str, subject: &str, campaign_id, status, sent_at| EmailActivity {
        id,
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        campaign_id,
        status,
        sent_at,
    };
    vec![
        event(1, "sarah.chen@northwind.io", "Introducing the new workspace", 1, EmailStatus::Clicked, stamp(3, 9, 15)),
        event(2, "m.webb@contoso.com", "Introducing the new workspace", 1, EmailStatus::Opened, stamp(3, 9, 16)),
        event(3, "priya@fabrikam.dev", "Getting the most from your trial", 3, EmailStatus::Delivered, stamp(4, 11, 2)),
        event(4, "tokafor@adventure-works.com", "Getting the most from your trial", 3, EmailStatus::Opened, stamp(4, 11, 2)),
        event(5, "elena.v@tailspin.co", "Your plan renews soon", 4, EmailStatus::Bounced, stamp(5, 8, 40)),
        event(6, "jpark@proseware.com", "Introducing the new workspace", 1, EmailStatus::Sent, stamp(5, 14, 25)),
        event(7, "amara@wingtip.io", "Thanks for joining us", 5, EmailStatus::Clicked, stamp(6, 10, 5)),
        event(8, "o.brandt@litware.de", "Thanks for joining us", 5, EmailStatus::Delivered, stamp(6, 10, 6)),
        event(9, "sarah.chen@northwind.io", "Your plan renews soon", 4, EmailStatus::Opened, stamp(7, 16, 48)),
        event(10, "m.webb@contoso.com", "Getting the most from your trial", 3, EmailStatus::Sent, stamp(8, 9, 0)),
    ]
}
