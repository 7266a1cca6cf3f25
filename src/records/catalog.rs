//! Static catalog: pricing plans and credit top-up packages.
//!
//! The pricing and billing pages render these tables; the top-up form and
//! account settings validate against them.

use serde::Serialize;

/// A subscription tier on the pricing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Stable identifier stored in account settings.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Monthly price in whole US dollars.
    pub monthly_usd: u32,
    /// Email credits included each month.
    pub monthly_credits: u64,
    /// Seats included.
    pub seats: u32,
}

/// A one-off credit purchase on the billing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditPackage {
    /// Stable identifier the top-up form submits.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Credits added on purchase.
    pub credits: u64,
    /// Price in US cents; integer so money never rounds.
    pub price_cents: u32,
}

/// All plans, cheapest first.
pub const PLANS: &[Plan] = &[
    Plan {
        id: "free",
        name: "Free",
        monthly_usd: 0,
        monthly_credits: 100,
        seats: 1,
    },
    Plan {
        id: "starter",
        name: "Starter",
        monthly_usd: 29,
        monthly_credits: 2_000,
        seats: 3,
    },
    Plan {
        id: "growth",
        name: "Growth",
        monthly_usd: 99,
        monthly_credits: 10_000,
        seats: 10,
    },
    Plan {
        id: "scale",
        name: "Scale",
        monthly_usd: 299,
        monthly_credits: 50_000,
        seats: 25,
    },
];

/// All credit packages, smallest first.
pub const PACKAGES: &[CreditPackage] = &[
    CreditPackage {
        id: "boost-500",
        name: "Boost",
        credits: 500,
        price_cents: 1_900,
    },
    CreditPackage {
        id: "surge-2500",
        name: "Surge",
        credits: 2_500,
        price_cents: 7_900,
    },
    CreditPackage {
        id: "wave-10000",
        name: "Wave",
        credits: 10_000,
        price_cents: 24_900,
    },
];

/// Look up a plan by id.
#[must_use]
pub fn plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.id == id)
}

/// Look up a credit package by id.
#[must_use]
pub fn package(id: &str) -> Option<&'static CreditPackage> {
    PACKAGES.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        let ids: Vec<&str> = PLANS.iter().map(|p| p.id).collect();
        let unique: std::collections::HashSet<&&str> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn package_ids_are_unique() {
        let ids: Vec<&str> = PACKAGES.iter().map(|p| p.id).collect();
        let unique: std::collections::HashSet<&&str> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn lookups_resolve_known_ids() {
        assert_eq!(plan("growth").map(|p| p.monthly_usd), Some(99));
        assert_eq!(package("boost-500").map(|p| p.credits), Some(500));
        assert!(plan("nope").is_none());
        assert!(package("nope").is_none());
    }

    #[test]
    fn plans_ascend_in_price() {
        for pair in PLANS.windows(2) {
            assert!(pair[0].monthly_usd <= pair[1].monthly_usd);
        }
    }
}
