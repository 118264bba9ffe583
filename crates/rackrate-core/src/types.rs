//! # Domain Types
//!
//! Core domain types for the rate-stacking engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌───────────────────┐   │
//! │  │ RateStackConfig  │   │    Campaign      │   │    Modifier       │   │
//! │  │  ──────────────  │   │  ──────────────  │   │  ───────────────  │   │
//! │  │  multiplier      │   │  id (opaque)     │   │  active (bool)    │   │
//! │  │  non_refundable ─┼──►│  slug (business) │   │  percent (0-100)  │   │
//! │  │  mobile ─────────┼──►│  discount        │   └───────────────────┘   │
//! │  │  country ────────┼──►│  start/end date  │                           │
//! │  │  campaigns ──────┼──►│  active          │   ┌───────────────────┐   │
//! │  │  genius percent  │   └────────┬─────────┘   │  CampaignClass    │   │
//! │  │  test_date       │            │             │  ───────────────  │   │
//! │  └──────────────────┘            └────────────►│  DeepDeal         │   │
//! │                                                │  MobileBlocking   │   │
//! │                                                │  Standard         │   │
//! │                                                └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every campaign has:
//! - `id`: opaque unique identifier - immutable, assigned by the dashboard
//! - `slug`: business classifier - drives the stacking rules below
//!
//! ## Why f64?
//! The stack is a chain of multiplicative factors that must invert exactly
//! (reverse direction divides by each factor). Integer cents cannot express
//! `rate / 0.85`; the engine deals in factors, not ledger amounts, and the
//! degenerate cases (100% discount, zero multiplier) are required to surface
//! as `inf`/`NaN` rather than errors. Rounding to a displayable price is the
//! caller's concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Slug Classification
// =============================================================================

/// Campaign slugs treated as deep deals.
///
/// A valid deep deal overrides the entire standard chain: genius, standard
/// campaigns, mobile, and country are all skipped.
pub const DEEP_DEAL_SLUGS: &[&str] = &["black-friday", "limited-time"];

/// Campaign slugs that suppress the mobile-rate discount while valid.
///
/// These are ordinary standard campaigns in every other respect: they still
/// compete on discount size for the single standard-campaign slot.
pub const MOBILE_BLOCKING_SLUGS: &[&str] = &["early-deal", "late-escape", "getaway-deal"];

/// How a campaign participates in the stack, derived from its slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CampaignClass {
    /// Exclusive: replaces genius, standard, mobile, and country steps.
    DeepDeal,
    /// Standard campaign that additionally blocks the mobile discount.
    MobileBlocking,
    /// Plain standard campaign.
    Standard,
}

// =============================================================================
// Campaign
// =============================================================================

/// A promotional campaign rule.
///
/// Campaigns are configured in the dashboard and persisted externally; the
/// engine receives them as a read-only snapshot. Input order matters: when
/// two campaigns tie (two valid deep deals, or two standard campaigns with
/// the same discount), the first one in the list wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Campaign {
    /// Opaque identifier, unique within the list.
    pub id: String,

    /// Business classifier. See [`DEEP_DEAL_SLUGS`] and
    /// [`MOBILE_BLOCKING_SLUGS`]; any other slug is a plain standard
    /// campaign.
    pub slug: String,

    /// Discount percentage (semantically 0-100, not enforced).
    pub discount: f64,

    /// Start of the inclusive validity window. `None` means never valid.
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,

    /// End of the inclusive validity window. `None` means never valid.
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,

    /// Manual switch, independent of the date window.
    pub active: bool,
}

impl Campaign {
    /// Classifies the campaign from its slug.
    pub fn class(&self) -> CampaignClass {
        if DEEP_DEAL_SLUGS.contains(&self.slug.as_str()) {
            CampaignClass::DeepDeal
        } else if MOBILE_BLOCKING_SLUGS.contains(&self.slug.as_str()) {
            CampaignClass::MobileBlocking
        } else {
            CampaignClass::Standard
        }
    }

    /// Checks whether this campaign is a deep deal.
    #[inline]
    pub fn is_deep_deal(&self) -> bool {
        self.class() == CampaignClass::DeepDeal
    }

    /// Checks whether this campaign suppresses the mobile discount.
    #[inline]
    pub fn blocks_mobile(&self) -> bool {
        self.class() == CampaignClass::MobileBlocking
    }

    /// Checks whether the campaign applies on the given stay date.
    ///
    /// ## Rules
    /// - `active` must be true
    /// - both window dates must be present
    /// - `start_date <= date <= end_date` (inclusive on both ends)
    ///
    /// A missing or reversed window is simply "not valid" - malformed
    /// configuration must never fail a rate calculation. A reversed window
    /// (`start > end`) cannot satisfy the inclusive test, so it needs no
    /// separate handling.
    pub fn is_valid_for(&self, date: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// The multiplicative factor this campaign applies to a rate.
    ///
    /// A 20% discount yields 0.8. A 100% discount yields 0.0 - the engine
    /// passes it through; the reverse direction will divide by it and
    /// produce `inf`, which is the documented behavior.
    #[inline]
    pub fn factor(&self) -> f64 {
        1.0 - self.discount / 100.0
    }
}

// =============================================================================
// Modifier
// =============================================================================

/// A flat percentage modifier with an on/off switch.
///
/// Used for the non-refundable, mobile, and country steps. Unlike campaigns,
/// modifiers have no date window: the switch is the whole lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Modifier {
    /// Whether the step participates at all.
    pub active: bool,

    /// Discount percentage (semantically 0-100, not enforced).
    pub percent: f64,
}

impl Modifier {
    /// An inactive modifier (the neutral element of the stack).
    pub const OFF: Modifier = Modifier {
        active: false,
        percent: 0.0,
    };

    /// Creates an active modifier with the given percentage.
    #[inline]
    pub const fn on(percent: f64) -> Self {
        Modifier {
            active: true,
            percent,
        }
    }

    /// The multiplicative factor, e.g. 15% -> 0.85.
    #[inline]
    pub fn factor(&self) -> f64 {
        1.0 - self.percent / 100.0
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::OFF
    }
}

// =============================================================================
// Rate Stack Configuration
// =============================================================================

/// The full, immutable input of one rate calculation.
///
/// ## Lifecycle
/// The dashboard edits and persists these fields per asset; the engine only
/// ever sees a read-only snapshot. Nothing in this crate mutates a config,
/// and two configs with equal fields are interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateStackConfig {
    /// Strategic markup applied to the PMS rate first. Expected > 0;
    /// a zero multiplier makes the reverse direction divide by zero, which
    /// propagates as `inf` rather than an error.
    pub multiplier: f64,

    /// Non-refundable rate modifier, applied right after the multiplier
    /// and *before* the deep-deal branch (it applies in both branches).
    pub non_refundable: Modifier,

    /// Mobile-rate discount, applied late in the standard chain and
    /// suppressed while a mobile-blocking campaign is valid.
    pub mobile: Modifier,

    /// Country-rate discount, the last step of the standard chain.
    pub country: Modifier,

    /// Promotional campaigns. Order is the tie-break order.
    pub campaigns: Vec<Campaign>,

    /// Genius (loyalty program) discount percentage. Zero means inactive.
    pub genius_discount_percent: f64,

    /// The stay date campaign validity is evaluated against.
    #[ts(as = "String")]
    pub test_date: NaiveDate,
}

impl RateStackConfig {
    /// A bare config: multiplier 1.0, everything else off.
    ///
    /// Useful as a starting point in tests and in shells that build a
    /// config field by field.
    pub fn passthrough(test_date: NaiveDate) -> Self {
        RateStackConfig {
            multiplier: 1.0,
            non_refundable: Modifier::OFF,
            mobile: Modifier::OFF,
            country: Modifier::OFF,
            campaigns: Vec::new(),
            genius_discount_percent: 0.0,
            test_date,
        }
    }

    /// The genius factor, 1.0 when the percentage is zero.
    #[inline]
    pub fn genius_factor(&self) -> f64 {
        1.0 - self.genius_discount_percent / 100.0
    }

    /// Checks whether the genius step participates.
    #[inline]
    pub fn genius_active(&self) -> bool {
        self.genius_discount_percent > 0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn campaign(slug: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            slug: slug.to_string(),
            discount: 20.0,
            start_date: start,
            end_date: end,
            active: true,
        }
    }

    #[test]
    fn test_slug_classification() {
        assert_eq!(
            campaign("black-friday", None, None).class(),
            CampaignClass::DeepDeal
        );
        assert_eq!(
            campaign("limited-time", None, None).class(),
            CampaignClass::DeepDeal
        );
        assert_eq!(
            campaign("early-deal", None, None).class(),
            CampaignClass::MobileBlocking
        );
        assert_eq!(
            campaign("late-escape", None, None).class(),
            CampaignClass::MobileBlocking
        );
        assert_eq!(
            campaign("getaway-deal", None, None).class(),
            CampaignClass::MobileBlocking
        );
        assert_eq!(
            campaign("summer-sale", None, None).class(),
            CampaignClass::Standard
        );
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let d = day(2025, 11, 28);
        let c = campaign("black-friday", Some(d), Some(d));

        assert!(c.is_valid_for(d));
        assert!(!c.is_valid_for(d.pred_opt().unwrap()));
        assert!(!c.is_valid_for(d.succ_opt().unwrap()));
    }

    #[test]
    fn test_missing_window_is_never_valid() {
        let d = day(2025, 11, 28);
        assert!(!campaign("summer-sale", None, None).is_valid_for(d));
        assert!(!campaign("summer-sale", Some(d), None).is_valid_for(d));
        assert!(!campaign("summer-sale", None, Some(d)).is_valid_for(d));
    }

    #[test]
    fn test_reversed_window_is_never_valid() {
        let start = day(2025, 12, 1);
        let end = day(2025, 11, 1);
        let c = campaign("summer-sale", Some(start), Some(end));

        assert!(!c.is_valid_for(day(2025, 11, 15)));
        assert!(!c.is_valid_for(start));
        assert!(!c.is_valid_for(end));
    }

    #[test]
    fn test_inactive_campaign_ignores_window() {
        let d = day(2025, 11, 28);
        let mut c = campaign("summer-sale", Some(d), Some(d));
        c.active = false;

        assert!(!c.is_valid_for(d));
    }

    #[test]
    fn test_factors() {
        assert!((Modifier::on(15.0).factor() - 0.85).abs() < 1e-12);
        assert!((Modifier::OFF.factor() - 1.0).abs() < 1e-12);

        let c = campaign("summer-sale", None, None);
        assert!((c.factor() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_hundred_percent_discount_factor_is_zero() {
        let mut c = campaign("summer-sale", None, None);
        c.discount = 100.0;
        assert_eq!(c.factor(), 0.0);
    }

    #[test]
    fn test_passthrough_config_is_neutral() {
        let config = RateStackConfig::passthrough(day(2025, 11, 28));
        assert_eq!(config.multiplier, 1.0);
        assert!(!config.genius_active());
        assert!((config.genius_factor() - 1.0).abs() < 1e-12);
    }
}
