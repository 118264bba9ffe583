//! # Stack Resolution
//!
//! Derives which campaign rules actually apply on a given stay date.
//!
//! ## Why a Separate Step?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Resolution, Three Consumers                      │
//! │                                                                         │
//! │   (config, test_date)                                                   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   resolve_stack() ──► ResolvedStack                                     │
//! │          │              ├── deep_deal:      Option<&Campaign>           │
//! │          │              ├── best_standard:  Option<&Campaign>           │
//! │          │              └── mobile_blocked: bool                        │
//! │          │                                                              │
//! │          ├──► compute_sell_rate        (forward)                        │
//! │          ├──► compute_required_pms_rate (reverse)                       │
//! │          └──► compute_waterfall        (display)                        │
//! │                                                                         │
//! │  Forward, reverse, and the displayed breakdown all branch on the SAME   │
//! │  resolved state, so they cannot drift apart. The round-trip law         │
//! │  reverse(forward(r)) == r holds because both directions re-derive this  │
//! │  state from the config, never from each other.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::types::{Campaign, RateStackConfig};

// =============================================================================
// Resolved Stack
// =============================================================================

/// The campaign rules that apply on one stay date.
///
/// Borrowed views into the config's campaign list - resolution allocates
/// nothing, so shells may resolve on every keystroke.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStack<'a> {
    /// The deep deal in effect, if any. When present it is exclusive:
    /// genius, standard campaigns, mobile, and country are all skipped.
    pub deep_deal: Option<&'a Campaign>,

    /// The single standard campaign that applies: the valid non-deep
    /// campaign with the highest discount. Ties go to the first in input
    /// order.
    pub best_standard: Option<&'a Campaign>,

    /// Whether the mobile discount is suppressed. True when a deep deal is
    /// in effect (mobile is skipped anyway) or when any valid standard
    /// campaign carries a mobile-blocking slug - not just the winning one.
    pub mobile_blocked: bool,
}

impl<'a> ResolvedStack<'a> {
    /// Whether the mobile step applies under this resolution.
    #[inline]
    pub fn mobile_applies(&self, config: &RateStackConfig) -> bool {
        config.mobile.active && !self.mobile_blocked
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves which campaigns apply for `date`.
///
/// ## Selection Rules
/// - **Deep deal**: first valid campaign (input order) with a deep-deal
///   slug. If several deep deals are valid at once, the first wins -
///   deterministically, by stable input order.
/// - **Best standard**: among valid non-deep campaigns, the one with the
///   strictly highest discount; a later campaign must beat (not match) the
///   current best, so ties resolve to the first seen.
/// - **Mobile blocked**: any valid campaign with a mobile-blocking slug
///   sets the flag, even when a bigger plain campaign wins the standard
///   slot.
///
/// One pass over the list, O(campaigns), no allocation.
pub fn resolve_stack<'a>(config: &'a RateStackConfig, date: NaiveDate) -> ResolvedStack<'a> {
    let mut deep_deal: Option<&Campaign> = None;
    let mut best_standard: Option<&Campaign> = None;
    let mut blocking_seen = false;

    for campaign in &config.campaigns {
        if !campaign.is_valid_for(date) {
            continue;
        }

        if campaign.is_deep_deal() {
            if deep_deal.is_none() {
                deep_deal = Some(campaign);
            }
            continue;
        }

        if campaign.blocks_mobile() {
            blocking_seen = true;
        }

        let beats_current = match best_standard {
            Some(best) => campaign.discount > best.discount,
            None => true,
        };
        if beats_current {
            best_standard = Some(campaign);
        }
    }

    ResolvedStack {
        deep_deal,
        best_standard,
        mobile_blocked: deep_deal.is_some() || blocking_seen,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
