//! # Stacking Engine
//!
//! Forward and reverse rate computation.
//!
//! ## Pipeline Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Forward Direction (PMS ──► Sell)                     │
//! │                                                                         │
//! │  PMS rate                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  × multiplier                                                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  × (1 - nonRef%)          when non_refundable.active                    │
//! │     │                                                                   │
//! │     ├── deep deal valid? ──► × (1 - deep%) ──► SELL RATE (exclusive)    │
//! │     │                                                                   │
//! │     ▼  (no deep deal)                                                   │
//! │  × (1 - genius%)          when genius_discount_percent > 0              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  × (1 - best standard%)   highest-discount valid standard campaign      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  × (1 - mobile%)          when mobile.active and not blocked            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  × (1 - country%)         when country.active                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  SELL RATE                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reverse direction divides by the same factors in the opposite order,
//! re-deriving the branch state from the config via [`resolve_stack`]. Every
//! step is a pure multiplicative scalar, so the two directions are exact
//! algebraic inverses of each other (up to float rounding).
//!
//! ## Failure Semantics
//! There are none. A 100% discount makes a reverse divisor zero and the
//! result `inf`; a zero multiplier does the same at the last reverse step.
//! The engine neither validates nor clamps - callers decide how to present
//! extreme results.

use crate::stack::resolve_stack;
use crate::types::{Campaign, RateStackConfig};

// =============================================================================
// Forward Walk
// =============================================================================

/// One applied stage of the forward pipeline, reported to walk observers.
///
/// The waterfall projection turns these into display rows; the plain
/// sell-rate computation ignores them. `MobileSuppressed` is the one stage
/// that changes nothing numerically - it exists so the breakdown can explain
/// why the configured mobile discount is absent.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ForwardStage<'a> {
    Multiplier,
    NonRefundable,
    DeepDeal(&'a Campaign),
    Genius,
    StandardCampaign(&'a Campaign),
    MobileSuppressed(&'a Campaign),
    Mobile,
    Country,
}

/// Runs the forward pipeline, reporting every applied stage and the rate
/// after it.
///
/// This is the single implementation of the forward direction:
/// [`compute_sell_rate`] runs it with a no-op observer and
/// [`crate::waterfall::compute_waterfall`] collects the stages into rows.
/// Sharing the walk is what keeps the displayed breakdown and the computed
/// number in lock-step.
pub(crate) fn walk_forward<'a, F>(pms_rate: f64, config: &'a RateStackConfig, mut visit: F) -> f64
where
    F: FnMut(ForwardStage<'a>, f64),
{
    let stack = resolve_stack(config, config.test_date);

    let mut rate = pms_rate * config.multiplier;
    visit(ForwardStage::Multiplier, rate);

    if config.non_refundable.active {
        rate *= config.non_refundable.factor();
        visit(ForwardStage::NonRefundable, rate);
    }

    // Deep deals are exclusive: genius, standard, mobile, and country are
    // all skipped while one is in effect.
    if let Some(deep) = stack.deep_deal {
        rate *= deep.factor();
        visit(ForwardStage::DeepDeal(deep), rate);
        return rate;
    }

    if config.genius_active() {
        rate *= config.genius_factor();
        visit(ForwardStage::Genius, rate);
    }

    if let Some(best) = stack.best_standard {
        rate *= best.factor();
        visit(ForwardStage::StandardCampaign(best), rate);
    }

    if stack.mobile_applies(config) {
        rate *= config.mobile.factor();
        visit(ForwardStage::Mobile, rate);
    } else if config.mobile.active {
        // The switch is on but a blocking campaign suppressed the step.
        // Report it so the breakdown can say why; the rate is unchanged.
        if let Some(blocker) = config
            .campaigns
            .iter()
            .find(|c| c.blocks_mobile() && c.is_valid_for(config.test_date))
        {
            visit(ForwardStage::MobileSuppressed(blocker), rate);
        }
    }

    if config.country.active {
        rate *= config.country.factor();
        visit(ForwardStage::Country, rate);
    }

    rate
}

// =============================================================================
// Public Contract
// =============================================================================

/// Computes the guest-facing sell rate from a PMS base rate.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rackrate_core::{compute_sell_rate, Modifier, RateStackConfig};
///
/// let mut config =
///     RateStackConfig::passthrough(NaiveDate::from_ymd_opt(2025, 11, 15).unwrap());
/// config.multiplier = 1.3;
/// config.non_refundable = Modifier::on(15.0);
/// config.mobile = Modifier::on(10.0);
///
/// // 100 × 1.3 × 0.85 × 0.9 = 99.45
/// let sell = compute_sell_rate(100.0, &config);
/// assert!((sell - 99.45).abs() < 1e-9);
/// ```
pub fn compute_sell_rate(pms_rate: f64, config: &RateStackConfig) -> f64 {
    walk_forward(pms_rate, config, |_, _| {})
}

/// Computes the PMS base rate required to realize a target sell rate.
///
/// Unwinds the forward pipeline step by step in reverse order, dividing by
/// each factor the forward direction multiplied by. The branch decisions
/// (deep deal present, mobile blocked) are re-derived from
/// `(config, test_date)` - identical inputs give identical branches, which
/// is what makes `compute_required_pms_rate(compute_sell_rate(r, c), c) ≈ r`
/// hold without any shared state.
///
/// Degenerate factors (100% discount, zero multiplier) divide by zero and
/// return `inf` or `NaN`; see the module docs.
pub fn compute_required_pms_rate(target_sell_rate: f64, config: &RateStackConfig) -> f64 {
    let stack = resolve_stack(config, config.test_date);

    let mut rate = target_sell_rate;

    if let Some(deep) = stack.deep_deal {
        // Exclusive branch: only the deep deal was applied after the
        // non-refundable step.
        rate /= deep.factor();
    } else {
        if config.country.active {
            rate /= config.country.factor();
        }

        if stack.mobile_applies(config) {
            rate /= config.mobile.factor();
        }

        if let Some(best) = stack.best_standard {
            rate /= best.factor();
        }

        if config.genius_active() {
            rate /= config.genius_factor();
        }
    }

    if config.non_refundable.active {
        rate /= config.non_refundable.factor();
    }

    rate / config.multiplier
}

// =============================================================================
// Unit Tests
// =============================================================================
