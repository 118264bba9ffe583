//! # Waterfall Breakdown
//!
//! Projects the forward pipeline into display rows.
//!
//! ## Lock-Step Guarantee
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Breakdown = Same Walk, Observed                      │
//! │                                                                         │
//! │  compute_sell_rate(100, cfg)      compute_waterfall(100, cfg)           │
//! │       │                                │                                │
//! │       └────────► walk_forward ◄────────┘                                │
//! │                  (one implementation)                                   │
//! │                                                                         │
//! │  PMS base rate                              100.00   (bold)             │
//! │    Multiplier x1.30                         130.00                      │
//! │    Non-refundable rate -15%                 110.50                      │
//! │    Genius -10%                               99.45                      │
//! │    Campaign "autumn-sale" -30%               69.62                      │
//! │      Mobile rate skipped (blocked)           69.62   (info)             │
//! │    Country rate -5%                          66.13                      │
//! │  Final sell rate                             66.13   (bold, final)      │
//! │                                                                         │
//! │  The final row's rate IS the sell rate - not a re-derivation of it.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::engine::{walk_forward, ForwardStage};
use crate::types::RateStackConfig;

// =============================================================================
// Waterfall Step
// =============================================================================

/// One display row of the waterfall breakdown.
///
/// Rendering hints only - the dashboard decides fonts and colors. `rate` is
/// the running rate after the row's step; for info rows it is unchanged
/// from the previous row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WaterfallStep {
    /// Human-readable description of the step.
    pub label: String,

    /// Running rate after this step.
    pub rate: f64,

    /// Nesting level: 0 for the base and final rows, 1 for applied steps,
    /// 2 for explanatory notes.
    pub indent: u8,

    /// Emphasized row (base and final rates).
    pub is_bold: bool,

    /// Explanatory row that changed nothing numerically.
    pub is_info: bool,

    /// The terminal "Final sell rate" row.
    pub is_final: bool,
}

impl WaterfallStep {
    fn applied(label: String, rate: f64) -> Self {
        WaterfallStep {
            label,
            rate,
            indent: 1,
            is_bold: false,
            is_info: false,
            is_final: false,
        }
    }

    fn note(label: String, rate: f64) -> Self {
        WaterfallStep {
            label,
            rate,
            indent: 2,
            is_bold: false,
            is_info: true,
            is_final: false,
        }
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Computes the full waterfall breakdown for a PMS base rate.
///
/// Runs the same forward walk as [`crate::compute_sell_rate`] and records
/// every applied stage, bracketed by an opening base-rate row and a
/// terminal final-rate row. When the mobile discount is configured but
/// suppressed by a blocking campaign, a synthetic info row explains the gap.
pub fn compute_waterfall(pms_rate: f64, config: &RateStackConfig) -> Vec<WaterfallStep> {
    let mut steps = Vec::with_capacity(config.campaigns.len() + 8);

    steps.push(WaterfallStep {
        label: "PMS base rate".to_string(),
        rate: pms_rate,
        indent: 0,
        is_bold: true,
        is_info: false,
        is_final: false,
    });

    let sell_rate = walk_forward(pms_rate, config, |stage, rate| {
        match stage {
            ForwardStage::Multiplier => steps.push(WaterfallStep::applied(
                format!("Multiplier x{}", config.multiplier),
                rate,
            )),
            ForwardStage::NonRefundable => steps.push(WaterfallStep::applied(
                format!("Non-refundable rate -{}%", config.non_refundable.percent),
                rate,
            )),
            ForwardStage::DeepDeal(deep) => {
                steps.push(WaterfallStep::applied(
                    format!("Deep deal \"{}\" -{}%", deep.slug, deep.discount),
                    rate,
                ));
                steps.push(WaterfallStep::note(
                    "Deep deal is exclusive: genius, campaigns, mobile and country skipped"
                        .to_string(),
                    rate,
                ));
            }
            ForwardStage::Genius => steps.push(WaterfallStep::applied(
                format!("Genius -{}%", config.genius_discount_percent),
                rate,
            )),
            ForwardStage::StandardCampaign(best) => steps.push(WaterfallStep::applied(
                format!("Campaign \"{}\" -{}%", best.slug, best.discount),
                rate,
            )),
            ForwardStage::MobileSuppressed(blocker) => steps.push(WaterfallStep::note(
                format!("Mobile rate skipped: blocked by \"{}\"", blocker.slug),
                rate,
            )),
            ForwardStage::Mobile => steps.push(WaterfallStep::applied(
                format!("Mobile rate -{}%", config.mobile.percent),
                rate,
            )),
            ForwardStage::Country => steps.push(WaterfallStep::applied(
                format!("Country rate -{}%", config.country.percent),
                rate,
            )),
        };
    });

    steps.push(WaterfallStep {
        label: "Final sell rate".to_string(),
        rate: sell_rate,
        indent: 0,
        is_bold: true,
        is_info: false,
        is_final: true,
    });

    steps
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_sell_rate;
    use crate::types::{Campaign, Modifier};
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn november(id: &str, slug: &str, discount: f64) -> Campaign {
        Campaign {
            id: id.to_string(),
            slug: slug.to_string(),
            discount,
            start_date: Some(day(2025, 11, 1)),
            end_date: Some(day(2025, 11, 30)),
            active: true,
        }
    }

    fn full_config() -> RateStackConfig {
        let mut config = RateStackConfig::passthrough(day(2025, 11, 15));
        config.multiplier = 1.3;
        config.non_refundable = Modifier::on(15.0);
        config.mobile = Modifier::on(10.0);
        config.country = Modifier::on(5.0);
        config.genius_discount_percent = 10.0;
        config
    }

    #[test]
    fn test_final_row_matches_compute_sell_rate() {
        let mut config = full_config();
        config.campaigns = vec![
            november("a", "autumn-sale", 30.0),
            november("ed", "early-deal", 12.0),
        ];

        let steps = compute_waterfall(100.0, &config);
        let last = steps.last().unwrap();

        assert!(last.is_final);
        assert!(last.is_bold);
        assert_eq!(last.indent, 0);
        assert!((last.rate - compute_sell_rate(100.0, &config)).abs() < EPS);
    }

    #[test]
    fn test_plain_chain_rows_in_order() {
        let steps = compute_waterfall(100.0, &full_config());
        let labels: Vec<&str> = steps.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "PMS base rate",
                "Multiplier x1.3",
                "Non-refundable rate -15%",
                "Genius -10%",
                "Mobile rate -10%",
                "Country rate -5%",
                "Final sell rate",
            ]
        );
        assert!((steps[1].rate - 130.0).abs() < EPS);
        assert!((steps[2].rate - 110.5).abs() < EPS);
    }

    #[test]
    fn test_deep_deal_branch_shows_exclusivity_note() {
        let mut config = full_config();
        config.campaigns = vec![november("bf", "black-friday", 30.0)];

        let steps = compute_waterfall(100.0, &config);
        let labels: Vec<&str> = steps.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "PMS base rate",
                "Multiplier x1.3",
                "Non-refundable rate -15%",
                "Deep deal \"black-friday\" -30%",
                "Deep deal is exclusive: genius, campaigns, mobile and country skipped",
                "Final sell rate",
            ]
        );

        let note = &steps[4];
        assert!(note.is_info);
        assert_eq!(note.indent, 2);
        // Info rows never move the rate.
        assert!((note.rate - steps[3].rate).abs() < EPS);
    }

    #[test]
    fn test_blocked_mobile_gets_a_note_row() {
        let mut config = full_config();
        config.genius_discount_percent = 0.0;
        config.country = Modifier::OFF;
        config.campaigns = vec![november("ed", "early-deal", 20.0)];

        let steps = compute_waterfall(100.0, &config);
        let note = steps
            .iter()
            .find(|s| s.is_info)
            .expect("expected a mobile-skip note");

        assert_eq!(note.label, "Mobile rate skipped: blocked by \"early-deal\"");
        assert!(steps
            .iter()
            .all(|s| !s.label.starts_with("Mobile rate -")));
    }

    #[test]
    fn test_inactive_mobile_gets_no_note_row() {
        let mut config = full_config();
        config.mobile = Modifier::OFF;
        config.campaigns = vec![november("ed", "early-deal", 20.0)];

        let steps = compute_waterfall(100.0, &config);
        assert!(steps.iter().all(|s| !s.is_info));
    }

    #[test]
    fn test_base_row_carries_input_rate() {
        let steps = compute_waterfall(123.45, &full_config());
        assert_eq!(steps[0].label, "PMS base rate");
        assert!((steps[0].rate - 123.45).abs() < EPS);
        assert!(steps[0].is_bold);
    }
}
