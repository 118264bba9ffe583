//! # Validation Module
//!
//! Advisory configuration checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Sits                              │
//! │                                                                         │
//! │  Layer 1: Dashboard (TypeScript)                                        │
//! │  ├── Form-level checks, immediate feedback                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (advisory)                                        │
//! │  ├── Multiplier positive, percents in range, windows ordered            │
//! │  └── Shells surface findings as WARNINGS and compute anyway             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (none)                                                 │
//! │  └── Deliberately permissive: out-of-range values pass straight         │
//! │      through (a 150% discount yields a negative rate, a zero            │
//! │      multiplier yields inf on reversal)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use rackrate_core::validation::check_config;
//! use rackrate_core::RateStackConfig;
//!
//! let config = RateStackConfig::passthrough(NaiveDate::from_ymd_opt(2025, 11, 15).unwrap());
//! assert!(check_config(&config).is_empty());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Campaign, Modifier, RateStackConfig};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the strategic multiplier.
///
/// ## Rules
/// - Must be strictly positive (zero makes the reverse direction divide
///   by zero; negative flips the sign of every rate)
pub fn validate_multiplier(multiplier: f64) -> ValidationResult<()> {
    if multiplier <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "multiplier".to_string(),
            value: multiplier,
        });
    }
    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Expected range 0-100 inclusive
/// - 100 is allowed but flagged by callers that care: it makes the step's
///   reverse divisor zero
pub fn validate_percent(field: &str, percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: percent,
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(())
}

/// Validates a modifier's percentage when the modifier is switched on.
///
/// An inactive modifier is never checked: its percentage is dead
/// configuration until the switch flips.
pub fn validate_modifier(field: &str, modifier: &Modifier) -> ValidationResult<()> {
    if !modifier.active {
        return Ok(());
    }
    validate_percent(field, modifier.percent)
}

/// Validates a single campaign.
///
/// ## Rules
/// - Slug must be non-empty (an empty slug classifies as a plain standard
///   campaign, which is almost certainly a data-entry mistake)
/// - Discount expected within 0-100
/// - An active campaign should have a complete, ordered window; without one
///   it silently never applies
pub fn validate_campaign(campaign: &Campaign) -> ValidationResult<()> {
    if campaign.slug.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "campaign.slug".to_string(),
        });
    }

    validate_percent(&format!("campaign \"{}\" discount", campaign.slug), campaign.discount)?;

    if campaign.active {
        match (campaign.start_date, campaign.end_date) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(ValidationError::ReversedWindow {
                        slug: campaign.slug.clone(),
                    });
                }
            }
            _ => {
                return Err(ValidationError::IncompleteWindow {
                    slug: campaign.slug.clone(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Whole-Config Check
// =============================================================================

/// Checks an entire config and collects every finding.
///
/// Returns all problems rather than the first one, so a shell can print a
/// complete warning list in one pass. An empty vector means the config is
/// clean.
pub fn check_config(config: &RateStackConfig) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if let Err(e) = validate_multiplier(config.multiplier) {
        findings.push(e);
    }
    if let Err(e) = validate_modifier("non_refundable.percent", &config.non_refundable) {
        findings.push(e);
    }
    if let Err(e) = validate_modifier("mobile.percent", &config.mobile) {
        findings.push(e);
    }
    if let Err(e) = validate_modifier("country.percent", &config.country) {
        findings.push(e);
    }
    if config.genius_discount_percent != 0.0 {
        if let Err(e) = validate_percent("genius_discount_percent", config.genius_discount_percent)
        {
            findings.push(e);
        }
    }
    for campaign in &config.campaigns {
        if let Err(e) = validate_campaign(campaign) {
            findings.push(e);
        }
    }

    findings
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_multiplier() {
        assert!(validate_multiplier(1.3).is_ok());
        assert!(validate_multiplier(0.05).is_ok());
        assert!(validate_multiplier(0.0).is_err());
        assert!(validate_multiplier(-1.0).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent("p", 0.0).is_ok());
        assert!(validate_percent("p", 100.0).is_ok());
        assert!(validate_percent("p", -0.1).is_err());
        assert!(validate_percent("p", 100.1).is_err());
    }

    #[test]
    fn test_inactive_modifier_is_not_checked() {
        let m = Modifier {
            active: false,
            percent: 999.0,
        };
        assert!(validate_modifier("mobile.percent", &m).is_ok());
        assert!(validate_modifier("mobile.percent", &Modifier::on(999.0)).is_err());
    }

    #[test]
    fn test_validate_campaign_windows() {
        let mut c = Campaign {
            id: "c".to_string(),
            slug: "summer-sale".to_string(),
            discount: 20.0,
            start_date: Some(day(2025, 6, 1)),
            end_date: Some(day(2025, 8, 31)),
            active: true,
        };
        assert!(validate_campaign(&c).is_ok());

        c.end_date = Some(day(2025, 5, 1));
        assert!(matches!(
            validate_campaign(&c),
            Err(ValidationError::ReversedWindow { .. })
        ));

        c.end_date = None;
        assert!(matches!(
            validate_campaign(&c),
            Err(ValidationError::IncompleteWindow { .. })
        ));

        // Inactive campaigns may have any window state.
        c.active = false;
        assert!(validate_campaign(&c).is_ok());
    }

    #[test]
    fn test_check_config_collects_everything() {
        let mut config = RateStackConfig::passthrough(day(2025, 11, 15));
        config.multiplier = 0.0;
        config.mobile = Modifier::on(150.0);
        config.campaigns.push(Campaign {
            id: "c".to_string(),
            slug: "".to_string(),
            discount: 20.0,
            start_date: None,
            end_date: None,
            active: false,
        });

        let findings = check_config(&config);
        assert_eq!(findings.len(), 3);
    }

    #[test]
    fn test_clean_config_has_no_findings() {
        let config = RateStackConfig::passthrough(day(2025, 11, 15));
        assert!(check_config(&config).is_empty());
    }
}
