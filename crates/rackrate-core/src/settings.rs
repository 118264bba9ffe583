//! # Persisted Settings Model
//!
//! Wire model of the per-asset calculator settings the dashboard persists.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persisted Asset Settings                             │
//! │                                                                         │
//! │  The dashboard PUTs one document per asset. Outer fields are           │
//! │  snake_case database columns; the calculator_settings blob keeps the   │
//! │  frontend's camelCase keys (it is stored verbatim as JSON).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```json
//! {
//!   "strategic_multiplier": 1.3,
//!   "genius_discount_percent": 10.0,
//!   "calculator_settings": {
//!     "nonRef":  { "active": true,  "percent": 15.0 },
//!     "mobile":  { "active": true,  "percent": 10.0 },
//!     "country": { "active": false, "percent": 0.0 },
//!     "campaigns": [
//!       {
//!         "id": "1a2b",
//!         "slug": "black-friday",
//!         "discount": 30.0,
//!         "startDate": "2025-11-24",
//!         "endDate": "2025-12-01",
//!         "active": true
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! This crate only *reads* (and, for tooling, re-emits) the document;
//! persistence itself belongs to the external API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SettingsResult;
use crate::types::{Campaign, Modifier, RateStackConfig};

// =============================================================================
// Wire Types
// =============================================================================

/// One asset's persisted calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Strategic markup multiplier (database column).
    #[serde(default = "default_multiplier")]
    pub strategic_multiplier: f64,

    /// Genius discount percentage. Lives outside the blob because it is a
    /// separate per-asset column supplied by the loyalty program, not the
    /// calculator form. Zero (the default) means inactive.
    #[serde(default)]
    pub genius_discount_percent: f64,

    /// The calculator form state, stored verbatim as a JSON blob.
    #[serde(default)]
    pub calculator_settings: CalculatorSettings,
}

fn default_multiplier() -> f64 {
    1.0
}

/// The nested calculator blob. Keys are the frontend's camelCase names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Non-refundable rate modifier ("nonRef" on the wire).
    #[serde(rename = "nonRef", default)]
    pub non_ref: ModifierSettings,

    /// Mobile-rate modifier.
    #[serde(default)]
    pub mobile: ModifierSettings,

    /// Country-rate modifier.
    #[serde(default)]
    pub country: ModifierSettings,

    /// Promotional campaigns, in the order the dashboard lists them.
    /// That order is load-bearing: it is the engine's tie-break order.
    #[serde(default)]
    pub campaigns: Vec<CampaignSettings>,
}

/// An on/off percentage as the frontend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModifierSettings {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub percent: f64,
}

/// A campaign row as the frontend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSettings {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub discount: f64,
    /// ISO date ("2025-11-24") or absent. Absent means the campaign can
    /// never be valid; the engine treats that as "not valid", not an error.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub active: bool,
}

// =============================================================================
// Decoding & Conversion
// =============================================================================

impl AssetSettings {
    /// Decodes a persisted settings document.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Re-encodes the document, pretty-printed (used by tooling that writes
    /// sample files).
    pub fn to_json_pretty(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the engine's immutable config snapshot for one stay date.
    ///
    /// The engine never sees the wire model; each calculation gets a fresh
    /// snapshot bound to the date under test.
    pub fn to_config(&self, test_date: NaiveDate) -> RateStackConfig {
        RateStackConfig {
            multiplier: self.strategic_multiplier,
            non_refundable: self.calculator_settings.non_ref.to_modifier(),
            mobile: self.calculator_settings.mobile.to_modifier(),
            country: self.calculator_settings.country.to_modifier(),
            campaigns: self
                .calculator_settings
                .campaigns
                .iter()
                .map(CampaignSettings::to_campaign)
                .collect(),
            genius_discount_percent: self.genius_discount_percent,
            test_date,
        }
    }
}

impl ModifierSettings {
    fn to_modifier(self) -> Modifier {
        Modifier {
            active: self.active,
            percent: self.percent,
        }
    }
}

impl CampaignSettings {
    fn to_campaign(&self) -> Campaign {
        Campaign {
            id: self.id.clone(),
            slug: self.slug.clone(),
            discount: self.discount,
            start_date: self.start_date,
            end_date: self.end_date,
            active: self.active,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_sell_rate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const DOC: &str = r#"{
        "strategic_multiplier": 1.3,
        "genius_discount_percent": 10.0,
        "calculator_settings": {
            "nonRef":  { "active": true,  "percent": 15.0 },
            "mobile":  { "active": true,  "percent": 10.0 },
            "country": { "active": false, "percent": 0.0 },
            "campaigns": [
                {
                    "id": "1a2b",
                    "slug": "black-friday",
                    "discount": 30.0,
                    "startDate": "2025-11-24",
                    "endDate": "2025-12-01",
                    "active": true
                },
                {
                    "id": "3c4d",
                    "slug": "early-deal",
                    "discount": 20.0,
                    "startDate": "2025-10-01",
                    "endDate": "2025-10-31",
                    "active": true
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_full_document() {
        let settings = AssetSettings::from_json(DOC).unwrap();

        assert!((settings.strategic_multiplier - 1.3).abs() < 1e-12);
        assert!((settings.genius_discount_percent - 10.0).abs() < 1e-12);
        assert!(settings.calculator_settings.non_ref.active);
        assert!(!settings.calculator_settings.country.active);

        let bf = &settings.calculator_settings.campaigns[0];
        assert_eq!(bf.slug, "black-friday");
        assert_eq!(bf.start_date, Some(day(2025, 11, 24)));
        assert_eq!(bf.end_date, Some(day(2025, 12, 1)));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = AssetSettings::from_json("{}").unwrap();

        assert!((settings.strategic_multiplier - 1.0).abs() < 1e-12);
        assert_eq!(settings.genius_discount_percent, 0.0);
        assert!(settings.calculator_settings.campaigns.is_empty());
        assert!(!settings.calculator_settings.mobile.active);
    }

    #[test]
    fn test_campaign_without_dates_decodes_and_never_applies() {
        let json = r#"{
            "calculator_settings": {
                "campaigns": [
                    { "id": "x", "slug": "summer-sale", "discount": 25.0, "active": true }
                ]
            }
        }"#;
        let settings = AssetSettings::from_json(json).unwrap();
        let config = settings.to_config(day(2025, 7, 1));

        // Dateless campaign contributes nothing.
        assert!((compute_sell_rate(100.0, &config) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_document_is_a_settings_error() {
        assert!(AssetSettings::from_json("{not json").is_err());
        assert!(AssetSettings::from_json(r#"{"strategic_multiplier": "abc"}"#).is_err());
    }

    #[test]
    fn test_to_config_binds_the_test_date() {
        let settings = AssetSettings::from_json(DOC).unwrap();

        // Black Friday window: the deep deal applies.
        let config = settings.to_config(day(2025, 11, 28));
        // 100 × 1.3 × 0.85 × 0.7 = 77.35
        assert!((compute_sell_rate(100.0, &config) - 77.35).abs() < 1e-9);

        // Same settings, October date: early-deal wins, mobile blocked.
        // 100 × 1.3 × 0.85 × 0.9 (genius) × 0.8 = 79.56
        let config = settings.to_config(day(2025, 10, 15));
        assert!((compute_sell_rate(100.0, &config) - 79.56).abs() < 1e-9);
    }

    #[test]
    fn test_json_round_trip_preserves_campaign_order() {
        let settings = AssetSettings::from_json(DOC).unwrap();
        let emitted = settings.to_json_pretty().unwrap();
        let again = AssetSettings::from_json(&emitted).unwrap();

        assert_eq!(settings, again);
        assert_eq!(again.calculator_settings.campaigns[0].id, "1a2b");
        assert_eq!(again.calculator_settings.campaigns[1].id, "3c4d");
    }
}
