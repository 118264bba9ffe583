//! # rackrate-core: Pure Rate-Stacking Engine
//!
//! This crate is the **heart** of RackRate. It contains the entire
//! discount-stacking pipeline as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RackRate Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Revenue Dashboard (TypeScript)                   │   │
//! │  │    Pacing tables ──► Price calculator ──► Admin console          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST / settings blob                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Shells (apps/cli, services)                   │   │
//! │  │    load settings, pick a stay date, display the waterfall        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rackrate-core (THIS CRATE) ★                     │   │
//! │  │                                                                  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────────────────┐  │   │
//! │  │   │  types   │ │  stack   │ │  engine  │ │     waterfall     │  │   │
//! │  │   │ Campaign │ │ resolve  │ │ forward  │ │  display rows     │  │   │
//! │  │   │ Config   │ │ rules    │ │ reverse  │ │  for the UI       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └───────────────────┘  │   │
//! │  │                                                                  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Campaign, Modifier, RateStackConfig)
//! - [`stack`] - Rule resolution shared by every direction
//! - [`engine`] - Forward (PMS → sell) and reverse (sell → PMS) computation
//! - [`waterfall`] - The displayed breakdown, driven by the same walk
//! - [`settings`] - Wire model of the persisted per-asset settings blob
//! - [`validation`] - Advisory config checks (the engine stays permissive)
//! - [`error`] - Settings and validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same config + same date = same rate, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **One rule resolution**: forward, reverse, and waterfall consume the
//!    same [`stack::ResolvedStack`], so they cannot disagree
//! 4. **Permissive math**: degenerate inputs surface as `inf`/`NaN`, never
//!    as panics or errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rackrate_core::{compute_required_pms_rate, compute_sell_rate, Modifier, RateStackConfig};
//!
//! let mut config =
//!     RateStackConfig::passthrough(NaiveDate::from_ymd_opt(2025, 11, 15).unwrap());
//! config.multiplier = 1.3;
//! config.non_refundable = Modifier::on(15.0);
//! config.mobile = Modifier::on(10.0);
//!
//! let sell = compute_sell_rate(100.0, &config);
//! assert!((sell - 99.45).abs() < 1e-9);
//!
//! // The reverse direction recovers the PMS rate exactly (up to floats).
//! let back = compute_required_pms_rate(sell, &config);
//! assert!((back - 100.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod settings;
pub mod stack;
pub mod types;
pub mod validation;
pub mod waterfall;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rackrate_core::Campaign` instead of
// `use rackrate_core::types::Campaign`

pub use engine::{compute_required_pms_rate, compute_sell_rate};
pub use error::{SettingsError, ValidationError};
pub use settings::AssetSettings;
pub use stack::{resolve_stack, ResolvedStack};
pub use types::{Campaign, CampaignClass, Modifier, RateStackConfig};
pub use waterfall::{compute_waterfall, WaterfallStep};
