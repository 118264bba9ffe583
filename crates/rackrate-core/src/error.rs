//! # Error Types
//!
//! Domain-specific error types for rackrate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rackrate-core errors (this file)                                      │
//! │  ├── SettingsError    - Persisted settings blob cannot be decoded      │
//! │  └── ValidationError  - Advisory config checks (never block the math)  │
//! │                                                                         │
//! │  The engine math itself has NO error type: campaign-window problems    │
//! │  degrade to "campaign not valid" and numeric degeneracy propagates as  │
//! │  inf/NaN. Only the edges (decoding, advisory validation) can fail.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, slug, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Settings Error
// =============================================================================

/// Failures decoding the persisted per-asset settings blob.
///
/// The blob is written by the dashboard's save endpoint; this crate only
/// reads it. Anything structurally wrong surfaces here before the engine
/// ever runs.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The JSON document is malformed or does not match the wire shape.
    #[error("settings blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with SettingsError.
pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Advisory configuration findings.
///
/// The engine is deliberately permissive: it never rejects or clamps a
/// config (see the open-questions discussion in the repository docs). These
/// errors exist for shells that want to warn an operator before computing -
/// the CLI logs them and computes anyway.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: f64 },

    /// Numeric value is outside the expected range.
    #[error("{field} is {value}, expected between {min} and {max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A campaign's validity window ends before it starts.
    #[error("campaign \"{slug}\" has a reversed date window (it will never apply)")]
    ReversedWindow { slug: String },

    /// A campaign is active but missing one or both window dates.
    #[error("campaign \"{slug}\" is active but has no complete date window")]
    IncompleteWindow { slug: String },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "multiplier".to_string(),
            value: 0.0,
        };
        assert_eq!(err.to_string(), "multiplier must be positive, got 0");

        let err = ValidationError::OutOfRange {
            field: "mobile.percent".to_string(),
            value: 150.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "mobile.percent is 150, expected between 0 and 100"
        );

        let err = ValidationError::ReversedWindow {
            slug: "summer-sale".to_string(),
        };
        assert!(err.to_string().contains("summer-sale"));
    }

    #[test]
    fn test_settings_error_wraps_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = SettingsError::from(parse_err);
        assert!(err.to_string().starts_with("settings blob is not valid JSON"));
    }
}
