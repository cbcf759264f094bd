//! # Error Types
//!
//! Domain-specific error types for marketplace-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  marketplace-core errors (this file)                                   │
//! │  ├── CoreError        - Blob codec failures                            │
//! │  └── ValidationError  - Persisted data breaking a cart invariant       │
//! │                                                                         │
//! │  marketplace-db errors (separate crate)                                │
//! │  └── StorageError     - Key-value storage failures                     │
//! │                                                                         │
//! │  marketplace-cart errors                                               │
//! │  └── CartError        - What cart consumers see                        │
//! │                                                                         │
//! │  Flow: CoreError → CartError ← StorageError                            │
//! │        ValidationError is reported, never raised (logged on hydration) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown id on increment/decrement is NOT an error anywhere in this
//! workspace; it is a no-op.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart blob could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - Stored blob is truncated or not JSON
    /// - Stored blob is JSON but not an array of line items
    #[error("Cart blob codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A line item that breaks a cart invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} of '{id}' must be positive")]
    MustBePositive { field: String, id: String },

    /// Same id appears more than once.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Entry at `index` is not a line item (wrong type, missing field,
    /// number out of range).
    #[error("entry {index} is not a line item: {reason}")]
    Malformed { index: usize, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "id".to_string(),
            value: "a".to_string(),
        };
        assert_eq!(err.to_string(), "id 'a' already exists");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
            id: "a".to_string(),
        };
        assert_eq!(err.to_string(), "quantity of 'a' must be positive");

        let err = ValidationError::Malformed {
            index: 2,
            reason: "invalid type: null, expected f64".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "entry 2 is not a line item: invalid type: null, expected f64"
        );
    }
}
