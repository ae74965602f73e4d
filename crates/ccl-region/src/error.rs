//! Error types for ccl-region

use thiserror::Error;

/// Errors that can occur during labeling and filtering
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Core library error (non-rectangular input, shape mismatch, ...)
    #[error("core error: {0}")]
    Core(#[from] ccl_core::Error),

    /// A label was referenced without having been registered
    #[error("label {label} not found in equivalence map")]
    KeyNotFound { label: u32 },

    /// Intensity window with `min > max`
    #[error("invalid intensity window: min {min} > max {max}")]
    InvalidWindow { min: u8, max: u8 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
