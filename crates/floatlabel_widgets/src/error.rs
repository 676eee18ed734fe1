//! Field configuration errors

use thiserror::Error;

/// Errors raised while constructing a text field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A geometry value is NaN or infinite
    #[error("geometry value `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    /// A geometry offset would produce negative-size rectangles
    #[error("geometry offset `{name}` must not be negative, got {value}")]
    NegativeOffset { name: &'static str, value: f32 },

    /// A configured line height is zero or negative
    #[error("line height `{name}` must be positive, got {value}")]
    InvalidLineHeight { name: &'static str, value: f32 },
}

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldError>;
