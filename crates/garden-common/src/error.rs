//! Error types for Time Gardener.

use thiserror::Error;

/// Top-level error type for garden operations.
#[derive(Debug, Error)]
pub enum GardenError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid has no cells
    #[error("Grid must have at least one cell, got {width}x{height}")]
    EmptyGrid {
        /// Grid width
        width: u32,
        /// Grid height
        height: u32,
    },

    /// Wither threshold does not exceed the maturity threshold
    #[error("Wither threshold ({wither}) must exceed maturity threshold ({maturity})")]
    ThresholdOrder {
        /// Maturity threshold
        maturity: i32,
        /// Wither threshold
        wither: i32,
    },

    /// A value that must be strictly positive was not
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A value that must not be negative was
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Play field cannot contain the grid
    #[error(
        "Play field {field_width}x{field_height} is smaller than the {grid_pixels_x}x{grid_pixels_y} grid"
    )]
    FieldTooSmall {
        /// Play field width
        field_width: u32,
        /// Play field height
        field_height: u32,
        /// Grid width in pixels
        grid_pixels_x: u64,
        /// Grid height in pixels
        grid_pixels_y: u64,
    },

    /// Initial value above its cap
    #[error("{name} ({value}) exceeds its cap ({cap})")]
    AboveCap {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Cap
        cap: f64,
    },
}

/// Result type alias for garden operations.
pub type GardenResult<T> = Result<T, GardenError>;
