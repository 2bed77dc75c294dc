//! Error types for chart construction and rendering.
//!
//! Configuration problems are surfaced synchronously as [`ChartError`] and
//! must halt that chart's render. Per-frame interaction misses (pointer
//! outside the plot, short segment runs) are not errors: they degrade to a
//! hide event or a point marker instead.

use thiserror::Error;

/// Errors produced while validating configuration or building geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// A scale domain endpoint was NaN or infinite.
    #[error("scale domain is not finite: [{min}, {max}]")]
    NonFiniteDomain { min: f64, max: f64 },

    /// The pixel range of a scale has zero length.
    #[error("scale range has zero length at {at}")]
    EmptyRange { at: f32 },

    /// A band scale was constructed with no categories.
    #[error("band scale requires at least one category")]
    EmptyBand,

    /// The dataset contains no series, or no series contains a point.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Requested tick count was zero.
    #[error("tick count must be at least 1")]
    InvalidTickCount,

    /// The configured zoom range is inverted or non-positive.
    #[error("invalid zoom range [{min}, {max}]")]
    InvalidZoomRange { min: f32, max: f32 },

    /// The plot area has zero or non-finite extent.
    #[error("plot area is degenerate")]
    DegeneratePlotArea,
}

/// Result alias used throughout the crate.
pub type ChartResult<T> = Result<T, ChartError>;
