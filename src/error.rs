//! Error types for autofig operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or exporting a figure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error from the tabular reader.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Data length mismatch between x and y arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Invalid heatmap coordinate specification.
    #[error("Invalid heatmap coordinates: {0}")]
    HeatmapCoords(String),

    /// An axis is already claimed by another heatmap trace.
    #[error("Axis {axis} is already used by {by}")]
    AxisClaimed {
        /// Name of the contested axis.
        axis: String,
        /// Description of the trace holding the claim.
        by: String,
    },

    /// Invalid axis name.
    #[error("Invalid axis name: {0}")]
    InvalidAxis(String),

    /// Invalid subplot grid shape.
    #[error("Invalid subplot grid: {0}")]
    GridShape(String),

    /// A range-alignment entry names a master that is not a group leader.
    #[error("Invalid range alignment: {axis} cannot alias non-master {master}")]
    AlignmentMaster {
        /// The proposed master axis.
        master: String,
        /// The axis being registered.
        axis: String,
    },

    /// Aligned axes disagree on their axis type (linear vs. logarithmic).
    #[error("Aligned axes must have the same axis type: {0}")]
    AxisTypeMismatch(String),

    /// Placeholder-trace bookkeeping is out of balance after cleanup.
    #[error("Placeholder trace mismatch: expected to remove {expected}, removed {removed}")]
    PlaceholderMismatch {
        /// Number of placeholder traces synthesized.
        expected: usize,
        /// Number actually removed.
        removed: usize,
    },

    /// A column index is out of bounds for a data file.
    #[error("Column {column} out of bounds for {path} ({columns} columns)")]
    ColumnOutOfBounds {
        /// Requested column index.
        column: usize,
        /// Path of the offending file.
        path: String,
        /// Number of columns actually present.
        columns: usize,
    },

    /// A value in a data file could not be parsed as a number.
    #[error("Invalid numeric value {value:?} in {path}")]
    InvalidNumber {
        /// The raw field contents.
        value: String,
        /// Path of the offending file.
        path: String,
    },
}
