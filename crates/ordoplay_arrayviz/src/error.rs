// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for array visualizations.

/// Errors raised by sequence operations and scenes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayVizError {
    /// A position outside `[0, len)`
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Sequence length
        len: usize,
    },

    /// A range that is empty, reversed or past the end
    #[error("Invalid range {start}..{end} for sequence of length {len}")]
    InvalidRange {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Sequence length
        len: usize,
    },

    /// A step or wait duration that is not a positive finite number
    #[error("Invalid run time: {0}")]
    InvalidRunTime(f64),

    /// A frame rate that is not a positive finite number
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    /// A color string that could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result alias for array visualization operations
pub type Result<T> = std::result::Result<T, ArrayVizError>;
