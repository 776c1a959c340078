// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visualization scripts.
//!
//! A script names the initial data, the sequence settings and the list of
//! operations to animate. Scripts are stored as RON:
//!
//! ```ron
//! (
//!     data: [5, 3, 8],
//!     config: (axis: Rightward, spacing: 0.1),
//!     operations: [Swap(0, 2), Wait(0.5)],
//! )
//! ```

use ordoplay_arrayviz::{
    ArrayVizError, Color, Primitive, Scene, Sequence, SequenceConfig, Timeline,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Highlight padding used when a script does not set one
pub const DEFAULT_PADDING: f64 = 0.1;

/// Errors raised while loading, running or writing a script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid RON
    #[error("Failed to parse script: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON output failed
    #[error("Failed to write RON: {0}")]
    Ron(#[from] ron::Error),

    /// JSON output failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A script setting was rejected
    #[error("Invalid script: {0}")]
    Invalid(ArrayVizError),

    /// An operation was rejected
    #[error("Operation {index} failed: {source}")]
    Operation {
        /// Position of the operation in the script
        index: usize,
        /// Underlying error
        source: ArrayVizError,
    },
}

/// A value in the script's data list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Whole floats keep their ".0" so they read as authored
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:?}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Write values into positions; missing values become blank
    Overwrite(Vec<usize>, Vec<ScriptValue>),
    /// Swap two positions
    Swap(usize, usize),
    /// Move the value at the first position to the second, shifting the rest
    RotateAndShift(usize, usize),
    /// Show a highlight around `[start, end)`
    Highlight {
        /// First covered position
        start: usize,
        /// End of the range (exclusive); the sequence end if omitted
        #[serde(default)]
        end: Option<usize>,
        /// Hex color; green if omitted
        #[serde(default)]
        color: Option<String>,
        /// Padding around the cells
        #[serde(default)]
        padding: Option<f64>,
    },
    /// Remove every highlight
    ClearHighlights,
    /// Hold for a number of seconds
    Wait(f64),
}

/// A complete visualization script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Initial values
    pub data: Vec<ScriptValue>,
    /// Sequence settings
    #[serde(default)]
    pub config: SequenceConfig,
    /// Output frame rate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Operations, in order
    #[serde(default)]
    pub operations: Vec<Operation>,
}

fn default_frame_rate() -> f64 {
    30.0
}

impl Script {
    /// Parse a script from RON text
    pub fn from_ron(source: &str) -> Result<Self, ScriptError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a script file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    /// Run every operation against a fresh sequence and timeline
    pub fn run(&self) -> Result<(Sequence, Timeline), ScriptError> {
        let mut timeline =
            Timeline::with_frame_rate(self.frame_rate).map_err(ScriptError::Invalid)?;
        let mut sequence = Sequence::new(&self.data, self.config.clone());
        timeline.add(&sequence);

        for (index, operation) in self.operations.iter().enumerate() {
            tracing::debug!(index, ?operation, "Running operation");
            apply(operation, &mut sequence, &mut timeline)
                .map_err(|source| ScriptError::Operation { index, source })?;
        }

        tracing::info!(
            operations = self.operations.len(),
            steps = timeline.steps().len(),
            duration = timeline.duration(),
            "Script finished"
        );
        Ok((sequence, timeline))
    }
}

fn apply(
    operation: &Operation,
    sequence: &mut Sequence,
    timeline: &mut Timeline,
) -> Result<(), ArrayVizError> {
    match operation {
        Operation::Overwrite(positions, values) => {
            sequence.overwrite(positions, values)?;
            timeline.refresh(&*sequence);
        }
        Operation::Swap(i, j) => sequence.swap(timeline, *i, *j)?,
        Operation::RotateAndShift(from, to) => sequence.rotate_and_shift(timeline, *from, *to)?,
        Operation::Highlight {
            start,
            end,
            color,
            padding,
        } => {
            let color = match color {
                Some(hex) => Color::from_hex(hex)?,
                None => Color::GREEN,
            };
            let highlight = sequence.highlight(*start, *end, color, padding.unwrap_or(DEFAULT_PADDING))?;
            timeline.add(&highlight);
        }
        Operation::ClearHighlights => {
            timeline.remove_where(|p| matches!(p, Primitive::Highlight(_)));
        }
        Operation::Wait(seconds) => timeline.wait(*seconds)?,
    }
    Ok(())
}
