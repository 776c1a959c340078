// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animated array visualizations for `OrdoPlay`.
//!
//! This crate draws arrays as rows or columns of labeled cells and
//! choreographs the classic teaching operations:
//! - Overwriting values
//! - Swapping two elements along crossing arcs
//! - Rotating a sub-range by one slot
//! - Highlighting a range of cells
//!
//! ## Architecture
//!
//! Rendering is left to the caller:
//! - Cells and sequences expose plain primitives through [`Drawable`]
//! - Animated operations describe motion as [`AnimationStep`]s and hand them
//!   to a [`Scene`]
//! - [`Timeline`] is a recording scene that can be sampled per frame
//!
//! Logical data and displayed text are committed together by
//! [`Sequence::overwrite`], so they never disagree between operations.

pub mod animation;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod primitive;
pub mod sequence;
pub mod style;
pub mod timeline;

pub use animation::{AnimationStep, Directive, RateFunction, Scene};
pub use cell::{Cell, BLANK};
pub use error::{ArrayVizError, Result};
pub use geometry::{ArcPath, LayoutAxis, Side};
pub use primitive::{
    BoxPrimitive, Drawable, HighlightPrimitive, Primitive, PrimitiveId, TextAnchor, TextPrimitive,
};
pub use sequence::{IndexNumbering, Sequence, SequenceConfig};
pub use style::Color;
pub use timeline::{Snapshot, TimedStep, Timeline};
