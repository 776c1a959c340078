// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation steps and the scene seam.
//!
//! An [`AnimationStep`] is one discrete timeline step: all of its
//! directives run over the same interval. A [`Scene`] plays steps; the
//! crate only describes which primitives move, along what path and for how
//! long.

use crate::error::Result;
use crate::geometry::ArcPath;
use crate::primitive::{Drawable, PrimitiveId};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Steepness of the [`RateFunction::Smooth`] sigmoid
const SMOOTH_INFLECTION: f64 = 10.0;

/// Easing applied to a step's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RateFunction {
    /// Constant speed
    Linear,
    /// Normalized logistic sigmoid, slow at both ends
    #[default]
    Smooth,
    /// Cubic ease-in-out
    EaseInOutCubic,
}

impl RateFunction {
    /// Map linear progress `t` to eased progress, both in `[0, 1]`
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => {
                let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
                let eased = (sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error);
                eased.clamp(0.0, 1.0)
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// What happens to one primitive during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Move the primitive's anchor point along a path
    MoveAlongPath {
        /// Moved primitive
        target: PrimitiveId,
        /// Motion path
        path: ArcPath,
    },
    /// Translate the primitive by an offset
    Shift {
        /// Moved primitive
        target: PrimitiveId,
        /// Total displacement
        offset: Vec2,
    },
}

impl Directive {
    /// Primitive affected by this directive
    pub fn target(&self) -> PrimitiveId {
        match self {
            Self::MoveAlongPath { target, .. } | Self::Shift { target, .. } => *target,
        }
    }
}

/// Directives played concurrently over one interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationStep {
    /// Directives in this step
    pub directives: Vec<Directive>,
    /// Duration in seconds
    pub run_time: f64,
    /// Easing
    pub rate: RateFunction,
}

impl AnimationStep {
    /// Default duration of a step in seconds
    pub const DEFAULT_RUN_TIME: f64 = 1.0;

    /// Create an empty step with default timing
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            run_time: Self::DEFAULT_RUN_TIME,
            rate: RateFunction::default(),
        }
    }

    /// Add a path motion
    pub fn move_along(mut self, target: PrimitiveId, path: ArcPath) -> Self {
        self.directives.push(Directive::MoveAlongPath { target, path });
        self
    }

    /// Add a translation
    pub fn shift(mut self, target: PrimitiveId, offset: Vec2) -> Self {
        self.directives.push(Directive::Shift { target, offset });
        self
    }

    /// Set duration and easing
    pub fn with_timing(mut self, run_time: f64, rate: RateFunction) -> Self {
        self.run_time = run_time;
        self.rate = rate;
        self
    }

    /// Whether the step moves nothing
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl Default for AnimationStep {
    fn default() -> Self {
        Self::new()
    }
}

/// Timeline collaborator that plays animation steps.
///
/// `play` returns once the step is scheduled; callers commit their data
/// changes afterwards and then `refresh` the affected drawable so the
/// scene picks up replaced primitives.
pub trait Scene {
    /// Play one step; all directives run concurrently
    fn play(&mut self, step: AnimationStep) -> Result<()>;

    /// Replace the scene's copy of `drawable` with its current primitives
    fn refresh(&mut self, _drawable: &dyn Drawable) {}
}
