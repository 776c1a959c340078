// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recording scene.
//!
//! [`Timeline`] implements [`Scene`] by recording every played step and a
//! snapshot of the displayed drawables whenever they change. The recording
//! can be sampled at any time or frame, which is what a renderer needs to
//! produce the video.

use crate::animation::{AnimationStep, Directive, Scene};
use crate::error::{ArrayVizError, Result};
use crate::primitive::{Drawable, Primitive, PrimitiveId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A step placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedStep {
    /// Start time in seconds
    pub start: f64,
    /// The played step
    pub step: AnimationStep,
}

impl TimedStep {
    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.start + self.step.run_time
    }

    /// Whether the step is running at `time`
    pub fn is_active(&self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }
}

/// Settled state of the scene from `time` on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Time in seconds
    pub time: f64,
    /// All displayed primitives
    pub primitives: Vec<Primitive>,
}

/// Scene that records steps and snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Frame rate used for frame/time conversion
    frame_rate: f64,
    /// Current time (end of the last step or wait)
    time: f64,
    /// Displayed drawables, in the order they were added
    layers: IndexMap<PrimitiveId, Vec<Primitive>>,
    /// Played steps in time order
    steps: Vec<TimedStep>,
    /// Snapshots in time order
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    /// Frame rate of [`Timeline::new`]
    pub const DEFAULT_FRAME_RATE: f64 = 30.0;

    /// Create an empty timeline at 30 fps
    pub fn new() -> Self {
        Self {
            frame_rate: Self::DEFAULT_FRAME_RATE,
            time: 0.0,
            layers: IndexMap::new(),
            steps: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Create an empty timeline with a custom frame rate
    pub fn with_frame_rate(frame_rate: f64) -> Result<Self> {
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(ArrayVizError::InvalidFrameRate(frame_rate));
        }
        Ok(Self {
            frame_rate,
            ..Self::new()
        })
    }

    /// Frames per second
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Show a drawable, or update it if already shown
    pub fn add(&mut self, drawable: &dyn Drawable) {
        self.layers.insert(drawable.id(), drawable.primitives());
        self.take_snapshot();
    }

    /// Stop showing a drawable
    pub fn remove(&mut self, id: PrimitiveId) -> bool {
        let removed = self.layers.shift_remove(&id).is_some();
        if removed {
            self.take_snapshot();
        }
        removed
    }

    /// Remove every displayed drawable whose primitives satisfy `predicate`
    pub fn remove_where(&mut self, predicate: impl Fn(&Primitive) -> bool) -> usize {
        let before = self.layers.len();
        self.layers.retain(|_, primitives| !primitives.iter().any(&predicate));
        let removed = before - self.layers.len();
        if removed > 0 {
            self.take_snapshot();
        }
        removed
    }

    /// Whether a drawable is shown
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Hold the current state for `duration` seconds
    pub fn wait(&mut self, duration: f64) -> Result<()> {
        validate_run_time(duration)?;
        self.time += duration;
        Ok(())
    }

    /// Total recorded duration
    pub fn duration(&self) -> f64 {
        self.time
    }

    /// Played steps
    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    /// Recorded snapshots
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Convert time to frame number
    pub fn time_to_frame(&self, time: f64) -> u32 {
        (time * self.frame_rate) as u32
    }

    /// Convert frame number to time
    pub fn frame_to_time(&self, frame: u32) -> f64 {
        frame as f64 / self.frame_rate
    }

    /// Number of frames covering the whole recording
    pub fn frame_count(&self) -> u32 {
        (self.time * self.frame_rate).ceil() as u32 + 1
    }

    /// Scene contents at `time`
    pub fn sample(&self, time: f64) -> Vec<Primitive> {
        let Some(snapshot) = self.snapshots.iter().rev().find(|s| s.time <= time) else {
            return Vec::new();
        };

        let mut primitives = snapshot.primitives.clone();
        for timed in self.steps.iter().filter(|s| s.is_active(time)) {
            let alpha = (time - timed.start) / timed.step.run_time;
            let progress = timed.step.rate.apply(alpha);

            for directive in &timed.step.directives {
                let Some(primitive) = primitives.iter_mut().find(|p| p.id() == directive.target()) else {
                    continue;
                };
                match directive {
                    Directive::MoveAlongPath { path, .. } => primitive.move_to(path.point_at(progress)),
                    Directive::Shift { offset, .. } => primitive.translate(*offset * progress),
                }
            }
        }
        primitives
    }

    /// Scene contents at a frame
    pub fn sample_frame(&self, frame: u32) -> Vec<Primitive> {
        self.sample(self.frame_to_time(frame))
    }

    /// Every frame of the recording
    pub fn frames(&self) -> impl Iterator<Item = (u32, Vec<Primitive>)> + '_ {
        (0..self.frame_count()).map(|frame| (frame, self.sample_frame(frame)))
    }

    fn take_snapshot(&mut self) {
        let snapshot = Snapshot {
            time: self.time,
            primitives: self.layers.values().flatten().cloned().collect(),
        };

        // Later changes at the same instant supersede earlier ones
        match self.snapshots.last_mut() {
            Some(last) if last.time == self.time => *last = snapshot,
            _ => self.snapshots.push(snapshot),
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for Timeline {
    fn play(&mut self, step: AnimationStep) -> Result<()> {
        validate_run_time(step.run_time)?;
        tracing::trace!(
            start = self.time,
            run_time = step.run_time,
            directives = step.directives.len(),
            "Recorded step"
        );

        let run_time = step.run_time;
        self.steps.push(TimedStep {
            start: self.time,
            step,
        });
        self.time += run_time;
        Ok(())
    }

    fn refresh(&mut self, drawable: &dyn Drawable) {
        self.add(drawable);
    }
}

fn validate_run_time(run_time: f64) -> Result<()> {
    if run_time.is_finite() && run_time > 0.0 {
        Ok(())
    } else {
        Err(ArrayVizError::InvalidRunTime(run_time))
    }
}
