// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout axes, box sides and motion paths.
//!
//! Coordinates are scene units with y pointing up.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Sweep angles below this are treated as a straight segment
const MIN_SWEEP: f64 = 1e-9;

/// Direction along which a sequence lays out its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutAxis {
    /// Horizontal, index grows to the right
    #[default]
    Rightward,
    /// Vertical, index grows upward
    Upward,
}

impl LayoutAxis {
    /// Unit vector pointing toward higher indices
    pub fn unit(&self) -> Vec2 {
        match self {
            Self::Rightward => Vec2::new(1.0, 0.0),
            Self::Upward => Vec2::new(0.0, 1.0),
        }
    }

    /// Side on which index labels are shown (opposite the layout direction)
    pub fn label_side(&self) -> Side {
        match self {
            Self::Rightward => Side::Above,
            Self::Upward => Side::Left,
        }
    }

    /// Size of a cell measured along this axis
    pub fn extent(&self, width: f64, height: f64) -> f64 {
        match self {
            Self::Rightward => width,
            Self::Upward => height,
        }
    }
}

/// Side of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Side {
    /// Above the box
    #[default]
    Above,
    /// Below the box
    Below,
    /// Left of the box
    Left,
    /// Right of the box
    Right,
}

impl Side {
    /// Unit vector pointing away from the box
    pub fn unit(&self) -> Vec2 {
        match self {
            Self::Above => Vec2::new(0.0, 1.0),
            Self::Below => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Circular arc between two points.
///
/// `angle` is the signed sweep in radians: positive runs counterclockwise,
/// negative clockwise. Two arcs with the same negative sweep between the
/// same pair of points, traversed in opposite directions, bulge to opposite
/// sides of the chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    start: Point,
    end: Point,
    angle: f64,
    center: Point,
    radius: f64,
    start_angle: f64,
}

impl ArcPath {
    /// Create an arc from `start` to `end` sweeping `angle` radians
    pub fn new(start: Point, end: Point, angle: f64) -> Self {
        let chord = end - start;
        let half = chord.length() / 2.0;
        let mid = start.midpoint(end);

        if half == 0.0 || angle.abs() < MIN_SWEEP {
            return Self {
                start,
                end,
                angle: 0.0,
                center: mid,
                radius: 0.0,
                start_angle: 0.0,
            };
        }

        let left = Vec2::new(-chord.y, chord.x) / chord.length();
        let center = mid + left * (half / (angle / 2.0).tan());
        let radius = half / (angle / 2.0).sin().abs();

        Self {
            start,
            end,
            angle,
            center,
            radius,
            start_angle: (start - center).atan2(),
        }
    }

    /// Start point
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point
    pub fn end(&self) -> Point {
        self.end
    }

    /// Signed sweep angle in radians (0 for a straight segment)
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Arc center (chord midpoint for a straight segment)
    pub fn center(&self) -> Point {
        self.center
    }

    /// Arc radius (0 for a straight segment)
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether this path is a straight segment
    pub fn is_straight(&self) -> bool {
        self.radius == 0.0
    }

    /// Point at parameter `t`, clamped to `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        if self.is_straight() {
            return self.start.lerp(self.end, t);
        }
        self.center + Vec2::from_angle(self.start_angle + self.angle * t) * self.radius
    }

    /// Convert to a `kurbo` arc for path rendering
    pub fn to_kurbo(&self) -> kurbo::Arc {
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: self.angle,
            x_rotation: 0.0,
        }
    }
}
