// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual primitives handed to the renderer.
//!
//! Primitives are plain data: a renderer draws them, scenes move them by id.
//! Composite objects (cells, sequences) expose their primitives through the
//! [`Drawable`] trait.

use crate::style::Color;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a primitive or a composite drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub Uuid);

impl PrimitiveId {
    /// Create a new random primitive ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrimitiveId {
    fn default() -> Self {
        Self::new()
    }
}

/// Filled, stroked rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitive {
    /// Unique primitive ID
    pub id: PrimitiveId,
    /// Center point
    pub center: Point,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Fill color
    pub fill: Color,
    /// Fill opacity
    pub fill_opacity: f32,
    /// Stroke color
    pub stroke: Color,
    /// Stroke width
    pub stroke_width: f64,
}

impl BoxPrimitive {
    /// Create a box centered at the origin, unfilled with a white outline
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: PrimitiveId::new(),
            center: Point::ORIGIN,
            width,
            height,
            fill: Color::BLACK,
            fill_opacity: 0.0,
            stroke: Color::WHITE,
            stroke_width: 4.0,
        }
    }

    /// Set fill color and opacity
    pub fn with_fill(mut self, color: Color, opacity: f32) -> Self {
        self.fill = color;
        self.fill_opacity = opacity;
        self
    }

    /// Size of the box
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size())
    }
}

/// Which point of a rendered text sits on its `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAnchor {
    /// Middle of the text
    #[default]
    Center,
    /// Middle of the bottom edge
    BottomCenter,
    /// Middle of the top edge
    TopCenter,
    /// Middle of the left edge
    LeftCenter,
    /// Middle of the right edge
    RightCenter,
}

/// Single line of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    /// Unique primitive ID
    pub id: PrimitiveId,
    /// Displayed string
    pub content: String,
    /// Font size in points
    pub font_size: f64,
    /// Anchor position
    pub position: Point,
    /// Which point of the text is placed at `position`
    pub anchor: TextAnchor,
    /// Draw order (higher is drawn on top)
    pub z_index: i32,
}

impl TextPrimitive {
    /// Create a centered text at the origin
    pub fn new(content: impl Into<String>, font_size: f64) -> Self {
        Self {
            id: PrimitiveId::new(),
            content: content.into(),
            font_size,
            position: Point::ORIGIN,
            anchor: TextAnchor::Center,
            z_index: 0,
        }
    }

    /// Place the text at a point
    pub fn at(mut self, position: Point, anchor: TextAnchor) -> Self {
        self.position = position;
        self.anchor = anchor;
        self
    }

    /// Set draw order
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Translucent rectangle drawn around a group of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightPrimitive {
    /// Unique primitive ID
    pub id: PrimitiveId,
    /// Covered region
    pub bounds: Rect,
    /// Fill color
    pub fill: Color,
    /// Fill opacity
    pub fill_opacity: f32,
    /// Stroke color
    pub stroke: Color,
    /// Stroke width
    pub stroke_width: f64,
}

impl HighlightPrimitive {
    /// Fill opacity of a highlight
    pub const FILL_OPACITY: f32 = 0.3;
    /// Stroke width of a highlight
    pub const STROKE_WIDTH: f64 = 2.0;

    /// Surround `region` with `padding` on every side
    pub fn surrounding(region: Rect, padding: f64, color: Color) -> Self {
        Self {
            id: PrimitiveId::new(),
            bounds: region.inflate(padding, padding),
            fill: color,
            fill_opacity: Self::FILL_OPACITY,
            stroke: color,
            stroke_width: Self::STROKE_WIDTH,
        }
    }
}

/// Any primitive a renderer can draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Rectangle
    Box(BoxPrimitive),
    /// Text
    Text(TextPrimitive),
    /// Highlight region
    Highlight(HighlightPrimitive),
}

impl Primitive {
    /// Primitive ID
    pub fn id(&self) -> PrimitiveId {
        match self {
            Self::Box(b) => b.id,
            Self::Text(t) => t.id,
            Self::Highlight(h) => h.id,
        }
    }

    /// The point moved by motion paths: box center, text anchor, region center
    pub fn anchor_point(&self) -> Point {
        match self {
            Self::Box(b) => b.center,
            Self::Text(t) => t.position,
            Self::Highlight(h) => h.bounds.center(),
        }
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Self::Box(b) => b.center += offset,
            Self::Text(t) => t.position += offset,
            Self::Highlight(h) => h.bounds = h.bounds + offset,
        }
    }

    /// Move so that the anchor point lands on `point`
    pub fn move_to(&mut self, point: Point) {
        let offset = point - self.anchor_point();
        self.translate(offset);
    }

    /// Text content, if this is a text primitive
    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Something made of primitives that a scene can display
pub trait Drawable {
    /// Identity of the drawable as a whole
    fn id(&self) -> PrimitiveId;

    /// Current primitives, in draw order
    fn primitives(&self) -> Vec<Primitive>;
}

impl Drawable for HighlightPrimitive {
    fn id(&self) -> PrimitiveId {
        self.id
    }

    fn primitives(&self) -> Vec<Primitive> {
        vec![Primitive::Highlight(self.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounds() {
        let mut cell = BoxPrimitive::new(0.5, 0.25);
        cell.center = Point::new(1.0, 1.0);
        assert_eq!(cell.bounds(), Rect::new(0.75, 0.875, 1.25, 1.125));
    }

    #[test]
    fn test_highlight_padding() {
        let region = Rect::new(0.0, 0.0, 1.0, 0.5);
        let highlight = HighlightPrimitive::surrounding(region, 0.1, Color::GREEN);
        assert!((highlight.bounds.x0 + 0.1).abs() < 1e-12);
        assert!((highlight.bounds.y1 - 0.6).abs() < 1e-12);
        assert_eq!(highlight.fill_opacity, 0.3);
        assert_eq!(highlight.stroke, Color::GREEN);
    }

    #[test]
    fn test_primitive_move_to() {
        let mut text = Primitive::Text(TextPrimitive::new("7", 22.0));
        text.move_to(Point::new(2.0, -1.0));
        assert_eq!(text.anchor_point(), Point::new(2.0, -1.0));

        let mut region = Primitive::Highlight(HighlightPrimitive::surrounding(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            0.0,
            Color::RED,
        ));
        region.translate(Vec2::new(1.0, 0.0));
        assert_eq!(region.anchor_point(), Point::new(2.0, 1.0));
    }
}
