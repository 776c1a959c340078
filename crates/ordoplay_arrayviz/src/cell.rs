// SPDX-License-Identifier: MIT OR Apache-2.0
//! A single labeled slot of an array.

use crate::geometry::Side;
use crate::primitive::{BoxPrimitive, Drawable, Primitive, PrimitiveId, TextAnchor, TextPrimitive};
use crate::style::Color;
use kurbo::{Point, Size};

/// Placeholder shown by an empty cell
pub const BLANK: &str = " ";

/// Gap between a box edge and its label
pub const LABEL_GAP: f64 = 0.25;

/// Label font size relative to the value font size
pub const LABEL_SCALE: f64 = 0.7;

/// Draw order of value texts, above their box
const VALUE_Z_INDEX: i32 = 1;

/// One box with a value and an optional side label
#[derive(Debug, Clone)]
pub struct Cell {
    id: PrimitiveId,
    value: String,
    dimensions: Size,
    font_size: f64,
    label_value: Option<String>,
    label_side: Side,
    cell: BoxPrimitive,
    text: TextPrimitive,
    label: Option<TextPrimitive>,
}

impl Cell {
    /// Create a cell centered at the origin showing `value`
    pub fn new(value: impl ToString, dimensions: Size, font_size: f64) -> Self {
        let cell = BoxPrimitive::new(dimensions.width, dimensions.height).with_fill(Color::BLACK, 1.0);
        let value = value.to_string();
        let text = value_text(&value, font_size, cell.center);

        Self {
            id: PrimitiveId::new(),
            value,
            dimensions,
            font_size,
            label_value: None,
            label_side: Side::default(),
            cell,
            text,
            label: None,
        }
    }

    /// Create a cell showing the blank placeholder
    pub fn blank(dimensions: Size, font_size: f64) -> Self {
        Self::new(BLANK, dimensions, font_size)
    }

    /// Attach a label on the given side of the box
    pub fn with_label(mut self, label: impl ToString, side: Side) -> Self {
        let label = label.to_string();
        let (position, anchor) = label_anchor(&self.cell, side);
        self.label = Some(TextPrimitive::new(label.clone(), self.label_font_size()).at(position, anchor));
        self.label_value = Some(label);
        self.label_side = side;
        self
    }

    /// Move the whole cell so its box is centered on `center`
    pub fn move_to(&mut self, center: Point) {
        let offset = center - self.cell.center;
        self.cell.center += offset;
        self.text.position += offset;
        if let Some(label) = &mut self.label {
            label.position += offset;
        }
    }

    /// Replace the displayed value.
    ///
    /// A fresh text primitive is built at the box center and swapped in; the
    /// old one is dropped, so motion already issued for it is not affected.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = value.to_string();
        self.text = value_text(&self.value, self.font_size, self.cell.center);
    }

    /// Reset the displayed value to the blank placeholder
    pub fn clear(&mut self) {
        self.set_value(BLANK);
    }

    /// Current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Box primitive
    pub fn cell(&self) -> &BoxPrimitive {
        &self.cell
    }

    /// Value text primitive
    pub fn text(&self) -> &TextPrimitive {
        &self.text
    }

    /// Label primitive, if the cell has a label
    pub fn label(&self) -> Option<&TextPrimitive> {
        self.label.as_ref()
    }

    /// Label string, if the cell has a label
    pub fn label_value(&self) -> Option<&str> {
        self.label_value.as_deref()
    }

    /// Side the label sits on
    pub fn label_side(&self) -> Side {
        self.label_side
    }

    /// Box size
    pub fn dimensions(&self) -> Size {
        self.dimensions
    }

    /// Value font size
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Label font size
    pub fn label_font_size(&self) -> f64 {
        self.font_size * LABEL_SCALE
    }

    /// Center of the box
    pub fn center(&self) -> Point {
        self.cell.center
    }
}

impl Drawable for Cell {
    fn id(&self) -> PrimitiveId {
        self.id
    }

    fn primitives(&self) -> Vec<Primitive> {
        let mut primitives = vec![Primitive::Box(self.cell.clone()), Primitive::Text(self.text.clone())];
        if let Some(label) = &self.label {
            primitives.push(Primitive::Text(label.clone()));
        }
        primitives
    }
}

fn value_text(value: &str, font_size: f64, center: Point) -> TextPrimitive {
    TextPrimitive::new(value, font_size)
        .at(center, TextAnchor::Center)
        .with_z_index(VALUE_Z_INDEX)
}

/// Anchor point just outside `cell` on `side`, with the text edge facing the box
fn label_anchor(cell: &BoxPrimitive, side: Side) -> (Point, TextAnchor) {
    let half = match side {
        Side::Above | Side::Below => cell.height / 2.0,
        Side::Left | Side::Right => cell.width / 2.0,
    };
    let anchor = match side {
        Side::Above => TextAnchor::BottomCenter,
        Side::Below => TextAnchor::TopCenter,
        Side::Left => TextAnchor::RightCenter,
        Side::Right => TextAnchor::LeftCenter,
    };
    (cell.center + side.unit() * (half + LABEL_GAP), anchor)
}
