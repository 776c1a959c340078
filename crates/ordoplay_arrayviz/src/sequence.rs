// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered row or column of cells backed by a data array.
//!
//! The sequence keeps `data[i]` and the text shown by cell `i` in sync:
//! every mutation goes through [`Sequence::overwrite`], and animated
//! operations commit through it right after their step is played.

use crate::animation::{AnimationStep, RateFunction, Scene};
use crate::cell::{Cell, BLANK};
use crate::error::{ArrayVizError, Result};
use crate::geometry::{ArcPath, LayoutAxis};
use crate::primitive::{Drawable, HighlightPrimitive, Primitive, PrimitiveId};
use crate::style::Color;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sweep of the arcs traveled by moving values (clockwise half turn)
const ARC_ANGLE: f64 = -PI;

/// Index labels shown next to each cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexNumbering {
    /// Whether labels are shown
    pub enabled: bool,
    /// Label of the first cell
    pub from: i64,
    /// Difference between consecutive labels
    pub step: i64,
}

impl IndexNumbering {
    /// No labels
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Labels `from, from + step, ...`
    pub fn starting_at(from: i64, step: i64) -> Self {
        Self {
            enabled: true,
            from,
            step,
        }
    }

    /// Label of the cell at `position`, if numbering is enabled.
    ///
    /// Computed in `i128` so extreme `from`/`step` values cannot overflow.
    pub fn label(&self, position: usize) -> Option<i128> {
        self.enabled
            .then(|| i128::from(self.from) + position as i128 * i128::from(self.step))
    }
}

impl Default for IndexNumbering {
    fn default() -> Self {
        Self {
            enabled: true,
            from: 0,
            step: 1,
        }
    }
}

/// Construction settings for a [`Sequence`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Cell width
    pub width: f64,
    /// Cell height
    pub height: f64,
    /// Layout direction
    pub axis: LayoutAxis,
    /// Index labels
    pub index: IndexNumbering,
    /// Gap between neighboring cells
    pub spacing: f64,
    /// Value font size
    pub font_size: f64,
    /// Duration of animated operations in seconds
    pub run_time: f64,
    /// Easing of animated operations
    pub rate: RateFunction,
}

impl SequenceConfig {
    /// Set cell size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set layout direction
    pub fn with_axis(mut self, axis: LayoutAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Set index numbering
    pub fn with_index(mut self, index: IndexNumbering) -> Self {
        self.index = index;
        self
    }

    /// Set gap between cells
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set value font size
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set animation duration and easing
    pub fn with_timing(mut self, run_time: f64, rate: RateFunction) -> Self {
        self.run_time = run_time;
        self.rate = rate;
        self
    }

    /// Distance between neighboring cell centers
    pub fn pitch(&self) -> f64 {
        self.axis.extent(self.width, self.height) + self.spacing
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 0.6,
            axis: LayoutAxis::default(),
            index: IndexNumbering::default(),
            spacing: 0.0,
            font_size: 22.0,
            run_time: AnimationStep::DEFAULT_RUN_TIME,
            rate: RateFunction::default(),
        }
    }
}

/// Array of values drawn as a row or column of cells
#[derive(Debug, Clone)]
pub struct Sequence {
    id: PrimitiveId,
    data: Vec<String>,
    cells: Vec<Cell>,
    config: SequenceConfig,
}

impl Sequence {
    /// Build one cell per value, laid out contiguously and centered on the origin
    pub fn new<I>(data: I, config: SequenceConfig) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let data: Vec<String> = data.into_iter().map(|value| value.to_string()).collect();
        let size = Size::new(config.width, config.height);
        let label_side = config.axis.label_side();

        let mut cells: Vec<Cell> = data
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let cell = Cell::new(value, size, config.font_size);
                match config.index.label(i) {
                    Some(index) => cell.with_label(index, label_side),
                    None => cell,
                }
            })
            .collect();

        let unit = config.axis.unit();
        let pitch = config.pitch();
        let middle = cells.len().saturating_sub(1) as f64 / 2.0;
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.move_to(Point::ORIGIN + unit * ((i as f64 - middle) * pitch));
        }

        tracing::debug!(len = data.len(), axis = ?config.axis, "Built sequence");

        Self {
            id: PrimitiveId::new(),
            data,
            cells,
            config,
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sequence has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical values
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// All cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `position`
    pub fn cell(&self, position: usize) -> Result<&Cell> {
        self.check_index(position)?;
        Ok(&self.cells[position])
    }

    /// Construction settings
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Center of the whole row or column
    pub fn center(&self) -> Point {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => first.center().midpoint(last.center()),
            _ => Point::ORIGIN,
        }
    }

    /// Move every cell so the sequence is centered on `center`.
    ///
    /// Only meant for placement before the first animated operation.
    pub fn move_to(&mut self, center: Point) {
        let offset = center - self.center();
        for cell in &mut self.cells {
            let target = cell.center() + offset;
            cell.move_to(target);
        }
    }

    /// Region around cells `[start, end)` with `padding`; `end = None` runs to the last cell
    pub fn highlight(
        &self,
        start: usize,
        end: Option<usize>,
        color: Color,
        padding: f64,
    ) -> Result<HighlightPrimitive> {
        let end = end.unwrap_or(self.len());
        if start >= end || end > self.len() {
            return Err(ArrayVizError::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }

        let region = self.cells[start..end]
            .iter()
            .map(|cell| cell.cell().bounds())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);

        Ok(HighlightPrimitive::surrounding(region, padding, color))
    }

    /// Write `values` into `positions`, blanking positions without a value
    pub fn overwrite<V: ToString>(&mut self, positions: &[usize], values: &[V]) -> Result<()> {
        self.overwrite_with_fill(positions, values, BLANK)
    }

    /// Write `values` into `positions`, padding missing values with `fill`.
    ///
    /// Commits data and displayed text together. Surplus values are ignored.
    /// Nothing is written if any position is out of range.
    pub fn overwrite_with_fill<V: ToString>(
        &mut self,
        positions: &[usize],
        values: &[V],
        fill: &str,
    ) -> Result<()> {
        for &position in positions {
            self.check_index(position)?;
        }

        for (k, &position) in positions.iter().enumerate() {
            let value = values.get(k).map_or_else(|| fill.to_string(), ToString::to_string);
            self.cells[position].set_value(&value);
            self.data[position] = value;
        }

        tracing::trace!(?positions, "Committed values");
        Ok(())
    }

    /// Reset `positions` to the blank placeholder
    pub fn clear(&mut self, positions: &[usize]) -> Result<()> {
        self.overwrite::<&str>(positions, &[])
    }

    /// Swap the values at `i` and `j`, animating them along opposite arcs
    pub fn swap(&mut self, scene: &mut impl Scene, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(());
        }

        let (a, b) = (&self.cells[i], &self.cells[j]);
        let step = AnimationStep::new()
            .move_along(a.text().id, ArcPath::new(a.center(), b.center(), ARC_ANGLE))
            .move_along(b.text().id, ArcPath::new(b.center(), a.center(), ARC_ANGLE))
            .with_timing(self.config.run_time, self.config.rate);

        tracing::debug!(i, j, "Swapping");
        scene.play(step)?;

        let values = [self.data[j].clone(), self.data[i].clone()];
        self.overwrite(&[i, j], &values)?;
        scene.refresh(&*self);
        Ok(())
    }

    /// Move the value at `from` to `to`, shifting the values between them one
    /// slot toward `from`.
    ///
    /// `from` is always the source, so argument order picks the rotation
    /// direction: on `[10, 20, 30, 40]`, `(1, 3)` gives `[10, 30, 40, 20]`
    /// and `(3, 1)` gives `[10, 40, 20, 30]`.
    pub fn rotate_and_shift(&mut self, scene: &mut impl Scene, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        // Slots in traversal order, from `from` toward `to`
        let positions: Vec<usize> = if from < to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        };

        let toward_from = if from < to { -1.0 } else { 1.0 };
        let offset = self.config.axis.unit() * (self.config.pitch() * toward_from);

        let source = &self.cells[from];
        let mut step = AnimationStep::new().move_along(
            source.text().id,
            ArcPath::new(source.center(), self.cells[to].center(), ARC_ANGLE),
        );
        for &position in &positions[1..] {
            step = step.shift(self.cells[position].text().id, offset);
        }
        let step = step.with_timing(self.config.run_time, self.config.rate);

        tracing::debug!(from, to, "Rotating");
        scene.play(step)?;

        let mut values: Vec<String> = positions.iter().map(|&p| self.data[p].clone()).collect();
        values.rotate_left(1);
        self.overwrite(&positions, &values)?;
        scene.refresh(&*self);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ArrayVizError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl Drawable for Sequence {
    fn id(&self) -> PrimitiveId {
        self.id
    }

    fn primitives(&self) -> Vec<Primitive> {
        self.cells.iter().flat_map(Drawable::primitives).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Directive;
    use kurbo::Vec2;

    /// Scene that records what it is asked to play
    #[derive(Default)]
    struct RecordingScene {
        steps: Vec<AnimationStep>,
        refreshed: usize,
        fail: bool,
    }

    impl Scene for RecordingScene {
        fn play(&mut self, step: AnimationStep) -> Result<()> {
            if self.fail {
                return Err(ArrayVizError::InvalidRunTime(step.run_time));
            }
            self.steps.push(step);
            Ok(())
        }

        fn refresh(&mut self, _drawable: &dyn Drawable) {
            self.refreshed += 1;
        }
    }

    fn unit_config() -> SequenceConfig {
        SequenceConfig::default().with_size(1.0, 1.0)
    }

    fn assert_in_sync(seq: &Sequence) {
        for (i, cell) in seq.cells().iter().enumerate() {
            assert_eq!(seq.data()[i], cell.value());
            assert_eq!(seq.data()[i], cell.text().content);
            assert_eq!(cell.text().position, cell.center());
        }
    }

    fn data(seq: &Sequence) -> Vec<&str> {
        seq.data().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_index_labels() {
        let config = SequenceConfig::default().with_index(IndexNumbering::starting_at(5, 2));
        let seq = Sequence::new(["a", "b", "c"], config);

        let labels: Vec<_> = seq.cells().iter().map(|c| c.label_value().unwrap()).collect();
        assert_eq!(labels, ["5", "7", "9"]);
    }

    #[test]
    fn test_index_labels_past_i64_range() {
        let config = SequenceConfig::default().with_index(IndexNumbering::starting_at(i64::MAX, 1));
        let seq = Sequence::new([1, 2], config);

        let labels: Vec<_> = seq.cells().iter().map(|c| c.label_value().unwrap()).collect();
        assert_eq!(labels, ["9223372036854775807", "9223372036854775808"]);

        let down = IndexNumbering::starting_at(i64::MIN, -1);
        assert_eq!(down.label(1), Some(i128::from(i64::MIN) - 1));
    }

    #[test]
    fn test_no_labels_when_disabled() {
        let config = SequenceConfig::default().with_index(IndexNumbering::disabled());
        let seq = Sequence::new([1, 2], config);
        assert!(seq.cells().iter().all(|c| c.label().is_none()));
    }

    #[test]
    fn test_horizontal_layout() {
        let seq = Sequence::new([1, 2, 3], unit_config());

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.cells()[0].center(), Point::new(-1.0, 0.0));
        assert_eq!(seq.cells()[1].center(), Point::new(0.0, 0.0));
        assert_eq!(seq.cells()[2].center(), Point::new(1.0, 0.0));
        assert_eq!(seq.cells()[0].label_side(), crate::geometry::Side::Above);
    }

    #[test]
    fn test_vertical_layout_with_spacing() {
        let config = unit_config().with_axis(LayoutAxis::Upward).with_spacing(0.5);
        let seq = Sequence::new([1, 2], config);

        assert_eq!(seq.cells()[0].center(), Point::new(0.0, -0.75));
        assert_eq!(seq.cells()[1].center(), Point::new(0.0, 0.75));
        assert_eq!(seq.cells()[0].label_side(), crate::geometry::Side::Left);
    }

    #[test]
    fn test_empty_sequence() {
        let seq = Sequence::new(Vec::<i32>::new(), SequenceConfig::default());
        assert!(seq.is_empty());
        assert!(seq.primitives().is_empty());
        assert!(seq.highlight(0, None, Color::GREEN, 0.1).is_err());
    }

    #[test]
    fn test_move_to() {
        let mut seq = Sequence::new([1, 2], unit_config());
        seq.move_to(Point::new(0.0, 2.0));
        assert_eq!(seq.cells()[0].center(), Point::new(-0.5, 2.0));
        assert_eq!(seq.center(), Point::new(0.0, 2.0));
        assert_in_sync(&seq);
    }

    #[test]
    fn test_highlight_half_open_range() {
        let seq = Sequence::new([1, 2, 3, 4, 5], unit_config());
        let highlight = seq.highlight(1, Some(3), Color::GREEN, 0.0).unwrap();

        let expected = seq.cells()[1].cell().bounds().union(seq.cells()[2].cell().bounds());
        assert_eq!(highlight.bounds, expected);
        assert!(!highlight.bounds.contains(seq.cells()[0].center()));
        assert!(!highlight.bounds.contains(seq.cells()[3].center()));
        assert_eq!(highlight.fill, Color::GREEN);
        assert_eq!(highlight.fill_opacity, 0.3);
    }

    #[test]
    fn test_highlight_defaults_to_end() {
        let seq = Sequence::new([1, 2, 3], unit_config());
        let highlight = seq.highlight(1, None, Color::YELLOW, 0.25).unwrap();
        assert_eq!(highlight.bounds, Rect::new(-0.75, -0.75, 1.75, 0.75));
    }

    #[test]
    fn test_highlight_rejects_bad_ranges() {
        let seq = Sequence::new([1, 2, 3], unit_config());
        assert_eq!(
            seq.highlight(2, Some(2), Color::GREEN, 0.1),
            Err(ArrayVizError::InvalidRange { start: 2, end: 2, len: 3 })
        );
        assert!(seq.highlight(0, Some(4), Color::GREEN, 0.1).is_err());
        assert!(seq.highlight(2, Some(1), Color::GREEN, 0.1).is_err());
    }

    #[test]
    fn test_overwrite_pads_with_blank() {
        let mut seq = Sequence::new(["a", "b"], unit_config());
        seq.overwrite(&[0, 1], &["x"]).unwrap();

        assert_eq!(data(&seq), ["x", " "]);
        assert_in_sync(&seq);
    }

    #[test]
    fn test_overwrite_custom_fill_and_surplus() {
        let mut seq = Sequence::new(["a", "b", "c"], unit_config());
        seq.overwrite_with_fill(&[2, 0], &[9], "?").unwrap();
        assert_eq!(data(&seq), ["?", "b", "9"]);

        seq.overwrite(&[1], &["p", "q"]).unwrap();
        assert_eq!(data(&seq), ["?", "p", "9"]);

        seq.clear(&[0, 2]).unwrap();
        assert_eq!(data(&seq), [" ", "p", " "]);
        assert_in_sync(&seq);
    }

    #[test]
    fn test_overwrite_out_of_range_is_atomic() {
        let mut seq = Sequence::new(["a", "b"], unit_config());
        let result = seq.overwrite(&[0, 2], &["x", "y"]);

        assert_eq!(result, Err(ArrayVizError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(data(&seq), ["a", "b"]);
    }

    #[test]
    fn test_swap() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([1, 2, 3], unit_config());
        let (t0, t2) = (seq.cells()[0].text().id, seq.cells()[2].text().id);

        seq.swap(&mut scene, 0, 2).unwrap();

        assert_eq!(data(&seq), ["3", "2", "1"]);
        assert_in_sync(&seq);
        assert_eq!(scene.steps.len(), 1);
        assert_eq!(scene.refreshed, 1);

        let step = &scene.steps[0];
        assert_eq!(step.directives.len(), 2);
        match (&step.directives[0], &step.directives[1]) {
            (
                Directive::MoveAlongPath { target: a, path: up },
                Directive::MoveAlongPath { target: b, path: down },
            ) => {
                assert_eq!(*a, t0);
                assert_eq!(*b, t2);
                assert_eq!(up.end(), seq.cells()[2].center());
                assert_eq!(down.end(), seq.cells()[0].center());
                // Opposite sides of the row
                assert!(up.point_at(0.5).y > 0.0);
                assert!(down.point_at(0.5).y < 0.0);
            }
            other => panic!("unexpected directives: {other:?}"),
        }
    }

    #[test]
    fn test_swap_same_index_is_noop() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([1, 2, 3], unit_config());
        let text = seq.cells()[1].text().id;

        seq.swap(&mut scene, 1, 1).unwrap();

        assert_eq!(data(&seq), ["1", "2", "3"]);
        assert_eq!(seq.cells()[1].text().id, text);
        assert!(scene.steps.is_empty());
        assert_eq!(scene.refreshed, 0);
    }

    #[test]
    fn test_swap_is_involution() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new(["a", "b", "c", "d"], unit_config());

        seq.swap(&mut scene, 1, 3).unwrap();
        seq.swap(&mut scene, 1, 3).unwrap();

        assert_eq!(data(&seq), ["a", "b", "c", "d"]);
        assert_in_sync(&seq);
    }

    #[test]
    fn test_swap_out_of_range() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([1, 2], unit_config());
        assert!(matches!(
            seq.swap(&mut scene, 0, 5),
            Err(ArrayVizError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(scene.steps.is_empty());
    }

    #[test]
    fn test_failed_play_does_not_commit() {
        let mut scene = RecordingScene {
            fail: true,
            ..Default::default()
        };
        let mut seq = Sequence::new([1, 2, 3], unit_config());

        assert!(seq.swap(&mut scene, 0, 1).is_err());
        assert!(seq.rotate_and_shift(&mut scene, 0, 2).is_err());
        assert_eq!(data(&seq), ["1", "2", "3"]);
        assert_eq!(scene.refreshed, 0);
    }

    #[test]
    fn test_rotate_forward() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([10, 20, 30, 40], unit_config());

        seq.rotate_and_shift(&mut scene, 1, 3).unwrap();

        assert_eq!(data(&seq), ["10", "30", "40", "20"]);
        assert_in_sync(&seq);
    }

    #[test]
    fn test_rotate_backward() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([10, 20, 30, 40], unit_config());

        seq.rotate_and_shift(&mut scene, 3, 1).unwrap();

        assert_eq!(data(&seq), ["10", "40", "20", "30"]);
        assert_in_sync(&seq);
    }

    #[test]
    fn test_rotate_same_index_is_noop() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([10, 20], unit_config());

        seq.rotate_and_shift(&mut scene, 1, 1).unwrap();

        assert_eq!(data(&seq), ["10", "20"]);
        assert!(scene.steps.is_empty());
    }

    #[test]
    fn test_rotate_step_shape() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([10, 20, 30, 40], unit_config());
        let ids: Vec<_> = seq.cells().iter().map(|c| c.text().id).collect();
        let centers: Vec<_> = seq.cells().iter().map(Cell::center).collect();

        seq.rotate_and_shift(&mut scene, 0, 2).unwrap();

        let step = &scene.steps[0];
        assert_eq!(step.directives.len(), 3);
        assert_eq!(
            step.directives[0],
            Directive::MoveAlongPath {
                target: ids[0],
                path: ArcPath::new(centers[0], centers[2], -PI),
            }
        );
        assert_eq!(
            step.directives[1],
            Directive::Shift { target: ids[1], offset: Vec2::new(-1.0, 0.0) }
        );
        assert_eq!(step.directives[2].target(), ids[2]);
    }

    #[test]
    fn test_rotate_vertical_shifts_toward_source() {
        let mut scene = RecordingScene::default();
        let config = SequenceConfig::default()
            .with_size(1.0, 2.0)
            .with_axis(LayoutAxis::Upward);
        let mut seq = Sequence::new(["a", "b", "c"], config);

        seq.rotate_and_shift(&mut scene, 2, 0).unwrap();

        assert_eq!(data(&seq), ["c", "a", "b"]);
        for directive in &scene.steps[0].directives[1..] {
            match directive {
                Directive::Shift { offset, .. } => assert_eq!(*offset, Vec2::new(0.0, 2.0)),
                other => panic!("expected shift, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_mixed_operations_stay_in_sync() {
        let mut scene = RecordingScene::default();
        let mut seq = Sequence::new([5, 3, 8, 1, 9], unit_config());

        seq.swap(&mut scene, 0, 4).unwrap();
        seq.rotate_and_shift(&mut scene, 4, 1).unwrap();
        seq.overwrite(&[2], &["x"]).unwrap();
        seq.rotate_and_shift(&mut scene, 0, 3).unwrap();

        assert_eq!(data(&seq), ["5", "x", "8", "9", "1"]);
        assert_in_sync(&seq);
        assert_eq!(scene.steps.len(), 3);
    }

    #[test]
    fn test_config_from_partial_ron() {
        let config: SequenceConfig =
            ron::from_str("(axis: Upward, index: (from: 1), spacing: 0.1)").unwrap();

        assert_eq!(config.axis, LayoutAxis::Upward);
        assert!(config.index.enabled);
        assert_eq!(config.index.from, 1);
        assert_eq!(config.index.step, 1);
        assert_eq!(config.width, 0.6);
        assert!((config.pitch() - 0.7).abs() < 1e-12);
    }
}
