use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::*;

use crate::SmallVecLine;

mod line;
mod subdivide;

pub use line::{clamp_percent, Axis, GuideLine};
pub use subdivide::{even_splits, subdivide};

const CENTER: f64 = 50.0;
const FULL_SIZE: f64 = 100.0;

/// The live, unsorted line sequence of one axis.
pub type SplitLines = SmallVecLine<GuideLine>;

/// Both guide-line sequences; also the unit stored by the history log.
///
/// Every operation is pure and returns a new `Splits`. None of them enforce the
/// per-axis line cap: callers check [`Splits::exceeding`] and discard results
/// that are too large.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Splits {
    pub horizontal: SplitLines,
    pub vertical: SplitLines,
}

impl Splits {
    /// Creates a new `Splits` from horizontal and vertical lines.
    pub fn new(horizontal: SplitLines, vertical: SplitLines) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn axis(&self, axis: Axis) -> &SplitLines {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut SplitLines {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Returns the first axis holding more than `max_splits` lines, if any.
    ///
    /// # Example
    /// ```
    /// use gridcut::{split::even_splits, Axis, Splits};
    ///
    /// let splits = Splits::new(even_splits(2), even_splits(5));
    /// assert_eq!(splits.exceeding(4), Some(Axis::Vertical));
    /// assert_eq!(splits.exceeding(5), None);
    /// ```
    pub fn exceeding(&self, max_splits: usize) -> Option<Axis> {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .find(|&axis| self.axis(axis).len() > max_splits)
    }

    /// Appends a centered line to `axis`.
    pub fn with_line_added(&self, axis: Axis) -> Self {
        let mut next = self.clone();
        next.axis_mut(axis).push(GuideLine::centered());
        next
    }

    /// Drops the highest-index line of `axis`, whatever its position.
    pub fn with_last_removed(&self, axis: Axis) -> Self {
        let mut next = self.clone();
        next.axis_mut(axis).pop();
        next
    }

    /// Moves one line, clamping the position to `[0, 100]`.
    ///
    /// The sequence is not reordered, so index-based references stay valid while a
    /// line is dragged past its neighbours. Out-of-range indices leave the lines as-is.
    ///
    /// # Example
    /// ```
    /// use gridcut::{split::even_splits, Axis, Splits};
    ///
    /// let splits = Splits::new(even_splits(2), Default::default());
    /// let moved = splits.with_position(Axis::Horizontal, 0, 140.0);
    /// assert_eq!(moved.horizontal[0].position, 100.0);
    /// assert!(moved.horizontal[1].position < moved.horizontal[0].position);
    /// ```
    pub fn with_position(&self, axis: Axis, index: usize, position: f64) -> Self {
        let mut next = self.clone();
        if position.is_nan() {
            return next;
        }
        if let Some(line) = next.axis_mut(axis).get_mut(index) {
            line.position = clamp_percent(position);
        }
        next
    }

    /// Subdivides one axis, or both when `axis` is `None`.
    pub fn subdivided(&self, axis: Option<Axis>, count: usize) -> Self {
        let mut next = self.clone();
        match axis {
            Some(axis) => *next.axis_mut(axis) = subdivide(self.axis(axis), count),
            None => {
                next.horizontal = subdivide(&self.horizontal, count);
                next.vertical = subdivide(&self.vertical, count);
            }
        }
        next
    }

    /// Replaces both axes with evenly spaced lines.
    pub fn grid(horizontal: usize, vertical: usize) -> Self {
        Self::new(even_splits(horizontal), even_splits(vertical))
    }

    /// A single centered line on `axis` and nothing on the other axis.
    pub fn split_in_two(axis: Axis) -> Self {
        let mut next = Self::default();
        next.axis_mut(axis).push(GuideLine::centered());
        next
    }

    /// Removes every line of `axis` whose index is in `indices`.
    pub fn without_indices(&self, axis: Axis, indices: &BTreeSet<usize>) -> Self {
        let mut next = self.clone();
        *next.axis_mut(axis) = self
            .axis(axis)
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, line)| *line)
            .collect();
        next
    }

    /// Returns a copy with every line clamped into `[0, 100]`.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.horizontal.iter().map(|line| line.clamped()).collect(),
            self.vertical.iter().map(|line| line.clamped()).collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}
