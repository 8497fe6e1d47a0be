use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::split::{GuideLine, Splits};
use crate::{SmallVecLine, SplitError};

mod components;
mod lines;

pub use components::{candidate_key, Candidate, Cell, Column, Row};
pub use lines::normalize;

/// Raster dimensions in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a size from fractional host measurements, flooring and clamping at zero.
    ///
    /// # Example
    /// ```
    /// use gridcut::CanvasSize;
    ///
    /// assert_eq!(CanvasSize::from_measured(640.9, -2.0), CanvasSize::new(640, 0));
    /// ```
    pub fn from_measured(width: f64, height: f64) -> Self {
        Self::new(width.floor().max(0.0) as u32, height.floor().max(0.0) as u32)
    }
}

impl From<(u32, u32)> for CanvasSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// The exhaustive grid of pixel rectangles described by a pair of line sequences.
///
/// Rows come from the normalized horizontal lines, columns from the normalized
/// vertical lines. Candidates are enumerated row by row (horizontal outer,
/// vertical inner); that order defines every slice index.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Partition {
    pub rows: SmallVecLine<Row>,
    pub columns: SmallVecLine<Column>,
}

impl Partition {
    /// Creates a new `Partition` for a raster of the given size.
    ///
    /// Zero lines on an axis still yields one band spanning that whole axis.
    pub fn from_splits(splits: &Splits, size: CanvasSize) -> Self {
        debug!(
            "Partitioning {}x{} raster with {} horizontal and {} vertical lines",
            size.width,
            size.height,
            splits.horizontal.len(),
            splits.vertical.len()
        );
        let rows = lines::spans(&normalize(&splits.horizontal), size.height)
            .map(|(y, height)| Row { y, height })
            .collect();
        let columns = lines::spans(&normalize(&splits.vertical), size.width)
            .map(|(x, width)| Column { x, width })
            .collect();
        Self { rows, columns }
    }

    /// Returns an iterator over all cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        self.rows
            .iter()
            .flat_map(move |row| self.columns.iter().map(move |column| Cell { row, column }))
    }

    /// Enumerates every cell as a [`Candidate`] of the given source.
    pub fn candidates(&self, source_index: usize) -> impl Iterator<Item = Candidate> + '_ {
        self.cells()
            .enumerate()
            .map(move |(slice_index, cell)| Candidate::from_cell(&cell, source_index, slice_index))
    }

    pub fn len(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
