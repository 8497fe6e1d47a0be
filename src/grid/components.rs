use super::*;

/// A horizontal band between two adjacent horizontal boundaries, in pixels.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Row {
    pub y: f64,
    pub height: f64,
}

/// A vertical band between two adjacent vertical boundaries, in pixels.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Column {
    pub x: f64,
    pub width: f64,
}

/// Represents a cell in the partition, referencing a row and a column.
pub struct Cell<'a> {
    pub row: &'a Row,
    pub column: &'a Column,
}

/// One enumerated pixel rectangle of one source, before filtering.
///
/// Coordinates stay fractional; [`Candidate::pixel_width`] and
/// [`Candidate::pixel_height`] give the truncated size that is rendered, filtered
/// and used for naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub source_index: usize,
    pub slice_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Candidate {
    pub fn from_cell(cell: &Cell<'_>, source_index: usize, slice_index: usize) -> Self {
        Self {
            source_index,
            slice_index,
            x: cell.column.x,
            y: cell.row.y,
            width: cell.column.width,
            height: cell.row.height,
        }
    }

    /// The whitelist key of this candidate, `"{source_index}-{slice_index}"`.
    ///
    /// # Example
    /// ```
    /// use gridcut::Candidate;
    ///
    /// let candidate = Candidate { source_index: 2, slice_index: 7, x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
    /// assert_eq!(candidate.key(), "2-7");
    /// ```
    pub fn key(&self) -> String {
        candidate_key(self.source_index, self.slice_index)
    }

    pub fn pixel_width(&self) -> u32 {
        self.width as u32
    }

    pub fn pixel_height(&self) -> u32 {
        self.height as u32
    }
}

/// Builds a whitelist key from a source index and a slice index.
pub fn candidate_key(source_index: usize, slice_index: usize) -> String {
    format!("{source_index}-{slice_index}")
}

impl TryFrom<&Candidate> for Rect {
    type Error = SplitError;

    fn try_from(candidate: &Candidate) -> Result<Self, Self::Error> {
        let (width, height) = (candidate.pixel_width(), candidate.pixel_height());
        if width == 0 || height == 0 {
            return Err(SplitError::EmptySlice {
                key: candidate.key(),
                width,
                height,
            });
        }
        Ok(Rect::at(candidate.x as i32, candidate.y as i32).of_size(width, height))
    }
}
