use super::*;

/// One of the two guide-line collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// A guide line placed at a percentage of the canvas.
///
/// `size` is carried along for presets and subdivision but never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub position: f64,
    pub size: f64,
}

impl GuideLine {
    /// Creates a new `GuideLine` at the given position with the given size.
    ///
    /// # Example
    /// ```
    /// use gridcut::GuideLine;
    ///
    /// let line = GuideLine::new(25.0, 100.0);
    /// assert_eq!(line.position, 25.0);
    /// assert_eq!(line.size, 100.0);
    /// ```
    pub fn new(position: f64, size: f64) -> Self {
        Self { position, size }
    }

    /// A full-size line in the middle of the canvas, as placed by "add line".
    pub fn centered() -> Self {
        Self::new(CENTER, FULL_SIZE)
    }

    /// Returns a copy with position and size clamped to `[0, 100]`.
    ///
    /// # Example
    /// ```
    /// use gridcut::GuideLine;
    ///
    /// let line = GuideLine::new(120.0, -3.0).clamped();
    /// assert_eq!(line, GuideLine::new(100.0, 0.0));
    /// ```
    pub fn clamped(self) -> Self {
        Self {
            position: clamp_percent(self.position),
            size: clamp_percent(self.size),
        }
    }
}

/// Clamps a percentage into `[0, 100]`. NaN maps to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
