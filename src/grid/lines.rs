use super::*;

/// Normalizes a live line sequence into strictly increasing boundary positions.
///
/// Synthetic boundaries at 0 and 100 are added, positions are sorted ascending and
/// any position equal to its predecessor is dropped. The result always starts at 0,
/// ends at 100 and has at least two entries.
///
/// # Example
/// ```
/// use gridcut::{normalize, GuideLine};
///
/// let lines = [
///     GuideLine::new(70.0, 100.0),
///     GuideLine::new(30.0, 100.0),
///     GuideLine::new(70.0, 50.0),
///     GuideLine::new(0.0, 100.0),
/// ];
/// assert_eq!(normalize(&lines).into_vec(), vec![0.0, 30.0, 70.0, 100.0]);
/// ```
pub fn normalize(lines: &[GuideLine]) -> SmallVecLine<f64> {
    trace!("Normalizing {} lines", lines.len());
    let mut positions: SmallVecLine<f64> = SmallVecLine::with_capacity(lines.len() + 2);
    positions.push(0.0);
    positions.extend(lines.iter().map(|line| line.position));
    positions.push(100.0);
    positions.sort_by(|a, b| a.total_cmp(b));
    positions.dedup();
    positions
}

/// Turns normalized boundaries into `(start, length)` pixel spans along an axis of `extent` pixels.
pub(super) fn spans(boundaries: &[f64], extent: u32) -> impl Iterator<Item = (f64, f64)> + '_ {
    let extent = f64::from(extent);
    boundaries.windows(2).map(move |pair| {
        let start = pair[0] / 100.0 * extent;
        let length = (pair[1] - pair[0]) / 100.0 * extent;
        (start, length)
    })
}
