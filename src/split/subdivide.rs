use super::*;

/// Inserts `count` evenly spaced lines into every gap of `lines`.
///
/// The sequence is bracketed with virtual lines at 0 and 100 first, so a sequence of
/// `n` lines has `n + 1` gaps and grows to `n + count * (n + 1)` lines. The virtual
/// boundaries are dropped again and the existing lines keep their relative order.
/// New lines take the smaller `size` of the two lines around them.
///
/// # Example
/// ```
/// use gridcut::{split::subdivide, GuideLine};
///
/// let lines = subdivide(&[GuideLine::new(50.0, 100.0)], 1);
/// let positions: Vec<f64> = lines.iter().map(|l| l.position).collect();
/// assert_eq!(positions, vec![25.0, 50.0, 75.0]);
/// ```
pub fn subdivide(lines: &[GuideLine], count: usize) -> SplitLines {
    trace!("Subdividing {} lines with count={}", lines.len(), count);
    let mut bracketed: SplitLines = SmallVecLine::with_capacity(lines.len() + 2);
    bracketed.push(GuideLine::new(0.0, FULL_SIZE));
    bracketed.extend_from_slice(lines);
    bracketed.push(GuideLine::new(100.0, FULL_SIZE));

    let mut subdivided = SplitLines::with_capacity(lines.len() + count * (lines.len() + 1) + 1);
    for pair in bracketed.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let delta = (next.position - prev.position) / (count + 1) as f64;
        let size = prev.size.min(next.size);
        subdivided.extend(
            (1..=count).map(|step| GuideLine::new(prev.position + delta * step as f64, size)),
        );
        subdivided.push(next);
    }

    // Drop the trailing virtual boundary at 100
    subdivided.pop();
    subdivided
}

/// Generates `count` evenly spaced full-size lines strictly inside `(0, 100)`.
///
/// Positions are `100 / (count + 1) * (i + 1)` rounded to six decimals, so a
/// count of zero yields an empty sequence.
///
/// # Example
/// ```
/// use gridcut::split::even_splits;
///
/// let positions: Vec<f64> = even_splits(3).iter().map(|l| l.position).collect();
/// assert_eq!(positions, vec![25.0, 50.0, 75.0]);
/// assert!(even_splits(0).is_empty());
/// ```
pub fn even_splits(count: usize) -> SplitLines {
    trace!("Generating {} even splits", count);
    let delta = 100.0 / (count + 1) as f64;
    (1..=count)
        .map(|step| GuideLine::new(round_micro(delta * step as f64), FULL_SIZE))
        .collect()
}

fn round_micro(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
