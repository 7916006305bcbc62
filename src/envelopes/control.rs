//! Control points and piecewise-linear rasterization of shapes.

use crate::error::{MorphError, MorphResult};

/// A breakpoint of a piecewise-linear shape: an amplitude at a sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Sample index within the envelope.
    pub index: usize,
    /// Amplitude at that index.
    pub amplitude: f64,
}

impl ControlPoint {
    /// Creates a control point.
    pub const fn new(index: usize, amplitude: f64) -> Self {
        Self { index, amplitude }
    }
}

impl From<(usize, f64)> for ControlPoint {
    fn from((index, amplitude): (usize, f64)) -> Self {
        Self::new(index, amplitude)
    }
}

/// Checks that `points` describe a complete shape of `envelope_size` samples.
///
/// There must be at least two points, the first at `(0, 0.0)`, the last at
/// `(envelope_size - 1, 0.0)`, with strictly increasing indices in between.
pub fn validate_control_points(points: &[ControlPoint], envelope_size: usize) -> MorphResult<()> {
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => {
            return Err(MorphError::TooFewControlPoints {
                count: points.len(),
            });
        }
    };

    let last_index = envelope_size.saturating_sub(1);
    if first.index != 0
        || first.amplitude != 0.0
        || last.index != last_index
        || last.amplitude != 0.0
    {
        return Err(MorphError::UnanchoredControlPoints { last_index });
    }

    if let Some(position) = points
        .windows(2)
        .position(|pair| pair[1].index <= pair[0].index)
    {
        return Err(MorphError::NonIncreasingControlPoints {
            position: position + 1,
        });
    }

    Ok(())
}

/// Draws a full-length shape by linear interpolation between control points.
///
/// Every control point lands exactly on its index; samples in between follow
/// the straight line joining the neighboring points.
///
/// # Examples
///
/// ```
/// use peakmorph::envelopes::{rasterize, ControlPoint};
///
/// let points = [
///     ControlPoint::new(0, 0.0),
///     ControlPoint::new(2, 1.0),
///     ControlPoint::new(4, 0.0),
/// ];
/// let shape = rasterize(&points, 5).unwrap();
/// assert_eq!(shape, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
/// ```
pub fn rasterize(points: &[ControlPoint], envelope_size: usize) -> MorphResult<Vec<f64>> {
    validate_control_points(points, envelope_size)?;

    let mut shape = vec![0.0; envelope_size];
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let span = (end.index - start.index) as f64;
        for x in start.index..end.index {
            let t = (x - start.index) as f64 / span;
            shape[x] = start.amplitude + t * (end.amplitude - start.amplitude);
        }
    }
    // validated above, so the last point exists and is in range
    if let Some(last) = points.last() {
        shape[last.index] = last.amplitude;
    }

    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(usize, f64)]) -> Vec<ControlPoint> {
        raw.iter().copied().map(ControlPoint::from).collect()
    }

    #[test]
    fn test_rasterize_triangle() {
        let shape = rasterize(&points(&[(0, 0.0), (4, 1.0), (8, 0.0)]), 9).unwrap();
        assert_eq!(shape, vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_rasterize_hits_every_control_point() {
        let raw = [(0, 0.0), (3, 0.9), (7, 0.2), (12, 0.6), (19, 0.0)];
        let shape = rasterize(&points(&raw), 20).unwrap();
        for (index, amplitude) in raw {
            assert_eq!(shape[index], amplitude);
        }
    }

    #[test]
    fn test_rasterize_two_points_is_flat_zero() {
        let shape = rasterize(&points(&[(0, 0.0), (5, 0.0)]), 6).unwrap();
        assert_eq!(shape, vec![0.0; 6]);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            rasterize(&points(&[(0, 0.0)]), 4),
            Err(MorphError::TooFewControlPoints { count: 1 })
        );
        assert_eq!(
            rasterize(&[], 4),
            Err(MorphError::TooFewControlPoints { count: 0 })
        );
    }

    #[test]
    fn test_unanchored_points() {
        let expected = Err(MorphError::UnanchoredControlPoints { last_index: 9 });
        // first index not zero
        assert_eq!(rasterize(&points(&[(1, 0.0), (9, 0.0)]), 10), expected);
        // first amplitude not zero
        assert_eq!(rasterize(&points(&[(0, 0.1), (9, 0.0)]), 10), expected);
        // last index short of the envelope end
        assert_eq!(rasterize(&points(&[(0, 0.0), (8, 0.0)]), 10), expected);
        // last amplitude not zero
        assert_eq!(rasterize(&points(&[(0, 0.0), (9, 0.5)]), 10), expected);
    }

    #[test]
    fn test_non_increasing_points() {
        assert_eq!(
            rasterize(&points(&[(0, 0.0), (5, 1.0), (5, 0.5), (9, 0.0)]), 10),
            Err(MorphError::NonIncreasingControlPoints { position: 2 })
        );
        assert_eq!(
            rasterize(&points(&[(0, 0.0), (6, 1.0), (3, 0.5), (9, 0.0)]), 10),
            Err(MorphError::NonIncreasingControlPoints { position: 2 })
        );
    }
}
