//! Storage for a circular sequence of fixed-length shapes and their peaks.
//!
//! A [`ShapeTable`] only ever holds validated data: every shape is
//! `envelope_size` samples long, starts and ends at exactly zero, and has a
//! peak index inside the envelope. Mutations either succeed completely or
//! leave the table untouched.

use super::control::{rasterize, ControlPoint};
use crate::error::{MorphError, MorphResult};

/// Bulk description of a shape table: a flat sample buffer plus one peak per shape.
///
/// The buffer holds the shapes back to back, so shape `n` occupies
/// `samples[n * envelope_size..(n + 1) * envelope_size]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDescriptor {
    /// All shapes, concatenated.
    pub samples: Vec<f64>,
    /// Number of samples per shape.
    pub envelope_size: usize,
    /// Peak index of each shape.
    pub peaks: Vec<usize>,
}

impl TableDescriptor {
    /// Creates a descriptor.
    pub fn new(samples: Vec<f64>, envelope_size: usize, peaks: Vec<usize>) -> Self {
        Self {
            samples,
            envelope_size,
            peaks,
        }
    }

    /// Number of shapes described, taken from the peak list.
    pub fn number_of_shapes(&self) -> usize {
        self.peaks.len()
    }
}

/// An ordered, circular table of shapes sharing one envelope size.
///
/// The successor of the last shape is the first one; see
/// [`Interpolator`](crate::Interpolator) for how neighbors are blended.
///
/// # Examples
///
/// ```
/// use peakmorph::{ControlPoint, ShapeTable};
///
/// let mut table = ShapeTable::new(5);
/// let points = [
///     ControlPoint::new(0, 0.0),
///     ControlPoint::new(1, 1.0),
///     ControlPoint::new(4, 0.0),
/// ];
/// table.append_linear_shape(&points, 1).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.peak(0), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTable {
    shapes: Vec<Vec<f64>>,
    peaks: Vec<usize>,
    envelope_size: usize,
}

impl ShapeTable {
    /// Creates an empty table for shapes of `envelope_size` samples.
    ///
    /// # Panics
    ///
    /// Panics if `envelope_size` is zero.
    pub fn new(envelope_size: usize) -> Self {
        assert!(envelope_size > 0, "Envelope size must be greater than zero");
        Self {
            shapes: Vec::new(),
            peaks: Vec::new(),
            envelope_size,
        }
    }

    /// Builds a table from a bulk descriptor, adopting its envelope size.
    pub fn from_descriptor(descriptor: TableDescriptor) -> MorphResult<Self> {
        validate_flat(
            &descriptor.samples,
            &descriptor.peaks,
            descriptor.envelope_size,
            descriptor.number_of_shapes(),
        )?;

        Ok(Self {
            shapes: split_shapes(&descriptor.samples, descriptor.envelope_size),
            peaks: descriptor.peaks,
            envelope_size: descriptor.envelope_size,
        })
    }

    /// Number of samples in every shape.
    pub fn envelope_size(&self) -> usize {
        self.envelope_size
    }

    /// Number of shapes in the table.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the table holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The shape at `index`, if present.
    pub fn shape(&self, index: usize) -> Option<&[f64]> {
        self.shapes.get(index).map(Vec::as_slice)
    }

    /// The peak index of the shape at `index`, if present.
    pub fn peak(&self, index: usize) -> Option<usize> {
        self.peaks.get(index).copied()
    }

    /// Iterates over the shapes in table order.
    pub fn shapes(&self) -> impl Iterator<Item = &[f64]> {
        self.shapes.iter().map(Vec::as_slice)
    }

    /// All peak indices in table order.
    pub fn peaks(&self) -> &[usize] {
        &self.peaks
    }

    /// Shape and peak at an index already known to be in range.
    pub(crate) fn entry(&self, index: usize) -> (&[f64], usize) {
        (&self.shapes[index], self.peaks[index])
    }

    /// Replaces every shape and peak, keeping the current shape count and envelope size.
    ///
    /// `samples` must hold exactly `len() * envelope_size()` samples and
    /// `peaks` exactly `len()` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use peakmorph::{ShapeTable, TableDescriptor};
    ///
    /// let mut table = ShapeTable::from_descriptor(TableDescriptor::new(
    ///     vec![0.0, 1.0, 0.0],
    ///     3,
    ///     vec![1],
    /// ))
    /// .unwrap();
    ///
    /// table.replace_all(&[0.0, 0.5, 0.0], &[1]).unwrap();
    /// assert_eq!(table.shape(0), Some(&[0.0, 0.5, 0.0][..]));
    ///
    /// // a nonzero boundary sample is refused and nothing changes
    /// assert!(table.replace_all(&[0.0, 0.5, 0.1], &[1]).is_err());
    /// assert_eq!(table.shape(0), Some(&[0.0, 0.5, 0.0][..]));
    /// ```
    pub fn replace_all(&mut self, samples: &[f64], peaks: &[usize]) -> MorphResult<()> {
        validate_flat(samples, peaks, self.envelope_size, self.len())
            .inspect_err(|e| log::warn!("Rejected table replacement: {}", e))?;

        self.shapes = split_shapes(samples, self.envelope_size);
        self.peaks = peaks.to_vec();

        log::debug!("Replaced {} shapes of {} samples", self.len(), self.envelope_size);
        Ok(())
    }

    /// Replaces the whole table, adopting the descriptor's envelope size and shape count.
    pub fn replace_all_with_size(&mut self, descriptor: TableDescriptor) -> MorphResult<()> {
        let replacement = Self::from_descriptor(descriptor)
            .inspect_err(|e| log::warn!("Rejected table descriptor: {}", e))?;
        *self = replacement;

        log::debug!(
            "Loaded table of {} shapes of {} samples",
            self.len(),
            self.envelope_size
        );
        Ok(())
    }

    /// Rasterizes a shape from control points and appends it with its peak.
    ///
    /// The points must start at `(0, 0.0)`, end at `(envelope_size - 1, 0.0)`
    /// and have strictly increasing indices. See [`rasterize`].
    pub fn append_linear_shape(&mut self, points: &[ControlPoint], peak: usize) -> MorphResult<()> {
        let shape = check_peak(peak, self.len(), self.envelope_size)
            .and_then(|()| rasterize(points, self.envelope_size))
            .inspect_err(|e| log::warn!("Rejected linear shape: {}", e))?;

        self.shapes.push(shape);
        self.peaks.push(peak);

        log::debug!("Appended shape {} with peak at {}", self.len() - 1, peak);
        Ok(())
    }
}

fn check_peak(peak: usize, shape: usize, envelope_size: usize) -> MorphResult<()> {
    if peak < envelope_size {
        Ok(())
    } else {
        Err(MorphError::PeakOutOfRange {
            shape,
            peak,
            envelope_size,
        })
    }
}

/// Validates a flat buffer of `shapes` shapes without touching any table.
fn validate_flat(
    samples: &[f64],
    peaks: &[usize],
    envelope_size: usize,
    shapes: usize,
) -> MorphResult<()> {
    if envelope_size == 0 {
        return Err(MorphError::EmptyEnvelope);
    }
    if peaks.len() != shapes {
        return Err(MorphError::PeakCountMismatch {
            expected: shapes,
            actual: peaks.len(),
        });
    }
    let expected = shapes * envelope_size;
    if samples.len() != expected {
        return Err(MorphError::SampleCountMismatch {
            expected,
            actual: samples.len(),
        });
    }

    for (index, (shape, &peak)) in samples.chunks_exact(envelope_size).zip(peaks).enumerate() {
        if shape[0] != 0.0 || shape[envelope_size - 1] != 0.0 {
            return Err(MorphError::NonZeroBoundary { shape: index });
        }
        check_peak(peak, index, envelope_size)?;
    }

    Ok(())
}

fn split_shapes(samples: &[f64], envelope_size: usize) -> Vec<Vec<f64>> {
    samples
        .chunks_exact(envelope_size)
        .map(<[f64]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> ShapeTable {
        ShapeTable::from_descriptor(TableDescriptor::new(
            vec![0.0, 1.0, 0.5, 0.0, 0.0, 0.5, 1.0, 0.0],
            4,
            vec![1, 2],
        ))
        .unwrap()
    }

    fn line(raw: &[(usize, f64)]) -> Vec<ControlPoint> {
        raw.iter().copied().map(ControlPoint::from).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let table = ShapeTable::new(16);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.envelope_size(), 16);
        assert_eq!(table.shape(0), None);
        assert_eq!(table.peak(0), None);
    }

    #[test]
    #[should_panic(expected = "Envelope size must be greater than zero")]
    fn test_new_rejects_zero_size() {
        ShapeTable::new(0);
    }

    #[test]
    fn test_from_descriptor() {
        let table = two_triangles();
        assert_eq!(table.len(), 2);
        assert_eq!(table.envelope_size(), 4);
        assert_eq!(table.shape(1), Some(&[0.0, 0.5, 1.0, 0.0][..]));
        assert_eq!(table.peaks(), &[1, 2]);
        assert_eq!(table.shapes().count(), 2);
    }

    #[test]
    fn test_from_descriptor_empty_table() {
        let table = ShapeTable::from_descriptor(TableDescriptor::new(vec![], 8, vec![])).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.envelope_size(), 8);
    }

    #[test]
    fn test_from_descriptor_rejects_malformed() {
        assert_eq!(
            ShapeTable::from_descriptor(TableDescriptor::new(vec![], 0, vec![])),
            Err(MorphError::EmptyEnvelope)
        );
        assert_eq!(
            ShapeTable::from_descriptor(TableDescriptor::new(vec![0.0; 8], 4, vec![1])),
            Err(MorphError::SampleCountMismatch {
                expected: 4,
                actual: 8
            })
        );
        assert_eq!(
            ShapeTable::from_descriptor(TableDescriptor::new(vec![0.0, 1.0, 0.0, 0.0], 4, vec![4])),
            Err(MorphError::PeakOutOfRange {
                shape: 0,
                peak: 4,
                envelope_size: 4
            })
        );
        assert_eq!(
            ShapeTable::from_descriptor(TableDescriptor::new(vec![0.0, 1.0, 0.0, 0.2], 4, vec![1])),
            Err(MorphError::NonZeroBoundary { shape: 0 })
        );
    }

    #[test]
    fn test_replace_all() {
        let mut table = two_triangles();
        table
            .replace_all(&[0.0, 0.2, 0.3, 0.0, 0.0, 0.4, 0.1, 0.0], &[2, 1])
            .unwrap();
        assert_eq!(table.shape(0), Some(&[0.0, 0.2, 0.3, 0.0][..]));
        assert_eq!(table.shape(1), Some(&[0.0, 0.4, 0.1, 0.0][..]));
        assert_eq!(table.peaks(), &[2, 1]);
    }

    #[test]
    fn test_replace_all_rejects_without_mutation() {
        let mut table = two_triangles();
        let before = table.clone();

        // absent buffer
        assert_eq!(
            table.replace_all(&[], &[1, 2]),
            Err(MorphError::SampleCountMismatch {
                expected: 8,
                actual: 0
            })
        );
        // wrong number of peaks
        assert_eq!(
            table.replace_all(&[0.0; 8], &[1]),
            Err(MorphError::PeakCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        // nonzero last sample in the second shape
        assert_eq!(
            table.replace_all(&[0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.3], &[1, 1]),
            Err(MorphError::NonZeroBoundary { shape: 1 })
        );
        // peak outside the envelope
        assert_eq!(
            table.replace_all(&[0.0; 8], &[1, 9]),
            Err(MorphError::PeakOutOfRange {
                shape: 1,
                peak: 9,
                envelope_size: 4
            })
        );

        assert_eq!(table, before);
    }

    #[test]
    fn test_replace_all_with_size() {
        let mut table = two_triangles();
        table
            .replace_all_with_size(TableDescriptor::new(vec![0.0, 0.5, 1.0, 0.5, 0.0], 5, vec![2]))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.envelope_size(), 5);
        assert_eq!(table.peak(0), Some(2));
    }

    #[test]
    fn test_replace_all_with_size_rejects_without_mutation() {
        let mut table = two_triangles();
        let before = table.clone();

        let result = table.replace_all_with_size(TableDescriptor::new(
            vec![0.3, 0.5, 1.0, 0.5, 0.0],
            5,
            vec![2],
        ));
        assert_eq!(result, Err(MorphError::NonZeroBoundary { shape: 0 }));

        let result = table.replace_all_with_size(TableDescriptor::new(vec![0.0; 10], 5, vec![2]));
        assert_eq!(
            result,
            Err(MorphError::SampleCountMismatch {
                expected: 5,
                actual: 10
            })
        );

        assert_eq!(table, before);
    }

    #[test]
    fn test_append_linear_shape() {
        let mut table = ShapeTable::new(5);
        table
            .append_linear_shape(&line(&[(0, 0.0), (2, 1.0), (4, 0.0)]), 2)
            .unwrap();
        table
            .append_linear_shape(&line(&[(0, 0.0), (1, 0.8), (4, 0.0)]), 1)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.shape(0), Some(&[0.0, 0.5, 1.0, 0.5, 0.0][..]));
        assert_eq!(table.peaks(), &[2, 1]);
    }

    #[test]
    fn test_append_linear_shape_rejects_without_mutation() {
        let mut table = two_triangles();
        let before = table.clone();

        assert_eq!(
            table.append_linear_shape(&line(&[(1, 0.0), (2, 1.0), (3, 0.0)]), 2),
            Err(MorphError::UnanchoredControlPoints { last_index: 3 })
        );
        assert_eq!(
            table.append_linear_shape(&line(&[(0, 0.0), (2, 1.0), (3, 0.0)]), 4),
            Err(MorphError::PeakOutOfRange {
                shape: 2,
                peak: 4,
                envelope_size: 4
            })
        );

        assert_eq!(table, before);
    }
}
