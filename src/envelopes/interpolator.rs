//! Peak-aligned interpolation across a circular shape table.
//!
//! # Algorithm
//!
//! A factor `s` in `[0, shapes)` selects two neighboring shapes, `floor(s)` and
//! `floor(s) + 1` (wrapping to the first shape after the last), and a blend
//! weight `frac(s)` between them. Cross-fading the raw shapes would produce a
//! double-humped result whenever their peaks differ, so each shape is first
//! warped so both peaks land on the same position:
//!
//! 1. The *ghost peak* is the peak position linearly interpolated by the blend
//!    weight: `peak_a + frac * (peak_b - peak_a)`.
//! 2. Each shape is split at its own peak into a left part `0..=peak` and a
//!    right part `peak..end`. The peak sample belongs to both.
//! 3. Left parts are stretched to virtual length `ghost + 1`; right parts are
//!    reversed, stretched to `envelope_size - ghost` and reversed back, so
//!    both parts stay anchored on the peak.
//! 4. When the two virtual lengths both claim the shared peak sample (the left
//!    length is a whole number), the right part drops it. If the right part
//!    would then be empty, which happens when rounding puts the ghost on the
//!    last index, the left part drops it instead so the final sample still
//!    comes from the shape's zero tail.
//! 5. The recombined shapes are cross-faded sample by sample.
//!
//! Because the ghost peak moves continuously with `s`, the peak of the output
//! glides from one shape's peak to the other's instead of fading out at one
//! position and in at another.

use super::control::ControlPoint;
use super::stretch::{stretch, stretched_len};
use super::table::{ShapeTable, TableDescriptor};
use crate::error::{MorphError, MorphResult};

/// Produces shapes between the entries of a circular [`ShapeTable`].
///
/// Interpolation takes `&self` and keeps no state between calls; the table is
/// only mutated through the validated operations forwarded here.
///
/// # Examples
///
/// ```
/// use peakmorph::{ControlPoint, Interpolator};
///
/// let triangle = |peak| [
///     ControlPoint::new(0, 0.0),
///     ControlPoint::new(peak, 1.0),
///     ControlPoint::new(8, 0.0),
/// ];
///
/// let mut morph = Interpolator::new(9);
/// morph.append_linear_shape(&triangle(2), 2).unwrap();
/// morph.append_linear_shape(&triangle(6), 6).unwrap();
///
/// let mut out = vec![0.0; 9];
/// morph.interpolate(0.5, &mut out).unwrap();
///
/// // the peak travels halfway instead of splitting in two
/// assert_eq!(out[4], 1.0);
/// assert_eq!(out[0], 0.0);
/// assert_eq!(out[8], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    table: ShapeTable,
}

impl Interpolator {
    /// Creates an interpolator over an empty table of `envelope_size` samples.
    ///
    /// # Panics
    ///
    /// Panics if `envelope_size` is zero.
    pub fn new(envelope_size: usize) -> Self {
        Self::from_table(ShapeTable::new(envelope_size))
    }

    /// Creates an interpolator seeded from a bulk descriptor.
    pub fn from_descriptor(descriptor: TableDescriptor) -> MorphResult<Self> {
        ShapeTable::from_descriptor(descriptor).map(Self::from_table)
    }

    /// Creates an interpolator over an existing table.
    pub fn from_table(table: ShapeTable) -> Self {
        Self { table }
    }

    /// The underlying shape table.
    pub fn table(&self) -> &ShapeTable {
        &self.table
    }

    /// Consumes the interpolator, returning its table.
    pub fn into_table(self) -> ShapeTable {
        self.table
    }

    /// Number of samples in every shape and every output.
    pub fn envelope_size(&self) -> usize {
        self.table.envelope_size()
    }

    /// See [`ShapeTable::replace_all`].
    pub fn replace_all(&mut self, samples: &[f64], peaks: &[usize]) -> MorphResult<()> {
        self.table.replace_all(samples, peaks)
    }

    /// See [`ShapeTable::replace_all_with_size`].
    pub fn replace_all_with_size(&mut self, descriptor: TableDescriptor) -> MorphResult<()> {
        self.table.replace_all_with_size(descriptor)
    }

    /// See [`ShapeTable::append_linear_shape`].
    pub fn append_linear_shape(&mut self, points: &[ControlPoint], peak: usize) -> MorphResult<()> {
        self.table.append_linear_shape(points, peak)
    }

    /// Writes the shape at fractional table position `factor` into `out`.
    ///
    /// `factor` must be finite and in `[0, shapes)`, and `out` must hold exactly
    /// `envelope_size` samples. Whole-number factors copy the stored shape
    /// verbatim. On error `out` is left untouched.
    pub fn interpolate(&self, factor: f64, out: &mut [f64]) -> MorphResult<()> {
        let shapes = self.table.len();
        if !factor.is_finite() || factor < 0.0 || factor >= shapes as f64 {
            log::debug!("Interpolation factor {} outside [0, {})", factor, shapes);
            return Err(MorphError::FactorOutOfRange { factor, shapes });
        }

        let size = self.table.envelope_size();
        if out.len() != size {
            log::debug!("Output buffer of {} samples, expected {}", out.len(), size);
            return Err(MorphError::BufferSizeMismatch {
                expected: size,
                actual: out.len(),
            });
        }

        let lower = factor.floor() as usize;
        let weight = factor - lower as f64;
        let (shape_a, peak_a) = self.table.entry(lower);

        if weight == 0.0 {
            out.copy_from_slice(shape_a);
            return Ok(());
        }

        let upper = (lower + 1) % shapes;
        let (shape_b, peak_b) = self.table.entry(upper);

        // the only pairs whose ghost sits on a boundary in exact arithmetic
        let last = size - 1;
        if peak_a == peak_b && (peak_a == 0 || peak_a == last) {
            log::debug!("Shapes {} and {} share boundary peak {}", lower, upper, peak_a);
            crossfade(shape_a, shape_b, weight, out);
            return Ok(());
        }

        let ghost = peak_a as f64 + weight * (peak_b as f64 - peak_a as f64);
        debug_assert!((0.0..=last as f64).contains(&ghost));
        let spans = Spans::around(ghost, size);
        let aligned_a = spans.align(shape_a, peak_a);
        let aligned_b = spans.align(shape_b, peak_b);
        debug_assert_eq!(aligned_a.len(), size);
        debug_assert_eq!(aligned_b.len(), size);

        crossfade(&aligned_a, &aligned_b, weight, out);
        Ok(())
    }

    /// Allocating form of [`interpolate`](Self::interpolate).
    pub fn interpolated(&self, factor: f64) -> MorphResult<Vec<f64>> {
        let mut out = vec![0.0; self.envelope_size()];
        self.interpolate(factor, &mut out)?;
        Ok(out)
    }
}

/// Virtual lengths of the two halves of a shape whose peak sits at `ghost`,
/// and which half gives up the shared peak sample when both claim it.
#[derive(Debug, Clone, Copy)]
struct Spans {
    left: f64,
    right: f64,
    trim_left: bool,
    trim_right: bool,
}

impl Spans {
    fn around(ghost: f64, size: usize) -> Self {
        let left = ghost + 1.0;
        let right = size as f64 - ghost;
        // both halves claim the peak sample exactly when `left` is whole
        let overlap = stretched_len(left, false) + stretched_len(right, false) > size;
        // the final sample must come from the right half, even when `ghost`
        // rounds onto the last index
        let trim_left = overlap && stretched_len(right, true) == 0;
        Self {
            left,
            right,
            trim_left,
            trim_right: overlap && !trim_left,
        }
    }

    /// Warps `shape` so its peak moves from `peak` to the ghost position.
    fn align(&self, shape: &[f64], peak: usize) -> Vec<f64> {
        let mut aligned = stretch(&shape[..=peak], self.left, self.trim_left);

        let reversed: Vec<f64> = shape[peak..].iter().rev().copied().collect();
        let mut right = stretch(&reversed, self.right, self.trim_right);
        right.reverse();

        aligned.extend(right);
        aligned
    }
}

fn crossfade(a: &[f64], b: &[f64], weight: f64, out: &mut [f64]) {
    for ((sample, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *sample = (1.0 - weight) * x + weight * y;
    }
}
