//! Peakmorph - peak-preserving interpolation between envelope shapes
//!
//! This library blends a circular table of one-dimensional shapes (envelopes)
//! so that each shape's peak glides smoothly from one position to the next as
//! the interpolation factor moves, instead of fading out in one place and in
//! at another.
//!
//! ```
//! use peakmorph::{ControlPoint, Interpolator};
//!
//! let mut morph = Interpolator::new(100);
//! let points = |raw: &[(usize, f64)]| -> Vec<ControlPoint> {
//!     raw.iter().copied().map(ControlPoint::from).collect()
//! };
//! let attack = points(&[(0, 0.0), (3, 1.0), (94, 0.0), (99, 0.0)]);
//! let snap = points(&[(0, 0.0), (1, 1.0), (60, 0.0), (99, 0.0)]);
//! morph.append_linear_shape(&attack, 3).unwrap();
//! morph.append_linear_shape(&snap, 1).unwrap();
//!
//! let mut out = vec![0.0; 100];
//! morph.interpolate(0.5, &mut out).unwrap();
//! assert_eq!(out[2], 1.0);
//! ```

pub mod double_buffer;
pub mod envelopes;
pub mod error;

// Re-export commonly used types at the crate root
pub use double_buffer::DoubleBuffer;
pub use envelopes::{ControlPoint, Interpolator, ShapeTable, TableDescriptor};
pub use error::{MorphError, MorphResult};

#[cfg(feature = "macros")]
pub use peakmorph_macros::shape;
