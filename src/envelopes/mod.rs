//! Shape tables and peak-preserving interpolation between them.
//!
//! This module provides the storage for a circular table of envelope shapes,
//! the segment stretching they are warped with, and the interpolator that
//! blends neighboring shapes without losing their peaks.

mod control;
mod interpolator;
mod stretch;
mod table;

pub use control::{rasterize, validate_control_points, ControlPoint};
pub use interpolator::Interpolator;
pub use stretch::{stretch, stretch_into, stretched_len};
pub use table::{ShapeTable, TableDescriptor};
