//! Error types for shape table ingestion and interpolation.
//!
//! Every variant describes an operation that was refused. Refusals never leave
//! partial state behind: the table and any output buffer are exactly as they
//! were before the call.

use thiserror::Error;

/// Result type for morphing operations.
pub type MorphResult<T> = Result<T, MorphError>;

/// Reasons an operation on a shape table or interpolator was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MorphError {
    /// Interpolation factor outside `[0, shapes)` or not finite.
    #[error("interpolation factor {factor} outside [0, {shapes})")]
    FactorOutOfRange {
        /// The rejected factor.
        factor: f64,
        /// Number of shapes in the table.
        shapes: usize,
    },

    /// Output buffer length does not match the envelope size.
    #[error("buffer holds {actual} samples, envelope size is {expected}")]
    BufferSizeMismatch {
        /// The table's envelope size.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Flat sample buffer is not `shapes * envelope_size` long.
    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch {
        /// Required number of samples.
        expected: usize,
        /// Supplied number of samples.
        actual: usize,
    },

    /// Peak list length does not match the number of shapes.
    #[error("expected {expected} peaks, got {actual}")]
    PeakCountMismatch {
        /// Required number of peaks.
        expected: usize,
        /// Supplied number of peaks.
        actual: usize,
    },

    /// A shape does not start and end at exactly zero.
    #[error("shape {shape} has a nonzero boundary sample")]
    NonZeroBoundary {
        /// Index of the offending shape.
        shape: usize,
    },

    /// A peak index falls outside the envelope.
    #[error("peak {peak} of shape {shape} outside envelope of size {envelope_size}")]
    PeakOutOfRange {
        /// Index of the offending shape.
        shape: usize,
        /// The rejected peak index.
        peak: usize,
        /// The envelope size it was checked against.
        envelope_size: usize,
    },

    /// Envelope size of zero.
    #[error("envelope size must be at least 1")]
    EmptyEnvelope,

    /// Fewer than two control points.
    #[error("need at least 2 control points, got {count}")]
    TooFewControlPoints {
        /// Number of supplied points.
        count: usize,
    },

    /// Control points do not start at `(0, 0)` and end at `(envelope_size - 1, 0)`.
    #[error("control points must start at (0, 0) and end at ({last_index}, 0)")]
    UnanchoredControlPoints {
        /// The required index of the last point.
        last_index: usize,
    },

    /// Control point indices are not strictly increasing.
    #[error("control point {position} does not advance past its predecessor")]
    NonIncreasingControlPoints {
        /// Position of the offending point in the list.
        position: usize,
    },
}
