#![cfg(feature = "macros")]

use peakmorph::{ControlPoint, Interpolator, MorphError, shape};

#[test]
fn test_shape_macro_builds_points() {
    let points = shape![(0, 0.0), (3, 1.0), (9, 0.0)];
    assert_eq!(
        points,
        [
            ControlPoint::new(0, 0.0),
            ControlPoint::new(3, 1.0),
            ControlPoint::new(9, 0.0),
        ]
    );
}

#[test]
fn test_shape_macro_integer_and_negative_amplitudes() {
    let points = shape![(0, 0), (2, 1), (4, -0.5), (6, 0)];
    assert_eq!(points[1].amplitude, 1.0);
    assert_eq!(points[2].amplitude, -0.5);
    assert_eq!(points[3].index, 6);
}

#[test]
fn test_shape_macro_trailing_comma() {
    let points = shape![(0, 0.0), (1, 0.0),];
    assert_eq!(points.len(), 2);
}

#[test]
fn test_shape_macro_feeds_interpolator() {
    let mut morph = Interpolator::new(100);
    morph
        .append_linear_shape(&shape![(0, 0.0), (3, 1.0), (94, 0.0), (99, 0.0)], 3)
        .unwrap();
    morph
        .append_linear_shape(&shape![(0, 0.0), (1, 1.0), (60, 0.0), (99, 0.0)], 1)
        .unwrap();
    assert_eq!(morph.table().len(), 2);

    let out = morph.interpolated(0.5).unwrap();
    assert_eq!(out[2], 1.0);
}

#[test]
fn test_shape_macro_envelope_end_checked_at_runtime() {
    let mut morph = Interpolator::new(100);
    let result = morph.append_linear_shape(&shape![(0, 0.0), (3, 1.0), (50, 0.0)], 3);
    assert_eq!(
        result,
        Err(MorphError::UnanchoredControlPoints { last_index: 99 })
    );
    assert!(morph.table().is_empty());
}
