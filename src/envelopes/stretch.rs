//! Piecewise-linear stretching of shape segments to a virtual length.
//!
//! A segment of `n` samples is treated as a polyline over `[0, n - 1]`. The
//! x-axis is rescaled so the polyline spans `[0, virtual_len - 1]` instead,
//! and the result is sampled at every integer position that fits. The virtual
//! length is real-valued, so the rescaled polyline usually ends between two
//! samples; only `floor(virtual_len)` samples are produced.

/// Number of samples [`stretch`] produces for a given virtual length.
///
/// This is `floor(virtual_len)`, minus one when `exclude_peak` is set.
/// Non-finite or non-positive lengths produce nothing.
pub fn stretched_len(virtual_len: f64, exclude_peak: bool) -> usize {
    let whole = if virtual_len.is_finite() && virtual_len > 0.0 {
        virtual_len.floor() as usize
    } else {
        0
    };
    whole.saturating_sub(usize::from(exclude_peak))
}

/// Stretches or shrinks `segment` to `virtual_len` samples.
///
/// Output sample `x` reads the source at `x * (n - 1) / (virtual_len - 1)`,
/// linearly interpolating between the two bracketing samples. When
/// `exclude_peak` is set the final sample is dropped, which lets two
/// segments sharing an endpoint be joined without repeating it.
///
/// A single-sample segment stretches to a flat run of that sample.
///
/// # Examples
///
/// ```
/// use peakmorph::envelopes::stretch;
///
/// // stretching to the original length is the identity
/// assert_eq!(stretch(&[0.0, 1.0, 0.0], 3.0, false), vec![0.0, 1.0, 0.0]);
///
/// // a ramp of 3 samples stretched to 5
/// assert_eq!(stretch(&[0.0, 0.5, 1.0], 5.0, false), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
///
/// // same ramp, dropping the shared endpoint
/// assert_eq!(stretch(&[0.0, 0.5, 1.0], 5.0, true), vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn stretch(segment: &[f64], virtual_len: f64, exclude_peak: bool) -> Vec<f64> {
    let mut out = Vec::new();
    stretch_into(&mut out, segment, virtual_len, exclude_peak);
    out
}

/// Like [`stretch`], but writes into `out`, reusing its allocation.
pub fn stretch_into(out: &mut Vec<f64>, segment: &[f64], virtual_len: f64, exclude_peak: bool) {
    out.clear();
    let Some(last) = segment.len().checked_sub(1) else {
        return;
    };

    let len = stretched_len(virtual_len, exclude_peak);
    let step = if virtual_len > 1.0 {
        last as f64 / (virtual_len - 1.0)
    } else {
        0.0
    };

    out.reserve(len);
    out.extend((0..len).map(|x| {
        let original_x = x as f64 * step;
        let x0 = (original_x.floor() as usize).min(last);
        let x1 = (x0 + 1).min(last);
        let t = original_x - x0 as f64;

        let y0 = segment[x0];
        let y1 = segment[x1];
        y0 + t * (y1 - y0)
    }));
}
