//! Resampling several curves onto one strain axis and averaging them.
//!
//! Input files rarely share a sampling grid, so each curve's smoothed stress
//! is linearly interpolated onto a common axis running from zero to the
//! largest strain seen in any curve. Outside a curve's own strain range its
//! nearest end value is held constant.

use crate::data::model::{AveragedCurve, Curve};
use crate::error::PipelineError;

/// Number of samples on the common strain axis.
pub const COMMON_AXIS_POINTS: usize = 1000;

/// `n` equally spaced points from 0 to `max`, the last one exactly `max`.
pub fn common_axis(max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![max],
        _ => {
            let last = n - 1;
            (0..n)
                .map(|i| {
                    if i == last {
                        max
                    } else {
                        max * i as f64 / last as f64
                    }
                })
                .collect()
        }
    }
}

/// Linear interpolation of `(xs, ys)` at `target`, clamped to the end values.
///
/// `xs` must be ascending and the same length as `ys`.
pub fn interpolate_clamped(target: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let len = xs.len().min(ys.len());
    if len == 0 {
        return 0.0;
    }
    if target <= xs[0] {
        return ys[0];
    }
    if target >= xs[len - 1] {
        return ys[len - 1];
    }
    // First index with xs[i] > target; 1..len by the checks above.
    let i = xs[..len].partition_point(|&x| x <= target);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    if (x1 - x0).abs() < f64::EPSILON {
        return y1;
    }
    let frac = ((target - x0) / (x1 - x0)).clamp(0.0, 1.0);
    y0 + (y1 - y0) * frac
}

/// Resample one curve's smoothed stress onto `axis`.
pub fn resample(curve: &Curve, axis: &[f64]) -> Vec<f64> {
    let mut pairs: Vec<(f64, f64)> = curve
        .strain
        .iter()
        .copied()
        .zip(curve.smoothed.iter().copied())
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    axis.iter()
        .map(|&target| interpolate_clamped(target, &xs, &ys))
        .collect()
}

/// Average `curves` on a common strain axis of [`COMMON_AXIS_POINTS`] samples.
///
/// Empty curves are skipped. The returned curve has no fit yet.
pub fn align(curves: &[&Curve]) -> Result<AveragedCurve, PipelineError> {
    let usable: Vec<&Curve> = curves.iter().copied().filter(|c| !c.is_empty()).collect();

    let max_strain = usable
        .iter()
        .filter_map(|c| c.max_strain())
        .reduce(f64::max)
        .filter(|m| m.is_finite() && *m > 0.0)
        .ok_or(PipelineError::EmptyAlignment)?;

    let strain = common_axis(max_strain, COMMON_AXIS_POINTS);
    let mut sum = vec![0.0; strain.len()];
    for curve in &usable {
        for (acc, v) in sum.iter_mut().zip(resample(curve, &strain)) {
            *acc += v;
        }
    }
    let n_curves = usable.len();
    let avg_stress = sum.into_iter().map(|s| s / n_curves as f64).collect();

    log::debug!("Averaged {n_curves} curves up to strain {max_strain}");
    Ok(AveragedCurve {
        strain,
        avg_stress,
        n_curves,
        fit: None,
    })
}
