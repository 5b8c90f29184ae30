//! Ordinary least-squares modulus fit over a strain window.

use crate::data::model::LinearFit;

/// Fit stress against strain using only points with
/// `min_strain <= strain <= max_strain`.
///
/// Returns `None` when fewer than two points fall in the window, or when
/// all selected strains coincide so no slope exists.
///
/// R² is `1 - SS_res / SS_tot`. Only when the selected stress is flat to
/// within rounding (`SS_tot <= ε·n·ȳ²`) is a fallback used: 1.0 if the
/// residuals are also within rounding, otherwise `None`.
pub fn fit(strain: &[f64], stress: &[f64], min_strain: f64, max_strain: f64) -> Option<LinearFit> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = strain
        .iter()
        .zip(stress)
        .filter(|&(&e, _)| min_strain <= e && e <= max_strain)
        .map(|(&e, &s)| (e, s))
        .unzip();

    let n = xs.len();
    log::debug!("Points in range ({min_strain}-{max_strain}): {n}");
    if n < 2 {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(&ys) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx <= 0.0 {
        return None;
    }

    let modulus = sxy / sxx;
    let intercept = mean_y - modulus * mean_x;
    let fit_y: Vec<f64> = xs.iter().map(|&x| intercept + modulus * x).collect();

    let ss_tot: f64 = ys.iter().map(|&y| (y - mean_y) * (y - mean_y)).sum();
    let ss_res: f64 = ys
        .iter()
        .zip(&fit_y)
        .map(|(&y, &f)| (y - f) * (y - f))
        .sum();
    // Rounding floor for sums of squares of values around `mean_y`.
    let zero_ss = f64::EPSILON * n as f64 * mean_y * mean_y;
    let r_squared = if ss_tot <= zero_ss {
        (ss_res <= zero_ss).then_some(1.0)
    } else {
        Some(1.0 - ss_res / ss_tot)
    };

    Some(LinearFit {
        modulus,
        intercept,
        r_squared,
        fit_x: xs,
        fit_y,
    })
}
