//! Local polynomial (Savitzky–Golay) smoothing.
//!
//! Every output point is the value at that position of a least-squares
//! polynomial of degree `order` fitted to `window` consecutive samples.
//! Interior points use a centred window. Near either end the window is
//! shifted inward so it stays inside the data, and the polynomial is
//! evaluated off-centre; the ends are never padded.
//!
//! All window positions share one projection ("hat") matrix
//! `H = A (AᵀA)⁻¹ Aᵀ`, where `A` is the Vandermonde matrix of the window
//! offsets. Row `r` of `H` holds the weights for evaluating at offset `r`.

use nalgebra::DMatrix;

use crate::error::PipelineError;

/// Default number of samples per smoothing window.
pub const DEFAULT_WINDOW: usize = 11;

/// Default polynomial degree.
pub const DEFAULT_ORDER: usize = 2;

/// Check the window against the order and the data length.
pub fn validate_window(window: usize, order: usize, len: usize) -> Result<(), PipelineError> {
    if window % 2 == 0 || window <= order || window > len {
        return Err(PipelineError::InvalidWindow { window, order, len });
    }
    Ok(())
}

/// Projection matrix mapping `window` samples to the fitted values at every
/// offset inside the window.
fn projection_weights(window: usize, order: usize) -> Option<DMatrix<f64>> {
    let half = (window / 2) as f64;
    // Offsets scaled into [-1, 1] keep AᵀA well conditioned.
    let scale = half.max(1.0);
    let a = DMatrix::from_fn(window, order + 1, |r, c| {
        ((r as f64 - half) / scale).powi(c as i32)
    });
    let gram_inv = (a.transpose() * &a).try_inverse()?;
    Some(&a * gram_inv * a.transpose())
}

/// Smooth `values`, returning a sequence of the same length.
pub fn smooth(values: &[f64], window: usize, order: usize) -> Result<Vec<f64>, PipelineError> {
    let n = values.len();
    validate_window(window, order, n)?;
    let weights = projection_weights(window, order)
        .ok_or(PipelineError::InvalidWindow { window, order, len: n })?;

    let half = window / 2;
    let smoothed: Vec<f64> = (0..n)
        .map(|i| {
            let start = i.saturating_sub(half).min(n - window);
            let offset = i - start;
            (0..window)
                .map(|k| weights[(offset, k)] * values[start + k])
                .sum::<f64>()
        })
        .collect();
    Ok(smoothed)
}
