use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LinearFit – regression over the strain window
// ---------------------------------------------------------------------------

/// Least-squares line through the in-window (strain, stress) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope in MPa per unit strain.
    pub modulus: f64,
    pub intercept: f64,
    /// Fraction of explained variance; `None` when the stress is flat to
    /// within rounding but the residuals are not.
    pub r_squared: Option<f64>,
    /// Selected strain values.
    pub fit_x: Vec<f64>,
    /// Fitted line evaluated at `fit_x`.
    pub fit_y: Vec<f64>,
}

impl LinearFit {
    /// Number of points the line was fitted through.
    pub fn n_points(&self) -> usize {
        self.fit_x.len()
    }
}

// ---------------------------------------------------------------------------
// Curve – one processed input file
// ---------------------------------------------------------------------------

/// A single stress–strain curve after extraction, smoothing and fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Originating file name.
    pub name: String,
    /// Composite header label of the strain column.
    pub strain_column: String,
    /// Composite header label of the stress column.
    pub stress_column: String,
    /// Strain as a fraction (not percent).
    pub strain: Vec<f64>,
    /// Raw stress in MPa – same length as `strain`.
    pub stress: Vec<f64>,
    /// Smoothed stress in MPa – same length as `strain`.
    pub smoothed: Vec<f64>,
    /// `None` when the strain window held fewer than two points.
    pub fit: Option<LinearFit>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }

    pub fn modulus(&self) -> Option<f64> {
        self.fit.as_ref().map(|f| f.modulus)
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.fit.as_ref().and_then(|f| f.r_squared)
    }

    /// Largest strain value, if any.
    pub fn max_strain(&self) -> Option<f64> {
        self.strain.iter().copied().reduce(f64::max)
    }

    /// The first `n` raw (strain, stress) pairs.
    pub fn preview(&self, n: usize) -> Vec<(f64, f64)> {
        self.strain
            .iter()
            .zip(&self.stress)
            .take(n)
            .map(|(&e, &s)| (e, s))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// AveragedCurve – several curves on one strain axis
// ---------------------------------------------------------------------------

/// Pointwise mean of several smoothed curves resampled onto a shared axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedCurve {
    /// Common strain axis, ascending from 0.
    pub strain: Vec<f64>,
    /// Mean resampled stress at each axis point.
    pub avg_stress: Vec<f64>,
    /// How many curves contributed to the mean.
    pub n_curves: usize,
    pub fit: Option<LinearFit>,
}

impl AveragedCurve {
    pub fn modulus(&self) -> Option<f64> {
        self.fit.as_ref().map(|f| f.modulus)
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.fit.as_ref().and_then(|f| f.r_squared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Curve {
        Curve {
            name: "a.csv".into(),
            strain_column: "Strain %".into(),
            stress_column: "Stress MPa".into(),
            strain: vec![0.0, 0.01, 0.03, 0.02],
            stress: vec![0.0, 2.0, 6.0, 4.0],
            smoothed: vec![0.0, 2.0, 6.0, 4.0],
            fit: None,
        }
    }

    #[test]
    fn max_strain_ignores_order() {
        assert_eq!(curve().max_strain(), Some(0.03));
        let empty = Curve {
            strain: vec![],
            stress: vec![],
            smoothed: vec![],
            ..curve()
        };
        assert_eq!(empty.max_strain(), None);
    }

    #[test]
    fn preview_truncates() {
        let c = curve();
        assert_eq!(c.preview(2), vec![(0.0, 0.0), (0.01, 2.0)]);
        assert_eq!(c.preview(20).len(), 4);
    }

    #[test]
    fn modulus_absent_without_fit() {
        let mut c = curve();
        assert_eq!(c.modulus(), None);
        c.fit = Some(LinearFit {
            modulus: 200.0,
            intercept: 0.0,
            r_squared: Some(1.0),
            fit_x: vec![0.0, 0.01],
            fit_y: vec![0.0, 2.0],
        });
        assert_eq!(c.modulus(), Some(200.0));
        assert_eq!(c.r_squared(), Some(1.0));
    }
}
