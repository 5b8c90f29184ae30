//! The batch pipeline shared by the viewer and the library API.
//!
//! Each file runs parse -> header -> columns -> extract -> smooth -> fit on
//! its own; a failure stops that file only. Files are processed in parallel
//! and reported in input order. Averaging, when requested, waits for every
//! per-file curve.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::model::{AveragedCurve, Curve, LinearFit};
use crate::data::{columns, extract, table};
use crate::error::PipelineError;
use crate::groups::ModulusStats;

use super::align::align;
use super::fit::fit;
use super::smooth::{DEFAULT_ORDER, DEFAULT_WINDOW, smooth};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One CSV document and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// User-tunable analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Lower strain bound of the fit window (fraction, inclusive).
    pub min_strain: f64,
    /// Upper strain bound of the fit window (fraction, inclusive).
    pub max_strain: f64,
    /// Smoothing window length (odd).
    pub window: usize,
    /// Smoothing polynomial degree.
    pub order: usize,
    /// Also average all curves and fit the mean curve.
    pub average: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_strain: 0.0,
            max_strain: 0.005,
            window: DEFAULT_WINDOW,
            order: DEFAULT_ORDER,
            average: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// The result for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOutcome {
    pub name: String,
    pub result: Result<Curve, PipelineError>,
}

/// What the user should be told about one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveStatus<'a> {
    Fitted(&'a LinearFit),
    /// Processed fine, but fewer than two points lay in the strain window.
    InsufficientFitData,
    Failed(&'a PipelineError),
}

impl CurveOutcome {
    pub fn status(&self) -> CurveStatus<'_> {
        match &self.result {
            Ok(curve) => match &curve.fit {
                Some(fit) => CurveStatus::Fitted(fit),
                None => CurveStatus::InsufficientFitData,
            },
            Err(e) => CurveStatus::Failed(e),
        }
    }

    pub fn curve(&self) -> Option<&Curve> {
        self.result.as_ref().ok()
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub settings: AnalysisSettings,
    /// One entry per input file, in input order.
    pub outcomes: Vec<CurveOutcome>,
    /// Present only when averaging was requested.
    pub average: Option<Result<AveragedCurve, PipelineError>>,
}

impl BatchReport {
    /// Successfully processed curves, in input order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.outcomes.iter().filter_map(CurveOutcome::curve)
    }

    /// Moduli of every fitted file, in input order.
    pub fn moduli(&self) -> Vec<f64> {
        self.curves().filter_map(Curve::modulus).collect()
    }

    /// Mean ± standard deviation over the fitted files; `None` without fits.
    pub fn modulus_summary(&self) -> Option<ModulusStats> {
        let moduli = self.moduli();
        (!moduli.is_empty()).then(|| ModulusStats::from_values(&moduli))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &PipelineError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every stage for a single file.
pub fn process_file(file: &SourceFile, settings: &AnalysisSettings) -> Result<Curve, PipelineError> {
    let raw = table::parse(&file.text)?;
    let (labels, data) = table::resolve_headers(raw)?;
    log::debug!("[{}] Available columns: {labels:?}", file.name);

    let cols = columns::resolve(&labels)?;
    let samples = extract::extract(&data, cols);
    log::debug!("[{}] Total strain points: {}", file.name, samples.len());

    // Nothing to smooth; the empty curve is reported as unfittable.
    let smoothed = if samples.is_empty() {
        Vec::new()
    } else {
        smooth(&samples.stress, settings.window, settings.order)?
    };

    let fit = fit(&samples.strain, &smoothed, settings.min_strain, settings.max_strain);
    if fit.is_none() {
        log::warn!("[{}] Not enough data in range for fitting", file.name);
    }

    Ok(Curve {
        name: file.name.clone(),
        strain_column: labels[cols.strain].clone(),
        stress_column: labels[cols.stress].clone(),
        strain: samples.strain,
        stress: samples.stress,
        smoothed,
        fit,
    })
}

/// Process a batch of files, isolating per-file failures.
pub fn run_batch(files: &[SourceFile], settings: &AnalysisSettings) -> BatchReport {
    let outcomes: Vec<CurveOutcome> = files
        .par_iter()
        .map(|file| {
            let result = process_file(file, settings);
            if let Err(e) = &result {
                log::warn!("[{}] {e}", file.name);
            }
            CurveOutcome {
                name: file.name.clone(),
                result,
            }
        })
        .collect();

    let average = settings.average.then(|| {
        let curves: Vec<&Curve> = outcomes.iter().filter_map(CurveOutcome::curve).collect();
        align(&curves).map(|mut avg| {
            avg.fit = fit(&avg.strain, &avg.avg_stress, settings.min_strain, settings.max_strain);
            avg
        })
    });

    log::info!(
        "Analysed {} file(s): {} fitted",
        outcomes.len(),
        outcomes
            .iter()
            .filter(|o| matches!(o.status(), CurveStatus::Fitted(_)))
            .count()
    );

    BatchReport {
        settings: *settings,
        outcomes,
        average,
    }
}
