//! `modulus-panda` library crate.
//!
//! Extracts elastic moduli from stress–strain CSV files and collects them
//! into named groups. The desktop viewer binary is a thin shell over this
//! library, so everything here is usable and testable without a window.

pub mod analysis;
pub mod color;
pub mod data;
pub mod error;
pub mod groups;

pub use analysis::{AnalysisSettings, BatchReport, CurveOutcome, CurveStatus, SourceFile, run_batch};
pub use data::model::{AveragedCurve, Curve, LinearFit};
pub use error::{ColumnKind, PipelineError};
pub use groups::{GroupStore, ModulusStats};
