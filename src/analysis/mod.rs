//! Curve processing: smoothing, alignment, modulus fitting, and the batch
//! pipeline tying them to the data layer.
//!
//! ```text
//! text ─▶ table ─▶ columns ─▶ extract ─▶ smooth ─┬─▶ fit            (per file)
//!                                                └─▶ align ─▶ fit    (averaged)
//! ```

pub mod align;
pub mod fit;
pub mod pipeline;
pub mod smooth;

pub use pipeline::{
    AnalysisSettings, BatchReport, CurveOutcome, CurveStatus, SourceFile, process_file, run_batch,
};
