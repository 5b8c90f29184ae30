use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Which of the two required columns could not be located in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Strain,
    Stress,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Strain => write!(f, "strain (%)"),
            ColumnKind::Stress => write!(f, "stress (MPa)"),
        }
    }
}

/// Hard failures of a pipeline stage.
///
/// Running out of points inside the fit window is deliberately absent: the
/// fitter returns `None` for that case and the curve is still reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("no parsable CSV rows")]
    MalformedInput,

    #[error("expected a name row and a unit row, found {found} row(s)")]
    InsufficientRows { found: usize },

    #[error("no {0} column in header")]
    ColumnNotFound(ColumnKind),

    #[error("invalid smoothing window {window} (order {order}, {len} samples): window must be odd, larger than the order and no longer than the data")]
    InvalidWindow {
        window: usize,
        order: usize,
        len: usize,
    },

    #[error("no curve with positive strain to average")]
    EmptyAlignment,
}
