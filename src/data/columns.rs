use crate::error::{ColumnKind, PipelineError};

// ---------------------------------------------------------------------------
// Label predicates
// ---------------------------------------------------------------------------

impl ColumnKind {
    /// Lowercase tokens that must all appear somewhere in a matching label.
    pub fn tokens(self) -> [&'static str; 2] {
        match self {
            ColumnKind::Strain => ["strain", "%"],
            ColumnKind::Stress => ["stress", "mpa"],
        }
    }

    /// Whether `label` names a column of this kind (case-insensitive).
    pub fn matches(self, label: &str) -> bool {
        let lower = label.to_lowercase();
        self.tokens().iter().all(|token| lower.contains(token))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of looking up one column kind among the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    Found(usize),
    NotFound(ColumnKind),
}

impl ColumnMatch {
    pub fn into_result(self) -> Result<usize, PipelineError> {
        match self {
            ColumnMatch::Found(idx) => Ok(idx),
            ColumnMatch::NotFound(kind) => Err(PipelineError::ColumnNotFound(kind)),
        }
    }
}

/// First label matching `kind`; duplicates after it are ignored.
pub fn find_column<S: AsRef<str>>(labels: &[S], kind: ColumnKind) -> ColumnMatch {
    labels
        .iter()
        .position(|label| kind.matches(label.as_ref()))
        .map_or(ColumnMatch::NotFound(kind), ColumnMatch::Found)
}

/// Column indices of the strain and stress data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub strain: usize,
    pub stress: usize,
}

/// Locate both required columns. Strain is checked first, so a header
/// missing both reports the strain column.
pub fn resolve<S: AsRef<str>>(labels: &[S]) -> Result<ResolvedColumns, PipelineError> {
    let strain = find_column(labels, ColumnKind::Strain).into_result()?;
    let stress = find_column(labels, ColumnKind::Stress).into_result()?;
    Ok(ResolvedColumns { strain, stress })
}
