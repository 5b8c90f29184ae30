use super::columns::ResolvedColumns;
use super::table::RawTable;

// ---------------------------------------------------------------------------
// Numeric extraction of the strain / stress columns
// ---------------------------------------------------------------------------

/// Paired strain (fraction) and stress (MPa) samples, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    pub strain: Vec<f64>,
    pub stress: Vec<f64>,
}

impl Samples {
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }
}

/// Parse one cell as a finite number.
pub fn coerce_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pull numeric strain/stress pairs out of the data rows.
///
/// A row is kept only when both cells are numbers; anything else (blank
/// trailing rows, annotations) is dropped. Strain is converted from percent
/// to a fraction. An empty result is valid.
pub fn extract(data: &RawTable, columns: ResolvedColumns) -> Samples {
    let mut samples = Samples::default();
    for row in 0..data.len() {
        let strain = coerce_number(data.cell(row, columns.strain));
        let stress = coerce_number(data.cell(row, columns.stress));
        if let (Some(strain_pct), Some(stress)) = (strain, stress) {
            samples.strain.push(strain_pct / 100.0);
            samples.stress.push(stress);
        }
    }
    log::debug!(
        "Extracted {} of {} data rows (strain col {}, stress col {})",
        samples.len(),
        data.len(),
        columns.strain,
        columns.stress
    );
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{parse, resolve_headers};

    fn columns(strain: usize, stress: usize) -> ResolvedColumns {
        ResolvedColumns { strain, stress }
    }

    #[test]
    fn strain_is_percent_over_hundred() {
        let table = parse("Strain,Stress\n%,MPa\n0,0\n0.5,10\n2.5,50\n").unwrap();
        let (_, data) = resolve_headers(table).unwrap();
        let samples = extract(&data, columns(0, 1));
        let raw = [0.0, 0.5, 2.5];
        for (got, pct) in samples.strain.iter().zip(raw) {
            assert_eq!(*got, pct / 100.0);
        }
        assert_eq!(samples.stress, vec![0.0, 10.0, 50.0]);
    }

    #[test]
    fn non_numeric_rows_are_dropped() {
        let text = "Strain,Stress,Note\n%,MPa,\n0.1,5,ok\nn/a,6,\n0.3,,gap\n 0.4 , 8 ,\n,,\n";
        let (_, data) = resolve_headers(parse(text).unwrap()).unwrap();
        let samples = extract(&data, columns(0, 1));
        assert!(samples.len() <= data.len());
        assert_eq!(samples.stress, vec![5.0, 8.0]);
        assert_eq!(samples.strain.len(), samples.stress.len());
    }

    #[test]
    fn short_rows_read_as_blank() {
        let text = "Note,Strain,Stress\n,%,MPa\nx,1\nx,2,20\n";
        let (_, data) = resolve_headers(parse(text).unwrap()).unwrap();
        let samples = extract(&data, columns(1, 2));
        assert_eq!(samples.stress, vec![20.0]);
    }

    #[test]
    fn header_only_table_yields_empty_samples() {
        let (_, data) = resolve_headers(parse("Strain,Stress\n%,MPa\n").unwrap()).unwrap();
        assert!(extract(&data, columns(0, 1)).is_empty());
    }

    #[test]
    fn non_finite_values_are_not_numbers() {
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number(" 1e-3 "), Some(1e-3));
    }
}
