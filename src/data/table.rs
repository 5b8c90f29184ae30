use csv::ReaderBuilder;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// RawTable – rows of string cells, ragged rows allowed
// ---------------------------------------------------------------------------

/// A CSV document as rows of untyped cells.
///
/// Rows may differ in length; a missing cell reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        RawTable { rows }
    }

    /// Cell text at `(row, col)`, or `""` when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into a [`RawTable`].
///
/// Standard quoting applies, so quoted cells may contain commas and newlines.
/// Blank lines are skipped and no column count is enforced. Records the CSV
/// reader rejects are dropped; only a document with no usable record at all
/// is an error.
pub fn parse(text: &str) -> Result<RawTable, PipelineError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (record_no, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => log::warn!("Skipping unreadable CSV record {record_no}: {e}"),
        }
    }

    if rows.is_empty() {
        return Err(PipelineError::MalformedInput);
    }
    Ok(RawTable::new(rows))
}

// ---------------------------------------------------------------------------
// Two-row header block
// ---------------------------------------------------------------------------

/// Build the composite label for one column from its name and unit cells.
pub fn column_label(name: &str, unit: &str) -> String {
    let name = name.trim();
    let unit = unit.trim();
    if unit.is_empty() {
        name.to_string()
    } else {
        format!("{name} {unit}").trim().to_string()
    }
}

/// Split a table into composite column labels and the data rows beneath.
///
/// Row 0 holds column names, row 1 their units, everything after is data.
pub fn resolve_headers(table: RawTable) -> Result<(Vec<String>, RawTable), PipelineError> {
    if table.len() < 2 {
        return Err(PipelineError::InsufficientRows { found: table.len() });
    }

    let width = table.rows[0].len().max(table.rows[1].len());
    let labels: Vec<String> = (0..width)
        .map(|col| column_label(table.cell(0, col), table.cell(1, col)))
        .collect();

    let data = RawTable::new(table.rows.into_iter().skip(2).collect());
    Ok((labels, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_ragged_rows() {
        let table = parse("a,b,c\n1,2\n3,4,5,6\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[1], vec!["1", "2"]);
        assert_eq!(table.rows[2].len(), 4);
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(9, 0), "");
        assert_eq!(table.width(), 4);
    }

    #[test]
    fn parse_handles_quoted_newlines_and_blank_lines() {
        let text = "\"Tensile\nstrain\",Stress\n\n%,MPa\n\n1,2\n";
        let table = parse(text).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, 0), "Tensile\nstrain");
        assert_eq!(table.cell(1, 1), "MPa");
    }

    #[test]
    fn parse_strips_byte_order_mark() {
        let table = parse("\u{feff}Strain,Stress\n%,MPa\n").unwrap();
        assert_eq!(table.cell(0, 0), "Strain");
    }

    #[test]
    fn parse_rejects_empty_text() {
        assert_eq!(parse(""), Err(PipelineError::MalformedInput));
        assert_eq!(parse("\n\n"), Err(PipelineError::MalformedInput));
    }

    #[test]
    fn labels_join_name_and_unit() {
        assert_eq!(column_label(" Tensile strain ", " % "), "Tensile strain %");
        assert_eq!(column_label("Time", "   "), "Time");
        assert_eq!(column_label("", "MPa"), "MPa");
    }

    #[test]
    fn resolve_headers_splits_data_rows() {
        let table = parse("Time,Strain,Stress\ns,%,\n0,0,0\n1,0.5,10\n").unwrap();
        let (labels, data) = resolve_headers(table).unwrap();
        assert_eq!(labels, vec!["Time s", "Strain %", "Stress"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.cell(1, 2), "10");
    }

    #[test]
    fn resolve_headers_uses_widest_header_row() {
        let table = parse("Strain\n%,MPa\n").unwrap();
        let (labels, data) = resolve_headers(table).unwrap();
        assert_eq!(labels, vec!["Strain %", "MPa"]);
        assert!(data.is_empty());
    }

    #[test]
    fn resolve_headers_requires_two_rows() {
        let table = parse("Strain,Stress\n").unwrap();
        assert_eq!(
            resolve_headers(table),
            Err(PipelineError::InsufficientRows { found: 1 })
        );
    }
}
