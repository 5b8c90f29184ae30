/// Data layer: CSV tables, column discovery, and numeric curve extraction.
///
/// Architecture:
/// ```text
///  raw CSV text (name row, unit row, data rows)
///        │
///        ▼
///   ┌──────────┐
///   │  table    │  parse text → RawTable, resolve two-row header → labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ columns   │  locate strain (%) and stress (MPa) by label content
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  numeric strain/stress pairs, strain as a fraction
///   └──────────┘
/// ```
///
/// `loader` is the only part that touches the filesystem; `model` holds the
/// curve types produced by the analysis pipeline.

pub mod columns;
pub mod extract;
pub mod loader;
pub mod model;
pub mod table;
