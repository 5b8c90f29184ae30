use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::analysis::SourceFile;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read one CSV file from disk.
///
/// The file is reported under its file name (not the full path). Only the
/// `.csv` and `.txt` extensions are accepted; contents must be UTF-8.
pub fn load_file(path: &Path) -> Result<SourceFile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {}
        other => bail!("Unsupported file extension: .{other}"),
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::info!("Loaded {name} ({} bytes)", text.len());
    Ok(SourceFile { name, text })
}

/// Read several files, keeping going past failures. Failures come back
/// alongside the successfully read files.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> (Vec<SourceFile>, Vec<anyhow::Error>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();
    for path in paths {
        match load_file(path.as_ref()) {
            Ok(file) => files.push(file),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                errors.push(e);
            }
        }
    }
    (files, errors)
}
