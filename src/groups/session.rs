use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Group, GroupStore};

// ---------------------------------------------------------------------------
// Session document
// ---------------------------------------------------------------------------

/// Expected JSON shape:
///
/// ```json
/// {
///   "PLA":  { "color": "#e2413f", "moduli": [2210.5, 2304.1] },
///   "PETG": { "color": "#3fe27d", "moduli": [] }
/// }
/// ```
pub type SessionDocument = BTreeMap<String, Group>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("group '{group}': {reason}")]
    Invalid { group: String, reason: String },
}

/// Serialise every group to pretty-printed JSON.
pub fn to_json(store: &GroupStore) -> Result<String, SessionError> {
    Ok(serde_json::to_string_pretty(store.groups())?)
}

/// Parse and validate a session document without touching any store.
///
/// Entries missing `color` or `moduli` fail to deserialise; blank names,
/// blank colours and non-finite moduli are rejected afterwards.
pub fn from_json(text: &str) -> Result<SessionDocument, SessionError> {
    let doc: SessionDocument = serde_json::from_str(text)?;
    for (name, group) in &doc {
        let invalid = |reason: &str| SessionError::Invalid {
            group: name.clone(),
            reason: reason.to_string(),
        };
        if name.trim().is_empty() {
            return Err(invalid("group name is empty"));
        }
        if group.color.trim().is_empty() {
            return Err(invalid("color is empty"));
        }
        if group.moduli.iter().any(|v| !v.is_finite()) {
            return Err(invalid("moduli contain a non-finite value"));
        }
    }
    Ok(doc)
}

/// Replace the store's groups with a validated document.
pub fn load_str(store: &mut GroupStore, text: &str) -> Result<usize, SessionError> {
    let doc = from_json(text)?;
    let n = doc.len();
    store.replace_all(doc);
    Ok(n)
}

/// Write the session file.
pub fn save_to_path(store: &GroupStore, path: &Path) -> Result<()> {
    let json = to_json(store).context("serialising session")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing session file {}", path.display()))?;
    log::info!("Saved {} groups to {}", store.len(), path.display());
    Ok(())
}

/// Read a session file and replace the store's groups with it. The store is
/// left untouched on any error.
pub fn load_from_path(store: &mut GroupStore, path: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading session file {}", path.display()))?;
    let n = load_str(store, &text)
        .with_context(|| format!("loading session file {}", path.display()))?;
    log::info!("Loaded {n} groups from {}", path.display());
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> GroupStore {
        let mut store = GroupStore::new();
        store.create("PLA").unwrap();
        store.create("PETG").unwrap();
        store.record_moduli("PLA", &[2210.5, 2304.25]).unwrap();
        store
    }

    #[test]
    fn round_trip_preserves_groups() {
        let store = sample_store();
        let json = to_json(&store).unwrap();

        let mut loaded = GroupStore::new();
        assert_eq!(load_str(&mut loaded, &json).unwrap(), 2);
        assert_eq!(loaded.groups(), store.groups());
    }

    #[test]
    fn document_shape_is_name_to_color_and_moduli() {
        let json = to_json(&sample_store()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let pla = &value["PLA"];
        assert!(pla["color"].is_string());
        assert_eq!(pla["moduli"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            from_json(r##"{"A": {"moduli": [1.0]}}"##),
            Err(SessionError::Parse(_))
        ));
        assert!(matches!(
            from_json(r##"{"A": {"color": "#000000"}}"##),
            Err(SessionError::Parse(_))
        ));
        assert!(matches!(
            from_json(r##"{"A": {"color": " ", "moduli": []}}"##),
            Err(SessionError::Invalid { .. })
        ));
    }

    #[test]
    fn failed_load_keeps_existing_groups() {
        let mut store = sample_store();
        assert!(load_str(&mut store, r##"{"X": {"color": "#fff"}}"##).is_err());
        assert_eq!(store.names(), vec!["PETG", "PLA"]);
    }

    #[test]
    fn save_and_load_through_a_file() {
        let path = std::env::temp_dir().join(format!(
            "modulus-panda-session-{}.json",
            std::process::id()
        ));
        let store = sample_store();
        save_to_path(&store, &path).unwrap();

        let mut loaded = GroupStore::new();
        assert_eq!(load_from_path(&mut loaded, &path).unwrap(), 2);
        assert_eq!(loaded.groups(), store.groups());
        let _ = std::fs::remove_file(&path);
    }
}
