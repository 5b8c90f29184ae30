//! Named groups of moduli for side-by-side comparison.
//!
//! `GroupStore` is the only owner of group state; every mutation goes
//! through `&mut self`, so a summary can never observe a half-applied
//! update. `session` converts the store to and from its JSON document.

pub mod session;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::group_color;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Count, mean and sample standard deviation of a set of moduli.
///
/// No values gives mean 0 and stddev 0; a single value gives stddev 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModulusStats {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
}

impl ModulusStats {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return ModulusStats::default();
        }
        let mean = values.iter().sum::<f64>() / count as f64;
        let stddev = if count < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        ModulusStats { count, mean, stddev }
    }
}

// ---------------------------------------------------------------------------
// Group / GroupStore
// ---------------------------------------------------------------------------

/// One comparison group: display colour and every modulus assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// `#rrggbb`.
    pub color: String,
    pub moduli: Vec<f64>,
}

/// Per-group summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub color: String,
    pub stats: ModulusStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("group name is empty")]
    EmptyName,
    #[error("group '{0}' already exists")]
    Duplicate(String),
    #[error("no group named '{0}'")]
    Unknown(String),
    #[error("modulus {0} is not a finite number")]
    NonFinite(String),
}

/// All groups, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: BTreeMap<String, Group>,
    /// Palette slot for the next created group.
    next_color: usize,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty group with the next palette colour.
    pub fn create(&mut self, name: &str) -> Result<&Group, GroupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }
        if self.groups.contains_key(name) {
            return Err(GroupError::Duplicate(name.to_string()));
        }
        let group = Group {
            color: self.next_free_color(),
            moduli: Vec::new(),
        };
        log::info!("Created group '{name}' ({})", group.color);
        Ok(self.groups.entry(name.to_string()).or_insert(group))
    }

    /// Next palette colour not already held by a group (loaded sessions may
    /// carry any colours).
    fn next_free_color(&mut self) -> String {
        loop {
            let color = group_color(self.next_color);
            self.next_color += 1;
            if !self.groups.values().any(|g| g.color.eq_ignore_ascii_case(&color)) {
                return color;
            }
        }
    }

    /// Remove a group and return it.
    pub fn delete(&mut self, name: &str) -> Result<Group, GroupError> {
        self.groups
            .remove(name)
            .ok_or_else(|| GroupError::Unknown(name.to_string()))
    }

    /// Append one modulus to an existing group.
    pub fn record_modulus(&mut self, name: &str, value: f64) -> Result<(), GroupError> {
        self.record_moduli(name, &[value])
    }

    /// Append several moduli; nothing is recorded if any value is rejected.
    pub fn record_moduli(&mut self, name: &str, values: &[f64]) -> Result<(), GroupError> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(GroupError::NonFinite(bad.to_string()));
        }
        let group = self
            .groups
            .get_mut(name)
            .ok_or_else(|| GroupError::Unknown(name.to_string()))?;
        group.moduli.extend_from_slice(values);
        log::debug!("Recorded {} moduli into '{name}'", values.len());
        Ok(())
    }

    /// Swap in a complete new mapping, e.g. from a loaded session.
    pub fn replace_all(&mut self, groups: BTreeMap<String, Group>) {
        self.groups = groups;
    }

    /// Mean and standard deviation per group.
    pub fn summary(&self) -> BTreeMap<String, GroupSummary> {
        self.groups
            .iter()
            .map(|(name, g)| {
                let summary = GroupSummary {
                    color: g.color.clone(),
                    stats: ModulusStats::from_values(&g.moduli),
                };
                (name.clone(), summary)
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    pub fn names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_conventions_for_small_groups() {
        assert_eq!(ModulusStats::from_values(&[]), ModulusStats::default());
        let one = ModulusStats::from_values(&[250.0]);
        assert_eq!((one.count, one.mean, one.stddev), (1, 250.0, 0.0));
    }

    #[test]
    fn stats_use_sample_deviation() {
        let s = ModulusStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.stddev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn create_assigns_distinct_colors() {
        let mut store = GroupStore::new();
        let a = store.create("PLA").unwrap().color.clone();
        let b = store.create("PETG").unwrap().color.clone();
        assert_ne!(a, b);
        assert!(a.starts_with('#') && a.len() == 7);
        assert_eq!(store.names(), vec!["PETG", "PLA"]);
    }

    #[test]
    fn create_rejects_blank_and_duplicate_names() {
        let mut store = GroupStore::new();
        assert_eq!(store.create("  ").unwrap_err(), GroupError::EmptyName);
        store.create("A").unwrap();
        assert_eq!(
            store.create(" A ").unwrap_err(),
            GroupError::Duplicate("A".into())
        );
    }

    #[test]
    fn record_and_summarise() {
        let mut store = GroupStore::new();
        store.create("A").unwrap();
        store.create("empty").unwrap();
        store.record_modulus("A", 100.0).unwrap();
        store.record_moduli("A", &[200.0, 300.0]).unwrap();

        let summary = store.summary();
        let a = &summary["A"].stats;
        assert_eq!(a.count, 3);
        assert!((a.mean - 200.0).abs() < 1e-12);
        assert!((a.stddev - 100.0).abs() < 1e-12);
        let empty = &summary["empty"].stats;
        assert_eq!((empty.mean, empty.stddev), (0.0, 0.0));
    }

    #[test]
    fn new_groups_avoid_colors_of_loaded_groups() {
        let loaded: BTreeMap<String, Group> = (0..3)
            .map(|i| {
                let group = Group {
                    color: group_color(i).to_uppercase(),
                    moduli: vec![],
                };
                (format!("loaded{i}"), group)
            })
            .collect();
        let mut store = GroupStore::new();
        store.replace_all(loaded);

        let fresh = store.create("fresh").unwrap().color.clone();
        assert_eq!(fresh, group_color(3));
    }

    #[test]
    fn record_into_unknown_group_fails() {
        let mut store = GroupStore::new();
        assert_eq!(
            store.record_modulus("nope", 1.0),
            Err(GroupError::Unknown("nope".into()))
        );
    }

    #[test]
    fn rejected_batch_leaves_group_untouched() {
        let mut store = GroupStore::new();
        store.create("A").unwrap();
        assert!(store.record_moduli("A", &[1.0, f64::NAN]).is_err());
        assert!(store.get("A").unwrap().moduli.is_empty());
    }

    #[test]
    fn delete_and_replace() {
        let mut store = GroupStore::new();
        store.create("A").unwrap();
        assert!(store.delete("A").is_ok());
        assert_eq!(store.delete("A"), Err(GroupError::Unknown("A".into())));

        let mut replacement = BTreeMap::new();
        replacement.insert(
            "B".to_string(),
            Group {
                color: "#112233".into(),
                moduli: vec![1.0],
            },
        );
        store.replace_all(replacement);
        assert_eq!(store.names(), vec!["B"]);
        assert_eq!(store.len(), 1);
    }
}
