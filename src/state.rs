use std::path::Path;

use modulus_panda::analysis::{AnalysisSettings, BatchReport, SourceFile, run_batch};
use modulus_panda::data::loader;
use modulus_panda::groups::{GroupStore, session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Analysis parameters edited in the side panel.
    pub settings: AnalysisSettings,

    /// Loaded CSV documents, in the order they were opened.
    pub sources: Vec<SourceFile>,

    /// Result of the last analysis run (None until the user runs one).
    pub report: Option<BatchReport>,

    /// Comparison groups.
    pub groups: GroupStore,

    /// Text box contents for "new group".
    pub new_group_name: String,

    /// Draw the raw (unsmoothed) curves as well.
    pub show_raw: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            settings: AnalysisSettings::default(),
            sources: Vec::new(),
            report: None,
            groups: GroupStore::new(),
            new_group_name: String::new(),
            show_raw: true,
            status_message: None,
        }
    }
}

impl AppState {
    /// Read CSV files from disk and replace the current selection.
    pub fn open_files<P: AsRef<Path>>(&mut self, paths: &[P]) {
        let (files, errors) = loader::load_files(paths);
        self.status_message = errors.first().map(|e| format!("Error: {e:#}"));
        self.sources = files;
        self.report = None;
    }

    /// Run the pipeline over the loaded files.
    pub fn run_analysis(&mut self) {
        if self.sources.is_empty() {
            self.status_message = Some("No CSVs selected.".to_string());
            return;
        }
        let report = run_batch(&self.sources, &self.settings);
        self.status_message = match report.modulus_summary() {
            Some(_) => None,
            None => Some("No valid fits.".to_string()),
        };
        self.report = Some(report);
    }

    /// Create a group from the "new group" text box.
    pub fn create_group(&mut self) {
        match self.groups.create(&self.new_group_name) {
            Ok(_) => {
                self.new_group_name.clear();
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn delete_group(&mut self, name: &str) {
        if let Err(e) = self.groups.delete(name) {
            self.status_message = Some(e.to_string());
        }
    }

    /// Record every modulus of the last run into `group`.
    pub fn assign_to_group(&mut self, group: &str) {
        let Some(report) = &self.report else {
            self.status_message = Some("Run an analysis first.".to_string());
            return;
        };
        let moduli = report.moduli();
        if moduli.is_empty() {
            self.status_message = Some("No valid fits to assign.".to_string());
            return;
        }
        match self.groups.record_moduli(group, &moduli) {
            Ok(()) => {
                log::info!("Assigned {} moduli to '{group}'", moduli.len());
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn save_session(&mut self, path: &Path) {
        if let Err(e) = session::save_to_path(&self.groups, path) {
            log::error!("Failed to save session: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    pub fn load_session(&mut self, path: &Path) {
        match session::load_from_path(&mut self.groups, path) {
            Ok(_) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to load session: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
