use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tactic_tagger_common::{Session, TagSummary};

use crate::io::load_table_file;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    /// Raw editor text per category, kept only for labels present in the store.
    pub drafts: HashMap<String, String>,
    pub new_label: String,
    pub new_keywords: String,
    pub summary: Option<TagSummary>,
}

impl AppState {
    /// Drop drafts of removed labels and seed drafts of new ones from the store.
    pub fn sync_drafts(&mut self) {
        let store = self.session.store();
        self.drafts.retain(|label, _| store.contains(label));
        for label in store.labels() {
            if !self.drafts.contains_key(label) {
                let text = store.keywords_text(label).unwrap_or_default();
                self.drafts.insert(label.to_string(), text);
            }
        }
    }

    /// Re-apply every editor to the store.
    pub fn apply_drafts(&mut self) {
        let edits = self.drafts.iter().map(|(l, t)| (l.as_str(), t.as_str()));
        self.session.store_mut().apply_edits(edits);
    }

    /// Load a table file into the session. Any failure drops the previous
    /// table, result and summary.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        self.summary = None;
        let table = match load_table_file(path) {
            Ok(table) => table,
            Err(err) => {
                self.session.clear_table();
                return Err(err);
            }
        };
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(self.session.load_table(&name, table)?.len())
    }

    /// Switch the target column; a summary of another column is dropped.
    pub fn select_column(&mut self, column: &str) -> Result<()> {
        if self.session.selected_column() != Some(column) {
            self.summary = None;
        }
        self.session.select_column(column)?;
        Ok(())
    }

    pub fn add_category(&mut self) -> bool {
        let label = self.new_label.trim().to_string();
        if !self.session.store_mut().add_or_update(&label, &self.new_keywords) {
            return false;
        }
        self.drafts.remove(&label);
        self.new_label.clear();
        self.new_keywords.clear();
        true
    }

    pub fn remove_category(&mut self, label: &str) {
        self.session.store_mut().remove(label);
        self.drafts.remove(label);
    }

    pub fn reset_categories(&mut self) {
        self.session.reset_dictionaries();
        self.drafts.clear();
    }
}
