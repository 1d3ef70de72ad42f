use std::path::Path;

use eframe::egui::{self, Color32, RichText};
use tactic_tagger_common::{Table, DOWNLOAD_FILE_NAME};

use crate::io::save_bytes;
use crate::model::AppState;

/// Rows rendered in the table view.
const PREVIEW_ROWS: usize = 200;

#[derive(Default)]
pub struct DesktopApp {
    state: AppState,
    status: String,
    error: bool,
}

impl DesktopApp {
    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.error = true;
    }

    fn open_table(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Table", &["csv", "txt", "xlsx", "xlsm", "xls", "ods"])
            .pick_file()
        {
            self.load_from_path(&path);
        }
    }

    fn load_from_path(&mut self, path: &Path) {
        match self.state.load_file(path) {
            Ok(rows) => {
                tracing::info!(path = %path.display(), rows, "table loaded");
                let name = self.state.session.source_name().unwrap_or("upload").to_string();
                self.set_status(format!("Loaded {name} ({rows} rows)"));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "load failed: {:#}", err);
                self.set_error(format!("Load failed: {err:#}"));
            }
        }
    }

    fn classify(&mut self) {
        let summary = self.state.session.summary();
        match self.state.session.classify() {
            Ok(result) => {
                let rows = result.len();
                tracing::info!(rows, "classified");
                self.state.summary = summary.ok();
                self.set_status(format!("Classified {rows} rows"));
            }
            Err(err) => self.set_error(format!("Classify failed: {err}")),
        }
    }

    fn save_result(&mut self) {
        let bytes = match self.state.session.download_csv() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.set_error(format!("Save failed: {err}"));
                return;
            }
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(DOWNLOAD_FILE_NAME)
            .save_file()
        {
            match save_bytes(&path, &bytes) {
                Ok(_) => {
                    tracing::info!(path = %path.display(), bytes = bytes.len(), "result saved");
                    self.set_status(format!("Saved {}", path.display()));
                }
                Err(err) => self.set_error(format!("Save failed: {err:#}")),
            }
        }
    }

    fn render_dictionaries(&mut self, ui: &mut egui::Ui) {
        self.state.sync_drafts();
        let labels: Vec<String> = self
            .state
            .session
            .store()
            .labels()
            .into_iter()
            .map(String::from)
            .collect();

        let mut remove: Option<String> = None;
        for label in &labels {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Remove").clicked() {
                        remove = Some(label.clone());
                    }
                });
            });
            if let Some(text) = self.state.drafts.get_mut(label) {
                ui.add(
                    egui::TextEdit::multiline(text)
                        .desired_rows(2)
                        .desired_width(f32::INFINITY)
                        .hint_text("comma-separated keywords"),
                );
            }
            ui.add_space(6.0);
        }
        self.state.apply_drafts();

        if let Some(label) = remove {
            self.state.remove_category(&label);
            self.set_status(format!("Removed {label}"));
        }

        ui.separator();
        ui.label(RichText::new("Add category").strong());
        ui.add(egui::TextEdit::singleline(&mut self.state.new_label).hint_text("label"));
        ui.add(
            egui::TextEdit::multiline(&mut self.state.new_keywords)
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .hint_text("comma-separated keywords"),
        );
        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                let label = self.state.new_label.trim().to_string();
                if self.state.add_category() {
                    self.set_status(format!("Added {label}"));
                }
            }
            if ui.button("Reset to defaults").clicked() {
                self.state.reset_categories();
                self.set_status("Categories reset to defaults");
            }
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                self.open_table();
            }

            let columns: Vec<String> = self
                .state
                .session
                .columns()
                .into_iter()
                .map(String::from)
                .collect();
            let mut selected = self.state.session.selected_column().map(String::from);
            let previous = selected.clone();
            ui.add_enabled_ui(!columns.is_empty(), |ui| {
                egui::ComboBox::from_label("Column")
                    .selected_text(selected.as_deref().unwrap_or("Select…"))
                    .show_ui(ui, |ui| {
                        for column in &columns {
                            ui.selectable_value(&mut selected, Some(column.clone()), column);
                        }
                    });
            });
            if selected != previous {
                if let Some(column) = selected {
                    if let Err(err) = self.state.select_column(&column) {
                        self.set_error(format!("{err}"));
                    }
                }
            }

            let can_classify = self.state.session.table().is_some()
                && self.state.session.selected_column().is_some();
            if ui.add_enabled(can_classify, egui::Button::new("Classify")).clicked() {
                self.classify();
            }

            let can_save = self.state.session.result().is_some();
            if ui.add_enabled(can_save, egui::Button::new("Save CSV…")).clicked() {
                self.save_result();
            }
        });
    }

    fn render_summary(&self, ui: &mut egui::Ui) {
        let Some(summary) = &self.state.summary else {
            return;
        };
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("Tagged {}/{}", summary.tagged_rows, summary.total_rows));
            for (label, count) in &summary.per_label {
                ui.label(RichText::new(format!("{label}: {count}")).color(Color32::from_gray(170)));
            }
        });
    }
}

fn render_table(ui: &mut egui::Ui, table: &Table) {
    ui.label(format!("{} rows", table.len()));
    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        egui::Grid::new("table_view").striped(true).show(ui, |ui| {
            for header in table.headers() {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for row in table.rows().iter().take(PREVIEW_ROWS) {
                for cell in row {
                    ui.label(cell.to_string());
                }
                ui.end_row();
            }
        });
        if table.len() > PREVIEW_ROWS {
            ui.label(format!("… {} more rows", table.len() - PREVIEW_ROWS));
        }
    });
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let color = if self.error {
                Color32::from_rgb(230, 90, 90)
            } else {
                Color32::from_gray(170)
            };
            ui.label(RichText::new(&self.status).color(color));
        });

        egui::SidePanel::left("dictionaries")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Categories");
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_dictionaries(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.session.source_name().unwrap_or("No file loaded"));
            self.render_controls(ui);
            self.render_summary(ui);
            ui.separator();

            let session = &self.state.session;
            match session.result().or(session.table()) {
                Some(table) => render_table(ui, table),
                None => {
                    ui.label("Open a CSV file to start.");
                }
            }
        });
    }
}
