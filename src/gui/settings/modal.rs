use eframe::egui;
use url::Url;

use super::data::{
    SettingsData,
    DEFAULT_BACKEND_URL,
};
use crate::{
    features::Subject,
    gui::modal::{
        Modal,
        ModalResult,
    },
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Editable copy of the settings. Optional values get plain widgets here and
/// are folded back into `SettingsData` on save.
#[derive(Clone, Default)]
pub struct SettingsModalData {
    pub original_settings: SettingsData,
    backend_url: String,
    subject: Subject,
    limit_timeout: bool,
    timeout_secs: u64,
    narrator: String,
    dark_mode: bool,
    validation_error: Option<String>,
}

impl SettingsModalData {
    fn load(&mut self, settings: SettingsData) {
        self.backend_url = settings.backend_url.clone();
        self.subject = settings.subject;
        self.limit_timeout = settings.request_timeout().is_some();
        self.timeout_secs = settings.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        self.narrator = settings.narrator_command.clone().unwrap_or_default();
        self.dark_mode = settings.dark_mode;
        self.validation_error = None;
        self.original_settings = settings;
    }

    pub fn collect(&self) -> Result<SettingsData, String> {
        let backend_url = self.backend_url.trim().trim_end_matches('/').to_string();
        match Url::parse(&backend_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) | Err(_) => {
                return Err(format!("'{backend_url}' is not an http(s) address."));
            }
        }

        let narrator = self.narrator.trim();
        Ok(SettingsData {
            backend_url,
            subject: self.subject,
            request_timeout_secs: self.limit_timeout.then_some(self.timeout_secs.max(1)),
            narrator_command: (!narrator.is_empty()).then(|| narrator.to_string()),
            dark_mode: self.dark_mode,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.collect().map_or(true, |settings| settings != self.original_settings)
    }
}

pub struct SettingsModal {
    modal: Modal<SettingsModalData>,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { modal: Modal::new("Settings", SettingsModalData::default()).with_width(460.0) }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.modal.data_mut().load(current_settings);
        self.modal.open();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Returns the new settings once the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        let result = self.modal.show(ctx, |ui, data| {
            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Backend URL");
                ui.add(
                    egui::TextEdit::singleline(&mut data.backend_url)
                        .hint_text(DEFAULT_BACKEND_URL)
                        .desired_width(260.0),
                );
                ui.end_row();

                ui.label("Start page");
                egui::ComboBox::from_id_salt("settings_subject")
                    .selected_text(data.subject.title())
                    .show_ui(ui, |ui| {
                        for subject in Subject::ALL {
                            ui.selectable_value(&mut data.subject, subject, subject.title());
                        }
                    });
                ui.end_row();

                ui.label("Request timeout");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut data.limit_timeout, "Limit to");
                    ui.add_enabled(
                        data.limit_timeout,
                        egui::DragValue::new(&mut data.timeout_secs).range(1..=600).suffix(" s"),
                    );
                });
                ui.end_row();

                ui.label("Narrator command");
                ui.add(
                    egui::TextEdit::singleline(&mut data.narrator)
                        .hint_text("e.g. espeak -s 150 (quote paths with spaces)")
                        .desired_width(260.0),
                )
                .on_hover_text("Run with the text to read as its last argument");
                ui.end_row();

                ui.label("Theme");
                ui.checkbox(&mut data.dark_mode, "Dark mode");
                ui.end_row();
            });

            ui.add_space(8.0);
            if let Some(error) = &data.validation_error {
                ui.colored_label(ui.visuals().error_fg_color, error);
                ui.add_space(4.0);
            }

            ui.separator();
            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(data.is_dirty(), egui::Button::new("Save Settings")).clicked();
                let close_clicked = ui.button("Close").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    match data.collect() {
                        Ok(settings) => Some(ModalResult::Done(settings)),
                        Err(error) => {
                            data.validation_error = Some(error);
                            None
                        }
                    }
                } else if reset_clicked {
                    let original = data.original_settings.clone();
                    data.load(SettingsData::new());
                    data.original_settings = original;
                    None
                } else if close_clicked {
                    Some(ModalResult::Cancelled)
                } else {
                    None
                }
            })
            .inner
        });

        match result {
            Some(ModalResult::Done(settings)) => Some(settings),
            Some(ModalResult::Cancelled) | None => None,
        }
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
