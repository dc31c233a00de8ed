use eframe::egui;

#[derive(Default, Clone)]
struct ErrorData {
    title: String,
    message: String,
    details: Option<String>,
}

/// Blocking dialog for application-level failures. Feature errors render in
/// their own panels instead.
#[derive(Default)]
pub struct ErrorModal {
    queue: Vec<ErrorData>,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error; errors raised while one is showing wait their turn.
    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<impl Into<String>>,
    ) {
        let data = ErrorData {
            title: title.into(),
            message: message.into(),
            details: details.map(Into::into),
        };
        log::error!("[Error] {}: {}", data.title, data.message);
        self.queue.push(data);
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Returns true on the frame the current error is dismissed.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let Some(data) = self.queue.first() else {
            return false;
        };

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("⚠").size(22.0).color(ui.visuals().error_fg_color),
                );
                ui.label(egui::RichText::new(&data.title).size(17.0).strong());
            });

            ui.add_space(8.0);
            ui.label(&data.message);

            if let Some(details) = &data.details {
                ui.add_space(8.0);
                ui.collapsing("Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(3)
                            .code_editor(),
                    );
                    if ui.small_button("Copy").clicked() {
                        ui.ctx().copy_text(details.clone());
                    }
                });
            }

            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.queue.remove(0);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_queue_in_order() {
        let mut modal = ErrorModal::new();
        assert!(!modal.is_open());

        modal.show_error("Narrator", "espeak not found", None::<String>);
        modal.show_error("Browser", "no handler", Some("xdg-open exited with 3"));
        assert!(modal.is_open());
        assert_eq!(modal.queue[0].title, "Narrator");
        assert_eq!(modal.queue[1].details.as_deref(), Some("xdg-open exited with 3"));
    }
}
