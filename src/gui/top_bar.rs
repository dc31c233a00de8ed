use eframe::egui::{
    self,
    containers,
};

use crate::features::Subject;

pub enum TopBarAction {
    SwitchSubject(Subject),
    OpenSettings,
    ToggleChat,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        current: Subject,
        chat_open: bool,
        backend_url: &str,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Settings").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Subject", |ui| {
                    for subject in Subject::ALL {
                        if ui.radio(subject == current, subject.title()).clicked()
                            && subject != current
                        {
                            action = Some(TopBarAction::SwitchSubject(subject));
                        }
                    }
                });

                let chat_label = if chat_open { "Close AI Helper" } else { "AI Helper" };
                if ui.selectable_label(chat_open, chat_label).clicked() {
                    action = Some(TopBarAction::ToggleChat);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(backend_url).on_hover_text("Backend in use");
                    ui.small(egui::RichText::new(current.title()).strong());
                });
            });
        });

        action
    }
}
