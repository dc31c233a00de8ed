use eframe::egui;

use super::{
    error_line,
    file_picker,
};
use crate::{
    features::{
        chatbot::{
            ChatLog,
            Chatbot,
            Role,
        },
        pdf_qa::PdfQa,
        Command,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

fn chat_log(ui: &mut egui::Ui, log: &ChatLog, theme: &Theme) {
    for message in &log.messages {
        let (speaker, color) = match message.role {
            Role::User => ("You", theme.accent(ui)),
            Role::Ai => ("AI", theme.correct(ui)),
            Role::AiError => ("AI", theme.incorrect(ui)),
        };
        ui.horizontal_wrapped(|ui| {
            ui.small(message.timestamp.format("%H:%M").to_string());
            ui.colored_label(color, egui::RichText::new(speaker).strong());
            if message.temporary {
                ui.label(egui::RichText::new(&message.text).italics().weak());
            } else if message.role == Role::AiError {
                ui.colored_label(color, &message.text);
            } else {
                ui.label(&message.text);
            }
        });
    }
}

/// A text box with a send button. Enter also sends.
fn input_row(
    ui: &mut egui::Ui,
    text: &mut String,
    hint: &str,
    button: &str,
    enabled: bool,
) -> bool {
    ui.horizontal(|ui| {
        let width = (ui.available_width() - 70.0).max(120.0);
        let edit = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(text).hint_text(hint).desired_width(width),
        );
        let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui.add_enabled(enabled, egui::Button::new(button)).clicked();
        if entered {
            edit.request_focus();
        }
        enabled && (entered || clicked)
    })
    .inner
}

pub fn chat_window(
    ctx: &egui::Context,
    chatbot: &mut Chatbot,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    if !chatbot.open {
        return;
    }

    let mut open = true;
    egui::Window::new("AI Helper")
        .open(&mut open)
        .default_size([380.0, 440.0])
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 36.0)
                .show(ui, |ui| {
                    if chatbot.log.is_empty() {
                        ui.weak("Ask anything about what you are studying.");
                    }
                    chat_log(ui, &chatbot.log, theme);
                });
            ui.separator();
            let enabled = !chatbot.waiting;
            if input_row(ui, &mut chatbot.input, "Type a message...", "Send", enabled) {
                actions.push(Command::SendChat);
            }
        });

    if !open {
        actions.push(Command::ToggleChat);
    }
}

pub fn pdf_qa(ui: &mut egui::Ui, qa: &mut PdfQa, theme: &Theme, actions: &mut ActionQueue) {
    let idle = !qa.busy();

    ui.label("Upload a PDF, then ask questions about it.");
    file_picker(ui, &mut qa.file, "PDF", &["pdf"], idle);
    if ui.add_enabled(idle, egui::Button::new("Upload & Process")).clicked() {
        actions.push(Command::UploadPdf);
    }

    if let Some(status) = &qa.status {
        ui.horizontal(|ui| {
            if qa.uploading {
                ui.spinner();
            }
            ui.label(status);
        });
    }
    if let Some(error) = &qa.error {
        error_line(ui, error);
    }

    ui.add_space(8.0);
    match &qa.active_document {
        Some(name) => {
            ui.horizontal(|ui| {
                ui.label("Active document:");
                ui.label(theme.term(ui, name));
            });
        }
        None => {
            ui.weak("No document processed yet.");
        }
    }

    ui.add_space(4.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::ScrollArea::vertical()
            .id_salt("pdf_qa_log")
            .stick_to_bottom(true)
            .max_height(260.0)
            .show(ui, |ui| chat_log(ui, &qa.log, theme));
    });

    let enabled = idle && qa.active_document.is_some();
    if input_row(ui, &mut qa.question, "Ask about the document...", "Ask", enabled) {
        actions.push(Command::AskPdf);
    }
}
