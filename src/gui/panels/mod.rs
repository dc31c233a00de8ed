//! One draw function per feature. Panels edit feature inputs in place and
//! push every button press onto the [`ActionQueue`].

pub mod chat;
pub mod map;
pub mod quiz;
pub mod simulations;
pub mod tools;
pub mod wheel;

use std::path::PathBuf;

use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::{
    actions::ActionQueue,
    theme::Theme,
};
use crate::{
    features::{
        display_name,
        Command,
        ResultPanel,
        Subject,
        Tool,
        Workspace,
    },
    format::{
        Block,
        Definition,
        ListKind,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tool(Tool),
    PdfQa,
    Simulations,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Tool(tool) => tool.title(),
            Section::PdfQa => "PDF Q&A",
            Section::Simulations => "Simulations",
        }
    }
}

pub fn sections(subject: Subject) -> Vec<Section> {
    let mut sections: Vec<Section> = subject.tools().into_iter().map(Section::Tool).collect();
    sections.push(Section::PdfQa);
    if !subject.simulations().is_empty() {
        sections.push(Section::Simulations);
    }
    sections
}

pub fn show_section(
    ui: &mut egui::Ui,
    workspace: &mut Workspace,
    section: Section,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    ui.heading(theme.heading(ui, section.title()));
    ui.add_space(6.0);

    match section {
        Section::Tool(Tool::Summary) => {
            tools::summary(ui, &mut workspace.summarizer, theme, actions)
        }
        Section::Tool(Tool::Visualize) => {
            tools::visualize(ui, &mut workspace.visualizer, theme, actions)
        }
        Section::Tool(Tool::Quiz) => quiz::show(ui, &mut workspace.quiz, theme, actions),
        Section::Tool(Tool::BattleFlow) => wheel::show(ui, workspace, theme, actions),
        Section::Tool(Tool::Map) => map::show(ui, &mut workspace.map, theme, actions),
        Section::Tool(Tool::Crossword) => {
            tools::crossword(ui, &mut workspace.crossword, theme, actions)
        }
        Section::Tool(Tool::Writing) => {
            tools::writing(ui, &mut workspace.writing, theme, actions)
        }
        Section::Tool(Tool::Equation) => {
            tools::equation(ui, &mut workspace.equation, theme, actions)
        }
        Section::Tool(Tool::Biology) => tools::biology(ui, &mut workspace.biology, theme, actions),
        Section::Tool(Tool::Flashcards) => {
            tools::flashcards(ui, &mut workspace.flashcards, theme, actions)
        }
        Section::PdfQa => chat::pdf_qa(ui, &mut workspace.pdf_qa, theme, actions),
        Section::Simulations => {
            simulations::show(ui, &mut workspace.simulations, workspace.subject, actions)
        }
    }
}

/// A feature error line. Every feature message is shown with the same prefix.
pub fn error_line(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(ui.visuals().error_fg_color, format!("Error: {message}"));
}

/// Sends `Generate(tool)`. Stays enabled while loading; the newest reply wins.
pub fn generate_button(ui: &mut egui::Ui, label: &str, tool: Tool, actions: &mut ActionQueue) {
    if ui.button(label).clicked() {
        actions.push(Command::Generate(tool));
    }
}

pub fn status_lines(ui: &mut egui::Ui, panel: &ResultPanel) {
    if let Some(message) = &panel.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(message);
        });
    }
    if let Some(error) = &panel.error {
        error_line(ui, error);
    }
}

/// Loading line, error line, result blocks and the read-aloud control.
pub fn result_region(
    ui: &mut egui::Ui,
    panel: &ResultPanel,
    tool: Tool,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    status_lines(ui, panel);
    if panel.result_visible {
        ui.add_space(6.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            show_blocks(ui, &panel.blocks, theme);
        });
    }
    if panel.read_aloud_visible && ui.button("🔊 Read aloud").clicked() {
        actions.push(Command::ReadAloud(tool));
    }
}

pub fn show_blocks(ui: &mut egui::Ui, blocks: &[Block], theme: &Theme) {
    for (index, block) in blocks.iter().enumerate() {
        match block {
            Block::Heading(text) => {
                ui.add_space(4.0);
                ui.label(theme.heading(ui, text));
            }
            Block::Paragraph(text) => {
                ui.label(text);
            }
            Block::List { kind, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = match kind {
                        ListKind::Bulleted => "•".to_string(),
                        ListKind::Numbered => format!("{}.", i + 1),
                    };
                    ui.horizontal_wrapped(|ui| {
                        ui.add_space(8.0);
                        ui.label(marker);
                        ui.label(item);
                    });
                }
            }
            Block::Definitions(definitions) => {
                let id = ui.id().with(("definitions", index));
                definitions_table(ui, id, definitions, theme, None);
            }
        }
    }
}

/// Term/description rows. With `read_card` set, each row gets its own
/// read-aloud button.
pub fn definitions_table(
    ui: &mut egui::Ui,
    id: egui::Id,
    definitions: &[Definition],
    theme: &Theme,
    mut read_card: Option<&mut ActionQueue>,
) {
    let row_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
        + 4.0;

    let mut table = TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder().clip(true));
    if read_card.is_some() {
        table = table.column(Column::exact(36.0));
    }

    table
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.label(theme.heading(ui, "Term"));
            });
            header.col(|ui| {
                ui.label(theme.heading(ui, "Definition"));
            });
        })
        .body(|mut body| {
            for (index, definition) in definitions.iter().enumerate() {
                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.label(theme.term(ui, &definition.term));
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(&definition.description).truncate())
                            .on_hover_text(&definition.description);
                    });
                    if let Some(actions) = read_card.as_deref_mut() {
                        row.col(|ui| {
                            if ui.small_button("🔊").on_hover_text("Read aloud").clicked() {
                                actions.push(Command::ReadFlashcard(index));
                            }
                        });
                    }
                });
            }
        });
}

/// Browse/clear controls for an optional attachment.
pub fn file_picker(
    ui: &mut egui::Ui,
    file: &mut Option<PathBuf>,
    filter_name: &str,
    extensions: &[&str],
    enabled: bool,
) {
    ui.horizontal(|ui| {
        if ui.add_enabled(enabled, egui::Button::new("Browse...")).clicked() {
            if let Some(path) =
                rfd::FileDialog::new().add_filter(filter_name, extensions).pick_file()
            {
                log::info!("[Gui] Selected file {}", path.display());
                *file = Some(path);
            }
        }
        match file.as_deref() {
            Some(path) => {
                ui.label(display_name(path));
                if ui.add_enabled(enabled, egui::Button::new("✖").small()).clicked() {
                    *file = None;
                }
            }
            None => {
                ui.weak("No file chosen");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_subject() {
        let history = sections(Subject::History);
        assert_eq!(history.first(), Some(&Section::Tool(Tool::BattleFlow)));
        assert!(history.contains(&Section::PdfQa));
        assert!(!history.contains(&Section::Simulations));

        let chemistry = sections(Subject::Chemistry);
        assert!(chemistry.contains(&Section::Tool(Tool::Equation)));
        assert_eq!(chemistry.last(), Some(&Section::Simulations));
    }
}
