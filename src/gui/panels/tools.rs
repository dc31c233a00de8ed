use eframe::egui;

use super::{
    definitions_table,
    file_picker,
    generate_button,
    result_region,
    status_lines,
};
use crate::{
    features::{
        biology::ProcessExplainer,
        crossword::Crossword,
        equation::EquationBalancer,
        flashcards::Flashcards,
        summary::Summarizer,
        visualize::Visualizer,
        writing::{
            AnswerInput,
            WritingFeedback,
        },
        Tool,
        ALLOWED_UPLOAD_EXTENSIONS,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

fn multiline(ui: &mut egui::Ui, text: &mut String, hint: &str, rows: usize) {
    ui.add(
        egui::TextEdit::multiline(text)
            .hint_text(hint)
            .desired_rows(rows)
            .desired_width(f32::INFINITY),
    );
}

fn singleline(ui: &mut egui::Ui, text: &mut String, hint: &str) {
    ui.add(egui::TextEdit::singleline(text).hint_text(hint).desired_width(f32::INFINITY));
}

pub fn summary(
    ui: &mut egui::Ui,
    feature: &mut Summarizer,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    multiline(ui, &mut feature.text, "Paste the text to summarize...", 8);
    ui.label("or attach a file (.txt or .pdf):");
    file_picker(ui, &mut feature.file, "Text or PDF", &ALLOWED_UPLOAD_EXTENSIONS, true);
    ui.add_space(4.0);
    generate_button(ui, "Summarize", Tool::Summary, actions);
    result_region(ui, &feature.view, Tool::Summary, theme, actions);
}

pub fn visualize(
    ui: &mut egui::Ui,
    feature: &mut Visualizer,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    singleline(ui, &mut feature.topic, "e.g. The water cycle");
    ui.add_space(4.0);
    generate_button(ui, "Describe", Tool::Visualize, actions);
    result_region(ui, &feature.view, Tool::Visualize, theme, actions);
}

pub fn crossword(
    ui: &mut egui::Ui,
    feature: &mut Crossword,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    multiline(ui, &mut feature.text, "A topic or some text to draw words from...", 4);
    ui.add_space(4.0);
    generate_button(ui, "Suggest Words", Tool::Crossword, actions);
    result_region(ui, &feature.view, Tool::Crossword, theme, actions);
}

pub fn writing(
    ui: &mut egui::Ui,
    feature: &mut WritingFeedback,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    ui.label("Question or topic");
    singleline(ui, &mut feature.topic_question, "What are you answering?");
    ui.add_space(4.0);

    let mut input = feature.input();
    ui.horizontal(|ui| {
        ui.label("Answer as");
        ui.radio_value(&mut input, AnswerInput::Text, "Text");
        ui.radio_value(&mut input, AnswerInput::File, "File");
    });
    feature.set_input(input);

    match feature.input() {
        AnswerInput::Text => {
            multiline(ui, &mut feature.answer, "Type your answer...", 10);
        }
        AnswerInput::File => {
            let file = &mut feature.answer_file;
            file_picker(ui, file, "Text or PDF", &ALLOWED_UPLOAD_EXTENSIONS, true);
        }
    }
    ui.add_space(4.0);
    generate_button(ui, "Get Feedback", Tool::Writing, actions);
    result_region(ui, &feature.view, Tool::Writing, theme, actions);
}

pub fn equation(
    ui: &mut egui::Ui,
    feature: &mut EquationBalancer,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    singleline(ui, &mut feature.equation, "e.g. H2 + O2 -> H2O");
    ui.add_space(4.0);
    generate_button(ui, "Balance", Tool::Equation, actions);

    if feature.view.result_visible {
        if let Some(balanced) = &feature.balanced {
            ui.add_space(6.0);
            ui.label(theme.heading(ui, "Balanced equation"));
            ui.label(egui::RichText::new(balanced).monospace().size(16.0));
        }
    }
    result_region(ui, &feature.view, Tool::Equation, theme, actions);
}

pub fn biology(
    ui: &mut egui::Ui,
    feature: &mut ProcessExplainer,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    singleline(ui, &mut feature.process_name, "e.g. Photosynthesis");
    ui.add_space(4.0);
    generate_button(ui, "Explain", Tool::Biology, actions);
    result_region(ui, &feature.view, Tool::Biology, theme, actions);
}

pub fn flashcards(
    ui: &mut egui::Ui,
    feature: &mut Flashcards,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    multiline(ui, &mut feature.source_text, "A topic or notes to turn into cards...", 4);
    ui.add_space(4.0);
    generate_button(ui, "Make Flashcards", Tool::Flashcards, actions);

    status_lines(ui, &feature.view);
    if feature.view.result_visible {
        ui.add_space(6.0);
        let id = ui.id().with("flashcards");
        definitions_table(ui, id, feature.cards(), theme, Some(actions));
    }
}
