use eframe::egui;

use super::{
    generate_button,
    status_lines,
};
use crate::{
    api::types::Difficulty,
    features::{
        quiz::{
            option_letter,
            option_text,
            Outcome,
            QuizGenerator,
            QuizPhase,
            MAX_QUESTIONS,
            MIN_QUESTIONS,
            SOFT_QUESTION_LIMIT,
        },
        Command,
        Tool,
    },
    gui::{
        actions::ActionQueue,
        theme::Theme,
    },
};

pub fn show(
    ui: &mut egui::Ui,
    quiz: &mut QuizGenerator,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    ui.add(
        egui::TextEdit::multiline(&mut quiz.text)
            .hint_text("A topic or some text to be quizzed on...")
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui| {
        ui.label("Difficulty");
        let selected = quiz.difficulty.map(|d| d.label()).unwrap_or("Select...");
        egui::ComboBox::from_id_salt("quiz_difficulty")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for difficulty in Difficulty::ALL {
                    ui.selectable_value(&mut quiz.difficulty, Some(difficulty), difficulty.label());
                }
            });

        ui.add_space(12.0);
        ui.label("Questions");
        ui.add(egui::DragValue::new(&mut quiz.count).range(MIN_QUESTIONS..=MAX_QUESTIONS));
    });
    if quiz.count_is_slow() {
        ui.colored_label(
            theme.warning(ui),
            format!("More than {SOFT_QUESTION_LIMIT} questions may take a while or fail."),
        );
    }

    ui.add_space(4.0);
    generate_button(ui, "Generate Quiz", Tool::Quiz, actions);
    status_lines(ui, &quiz.view);

    if matches!(quiz.phase, QuizPhase::Ready | QuizPhase::Submitted) {
        ui.add_space(8.0);
        questions(ui, quiz, theme);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.add_enabled(quiz.can_submit(), egui::Button::new("Submit Answers")).clicked() {
                actions.push(Command::SubmitQuiz);
            }
            if ui.add_enabled(quiz.can_reveal(), egui::Button::new("Show Answers")).clicked() {
                actions.push(Command::RevealAnswers);
            }
        });

        if let Some(grade) = &quiz.grade {
            ui.add_space(4.0);
            ui.label(theme.heading(ui, &grade.summary()));
        }

        if quiz.answers_revealed {
            ui.add_space(4.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(theme.heading(ui, "Answer key"));
                for line in quiz.answer_key() {
                    ui.label(line);
                }
            });
        }
    }
}

fn questions(ui: &mut egui::Ui, quiz: &mut QuizGenerator, theme: &Theme) {
    let locked = quiz.inputs_locked();
    let mut clicked = None;

    for (qi, question) in quiz.questions.iter().enumerate() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.strong(format!("{}.", qi + 1));
                ui.label(&question.question);
            });

            let chosen = quiz.selections.get(qi).copied().flatten();
            for (oi, option) in question.options.iter().enumerate() {
                let text = format!("{}) {}", option_letter(oi), option_text(option));
                let radio = egui::RadioButton::new(chosen == Some(oi), text);
                if ui.add_enabled(!locked, radio).clicked() {
                    clicked = Some((qi, oi));
                }
            }

            if let Some(outcome) = quiz.grade.as_ref().and_then(|g| g.outcomes.get(qi)) {
                let color = match outcome {
                    Outcome::Correct => theme.correct(ui),
                    Outcome::Incorrect => theme.incorrect(ui),
                    Outcome::Unanswered => theme.muted(ui),
                };
                ui.colored_label(color, outcome.feedback(question));
            }
        });
    }

    if let Some((question, option)) = clicked {
        quiz.select(question, option);
    }
}
