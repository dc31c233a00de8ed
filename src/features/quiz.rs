//! Quiz generation and grading.
//!
//! The quiz moves through `Idle -> Loading -> {Error | Ready} -> Submitted`.
//! Grading compares each selection to the answer letter case-insensitively and
//! keeps unanswered questions apart from wrong ones.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{
    decode,
    non_blank,
    Effect,
    PanelView,
    RequestFeature,
    ResultPanel,
    Subject,
    Submission,
};
use crate::{
    api::{
        types::{
            Difficulty,
            QuizAttempt,
            QuizRequest,
            QuizResponse,
            SaveAttemptResponse,
            Question,
        },
        Endpoint,
        RequestBody,
    },
    core::{
        RequestFailure,
        StudyError,
    },
};

pub const MIN_QUESTIONS: u32 = 3;
pub const MAX_QUESTIONS: u32 = 100;
/// Counts above this are allowed but slow to generate.
pub const SOFT_QUESTION_LIMIT: u32 = 20;
pub const DEFAULT_QUESTIONS: u32 = 5;

pub const COUNT_MESSAGE: &str = "Please enter a valid number of questions (e.g., 3-20). Requesting very large numbers may take time or fail.";
pub const MALFORMED_QUIZ_MESSAGE: &str =
    "Failed to generate a valid quiz. The AI response might be empty or malformed.";
pub const INVALID_ANSWER_KEY: &str = "[Invalid Answer Key]";
pub const MISSING_OPTION_TEXT: &str = "[Missing Option Text]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Idle,
    Loading,
    Error,
    Ready,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

impl Outcome {
    /// Feedback line under a graded question. Misses name the right letter.
    pub fn feedback(&self, question: &Question) -> String {
        let label = match self {
            Outcome::Correct => return "Correct".to_string(),
            Outcome::Incorrect => "Incorrect",
            Outcome::Unanswered => "Unanswered",
        };
        match correct_letter(question) {
            Some(letter) => format!("{label}. Correct answer was: {letter}"),
            None => format!("{label}. Correct answer was: {INVALID_ANSWER_KEY}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub outcomes: Vec<Outcome>,
    pub score: usize,
    pub total: usize,
}

impl Grade {
    pub fn unanswered(&self) -> usize {
        self.outcomes.iter().filter(|o| **o == Outcome::Unanswered).count()
    }

    pub fn summary(&self) -> String {
        let mut text = format!("You scored {} out of {}.", self.score, self.total);
        match self.unanswered() {
            0 => {}
            1 => text.push_str(" (1 question was unanswered.)"),
            n => text.push_str(&format!(" ({n} questions were unanswered.)")),
        }
        text
    }
}

pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Option text as shown to the user.
pub fn option_text(text: &str) -> &str {
    if text.trim().is_empty() {
        MISSING_OPTION_TEXT
    } else {
        text
    }
}

/// Only the first character of the key counts, so "B)" and "b. two" both mean B.
fn answer_letter(question: &Question) -> Option<char> {
    let letter = question.correct_answer.trim().chars().next()?.to_ascii_uppercase();
    letter.is_ascii_uppercase().then_some(letter)
}

fn answer_index(question: &Question) -> Option<usize> {
    let index = (answer_letter(question)? as u8 - b'A') as usize;
    (index < question.options.len()).then_some(index)
}

/// The letter of the right option, if the key points at one.
pub fn correct_letter(question: &Question) -> Option<char> {
    answer_index(question).map(option_letter)
}

pub fn grade(questions: &[Question], selections: &[Option<usize>]) -> Grade {
    let outcomes: Vec<Outcome> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| match selections.get(i).copied().flatten() {
            None => Outcome::Unanswered,
            Some(choice) if answer_letter(question) == Some(option_letter(choice)) => {
                Outcome::Correct
            }
            Some(_) => Outcome::Incorrect,
        })
        .collect();

    let score = outcomes.iter().filter(|o| **o == Outcome::Correct).count();
    Grade { outcomes, score, total: questions.len() }
}

/// One line per question: `n: L) option text`.
pub fn answer_key(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| match answer_index(question) {
            Some(index) => {
                let text = option_text(&question.options[index]);
                format!("{}: {}) {}", i + 1, option_letter(index), text)
            }
            None => format!("{}: {}", i + 1, INVALID_ANSWER_KEY),
        })
        .collect()
}

#[derive(Debug)]
pub struct QuizGenerator<V: PanelView = ResultPanel> {
    pub text: String,
    pub difficulty: Option<Difficulty>,
    pub count: u32,
    pub subject: Option<Subject>,
    pub phase: QuizPhase,
    pub questions: Vec<Question>,
    pub selections: Vec<Option<usize>>,
    pub grade: Option<Grade>,
    pub answers_revealed: bool,
    requested: u32,
    pub view: V,
}

impl<V: PanelView + Default> Default for QuizGenerator<V> {
    fn default() -> Self {
        Self {
            text: String::new(),
            difficulty: Some(Difficulty::default()),
            count: DEFAULT_QUESTIONS,
            subject: None,
            phase: QuizPhase::Idle,
            questions: Vec::new(),
            selections: Vec::new(),
            grade: None,
            answers_revealed: false,
            requested: 0,
            view: V::default(),
        }
    }
}

impl<V: PanelView> QuizGenerator<V> {
    pub fn subject_tag(&self) -> &'static str {
        self.subject.map(|s| s.slug()).unwrap_or("unknown")
    }

    pub fn count_is_slow(&self) -> bool {
        self.count > SOFT_QUESTION_LIMIT
    }

    pub fn inputs_locked(&self) -> bool {
        self.phase == QuizPhase::Submitted || self.answers_revealed
    }

    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::Ready && !self.answers_revealed
    }

    pub fn can_reveal(&self) -> bool {
        matches!(self.phase, QuizPhase::Ready | QuizPhase::Submitted) && !self.answers_revealed
    }

    pub fn select(&mut self, question: usize, option: usize) {
        if self.inputs_locked() || self.phase != QuizPhase::Ready {
            return;
        }
        let valid = self.questions.get(question).map(|q| option < q.options.len()).unwrap_or(false);
        if valid {
            self.selections[question] = Some(option);
        }
    }

    /// Grades the current selections and returns the fire-and-forget save request.
    pub fn submit_answers(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            return Vec::new();
        }

        let result = grade(&self.questions, &self.selections);
        log::info!("[Quiz] Graded {}/{}", result.score, result.total);

        let attempt = QuizAttempt {
            original_quiz: self.questions.clone(),
            user_selections: self
                .selections
                .iter()
                .enumerate()
                .map(|(i, choice)| (i.to_string(), choice.map(|c| option_letter(c).to_string())))
                .collect::<BTreeMap<_, _>>(),
            score: result.score,
            total_questions: result.total,
            subject: self.subject_tag().to_string(),
        };

        self.grade = Some(result);
        self.phase = QuizPhase::Submitted;

        match RequestBody::json(&attempt) {
            Ok(body) => vec![Effect::Request { endpoint: Endpoint::SaveQuizAttempt, body }],
            Err(e) => {
                log::error!("[Quiz] Could not encode quiz attempt: {}", e);
                Vec::new()
            }
        }
    }

    pub fn reveal_answers(&mut self) {
        if self.can_reveal() {
            self.answers_revealed = true;
        }
    }

    pub fn answer_key(&self) -> Vec<String> {
        answer_key(&self.questions)
    }

    /// Save results are never shown to the user.
    pub fn receive_save(&self, result: Result<Value, RequestFailure>) {
        match result.and_then(|value| {
            serde_json::from_value::<SaveAttemptResponse>(value)
                .map_err(|e| RequestFailure::from(StudyError::from(e)))
        }) {
            Ok(response) if response.success => log::info!("[Quiz] Attempt saved"),
            Ok(response) => log::warn!(
                "[Quiz] Attempt not saved: {}",
                response.error.unwrap_or_else(|| "no reason given".into())
            ),
            Err(failure) => log::error!("[Quiz] Failed to save attempt: {}", failure.message),
        }
    }

    fn reset_quiz(&mut self) {
        self.questions.clear();
        self.selections.clear();
        self.grade = None;
        self.answers_revealed = false;
    }
}

impl<V: PanelView> RequestFeature for QuizGenerator<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Quiz"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let text = non_blank(Some(&self.text))
            .ok_or_else(|| StudyError::validation("Please enter a topic or paste some text."))?;
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.count) {
            return Err(StudyError::validation(COUNT_MESSAGE));
        }
        let difficulty = self
            .difficulty
            .ok_or_else(|| StudyError::validation("Please select a difficulty level."))?;

        let body = RequestBody::json(&QuizRequest {
            text,
            difficulty,
            count: self.count,
            subject: self.subject_tag(),
        })?;

        self.requested = self.count;
        self.reset_quiz();
        self.phase = QuizPhase::Loading;
        Ok(Submission::new(Endpoint::Quiz, body, "Generating quiz..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let quiz = decode::<QuizResponse>(value, MALFORMED_QUIZ_MESSAGE).map(|r| r.quiz);
        let questions = match quiz.ok().flatten() {
            Some(quiz) if !quiz.is_empty() => quiz,
            _ => {
                self.phase = QuizPhase::Error;
                return Err(StudyError::payload(MALFORMED_QUIZ_MESSAGE));
            }
        };

        if questions.len() as u32 != self.requested {
            log::warn!(
                "[Quiz] Requested {} questions but received {}",
                self.requested,
                questions.len()
            );
        }

        self.selections = vec![None; questions.len()];
        self.questions = questions;
        self.phase = QuizPhase::Ready;

        self.view.hide_loading();
        self.view.hide_error();
        self.view.set_result_visible(true);
        Ok(())
    }

    fn on_failure(&mut self, failure: &RequestFailure) {
        self.phase = QuizPhase::Error;
        super::panel::show_failure(&mut self.view, &failure.message);
    }

    fn on_invalid(&mut self, err: &StudyError) {
        self.reset_quiz();
        self.phase = QuizPhase::Error;
        super::panel::show_failure(&mut self.view, &err.user_message());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::features::{
        receive,
        submit,
    };

    fn question(correct: &str) -> Question {
        Question {
            question: "Which?".into(),
            options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            correct_answer: correct.into(),
        }
    }

    fn quiz_json(n: usize) -> Value {
        let quiz: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "question": format!("Q{i}"),
                    "options": ["a", "b", "c", "d"],
                    "correct_answer": "B"
                })
            })
            .collect();
        json!({ "quiz": quiz })
    }

    #[test]
    fn test_grade_is_case_insensitive() {
        let questions = vec![question("a"), question("C"), question("d")];
        let result = grade(&questions, &[Some(0), Some(2), Some(1)]);
        assert_eq!(result.score, 2);
        assert_eq!(result.outcomes, vec![Outcome::Correct, Outcome::Correct, Outcome::Incorrect]);
        assert_eq!(result.summary(), "You scored 2 out of 3.");
    }

    #[test]
    fn test_unanswered_never_scores() {
        let questions = vec![question("A"), question("B")];
        let result = grade(&questions, &[None, Some(1)]);
        assert_eq!(result.score, 1);
        assert_eq!(result.outcomes[0], Outcome::Unanswered);
        assert_eq!(result.unanswered(), 1);
        assert!(result.summary().contains("1 question was unanswered"));
    }

    #[test]
    fn test_answer_key_flags_bad_letters() {
        let mut short = question("D");
        short.options.truncate(2);
        let key = answer_key(&[question("b"), short, question(""), question(" C) three")]);
        assert_eq!(key[0], "1: B) two");
        assert_eq!(key[1], format!("2: {INVALID_ANSWER_KEY}"));
        assert_eq!(key[2], format!("3: {INVALID_ANSWER_KEY}"));
        assert_eq!(key[3], "4: C) three");
    }

    #[test]
    fn test_decorated_key_grades_and_reports_letter() {
        let questions = vec![question("B)"), question("?")];
        let result = grade(&questions, &[Some(1), Some(0)]);
        assert_eq!(result.outcomes, vec![Outcome::Correct, Outcome::Incorrect]);
        assert_eq!(correct_letter(&questions[0]), Some('B'));
        assert_eq!(correct_letter(&questions[1]), None);
    }

    #[test]
    fn test_feedback_names_the_right_letter() {
        let q = question("c");
        assert_eq!(Outcome::Correct.feedback(&q), "Correct");
        assert_eq!(Outcome::Incorrect.feedback(&q), "Incorrect. Correct answer was: C");
        assert_eq!(Outcome::Unanswered.feedback(&q), "Unanswered. Correct answer was: C");
        assert_eq!(
            Outcome::Incorrect.feedback(&question("")),
            format!("Incorrect. Correct answer was: {INVALID_ANSWER_KEY}")
        );
    }

    #[test]
    fn test_blank_option_text_has_placeholder() {
        let mut blank = question("A");
        blank.options[0] = "  ".into();
        assert_eq!(answer_key(&[blank]), vec![format!("1: A) {MISSING_OPTION_TEXT}")]);
        assert_eq!(option_text("two"), "two");
    }

    #[test]
    fn test_invalid_regenerate_clears_ready_quiz() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        submit(&mut quiz);
        receive(&mut quiz, Ok(quiz_json(3)));
        assert!(quiz.can_submit());

        quiz.text.clear();
        assert!(submit(&mut quiz).is_empty());
        assert_eq!(quiz.phase, QuizPhase::Error);
        assert!(!quiz.can_submit());
        assert!(quiz.questions.is_empty());
        assert!(quiz.submit_answers().is_empty());
        assert!(quiz.view.error.is_some());
    }

    #[test]
    fn test_malformed_question_keeps_the_rest() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        quiz.count = 3;
        submit(&mut quiz);
        let mut reply = quiz_json(3);
        reply["quiz"][1] = json!({ "question": "Broken", "options": "a, b", "correct_answer": "A" });
        receive(&mut quiz, Ok(reply));
        assert_eq!(quiz.phase, QuizPhase::Ready);
        assert_eq!(quiz.questions.len(), 2);
    }

    #[test]
    fn test_count_out_of_range_is_rejected() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Newton's laws".into();
        quiz.count = 2;
        assert!(submit(&mut quiz).is_empty());
        assert_eq!(quiz.view.error.as_deref(), Some(COUNT_MESSAGE));

        quiz.count = 101;
        assert!(submit(&mut quiz).is_empty());

        quiz.count = 40;
        assert!(quiz.count_is_slow());
        assert_eq!(submit(&mut quiz).len(), 1);
    }

    #[test]
    fn test_missing_difficulty_is_rejected() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Optics".into();
        quiz.difficulty = None;
        assert!(submit(&mut quiz).is_empty());
        assert_eq!(quiz.view.error.as_deref(), Some("Please select a difficulty level."));
    }

    #[test]
    fn test_request_carries_subject() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Rome".into();
        quiz.difficulty = Some(Difficulty::Hard);
        quiz.subject = Some(Subject::History);

        let effects = submit(&mut quiz);
        assert_eq!(
            effects,
            vec![Effect::Request {
                endpoint: Endpoint::Quiz,
                body: RequestBody::Json(json!({
                    "text": "Rome",
                    "difficulty": "hard",
                    "count": 5,
                    "subject": "history"
                })),
            }]
        );
        assert_eq!(quiz.phase, QuizPhase::Loading);
    }

    #[test]
    fn test_fewer_questions_than_requested_still_render() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        quiz.count = 5;
        submit(&mut quiz);

        receive(&mut quiz, Ok(quiz_json(4)));

        assert_eq!(quiz.phase, QuizPhase::Ready);
        assert_eq!(quiz.questions.len(), 4);
        assert_eq!(quiz.selections.len(), 4);
        assert!(quiz.view.error.is_none());
        assert!(!quiz.view.is_loading());
    }

    #[test]
    fn test_empty_quiz_is_an_error() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        submit(&mut quiz);
        receive(&mut quiz, Ok(json!({ "quiz": [] })));
        assert_eq!(quiz.phase, QuizPhase::Error);
        assert_eq!(quiz.view.error.as_deref(), Some(MALFORMED_QUIZ_MESSAGE));

        submit(&mut quiz);
        receive(&mut quiz, Ok(json!({ "quiz": "nope" })));
        assert_eq!(quiz.phase, QuizPhase::Error);
    }

    #[test]
    fn test_submit_locks_and_posts_attempt() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        quiz.subject = Some(Subject::Biology);
        submit(&mut quiz);
        receive(&mut quiz, Ok(quiz_json(3)));

        quiz.select(0, 1);
        quiz.select(2, 0);
        let effects = quiz.submit_answers();

        assert_eq!(quiz.phase, QuizPhase::Submitted);
        assert_eq!(quiz.grade.as_ref().map(|g| g.score), Some(1));
        match &effects[..] {
            [Effect::Request { endpoint: Endpoint::SaveQuizAttempt, body: RequestBody::Json(v) }] => {
                assert_eq!(v["userSelections"], json!({ "0": "B", "1": null, "2": "A" }));
                assert_eq!(v["score"], json!(1));
                assert_eq!(v["totalQuestions"], json!(3));
                assert_eq!(v["subject"], json!("biology"));
            }
            other => panic!("Unexpected effects {:?}", other),
        }

        quiz.select(1, 1);
        assert_eq!(quiz.selections[1], None);
        assert!(quiz.submit_answers().is_empty());
    }

    #[test]
    fn test_reveal_from_ready_disables_submit() {
        let mut quiz = QuizGenerator::<ResultPanel>::default();
        quiz.text = "Cells".into();
        submit(&mut quiz);
        receive(&mut quiz, Ok(quiz_json(3)));

        quiz.reveal_answers();
        assert!(quiz.answers_revealed);
        assert!(!quiz.can_submit());
        assert!(quiz.submit_answers().is_empty());
        assert_eq!(quiz.answer_key()[0], "1: B) b");
    }

    #[test]
    fn test_unknown_subject_tag() {
        let quiz = QuizGenerator::<ResultPanel>::default();
        assert_eq!(quiz.subject_tag(), "unknown");
    }
}
