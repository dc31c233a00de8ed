use std::path::PathBuf;

use serde_json::Value;

use super::{
    decode,
    has_allowed_extension,
    non_blank,
    panel::show_result_and_button,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
    ALLOWED_UPLOAD_EXTENSIONS,
};
use crate::{
    api::{
        types::{
            FeedbackResponse,
            WritingRequest,
        },
        Endpoint,
        FormField,
        RequestBody,
    },
    core::StudyError,
    format::Block,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerInput {
    #[default]
    Text,
    File,
}

impl AnswerInput {
    pub fn wire_name(&self) -> &'static str {
        match self {
            AnswerInput::Text => "text",
            AnswerInput::File => "file",
        }
    }
}

#[derive(Debug, Default)]
pub struct WritingFeedback<V: PanelView = ResultPanel> {
    pub topic_question: String,
    input: AnswerInput,
    pub answer: String,
    pub answer_file: Option<PathBuf>,
    pub view: V,
}

impl<V: PanelView> WritingFeedback<V> {
    pub fn input(&self) -> AnswerInput {
        self.input
    }

    /// Switching input method clears whatever the other method held.
    pub fn set_input(&mut self, input: AnswerInput) {
        if input == self.input {
            return;
        }
        match input {
            AnswerInput::Text => self.answer_file = None,
            AnswerInput::File => self.answer.clear(),
        }
        self.input = input;
    }
}

impl<V: PanelView> RequestFeature for WritingFeedback<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "WritingFeedback"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let topic_question = non_blank(Some(&self.topic_question))
            .ok_or_else(|| StudyError::validation("Please enter the question or topic."))?;

        match self.input {
            AnswerInput::Text => {
                let user_answer = non_blank(Some(&self.answer))
                    .ok_or_else(|| StudyError::validation("Please type your answer."))?;
                let body = RequestBody::json(&WritingRequest {
                    topic_question,
                    user_answer,
                    input_type: AnswerInput::Text.wire_name(),
                })?;
                Ok(Submission::new(Endpoint::WritingFeedback, body, "Analyzing your answer..."))
            }
            AnswerInput::File => {
                let path = self.answer_file.clone().ok_or_else(|| {
                    StudyError::validation("Please select an answer file (.txt or .pdf).")
                })?;
                if !has_allowed_extension(&path, &ALLOWED_UPLOAD_EXTENSIONS) {
                    self.answer_file = None;
                    return Err(StudyError::validation(
                        "Invalid file type. Please upload .txt or .pdf.",
                    ));
                }
                let body = RequestBody::Multipart(vec![
                    FormField::Text { name: "topic_question", value: topic_question.to_string() },
                    FormField::File { name: "answer_file", path },
                    FormField::Text {
                        name: "input_type",
                        value: AnswerInput::File.wire_name().to_string(),
                    },
                ]);
                Ok(Submission::new(
                    Endpoint::WritingFeedback,
                    body,
                    "Processing file and analyzing answer...",
                ))
            }
        }
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: FeedbackResponse = decode(value, "Received invalid feedback from the server.")?;
        show_result_and_button(
            &mut self.view,
            vec![Block::Paragraph(response.feedback.unwrap_or_default())],
        );
        Ok(())
    }

    fn after_attempt(&mut self) {
        self.answer_file = None;
    }
}
