pub mod types;

use std::path::PathBuf;

use serde::Serialize;

use crate::core::StudyError;

/// Backend routes this client talks to. Every call is a single `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Summary,
    VisualDescription,
    Quiz,
    SaveQuizAttempt,
    BattleFlow,
    MapInfo,
    CrosswordData,
    WritingFeedback,
    BalanceEquation,
    BiologicalProcess,
    Flashcards,
    ChatbotMessage,
    ProcessPdf,
    AskPdf,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Summary => "/generate-summary",
            Endpoint::VisualDescription => "/generate-visual-description",
            Endpoint::Quiz => "/generate-quiz",
            Endpoint::SaveQuizAttempt => "/save-quiz-attempt",
            Endpoint::BattleFlow => "/generate-battle-flow",
            Endpoint::MapInfo => "/generate-map-info",
            Endpoint::CrosswordData => "/generate-crossword-data",
            Endpoint::WritingFeedback => "/get-writing-feedback",
            Endpoint::BalanceEquation => "/balance-chemical-equation",
            Endpoint::BiologicalProcess => "/explain-biological-process",
            Endpoint::Flashcards => "/generate-flashcards",
            Endpoint::ChatbotMessage => "/chatbot-message",
            Endpoint::ProcessPdf => "/process-pdf-for-qa",
            Endpoint::AskPdf => "/ask-pdf-question",
        }
    }
}

pub fn simulation_path(id: &str) -> String {
    format!("/simulation/{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: &'static str, value: String },
    File { name: &'static str, path: PathBuf },
}

/// Exactly one of a JSON document or a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

impl RequestBody {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, StudyError> {
        Ok(RequestBody::Json(serde_json::to_value(body)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}
