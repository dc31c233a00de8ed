//! Feature controllers.
//!
//! Every request-issuing feature follows one shape: validate its inputs,
//! reset its panel, emit a request effect, and later render the response or
//! the failure into the same panel. [`submit`] and [`receive`] implement that
//! shape once; features only supply validation and rendering.

pub mod battle_flow;
pub mod biology;
pub mod chatbot;
pub mod crossword;
pub mod equation;
pub mod flashcards;
pub mod map;
pub mod panel;
pub mod pdf_qa;
pub mod quiz;
pub mod simulation;
pub mod subject;
pub mod summary;
pub mod visualize;
pub mod wheel;
pub mod workspace;
pub mod writing;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use panel::{
    PanelView,
    ResultPanel,
};
pub use subject::Subject;
pub use workspace::{
    Command,
    Tool,
    Workspace,
};

use crate::{
    api::{
        Endpoint,
        RequestBody,
    },
    core::{
        RequestFailure,
        StudyError,
    },
};

pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

/// Something the UI shell has to carry out on behalf of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request { endpoint: Endpoint, body: RequestBody },
    Navigate(String),
    Speak(String),
}

/// A validated request, ready to go out.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub endpoint: Endpoint,
    pub body: RequestBody,
    pub loading: String,
}

impl Submission {
    pub fn new(endpoint: Endpoint, body: RequestBody, loading: impl Into<String>) -> Self {
        Self { endpoint, body, loading: loading.into() }
    }
}

pub trait RequestFeature {
    type View: PanelView;

    fn name(&self) -> &'static str;

    fn view_mut(&mut self) -> &mut Self::View;

    /// Validates inputs and builds the request. Errors here never reach the network.
    fn prepare(&mut self) -> Result<Submission, StudyError>;

    fn render(&mut self, value: Value) -> Result<(), StudyError>;

    /// Runs once the request settles, whatever the outcome.
    fn after_attempt(&mut self) {}

    fn on_failure(&mut self, failure: &RequestFailure) {
        panel::show_failure(self.view_mut(), &failure.message);
    }

    /// Runs when `prepare` rejects the inputs.
    fn on_invalid(&mut self, err: &StudyError) {
        panel::show_failure(self.view_mut(), &err.user_message());
    }
}

pub fn submit<F: RequestFeature>(feature: &mut F) -> Vec<Effect> {
    match feature.prepare() {
        Ok(submission) => {
            log::info!("[{}] Sending request to {}", feature.name(), submission.endpoint.path());
            panel::begin_request(feature.view_mut(), &submission.loading);
            vec![Effect::Request { endpoint: submission.endpoint, body: submission.body }]
        }
        Err(err) => {
            log::warn!("[{}] {}", feature.name(), err);
            feature.on_invalid(&err);
            Vec::new()
        }
    }
}

pub fn receive<F: RequestFeature>(feature: &mut F, result: Result<Value, RequestFailure>) {
    feature.after_attempt();
    match result {
        Ok(value) => {
            if let Err(err) = feature.render(value) {
                log::error!("[{}] Unusable response: {}", feature.name(), err);
                panel::show_failure(feature.view_mut(), &err.user_message());
            }
        }
        Err(failure) => {
            log::error!("[{}] Request failed: {}", feature.name(), failure.message);
            feature.on_failure(&failure);
        }
    }
}

pub fn decode<T: DeserializeOwned>(value: Value, malformed: &str) -> Result<T, StudyError> {
    serde_json::from_value(value).map_err(|e| {
        log::warn!("Response did not match the expected shape: {e}");
        StudyError::payload(malformed)
    })
}

pub fn has_allowed_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("Unknown File")
        .to_string()
}

pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(has_allowed_extension(Path::new("notes.TXT"), &ALLOWED_UPLOAD_EXTENSIONS));
        assert!(has_allowed_extension(Path::new("/tmp/paper.pdf"), &ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension(Path::new("essay.docx"), &ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension(Path::new("README"), &ALLOWED_UPLOAD_EXTENSIONS));
    }

    #[test]
    fn test_decode_maps_to_payload_error() {
        #[derive(serde::Deserialize, Debug)]
        struct Reply {
            #[allow(dead_code)]
            reply: String,
        }
        let err = decode::<Reply>(json!({ "reply": 3 }), "bad reply").unwrap_err();
        assert!(matches!(err, StudyError::Payload(ref m) if m == "bad reply"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
