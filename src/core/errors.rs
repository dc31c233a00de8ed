use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "A network or unexpected error occurred. Please check the logs.";

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("{0}")]
    Payload(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("StudyError: {0}")]
    Custom(String),
}

impl StudyError {
    pub fn validation(message: impl Into<String>) -> Self {
        StudyError::Validation(message.into())
    }

    pub fn payload(message: impl Into<String>) -> Self {
        StudyError::Payload(message.into())
    }

    /// Text shown in a feature's error region.
    pub fn user_message(&self) -> String {
        match self {
            StudyError::Validation(message) | StudyError::Payload(message) => message.clone(),
            StudyError::Http { message, .. } => message.clone(),
            StudyError::Transport(_) | StudyError::Io(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for StudyError {
    fn from(error: std::io::Error) -> Self {
        StudyError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for StudyError {
    fn from(error: reqwest::Error) -> Self {
        StudyError::Transport(Box::new(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Http,
    Transport,
    Payload,
}

/// Clonable projection of a failed request, sent back over the task channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl RequestFailure {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Http, status: Some(status), message: message.into() }
    }

    pub fn transport() -> Self {
        Self { kind: FailureKind::Transport, status: None, message: NETWORK_ERROR_MESSAGE.into() }
    }

    pub fn is_transport(&self) -> bool {
        self.kind == FailureKind::Transport
    }
}

impl From<&StudyError> for RequestFailure {
    fn from(error: &StudyError) -> Self {
        match error {
            StudyError::Http { status, message } => RequestFailure::http(*status, message.clone()),
            StudyError::Payload(message) => Self {
                kind: FailureKind::Payload,
                status: None,
                message: message.clone(),
            },
            StudyError::Transport(_) | StudyError::Io(_) => RequestFailure::transport(),
            other => Self { kind: FailureKind::Transport, status: None, message: other.user_message() },
        }
    }
}

impl From<StudyError> for RequestFailure {
    fn from(error: StudyError) -> Self {
        RequestFailure::from(&error)
    }
}
