use std::path::PathBuf;

use serde_json::Value;

use super::{
    chatbot::{
        failure_text,
        reply_text,
        ChatLog,
        Role,
        THINKING_MESSAGE,
    },
    decode,
    display_name,
    has_allowed_extension,
    non_blank,
    Effect,
};
use crate::{
    api::{
        types::{
            PdfProcessed,
            QuestionRequest,
        },
        Endpoint,
        FormField,
        RequestBody,
    },
    core::{
        RequestFailure,
        StudyError,
    },
};

const PDF_ONLY: [&str; 1] = ["pdf"];

/// Upload a PDF once, then ask questions about it. The backend keeps the
/// processed document in the session, so both calls share the cookie store.
#[derive(Debug, Default)]
pub struct PdfQa {
    pub file: Option<PathBuf>,
    pub active_document: Option<String>,
    pub question: String,
    pub uploading: bool,
    pub asking: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    pub log: ChatLog,
}

impl PdfQa {
    pub fn busy(&self) -> bool {
        self.uploading || self.asking
    }

    pub fn upload(&mut self) -> Result<Effect, StudyError> {
        self.error = None;
        self.status = None;
        if self.busy() {
            return Err(StudyError::validation("Please wait for the current request to finish."));
        }

        let path = self.file.clone().ok_or_else(|| {
            self.reject("Please choose a PDF file to upload.")
        })?;
        if !has_allowed_extension(&path, &PDF_ONLY) {
            self.file = None;
            return Err(self.reject("Invalid file type. Please upload a PDF."));
        }

        self.uploading = true;
        self.status = Some(format!("Processing {}...", display_name(&path)));
        log::info!("[PdfQa] Sending request to {}", Endpoint::ProcessPdf.path());
        Ok(Effect::Request {
            endpoint: Endpoint::ProcessPdf,
            body: RequestBody::Multipart(vec![FormField::File { name: "pdf_file", path }]),
        })
    }

    pub fn receive_upload(&mut self, result: Result<Value, RequestFailure>) {
        self.uploading = false;
        self.status = None;
        self.file = None;

        let processed = result.map_err(|f| f.message).and_then(|value| {
            decode::<PdfProcessed>(value, "Received an invalid response while processing the PDF.")
                .map_err(|e| e.user_message())
        });

        match processed {
            Ok(PdfProcessed { success: true, pdf_filename, message, .. }) => {
                let name = pdf_filename.unwrap_or_else(|| "document.pdf".to_string());
                log::info!("[PdfQa] Active document is now {}", name);
                self.status = Some(message.unwrap_or_else(|| format!("PDF '{name}' processed.")));
                self.active_document = Some(name);
                self.log = ChatLog::default();
            }
            Ok(PdfProcessed { error, .. }) => {
                let message = error.unwrap_or_else(|| "The PDF could not be processed.".to_string());
                log::error!("[PdfQa] Processing failed: {}", message);
                self.error = Some(message);
            }
            Err(message) => {
                log::error!("[PdfQa] Upload failed: {}", message);
                self.error = Some(message);
            }
        }
    }

    pub fn ask(&mut self) -> Result<Effect, StudyError> {
        self.error = None;
        if self.busy() {
            return Err(StudyError::validation("Please wait for the current request to finish."));
        }
        if self.active_document.is_none() {
            return Err(self.reject("Please upload and process a PDF first."));
        }
        let question = non_blank(Some(&self.question))
            .map(str::to_string)
            .ok_or_else(|| self.reject("Please ask a question."))?;

        let body = RequestBody::json(&QuestionRequest { question: &question })?;
        self.question.clear();
        self.log.push(Role::User, question);
        self.log.push_temporary(Role::Ai, THINKING_MESSAGE);
        self.asking = true;
        log::info!("[PdfQa] Sending request to {}", Endpoint::AskPdf.path());
        Ok(Effect::Request { endpoint: Endpoint::AskPdf, body })
    }

    pub fn receive_answer(&mut self, result: Result<Value, RequestFailure>) {
        self.asking = false;
        self.log.clear_temporary();
        match result {
            Ok(value) => self.log.push(Role::Ai, reply_text(value)),
            Err(failure) => {
                log::error!("[PdfQa] Question failed: {}", failure.message);
                self.log.push(Role::AiError, failure_text(&failure));
            }
        }
    }

    fn reject(&mut self, message: &str) -> StudyError {
        log::warn!("[PdfQa] {}", message);
        self.error = Some(message.to_string());
        StudyError::validation(message)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_upload_validation() {
        let mut qa = PdfQa::default();
        assert!(qa.upload().is_err());
        assert_eq!(qa.error.as_deref(), Some("Please choose a PDF file to upload."));

        qa.file = Some(PathBuf::from("notes.txt"));
        assert!(qa.upload().is_err());
        assert_eq!(qa.error.as_deref(), Some("Invalid file type. Please upload a PDF."));
        assert!(qa.file.is_none());
    }

    #[test]
    fn test_ask_requires_active_document() {
        let mut qa = PdfQa::default();
        qa.question = "What is chapter 2 about?".into();
        assert!(qa.ask().is_err());
        assert_eq!(qa.error.as_deref(), Some("Please upload and process a PDF first."));

        qa.active_document = Some("book.pdf".into());
        qa.question = " ".into();
        assert!(qa.ask().is_err());
        assert_eq!(qa.error.as_deref(), Some("Please ask a question."));
    }

    #[test]
    fn test_upload_then_ask() {
        let mut qa = PdfQa::default();
        qa.file = Some(PathBuf::from("/tmp/Book.PDF"));
        let effect = qa.upload().unwrap();
        assert!(matches!(effect, Effect::Request { endpoint: Endpoint::ProcessPdf, ref body } if body.is_multipart()));
        assert!(qa.busy());

        qa.receive_upload(Ok(json!({ "success": true, "pdf_filename": "Book.PDF" })));
        assert_eq!(qa.active_document.as_deref(), Some("Book.PDF"));
        assert!(!qa.busy());

        qa.question = "Who is the author?".into();
        let effect = qa.ask().unwrap();
        assert_eq!(
            effect,
            Effect::Request {
                endpoint: Endpoint::AskPdf,
                body: RequestBody::Json(json!({ "question": "Who is the author?" })),
            }
        );
        assert!(qa.ask().is_err());

        qa.receive_answer(Err(RequestFailure::http(400, "No PDF processed or session expired.")));
        assert_eq!(qa.log.len(), 2);
        assert_eq!(qa.log.last().unwrap().role, Role::AiError);
    }

    #[test]
    fn test_failed_upload_keeps_previous_document() {
        let mut qa = PdfQa::default();
        qa.active_document = Some("old.pdf".into());
        qa.file = Some(PathBuf::from("new.pdf"));
        qa.upload().unwrap();
        qa.receive_upload(Err(RequestFailure::http(500, "Could not extract text")));
        assert_eq!(qa.active_document.as_deref(), Some("old.pdf"));
        assert_eq!(qa.error.as_deref(), Some("Could not extract text"));
    }
}
