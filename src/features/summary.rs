use std::path::PathBuf;

use serde_json::Value;

use super::{
    decode,
    display_name,
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
            SummaryResponse,
            TextRequest,
        },
        Endpoint,
        FormField,
        RequestBody,
    },
    core::StudyError,
    format::Block,
};

#[derive(Debug, Default)]
pub struct Summarizer<V: PanelView = ResultPanel> {
    pub text: String,
    pub file: Option<PathBuf>,
    pub view: V,
}

impl<V: PanelView> RequestFeature for Summarizer<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Summary"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        if let Some(path) = self.file.clone() {
            if !has_allowed_extension(&path, &ALLOWED_UPLOAD_EXTENSIONS) {
                self.file = None;
                return Err(StudyError::validation(format!(
                    "Invalid file type selected ({}). Please attach .txt or .pdf.",
                    display_name(&path)
                )));
            }
            let body = RequestBody::Multipart(vec![FormField::File { name: "file", path }]);
            return Ok(Submission::new(Endpoint::Summary, body, "Summarizing file..."));
        }

        let text = non_blank(Some(&self.text)).ok_or_else(|| {
            StudyError::validation("Please paste some text OR attach a file to summarize.")
        })?;
        let body = RequestBody::json(&TextRequest { text })?;
        Ok(Submission::new(Endpoint::Summary, body, "Generating summary..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: SummaryResponse = decode(value, "Received an invalid summary from the server.")?;
        let summary = response.summary.unwrap_or_default();
        show_result_and_button(&mut self.view, vec![Block::Paragraph(summary)]);
        Ok(())
    }

    fn after_attempt(&mut self) {
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::features::{
        panel::testing::RecordingView,
        receive,
        submit,
        Effect,
    };

    #[test]
    fn test_rejects_docx_before_request() {
        let mut summarizer = Summarizer::<RecordingView>::default();
        summarizer.file = Some(PathBuf::from("/home/me/essay.docx"));

        let effects = submit(&mut summarizer);

        assert!(effects.is_empty());
        assert!(summarizer.file.is_none());
        assert!(summarizer.view.calls.contains(
            &"error:Invalid file type selected (essay.docx). Please attach .txt or .pdf.".to_string()
        ));
    }

    #[test]
    fn test_requires_text_or_file() {
        let mut summarizer = Summarizer::<ResultPanel>::default();
        summarizer.text = "   ".into();
        assert!(submit(&mut summarizer).is_empty());
        assert_eq!(
            summarizer.view.error.as_deref(),
            Some("Please paste some text OR attach a file to summarize.")
        );
    }

    #[test]
    fn test_file_wins_over_text() {
        let mut summarizer = Summarizer::<ResultPanel>::default();
        summarizer.text = "ignored".into();
        summarizer.file = Some(PathBuf::from("notes.PDF"));

        let effects = submit(&mut summarizer);
        match &effects[..] {
            [Effect::Request { endpoint: Endpoint::Summary, body }] => assert!(body.is_multipart()),
            other => panic!("Unexpected effects {:?}", other),
        }
        assert_eq!(summarizer.view.loading.as_deref(), Some("Summarizing file..."));

        receive(&mut summarizer, Ok(json!({ "summary": "Short." })));
        assert!(summarizer.file.is_none());
        assert!(summarizer.view.result_visible);
        assert_eq!(summarizer.view.narration(), "Short.");
    }

    #[test]
    fn test_text_request_body() {
        let mut summarizer = Summarizer::<ResultPanel>::default();
        summarizer.text = " Photosynthesis ".into();
        let effects = submit(&mut summarizer);
        assert_eq!(
            effects,
            vec![Effect::Request {
                endpoint: Endpoint::Summary,
                body: RequestBody::Json(json!({ "text": "Photosynthesis" })),
            }]
        );
    }
}
