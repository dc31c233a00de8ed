use serde_json::Value;

use super::{
    decode,
    non_blank,
    panel::show_result_and_button,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
};
use crate::{
    api::{
        types::{
            DescriptionResponse,
            TopicRequest,
        },
        Endpoint,
        RequestBody,
    },
    core::StudyError,
    format::Block,
};

#[derive(Debug, Default)]
pub struct Visualizer<V: PanelView = ResultPanel> {
    pub topic: String,
    pub view: V,
}

impl<V: PanelView> RequestFeature for Visualizer<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Visualize"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let topic = non_blank(Some(&self.topic))
            .ok_or_else(|| StudyError::validation("Please enter a topic to visualize."))?;
        let body = RequestBody::json(&TopicRequest { topic })?;
        Ok(Submission::new(Endpoint::VisualDescription, body, "Generating visual description..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: DescriptionResponse =
            decode(value, "Received an invalid description from the server.")?;
        show_result_and_button(
            &mut self.view,
            vec![Block::Paragraph(response.description.unwrap_or_default())],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        core::RequestFailure,
        features::{
            receive,
            submit,
        },
    };

    #[test]
    fn test_blank_topic_is_rejected() {
        let mut visualizer = Visualizer::<ResultPanel>::default();
        assert!(submit(&mut visualizer).is_empty());
        assert_eq!(visualizer.view.error.as_deref(), Some("Please enter a topic to visualize."));
    }

    #[test]
    fn test_success_then_failure_replaces_result() {
        let mut visualizer = Visualizer::<ResultPanel>::default();
        visualizer.topic = "Volcano".into();
        assert_eq!(submit(&mut visualizer).len(), 1);
        receive(&mut visualizer, Ok(json!({ "description": "A cone of ash." })));
        assert!(visualizer.view.result_visible);

        submit(&mut visualizer);
        assert!(!visualizer.view.result_visible);
        receive(&mut visualizer, Err(RequestFailure::http(500, "AI unavailable")));
        assert_eq!(visualizer.view.error.as_deref(), Some("AI unavailable"));
        assert!(!visualizer.view.read_aloud_visible);
    }

    #[test]
    fn test_missing_description_hides_result() {
        let mut visualizer = Visualizer::<ResultPanel>::default();
        visualizer.topic = "Volcano".into();
        submit(&mut visualizer);
        receive(&mut visualizer, Ok(json!({})));
        assert!(!visualizer.view.result_visible);
        assert!(visualizer.view.error.is_none());
    }
}
