use serde_json::Value;

use super::{
    decode,
    non_blank,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
};
use crate::{
    api::{
        types::{
            ProcessExplanation,
            ProcessRequest,
        },
        Endpoint,
        RequestBody,
    },
    core::StudyError,
    format::{
        Block,
        ListKind,
    },
};

const DEFAULT_TITLE: &str = "Process Explanation";
const NO_OVERVIEW: &str = "No overview provided.";
const NO_STAGES: &str = "No specific stages listed or process is continuous.";
const NO_IO: &str = "Inputs/Outputs not specified.";
const NO_SIGNIFICANCE: &str = "Significance not specified.";

pub fn explanation_blocks(data: &ProcessExplanation) -> Vec<Block> {
    let text_or = |field: &Option<String>, fallback: &str| {
        Block::Paragraph(non_blank(field.as_deref()).unwrap_or(fallback).to_string())
    };

    let stages: Vec<String> = data
        .key_stages
        .iter()
        .flatten()
        .filter_map(|stage| non_blank(Some(stage)).map(str::to_string))
        .collect();

    vec![
        Block::Heading(
            non_blank(data.process_name_explained.as_deref()).unwrap_or(DEFAULT_TITLE).to_string(),
        ),
        Block::Heading("Overview".into()),
        text_or(&data.overview, NO_OVERVIEW),
        Block::Heading("Key Stages".into()),
        if stages.is_empty() {
            Block::Paragraph(NO_STAGES.into())
        } else {
            Block::List { kind: ListKind::Bulleted, items: stages }
        },
        Block::Heading("Inputs & Outputs".into()),
        text_or(&data.inputs_outputs, NO_IO),
        Block::Heading("Significance".into()),
        text_or(&data.significance, NO_SIGNIFICANCE),
    ]
}

pub fn has_content(data: &ProcessExplanation) -> bool {
    [&data.overview, &data.inputs_outputs, &data.significance]
        .iter()
        .any(|field| non_blank(field.as_deref()).is_some())
        || data.key_stages.as_ref().map(|s| !s.is_empty()).unwrap_or(false)
}

#[derive(Debug, Default)]
pub struct ProcessExplainer<V: PanelView = ResultPanel> {
    pub process_name: String,
    pub view: V,
}

impl<V: PanelView> RequestFeature for ProcessExplainer<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Biology"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let process_name = non_blank(Some(&self.process_name)).ok_or_else(|| {
            StudyError::validation("Please enter the name of a biological process.")
        })?;
        let body = RequestBody::json(&ProcessRequest { process_name })?;
        Ok(Submission::new(Endpoint::BiologicalProcess, body, "Explaining process..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let data: ProcessExplanation =
            decode(value, "Received an invalid process explanation from the server.")?;

        self.view.hide_loading();
        self.view.hide_error();
        self.view.set_result(explanation_blocks(&data));
        self.view.set_result_visible(true);
        self.view.set_read_aloud_visible(has_content(&data));
        Ok(())
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

    #[test]
    fn test_fallbacks_fill_every_section() {
        let blocks = explanation_blocks(&ProcessExplanation::default());
        assert_eq!(blocks[0], Block::Heading(DEFAULT_TITLE.into()));
        assert!(blocks.contains(&Block::Paragraph(NO_STAGES.into())));
        assert!(blocks.contains(&Block::Paragraph(NO_SIGNIFICANCE.into())));
        assert!(!has_content(&ProcessExplanation::default()));
    }

    #[test]
    fn test_stages_become_list() {
        let mut explainer = ProcessExplainer::<ResultPanel>::default();
        explainer.process_name = "Mitosis".into();
        assert_eq!(submit(&mut explainer).len(), 1);

        receive(
            &mut explainer,
            Ok(json!({
                "process_name_explained": "Mitosis",
                "key_stages": ["Prophase", "Metaphase"],
                "key_extra": 1
            })),
        );

        assert!(explainer.view.blocks.contains(&Block::List {
            kind: ListKind::Bulleted,
            items: vec!["Prophase".into(), "Metaphase".into()],
        }));
        assert!(explainer.view.result_visible);
        assert!(explainer.view.read_aloud_visible);
    }

    #[test]
    fn test_no_content_hides_read_aloud() {
        let mut explainer = ProcessExplainer::<ResultPanel>::default();
        explainer.process_name = "Osmosis".into();
        submit(&mut explainer);
        receive(&mut explainer, Ok(json!({ "process_name_explained": "Osmosis" })));
        assert!(explainer.view.result_visible);
        assert!(!explainer.view.read_aloud_visible);
    }
}
