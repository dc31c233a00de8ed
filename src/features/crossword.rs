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
            CrosswordResponse,
            TextRequest,
        },
        Endpoint,
        RequestBody,
    },
    core::StudyError,
    format::{
        Block,
        Definition,
    },
};

pub const EMPTY_CROSSWORD_MESSAGE: &str =
    "Failed to generate word/clue suggestions. The AI response might be empty or malformed.";

#[derive(Debug, Default)]
pub struct Crossword<V: PanelView = ResultPanel> {
    pub text: String,
    pub view: V,
}

impl<V: PanelView> RequestFeature for Crossword<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Crossword"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let text = non_blank(Some(&self.text))
            .ok_or_else(|| StudyError::validation("Please enter a topic or paste some text."))?;
        let body = RequestBody::json(&TextRequest { text })?;
        Ok(Submission::new(Endpoint::CrosswordData, body, "Generating word suggestions..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: CrosswordResponse = decode(value, EMPTY_CROSSWORD_MESSAGE)?;
        let entries: Vec<Definition> = response
            .crossword_data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let word = non_blank(entry.word.as_deref())?.to_uppercase();
                let clue = non_blank(entry.clue.as_deref())?.to_string();
                Some(Definition { term: word, description: clue })
            })
            .collect();

        if entries.is_empty() {
            return Err(StudyError::payload(EMPTY_CROSSWORD_MESSAGE));
        }
        show_result_and_button(&mut self.view, vec![Block::Definitions(entries)]);
        Ok(())
    }
}
