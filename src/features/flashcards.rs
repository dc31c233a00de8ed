use serde_json::Value;

use super::{
    decode,
    non_blank,
    Effect,
    PanelView,
    RequestFeature,
    ResultPanel,
    Submission,
};
use crate::{
    api::{
        types::{
            FlashcardRequest,
            FlashcardResponse,
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

pub const NO_TERMS_MESSAGE: &str = "No key terms found to generate flashcards for this input.";
pub const MALFORMED_FLASHCARDS_MESSAGE: &str =
    "Failed to generate flashcards. The AI response might be malformed.";

#[derive(Debug, Default)]
pub struct Flashcards<V: PanelView = ResultPanel> {
    pub source_text: String,
    pub view: V,
}

impl<V: PanelView> Flashcards<V> {
    pub fn cards(&self) -> &[Definition] {
        match self.view.result_blocks().first() {
            Some(Block::Definitions(cards)) => cards,
            _ => &[],
        }
    }

    /// Reads one card's definition aloud.
    pub fn read_card(&self, index: usize) -> Option<Effect> {
        self.cards().get(index).map(|card| Effect::Speak(card.description.clone()))
    }
}

impl<V: PanelView> RequestFeature for Flashcards<V> {
    type View = V;

    fn name(&self) -> &'static str {
        "Flashcards"
    }

    fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn prepare(&mut self) -> Result<Submission, StudyError> {
        let source_text = non_blank(Some(&self.source_text)).ok_or_else(|| {
            StudyError::validation("Please enter a topic or text to generate flashcards from.")
        })?;
        let body = RequestBody::json(&FlashcardRequest { source_text })?;
        Ok(Submission::new(Endpoint::Flashcards, body, "Generating flashcards..."))
    }

    fn render(&mut self, value: Value) -> Result<(), StudyError> {
        let response: FlashcardResponse = decode(value, MALFORMED_FLASHCARDS_MESSAGE)?;
        let flashcards = response
            .flashcards
            .ok_or_else(|| StudyError::payload(MALFORMED_FLASHCARDS_MESSAGE))?;
        if flashcards.is_empty() {
            return Err(StudyError::payload(NO_TERMS_MESSAGE));
        }

        let cards: Vec<Definition> = flashcards
            .into_iter()
            .filter_map(|card| {
                let term = non_blank(card.term.as_deref())?.to_string();
                let description = non_blank(card.definition.as_deref())?.to_string();
                Some(Definition { term, description })
            })
            .collect();

        self.view.hide_loading();
        self.view.hide_error();
        self.view.set_result(vec![Block::Definitions(cards)]);
        self.view.set_result_visible(true);
        // Each card carries its own read-aloud control.
        self.view.set_read_aloud_visible(false);
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

    fn generated(value: Value) -> Flashcards<ResultPanel> {
        let mut flashcards = Flashcards::<ResultPanel>::default();
        flashcards.source_text = "Cell biology".into();
        assert_eq!(submit(&mut flashcards).len(), 1);
        receive(&mut flashcards, Ok(value));
        flashcards
    }

    #[test]
    fn test_incomplete_cards_are_skipped() {
        let flashcards = generated(json!({ "flashcards": [
            { "term": "Nucleus", "definition": "Holds DNA" },
            { "term": "Ribosome" },
            { "definition": "orphan" }
        ]}));
        assert_eq!(flashcards.cards().len(), 1);
        assert_eq!(flashcards.read_card(0), Some(Effect::Speak("Holds DNA".into())));
        assert_eq!(flashcards.read_card(1), None);
    }

    #[test]
    fn test_wrongly_typed_card_keeps_the_rest() {
        let flashcards = generated(json!({ "flashcards": [
            { "term": "Nucleus", "definition": "Holds DNA" },
            { "term": "Ribosome", "definition": 42 }
        ]}));
        assert!(flashcards.view.error.is_none());
        assert_eq!(flashcards.cards().len(), 1);
    }

    #[test]
    fn test_empty_and_missing_lists() {
        let flashcards = generated(json!({ "flashcards": [] }));
        assert_eq!(flashcards.view.error.as_deref(), Some(NO_TERMS_MESSAGE));

        let flashcards = generated(json!({ "cards": [] }));
        assert_eq!(flashcards.view.error.as_deref(), Some(MALFORMED_FLASHCARDS_MESSAGE));
        assert!(flashcards.cards().is_empty());
    }

    #[test]
    fn test_blank_source_rejected() {
        let mut flashcards = Flashcards::<ResultPanel>::default();
        assert!(submit(&mut flashcards).is_empty());
        assert_eq!(
            flashcards.view.error.as_deref(),
            Some("Please enter a topic or text to generate flashcards from.")
        );
    }
}
