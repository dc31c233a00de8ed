use std::collections::BTreeMap;

use serde::{
    de::DeserializeOwned,
    Deserialize,
    Deserializer,
    Serialize,
};
use serde_json::Value;

/// Accepts any JSON value and keeps it only if it converts to `T`.
/// Model output is loosely typed, so a wrong type counts as absent.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`] for lists, but converts element by element. Elements
/// that do not convert are skipped and the rest are kept.
pub fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let total = items.len();
    let kept: Vec<T> =
        items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect();
    if kept.len() < total {
        log::warn!("[Api] Skipped {} malformed list item(s)", total - kept.len());
    }
    Ok(Some(kept))
}

// Requests

#[derive(Debug, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TopicRequest<'a> {
    pub topic: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizRequest<'a> {
    pub text: &'a str,
    pub difficulty: Difficulty,
    pub count: u32,
    pub subject: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub original_quiz: Vec<Question>,
    pub user_selections: BTreeMap<String, Option<String>>,
    pub score: usize,
    pub total_questions: usize,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct BattleRequest<'a> {
    pub battle: &'a str,
}

#[derive(Debug, Serialize)]
pub struct WritingRequest<'a> {
    pub topic_question: &'a str,
    pub user_answer: &'a str,
    pub input_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EquationRequest<'a> {
    pub equation: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub process_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FlashcardRequest<'a> {
    pub source_text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

// Responses

#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DescriptionResponse {
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizResponse {
    #[serde(default, deserialize_with = "lenient_items")]
    pub quiz: Option<Vec<Question>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveAttemptResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlowResponse {
    pub flow: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundingBox {
    #[serde(default, deserialize_with = "lenient")]
    pub south_west_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub south_west_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub north_east_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub north_east_lon: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointOfInterest {
    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub popup_info: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub center_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub center_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub zoom: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient")]
    pub points_of_interest: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrosswordEntry {
    pub word: Option<String>,
    pub clue: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CrosswordResponse {
    #[serde(default, deserialize_with = "lenient_items")]
    pub crossword_data: Option<Vec<CrosswordEntry>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EquationResponse {
    pub balanced_equation: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessExplanation {
    pub process_name_explained: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub key_stages: Option<Vec<String>>,
    pub inputs_outputs: Option<String>,
    pub significance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flashcard {
    pub term: Option<String>,
    pub definition: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashcardResponse {
    #[serde(default, deserialize_with = "lenient_items")]
    pub flashcards: Option<Vec<Flashcard>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyResponse {
    pub reply: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PdfProcessed {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub pdf_filename: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_map_info_tolerates_wrong_types() {
        let info: MapInfo = serde_json::from_value(json!({
            "description": "Alps",
            "center_lat": "46.5",
            "center_lon": 10.0,
            "zoom": null,
            "bounding_box": "none",
            "points_of_interest": [{ "lat": 45.8, "lon": 6.86, "name": "Mont Blanc" }, "junk"]
        }))
        .unwrap();

        assert_eq!(info.description.as_deref(), Some("Alps"));
        assert_eq!(info.center_lat, None);
        assert_eq!(info.center_lon, Some(10.0));
        assert_eq!(info.zoom, None);
        assert!(info.bounding_box.is_none());
        assert_eq!(info.points_of_interest.unwrap().len(), 2);
    }

    #[test]
    fn test_list_items_convert_one_by_one() {
        let cards: FlashcardResponse = serde_json::from_value(json!({
            "flashcards": [
                { "term": "Nucleus", "definition": "Holds DNA" },
                { "term": "Ribosome", "definition": 42 }
            ]
        }))
        .unwrap();
        let cards = cards.flashcards.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].term.as_deref(), Some("Nucleus"));

        let process: ProcessExplanation = serde_json::from_value(json!({
            "key_stages": ["Light reactions", { "stage": 2 }, "Calvin cycle"]
        }))
        .unwrap();
        assert_eq!(
            process.key_stages,
            Some(vec!["Light reactions".to_string(), "Calvin cycle".to_string()])
        );

        let quiz: QuizResponse = serde_json::from_value(json!({ "quiz": "not a list" })).unwrap();
        assert!(quiz.quiz.is_none());
    }

    #[test]
    fn test_quiz_attempt_wire_names() {
        let mut selections = BTreeMap::new();
        selections.insert("0".to_string(), Some("A".to_string()));
        selections.insert("1".to_string(), None);
        let attempt = QuizAttempt {
            original_quiz: vec![Question::default()],
            user_selections: selections,
            score: 1,
            total_questions: 2,
            subject: "history".into(),
        };

        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["userSelections"], json!({ "0": "A", "1": null }));
        assert_eq!(value["totalQuestions"], json!(2));
        assert!(value.get("originalQuiz").is_some());
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Difficulty::Medium).unwrap(), json!("medium"));
    }
}
