use chrono::{
    DateTime,
    Local,
};
use serde_json::Value;

use super::{
    decode,
    non_blank,
    Effect,
};
use crate::{
    api::{
        types::{
            ChatRequest,
            ReplyResponse,
        },
        Endpoint,
        RequestBody,
    },
    core::{
        http::is_generic_status_message,
        FailureKind,
        RequestFailure,
    },
};

pub const THINKING_MESSAGE: &str = "AI is thinking...";
pub const NO_REPLY_MESSAGE: &str = "Sorry, I couldn't get a response.";
pub const UNREACHABLE_MESSAGE: &str = "Network error. Could not reach the AI helper.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
    AiError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub temporary: bool,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.add(role, text.into(), false);
    }

    pub fn push_temporary(&mut self, role: Role, text: impl Into<String>) {
        self.add(role, text.into(), true);
    }

    /// Drops every temporary message, e.g. the "thinking" line once a reply lands.
    pub fn clear_temporary(&mut self) {
        self.messages.retain(|m| !m.temporary);
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn add(&mut self, role: Role, text: String, temporary: bool) {
        self.messages.push(ChatMessage { role, text, temporary, timestamp: Local::now() });
    }
}

/// The `reply` of a chat-style response, or the stock apology when absent.
pub fn reply_text(value: Value) -> String {
    decode::<ReplyResponse>(value, NO_REPLY_MESSAGE)
        .ok()
        .and_then(|r| r.reply)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| NO_REPLY_MESSAGE.to_string())
}

/// Text for a failed chat-style request: the server's own message when it
/// sent one, `Error: {status}` otherwise.
pub fn failure_text(failure: &RequestFailure) -> String {
    match (failure.kind, failure.status) {
        (FailureKind::Transport, _) => UNREACHABLE_MESSAGE.to_string(),
        (FailureKind::Http, Some(status)) if is_generic_status_message(&failure.message) => {
            format!("Error: {status}")
        }
        _ => failure.message.clone(),
    }
}

#[derive(Debug, Default)]
pub struct Chatbot {
    pub open: bool,
    pub input: String,
    pub waiting: bool,
    pub log: ChatLog,
}

impl Chatbot {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        log::info!("[Chatbot] Window {}", if self.open { "opened" } else { "closed" });
    }

    /// Blank messages and sends while a reply is pending are ignored.
    pub fn send(&mut self) -> Vec<Effect> {
        if self.waiting {
            return Vec::new();
        }
        let Some(message) = non_blank(Some(&self.input)).map(str::to_string) else {
            return Vec::new();
        };

        let body = match RequestBody::json(&ChatRequest { message: &message }) {
            Ok(body) => body,
            Err(e) => {
                log::error!("[Chatbot] Could not encode message: {}", e);
                return Vec::new();
            }
        };

        self.input.clear();
        self.log.push(Role::User, message);
        self.log.push_temporary(Role::Ai, THINKING_MESSAGE);
        self.waiting = true;
        log::info!("[Chatbot] Sending message to {}", Endpoint::ChatbotMessage.path());
        vec![Effect::Request { endpoint: Endpoint::ChatbotMessage, body }]
    }

    /// Replies only count while a message is pending.
    pub fn receive(&mut self, result: Result<Value, RequestFailure>) {
        if !self.waiting {
            log::warn!("[Chatbot] Ignoring a reply with no message pending");
            return;
        }
        self.log.clear_temporary();
        self.waiting = false;

        match result {
            Ok(value) => self.log.push(Role::Ai, reply_text(value)),
            Err(failure) => {
                log::error!("[Chatbot] Backend error: {}", failure.message);
                self.log.push(Role::AiError, failure_text(&failure));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_blank_message_ignored() {
        let mut bot = Chatbot::default();
        bot.input = "   ".into();
        assert!(bot.send().is_empty());
        assert!(bot.log.is_empty());
        assert!(!bot.waiting);
    }

    #[test]
    fn test_thinking_message_replaced_by_reply() {
        let mut bot = Chatbot::default();
        bot.input = "What is inertia?".into();
        let effects = bot.send();
        assert_eq!(
            effects,
            vec![Effect::Request {
                endpoint: Endpoint::ChatbotMessage,
                body: RequestBody::Json(json!({ "message": "What is inertia?" })),
            }]
        );
        assert!(bot.input.is_empty());
        assert!(bot.waiting);
        assert_eq!(bot.log.len(), 2);
        assert!(bot.log.last().unwrap().temporary);

        bot.input = "again".into();
        assert!(bot.send().is_empty());

        bot.receive(Ok(json!({ "reply": "Resistance to change in motion." })));
        assert!(!bot.waiting);
        assert_eq!(bot.log.len(), 2);
        let last = bot.log.last().unwrap();
        assert_eq!(last.role, Role::Ai);
        assert_eq!(last.text, "Resistance to change in motion.");
    }

    #[test]
    fn test_reply_without_pending_message_is_ignored() {
        let mut bot = Chatbot::default();
        bot.receive(Ok(json!({ "reply": "Unprompted" })));
        assert!(bot.log.is_empty());
        assert!(!bot.waiting);
    }

    #[test]
    fn test_missing_reply_fallback() {
        let mut bot = Chatbot::default();
        bot.input = "hi".into();
        bot.send();
        bot.receive(Ok(json!({})));
        assert_eq!(bot.log.last().unwrap().text, NO_REPLY_MESSAGE);
    }

    #[test]
    fn test_failure_texts() {
        assert_eq!(failure_text(&RequestFailure::transport()), UNREACHABLE_MESSAGE);
        assert_eq!(
            failure_text(&RequestFailure::http(503, "HTTP error! status: 503 Service Unavailable")),
            "Error: 503"
        );
        assert_eq!(
            failure_text(&RequestFailure::http(400, "Please ask a question.")),
            "Please ask a question."
        );

        let mut bot = Chatbot::default();
        bot.input = "hi".into();
        bot.send();
        bot.receive(Err(RequestFailure::transport()));
        let last = bot.log.last().unwrap();
        assert_eq!(last.role, Role::AiError);
        assert_eq!(last.text, UNREACHABLE_MESSAGE);
    }
}
