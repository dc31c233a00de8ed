use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use serde_json::Value;

use crate::{
    api::Endpoint,
    core::RequestFailure,
};

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

/// Tags a request with the state that sent it, so a reply can be matched
/// against the state that is current when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin(u64);

impl Origin {
    /// A tag no earlier call has returned.
    pub fn next() -> Self {
        Self(NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    Response { origin: Origin, endpoint: Endpoint, result: Result<Value, RequestFailure> },
    Narration(Result<(), String>),
    Navigation { url: String, result: Result<(), String> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Response { .. } => "response",
            TaskResult::Narration(_) => "narration",
            TaskResult::Navigation { .. } => "navigation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_are_unique() {
        let first = Origin::next();
        let second = Origin::next();
        assert_ne!(first, second);
    }
}
