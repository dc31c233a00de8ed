use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::features::Subject;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV: &str = "STUDYROOM_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub backend_url: String,
    pub subject: Subject,
    pub request_timeout_secs: Option<u64>,
    pub narrator_command: Option<String>,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            subject: Subject::default(),
            request_timeout_secs: None,
            narrator_command: None,
            dark_mode: true,
        }
    }
}

impl SettingsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the backend URL with `value` when it is set and not blank.
    pub fn apply_backend_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            log::info!("[Settings] Backend URL overridden by {}: {}", BACKEND_URL_ENV, url);
            self.backend_url = url;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    pub fn narrator(&self) -> Option<&str> {
        self.narrator_command.as_deref().map(str::trim).filter(|cmd| !cmd.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{ "subject": "geography" }"#).unwrap();
        assert_eq!(settings.subject, Subject::Geography);
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert!(settings.dark_mode);
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn test_backend_override() {
        let mut settings = SettingsData::new();
        settings.apply_backend_override(Some("   ".into()));
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);

        settings.apply_backend_override(Some(" http://tutor.local:8080 ".into()));
        assert_eq!(settings.backend_url, "http://tutor.local:8080");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let mut settings = SettingsData::new();
        settings.request_timeout_secs = Some(0);
        assert!(settings.request_timeout().is_none());
        settings.request_timeout_secs = Some(45);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_blank_narrator_is_none() {
        let mut settings = SettingsData::new();
        settings.narrator_command = Some("  ".into());
        assert!(settings.narrator().is_none());
        settings.narrator_command = Some("espeak -s 150".into());
        assert_eq!(settings.narrator(), Some("espeak -s 150"));
    }
}
