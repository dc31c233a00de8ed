use std::{
    path::Path,
    time::Duration,
};

use reqwest::{
    multipart::{
        Form,
        Part,
    },
    Client,
    StatusCode,
};
use serde_json::Value;
use url::Url;

use crate::{
    api::{
        Endpoint,
        FormField,
        RequestBody,
    },
    core::StudyError,
};

pub fn http_client(timeout: Option<Duration>) -> Result<Client, StudyError> {
    let mut builder = Client::builder().cookie_store(true).user_agent("studyroom/0.3 (+reqwest)");
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| StudyError::Custom(format!("HTTP client build failed: {e}")))
}

/// Handle to the content-generation backend.
#[derive(Clone)]
pub struct Backend {
    client: Client,
    base_url: Url,
}

impl Backend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, StudyError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self { client: http_client(timeout)?, base_url: Url::parse(&base)? })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> Result<Url, StudyError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Posts `body` to `endpoint` and applies the shared success/failure contract.
    pub async fn send(&self, endpoint: Endpoint, body: RequestBody) -> Result<Value, StudyError> {
        let url = self.url_for(endpoint.path())?;
        let request = self.client.post(url);
        let request = match body {
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Multipart(fields) => request.multipart(build_form(fields).await?),
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        interpret_response(status, &bytes)
    }
}

async fn build_form(fields: Vec<FormField>) -> Result<Form, StudyError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, path } => {
                let bytes = tokio::fs::read(&path).await?;
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("upload")
                    .to_string();
                let part = Part::bytes(bytes).file_name(file_name).mime_str(mime_for(&path))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

const GENERIC_STATUS_PREFIX: &str = "HTTP error! status:";

pub fn generic_status_message(status: StatusCode) -> String {
    format!("{GENERIC_STATUS_PREFIX} {} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
        .trim_end()
        .to_string()
}

/// Whether `message` was synthesized from the status line rather than sent by the server.
pub fn is_generic_status_message(message: &str) -> bool {
    message.starts_with(GENERIC_STATUS_PREFIX)
}

fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Maps a raw response onto the feature contract: non-2xx or a body carrying
/// `error` is a failure, anything else must be a JSON document.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, StudyError> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(|value| field_text(value, "error").or_else(|| field_text(value, "reply")))
            .unwrap_or_else(|| generic_status_message(status));
        return Err(StudyError::Http { status: status.as_u16(), message });
    }

    let value = parsed.ok_or_else(|| {
        StudyError::payload("The server returned a response that was not valid JSON.")
    })?;

    if let Some(message) = field_text(&value, "error") {
        return Err(StudyError::Http { status: status.as_u16(), message });
    }

    Ok(value)
}
