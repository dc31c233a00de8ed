use std::{
    process::Command,
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use eframe::egui;
use tokio::runtime::Runtime;

use super::{
    Origin,
    TaskResult,
};
use crate::{
    api::{
        Endpoint,
        RequestBody,
    },
    core::{
        Backend,
        RequestFailure,
        StudyError,
    },
};

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    backend: Backend,
    repaint: Option<egui::Context>,
}

impl TaskManager {
    pub fn new(backend: Backend) -> Result<Self, StudyError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, backend, repaint: None })
    }

    /// Wakes the UI whenever a task finishes.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        log::info!("[Tasks] Backend set to {}", backend.base_url());
        self.backend = backend;
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Option<egui::Context>) {
        (self.sender.clone(), self.repaint.clone())
    }

    /// Posts `body` to `endpoint`. The reply comes back tagged with `origin`.
    pub fn send_request(&self, origin: Origin, endpoint: Endpoint, body: RequestBody) {
        let (sender, repaint) = self.task_context();
        let backend = self.backend.clone();

        self.runtime.spawn(async move {
            let result = backend.send(endpoint, body).await.map_err(|e| {
                log::error!("[Tasks] {} failed: {}", endpoint.path(), e);
                RequestFailure::from(e)
            });

            let _ = sender.send(TaskResult::Response { origin, endpoint, result });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Opens `path` under the backend base URL in the system browser.
    pub fn open_in_browser(&self, path: &str) {
        let (sender, repaint) = self.task_context();
        let url = match self.backend.url_for(path) {
            Ok(url) => url.to_string(),
            Err(e) => {
                let _ = sender.send(TaskResult::Navigation {
                    url: path.to_string(),
                    result: Err(e.to_string()),
                });
                return;
            }
        };

        thread::spawn(move || {
            log::info!("[Tasks] Opening {}", url);
            let result = open::that(&url).map_err(|e| e.to_string());
            let _ = sender.send(TaskResult::Navigation { url, result });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Runs the narrator command with `text` as its last argument. See
    /// [`split_command`] for how the command is split.
    pub fn narrate(&self, narrator: &str, text: String) {
        let (sender, repaint) = self.task_context();
        let mut parts = split_command(narrator).into_iter();
        let Some(program) = parts.next() else {
            let _ = sender.send(TaskResult::Narration(Err("Narrator command is empty".into())));
            return;
        };
        let args: Vec<String> = parts.collect();

        thread::spawn(move || {
            let result = Command::new(&program)
                .args(&args)
                .arg(&text)
                .status()
                .map_err(|e| format!("Failed to start {program}: {e}"))
                .and_then(|status| {
                    if status.success() {
                        Ok(())
                    } else {
                        Err(format!("{program} exited with {status}"))
                    }
                });
            let _ = sender.send(TaskResult::Narration(result));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

/// Splits a command line on whitespace. Single or double quotes group a
/// word that contains spaces and are removed. Backslashes are kept as-is so
/// Windows paths pass through untouched.
pub fn split_command(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in command.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => word.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            None => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}

#[cfg(test)]
mod tests {
    use std::{
        net::TcpListener,
        time::{
            Duration,
            Instant,
        },
    };

    use serde_json::json;

    use super::*;

    fn wait_for_result(manager: &mut TaskManager) -> TaskResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = manager.poll_results().pop() {
                return result;
            }
            assert!(Instant::now() < deadline, "No task result arrived");
            thread::sleep(Duration::from_millis(20));
        }
    }

    #[test]
    fn test_unreachable_backend_reports_transport_failure() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let backend = Backend::new(&format!("http://{addr}"), Some(Duration::from_secs(5))).unwrap();
        let mut manager = TaskManager::new(backend).unwrap();

        let origin = Origin::next();
        manager.send_request(origin, Endpoint::Summary, RequestBody::Json(json!({ "text": "x" })));

        match wait_for_result(&mut manager) {
            TaskResult::Response { origin: reply_origin, endpoint, result } => {
                assert_eq!(reply_origin, origin);
                assert_eq!(endpoint, Endpoint::Summary);
                assert!(result.unwrap_err().is_transport());
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_split_command_honours_quotes() {
        assert_eq!(split_command("espeak -s 150"), vec!["espeak", "-s", "150"]);
        assert_eq!(
            split_command(r#""C:\Program Files\eSpeak\espeak.exe" -v 'en us'"#),
            vec![r"C:\Program Files\eSpeak\espeak.exe", "-v", "en us"]
        );
        assert_eq!(split_command("say -v ''"), vec!["say", "-v", ""]);
        assert!(split_command("   ").is_empty());
    }

    #[test]
    fn test_empty_narrator_command() {
        let backend = Backend::new("http://127.0.0.1:5000", None).unwrap();
        let mut manager = TaskManager::new(backend).unwrap();
        manager.narrate("   ", "hello".into());
        assert_eq!(wait_for_result(&mut manager).task_type(), "narration");
    }
}
