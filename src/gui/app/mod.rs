mod modals;

use std::mem;

use eframe::egui;
use modals::Modals;

use super::{
    actions::ActionQueue,
    panels::{
        self,
        chat::chat_window,
        Section,
    },
    settings::{
        data::SETTINGS_FILE,
        SettingsData,
    },
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        Backend,
    },
    features::{
        Effect,
        Subject,
        Workspace,
    },
    persistence::save_json,
};

pub struct StudyApp {
    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub workspace: Workspace,
    pub section: Section,
    pub theme: Theme,

    // Modals
    pub modals: Modals,

    task_manager: TaskManager,
}

fn first_section(subject: Subject) -> Section {
    panels::sections(subject).first().copied().unwrap_or(Section::PdfQa)
}

impl StudyApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
        mut task_manager: TaskManager,
    ) -> Self {
        task_manager.set_repaint_context(cc.egui_ctx.clone());

        let app = Self {
            workspace: Workspace::new(settings_data.subject),
            section: first_section(settings_data.subject),
            theme: Theme::default(),
            modals: Modals::default(),
            settings_data,
            task_manager,
        };

        app.setup_theme(cc);
        log::info!(
            "[App] Started on the {} page against {}",
            app.workspace.subject.title(),
            app.task_manager.backend().base_url()
        );
        app
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        set_theme(&cc.egui_ctx, &self.theme);
        apply_dark_mode(&cc.egui_ctx, self.settings_data.dark_mode);
    }
}

impl eframe::App for StudyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        if self.workspace.tick(ctx.input(|i| i.time)) {
            ctx.request_repaint();
        }

        let backend_url = self.task_manager.backend().base_url().to_string();
        if let Some(action) =
            TopBar::show(ctx, self.workspace.subject, self.workspace.chatbot.open, &backend_url)
        {
            match action {
                TopBarAction::SwitchSubject(subject) => self.switch_subject(subject),
                TopBarAction::OpenSettings => {
                    self.modals.settings.open_settings(self.settings_data.clone());
                }
                TopBarAction::ToggleChat => self.workspace.chatbot.toggle(),
            }
        }
        self.sync_dark_mode(ctx);

        let mut actions = ActionQueue::new();

        egui::SidePanel::left("sections").resizable(false).default_width(190.0).show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(self.theme.heading(ui, self.workspace.subject.title()));
            ui.separator();
            for section in panels::sections(self.workspace.subject) {
                let busy = match section {
                    Section::Tool(tool) => self.workspace.panel(tool).is_loading(),
                    Section::PdfQa => self.workspace.pdf_qa.busy(),
                    Section::Simulations => false,
                };
                let label = if busy {
                    format!("{} …", section.title())
                } else {
                    section.title().to_string()
                };
                ui.selectable_value(&mut self.section, section, label);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                let section = self.section;
                panels::show_section(ui, &mut self.workspace, section, &self.theme, &mut actions);
            });
        });

        chat_window(ctx, &mut self.workspace.chatbot, &self.theme, &mut actions);

        self.modals.error.show(ctx);
        if let Some(settings) = self.modals.settings.show(ctx) {
            self.apply_settings(settings, ctx);
        }

        if !actions.is_empty() {
            self.execute_actions(&mut actions);
            ctx.request_repaint();
        }
    }
}

impl StudyApp {
    fn handle_task_result(&mut self, result: TaskResult) {
        log::debug!("[App] Task finished: {}", result.task_type());
        match result {
            TaskResult::Response { origin, endpoint, result } => {
                self.workspace.receive(origin, endpoint, result)
            }
            TaskResult::Narration(Ok(())) => {}
            TaskResult::Narration(Err(error)) => self.modals.error.show_error(
                "Read Aloud Failed",
                "The narrator command could not read the text.",
                Some(error),
            ),
            TaskResult::Navigation { url, result: Ok(()) } => {
                log::info!("[App] Opened {} in the browser", url);
            }
            TaskResult::Navigation { url, result: Err(error) } => self.modals.error.show_error(
                "Could Not Open Browser",
                format!("Failed to open {url}."),
                Some(error),
            ),
        }
    }

    fn execute_actions(&mut self, actions: &mut ActionQueue) {
        for command in actions.drain() {
            let effects = self.workspace.dispatch(command);
            self.run_effects(effects);
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        let origin = self.workspace.origin();
        for effect in effects {
            match effect {
                Effect::Request { endpoint, body } => {
                    self.task_manager.send_request(origin, endpoint, body)
                }
                Effect::Navigate(path) => self.task_manager.open_in_browser(&path),
                Effect::Speak(text) => match self.settings_data.narrator() {
                    Some(narrator) => self.task_manager.narrate(narrator, text),
                    None => log::info!(
                        "[App] No narrator configured, skipping {} characters of read-aloud",
                        text.chars().count()
                    ),
                },
            }
        }
    }

    /// Rebuilds the page for `subject`. The chat helper and its history carry over.
    fn switch_subject(&mut self, subject: Subject) {
        log::info!("[App] Switching to the {} page", subject.title());
        let chatbot = mem::take(&mut self.workspace.chatbot);
        self.workspace = Workspace::new(subject);
        self.workspace.chatbot = chatbot;
        self.section = first_section(subject);

        self.settings_data.subject = subject;
        self.save_settings();
    }

    /// Keeps the saved theme in step with the top bar switch.
    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.theme() == egui::Theme::Dark;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn apply_settings(&mut self, settings: SettingsData, ctx: &egui::Context) {
        let backend_changed = settings.backend_url != self.settings_data.backend_url
            || settings.request_timeout() != self.settings_data.request_timeout();

        if backend_changed {
            match Backend::new(&settings.backend_url, settings.request_timeout()) {
                Ok(backend) => self.task_manager.set_backend(backend),
                Err(e) => {
                    self.modals.error.show_error(
                        "Invalid Backend",
                        "The backend settings could not be applied.",
                        Some(e.to_string()),
                    );
                    return;
                }
            }
        }

        if settings.dark_mode != self.settings_data.dark_mode {
            apply_dark_mode(ctx, settings.dark_mode);
        }

        self.settings_data = settings;
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            self.modals.error.show_error(
                "Settings Not Saved",
                "Your settings could not be written to disk.",
                Some(e.to_string()),
            );
        }
    }
}
