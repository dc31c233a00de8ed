use eframe::egui;
use studyroom::{
    core::{
        tasks::TaskManager,
        Backend,
        StudyError,
    },
    gui::{
        settings::{
            data::{
                BACKEND_URL_ENV,
                DEFAULT_BACKEND_URL,
                SETTINGS_FILE,
            },
            SettingsData,
        },
        StudyApp,
    },
    persistence::load_json_or_default,
};

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters("studyroom=info"),
    };
    builder.init();
}

fn connect(settings: &mut SettingsData) -> Result<TaskManager, StudyError> {
    let backend = match Backend::new(&settings.backend_url, settings.request_timeout()) {
        Ok(backend) => backend,
        Err(e) => {
            log::warn!(
                "[Startup] Backend URL '{}' is unusable ({}), falling back to {}",
                settings.backend_url,
                e,
                DEFAULT_BACKEND_URL
            );
            settings.backend_url = DEFAULT_BACKEND_URL.to_string();
            Backend::new(DEFAULT_BACKEND_URL, settings.request_timeout())?
        }
    };
    TaskManager::new(backend)
}

fn main() -> eframe::Result<()> {
    init_logging();

    let mut settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    settings.apply_backend_override(std::env::var(BACKEND_URL_ENV).ok());

    let task_manager = match connect(&mut settings) {
        Ok(task_manager) => task_manager,
        Err(e) => {
            log::error!("[Startup] Could not start background tasks: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Study Room",
        options,
        Box::new(move |cc| Ok(Box::new(StudyApp::new(cc, settings, task_manager)))),
    )
}
