pub mod actions;
pub mod app;
pub mod error_modal;
pub mod modal;
pub mod panels;
pub mod settings;
pub mod theme;
pub mod top_bar;

pub use app::StudyApp;
