pub mod data;
pub mod modal;

pub use data::SettingsData;
pub use modal::SettingsModal;
