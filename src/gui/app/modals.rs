use crate::gui::{
    error_modal::ErrorModal,
    settings::SettingsModal,
};

#[derive(Default)]
pub struct Modals {
    pub error: ErrorModal,
    pub settings: SettingsModal,
}
