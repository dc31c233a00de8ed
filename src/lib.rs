pub mod api;
pub mod core;
pub mod features;
pub mod format;
pub mod gui;
pub mod persistence;
