use eframe::egui;

use super::error_line;
use crate::{
    features::{
        simulation::SimulationLauncher,
        Command,
        Subject,
    },
    gui::actions::ActionQueue,
};

pub fn show(
    ui: &mut egui::Ui,
    launcher: &mut SimulationLauncher,
    subject: Subject,
    actions: &mut ActionQueue,
) {
    let catalogue = subject.simulations();
    ui.label("Pick an experiment to open it in your browser.");

    ui.horizontal(|ui| {
        let selected = launcher
            .selected
            .and_then(|id| catalogue.iter().find(|s| s.id == id))
            .map(|s| s.title)
            .unwrap_or("Select an experiment...");

        egui::ComboBox::from_id_salt("simulation_select")
            .selected_text(selected)
            .width(220.0)
            .show_ui(ui, |ui| {
                for simulation in catalogue {
                    let value = Some(simulation.id);
                    ui.selectable_value(&mut launcher.selected, value, simulation.title);
                }
            });

        if ui.button("Launch").clicked() {
            actions.push(Command::LaunchSimulation);
        }
    });

    if let Some(error) = &launcher.error {
        error_line(ui, error);
    }
}
