use super::Effect;
use crate::{
    api::simulation_path,
    core::StudyError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulation {
    pub id: &'static str,
    pub title: &'static str,
}

pub const PHYSICS_SIMULATIONS: [Simulation; 4] = [
    Simulation { id: "torsional-pendulum", title: "Torsional Pendulum" },
    Simulation { id: "spring-constant", title: "Spring Constant" },
    Simulation { id: "laser-diffraction", title: "Laser Diffraction" },
    Simulation { id: "hall-effect", title: "Hall Effect" },
];

pub const CHEMISTRY_SIMULATIONS: [Simulation; 1] =
    [Simulation { id: "copper-brass", title: "Copper in Brass" }];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationLauncher {
    pub selected: Option<&'static str>,
    pub error: Option<String>,
}

impl SimulationLauncher {
    pub fn launch(&mut self) -> Result<Effect, StudyError> {
        self.error = None;
        match self.selected {
            Some(id) => {
                log::info!("[Simulation] Opening {}", id);
                Ok(Effect::Navigate(simulation_path(id)))
            }
            None => {
                let err = StudyError::validation("Please select an experiment first.");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
