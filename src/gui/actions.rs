use crate::features::Command;

/// Clicks collected while a frame is drawn, applied to the workspace once
/// drawing is done so panels only need shared access to feature state.
#[derive(Debug, Default)]
pub struct ActionQueue {
    commands: Vec<Command>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
