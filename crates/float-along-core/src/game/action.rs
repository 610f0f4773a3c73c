use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Discrete player input, already debounced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    ToggleMask,
    ToggleDevOverlay,
    Quit,
    SetupField,
    SetupBall,
    Confirm,
    ReshuffleGoal,
    Click(Point),
}

/// Presentation toggles that never affect game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewFlags {
    pub paused: bool,
    pub show_mask: bool,
    pub show_dev_overlay: bool,
    pub quit: bool,
}

impl ViewFlags {
    /// Applies a toggle action. Returns false for actions that are not view toggles.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::TogglePause => self.paused = !self.paused,
            Action::ToggleMask => self.show_mask = !self.show_mask,
            Action::ToggleDevOverlay => self.show_dev_overlay = !self.show_dev_overlay,
            Action::Quit => self.quit = true,
            _ => return false,
        }
        true
    }
}
