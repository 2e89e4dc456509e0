//! Per-tick input snapshot
//!
//! The platform layer samples devices once per tick and hands the core this
//! record. The core never polls devices itself.

use serde::{Deserialize, Serialize};

/// Control states for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// Jump in side view, thrust while flying
    pub up: bool,
    /// Only read by the top-down motion mode
    pub down: bool,
    /// Depth axis: toward the screen
    pub forward: bool,
    /// Depth axis: away from the screen
    pub backward: bool,
    /// Keyboard attack binding
    pub attack: bool,
    /// Primary pointer button
    pub pointer_primary: bool,
    /// Start a game from the menu
    pub activate: bool,
    /// Acknowledge round-complete / game-over screens
    pub confirm: bool,
    /// Abandon the current game
    pub back_to_menu: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl InputSnapshot {
    /// Attack is requested by either binding
    pub fn attack_requested(&self) -> bool {
        self.attack || self.pointer_primary
    }
}
