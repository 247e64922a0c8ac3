use bevy::prelude::*;
use std::collections::HashMap;

use crate::camera::CameraMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    AimLeft,
    AimRight,
    View(CameraMode),
    EnterPutting,
    ToggleWeather,
    CyclePhase,
}

/// Actions triggered this frame.
#[derive(Default, Resource)]
pub struct ActionState {
    triggered: HashMap<PlayerAction, bool>,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, triggered: bool) {
        self.triggered.insert(action, triggered);
    }

    pub fn triggered(&self, action: PlayerAction) -> bool {
        *self.triggered.get(&action).unwrap_or(&false)
    }
}
