use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use crate::actions::{ActionState, PlayerAction};
use crate::camera::{AimDirection, CameraMode, CameraRequest};
use crate::environment::{EnvironmentConfig, EnvironmentState, SetEnvironment};
use crate::scene::SceneSet;
use crate::state::ReportedPhase;

pub const KEY_BINDINGS: [(KeyCode, PlayerAction); 9] = [
    (KeyCode::ArrowLeft, PlayerAction::AimLeft),
    (KeyCode::ArrowRight, PlayerAction::AimRight),
    (KeyCode::Digit1, PlayerAction::View(CameraMode::Tee)),
    (KeyCode::Digit2, PlayerAction::View(CameraMode::Follow)),
    (KeyCode::Digit3, PlayerAction::View(CameraMode::Top)),
    (KeyCode::Digit4, PlayerAction::View(CameraMode::Putting)),
    (KeyCode::KeyP, PlayerAction::EnterPutting),
    (KeyCode::KeyF, PlayerAction::ToggleWeather),
    (KeyCode::Space, PlayerAction::CyclePhase),
];

/// Keyboard control for the standalone binary. Embedders drive the scene
/// through the same events instead.
pub struct KeyBindingsPlugin;

impl Plugin for KeyBindingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionState>().add_systems(
            Update,
            (input_mapping_system, dispatch_actions)
                .chain()
                .before(SceneSet::ApplyInputs)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}

pub fn input_mapping_system(keys: Res<ButtonInput<KeyCode>>, mut action_state: ResMut<ActionState>) {
    for (key, action) in KEY_BINDINGS {
        action_state.set(action, keys.just_pressed(key));
    }
}

/// Turn this frame's actions into scene requests.
pub fn dispatch_actions(
    action_state: Res<ActionState>,
    env: Res<EnvironmentState>,
    mut phase: ResMut<ReportedPhase>,
    mut camera: EventWriter<CameraRequest>,
    mut weather: EventWriter<SetEnvironment>,
) {
    if action_state.triggered(PlayerAction::AimLeft) {
        camera.write(CameraRequest::RotateAim(AimDirection::Left));
    }
    if action_state.triggered(PlayerAction::AimRight) {
        camera.write(CameraRequest::RotateAim(AimDirection::Right));
    }
    for mode in [CameraMode::Tee, CameraMode::Follow, CameraMode::Top, CameraMode::Putting] {
        if action_state.triggered(PlayerAction::View(mode)) {
            camera.write(CameraRequest::SetMode(mode));
        }
    }
    if action_state.triggered(PlayerAction::EnterPutting) {
        camera.write(CameraRequest::EnterPutting);
    }
    if action_state.triggered(PlayerAction::ToggleWeather) {
        weather.write(SetEnvironment(EnvironmentConfig { weather: env.weather.toggled() }));
    }
    // Stand-in for the physics bridge when running without one.
    if action_state.triggered(PlayerAction::CyclePhase) {
        **phase = phase.cycled();
        info!("Phase: {:?}", **phase);
    }
}
