use bevy::asset::embedded_asset;
use bevy::prelude::*;

use super::lighting::{spawn_lighting, sync_environment, BloomParams, ShadowSettings};
use super::sky::{follow_camera_with_sky, spawn_sky, SkyMaterial, SkyParams};
use super::viewport::{on_resize, ViewportSize};
use super::weather::{EnvironmentState, SetEnvironment};
use crate::scene::{SceneSet, SceneStartupSet};
use bevy::window::WindowResized;

/// Lights, weather, fog, sky and viewport handling.
pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "sky.wgsl");

        app.init_resource::<EnvironmentState>()
            .init_resource::<SkyParams>()
            .init_resource::<BloomParams>()
            .init_resource::<ShadowSettings>()
            .init_resource::<ViewportSize>()
            .add_event::<SetEnvironment>()
            .add_event::<WindowResized>()
            .add_systems(Startup, (spawn_lighting, spawn_sky).in_set(SceneStartupSet::Spawn))
            .add_systems(Update, (apply_environment_requests, on_resize).in_set(SceneSet::ApplyInputs))
            .add_systems(
                Update,
                (
                    sync_environment.run_if(resource_changed::<EnvironmentState>),
                    follow_camera_with_sky,
                )
                    .in_set(SceneSet::Sync),
            );
    }
}

/// Registers the sky pipeline. Kept separate so headless apps can skip it.
pub struct SkyMaterialPlugin;

impl Plugin for SkyMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<SkyMaterial>::default());
    }
}

pub fn apply_environment_requests(mut requests: EventReader<SetEnvironment>, mut state: ResMut<EnvironmentState>) {
    for SetEnvironment(config) in requests.read() {
        state.apply(*config);
        info!(
            "Environment: {:?} (fog {}, sun {})",
            state.weather, state.fog_density, state.sun_intensity
        );
    }
}
