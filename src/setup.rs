use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::{PerspectiveProjection, Projection};
use bevy::window::PrimaryWindow;

use crate::camera::CameraState;
use crate::environment::{fog_for, BloomParams, EnvironmentState};
use crate::scene::SceneStartupSet;

#[derive(Component)]
pub struct MainCamera;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("no primary window to draw into")]
    MissingSurface,
}

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, require_drawing_surface.in_set(SceneStartupSet::Surface))
            .add_systems(Startup, spawn_main_camera.in_set(SceneStartupSet::Spawn));
    }
}

/// Fails startup before any scene content exists when there is nowhere to draw.
pub fn require_drawing_surface(windows: Query<(), With<PrimaryWindow>>) -> Result {
    windows.single().map_err(|_| SceneError::MissingSurface)?;
    Ok(())
}

pub fn spawn_main_camera(
    mut commands: Commands,
    rig: Res<CameraState>,
    env: Res<EnvironmentState>,
    bloom: Res<BloomParams>,
) {
    commands.spawn((
        Camera3d::default(),
        Camera { hdr: true, ..default() },
        Tonemapping::AcesFitted,
        Projection::Perspective(PerspectiveProjection {
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 2000.0,
            ..default()
        }),
        Transform::from_translation(rig.position).looking_at(rig.look_at, Vec3::Y),
        bloom.bloom(),
        fog_for(&env),
        Name::new("Main camera"),
        MainCamera,
    ));
}
