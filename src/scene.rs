// src/scene.rs
use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::ball::BallPlugin;
use crate::camera::CameraRigPlugin;
use crate::environment::{EnvironmentPlugin, SkyMaterialPlugin};
use crate::input::KeyBindingsPlugin;
use crate::setup::SetupPlugin;
use crate::state::ReportedPhase;
use crate::terrain::TerrainPlugin;
use crate::vegetation::{GrassWindMaterialPlugin, VegetationPlugin};

/// Per-frame order: build pending geometry, apply inputs, advance wind, mirror state.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Build,
    ApplyInputs,
    Animate,
    Sync,
}

/// Startup order: check for a drawing surface before anything is spawned.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneStartupSet {
    Surface,
    Spawn,
}

/// Set ordering plus the state shared with the physics bridge.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Startup, (SceneStartupSet::Surface, SceneStartupSet::Spawn).chain())
            .configure_sets(
                Update,
                (SceneSet::Build, SceneSet::ApplyInputs, SceneSet::Animate, SceneSet::Sync).chain(),
            )
            .init_resource::<ReportedPhase>();
    }
}

/// Everything the course scene needs except the engine's `DefaultPlugins`.
pub struct CourseScenePlugins;

impl PluginGroup for CourseScenePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ScenePlugin)
            .add(SetupPlugin)                // surface check + main camera
            .add(EnvironmentPlugin)          // lights, fog, sky, viewport
            .add(SkyMaterialPlugin)
            .add(VegetationPlugin)           // grass batches + wind clock
            .add(GrassWindMaterialPlugin)
            .add(TerrainPlugin)              // course layout -> ground + physics
            .add(BallPlugin)
            .add(CameraRigPlugin)
            .add(KeyBindingsPlugin)
    }
}
