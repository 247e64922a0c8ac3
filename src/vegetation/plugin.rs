// src/vegetation/plugin.rs
use bevy::asset::embedded_asset;
use bevy::prelude::*;

use super::components::SeedVegetation;
use super::material::{GrassWindMaterial, WindContexts, WindParams};
use super::systems::{advance_wind_time, spawn_requested_patches, GrassAssets};
use crate::scene::SceneSet;

/// Density and wind tuning for grass.
#[derive(Resource, Clone, Debug)]
pub struct VegetationSettings {
    pub seed: u64,
    /// Blades per rough-type ground rectangle.
    pub rough_density: usize,
    /// Blades per playable turf rectangle.
    pub turf_density: usize,
    pub animate_wind: bool,
    pub wind: WindParams,
}

impl Default for VegetationSettings {
    fn default() -> Self {
        Self {
            seed: 1337,
            rough_density: 3000,
            turf_density: 1000,
            animate_wind: true,
            wind: WindParams::default(),
        }
    }
}

/// Grass batches and the shared wind clock. Needs the render stack for sway;
/// without it grass still spawns with a static material.
pub struct VegetationPlugin;

impl Plugin for VegetationPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "grass_wind.wgsl");

        app.init_resource::<VegetationSettings>()
            .init_resource::<GrassAssets>()
            .init_resource::<WindContexts>()
            .add_event::<SeedVegetation>()
            .add_systems(Update, spawn_requested_patches.in_set(SceneSet::Build))
            .add_systems(Update, advance_wind_time.in_set(SceneSet::Animate));
    }
}

/// Registers the wind material pipeline. Kept separate so headless apps can skip it.
pub struct GrassWindMaterialPlugin;

impl Plugin for GrassWindMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GrassWindMaterial>::default());
    }
}
