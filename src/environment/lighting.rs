use bevy::core_pipeline::bloom::{Bloom, BloomCompositeMode, BloomPrefilter};
use bevy::pbr::{CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;

use super::weather::EnvironmentState;
use crate::setup::MainCamera;
use crate::terrain::hex_color;

pub const SKY_BLUE: u32 = 0x87ceeb;
pub const SUN_POSITION: Vec3 = Vec3::new(200.0, 300.0, 100.0);

#[derive(Component)]
pub struct Sun;

/// Sun shadow frustum.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub map_size: usize,
    /// Half width of the square the sun's shadows cover, centred on the tee.
    pub half_extent: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self { map_size: 4096, half_extent: 200.0 }
    }
}

/// Bright-pass bloom tuning.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self { threshold: 0.7, strength: 0.4, radius: 0.2 }
    }
}

impl BloomParams {
    pub fn bloom(&self) -> Bloom {
        Bloom {
            intensity: self.strength,
            low_frequency_boost: self.radius,
            prefilter: BloomPrefilter { threshold: self.threshold, threshold_softness: 0.0 },
            // Thresholded bloom only adds light above the bright pass.
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        }
    }
}

pub fn fog_for(state: &EnvironmentState) -> DistanceFog {
    DistanceFog {
        color: hex_color(SKY_BLUE),
        falloff: FogFalloff::ExponentialSquared { density: state.fog_density },
        ..default()
    }
}

/// Sky-tinted ambient, the shadowed sun and the shadow map size.
pub fn spawn_lighting(mut commands: Commands, state: Res<EnvironmentState>, shadows: Res<ShadowSettings>) {
    commands.insert_resource(ClearColor(hex_color(SKY_BLUE)));
    commands.insert_resource(AmbientLight {
        color: hex_color(SKY_BLUE),
        brightness: 400.0,
        ..default()
    });
    commands.insert_resource(DirectionalLightShadowMap { size: shadows.map_size });

    // One cascade reaching the far corner of the covered square.
    let reach = shadows.half_extent * 2.0;
    let cascades = CascadeShadowConfigBuilder {
        num_cascades: 1,
        minimum_distance: 0.1,
        maximum_distance: reach,
        first_cascade_far_bound: reach,
        overlap_proportion: 0.0,
    }
    .build();

    commands.spawn((
        DirectionalLight {
            illuminance: state.sun_illuminance(),
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        cascades,
        Name::new("Sun"),
        Sun,
    ));
}

/// Mirror the environment state onto the sun and the camera fog.
pub fn sync_environment(
    state: Res<EnvironmentState>,
    mut suns: Query<&mut DirectionalLight, With<Sun>>,
    mut fogs: Query<&mut DistanceFog, With<MainCamera>>,
) {
    for mut light in &mut suns {
        light.illuminance = state.sun_illuminance();
    }
    for mut fog in &mut fogs {
        fog.falloff = FogFalloff::ExponentialSquared { density: state.fog_density };
    }
}
