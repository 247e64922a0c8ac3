//! The one grass material every vegetation batch shares.
//!
//! The wind sway lives in `grass_wind.wgsl`, embedded at build time and bound
//! as a `StandardMaterial` extension with a single declared uniform.

use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};

use crate::terrain::hex_color;

pub const GRASS_WIND_SHADER_PATH: &str = "embedded://teebox/vegetation/grass_wind.wgsl";

/// Tuning for the sway. Time is written every tick; the rest is fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindParams {
    pub strength: f32,
    pub speed: f32,
    /// Spatial phase per world unit along X and Z.
    pub phase_scale: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self { strength: 0.15, speed: 1.5, phase_scale: 0.5 }
    }
}

impl WindParams {
    pub fn validate(&self) -> Result<(), WindMaterialError> {
        let ok = [self.strength, self.speed, self.phase_scale].iter().all(|v| v.is_finite())
            && self.strength >= 0.0;
        if ok { Ok(()) } else { Err(WindMaterialError::InvalidParams(*self)) }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect, ShaderType)]
pub struct WindUniform {
    pub time: f32,
    pub strength: f32,
    pub speed: f32,
    pub phase_scale: f32,
}

#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
pub struct WindExtension {
    #[uniform(100)]
    pub wind: WindUniform,
}

impl WindExtension {
    pub fn new(params: WindParams) -> Self {
        Self {
            wind: WindUniform {
                time: 0.0,
                strength: params.strength,
                speed: params.speed,
                phase_scale: params.phase_scale,
            },
        }
    }
}

impl MaterialExtension for WindExtension {
    fn vertex_shader() -> ShaderRef {
        GRASS_WIND_SHADER_PATH.into()
    }
}

pub type GrassWindMaterial = ExtendedMaterial<StandardMaterial, WindExtension>;

/// Handle to whichever grass material variant got built.
#[derive(Clone, Debug, PartialEq)]
pub enum GrassMaterial {
    Animated(Handle<GrassWindMaterial>),
    /// No sway; used when the wind material could not be built.
    Static(Handle<StandardMaterial>),
}

/// Shader contexts that receive the wind time each tick.
#[derive(Resource, Debug, Default)]
pub struct WindContexts {
    pub materials: Vec<Handle<GrassWindMaterial>>,
    /// Last time value pushed, in seconds.
    pub last_time: f32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WindMaterialError {
    #[error("wind animation disabled in settings")]
    Disabled,
    #[error("wind material pipeline is not registered with the renderer")]
    PipelineMissing,
    #[error("wind parameters out of range: {0:?}")]
    InvalidParams(WindParams),
}

/// Base PBR look shared by both variants.
pub fn grass_base_material() -> StandardMaterial {
    StandardMaterial {
        base_color: hex_color(0x27ae60),
        perceptual_roughness: 0.7,
        metallic: 0.1,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}
