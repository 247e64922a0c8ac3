// src/environment/sky.rs
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey, NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};

pub const SKY_SHADER_PATH: &str = "embedded://teebox/environment/sky.wgsl";
/// Inside the camera's far plane.
pub const SKY_RADIUS: f32 = 1500.0;

/// Atmosphere inputs for the scattering model. Angles in degrees.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SkyParams {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation: f32,
    pub azimuth: f32,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.7,
            elevation: 2.0,
            azimuth: 180.0,
        }
    }
}

impl SkyParams {
    pub fn sun_direction(&self) -> Vec3 {
        sun_direction(self.elevation, self.azimuth)
    }

    pub fn uniform(&self) -> SkyUniform {
        SkyUniform {
            sun_direction: self.sun_direction(),
            turbidity: self.turbidity,
            rayleigh: self.rayleigh,
            mie_coefficient: self.mie_coefficient,
            mie_directional_g: self.mie_directional_g,
        }
    }
}

/// Unit vector toward the sun: polar angle `90° - elevation` from +Y,
/// azimuth measured from +Z toward +X.
pub fn sun_direction(elevation_deg: f32, azimuth_deg: f32) -> Vec3 {
    let phi = (90.0 - elevation_deg).to_radians();
    let theta = azimuth_deg.to_radians();
    Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
}

#[derive(ShaderType, Debug, Clone, Copy)]
pub struct SkyUniform {
    pub sun_direction: Vec3,
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
}

/// Drawn on the inside of a huge sphere, so both faces are kept.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SkyMaterial {
    #[uniform(0)]
    pub sky: SkyUniform,
}

impl Material for SkyMaterial {
    fn fragment_shader() -> ShaderRef {
        SKY_SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

#[derive(Component)]
pub struct SkyDome;

/// Spawns the sky dome when the sky pipeline is registered; headless apps skip it.
pub fn spawn_sky(
    mut commands: Commands,
    params: Res<SkyParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    sky_materials: Option<ResMut<Assets<SkyMaterial>>>,
) {
    let Some(mut sky_materials) = sky_materials else {
        warn!("Sky: material pipeline not registered; clear colour only");
        return;
    };
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SKY_RADIUS).mesh().uv(32, 18))),
        MeshMaterial3d(sky_materials.add(SkyMaterial { sky: params.uniform() })),
        Transform::default(),
        Name::new("Sky dome"),
        SkyDome,
        NotShadowCaster,
        NotShadowReceiver,
    ));
    let dir = params.sun_direction();
    info!("Sky: sun at ({:.3}, {:.3}, {:.3})", dir.x, dir.y, dir.z);
}

/// Keep the dome centred on the viewer so it never clips.
pub fn follow_camera_with_sky(
    cameras: Query<&Transform, (With<crate::setup::MainCamera>, Without<SkyDome>)>,
    mut domes: Query<&mut Transform, With<SkyDome>>,
) {
    let Ok(cam) = cameras.single() else { return };
    for mut tf in &mut domes {
        tf.translation = cam.translation;
    }
}
