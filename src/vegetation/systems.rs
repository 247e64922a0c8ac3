// src/vegetation/systems.rs

use bevy::ecs::system::SystemParam;
use bevy::pbr::ExtendedMaterial;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, Mesh, PrimitiveTopology, VertexAttributeValues};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::components::{SeedVegetation, VegetationBatch, VegetationInstance};
use super::material::{
    grass_base_material, GrassMaterial, GrassWindMaterial, WindContexts, WindExtension, WindMaterialError,
};
use super::plugin::VegetationSettings;
use crate::physics::TerrainBounds;

pub const BLADE_RADIUS: f32 = 0.12;
pub const BLADE_HEIGHT: f32 = 0.5;
pub const SCALE_MIN: f32 = 0.6;
pub const SCALE_MAX: f32 = 1.8;

/// Lazily built assets every batch reuses.
#[derive(Resource, Default)]
pub struct GrassAssets {
    material: Option<GrassMaterial>,
    patches_created: u64,
}

impl GrassAssets {
    pub fn material(&self) -> Option<&GrassMaterial> {
        self.material.as_ref()
    }

    pub fn patches_created(&self) -> u64 {
        self.patches_created
    }
}

/// Everything needed to turn a rectangle into one grass batch.
#[derive(SystemParam)]
pub struct VegetationInstancer<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    std_materials: ResMut<'w, Assets<StandardMaterial>>,
    wind_materials: Option<ResMut<'w, Assets<GrassWindMaterial>>>,
    assets: ResMut<'w, GrassAssets>,
    contexts: ResMut<'w, WindContexts>,
    settings: Res<'w, VegetationSettings>,
}

impl VegetationInstancer<'_, '_> {
    /// The scene-wide grass material. Built on first call, then the same handle forever.
    pub fn grass_material(&mut self) -> GrassMaterial {
        if let Some(existing) = &self.assets.material {
            return existing.clone();
        }

        let material = match self.build_wind_material() {
            Ok(handle) => {
                self.contexts.materials.push(handle.clone());
                info!("Vegetation: wind-animated grass material ready");
                GrassMaterial::Animated(handle)
            }
            Err(err) => {
                warn!("Vegetation: {err}; falling back to static grass");
                GrassMaterial::Static(self.std_materials.add(grass_base_material()))
            }
        };
        self.assets.material = Some(material.clone());
        material
    }

    fn build_wind_material(&mut self) -> Result<Handle<GrassWindMaterial>, WindMaterialError> {
        if !self.settings.animate_wind {
            return Err(WindMaterialError::Disabled);
        }
        let params = self.settings.wind;
        params.validate()?;
        let Some(materials) = self.wind_materials.as_mut() else {
            return Err(WindMaterialError::PipelineMissing);
        };
        Ok(materials.add(ExtendedMaterial {
            base: grass_base_material(),
            extension: WindExtension::new(params),
        }))
    }

    /// Scatter `count` blades over the rectangle as one merged batch.
    /// Returns `None` when there is nothing to draw.
    pub fn create_patch(&mut self, x_min: f32, x_max: f32, z_min: f32, z_max: f32, count: usize) -> Option<Entity> {
        if count == 0 {
            debug!("Vegetation: skipping empty patch");
            return None;
        }
        if ![x_min, x_max, z_min, z_max].iter().all(|v| v.is_finite()) {
            warn!("Vegetation: non-finite patch bounds ({x_min}, {x_max}, {z_min}, {z_max}); skipped");
            return None;
        }
        let bounds = TerrainBounds {
            x_min: x_min.min(x_max),
            x_max: x_min.max(x_max),
            z_min: z_min.min(z_max),
            z_max: z_min.max(z_max),
        };

        let mut rng = patch_rng(self.settings.seed, self.assets.patches_created);
        self.assets.patches_created += 1;

        let instances = scatter_instances(&mut rng, &bounds, count);
        let Some(merged) = merge_instances(&blade_mesh(), &instances) else {
            warn!("Vegetation: blade mesh has no usable positions; patch skipped");
            return None;
        };
        let mesh = self.meshes.add(merged);
        let material = self.grass_material();

        let mut entity = self.commands.spawn((
            Mesh3d(mesh),
            Transform::default(),
            Visibility::default(),
            Name::new(format!(
                "Grass [{:.0}..{:.0}] x [{:.0}..{:.0}]",
                bounds.x_min, bounds.x_max, bounds.z_min, bounds.z_max
            )),
            VegetationBatch { bounds, instances },
        ));
        match material {
            GrassMaterial::Animated(h) => entity.insert(MeshMaterial3d(h)),
            GrassMaterial::Static(h) => entity.insert(MeshMaterial3d(h)),
        };

        info!(
            "Vegetation: patch {} with {} blades over x[{}, {}] z[{}, {}]",
            self.assets.patches_created, count, bounds.x_min, bounds.x_max, bounds.z_min, bounds.z_max
        );
        Some(entity.id())
    }
}

/// Stable per (seed, patch ordinal).
#[inline]
fn patch_rng(seed: u64, ordinal: u64) -> ChaCha8Rng {
    let mix = seed ^ ordinal.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ 0xA5A5_5A5A_D3F0_1234u64;
    ChaCha8Rng::seed_from_u64(mix)
}

/// Uniform samples inside `bounds`: yaw in `[0, PI)`, scale in `[0.6, 1.8)`.
pub fn scatter_instances<R: Rng>(rng: &mut R, bounds: &TerrainBounds, count: usize) -> Vec<VegetationInstance> {
    let size = bounds.size();
    (0..count)
        .map(|_| {
            let x = bounds.x_min + rng.random::<f32>() * size.x;
            let z = bounds.z_min + rng.random::<f32>() * size.y;
            VegetationInstance {
                position: Vec3::new(x.min(bounds.x_max), 0.0, z.min(bounds.z_max)),
                yaw: rng.random::<f32>() * std::f32::consts::PI,
                scale: SCALE_MIN + rng.random::<f32>() * (SCALE_MAX - SCALE_MIN),
            }
        })
        .collect()
}

/// Three-sided cone with its base on y = 0, so local y is blade height.
pub fn blade_mesh() -> Mesh {
    Cone::new(BLADE_RADIUS, BLADE_HEIGHT)
        .mesh()
        .resolution(3)
        .build()
        .translated_by(Vec3::Y * (BLADE_HEIGHT * 0.5))
}

/// Bake every instance transform into one mesh (positions, normals, UVs).
pub fn merge_instances(src: &Mesh, instances: &[VegetationInstance]) -> Option<Mesh> {
    let positions: Vec<[f32; 3]> = match src.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(v) => v.clone(),
        _ => return None,
    };
    let normals: Option<Vec<[f32; 3]>> = src.attribute(Mesh::ATTRIBUTE_NORMAL).and_then(|vals| match vals {
        VertexAttributeValues::Float32x3(v) => Some(v.clone()),
        _ => None,
    });
    let uvs: Option<Vec<[f32; 2]>> = src.attribute(Mesh::ATTRIBUTE_UV_0).and_then(|vals| match vals {
        VertexAttributeValues::Float32x2(v) => Some(v.clone()),
        _ => None,
    });
    let src_indices: Vec<u32> = match src.indices() {
        Some(Indices::U32(v)) => v.clone(),
        Some(Indices::U16(v)) => v.iter().map(|&x| x as u32).collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let src_vtx = positions.len();
    let n = instances.len();
    let mut out_positions = Vec::with_capacity(src_vtx * n);
    let mut out_normals = normals.as_ref().map(|_| Vec::with_capacity(src_vtx * n));
    let mut out_uvs = uvs.as_ref().map(|_| Vec::with_capacity(src_vtx * n));
    let mut out_indices = Vec::with_capacity(src_indices.len() * n);

    for (inst_id, inst) in instances.iter().enumerate() {
        let t = inst.transform();
        let trs = t.compute_matrix();

        for (i, p) in positions.iter().enumerate() {
            out_positions.push(trs.transform_point3(Vec3::from(*p)).to_array());
            if let (Some(src_n), Some(dst_n)) = (normals.as_ref(), out_normals.as_mut()) {
                dst_n.push((t.rotation * Vec3::from(src_n[i])).to_array());
            }
            if let (Some(src_uv), Some(dst_uv)) = (uvs.as_ref(), out_uvs.as_mut()) {
                dst_uv.push(src_uv[i]);
            }
        }

        let base = (inst_id * src_vtx) as u32;
        out_indices.extend(src_indices.iter().map(|&i| i + base));
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, Default::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, out_positions);
    if let Some(n) = out_normals {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, n);
    }
    if let Some(uv) = out_uvs {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uv);
    }
    mesh.insert_indices(Indices::U32(out_indices));
    Some(mesh)
}

/// Update: grow grass for every queued request.
pub fn spawn_requested_patches(mut evr: EventReader<SeedVegetation>, mut instancer: VegetationInstancer) {
    for req in evr.read() {
        let b = req.bounds;
        instancer.create_patch(b.x_min, b.x_max, b.z_min, b.z_max, req.count);
    }
}

/// Update: push one monotonic time value into every wind context.
pub fn advance_wind_time(
    time: Res<Time>,
    mut contexts: ResMut<WindContexts>,
    materials: Option<ResMut<Assets<GrassWindMaterial>>>,
) {
    let Some(mut materials) = materials else { return };
    if contexts.materials.is_empty() {
        return;
    }
    let t = time.elapsed_secs();
    for handle in &contexts.materials {
        if let Some(mat) = materials.get_mut(handle) {
            mat.extension.wind.time = t;
        }
    }
    contexts.last_time = t;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> TerrainBounds {
        TerrainBounds { x_min: -100.0, x_max: 100.0, z_min: -450.0, z_max: 100.0 }
    }

    #[test]
    fn scatter_stays_inside_bounds() {
        let mut rng = patch_rng(1337, 0);
        let b = bounds();
        let inst = scatter_instances(&mut rng, &b, 5000);
        assert_eq!(inst.len(), 5000);
        for i in &inst {
            assert!(b.contains_xz(Vec2::new(i.position.x, i.position.z)));
            assert!((SCALE_MIN..=SCALE_MAX).contains(&i.scale));
            assert!((0.0..std::f32::consts::PI).contains(&i.yaw));
            assert_eq!(i.position.y, 0.0);
        }
    }

    #[test]
    fn same_seed_same_patch() {
        let a = scatter_instances(&mut patch_rng(7, 3), &bounds(), 64);
        let b = scatter_instances(&mut patch_rng(7, 3), &bounds(), 64);
        let c = scatter_instances(&mut patch_rng(7, 4), &bounds(), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn blade_base_rests_on_ground() {
        let mesh = blade_mesh();
        let Some(VertexAttributeValues::Float32x3(pos)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else {
            panic!("blade has no positions");
        };
        let min_y = pos.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
        let max_y = pos.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
        assert!(min_y.abs() < 1e-5);
        assert!((max_y - BLADE_HEIGHT).abs() < 1e-5);
    }

    #[test]
    fn merged_mesh_holds_every_instance() {
        let blade = blade_mesh();
        let vtx = blade.count_vertices();
        let inst = scatter_instances(&mut patch_rng(0, 0), &bounds(), 10);
        let merged = merge_instances(&blade, &inst).unwrap();
        assert_eq!(merged.count_vertices(), vtx * 10);

        let Some(VertexAttributeValues::Float32x3(pos)) = merged.attribute(Mesh::ATTRIBUTE_POSITION) else {
            panic!("merged mesh has no positions");
        };
        // Tallest vertex never exceeds the largest scaled blade.
        assert!(pos.iter().all(|p| p[1] <= BLADE_HEIGHT * SCALE_MAX + 1e-4));
    }
}
