use bevy::prelude::*;
use bevy::render::mesh::{Indices, Mesh};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

use crate::physics::TerrainBounds;

/// Build a flat, upward-facing mesh from an XZ ring and its triangulation.
///
/// Vertices sit at local y = 0; the caller lifts the entity to its layer.
/// UVs span the ring's bounding box.
pub fn build_area_mesh(points: &[Vec2], triangles: &[[u32; 3]]) -> Mesh {
    let bounds = TerrainBounds::enclosing(points)
        .unwrap_or(TerrainBounds { x_min: 0.0, x_max: 1.0, z_min: 0.0, z_max: 1.0 });
    let size = bounds.size().max(Vec2::splat(f32::EPSILON));

    // 1) Positions & UVs
    let positions: Vec<[f32; 3]> = points.iter().map(|p| [p.x, 0.0, p.y]).collect();
    let uvs: Vec<[f32; 2]> = points
        .iter()
        .map(|p| [(p.x - bounds.x_min) / size.x, (p.y - bounds.z_min) / size.y])
        .collect();

    // 2) Indices. Counter-clockwise in (x, z) faces -Y once lifted into 3D,
    //    so each triangle is flipped to face the sky.
    let mut indices = Vec::with_capacity(triangles.len() * 3);
    for &[a, b, c] in triangles {
        indices.extend_from_slice(&[a, c, b]);
    }

    // 3) Assemble the mesh
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 1.0, 0.0]; points.len()]);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Flat plane covering `bounds`, centred on the local origin.
pub fn build_plane_mesh(bounds: &TerrainBounds) -> Mesh {
    let size = bounds.size();
    Plane3d::default().mesh().size(size.x, size.y.abs()).build()
}
