use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{CourseFeature, CourseFeatureKind, MarkerPost, Terrain, TerrainArea};
use super::layout::{rect_bounds, CourseLayout};
use super::mesh::{build_area_mesh, build_plane_mesh};
use super::polygon::{triangulate, TerrainError};
use crate::physics::{AddTerrain, TerrainBounds};
use crate::vegetation::{SeedVegetation, VegetationSettings};

const POST_RADIUS: f32 = 0.05;
const POST_HEIGHT: f32 = 1.0;

/// Where the course layout lives.
#[derive(Resource, Clone)]
pub struct CourseSettings {
    pub layout_path: String,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self { layout_path: "course/championship.course.ron".to_string() }
    }
}

/// Handle to the loaded course layout.
#[derive(Resource, Default)]
pub struct CourseLayoutHandle(pub Handle<CourseLayout>);

/// One-shot scene mutations that turn course data into ground geometry
/// and matching physics registrations.
#[derive(SystemParam)]
pub struct CourseBuilder<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    physics: EventWriter<'w, AddTerrain>,
    vegetation: EventWriter<'w, SeedVegetation>,
    veg_settings: Res<'w, VegetationSettings>,
}

impl CourseBuilder<'_, '_> {
    /// Triangulate a polygon feature, spawn its ground mesh and notify physics.
    /// Degenerate polygons are rejected before anything is spawned or sent.
    pub fn register_area(&mut self, feature: CourseFeature) -> Result<Entity, TerrainError> {
        let triangles = triangulate(&feature.boundary)?;
        let bounds = TerrainBounds::enclosing(&feature.boundary)
            .ok_or(TerrainError::TooFewVertices(feature.boundary.len()))?;

        let mesh = self.meshes.add(build_area_mesh(&feature.boundary, &triangles));
        let material = self.materials.add(feature.kind.material(feature.color));

        if let Some(color) = feature.kind.marker_color() {
            self.add_marker_posts(&feature.boundary, color);
        }

        let kind = feature.kind;
        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, feature.vertical_offset, 0.0),
                Name::new(format!("{kind:?} area")),
                Terrain,
                feature,
            ))
            .id();

        self.physics.write(AddTerrain { bounds, kind });
        debug!(
            "Terrain: registered {kind:?} over x[{}, {}] z[{}, {}]",
            bounds.x_min, bounds.x_max, bounds.z_min, bounds.z_max
        );
        Ok(entity)
    }

    /// Flat rectangle of ground; grassed unless it is sand or water.
    pub fn create_terrain_area(
        &mut self,
        bounds: TerrainBounds,
        color: Color,
        kind: CourseFeatureKind,
    ) -> Result<Entity, TerrainError> {
        let size = bounds.size();
        if !(size.x.is_finite() && size.y.is_finite()) || size.x <= 0.0 || size.y <= 0.0 {
            return Err(TerrainError::DegenerateBounds {
                x_min: bounds.x_min,
                x_max: bounds.x_max,
                z_min: bounds.z_min,
                z_max: bounds.z_max,
            });
        }

        let mesh = self.meshes.add(build_plane_mesh(&bounds));
        let material = self.materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            ..default()
        });
        let center = bounds.center();
        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_xyz(center.x, CourseFeatureKind::Rough.layer_height(), center.y),
                Name::new(format!("{kind:?} ground")),
                Terrain,
                TerrainArea { kind, bounds },
            ))
            .id();

        if kind.grows_grass() {
            let count = if kind == CourseFeatureKind::Rough {
                self.veg_settings.rough_density
            } else {
                self.veg_settings.turf_density
            };
            self.vegetation.write(SeedVegetation { bounds, count });
        }

        self.physics.write(AddTerrain { bounds, kind });
        Ok(entity)
    }

    /// Build every piece of a layout. Bad entries are logged and skipped.
    /// Returns how many areas made it into the scene.
    pub fn build_layout(&mut self, layout: &CourseLayout) -> usize {
        let mut built = 0;
        for ground in &layout.ground {
            match self.create_terrain_area(rect_bounds(ground.rect), super::hex_color(ground.color), ground.kind) {
                Ok(_) => built += 1,
                Err(e) => warn!("Course '{}': ground {:?} rejected: {e}", layout.name, ground.kind),
            }
        }
        for (i, def) in layout.features.iter().enumerate() {
            match self.register_area(def.to_feature()) {
                Ok(_) => built += 1,
                Err(e) => warn!("Course '{}': feature #{i} ({:?}) rejected: {e}", layout.name, def.kind),
            }
        }
        for patch in &layout.grass_patches {
            self.vegetation.write(SeedVegetation { bounds: rect_bounds(patch.rect), count: patch.count });
        }
        info!(
            "Course '{}': {built} areas built, {} extra grass patches queued",
            layout.name,
            layout.grass_patches.len()
        );
        built
    }

    fn add_marker_posts(&mut self, points: &[Vec2], color: Color) {
        let mesh = self.meshes.add(Cylinder::new(POST_RADIUS, POST_HEIGHT));
        let material = self.materials.add(StandardMaterial { base_color: color, ..default() });
        for p in points {
            self.commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(p.x, POST_HEIGHT * 0.5, p.y),
                MarkerPost,
            ));
        }
    }
}

/// Startup: request the course layout.
pub fn load_course_layout(
    mut handle_res: ResMut<CourseLayoutHandle>,
    settings: Res<CourseSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() {
        return;
    }
    handle_res.0 = assets.load(settings.layout_path.as_str());
    info!("Course: loading layout from '{}'", settings.layout_path);
}

/// Update: build the course once, from the asset or the built-in layout if it failed.
pub fn build_course_when_ready(
    handle_res: Res<CourseLayoutHandle>,
    layouts: Res<Assets<CourseLayout>>,
    assets: Res<AssetServer>,
    mut builder: CourseBuilder,
    mut built: Local<bool>,
) {
    if *built {
        return;
    }
    if let Some(layout) = layouts.get(&handle_res.0) {
        builder.build_layout(layout);
        *built = true;
        return;
    }
    if assets.load_state(handle_res.0.id()).is_failed() {
        warn!("Course: layout failed to load; using the built-in championship hole");
        builder.build_layout(&CourseLayout::default());
        *built = true;
    }
}
