// src/terrain/layout.rs
//! Data-driven course layout + `.course.ron` loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{hex_color, CourseFeature, CourseFeatureKind};
use crate::physics::TerrainBounds;

// ---------- Public plugin to register asset+loader ----------

pub struct CourseLayoutAssetPlugin;

impl Plugin for CourseLayoutAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<CourseLayout>()
            .register_asset_loader(CourseLayoutLoader);
    }
}

// ---------- Layout (data form) ----------

/// `(x_min, x_max, z_min, z_max)` as written in layout files.
pub fn rect_bounds([x_min, x_max, z_min, z_max]: [f32; 4]) -> TerrainBounds {
    TerrainBounds { x_min, x_max, z_min, z_max }
}

/// Base ground rectangle (`create_terrain_area`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroundDef {
    pub rect: [f32; 4],
    /// `0xRRGGBB`
    pub color: u32,
    pub kind: CourseFeatureKind,
}

/// One polygonal feature (`register_area`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureDef {
    pub kind: CourseFeatureKind,
    /// `0xRRGGBB`
    pub color: u32,
    /// XZ ring, `(x, z)` per vertex.
    pub points: Vec<[f32; 2]>,
}

impl FeatureDef {
    pub fn to_feature(&self) -> CourseFeature {
        let boundary = self.points.iter().map(|&[x, z]| Vec2::new(x, z)).collect();
        CourseFeature::new(self.kind, boundary, hex_color(self.color))
    }
}

/// Extra grass not tied to a ground rectangle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GrassPatchDef {
    pub rect: [f32; 4],
    pub count: usize,
}

#[derive(Asset, TypePath, Clone, Debug, Serialize, Deserialize)]
pub struct CourseLayout {
    pub name: String,
    #[serde(default)]
    pub ground: Vec<GroundDef>,
    /// Registered in order; later entries draw over earlier ones on the same layer.
    #[serde(default)]
    pub features: Vec<FeatureDef>,
    #[serde(default)]
    pub grass_patches: Vec<GrassPatchDef>,
}

impl Default for CourseLayout {
    /// The championship par-5: tee at the origin, green 525 m down -Z.
    fn default() -> Self {
        let sand = 0xe3c18d;
        Self {
            name: "Championship".to_string(),
            ground: vec![GroundDef {
                rect: [-500.0, 500.0, -800.0, 200.0],
                color: 0x1e5631,
                kind: CourseFeatureKind::Rough,
            }],
            features: vec![
                rect_feature(CourseFeatureKind::OutOfBounds, 0xff0000, -200.0, -160.0, -600.0, 100.0),
                rect_feature(CourseFeatureKind::OutOfBounds, 0xff0000, 160.0, 200.0, -600.0, 100.0),
                rect_feature(CourseFeatureKind::Water, 0x3498db, -80.0, 80.0, -350.0, -300.0),
                rect_feature(CourseFeatureKind::Green, 0x2ecc71, -20.0, 20.0, -550.0, -500.0),
                rect_feature(CourseFeatureKind::Bunker, sand, -35.0, -22.0, -530.0, -510.0),
                rect_feature(CourseFeatureKind::Bunker, sand, 22.0, 35.0, -540.0, -520.0),
                rect_feature(CourseFeatureKind::Bunker, sand, 15.0, 35.0, -250.0, -210.0),
                FeatureDef {
                    kind: CourseFeatureKind::Fairway,
                    color: 0x27ae60,
                    points: vec![
                        [-30.0, -500.0],
                        [30.0, -500.0],
                        [40.0, -300.0],
                        [20.0, -40.0],
                        [-20.0, -40.0],
                        [-40.0, -300.0],
                    ],
                },
            ],
            grass_patches: vec![GrassPatchDef {
                rect: [-100.0, 100.0, -450.0, 100.0],
                count: 40_000,
            }],
        }
    }
}

fn rect_feature(kind: CourseFeatureKind, color: u32, x0: f32, x1: f32, z0: f32, z1: f32) -> FeatureDef {
    FeatureDef { kind, color, points: vec![[x0, z0], [x1, z0], [x1, z1], [x0, z1]] }
}

impl CourseLayout {
    pub fn from_ron_bytes(bytes: &[u8]) -> Result<Self, CourseLoadError> {
        ron::de::from_bytes(bytes).map_err(|e| CourseLoadError::Ron(e.to_string()))
    }
}

// ---------- Asset loader for `.course.ron` ----------

#[derive(Default)]
pub struct CourseLayoutLoader;

impl AssetLoader for CourseLayoutLoader {
    type Asset = CourseLayout;
    type Settings = ();
    type Error = CourseLoadError;

    fn extensions(&self) -> &[&str] {
        &["course.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        CourseLayout::from_ron_bytes(&bytes)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum CourseLoadError {
    #[error("I/O while reading course layout: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}
