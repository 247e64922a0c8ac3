// src/terrain/components.rs
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::TerrainBounds;

/// Marker for every ground mesh the course builder spawns.
#[derive(Component)]
pub struct Terrain;

/// Surface classification shared by rendering and physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum CourseFeatureKind {
    Rough,
    Fairway,
    Green,
    Bunker,
    Water,
    #[serde(alias = "OB")]
    OutOfBounds,
}

impl CourseFeatureKind {
    /// Height of the draw layer this kind sits on. Later layers win the depth test.
    pub fn layer_height(self) -> f32 {
        match self {
            CourseFeatureKind::Rough => 0.01,
            CourseFeatureKind::Fairway => 0.03,
            CourseFeatureKind::Green => 0.04,
            CourseFeatureKind::Bunker | CourseFeatureKind::Water | CourseFeatureKind::OutOfBounds => 0.02,
        }
    }

    /// Local shift relative to the layer: bunkers sink, OB floats.
    pub fn local_offset(self) -> f32 {
        match self {
            CourseFeatureKind::Bunker => -0.05,
            CourseFeatureKind::OutOfBounds => 0.05,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn vertical_offset(self) -> f32 {
        self.layer_height() + self.local_offset()
    }

    /// Colour of the perimeter stakes, for kinds that get them.
    pub fn marker_color(self) -> Option<Color> {
        match self {
            CourseFeatureKind::OutOfBounds => Some(Color::WHITE),
            CourseFeatureKind::Water => Some(Color::srgb(1.0, 0.0, 0.0)),
            _ => None,
        }
    }

    /// Sand and water stay bare.
    #[inline]
    pub fn grows_grass(self) -> bool {
        !matches!(self, CourseFeatureKind::Bunker | CourseFeatureKind::Water)
    }

    pub fn material(self, color: Color) -> StandardMaterial {
        match self {
            CourseFeatureKind::Green => StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.45,
                metallic: 0.0,
                ..default()
            },
            CourseFeatureKind::Water => StandardMaterial {
                base_color: color.with_alpha(0.8),
                perceptual_roughness: 0.1,
                metallic: 0.8,
                alpha_mode: AlphaMode::Blend,
                ..default()
            },
            CourseFeatureKind::Bunker => StandardMaterial {
                base_color: color,
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            },
            CourseFeatureKind::OutOfBounds => StandardMaterial {
                base_color: color.with_alpha(0.3),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            },
            CourseFeatureKind::Fairway => StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.8,
                metallic: 0.0,
                ..default()
            },
            CourseFeatureKind::Rough => StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.9,
                ..default()
            },
        }
    }
}

/// A polygonal course feature. Immutable once registered.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CourseFeature {
    pub kind: CourseFeatureKind,
    /// Ordered XZ ring, no repeated closing vertex.
    pub boundary: Vec<Vec2>,
    pub color: Color,
    pub vertical_offset: f32,
}

impl CourseFeature {
    pub fn new(kind: CourseFeatureKind, boundary: Vec<Vec2>, color: Color) -> Self {
        Self { kind, boundary, color, vertical_offset: kind.vertical_offset() }
    }
}

/// Rectangular ground plane created by `create_terrain_area`.
#[derive(Component, Debug, Clone, Copy)]
pub struct TerrainArea {
    pub kind: CourseFeatureKind,
    pub bounds: TerrainBounds,
}

/// Visual-only stake at a hazard vertex.
#[derive(Component)]
pub struct MarkerPost;

/// `0xRRGGBB` to an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
