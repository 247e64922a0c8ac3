use bevy::prelude::*;

use crate::physics::TerrainBounds;

/// One grass blade inside a batch. Never an entity of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VegetationInstance {
    pub position: Vec3,
    /// Yaw (radians) around +Y, in `[0, PI)`.
    pub yaw: f32,
    /// Uniform scale, in `[0.6, 1.8]`.
    pub scale: f32,
}

impl VegetationInstance {
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_rotation_y(self.yaw),
            scale: Vec3::splat(self.scale),
        }
    }
}

/// One merged draw batch of grass over a rectangle.
#[derive(Component, Debug)]
pub struct VegetationBatch {
    pub bounds: TerrainBounds,
    pub instances: Vec<VegetationInstance>,
}

/// Request to grow grass over a rectangle (sent by the course builder).
#[derive(Event, Debug, Clone, Copy)]
pub struct SeedVegetation {
    pub bounds: TerrainBounds,
    pub count: usize,
}
