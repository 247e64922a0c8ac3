//! Boundary with the external physics engine.
//!
//! The scene writes [`AddTerrain`] so physical classification always matches
//! what is drawn, and reads [`BallPoseReported`] plus
//! [`ReportedPhase`](crate::state::ReportedPhase) every tick.

use bevy::prelude::*;

use crate::terrain::CourseFeatureKind;

/// Axis-aligned XZ extent of a registered area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl TerrainBounds {
    /// Smallest bounds enclosing every point. `None` for an empty slice.
    pub fn enclosing(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self { x_min: first.x, x_max: first.x, z_min: first.y, z_max: first.y };
        for p in &points[1..] {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.z_min = b.z_min.min(p.y);
            b.z_max = b.z_max.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.x_max - self.x_min, self.z_max - self.z_min)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x_min + self.x_max) * 0.5, (self.z_min + self.z_max) * 0.5)
    }

    pub fn contains_xz(&self, p: Vec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.z_min && p.y <= self.z_max
    }
}

/// Registration notification for the physics engine (one per area).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AddTerrain {
    pub bounds: TerrainBounds,
    pub kind: CourseFeatureKind,
}

/// Per-tick ball pose from the physics engine.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BallPoseReported {
    pub position: Vec3,
    pub orientation: Quat,
}
