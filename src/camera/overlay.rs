use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

pub const OVERLAY_SIZE: f32 = 10.0;
pub const OVERLAY_DIVISIONS: u32 = 20;
pub const OVERLAY_LIFT: f32 = 0.05;

/// Show or hide the putting grid around `center`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShowSlopeOverlay {
    pub visible: bool,
    pub center: Vec3,
}

/// Current putting grid, if any.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SlopeOverlay {
    pub visible: bool,
    /// Ground-level anchor; the grid floats `OVERLAY_LIFT` above it.
    pub center: Vec3,
}

impl SlopeOverlay {
    pub fn isometry(&self) -> Isometry3d {
        let at = Vec3::new(self.center.x, OVERLAY_LIFT, self.center.z);
        Isometry3d::new(at, Quat::from_rotation_x(FRAC_PI_2))
    }
}

pub fn overlay_color() -> Color {
    Color::srgba(1.0, 1.0, 0.0, 0.3)
}

pub fn apply_overlay_requests(mut requests: EventReader<ShowSlopeOverlay>, mut overlay: ResMut<SlopeOverlay>) {
    for req in requests.read() {
        overlay.visible = req.visible;
        if req.visible {
            overlay.center = req.center;
        }
    }
}

pub fn draw_slope_overlay(overlay: Res<SlopeOverlay>, mut gizmos: Gizmos) {
    if !overlay.visible {
        return;
    }
    let spacing = OVERLAY_SIZE / OVERLAY_DIVISIONS as f32;
    gizmos.grid(overlay.isometry(), UVec2::splat(OVERLAY_DIVISIONS), Vec2::splat(spacing), overlay_color());
}
