use bevy::gizmos::config::GizmoConfigStore;
use bevy::prelude::*;

use super::overlay::{apply_overlay_requests, draw_slope_overlay, ShowSlopeOverlay, SlopeOverlay};
use super::rig::CameraState;
use super::systems::{apply_camera_requests, sync_camera_transform, CameraRequest};
use crate::ball::apply_ball_pose;
use crate::scene::SceneSet;

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .init_resource::<SlopeOverlay>()
            .add_event::<CameraRequest>()
            .add_event::<ShowSlopeOverlay>()
            .add_systems(
                Update,
                (
                    apply_camera_requests.after(apply_ball_pose),
                    apply_overlay_requests.after(apply_camera_requests),
                )
                    .in_set(SceneSet::ApplyInputs),
            )
            .add_systems(Update, sync_camera_transform.in_set(SceneSet::Sync))
            .add_systems(
                Update,
                draw_slope_overlay
                    .in_set(SceneSet::Sync)
                    .run_if(resource_exists::<GizmoConfigStore>),
            );
    }
}
