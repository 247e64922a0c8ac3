use bevy::prelude::*;

use super::overlay::ShowSlopeOverlay;
use super::rig::{AimDirection, CameraMode, CameraState};
use crate::ball::GolfBall;
use crate::setup::MainCamera;
use crate::state::ReportedPhase;

/// Caller-driven rig input. One event type so a tick's requests apply in
/// the order they were written.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRequest {
    SetMode(CameraMode),
    RotateAim(AimDirection),
    /// Drop to the putting view behind the ball. Same as `SetMode(Putting)`.
    EnterPutting,
}

fn ball_position(balls: &Query<&Transform, With<GolfBall>>) -> Vec3 {
    balls.single().map(|tf| tf.translation).unwrap_or(Vec3::ZERO)
}

/// Apply rig requests in arrival order. Every entry into Putting, by either
/// request, also puts the slope grid under the ball.
pub fn apply_camera_requests(
    mut requests: EventReader<CameraRequest>,
    mut overlay: EventWriter<ShowSlopeOverlay>,
    phase: Res<ReportedPhase>,
    balls: Query<&Transform, With<GolfBall>>,
    mut state: ResMut<CameraState>,
) {
    for req in requests.read() {
        let mode = match *req {
            CameraRequest::SetMode(mode) => mode,
            CameraRequest::EnterPutting => CameraMode::Putting,
            CameraRequest::RotateAim(dir) => {
                if state.rotate_aim(dir, **phase) {
                    debug!("Camera: aim {:.2} rad", state.aim_angle);
                }
                continue;
            }
        };

        state.set_mode(mode);
        if mode == CameraMode::Putting {
            let ball = ball_position(&balls);
            overlay.write(ShowSlopeOverlay { visible: true, center: ball });
            info!("Camera: putting at ({:.2}, {:.2})", ball.x, ball.z);
        } else {
            info!("Camera: mode {:?}", mode);
        }
    }
}

/// Rebuild the main camera's transform from the rig every tick.
pub fn sync_camera_transform(
    mut state: ResMut<CameraState>,
    balls: Query<&Transform, (With<GolfBall>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let ball = balls.single().map(|tf| tf.translation).unwrap_or(Vec3::ZERO);
    let pose = state.refresh(ball);
    for mut tf in &mut cameras {
        *tf = pose.transform();
    }
}
