//! Camera state machine and pose math.
//!
//! Everything here is pure: the rig is a [`CameraState`] resource and the
//! camera transform is rebuilt from [`camera_pose`] every tick.

use bevy::prelude::*;

use crate::state::GamePhase;

/// Radians per aim step.
pub const AIM_STEP: f32 = 0.1;
/// Centre of the green's cup.
pub const HOLE_POSITION: Vec3 = Vec3::new(0.0, 0.0, -525.0);

const TEE_EYE: Vec3 = Vec3::new(0.0, 1.8, 0.0);
const TEE_TARGET: Vec3 = Vec3::new(0.0, 0.8, 0.0);
const TEE_BACKOFF: f32 = 8.0;
const TEE_REACH: f32 = 50.0;
const PUTTING_OFFSET: Vec3 = Vec3::new(0.0, 0.4, 1.5);
const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 2.5, 6.0);
const TOP_EYE: Vec3 = Vec3::new(0.0, 200.0, 0.0);
const TOP_TARGET: Vec3 = Vec3::new(0.0, 0.0, -200.0);

/// Phases in which the player may swing the aim line.
const AIM_PERMISSIONS: [(GamePhase, bool); 6] = [
    (GamePhase::Ready, true),
    (GamePhase::Address, true),
    (GamePhase::Flight, false),
    (GamePhase::Rolling, false),
    (GamePhase::Putting, false),
    (GamePhase::Holed, false),
];

pub fn aim_allowed(phase: GamePhase) -> bool {
    AIM_PERMISSIONS
        .iter()
        .find(|(p, _)| *p == phase)
        .is_some_and(|(_, allowed)| *allowed)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum CameraMode {
    #[default]
    Tee,
    Follow,
    Top,
    Putting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimDirection {
    Left,
    Right,
}

impl AimDirection {
    #[inline]
    pub fn step(self) -> f32 {
        match self {
            AimDirection::Left => AIM_STEP,
            AimDirection::Right => -AIM_STEP,
        }
    }
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y)
    }
}

/// Unit forward on the ground plane for a given aim angle.
#[inline]
pub fn aim_forward(aim_angle: f32) -> Vec3 {
    Quat::from_rotation_y(aim_angle) * Vec3::NEG_Z
}

/// Pose for `mode`. Depends only on its arguments.
pub fn camera_pose(mode: CameraMode, aim_angle: f32, ball: Vec3) -> CameraPose {
    match mode {
        CameraMode::Tee => {
            let forward = aim_forward(aim_angle);
            CameraPose {
                position: TEE_EYE - forward * TEE_BACKOFF,
                look_at: TEE_TARGET + forward * TEE_REACH,
            }
        }
        CameraMode::Putting => CameraPose { position: ball + PUTTING_OFFSET, look_at: HOLE_POSITION },
        CameraMode::Top => CameraPose { position: TOP_EYE, look_at: TOP_TARGET },
        CameraMode::Follow => CameraPose { position: ball + FOLLOW_OFFSET, look_at: ball },
    }
}

/// The rig's retained state.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub mode: CameraMode,
    pub aim_angle: f32,
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        let pose = camera_pose(CameraMode::Tee, 0.0, Vec3::ZERO);
        Self { mode: CameraMode::Tee, aim_angle: 0.0, position: pose.position, look_at: pose.look_at }
    }
}

impl CameraState {
    /// Switch modes. Entering Tee always re-centres the aim.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode == CameraMode::Tee {
            self.aim_angle = 0.0;
        }
        self.mode = mode;
    }

    /// Nudge the aim. Returns `false` (and changes nothing) unless the rig is
    /// in Tee and `phase` permits aiming.
    pub fn rotate_aim(&mut self, dir: AimDirection, phase: GamePhase) -> bool {
        if self.mode != CameraMode::Tee || !aim_allowed(phase) {
            return false;
        }
        self.aim_angle += dir.step();
        true
    }

    /// Recompute position and target for the current mode.
    pub fn refresh(&mut self, ball: Vec3) -> CameraPose {
        let pose = camera_pose(self.mode, self.aim_angle, ball);
        self.position = pose.position;
        self.look_at = pose.look_at;
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn close(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-3)
    }

    #[test]
    fn tee_pose_at_zero_aim() {
        let pose = camera_pose(CameraMode::Tee, 0.0, Vec3::ZERO);
        assert!(close(pose.position, Vec3::new(0.0, 1.8, 8.0)));
        assert!(close(pose.look_at, Vec3::new(0.0, 0.8, -50.0)));
    }

    #[test]
    fn quarter_turn_left_looks_down_negative_x() {
        let pose = camera_pose(CameraMode::Tee, FRAC_PI_2, Vec3::ZERO);
        assert!(close(pose.position, Vec3::new(8.0, 1.8, 0.0)));
        assert!(close(pose.look_at, Vec3::new(-50.0, 0.8, 0.0)));
    }

    #[test]
    fn tee_pose_is_periodic_in_a_full_turn() {
        let a = camera_pose(CameraMode::Tee, 0.3, Vec3::ZERO);
        let b = camera_pose(CameraMode::Tee, 0.3 + TAU, Vec3::ZERO);
        assert!(close(a.position, b.position));
        assert!(close(a.look_at, b.look_at));
    }

    #[test]
    fn putting_sits_behind_the_ball_facing_the_hole() {
        let ball = Vec3::new(3.0, 0.042, -510.0);
        let pose = camera_pose(CameraMode::Putting, 1.0, ball);
        assert!(close(pose.position, Vec3::new(3.0, 0.442, -508.5)));
        assert_eq!(pose.look_at, HOLE_POSITION);
    }

    #[test]
    fn top_view_ignores_ball_and_aim() {
        let a = camera_pose(CameraMode::Top, 0.0, Vec3::ZERO);
        let b = camera_pose(CameraMode::Top, 2.0, Vec3::new(9.0, 1.0, -40.0));
        assert_eq!(a, b);
        assert_eq!(a.position, Vec3::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn aim_permission_table() {
        assert!(aim_allowed(GamePhase::Ready));
        assert!(aim_allowed(GamePhase::Address));
        assert!(!aim_allowed(GamePhase::Flight));
        assert!(!aim_allowed(GamePhase::Rolling));
        assert!(!aim_allowed(GamePhase::Putting));
        assert!(!aim_allowed(GamePhase::Holed));
    }

    #[test]
    fn aim_is_ignored_in_flight_and_outside_tee() {
        let mut state = CameraState::default();
        assert!(!state.rotate_aim(AimDirection::Left, GamePhase::Flight));
        assert_eq!(state.aim_angle, 0.0);

        state.set_mode(CameraMode::Top);
        assert!(!state.rotate_aim(AimDirection::Left, GamePhase::Address));
        assert_eq!(state.aim_angle, 0.0);
    }

    #[test]
    fn left_and_right_cancel() {
        let mut state = CameraState::default();
        for _ in 0..36 {
            assert!(state.rotate_aim(AimDirection::Left, GamePhase::Address));
        }
        assert!((state.aim_angle - 3.6).abs() < 1e-4);
        for _ in 0..36 {
            state.rotate_aim(AimDirection::Right, GamePhase::Ready);
        }
        assert!(state.aim_angle.abs() < 1e-4);
        let pose = state.refresh(Vec3::ZERO);
        assert!(close(pose.position, Vec3::new(0.0, 1.8, 8.0)));
    }

    #[test]
    fn entering_tee_resets_aim() {
        let mut state = CameraState::default();
        state.rotate_aim(AimDirection::Right, GamePhase::Ready);
        state.set_mode(CameraMode::Follow);
        assert!(state.aim_angle != 0.0);
        state.set_mode(CameraMode::Tee);
        assert_eq!(state.aim_angle, 0.0);
    }
}
