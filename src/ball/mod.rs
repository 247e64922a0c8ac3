//! Visual proxy for the physics ball, plus its flight trail.

pub mod components;
pub mod systems;

use bevy::gizmos::config::GizmoConfigStore;
use bevy::prelude::*;

use crate::physics::BallPoseReported;
use crate::scene::{SceneSet, SceneStartupSet};

pub use components::{BallCategory, BallTrail, GolfBall, SetBallAppearance, TrailStyle, BALL_RADIUS, TRAIL_CAPACITY};
pub use systems::apply_ball_pose;

pub struct BallPlugin;

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BallPoseReported>()
            .add_event::<SetBallAppearance>()
            .add_systems(Startup, systems::spawn_ball.in_set(SceneStartupSet::Spawn))
            .add_systems(
                Update,
                (systems::apply_ball_pose, systems::apply_ball_appearance).in_set(SceneSet::ApplyInputs),
            )
            .add_systems(
                Update,
                systems::draw_ball_trail
                    .in_set(SceneSet::Sync)
                    .run_if(resource_exists::<GizmoConfigStore>),
            );
    }
}
