use bevy::prelude::*;

use super::components::{BallTrail, GolfBall, SetBallAppearance, TrailStyle, BALL_RADIUS};
use crate::physics::BallPoseReported;
use crate::state::ReportedPhase;

pub fn spawn_ball(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(BALL_RADIUS).mesh().uv(32, 16))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.5,
            metallic: 0.1,
            ..default()
        })),
        Transform::from_xyz(0.0, BALL_RADIUS, 0.0),
        Name::new("Golf ball"),
        GolfBall,
        BallTrail::default(),
        TrailStyle::default(),
    ));
}

/// Mirror every reported pose onto the ball. The trail only holds points
/// while the phase records one; any other phase empties it this tick,
/// whether or not a pose arrived.
pub fn apply_ball_pose(
    mut poses: EventReader<BallPoseReported>,
    phase: Res<ReportedPhase>,
    mut balls: Query<(&mut Transform, &mut BallTrail), With<GolfBall>>,
) {
    let Ok((mut tf, mut trail)) = balls.single_mut() else {
        poses.clear();
        return;
    };
    let recording = phase.records_trail();
    if !recording && !trail.is_empty() {
        trail.clear();
    }
    for pose in poses.read() {
        tf.translation = pose.position;
        tf.rotation = pose.orientation;
        if recording {
            trail.push(pose.position);
        }
    }
}

pub fn apply_ball_appearance(
    mut requests: EventReader<SetBallAppearance>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut balls: Query<(&MeshMaterial3d<StandardMaterial>, &mut TrailStyle), With<GolfBall>>,
) {
    let Some(req) = requests.read().last().copied() else { return };
    let Ok((material, mut style)) = balls.single_mut() else { return };
    if let Some(mat) = materials.get_mut(&material.0) {
        mat.base_color = req.color;
    }
    *style = req.category.trail_style();
    info!("Ball: appearance set to {:?}", req.category);
}

pub fn draw_ball_trail(mut gizmos: Gizmos, balls: Query<(&BallTrail, &TrailStyle), With<GolfBall>>) {
    for (trail, style) in &balls {
        if trail.len() >= 2 {
            gizmos.linestrip(trail.points(), style.line_color());
        }
    }
}
