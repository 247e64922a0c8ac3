mod common;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::render::camera::Projection;
use bevy::window::WindowResized;

use common::headless_app;
use teebox::ball::{BallCategory, BallTrail, GolfBall, SetBallAppearance, TrailStyle, TRAIL_CAPACITY};
use teebox::camera::{AimDirection, CameraMode, CameraRequest, CameraState, ShowSlopeOverlay, SlopeOverlay};
use teebox::environment::{EnvironmentConfig, EnvironmentState, SetEnvironment, Sun, ViewportSize, Weather};
use teebox::physics::BallPoseReported;
use teebox::setup::{require_drawing_surface, MainCamera};
use teebox::state::{GamePhase, ReportedPhase};
use teebox::vegetation::{GrassWindMaterial, SeedVegetation, WindContexts};

fn set_phase(app: &mut App, phase: GamePhase) {
    app.world_mut().resource_mut::<ReportedPhase>().0 = phase;
}

fn ball(app: &mut App) -> (Transform, usize) {
    let world = app.world_mut();
    let mut q = world.query_filtered::<(&Transform, &BallTrail), With<GolfBall>>();
    let (tf, trail) = q.single(world).unwrap();
    (*tf, trail.len())
}

fn pose(z: f32) -> BallPoseReported {
    BallPoseReported { position: Vec3::new(0.0, 1.0, z), orientation: Quat::from_rotation_x(z) }
}

#[test]
fn ball_starts_on_the_tee() {
    let mut app = headless_app();
    app.update();
    let (tf, trail) = ball(&mut app);
    assert_eq!(tf.translation, Vec3::new(0.0, 0.042, 0.0));
    assert_eq!(trail, 0);
}

#[test]
fn trail_is_capped_in_flight_and_cleared_after() {
    let mut app = headless_app();
    app.update();
    set_phase(&mut app, GamePhase::Flight);

    for i in 0..250 {
        app.world_mut().send_event(pose(-(i as f32)));
    }
    app.update();
    let (tf, len) = ball(&mut app);
    assert_eq!(len, TRAIL_CAPACITY);
    assert_eq!(tf.translation, Vec3::new(0.0, 1.0, -249.0));

    set_phase(&mut app, GamePhase::Rolling);
    app.world_mut().send_event(pose(-250.0));
    app.update();
    let (tf, len) = ball(&mut app);
    assert_eq!(len, 0);
    // Pose is applied regardless of phase.
    assert_eq!(tf.translation.z, -250.0);
}

#[test]
fn trail_empties_once_flight_ends_even_without_a_pose() {
    let mut app = headless_app();
    app.update();
    set_phase(&mut app, GamePhase::Flight);
    for i in 0..10 {
        app.world_mut().send_event(pose(-(i as f32)));
    }
    app.update();
    assert_eq!(ball(&mut app).1, 10);

    set_phase(&mut app, GamePhase::Ready);
    app.update();
    app.update();
    let (tf, len) = ball(&mut app);
    assert_eq!(len, 0);
    assert_eq!(tf.translation.z, -9.0);
}

#[test]
fn appearance_restyles_the_trail() {
    let mut app = headless_app();
    app.update();
    app.world_mut().send_event(SetBallAppearance { color: Color::srgb(1.0, 0.84, 0.0), category: BallCategory::Golden });
    app.update();

    let world = app.world_mut();
    let mut q = world.query_filtered::<(&TrailStyle, &MeshMaterial3d<StandardMaterial>), With<GolfBall>>();
    let (style, material) = q.single(world).unwrap();
    assert_eq!(style.opacity, 1.0);
    let handle = material.0.clone();
    let mat = app.world().resource::<Assets<StandardMaterial>>().get(&handle).unwrap();
    assert_eq!(mat.base_color, Color::srgb(1.0, 0.84, 0.0));
}

#[test]
fn aim_only_moves_while_addressing_on_the_tee() {
    let mut app = headless_app();
    app.update();

    set_phase(&mut app, GamePhase::Address);
    app.world_mut().send_event(CameraRequest::RotateAim(AimDirection::Left));
    app.update();
    assert!((app.world().resource::<CameraState>().aim_angle - 0.1).abs() < 1e-6);

    set_phase(&mut app, GamePhase::Flight);
    app.world_mut().send_event(CameraRequest::RotateAim(AimDirection::Left));
    app.update();
    assert!((app.world().resource::<CameraState>().aim_angle - 0.1).abs() < 1e-6);

    set_phase(&mut app, GamePhase::Ready);
    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Top));
    app.world_mut().send_event(CameraRequest::RotateAim(AimDirection::Right));
    app.update();
    let state = *app.world().resource::<CameraState>();
    assert_eq!(state.mode, CameraMode::Top);
    assert!((state.aim_angle - 0.1).abs() < 1e-6);
    assert_eq!(state.position, Vec3::new(0.0, 200.0, 0.0));

    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Tee));
    app.update();
    assert_eq!(app.world().resource::<CameraState>().aim_angle, 0.0);
}

#[test]
fn same_tick_camera_requests_apply_in_arrival_order() {
    let mut app = headless_app();
    app.update();
    set_phase(&mut app, GamePhase::Address);

    app.world_mut().send_event(CameraRequest::RotateAim(AimDirection::Left));
    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Tee));
    app.update();
    assert_eq!(app.world().resource::<CameraState>().aim_angle, 0.0);

    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Tee));
    app.world_mut().send_event(CameraRequest::RotateAim(AimDirection::Left));
    app.update();
    assert!((app.world().resource::<CameraState>().aim_angle - 0.1).abs() < 1e-6);

    app.world_mut().send_event(CameraRequest::EnterPutting);
    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Tee));
    app.update();
    assert_eq!(app.world().resource::<CameraState>().mode, CameraMode::Tee);
}

#[test]
fn putting_view_key_also_shows_the_grid() {
    let mut app = headless_app();
    app.update();
    app.world_mut().send_event(pose(-40.0));
    app.update();
    assert!(!app.world().resource::<SlopeOverlay>().visible);

    app.world_mut().send_event(CameraRequest::SetMode(CameraMode::Putting));
    app.update();
    app.update();

    assert_eq!(app.world().resource::<CameraState>().mode, CameraMode::Putting);
    let overlay = *app.world().resource::<SlopeOverlay>();
    assert!(overlay.visible);
    assert_eq!(overlay.center, Vec3::new(0.0, 1.0, -40.0));
}

#[test]
fn putting_mode_frames_the_hole_and_shows_the_grid() {
    let mut app = headless_app();
    app.update();
    app.world_mut().send_event(pose(-510.0));
    app.update();

    app.world_mut().send_event(CameraRequest::EnterPutting);
    app.update();

    let state = *app.world().resource::<CameraState>();
    assert_eq!(state.mode, CameraMode::Putting);
    assert!(state.position.abs_diff_eq(Vec3::new(0.0, 1.4, -508.5), 1e-4));
    assert_eq!(state.look_at, Vec3::new(0.0, 0.0, -525.0));

    let overlay = *app.world().resource::<SlopeOverlay>();
    assert!(overlay.visible);
    assert_eq!(overlay.center.z, -510.0);

    app.world_mut().send_event(ShowSlopeOverlay { visible: false, center: Vec3::ZERO });
    app.update();
    assert!(!app.world().resource::<SlopeOverlay>().visible);
}

#[test]
fn camera_transform_follows_the_rig() {
    let mut app = headless_app();
    let cam = app.world_mut().spawn((Transform::default(), MainCamera)).id();
    app.update();
    let tf = *app.world().get::<Transform>(cam).unwrap();
    assert!(tf.translation.abs_diff_eq(Vec3::new(0.0, 1.8, 8.0), 1e-4));
    // Looking down -Z.
    assert!(tf.forward().z < -0.99);
}

#[test]
fn weather_drives_sun_and_is_reversible() {
    let mut app = headless_app();
    app.update();

    let sun_lux = |app: &mut App| {
        let world = app.world_mut();
        let mut q = world.query_filtered::<&DirectionalLight, With<Sun>>();
        q.single(world).unwrap().illuminance
    };
    let sunny = sun_lux(&mut app);

    app.world_mut().send_event(SetEnvironment(EnvironmentConfig { weather: Weather::Foggy }));
    app.update();
    let state = *app.world().resource::<EnvironmentState>();
    assert_eq!((state.fog_density, state.sun_intensity), (0.01, 0.5));
    assert!(sun_lux(&mut app) < sunny);

    app.world_mut().send_event(SetEnvironment(EnvironmentConfig { weather: Weather::Sunny }));
    app.update();
    assert_eq!(app.world().resource::<EnvironmentState>().fog_density, 0.001);
    assert_eq!(sun_lux(&mut app), sunny);
}

#[test]
fn zero_area_viewport_pauses_the_camera() {
    let mut app = headless_app();
    let cam = app
        .world_mut()
        .spawn((Camera::default(), Projection::Perspective(PerspectiveProjection::default()), MainCamera))
        .id();
    app.update();

    let resize = |w: f32, h: f32| WindowResized { window: Entity::PLACEHOLDER, width: w, height: h };

    app.world_mut().send_event(resize(0.0, 0.0));
    app.update();
    assert!(!app.world().get::<Camera>(cam).unwrap().is_active);
    assert!(!app.world().resource::<ViewportSize>().is_drawable());

    app.world_mut().send_event(resize(800.0, 600.0));
    app.update();
    assert!(app.world().get::<Camera>(cam).unwrap().is_active);
    assert_eq!(*app.world().resource::<ViewportSize>(), ViewportSize { width: 800.0, height: 600.0 });
    let Projection::Perspective(p) = app.world().get::<Projection>(cam).unwrap() else {
        panic!("expected a perspective projection");
    };
    assert!((p.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn startup_fails_without_a_window() {
    let mut app = headless_app();
    let outcome = app.world_mut().run_system_once(require_drawing_surface).unwrap();
    assert!(outcome.is_err());
}

#[test]
fn wind_clock_reaches_the_shared_material() {
    let mut app = headless_app();
    app.init_asset::<GrassWindMaterial>();
    app.update();

    let rect = teebox::physics::TerrainBounds { x_min: 0.0, x_max: 2.0, z_min: 0.0, z_max: 2.0 };
    app.world_mut().send_event(SeedVegetation { bounds: rect, count: 5 });
    app.world_mut().send_event(SeedVegetation { bounds: rect, count: 5 });
    app.update();
    app.update();

    let contexts = app.world().resource::<WindContexts>();
    assert_eq!(contexts.materials.len(), 1);
    let handle = contexts.materials[0].clone();
    let last = contexts.last_time;
    let material = app.world().resource::<Assets<GrassWindMaterial>>().get(&handle).unwrap();
    assert_eq!(material.extension.wind.time, last);
    assert_eq!(material.extension.wind.strength, 0.15);
}
