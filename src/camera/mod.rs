//! Caller-driven camera rig: Tee, Follow, Top and Putting views.

pub mod overlay;
pub mod plugin;
pub mod rig;
pub mod systems;

pub use overlay::{ShowSlopeOverlay, SlopeOverlay};
pub use plugin::CameraRigPlugin;
pub use rig::{aim_allowed, camera_pose, AimDirection, CameraMode, CameraPose, CameraState, AIM_STEP, HOLE_POSITION};
pub use systems::CameraRequest;
