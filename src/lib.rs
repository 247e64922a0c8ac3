//! Golf course scene core: course geometry, instanced grass, camera rig,
//! ball proxy and the render environment, as Bevy plugins.

pub mod actions;
pub mod ball;
pub mod camera;
pub mod environment;
pub mod input;
pub mod physics;
pub mod scene;
pub mod setup;
pub mod state;
pub mod terrain;
pub mod vegetation;

pub use scene::{CourseScenePlugins, ScenePlugin, SceneSet, SceneStartupSet};
