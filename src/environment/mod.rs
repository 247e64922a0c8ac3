//! Render environment: sun, ambient, fog, sky dome, bloom and the viewport.

pub mod lighting;
pub mod plugin;
pub mod sky;
pub mod viewport;
pub mod weather;

pub use lighting::{fog_for, BloomParams, ShadowSettings, Sun};
pub use plugin::{EnvironmentPlugin, SkyMaterialPlugin};
pub use sky::{sun_direction, SkyMaterial, SkyParams};
pub use viewport::ViewportSize;
pub use weather::{EnvironmentConfig, EnvironmentState, SetEnvironment, Weather};
