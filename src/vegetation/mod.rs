//! Instanced grass.
//! Each patch becomes one batch entity whose mesh is every blade merged
//! together; all batches share one wind-animated material.

pub mod components;
pub mod material;
pub mod plugin;
pub mod systems;

pub use components::{SeedVegetation, VegetationBatch, VegetationInstance};
pub use material::{GrassMaterial, GrassWindMaterial, WindContexts, WindParams};
pub use plugin::{GrassWindMaterialPlugin, VegetationPlugin, VegetationSettings};
pub use systems::{GrassAssets, VegetationInstancer};
