pub mod components;
pub mod layout;
pub mod mesh;
pub mod plugin;
pub mod polygon;
pub mod systems;

pub use plugin::TerrainPlugin;

pub use components::{hex_color, CourseFeature, CourseFeatureKind, MarkerPost, Terrain, TerrainArea};
pub use layout::{CourseLayout, CourseLayoutAssetPlugin, CourseLoadError};
pub use polygon::{triangulate, validate_polygon, TerrainError};
pub use systems::{CourseBuilder, CourseLayoutHandle, CourseSettings};
