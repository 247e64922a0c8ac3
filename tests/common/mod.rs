use bevy::prelude::*;

use teebox::ball::BallPlugin;
use teebox::camera::CameraRigPlugin;
use teebox::environment::EnvironmentPlugin;
use teebox::terrain::{CourseLayout, CourseLayoutHandle, TerrainPlugin};
use teebox::vegetation::VegetationPlugin;
use teebox::ScenePlugin;

/// Scene plugins without a window or render stack. The course layout is
/// replaced by an empty one so tests build exactly what they ask for.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .add_plugins((
            ScenePlugin,
            EnvironmentPlugin,
            VegetationPlugin,
            TerrainPlugin,
            BallPlugin,
            CameraRigPlugin,
        ));

    let empty = CourseLayout {
        name: "Empty".to_string(),
        ground: Vec::new(),
        features: Vec::new(),
        grass_patches: Vec::new(),
    };
    let handle = app.world_mut().resource_mut::<Assets<CourseLayout>>().add(empty);
    app.insert_resource(CourseLayoutHandle(handle));
    app
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}
