use bevy::prelude::*;
use bevy::window::WindowResolution;

use teebox::CourseScenePlugins;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Teebox".to_string(),
                resolution: WindowResolution::new(1600.0, 900.0),
                ..default()
            }),
            ..default()
        }))
        // course, grass, camera rig, ball, environment, key bindings
        .add_plugins(CourseScenePlugins)
        .run();
}
