use bevy::prelude::*;

use crate::physics::AddTerrain;
use crate::scene::{SceneSet, SceneStartupSet};
use crate::terrain::layout::CourseLayoutAssetPlugin;
use crate::terrain::systems::{build_course_when_ready, load_course_layout, CourseLayoutHandle, CourseSettings};

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CourseLayoutAssetPlugin)
            .init_resource::<CourseSettings>()
            .init_resource::<CourseLayoutHandle>()
            .add_event::<AddTerrain>()
            // Load the layout once the drawing surface is confirmed
            .add_systems(Startup, load_course_layout.in_set(SceneStartupSet::Spawn))
            // Build it as soon as it arrives (or fails)
            .add_systems(Update, build_course_when_ready.in_set(SceneSet::Build));
    }
}
