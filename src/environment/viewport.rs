use bevy::prelude::*;
use bevy::render::camera::Projection;
use bevy::window::WindowResized;

use crate::setup::MainCamera;

/// Back-buffer size last applied to the main camera, in logical pixels.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        self.is_drawable().then(|| self.width / self.height)
    }
}

/// Apply the newest resize: projection aspect and recorded size move
/// together. A zero-area window turns the camera off until it is usable again.
pub fn on_resize(
    mut resized: EventReader<WindowResized>,
    mut viewport: ResMut<ViewportSize>,
    mut cameras: Query<(&mut Camera, &mut Projection), With<MainCamera>>,
) {
    let Some(ev) = resized.read().last() else { return };
    let size = ViewportSize { width: ev.width, height: ev.height };
    *viewport = size;

    for (mut camera, mut projection) in &mut cameras {
        match size.aspect_ratio() {
            Some(aspect) => {
                if let Projection::Perspective(persp) = projection.as_mut() {
                    persp.aspect_ratio = aspect;
                }
                if !camera.is_active {
                    info!("Viewport: {}x{}, rendering resumed", size.width, size.height);
                }
                camera.is_active = true;
            }
            None => {
                if camera.is_active {
                    warn!("Viewport: zero-area surface ({}x{}); skipping frames", size.width, size.height);
                }
                camera.is_active = false;
            }
        }
    }
}
