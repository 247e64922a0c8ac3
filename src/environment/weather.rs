use bevy::prelude::*;

/// Lux delivered by the sun per unit of scene intensity.
pub const SUN_LUX_PER_INTENSITY: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum Weather {
    #[default]
    Sunny,
    Foggy,
}

impl Weather {
    /// `(fog_density, sun_intensity)`.
    pub fn preset(self) -> (f32, f32) {
        match self {
            Weather::Sunny => (0.001, 1.2),
            Weather::Foggy => (0.01, 0.5),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Weather::Sunny => Weather::Foggy,
            Weather::Foggy => Weather::Sunny,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentConfig {
    pub weather: Weather,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SetEnvironment(pub EnvironmentConfig);

/// The one place fog and sun strength live; the camera fog and the sun
/// light are mirrored from here.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentState {
    pub weather: Weather,
    pub fog_density: f32,
    pub sun_intensity: f32,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self::from_config(EnvironmentConfig::default())
    }
}

impl EnvironmentState {
    pub fn from_config(config: EnvironmentConfig) -> Self {
        let (fog_density, sun_intensity) = config.weather.preset();
        Self { weather: config.weather, fog_density, sun_intensity }
    }

    /// Absolute assignment: the result never depends on what came before.
    pub fn apply(&mut self, config: EnvironmentConfig) {
        *self = Self::from_config(config);
    }

    #[inline]
    pub fn sun_illuminance(&self) -> f32 {
        self.sun_intensity * SUN_LUX_PER_INTENSITY
    }
}
