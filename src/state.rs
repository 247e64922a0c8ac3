use bevy::prelude::*;

/// Shot phase as reported by the physics engine.
///
/// The scene never drives these transitions itself; it only reads the
/// current value to gate aiming and trail recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum GamePhase {
    #[default]
    Ready,
    Address,
    Flight,
    Rolling,
    Putting,
    Holed,
}

impl GamePhase {
    /// Whether the ball is moving in a way worth tracing.
    #[inline]
    pub fn records_trail(self) -> bool {
        matches!(self, GamePhase::Flight | GamePhase::Putting)
    }

    /// Next phase in shot order, used by the demo key binding.
    pub fn cycled(self) -> Self {
        match self {
            GamePhase::Ready => GamePhase::Address,
            GamePhase::Address => GamePhase::Flight,
            GamePhase::Flight => GamePhase::Rolling,
            GamePhase::Rolling => GamePhase::Putting,
            GamePhase::Putting => GamePhase::Holed,
            GamePhase::Holed => GamePhase::Ready,
        }
    }
}

/// Latest phase pushed in by the physics bridge.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct ReportedPhase(pub GamePhase);
