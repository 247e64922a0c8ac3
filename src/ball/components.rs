use std::collections::VecDeque;

use bevy::prelude::*;

pub const BALL_RADIUS: f32 = 0.042;
/// Oldest trail points are dropped past this many.
pub const TRAIL_CAPACITY: usize = 200;

#[derive(Component)]
pub struct GolfBall;

/// Recent ball positions, oldest first.
#[derive(Component, Debug, Clone, Default)]
pub struct BallTrail {
    points: VecDeque<Vec3>,
}

impl BallTrail {
    pub fn push(&mut self, p: Vec3) {
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }

    pub fn oldest(&self) -> Option<Vec3> {
        self.points.front().copied()
    }
}

/// Ball tier; picks the trail look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum BallCategory {
    Golden,
    Pro,
    #[default]
    Standard,
}

impl BallCategory {
    pub fn trail_style(self) -> TrailStyle {
        match self {
            BallCategory::Golden => TrailStyle { color: Color::srgb_u8(0xff, 0xd7, 0x00), opacity: 1.0 },
            BallCategory::Pro => TrailStyle { color: Color::srgb_u8(0x00, 0xff, 0xff), opacity: 0.8 },
            BallCategory::Standard => TrailStyle { color: Color::srgb_u8(0x00, 0xff, 0x00), opacity: 0.6 },
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    pub color: Color,
    pub opacity: f32,
}

impl Default for TrailStyle {
    fn default() -> Self {
        BallCategory::Standard.trail_style()
    }
}

impl TrailStyle {
    #[inline]
    pub fn line_color(&self) -> Color {
        self.color.with_alpha(self.opacity)
    }
}

/// Recolour the ball and restyle its trail.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetBallAppearance {
    pub color: Color,
    pub category: BallCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_keeps_the_latest_two_hundred() {
        let mut trail = BallTrail::default();
        for i in 0..250 {
            trail.push(Vec3::new(0.0, 0.0, -(i as f32)));
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.oldest(), Some(Vec3::new(0.0, 0.0, -50.0)));
        assert_eq!(trail.points().last(), Some(Vec3::new(0.0, 0.0, -249.0)));
    }

    #[test]
    fn appearance_table() {
        assert_eq!(BallCategory::Golden.trail_style().opacity, 1.0);
        assert_eq!(BallCategory::Pro.trail_style().opacity, 0.8);
        assert_eq!(BallCategory::Standard.trail_style().opacity, 0.6);
        assert_eq!(BallCategory::Pro.trail_style().color, Color::srgb(0.0, 1.0, 1.0));
    }
}
