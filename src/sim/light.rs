//! The sun: a light source sweeping back and forth along the x axis

use glam::Vec2;

use crate::tuning::LightTuning;

/// Single light source used for shadow projection
#[derive(Debug, Clone)]
pub struct LightSource {
    pub pos: Vec2,
    /// Pixels per second
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl LightSource {
    /// Sun starting at the top-left corner, sweeping up to `right_margin`
    /// short of the right edge
    pub fn new(viewport: Vec2, tuning: &LightTuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            speed: tuning.speed,
            direction: 1.0,
            min_x: 0.0,
            max_x: (viewport.x - tuning.right_margin).max(0.0),
        }
    }

    /// Advance by `dt` seconds, reflecting off either bound (triangle wave)
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.speed * self.direction * dt;

        if self.pos.x > self.max_x {
            self.pos.x = self.max_x - (self.pos.x - self.max_x);
            self.direction = -1.0;
        } else if self.pos.x < self.min_x {
            self.pos.x = self.min_x + (self.min_x - self.pos.x);
            self.direction = 1.0;
        }
        // Overshoot larger than the whole range (tiny viewports)
        self.pos.x = self.pos.x.clamp(self.min_x, self.max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sun(width: f32) -> LightSource {
        LightSource::new(Vec2::new(width, 600.0), &LightTuning::default())
    }

    #[test]
    fn test_light_moves_right_first() {
        let mut light = sun(1000.0);
        light.advance(1.0);
        assert!((light.pos.x - 60.0).abs() < 1e-4);
        assert_eq!(light.direction, 1.0);
    }

    #[test]
    fn test_light_reverses_at_max() {
        let mut light = sun(1000.0);
        light.pos.x = 790.0;
        light.advance(0.5); // +30 -> 820, reflected to 780
        assert!((light.pos.x - 780.0).abs() < 1e-4);
        assert_eq!(light.direction, -1.0);
    }

    #[test]
    fn test_light_reverses_at_min() {
        let mut light = sun(1000.0);
        light.pos.x = 10.0;
        light.direction = -1.0;
        light.advance(0.5);
        assert!((light.pos.x - 20.0).abs() < 1e-4);
        assert_eq!(light.direction, 1.0);
    }

    #[test]
    fn test_light_narrow_viewport_stays_put() {
        let mut light = sun(100.0);
        assert_eq!(light.max_x, 0.0);
        light.advance(1.0);
        assert_eq!(light.pos.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_light_stays_within_bounds(width in 0.0f32..3000.0, steps in 1usize..2000) {
            let mut light = sun(width);
            for _ in 0..steps {
                light.advance(crate::consts::SIM_DT);
                prop_assert!(light.pos.x >= light.min_x && light.pos.x <= light.max_x);
            }
        }
    }
}
