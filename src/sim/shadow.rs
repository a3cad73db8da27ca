//! Projected balloon shadows
//!
//! Each active balloon owns one `Shadow`. Every tick it is cleared and a
//! flat ellipse is redrawn beneath the balloon, shifted away from the sun.

use glam::Vec2;

use super::light::LightSource;
use crate::tuning::ShadowTuning;

/// A filled ellipse in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    /// Full width (not radius)
    pub width: f32,
    /// Full height (not radius)
    pub height: f32,
    pub color: [f32; 4],
}

/// Drawable shadow handle; empty until first drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shadow {
    pub ellipse: Option<Ellipse>,
}

impl Shadow {
    pub fn clear(&mut self) {
        self.ellipse = None;
    }

    pub fn fill_ellipse(&mut self, ellipse: Ellipse) {
        self.ellipse = Some(ellipse);
    }
}

/// Recompute a balloon's shadow from the light position.
///
/// `pos` is the balloon center and `size` its display size. No-op when the
/// balloon has no shadow handle or there is no light.
pub fn update_shadow(
    shadow: Option<&mut Shadow>,
    pos: Vec2,
    size: Vec2,
    light: Option<&LightSource>,
    tuning: &ShadowTuning,
) {
    let (Some(shadow), Some(light)) = (shadow, light) else {
        return;
    };

    shadow.clear();

    let offset_x = -(pos.x - light.pos.x) * tuning.offset_factor_x;
    let offset_y = -(pos.y - light.pos.y) * tuning.offset_factor_y;

    shadow.fill_ellipse(Ellipse {
        center: Vec2::new(pos.x - offset_x, pos.y + size.y / 2.0 + offset_y),
        width: size.x * tuning.width_factor,
        height: tuning.height,
        color: [0.0, 0.0, 0.0, tuning.opacity],
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_at(x: f32, y: f32) -> LightSource {
        LightSource {
            pos: Vec2::new(x, y),
            speed: 0.0,
            direction: 1.0,
            min_x: 0.0,
            max_x: 1000.0,
        }
    }

    #[test]
    fn test_shadow_falls_away_from_light() {
        let tuning = ShadowTuning::default();
        let mut shadow = Shadow::default();
        let light = light_at(0.0, 0.0);

        update_shadow(Some(&mut shadow), Vec2::new(100.0, 200.0), Vec2::new(40.0, 80.0), Some(&light), &tuning);

        let e = shadow.ellipse.unwrap();
        // off_x = -(100) * 0.3 = -30 -> center x = 130 (right of balloon, away from sun)
        assert!((e.center.x - 130.0).abs() < 1e-4);
        // off_y = -(200) * 0.007 = -1.4 -> 200 + 40 - 1.4
        assert!((e.center.y - 238.6).abs() < 1e-4);
        assert!((e.width - 32.0).abs() < 1e-4);
        assert_eq!(e.height, 3.0);
        assert_eq!(e.color, [0.0, 0.0, 0.0, 0.4]);
    }

    #[test]
    fn test_shadow_mirrors_when_light_passes() {
        let tuning = ShadowTuning::default();
        let mut shadow = Shadow::default();
        let light = light_at(300.0, 0.0);

        update_shadow(Some(&mut shadow), Vec2::new(100.0, 0.0), Vec2::new(40.0, 80.0), Some(&light), &tuning);
        assert!(shadow.ellipse.unwrap().center.x < 100.0);
    }

    #[test]
    fn test_shadow_is_redrawn_not_accumulated() {
        let tuning = ShadowTuning::default();
        let mut shadow = Shadow::default();
        let size = Vec2::new(40.0, 80.0);

        update_shadow(Some(&mut shadow), Vec2::new(100.0, 0.0), size, Some(&light_at(0.0, 0.0)), &tuning);
        let first = shadow.ellipse.unwrap();
        update_shadow(Some(&mut shadow), Vec2::new(100.0, 0.0), size, Some(&light_at(100.0, 0.0)), &tuning);
        let second = shadow.ellipse.unwrap();

        assert_ne!(first.center, second.center);
        assert!((second.center.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_shadow_noop_without_handle_or_light() {
        let tuning = ShadowTuning::default();
        let mut shadow = Shadow::default();

        update_shadow(Some(&mut shadow), Vec2::ZERO, Vec2::ONE, None, &tuning);
        assert!(shadow.ellipse.is_none());

        // Nothing to draw into; must not panic
        update_shadow(None, Vec2::ZERO, Vec2::ONE, Some(&light_at(0.0, 0.0)), &tuning);
    }
}
