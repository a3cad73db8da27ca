//! Scene assembly: game state to a flat vertex list
//!
//! Draw order is back to front: sun, shadows, balloons, bonus sphere.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

const ELLIPSE_SEGMENTS: u32 = 24;
const SHADOW_SEGMENTS: u32 = 16;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.balloons.len() * 120 + 256);

    if let Some(light) = &state.light {
        let r = state.tuning.light.size / 2.0;
        vertices.extend(shapes::circle(light.pos, r * 1.4, colors::SUN_GLOW, ELLIPSE_SEGMENTS));
        vertices.extend(shapes::circle(light.pos, r, colors::SUN, ELLIPSE_SEGMENTS));
    }

    for shadow in state
        .balloons
        .iter()
        .filter_map(|b| b.shadow.as_ref().and_then(|s| s.ellipse.as_ref()))
    {
        vertices.extend(shapes::fill_ellipse(shadow, SHADOW_SEGMENTS));
    }

    for balloon in state.balloons.iter().filter(|b| b.is_active()) {
        let size = balloon.size;
        // Body is the upper 80%, string hangs below
        let body_h = size.y * 0.8;
        let body_center = Vec2::new(balloon.pos.x, balloon.pos.y - size.y / 2.0 + body_h / 2.0);
        let knot = Vec2::new(balloon.pos.x, body_center.y + body_h / 2.0);
        let tail = Vec2::new(balloon.pos.x, balloon.pos.y + size.y / 2.0);

        vertices.extend(shapes::line(knot, tail, 1.5, colors::BALLOON_STRING));
        vertices.extend(shapes::ellipse(body_center, size.x, body_h, colors::BALLOON, ELLIPSE_SEGMENTS));
        vertices.extend(shapes::ellipse(
            body_center - Vec2::new(size.x * 0.18, body_h * 0.2),
            size.x * 0.25,
            body_h * 0.2,
            colors::BALLOON_HIGHLIGHT,
            ELLIPSE_SEGMENTS / 2,
        ));
    }

    if let Some(sphere) = &state.bonus {
        let r = sphere.size / 2.0;
        vertices.extend(shapes::circle(sphere.pos, r, colors::BONUS, ELLIPSE_SEGMENTS));
        vertices.extend(shapes::circle(
            sphere.pos - Vec2::splat(r * 0.35),
            r * 0.3,
            colors::BONUS_SHINE,
            ELLIPSE_SEGMENTS / 2,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(7, Vec2::new(1000.0, 800.0), Tuning::default())
    }

    #[test]
    fn test_popped_balloon_not_drawn() {
        let mut s = state();
        let full = build_scene(&s).len();
        s.pop_balloon(0);
        let popped = build_scene(&s).len();
        // Lost the body, highlight, string and shadow
        let per_balloon = (ELLIPSE_SEGMENTS * 3 + (ELLIPSE_SEGMENTS / 2) * 3 + 6 + SHADOW_SEGMENTS * 3) as usize;
        assert_eq!(full - popped, per_balloon);
    }

    #[test]
    fn test_bonus_sphere_drawn_on_top() {
        let mut s = state();
        let before = build_scene(&s);
        s.spawn_bonus();
        let after = build_scene(&s);
        assert!(after.len() > before.len());
        assert_eq!(&after[..before.len()], &before[..]);
    }
}
