//! Bonus sphere: spawns, drifts along an eased tween, then flees
//!
//! Lifecycle: Drifting -> Escaping -> gone. Removal (expiry, leaving the
//! world, or a click) happens in the game state, which owns the single
//! `Option<BonusSphere>` slot.

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounds;
use crate::tuning::BonusTuning;

/// Generation-tagged identity of one bonus sphere.
///
/// Scheduled tasks carry the handle of the sphere they were created for,
/// so a late task can never act on a newer sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BonusHandle(pub u32);

/// Easing curves for tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    SineInOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Position tween driven by the virtual clock
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    pub start_tick: u64,
    pub duration_ticks: u64,
    pub easing: Easing,
}

impl Tween {
    /// Position at `now`, clamped to the end points
    pub fn sample(&self, now: u64) -> Vec2 {
        if self.duration_ticks == 0 {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start_tick) as f32;
        let t = (elapsed / self.duration_ticks as f32).clamp(0.0, 1.0);
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn end_tick(&self) -> u64 {
        self.start_tick + self.duration_ticks
    }
}

/// Movement phase of a live sphere
#[derive(Debug, Clone, PartialEq)]
pub enum BonusPhase {
    /// Following the spawn tween; velocity is zero
    Drifting { tween: Tween },
    /// Flying ballistically until expiry
    Escaping,
}

/// The transient bonus entity
#[derive(Debug, Clone)]
pub struct BonusSphere {
    pub handle: BonusHandle,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
    pub phase: BonusPhase,
}

impl BonusSphere {
    /// Spawn at a random spot inside the central region and start drifting
    /// toward a random nearby target.
    pub fn spawn(
        handle: BonusHandle,
        viewport: Vec2,
        now: u64,
        drift_ticks: u64,
        tuning: &BonusTuning,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = Vec2::new(
            rng.random_range(tuning.spawn_min * viewport.x..=tuning.spawn_max * viewport.x),
            rng.random_range(tuning.spawn_min * viewport.y..=tuning.spawn_max * viewport.y),
        );
        let range = viewport * tuning.drift_range;
        let offset = Vec2::new(
            rng.random_range(-range.x..=range.x),
            rng.random_range(-range.y..=range.y),
        );

        Self {
            handle,
            pos,
            vel: Vec2::ZERO,
            size: viewport.x * tuning.size_fraction,
            phase: BonusPhase::Drifting {
                tween: Tween {
                    from: pos,
                    to: pos + offset,
                    start_tick: now,
                    duration_ticks: drift_ticks,
                    easing: Easing::SineInOut,
                },
            },
        }
    }

    pub fn is_escaping(&self) -> bool {
        matches!(self.phase, BonusPhase::Escaping)
    }

    /// Per-tick movement: follow the tween, or integrate velocity
    pub fn advance(&mut self, now: u64, dt: f32) {
        match &self.phase {
            BonusPhase::Drifting { tween } => self.pos = tween.sample(now),
            BonusPhase::Escaping => self.pos += self.vel * dt,
        }
    }

    /// Finish the drift and fly off in a random direction.
    ///
    /// Each axis picks -1, 0 or 1 independently, so the sphere may also
    /// fly straight along an axis or sit still until it expires.
    pub fn escape(&mut self, viewport: Vec2, tuning: &BonusTuning, rng: &mut impl Rng) {
        if let BonusPhase::Drifting { tween } = &self.phase {
            self.pos = tween.to;
        }

        let direction = Vec2::new(
            rng.random_range(-1i32..=1) as f32,
            rng.random_range(-1i32..=1) as f32,
        );
        let speed = rng.random_range(
            tuning.escape_speed_min * viewport.x..=tuning.escape_speed_max * viewport.x,
        );

        self.vel = direction * speed;
        self.phase = BonusPhase::Escaping;
    }

    pub fn hit_bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Vec2::splat(self.size))
    }
}
