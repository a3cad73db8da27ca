//! Balloon entities and their pop/respawn lifecycle

use glam::Vec2;

use super::bounds::Bounds;
use super::light::LightSource;
use super::shadow::{Shadow, update_shadow};
use crate::tuning::ShadowTuning;

/// Lifecycle state of a balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonState {
    /// Visible, clickable, casting a shadow
    Active,
    /// Popped; hidden until its respawn task fires
    Exploded,
}

/// A clickable balloon in the grid
#[derive(Debug, Clone)]
pub struct Balloon {
    /// Grid slot (row-major)
    pub index: usize,
    /// Spawn position; respawns return here
    pub pos: Vec2,
    /// Display size
    pub size: Vec2,
    pub state: BalloonState,
    /// Present exactly while `Active`
    pub shadow: Option<Shadow>,
}

impl Balloon {
    pub fn new(index: usize, pos: Vec2, size: Vec2) -> Self {
        Self {
            index,
            pos,
            size,
            state: BalloonState::Active,
            shadow: Some(Shadow::default()),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == BalloonState::Active
    }

    /// Hit box, only while active
    pub fn hit_bounds(&self) -> Option<Bounds> {
        self.is_active().then(|| Bounds::from_center(self.pos, self.size))
    }

    /// Pop the balloon: disable it and destroy its shadow.
    ///
    /// Returns false (and does nothing) if it is already exploded.
    pub fn pop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = BalloonState::Exploded;
        self.shadow = None;
        true
    }

    /// Bring the balloon back with a fresh shadow, drawn immediately.
    ///
    /// Returns false if it was already active.
    pub fn respawn(&mut self, light: Option<&LightSource>, tuning: &ShadowTuning) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = BalloonState::Active;
        self.shadow = Some(Shadow::default());
        self.refresh_shadow(light, tuning);
        true
    }

    /// Redraw the shadow for the current light position
    pub fn refresh_shadow(&mut self, light: Option<&LightSource>, tuning: &ShadowTuning) {
        update_shadow(self.shadow.as_mut(), self.pos, self.size, light, tuning);
    }
}
