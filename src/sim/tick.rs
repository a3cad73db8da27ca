//! Fixed timestep simulation tick
//!
//! One tick, in order:
//! 1. advance the virtual clock
//! 2. per-frame update (sun, bonus movement and bounds check, shadows)
//! 3. fire every task due at the new time, in scheduling order
//! 4. apply queued input

use glam::Vec2;

use super::scheduler::Task;
use super::state::GameState;
use super::wallet::UpgradeTier;

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-down positions in screen pixels (click/tap)
    pub pointer_downs: Vec<Vec2>,
    /// Upgrade buttons pressed
    pub upgrades: Vec<UpgradeTier>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.pointer_downs.is_empty() && self.upgrades.is_empty()
    }

    pub fn clear(&mut self) {
        self.pointer_downs.clear();
        self.upgrades.clear();
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    let now = state.time_ticks;

    // Per-frame update
    if let Some(light) = state.light.as_mut() {
        light.advance(dt);
    }
    if let Some(sphere) = state.bonus.as_mut() {
        sphere.advance(now, dt);
    }
    state.check_bonus_bounds();
    state.refresh_shadows();

    // Timers
    while let Some(task) = state.scheduler.pop_due(now) {
        run_task(state, task);
    }

    // Input
    for &point in &input.pointer_downs {
        state.pointer_down(point);
    }
    for &tier in &input.upgrades {
        state.upgrade(tier);
    }
}

fn run_task(state: &mut GameState, task: Task) {
    log::trace!("t={} running {:?}", state.time_ticks, task);
    match task {
        Task::RespawnBalloon(index) => state.respawn_balloon(index),
        Task::SpawnBonus => state.spawn_bonus(),
        Task::BonusDriftComplete(handle) => state.bonus_drift_complete(handle),
        Task::BonusExpire(handle) => state.expire_bonus(handle),
    }
}

/// Run `ticks` ticks with no input
pub fn run_idle(state: &mut GameState, ticks: u64, dt: f32) {
    let input = TickInput::default();
    for _ in 0..ticks {
        tick(state, &input, dt);
    }
}
