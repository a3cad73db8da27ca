//! Game state and entity lifecycle handlers
//!
//! Everything the loop and the input/timer handlers mutate lives in one
//! `GameState`. Handlers that can be reached by a late task check that
//! their target still exists and silently do nothing otherwise.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::balloon::Balloon;
use super::bonus::{BonusHandle, BonusSphere};
use super::bounds::Bounds;
use super::layout::grid_layout;
use super::light::LightSource;
use super::scheduler::{Scheduler, Task};
use super::wallet::{UpgradeTier, Wallet};
use crate::ms_to_ticks;
use crate::tuning::Tuning;

/// Things that happened during a tick, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BalloonPopped { index: usize, reward: u64 },
    BalloonRespawned { index: usize },
    BonusSpawned { handle: BonusHandle },
    /// Spawn timer fired while a sphere was still live
    BonusSpawnSkipped,
    BonusEscaped { handle: BonusHandle },
    BonusCollected { handle: BonusHandle, reward: u64 },
    BonusExpired { handle: BonusHandle },
    BonusLeftBounds { handle: BonusHandle },
    Upgraded { tier: UpgradeTier, money_per_click: u64 },
}

impl GameEvent {
    /// Whether the money display needs refreshing
    pub fn changes_money(&self) -> bool {
        matches!(
            self,
            GameEvent::BalloonPopped { .. } | GameEvent::BonusCollected { .. }
        )
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Balloon(usize),
    Bonus(BonusHandle),
}

/// Complete game state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// World rectangle the bonus sphere must stay inside
    pub world: Bounds,
    /// Simulation tick counter (the virtual clock)
    pub time_ticks: u64,
    /// Balloons in row-major grid order
    pub balloons: Vec<Balloon>,
    /// The single live bonus sphere, if any
    pub bonus: Option<BonusSphere>,
    pub light: Option<LightSource>,
    pub wallet: Wallet,
    pub scheduler: Scheduler,
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_bonus_generation: u32,
}

impl GameState {
    /// Lay out the grid, light the scene and start the bonus spawn timer
    pub fn new(seed: u64, viewport: Vec2, tuning: Tuning) -> Self {
        let layout = grid_layout(viewport, &tuning.layout);
        let balloons = layout
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Balloon::new(i, pos, layout.balloon_size))
            .collect();

        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(0, ms_to_ticks(tuning.bonus.spawn_interval_ms), Task::SpawnBonus);

        let mut state = Self {
            seed,
            light: Some(LightSource::new(viewport, &tuning.light)),
            wallet: Wallet::new(&tuning.wallet),
            tuning,
            viewport,
            world: Bounds::from_viewport(viewport),
            time_ticks: 0,
            balloons,
            bonus: None,
            scheduler,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_bonus_generation: 1,
        };
        state.refresh_shadows();

        log::debug!(
            "Laid out {} balloons ({:.1}x{:.1}) for {}x{} viewport",
            state.balloons.len(),
            layout.balloon_size.x,
            layout.balloon_size.y,
            viewport.x,
            viewport.y
        );

        state
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Redraw every active balloon's shadow
    pub fn refresh_shadows(&mut self) {
        let light = self.light.as_ref();
        let tuning = &self.tuning.shadow;
        for balloon in &mut self.balloons {
            balloon.refresh_shadow(light, tuning);
        }
    }

    // --- Balloons ---

    /// Pop a balloon: award money and schedule its respawn.
    ///
    /// Returns false if the balloon does not exist or is already popped.
    pub fn pop_balloon(&mut self, index: usize) -> bool {
        let Some(balloon) = self.balloons.get_mut(index) else {
            return false;
        };
        if !balloon.pop() {
            return false;
        }

        let reward = self.wallet.award_click();
        self.scheduler.schedule(
            self.time_ticks,
            ms_to_ticks(self.tuning.balloon.respawn_delay_ms),
            Task::RespawnBalloon(index),
        );
        self.events.push(GameEvent::BalloonPopped { index, reward });
        log::trace!("Balloon {} popped (+{}, money {})", index, reward, self.wallet.money);
        true
    }

    pub(crate) fn respawn_balloon(&mut self, index: usize) {
        let light = self.light.as_ref();
        let tuning = &self.tuning.shadow;
        if let Some(balloon) = self.balloons.get_mut(index) {
            if balloon.respawn(light, tuning) {
                self.events.push(GameEvent::BalloonRespawned { index });
            }
        }
    }

    // --- Bonus sphere ---

    pub fn bonus_handle(&self) -> Option<BonusHandle> {
        self.bonus.as_ref().map(|b| b.handle)
    }

    /// Spawn timer handler. Only one sphere may be live at a time.
    pub(crate) fn spawn_bonus(&mut self) {
        if self.bonus.is_some() {
            self.events.push(GameEvent::BonusSpawnSkipped);
            log::debug!("Bonus spawn skipped: sphere still live");
            return;
        }

        let handle = BonusHandle(self.next_bonus_generation);
        self.next_bonus_generation = self.next_bonus_generation.wrapping_add(1);

        let drift_ticks = ms_to_ticks(self.tuning.bonus.drift_duration_ms);
        let sphere = BonusSphere::spawn(
            handle,
            self.viewport,
            self.time_ticks,
            drift_ticks,
            &self.tuning.bonus,
            &mut self.rng,
        );
        log::debug!("Bonus {:?} spawned at ({:.0}, {:.0})", handle, sphere.pos.x, sphere.pos.y);

        self.bonus = Some(sphere);
        self.scheduler
            .schedule(self.time_ticks, drift_ticks, Task::BonusDriftComplete(handle));
        self.events.push(GameEvent::BonusSpawned { handle });
    }

    /// Drift tween finished: fly away and start the expiry timer
    pub(crate) fn bonus_drift_complete(&mut self, handle: BonusHandle) {
        let Some(sphere) = self.bonus.as_mut().filter(|b| b.handle == handle) else {
            return;
        };

        sphere.escape(self.viewport, &self.tuning.bonus, &mut self.rng);
        log::debug!("Bonus {:?} escaping with velocity {:?}", handle, sphere.vel);

        self.scheduler.schedule(
            self.time_ticks,
            ms_to_ticks(self.tuning.bonus.escape_duration_ms),
            Task::BonusExpire(handle),
        );
        self.events.push(GameEvent::BonusEscaped { handle });
    }

    /// Remove the sphere if `handle` is still the live one
    fn take_bonus(&mut self, handle: BonusHandle) -> Option<BonusSphere> {
        if self.bonus_handle() == Some(handle) {
            self.bonus.take()
        } else {
            None
        }
    }

    /// Expiry timer handler
    pub(crate) fn expire_bonus(&mut self, handle: BonusHandle) {
        if self.take_bonus(handle).is_some() {
            self.events.push(GameEvent::BonusExpired { handle });
            log::debug!("Bonus {:?} expired", handle);
        }
    }

    /// Remove the sphere once it has left the world
    pub(crate) fn check_bonus_bounds(&mut self) {
        let Some(handle) = self
            .bonus
            .as_ref()
            .filter(|b| !self.world.contains(b.pos))
            .map(|b| b.handle)
        else {
            return;
        };

        self.bonus = None;
        self.events.push(GameEvent::BonusLeftBounds { handle });
        log::debug!("Bonus {:?} left the world", handle);
    }

    /// Collect the sphere: flat reward, regardless of the per-click value.
    ///
    /// Returns false if `handle` is not the live sphere.
    pub fn click_bonus(&mut self, handle: BonusHandle) -> bool {
        if self.take_bonus(handle).is_none() {
            return false;
        }

        let reward = self.tuning.bonus.reward;
        self.wallet.award(reward);
        self.events.push(GameEvent::BonusCollected { handle, reward });
        log::debug!("Bonus {:?} collected (+{}, money {})", handle, reward, self.wallet.money);
        true
    }

    // --- Input ---

    /// Hit-test a pointer-down; the sphere is on top of the balloons.
    pub fn hit_test(&self, point: Vec2) -> Option<ClickTarget> {
        if let Some(sphere) = &self.bonus {
            if sphere.hit_bounds().contains(point) {
                return Some(ClickTarget::Bonus(sphere.handle));
            }
        }

        self.balloons
            .iter()
            .find(|b| b.hit_bounds().is_some_and(|bounds| bounds.contains(point)))
            .map(|b| ClickTarget::Balloon(b.index))
    }

    /// Route a pointer-down to whatever it hit
    pub fn pointer_down(&mut self, point: Vec2) -> Option<ClickTarget> {
        let target = self.hit_test(point)?;
        let handled = match target {
            ClickTarget::Balloon(index) => self.pop_balloon(index),
            ClickTarget::Bonus(handle) => self.click_bonus(handle),
        };
        handled.then_some(target)
    }

    /// Apply a free upgrade
    pub fn upgrade(&mut self, tier: UpgradeTier) -> u64 {
        let money_per_click = self.wallet.upgrade(tier);
        self.events.push(GameEvent::Upgraded {
            tier,
            money_per_click,
        });
        log::info!("Upgrade +{} -> {} per click", tier.amount(), money_per_click);
        money_per_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balloon::BalloonState;

    fn state() -> GameState {
        GameState::new(42, Vec2::new(1000.0, 800.0), Tuning::default())
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!(s.balloons.len(), 16);
        assert!(s.balloons.iter().all(|b| b.is_active()));
        assert!(s
            .balloons
            .iter()
            .all(|b| b.shadow.as_ref().is_some_and(|sh| sh.ellipse.is_some())));
        assert!(s.bonus.is_none());
        assert_eq!(s.wallet.money, 0);
        assert_eq!(s.wallet.money_per_click, 10);
        assert_eq!(s.scheduler.count_pending(|t| *t == Task::SpawnBonus), 1);
    }

    #[test]
    fn test_pop_schedules_exactly_one_respawn() {
        let mut s = state();
        assert!(s.pop_balloon(5));
        assert_eq!(s.wallet.money, 10);
        assert_eq!(s.balloons[5].state, BalloonState::Exploded);
        assert_eq!(s.scheduler.count_pending(|t| *t == Task::RespawnBalloon(5)), 1);
        assert_eq!(s.drain_events(), vec![GameEvent::BalloonPopped { index: 5, reward: 10 }]);
    }

    #[test]
    fn test_pop_exploded_balloon_does_nothing() {
        let mut s = state();
        assert!(s.pop_balloon(0));
        assert!(!s.pop_balloon(0));
        assert_eq!(s.wallet.money, 10);
        assert_eq!(s.scheduler.count_pending(|t| *t == Task::RespawnBalloon(0)), 1);
    }

    #[test]
    fn test_pop_out_of_range() {
        let mut s = state();
        assert!(!s.pop_balloon(99));
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_pointer_down_pops_balloon_under_cursor() {
        let mut s = state();
        let pos = s.balloons[6].pos;
        assert_eq!(s.pointer_down(pos), Some(ClickTarget::Balloon(6)));
        // Exploded balloon is no longer hit
        assert_eq!(s.pointer_down(pos), None);
        assert_eq!(s.wallet.money, 10);
    }

    #[test]
    fn test_pointer_down_on_empty_sky() {
        let mut s = state();
        assert_eq!(s.pointer_down(Vec2::new(1.0, 799.0)), None);
        assert_eq!(s.wallet.money, 0);
    }

    #[test]
    fn test_spawn_skipped_while_live() {
        let mut s = state();
        s.spawn_bonus();
        let first = s.bonus_handle();
        assert!(first.is_some());
        s.spawn_bonus();
        assert_eq!(s.bonus_handle(), first);
        assert!(s.events().contains(&GameEvent::BonusSpawnSkipped));
    }

    #[test]
    fn test_click_bonus_awards_flat_reward() {
        let mut s = state();
        s.upgrade(UpgradeTier::Large);
        s.spawn_bonus();
        let handle = s.bonus_handle().unwrap();
        assert!(s.click_bonus(handle));
        assert_eq!(s.wallet.money, 20);
        assert!(s.bonus.is_none());
        // Second click on the same handle is ignored
        assert!(!s.click_bonus(handle));
        assert_eq!(s.wallet.money, 20);
    }

    #[test]
    fn test_pointer_down_prefers_bonus_over_balloon() {
        let mut s = state();
        s.spawn_bonus();
        let handle = s.bonus_handle().unwrap();
        // Park the sphere on top of a balloon
        let balloon_pos = s.balloons[0].pos;
        if let Some(b) = s.bonus.as_mut() {
            b.pos = balloon_pos;
        }
        assert_eq!(s.pointer_down(balloon_pos), Some(ClickTarget::Bonus(handle)));
        assert!(s.balloons[0].is_active());
        assert_eq!(s.wallet.money, 20);
    }

    #[test]
    fn test_stale_handles_are_ignored() {
        let mut s = state();
        s.spawn_bonus();
        let old = s.bonus_handle().unwrap();
        assert!(s.click_bonus(old));

        s.spawn_bonus();
        let new = s.bonus_handle().unwrap();
        assert_ne!(old, new);

        s.bonus_drift_complete(old);
        s.expire_bonus(old);
        assert_eq!(s.bonus_handle(), Some(new));
        assert!(!s.bonus.as_ref().unwrap().is_escaping());
    }

    #[test]
    fn test_bounds_check_removes_escaped_sphere() {
        let mut s = state();
        s.spawn_bonus();
        let handle = s.bonus_handle().unwrap();
        if let Some(b) = s.bonus.as_mut() {
            b.pos = Vec2::new(-5.0, 100.0);
        }
        s.check_bonus_bounds();
        assert!(s.bonus.is_none());
        assert!(s.events().contains(&GameEvent::BonusLeftBounds { handle }));
    }

    #[test]
    fn test_upgrade_event() {
        let mut s = state();
        assert_eq!(s.upgrade(UpgradeTier::Medium), 30);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::Upgraded {
                tier: UpgradeTier::Medium,
                money_per_click: 30
            }]
        );
    }
}
