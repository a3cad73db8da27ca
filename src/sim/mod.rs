//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers run on the tick counter, never wall-clock time
//! - No rendering or platform dependencies

pub mod balloon;
pub mod bonus;
pub mod bounds;
pub mod layout;
pub mod light;
pub mod scheduler;
pub mod shadow;
pub mod state;
pub mod tick;
pub mod wallet;

pub use balloon::{Balloon, BalloonState};
pub use bonus::{BonusHandle, BonusPhase, BonusSphere, Easing, Tween};
pub use bounds::Bounds;
pub use layout::{GridLayout, grid_layout};
pub use light::LightSource;
pub use scheduler::{Scheduler, Task};
pub use shadow::{Ellipse, Shadow, update_shadow};
pub use state::{ClickTarget, GameEvent, GameState};
pub use tick::{TickInput, run_idle, tick};
pub use wallet::{UpgradeTier, Wallet};
