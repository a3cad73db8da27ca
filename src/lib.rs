//! Balloon Pop - an incremental clicker game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloons, bonus sphere, timers, money)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate in ticks per second
    pub const SIM_HZ: u64 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sky color (#87CEEB)
    pub const SKY_COLOR: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
}

/// Convert a millisecond delay to whole simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u64) -> u64 {
    (ms * consts::SIM_HZ).div_ceil(1000)
}

/// Text shown in the money display
pub fn money_label(money: u64) -> String {
    format!("Money: ${}", money)
}
