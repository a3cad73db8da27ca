//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override them with an
//! inline JSON block (`<script id="tuning" type="application/json">`).
//! Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Balloon grid layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    pub rows: u32,
    pub cols: u32,
    /// Fraction of the viewport area covered by one balloon
    pub area_fraction: f32,
    /// Balloon width / height
    pub aspect_ratio: f32,
    /// Horizontal step between columns (fraction of viewport width)
    pub spacing_x: f32,
    /// Vertical step between rows (fraction of viewport height)
    pub spacing_y: f32,
    /// Right edge of the grid (fraction of viewport width)
    pub right_edge: f32,
    /// Top edge of the grid (fraction of viewport height)
    pub top_edge: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            area_fraction: 0.01,
            aspect_ratio: 2.0 / 4.0,
            spacing_x: 0.1,
            spacing_y: 0.2,
            right_edge: 0.9,
            top_edge: 0.1,
        }
    }
}

/// Sun movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightTuning {
    /// Horizontal speed in pixels per second
    pub speed: f32,
    /// Distance kept from the right edge of the viewport
    pub right_margin: f32,
    /// Display size of the sun disc
    pub size: f32,
}

impl Default for LightTuning {
    fn default() -> Self {
        Self {
            // 1 px per frame at 60 fps
            speed: 60.0,
            right_margin: 200.0,
            size: 50.0,
        }
    }
}

/// Projected balloon shadows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowTuning {
    pub offset_factor_x: f32,
    pub offset_factor_y: f32,
    /// Shadow width relative to the balloon width
    pub width_factor: f32,
    pub height: f32,
    pub opacity: f32,
}

impl Default for ShadowTuning {
    fn default() -> Self {
        Self {
            offset_factor_x: 0.3,
            offset_factor_y: 0.007,
            width_factor: 0.8,
            height: 3.0,
            opacity: 0.4,
        }
    }
}

/// Balloon lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonTuning {
    pub respawn_delay_ms: u64,
}

impl Default for BalloonTuning {
    fn default() -> Self {
        Self {
            respawn_delay_ms: 3000,
        }
    }
}

/// Bonus sphere lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusTuning {
    pub spawn_interval_ms: u64,
    pub drift_duration_ms: u64,
    pub escape_duration_ms: u64,
    /// Spawn area as (min, max) fractions of the viewport, both axes
    pub spawn_min: f32,
    pub spawn_max: f32,
    /// Drift target offset, fraction of viewport size per axis
    pub drift_range: f32,
    /// Escape speed range, fraction of viewport width per second
    pub escape_speed_min: f32,
    pub escape_speed_max: f32,
    /// Sphere diameter, fraction of viewport width
    pub size_fraction: f32,
    pub reward: u64,
}

impl Default for BonusTuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 5000,
            drift_duration_ms: 2000,
            escape_duration_ms: 3000,
            spawn_min: 0.1,
            spawn_max: 0.9,
            drift_range: 0.2,
            escape_speed_min: 0.2,
            escape_speed_max: 0.3,
            size_fraction: 0.05,
            reward: 20,
        }
    }
}

/// Starting economy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletTuning {
    pub starting_money: u64,
    pub starting_money_per_click: u64,
}

impl Default for WalletTuning {
    fn default() -> Self {
        Self {
            starting_money: 0,
            starting_money_per_click: 10,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub layout: LayoutTuning,
    pub light: LightTuning,
    pub shadow: ShadowTuning,
    pub balloon: BalloonTuning,
    pub bonus: BonusTuning,
    pub wallet: WalletTuning,
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Repair bonus values the simulation cannot sample from.
    ///
    /// Non-finite values fall back to defaults, inverted ranges are swapped
    /// and a negative drift range becomes zero. Every correction is logged.
    pub fn sanitized(mut self) -> Self {
        let defaults = BonusTuning::default();
        let bonus = &mut self.bonus;

        for (name, value, fallback) in [
            ("spawn_min", &mut bonus.spawn_min, defaults.spawn_min),
            ("spawn_max", &mut bonus.spawn_max, defaults.spawn_max),
            ("drift_range", &mut bonus.drift_range, defaults.drift_range),
            ("escape_speed_min", &mut bonus.escape_speed_min, defaults.escape_speed_min),
            ("escape_speed_max", &mut bonus.escape_speed_max, defaults.escape_speed_max),
        ] {
            if !value.is_finite() {
                log::warn!("bonus.{} is {}, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        if bonus.spawn_min > bonus.spawn_max {
            log::warn!(
                "bonus.spawn_min {} > spawn_max {}, swapping",
                bonus.spawn_min,
                bonus.spawn_max
            );
            std::mem::swap(&mut bonus.spawn_min, &mut bonus.spawn_max);
        }
        if bonus.escape_speed_min > bonus.escape_speed_max {
            log::warn!(
                "bonus.escape_speed_min {} > escape_speed_max {}, swapping",
                bonus.escape_speed_min,
                bonus.escape_speed_max
            );
            std::mem::swap(&mut bonus.escape_speed_min, &mut bonus.escape_speed_max);
        }
        if bonus.drift_range < 0.0 {
            log::warn!("bonus.drift_range {} is negative, using 0", bonus.drift_range);
            bonus.drift_range = 0.0;
        }

        self
    }

    /// Parse overrides, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// DOM element holding inline tuning JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";

    /// Load tuning from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Load tuning from an optional JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let t = Tuning::default();
        assert_eq!(t.layout.rows, 4);
        assert_eq!(t.layout.cols, 4);
        assert_eq!(t.balloon.respawn_delay_ms, 3000);
        assert_eq!(t.bonus.spawn_interval_ms, 5000);
        assert_eq!(t.bonus.reward, 20);
        assert_eq!(t.wallet.starting_money_per_click, 10);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let t = Tuning::from_json(r#"{ "bonus": { "reward": 50 }, "layout": { "rows": 3 } }"#)
            .unwrap();
        assert_eq!(t.bonus.reward, 50);
        assert_eq!(t.bonus.spawn_interval_ms, 5000);
        assert_eq!(t.layout.rows, 3);
        assert_eq!(t.layout.cols, 4);
        assert_eq!(t.wallet.starting_money_per_click, 10);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert!(Tuning::from_json("{ not json").is_err());
        let t = Tuning::from_json_or_default("{ not json");
        assert_eq!(t.balloon.respawn_delay_ms, 3000);
    }

    #[test]
    fn test_inverted_ranges_are_repaired() {
        let t = Tuning::from_json(
            r#"{ "bonus": { "spawn_min": 0.9, "spawn_max": 0.1, "drift_range": -0.2,
                            "escape_speed_min": 0.5, "escape_speed_max": 0.1 } }"#,
        )
        .unwrap();
        assert_eq!((t.bonus.spawn_min, t.bonus.spawn_max), (0.1, 0.9));
        assert_eq!((t.bonus.escape_speed_min, t.bonus.escape_speed_max), (0.1, 0.5));
        assert_eq!(t.bonus.drift_range, 0.0);
    }

    #[test]
    fn test_repaired_tuning_survives_bonus_cycle() {
        use crate::consts::SIM_DT;
        use crate::ms_to_ticks;
        use crate::sim::{GameState, run_idle};
        use glam::Vec2;

        let t = Tuning::from_json_or_default(
            r#"{ "bonus": { "spawn_min": 0.9, "spawn_max": 0.1, "drift_range": -0.2,
                            "escape_speed_min": 0.3, "escape_speed_max": 0.2 } }"#,
        );
        let mut s = GameState::new(7, Vec2::new(1000.0, 800.0), t);

        // Past the first spawn and into the escape phase
        run_idle(&mut s, ms_to_ticks(5000), SIM_DT);
        assert!(s.bonus.is_some());
        run_idle(&mut s, ms_to_ticks(2000), SIM_DT);
        assert_eq!(s.time_ticks, ms_to_ticks(7000));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load_from(Some(std::path::Path::new("/nonexistent/tuning.json")));
        assert_eq!(t.bonus.drift_duration_ms, 2000);
    }
}
