//! Game tuning
//!
//! Every gameplay constant can be overridden from a JSON document.
//! Missing fields fall back to the reference values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    /// Space left below the catcher
    pub floor_gap: f32,

    // === Catcher ===
    pub catcher_width: f32,
    pub catcher_height: f32,
    pub catcher_velocity: f32,

    // === Falling objects ===
    pub object_size: f32,

    // === Round clock ===
    pub round_duration_ms: u64,
    pub clock_tick_ms: u64,
    pub reset_delay_ms: u64,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_cap: f32,
    pub speed_every: u32,
    pub initial_spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,
    pub spawn_interval_floor_ms: u64,
    pub spawn_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            floor_gap: FLOOR_GAP,

            catcher_width: CATCHER_WIDTH,
            catcher_height: CATCHER_HEIGHT,
            catcher_velocity: CATCHER_VELOCITY,

            object_size: OBJECT_SIZE,

            round_duration_ms: ROUND_DURATION_MS,
            clock_tick_ms: CLOCK_TICK_MS,
            reset_delay_ms: RESET_DELAY_MS,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_cap: SPEED_CAP,
            speed_every: SPEED_EVERY,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            spawn_every: SPAWN_EVERY,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Vertical position of the catcher's top edge
    pub fn catcher_y(&self) -> f32 {
        self.field_height - self.floor_gap - self.catcher_height
    }

    /// Repair values that would break the simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.field_width > 0.0) || !(self.field_height > 0.0) {
            log::warn!(
                "Invalid field size {}x{}, using defaults",
                self.field_width,
                self.field_height
            );
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if !(self.catcher_width > 0.0) || self.catcher_width > self.field_width {
            log::warn!(
                "Catcher width {} does not fit field width {}, clamping",
                self.catcher_width,
                self.field_width
            );
            self.catcher_width = if self.catcher_width > 0.0 {
                self.catcher_width.min(self.field_width)
            } else {
                defaults.catcher_width.min(self.field_width)
            };
        }
        if !(self.object_size > 0.0) || self.object_size > self.field_width {
            log::warn!("Object size {} out of range, clamping", self.object_size);
            self.object_size = if self.object_size > 0.0 {
                self.object_size.min(self.field_width)
            } else {
                defaults.object_size.min(self.field_width)
            };
        }
        if self.catcher_y() < 0.0 {
            log::warn!("Catcher does not fit vertically, resetting floor gap");
            self.floor_gap = 0.0;
            self.catcher_height = self.catcher_height.min(self.field_height);
        }
        if self.clock_tick_ms == 0 {
            self.clock_tick_ms = defaults.clock_tick_ms;
        }
        if self.spawn_interval_floor_ms == 0 {
            self.spawn_interval_floor_ms = defaults.spawn_interval_floor_ms;
        }
        if self.initial_spawn_interval_ms < self.spawn_interval_floor_ms {
            self.initial_spawn_interval_ms = self.spawn_interval_floor_ms;
        }
        if self.speed_cap < self.initial_speed {
            self.speed_cap = self.initial_speed;
        }
        if self.speed_every == 0 {
            self.speed_every = defaults.speed_every;
        }
        if self.spawn_every == 0 {
            self.spawn_every = defaults.spawn_every;
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "catchfall_config";

    /// Environment variable naming a JSON config file (native only)
    pub const ENV_VAR: &'static str = "CATCHFALL_CONFIG";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `CATCHFALL_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default config");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config in {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.round_duration_ms, 30_000);
        assert_eq!(config.initial_spawn_interval_ms, 1_500);
        assert_eq!(config.catcher_y(), 550.0);
    }

    #[test]
    fn test_partial_json_overrides_named_fields_only() {
        let config = GameConfig::from_json(r#"{ "round_duration_ms": 10000 }"#).unwrap();
        assert_eq!(config.round_duration_ms, 10_000);
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.speed_cap, SPEED_CAP);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ round_duration_ms: }").is_err());
    }

    #[test]
    fn test_sanitize_clamps_oversized_catcher() {
        let config = GameConfig::from_json(r#"{ "field_width": 80, "catcher_width": 100 }"#).unwrap();
        assert_eq!(config.catcher_width, 80.0);
    }

    #[test]
    fn test_sanitize_raises_interval_to_floor() {
        let config = GameConfig::from_json(
            r#"{ "initial_spawn_interval_ms": 100, "spawn_interval_floor_ms": 300 }"#,
        )
        .unwrap();
        assert_eq!(config.initial_spawn_interval_ms, 300);
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = GameConfig::default();
        config.speed_cap = 7.5;
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
