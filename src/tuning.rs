//! Data-driven game balance
//!
//! Every gameplay number a designer might want to touch lives here. The
//! defaults match the shipped balance; a JSON file can override any subset
//! of fields.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Gameplay balance knobs, owned by the world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Paddle horizontal speed, play-area units per second
    pub paddle_speed: f32,
    /// Minimum interval between shots, seconds
    pub fire_cooldown: f32,
    /// Projectile speed, play-area units per second
    pub projectile_speed: f32,
    /// Target speed is sampled uniformly from this range at spawn
    pub target_speed_min: f32,
    pub target_speed_max: f32,
    /// Targets at or below this scale are destroyed outright instead of
    /// splitting
    pub split_threshold: f32,
    /// Seconds to wait after a round ends before the world resets
    pub restart_wait: f32,
    /// Targets spawned on each restart
    pub initial_targets: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: 1.0,
            fire_cooldown: 0.25,
            projectile_speed: 2.0,
            target_speed_min: 0.25,
            target_speed_max: 0.4,
            split_threshold: 0.10,
            restart_wait: 5.0,
            initial_targets: 1,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse tuning JSON")
    }

    /// Load tuning from a JSON file, falling back to defaults on any error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("ignoring {}: {err:#}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
