//! Demo settings
//!
//! Loaded from a JSON file at startup. Missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "BOUNCING_BALLS_CONFIG";
/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bouncing_balls.json";

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneKind {
    /// One ball dropped on a floor
    Floor,
    /// Many balls inside a circle
    #[default]
    Container,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Floor => "Floor",
            SceneKind::Container => "Container",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "floor" | "drop" => Some(SceneKind::Floor),
            "container" | "circle" => Some(SceneKind::Container),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneKind,

    // === Balls ===
    /// Balls spawned in the container scene
    pub ball_count: usize,
    pub ball_radius: f32,
    /// Spawn seed; derived from the clock when absent
    pub seed: Option<u64>,

    // === Physics ===
    pub gravity: f32,
    pub container_radius: f32,
    /// Normal velocity multiplier on a wall bounce, in [-1, 0)
    pub container_damping: f32,
    pub floor_y: f32,
    /// Fraction of vertical speed kept on a floor bounce, in (0, 1]
    pub floor_restitution: f32,
    pub rest_threshold: f32,
    /// Split long frames into steps no longer than this (seconds)
    pub max_step: Option<f32>,

    // === Window / rendering ===
    pub circle_segments: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Container,

            ball_count: BALL_COUNT,
            ball_radius: BALL_RADIUS,
            seed: None,

            gravity: GRAVITY,
            container_radius: CONTAINER_RADIUS,
            container_damping: CONTAINER_DAMPING,
            floor_y: FLOOR_Y,
            floor_restitution: FLOOR_RESTITUTION,
            rest_threshold: REST_THRESHOLD,
            max_step: None,

            circle_segments: CIRCLE_SEGMENTS,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            title: "Bouncing Balls".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve the settings file: `$BOUNCING_BALLS_CONFIG` if set (must exist),
    /// else `bouncing_balls.json` if present, else nothing
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load from the resolved settings file, or defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Apply command line overrides (first argument selects the scene)
    pub fn apply_args<I, S>(&mut self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(arg) = args.into_iter().next() {
            let arg = arg.as_ref();
            match SceneKind::from_str(arg) {
                Some(kind) => self.scene = kind,
                None => anyhow::bail!("unknown scene '{arg}' (expected 'floor' or 'container')"),
            }
        }
        Ok(())
    }

    /// Seed to spawn from: the configured one or the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Reject settings the simulation or renderer cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.ball_radius > 0.0, "ball_radius must be positive");
        ensure!(self.rest_threshold >= 0.0, "rest_threshold must not be negative");
        ensure!(
            self.floor_restitution > 0.0 && self.floor_restitution <= 1.0,
            "floor_restitution must be in (0, 1]"
        );
        ensure!(
            self.container_damping < 0.0 && self.container_damping >= -1.0,
            "container_damping must be in [-1, 0)"
        );
        if let Some(step) = self.max_step {
            ensure!(step > 0.0, "max_step must be positive");
        }
        ensure!(
            (3..=MAX_CIRCLE_SEGMENTS).contains(&self.circle_segments),
            "circle_segments must be in 3..={MAX_CIRCLE_SEGMENTS}"
        );
        ensure!(
            self.window_width > 0 && self.window_height > 0,
            "window size must be non-zero"
        );
        if self.scene == SceneKind::Container {
            ensure!(self.ball_count > 0, "container scene needs at least one ball");
            ensure!(
                self.ball_radius < self.container_radius,
                "ball_radius ({}) must be smaller than container_radius ({})",
                self.ball_radius,
                self.container_radius
            );
        }
        Ok(())
    }
}
