/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::difficulty::Tuning;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub tuning: Tuning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    pub tick_interval_ms: u64,
    pub frame_ms: u64,
    pub max_catch_up: u32,   // ticks replayed per frame at most
}

/// Arena units per terminal cell, and the paddles' logical thickness.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub paddle_width: f64,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    layout: TomlLayout,
    #[serde(default)]
    difficulty: TomlDifficulty,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_interval")]
    tick_interval_ms: u64,
    #[serde(default = "default_frame")]
    frame_ms: u64,
    #[serde(default = "default_catch_up")]
    max_catch_up: u32,
}

#[derive(Deserialize, Debug)]
struct TomlLayout {
    #[serde(default = "default_cell_width")]
    cell_width: f64,
    #[serde(default = "default_cell_height")]
    cell_height: f64,
    #[serde(default = "default_paddle_width")]
    paddle_width: f64,
}

/// Every key optional; missing ones keep the built-in tuning.
#[derive(Deserialize, Debug, Default)]
struct TomlDifficulty {
    initial_distance: Option<f64>,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    distance_step: Option<f64>,
    initial_height: Option<f64>,
    min_height: Option<f64>,
    max_height: Option<f64>,
    shrink_factor: Option<f64>,
    grow_factor: Option<f64>,
    hit_score: Option<i64>,
}

// ── Defaults ──

fn default_tick_interval() -> u64 { 2 }
fn default_frame() -> u64 { 16 }       // ~60 fps redraw
fn default_catch_up() -> u32 { 64 }
fn default_cell_width() -> f64 { 8.0 }
fn default_cell_height() -> f64 { 16.0 }
fn default_paddle_width() -> f64 { 6.0 }  // >= max_distance, see from_toml

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_interval_ms: default_tick_interval(),
            frame_ms: default_frame(),
            max_catch_up: default_catch_up(),
        }
    }
}

impl Default for TomlLayout {
    fn default() -> Self {
        TomlLayout {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            paddle_width: default_paddle_width(),
        }
    }
}

impl TomlDifficulty {
    fn apply(&self, mut t: Tuning) -> Tuning {
        if let Some(v) = self.initial_distance { t.initial_distance = v; }
        if let Some(v) = self.min_distance { t.min_distance = v; }
        if let Some(v) = self.max_distance { t.max_distance = v; }
        if let Some(v) = self.distance_step { t.distance_step = v; }
        if let Some(v) = self.initial_height { t.initial_height = v; }
        if let Some(v) = self.min_height { t.min_height = v; }
        if let Some(v) = self.max_height { t.max_height = v; }
        if let Some(v) = self.shrink_factor { t.shrink_factor = v; }
        if let Some(v) = self.grow_factor { t.grow_factor = v; }
        if let Some(v) = self.hit_score { t.hit_score = v; }
        t
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        Self::from_toml(load_toml(&candidate_dirs()))
    }

    /// Parse config text directly. Bad text yields the defaults.
    pub fn parse(text: &str) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => Self::from_toml(cfg),
            Err(e) => {
                tracing::warn!("config.toml parse error, using defaults: {e}");
                Self::from_toml(TomlConfig::default())
            }
        }
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let mut tuning = cfg.difficulty.apply(Tuning::default());
        if tuning.min_distance > tuning.max_distance {
            tracing::warn!("difficulty.min_distance exceeds max_distance, using defaults");
            let d = Tuning::default();
            tuning.min_distance = d.min_distance;
            tuning.max_distance = d.max_distance;
        }
        tuning.initial_distance = tuning.initial_distance.clamp(tuning.min_distance, tuning.max_distance);

        // Collision is sampled once per tick, so a lane thinner than one
        // step lets the dot jump over the paddle.
        let mut paddle_width = positive_or(cfg.layout.paddle_width, default_paddle_width());
        if paddle_width < tuning.max_distance {
            tracing::warn!(
                paddle_width,
                max_distance = tuning.max_distance,
                "layout.paddle_width narrower than one dot step, widening"
            );
            paddle_width = tuning.max_distance;
        }

        GameConfig {
            timing: TimingConfig {
                tick_interval_ms: cfg.timing.tick_interval_ms.max(1),
                frame_ms: cfg.timing.frame_ms.max(1),
                max_catch_up: cfg.timing.max_catch_up.max(1),
            },
            layout: LayoutConfig {
                cell_width: positive_or(cfg.layout.cell_width, default_cell_width()),
                cell_height: positive_or(cfg.layout.cell_height, default_cell_height()),
                paddle_width,
            },
            tuning,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => {
                        tracing::info!("loaded {}", path.display());
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!("config.toml parse error, using defaults: {e}");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    tracing::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
