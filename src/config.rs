use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::storage::write_atomic;

/// User-tunable settings, stored as `settings.json` next to the save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area width in world units.
    pub area_width: f32,
    /// Play area height in world units.
    pub area_height: f32,
    /// Milliseconds between cat updates.
    pub tick_ms: u64,
    /// Seconds between autosaves.
    pub autosave_secs: u64,
    /// How long a speech bubble stays up.
    pub bubble_ms: u64,
    /// Store key the colony is saved under.
    pub storage_key: String,
    /// Fixed RNG seed. None draws from entropy.
    pub seed: Option<u64>,
    /// Frame rate ceiling for the terminal, clamped to 10..=240.
    pub fps_cap: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            area_width: 800.0,
            area_height: 400.0,
            tick_ms: 100,
            autosave_secs: 10,
            bubble_ms: 2000,
            storage_key: "cats".to_string(),
            seed: None,
            fps_cap: 30,
        }
    }
}

impl Settings {
    pub fn area(&self) -> Vec2 {
        Vec2::new(self.area_width.max(1.0), self.area_height.max(1.0))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_secs.max(1))
    }

    pub fn bubble_lifetime(&self) -> Duration {
        Duration::from_millis(self.bubble_ms)
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

/// Where settings, saves and logs live.
pub struct Paths {
    pub data_dir: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "pixelcats", "PixelCats")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("pixelcats.log"),
        data_dir: dir,
    })
}

/// Read settings, falling back to defaults when absent or unreadable.
pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let data = serde_json::to_vec_pretty(settings)?;
    write_atomic(path, &data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let s: Settings = serde_json::from_str(r#"{"tick_ms":50,"seed":7}"#).unwrap();
        assert_eq!(s.tick_ms, 50);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.storage_key, "cats");
        assert_eq!(s.area(), Vec2::new(800.0, 400.0));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pixelcats-no-such-settings.json");
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn degenerate_values_are_floored() {
        let s = Settings {
            area_width: 0.0,
            tick_ms: 0,
            ..Settings::default()
        };
        assert_eq!(s.area().x, 1.0);
        assert_eq!(s.tick_interval(), Duration::from_millis(1));
    }
}
