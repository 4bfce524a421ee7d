use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cat::animation::AnimationState;
use crate::cat::tint::Tint;
use crate::cat::Cat;
use crate::colony::Colony;

/// Flat string key-value storage, one value per key.
pub trait Store {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Contents vanish with the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path_for(key);
        write_atomic(&path, value.as_bytes())
    }
}

/// Write through a temp file and rename over the target.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

/// Saved form of one cat. Every field is optional so older saves still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatRecord {
    pub name: Option<String>,
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
    pub brightness: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub hunger: Option<f32>,
    pub thirst: Option<f32>,
    pub affection: Option<f32>,
    pub frame_index: Option<u32>,
}

impl CatRecord {
    pub fn from_cat(cat: &Cat) -> Self {
        let tint = cat.tint();
        let pos = cat.pos();
        let needs = cat.needs().levels();
        Self {
            name: Some(cat.name().to_string()),
            hue: Some(tint.hue),
            saturation: Some(tint.saturation),
            brightness: Some(tint.brightness),
            x: Some(pos.x),
            y: Some(pos.y),
            hunger: Some(needs.hunger),
            thirst: Some(needs.thirst),
            affection: Some(needs.affection),
            frame_index: Some(cat.frame() as u32),
        }
    }

    /// Overlay the saved fields onto a freshly spawned cat.
    pub fn apply(&self, cat: &mut Cat) {
        if let Some(name) = &self.name {
            cat.rename(name);
        }

        let fresh = cat.tint();
        cat.set_tint(Tint {
            hue: self.hue.unwrap_or(fresh.hue),
            saturation: self.saturation.unwrap_or(fresh.saturation),
            brightness: self.brightness.unwrap_or(fresh.brightness),
        });

        let pos = cat.pos();
        cat.motion.pos = Vec2::new(self.x.unwrap_or(pos.x), self.y.unwrap_or(pos.y));

        if let Some(level) = self.hunger {
            cat.needs.hunger.set_level(level);
        }
        if let Some(level) = self.thirst {
            cat.needs.thirst.set_level(level);
        }
        if let Some(level) = self.affection {
            cat.needs.affection.set_level(level);
        }
        if let Some(frame) = self.frame_index {
            cat.anim = AnimationState::at_frame(frame);
        }
    }
}

/// Serialize the whole colony under `key`, replacing what was there.
pub fn save(store: &mut dyn Store, key: &str, colony: &Colony) -> Result<()> {
    let records: Vec<CatRecord> = colony.iter().map(CatRecord::from_cat).collect();
    let data = serde_json::to_string(&records)?;
    store.set(key, &data)?;
    log::debug!("Saved {} cats under {key:?}", records.len());
    Ok(())
}

/// Rebuild cats saved under `key` into `colony`. Missing or unreadable data
/// loads nothing; a bad record is skipped without losing the rest.
pub fn load(store: &dyn Store, key: &str, colony: &mut Colony, rng: &mut fastrand::Rng) -> usize {
    let data = match store.get(key) {
        Ok(Some(data)) => data,
        Ok(None) => return 0,
        Err(e) => {
            log::warn!("Ignoring unreadable save under {key:?}: {e:#}");
            return 0;
        }
    };
    let values: Vec<serde_json::Value> = match serde_json::from_str(&data) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Ignoring malformed save under {key:?}: {e}");
            return 0;
        }
    };

    let mut loaded = 0;
    for (i, value) in values.into_iter().enumerate() {
        let record: CatRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping saved cat #{i}: {e}");
                continue;
            }
        };
        colony.restore(|id, default_name, area| {
            let mut cat = Cat::spawn(id, default_name, area, rng);
            record.apply(&mut cat);
            cat
        });
        loaded += 1;
    }
    loaded
}
