use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tier::{Tier, TierParams};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub default_duration_secs: u64,
    pub tiers: Vec<TierOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_secs: 60,
            tiers: Vec::new(),
        }
    }
}

/// Partial retune of one built-in tier. Absent fields keep the built-in
/// numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierOverride {
    pub tier: Tier,
    pub x_range: Option<f32>,
    pub y_range: Option<f32>,
    pub z_range: Option<f32>,
    pub scale: Option<f32>,
    pub blurb: Option<String>,
}

impl Config {
    /// Built-in parameters for `tier`, with any file override applied.
    pub fn params_for(&self, tier: Tier) -> TierParams {
        let mut params = tier.params();
        if let Some(over) = self.tiers.iter().find(|o| o.tier == tier) {
            if let Some(x_range) = over.x_range {
                params.x_range = x_range;
            }
            if let Some(y_range) = over.y_range {
                params.y_range = y_range;
            }
            if let Some(z_range) = over.z_range {
                params.z_range = z_range;
            }
            if let Some(scale) = over.scale {
                params.scale = scale;
            }
            if let Some(blurb) = &over.blurb {
                params.blurb = blurb.clone();
            }
        }
        params
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "plink") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("plink_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_tier_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            default_duration_secs: 90,
            tiers: vec![TierOverride {
                tier: Tier::Hard,
                x_range: Some(10.0),
                y_range: None,
                z_range: None,
                scale: Some(0.5),
                blurb: Some("now actually harder".into()),
            }],
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_files_load_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{not json").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn overrides_patch_only_their_fields() {
        let cfg = Config {
            default_duration_secs: 60,
            tiers: vec![TierOverride {
                tier: Tier::Hard,
                x_range: None,
                y_range: None,
                z_range: Some(5.0),
                scale: Some(0.5),
                blurb: None,
            }],
        };

        let hard = cfg.params_for(Tier::Hard);
        assert_eq!(hard.z_range, 5.0);
        assert_eq!(hard.scale, 0.5);
        assert_eq!(hard.x_range, Tier::Hard.params().x_range);
        assert_eq!(hard.blurb, Tier::Hard.params().blurb);

        // Untouched tiers fall through to the built-in table.
        assert_eq!(cfg.params_for(Tier::Easy), Tier::Easy.params());
    }
}
