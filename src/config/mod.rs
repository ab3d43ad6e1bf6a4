use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::normalizer::DEFAULT_EXPENSE_NAME;
use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::TrackerError;

pub const DEFAULT_STORAGE_KEY: &str = "controlPersonalData";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key the budget document is stored under.
    pub storage_key: String,
    pub currency_symbol: String,
    /// Name given to expenses saved without one.
    pub unnamed_expense_label: String,
    pub ui_color_enabled: bool,
    /// Overrides `<base>/store` as the location of the JSON store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            currency_symbol: "$".into(),
            unnamed_expense_label: DEFAULT_EXPENSE_NAME.into(),
            ui_color_enabled: true,
            data_dir: None,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TrackerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Reads the config file; a missing file yields defaults.
    pub fn load(&self) -> Result<Config, TrackerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory for the JSON store: `data_dir` when set, else `<base>/store`.
    pub fn store_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::store_dir_in(&self.base))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), TrackerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
