use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const HOME_ENV: &str = "BUDGET_TRACKER_HOME";
const STORE_DIR: &str = "store";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves where the tracker keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// `$BUDGET_TRACKER_HOME`, falling back to `~/.budget_tracker`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Directory holding one JSON file per storage key.
    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
