//! Last-used configuration, kept as JSON between runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use dough_core::RecipeConfiguration;
use tracing::{debug, warn};

/// File stem of the stored state; bump the suffix when the layout changes.
pub const STATE_NAMESPACE: &str = "dough_v2_state";

/// Default location: `<platform data dir>/dough_v2_state.json`.
pub fn default_state_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dough")
        .map(|dirs| dirs.data_dir().join(format!("{STATE_NAMESPACE}.json")))
}

/// Reads the stored configuration.
///
/// A missing, unreadable or malformed file yields the defaults; partial
/// files are merged over them.
pub fn load(path: &Path) -> RecipeConfiguration {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no stored state, using defaults");
            return RecipeConfiguration::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read stored state, using defaults");
            return RecipeConfiguration::default();
        }
    };
    match serde_json::from_str(&txt) {
        Ok(cfg) => {
            debug!(path = %path.display(), "loaded stored state");
            cfg
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "stored state does not match, using defaults");
            RecipeConfiguration::default()
        }
    }
}

pub fn save(path: &Path, cfg: &RecipeConfiguration) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create state directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(cfg).context("failed to serialize state")?;
    fs::write(path, json).with_context(|| format!("failed to write state {}", path.display()))?;
    debug!(path = %path.display(), "saved state");
    Ok(())
}
