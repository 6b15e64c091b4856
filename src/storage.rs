use dirs::data_local_dir;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;
use crate::model::AppState;

pub const TASKS_FILE: &str = "tasks.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const STATE_FILE: &str = "state.json";

/// `~/.local/share/taskflow` on Linux, `~/Library/Application Support/taskflow` on macOS.
pub fn default_data_dir() -> PathBuf {
    let mut base = data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("taskflow");
    base
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

pub fn state_path(dir: &Path) -> PathBuf {
    dir.join(STATE_FILE)
}

/// Missing state falls back to defaults; unreadable state is an error.
pub fn load_state(path: &Path) -> Result<AppState> {
    if !path.exists() {
        return Ok(AppState::default());
    }
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_state(path: &Path, state: &AppState) -> Result<()> {
    write_json(path, state)
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArchiveGroup, StatusFilter};

    #[test]
    fn missing_state_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = load_state(&state_path(dir.path())).expect("load");
        assert!(state.config.color);
        assert_eq!(state.config.default_status, StatusFilter::All);
        assert_eq!(state.config.archive_group, ArchiveGroup::Date);
    }

    #[test]
    fn partial_state_fills_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = state_path(dir.path());
        fs::write(&path, r#"{ "config": { "default_status": "pending" } }"#).expect("write");

        let state = load_state(&path).expect("load");
        assert_eq!(state.config.default_status, StatusFilter::Pending);
        assert!(state.config.color);
    }
}
