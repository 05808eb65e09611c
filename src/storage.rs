use crate::config::ConfigMap;
use crate::errors::AppError;
use crate::models::History;
use chrono::Local;
use serde::de::DeserializeOwned;
use std::{env, ffi::OsString, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub fn resolve_data_path() -> PathBuf {
    env_path("APP_DATA_PATH", "data/history.json")
}

pub fn resolve_config_path() -> PathBuf {
    env_path("APP_CONFIG_PATH", "data/config.json")
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

// An unparseable history file is renamed aside before starting empty.
pub async fn load_history(path: &Path) -> Result<History, std::io::Error> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(History::default()),
        Err(err) => return Err(err),
    };

    let history = match serde_json::from_slice::<History>(&bytes) {
        Ok(history) => history,
        Err(err) => {
            let backup = with_suffix(
                path,
                &format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S%f")),
            );
            fs::rename(path, &backup).await?;
            warn!(
                "failed to parse history file {}: {err}; moved it to {}",
                path.display(),
                backup.display()
            );
            History::default()
        }
    };
    info!(rows = history.rows.len(), "loaded history from {}", path.display());
    Ok(history)
}

pub async fn load_config(path: &Path) -> ConfigMap {
    load_json(path, "config").await
}

async fn load_json<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse {what} file {}: {err}", path.display());
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read {what} file {}: {err}", path.display());
            T::default()
        }
    }
}

pub async fn persist_history(path: &Path, history: &History) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(history)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let tmp = with_suffix(path, ".tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
