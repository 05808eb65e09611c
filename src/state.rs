use crate::config::ConfigMap;
use crate::models::History;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub config: Arc<ConfigMap>,
    pub history: Arc<Mutex<History>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, config: ConfigMap, history: History) -> Self {
        Self {
            data_path,
            config: Arc::new(config),
            history: Arc::new(Mutex::new(history)),
        }
    }
}
