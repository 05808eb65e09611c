pub mod app;
pub mod columns;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod numeric;
pub mod report;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::ConfigMap;
pub use models::{CellValue, History, Record, Report, ReportEntry};
pub use state::AppState;
pub use stats::compute;
pub use storage::{load_config, load_history, resolve_config_path, resolve_data_path};
