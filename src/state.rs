use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::store::file::FileStore;

#[derive(Clone)]
pub struct AppState {
    /// Primary backend; `None` means the JSON file backend serves everything.
    pub db: Option<DbPool>,
    pub files: FileStore,
    pub http: reqwest::Client,
    pub config: Arc<AppConfig>,
    /// Held for the duration of a sync pull so overlapping pulls cannot race.
    pub sync_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Option<DbPool>) -> anyhow::Result<Self> {
        let files = FileStore::new(&config.data_dir);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            db,
            files,
            http,
            config: Arc::new(config),
            sync_gate: Arc::new(Mutex::new(())),
        })
    }
}
