use std::env;
use std::path::PathBuf;

/// Remote sync server settings; the whole feature is off when unset.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub server_url: String,
    pub secret: String,
    pub interval_secs: u64,
}

/// Frontend revalidation endpoint settings; invalidation is skipped when unset.
#[derive(Debug, Clone)]
pub struct RevalidateConfig {
    pub base_url: String,
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Optional: without it (or with the database unreachable) the service
    /// degrades to the JSON file backend.
    pub database_url: Option<String>,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub payment_secret: Option<String>,
    pub sync: Option<SyncConfig>,
    pub revalidate: Option<RevalidateConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let database_url = env::var("DATABASE_URL").ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let jwt_secret = env::var("JWT_SECRET")?;
        let payment_secret = env::var("PAYMENT_KEY_SECRET").ok();

        let sync = match env::var("SYNC_SERVER_URL") {
            Ok(server_url) => Some(SyncConfig {
                server_url,
                secret: env::var("SYNC_SECRET")?,
                interval_secs: env::var("SYNC_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(300),
            }),
            Err(_) => None,
        };

        let revalidate = match env::var("REVALIDATE_URL") {
            Ok(base_url) => Some(RevalidateConfig {
                base_url,
                secret: env::var("REVALIDATE_SECRET")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            data_dir,
            jwt_secret,
            payment_secret,
            sync,
            revalidate,
        })
    }
}
