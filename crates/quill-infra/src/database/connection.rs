use std::path::Path;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/quill.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

/// Open the storage connection.
///
/// Called once during startup; the resulting handle is injected into the
/// repository and shared for the lifetime of the process. SQLite's own
/// locking serializes concurrent writers, so no application-level lock
/// sits on top of this.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    ensure_parent_dir(&config.url)?;

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts).await?;
    tracing::info!(
        "Database connected (pool: {})",
        config.max_connections
    );

    Ok(db)
}

/// Create the directory holding a file-backed SQLite database, so that
/// `mode=rwc` can create the file itself on first run.
fn ensure_parent_dir(url: &str) -> Result<(), DbErr> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }

    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .map_err(|e| DbErr::Custom(format!("failed to create {}: {}", dir.display(), e)))?;
        }
    }
    Ok(())
}
