use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which key-value driver backs the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDriver {
    /// Single-file embedded redb database
    Redb,
    /// One JSON file per storage key
    FileSystem,
    /// Process memory only (lost on restart)
    Memory,
}

impl FromStr for StorageDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(StorageDriver::Redb),
            "fs" | "file" => Ok(StorageDriver::FileSystem),
            "memory" => Ok(StorageDriver::Memory),
            other => Err(format!("Invalid STORAGE_DRIVER: {}", other)),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage_driver: StorageDriver,
    pub data_path: PathBuf,
    pub allowed_origins: Vec<String>,
    /// Upper bound on a single repository task; `None` waits forever
    pub task_timeout: Option<Duration>,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let storage_driver = env::var("STORAGE_DRIVER")
            .unwrap_or_else(|_| "redb".to_string())
            .parse()?;

        let data_path = PathBuf::from(env::var("DATA_PATH").unwrap_or_else(|_| "./data".to_string()));

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let task_timeout_secs: u64 = env::var("TASK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| "Invalid TASK_TIMEOUT_SECS")?;
        let task_timeout = (task_timeout_secs > 0).then(|| Duration::from_secs(task_timeout_secs));

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            storage_driver,
            data_path,
            allowed_origins,
            task_timeout,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
