//! Configuration module for the school content backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the admin API (required in production)
    pub admin_token: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Directory where uploaded files are stored
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_token = env::var("HCCS_ADMIN_TOKEN").ok();

        let db_path = env::var("HCCS_DB_PATH")
            .unwrap_or_else(|_| "./data/school.sqlite".to_string())
            .into();

        let index_path = env::var("HCCS_INDEX_PATH")
            .unwrap_or_else(|_| "./data/index".to_string())
            .into();

        let upload_dir = env::var("HCCS_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("HCCS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid HCCS_BIND_ADDR format");

        let log_level = env::var("HCCS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_token,
            db_path,
            index_path,
            upload_dir,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("HCCS_ADMIN_TOKEN");
        env::remove_var("HCCS_DB_PATH");
        env::remove_var("HCCS_INDEX_PATH");
        env::remove_var("HCCS_UPLOAD_DIR");
        env::remove_var("HCCS_BIND_ADDR");
        env::remove_var("HCCS_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.admin_token.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/school.sqlite"));
        assert_eq!(config.index_path, PathBuf::from("./data/index"));
        assert_eq!(config.upload_dir, PathBuf::from("./data/uploads"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
