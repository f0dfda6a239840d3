use serde::Deserialize;
use std::path::PathBuf;

use crate::catalog::CatalogPaths;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the course, user and similarity JSON documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_courses_file")]
    pub courses_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_similarities_file")]
    pub similarities_file: String,

    /// Default time-to-live for memoized recommendation results
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// How often expired cache entries are swept
    #[serde(default = "default_cache_cleanup_interval_secs")]
    pub cache_cleanup_interval_secs: u64,

    /// Fixed seed for the fallback course picker; entropy-seeded when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Largest `limit` accepted by the HTTP API
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_courses_file() -> String {
    "courses.json".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_similarities_file() -> String {
    "course_similarities.json".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_cache_cleanup_interval_secs() -> u64 {
    600
}

fn default_max_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            courses_file: default_courses_file(),
            users_file: default_users_file(),
            similarities_file: default_similarities_file(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_cleanup_interval_secs: default_cache_cleanup_interval_secs(),
            rng_seed: None,
            max_limit: default_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolves the three catalog documents against the data directory
    pub fn catalog_paths(&self) -> CatalogPaths {
        CatalogPaths {
            courses: self.data_dir.join(&self.courses_file),
            users: self.data_dir.join(&self.users_file),
            similarities: self.data_dir.join(&self.similarities_file),
        }
    }
}
