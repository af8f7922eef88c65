// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub cache: CacheConfig,
    pub compress: CompressConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Document root; everything served lives under this directory.
    pub root: String,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// Cache policy configuration
///
/// Files whose extension is in `extensions` carry `Expires` and
/// `Cache-Control: max-age` headers on every response.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Freshness lifetime in seconds
    pub max_age: u32,
    pub extensions: Vec<String>,
}

/// Transit compression configuration
///
/// Files whose extension is in `extensions` are eligible for gzip/deflate
/// when the client advertises support.
#[derive(Debug, Deserialize, Clone)]
pub struct CompressConfig {
    pub extensions: Vec<String>,
}
