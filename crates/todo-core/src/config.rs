//! Process configuration.
//!
//! Built once at startup from the environment and passed explicitly into
//! each component constructor — no component reads the environment on its
//! own.

use std::path::PathBuf;

/// Environment variable for the REST listen port.
pub const ENV_HTTP_PORT: &str = "HTTP_PORT";
/// Environment variable for the gRPC listen port.
pub const ENV_GRPC_PORT: &str = "GRPC_PORT";
/// Environment variable for the persistent data directory.
pub const ENV_DATA_DIR: &str = "DATA_DIR";

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port the REST API listens on.
    pub http_port: u16,
    /// Port the gRPC server listens on.
    pub grpc_port: u16,
    /// Directory holding the database file.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            grpc_port: 50051,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Config {
    /// Load configuration from the process environment, falling back to
    /// defaults for unset or unparseable variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http_port: lookup(ENV_HTTP_PORT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_port),
            grpc_port: lookup(ENV_GRPC_PORT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.grpc_port),
            data_dir: lookup(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }
}
