use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::http::HttpVersion;

static CONFIG: OnceCell<ServerConfig> = OnceCell::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub buffer_size: usize,

    pub http_version: HttpVersion,
    pub max_path_size: usize,
    pub max_header_size: usize,
    pub max_body_size: usize,

    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    #[serde(deserialize_with = "deserialize_duration")]
    pub write_timeout: Duration,

    pub server_name: String,

    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            buffer_size: 4096,

            http_version: HttpVersion::V1_1,
            max_path_size: 1024,
            max_header_size: 8192,
            max_body_size: 1024 * 1024, // 1 MB

            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),

            server_name: "mirrornet/0.1".to_string(),

            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from `path` when it exists; a missing file is
    /// the normal case and yields the defaults.
    pub fn load(path: &str) -> Self {
        if !std::path::Path::new(path).exists() {
            return ServerConfig::default();
        }
        ServerConfig::from_file(path)
    }

    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Fail to read {}: {err}", path);
                eprintln!("Fall back to default config");
                return ServerConfig::default();
            }
        };

        match toml::from_str::<ServerConfig>(content.as_str()) {
            Ok(server_config) => server_config,
            Err(err) => {
                eprintln!("Fail to deserialize config file {}: {err}", path);
                eprintln!("Fall back to default config");
                ServerConfig::default()
            }
        }
    }
}

pub fn set_config(cfg: ServerConfig) {
    CONFIG.set(cfg).expect("Config already set");
}

pub fn config() -> &'static ServerConfig {
    CONFIG.get().expect("Config not initialized")
}

/// Initializes the process-wide config for tests: loopback address and an
/// ephemeral port, defaults otherwise. First caller wins, later calls get
/// the already-initialized value.
#[cfg(test)]
pub fn init_test_config() -> &'static ServerConfig {
    CONFIG.get_or_init(|| ServerConfig {
        address: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
        port: 0,
        ..ServerConfig::default()
    })
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.address, IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(cfg.http_version, HttpVersion::V1_1);
        assert_eq!(cfg.max_body_size, 1024 * 1024);
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml_str = r#"
            address = "127.0.0.1"
            port = 9090
            read_timeout = 2.5
            server_name = "mirrornet-test"
            log_level = "debug"
        "#;

        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.address, IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.read_timeout, Duration::from_secs_f64(2.5));
        assert_eq!(cfg.server_name, "mirrornet-test");
        assert_eq!(cfg.log_level, "debug");

        // Untouched fields keep their defaults
        assert_eq!(cfg.buffer_size, 4096);
        assert_eq!(cfg.max_header_size, 8192);
    }
}
