//! Configuration settings for the MCP specialist server.

use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub tools: ToolSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Transport the server speaks on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Newline-delimited JSON on stdin/stdout.
    #[default]
    Stdio,
    /// POST endpoint on an HTTP listener.
    Http,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdio" => Ok(TransportKind::Stdio),
            "http" => Ok(TransportKind::Http),
            _ => Err(format!(
                "Unknown transport: {}; expected 'stdio' or 'http'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Stdio => write!(f, "stdio"),
            TransportKind::Http => write!(f, "http"),
        }
    }
}

/// Transport and listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Transport selected by `run`.
    pub transport: TransportKind,
    /// Host the HTTP listener binds to.
    pub host: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Path of the single HTTP endpoint.
    pub endpoint_path: String,
    /// Additional Host/Origin names accepted on top of the loopback names.
    pub allowed_hosts: Vec<String>,
    /// Skip Host/Origin validation entirely.
    pub allow_any_host: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            transport: TransportKind::Stdio,
            host: "127.0.0.1".to_string(),
            port: 3333,
            endpoint_path: "/mcp".to_string(),
            allowed_hosts: Vec::new(),
            allow_any_host: false,
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    /// Whether the configured bind host is a loopback interface.
    pub fn is_loopback(&self) -> bool {
        is_loopback_host(&self.host)
    }
}

/// Returns true for `localhost` and any loopback IP literal.
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

/// Tool execution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolSettings {
    /// Upper bound on a single tool invocation, in seconds.
    pub call_timeout_secs: u64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            call_timeout_secs: 5,
        }
    }
}

impl ToolSettings {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

impl Settings {
    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.general.log_level.to_ascii_lowercase().as_str()) {
            return Err(ServerError::Config(format!(
                "general.log_level must be one of {}: {}",
                LEVELS.join(", "),
                self.general.log_level
            )));
        }
        if !self.server.endpoint_path.starts_with('/') {
            return Err(ServerError::Config(format!(
                "server.endpoint_path must start with '/': {}",
                self.server.endpoint_path
            )));
        }
        if self.tools.call_timeout_secs == 0 {
            return Err(ServerError::Config(
                "tools.call_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mcp-specialist")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_bind_loopback() {
        let settings = Settings::default();
        assert_eq!(settings.server.transport, TransportKind::Stdio);
        assert_eq!(settings.server.bind_addr(), "127.0.0.1:3333");
        assert!(settings.server.is_loopback());
        assert_eq!(settings.tools.call_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_transport_kind_parsing() {
        assert_eq!("stdio".parse::<TransportKind>(), Ok(TransportKind::Stdio));
        assert_eq!("HTTP".parse::<TransportKind>(), Ok(TransportKind::Http));
        let err = "websocket".parse::<TransportKind>().unwrap_err();
        assert!(err.contains("expected 'stdio' or 'http'"));
    }

    #[test]
    fn test_loopback_hosts() {
        assert!(is_loopback_host("localhost"));
        assert!(is_loopback_host("127.0.0.1"));
        assert!(is_loopback_host("[::1]"));
        assert!(!is_loopback_host("0.0.0.0"));
        assert!(!is_loopback_host("example.com"));
    }

    #[test]
    fn test_ipv6_bind_addr() {
        let server = ServerSettings {
            host: "::1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(server.bind_addr(), "[::1]:8080");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ntransport = \"http\"\nport = 4000").unwrap();

        let settings = Settings::load_from(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(settings.server.transport, TransportKind::Http);
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.tools.call_timeout_secs, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.tools.call_timeout_secs = 0;
        assert!(matches!(settings.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nlog_level = \"verbose\"").unwrap();

        let err = Settings::load_from(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("general.log_level"));

        let mut settings = Settings::default();
        settings.general.log_level = "WARN".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_keeps_transport_lowercase() {
        let mut settings = Settings::default();
        settings.server.transport = TransportKind::Http;
        let rendered = settings.to_toml().unwrap();
        assert!(rendered.contains("transport = \"http\""));
    }
}
