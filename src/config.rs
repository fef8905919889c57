//! Runtime configuration.
//!
//! The binary parses command-line arguments and environment variables with
//! clap; this module holds the validated result.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::view::OverviewOptions;

/// Endpoint of the metrics producer.
pub const DEFAULT_URL: &str = "ws://localhost:8000/ws";
pub const DEFAULT_COLUMNS: u16 = 3;
pub const DEFAULT_TICK_MS: u64 = 250;
pub const DEFAULT_DEMO_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint must start with ws:// or wss://, got '{0}'")]
    InvalidEndpoint(String),
    #[error("grid needs at least one column")]
    NoColumns,
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("unknown reconnect policy '{0}' (expected 'freeze' or 'backoff')")]
    UnknownReconnect(String),
}

/// What happens after the connection closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconnectPolicy {
    /// Keep the last state on screen and stop updating.
    #[default]
    Freeze,
    /// Reconnect with bounded exponential backoff.
    Backoff,
}

impl FromStr for ReconnectPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freeze" => Ok(ReconnectPolicy::Freeze),
            "backoff" => Ok(ReconnectPolicy::Backoff),
            other => Err(ConfigError::UnknownReconnect(other.to_string())),
        }
    }
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    WebSocket { url: String },
    Demo { interval: Duration },
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceKind,
    pub columns: u16,
    pub core_bars: bool,
    pub reconnect: ReconnectPolicy,
    pub tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::WebSocket {
                url: DEFAULT_URL.to_string(),
            },
            columns: DEFAULT_COLUMNS,
            core_bars: false,
            reconnect: ReconnectPolicy::Freeze,
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl Config {
    /// Builds a config for the network source.
    pub fn websocket(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let lower = url.to_ascii_lowercase();
        if !(lower.starts_with("ws://") || lower.starts_with("wss://")) {
            return Err(ConfigError::InvalidEndpoint(url));
        }
        Ok(Self {
            source: SourceKind::WebSocket { url },
            ..Self::default()
        })
    }

    /// Builds a config for the local demo source.
    pub fn demo(interval_ms: u64) -> Result<Self, ConfigError> {
        if interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("demo interval"));
        }
        Ok(Self {
            source: SourceKind::Demo {
                interval: Duration::from_millis(interval_ms),
            },
            ..Self::default()
        })
    }

    pub fn with_columns(mut self, columns: u16) -> Result<Self, ConfigError> {
        if columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        self.columns = columns;
        Ok(self)
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Result<Self, ConfigError> {
        if tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick"));
        }
        self.tick_rate = Duration::from_millis(tick_ms);
        Ok(self)
    }

    pub fn with_core_bars(mut self, enabled: bool) -> Self {
        self.core_bars = enabled;
        self
    }

    pub fn with_reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    pub fn overview_options(&self) -> OverviewOptions {
        OverviewOptions {
            core_bars: self.core_bars,
        }
    }

    /// Endpoint shown in logs and in the header.
    pub fn endpoint(&self) -> String {
        match &self.source {
            SourceKind::WebSocket { url } => url.clone(),
            SourceKind::Demo { interval } => format!("demo ({}ms)", interval.as_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_producer() {
        let config = Config::default();
        assert_eq!(
            config.source,
            SourceKind::WebSocket {
                url: "ws://localhost:8000/ws".into()
            }
        );
        assert_eq!(config.columns, 3);
        assert_eq!(config.reconnect, ReconnectPolicy::Freeze);
    }

    #[test]
    fn test_websocket_requires_ws_scheme() {
        assert!(Config::websocket("wss://example.org/ws").is_ok());
        assert!(Config::websocket("WS://HOST:1/ws").is_ok());
        assert_eq!(
            Config::websocket("http://host/ws"),
            Err(ConfigError::InvalidEndpoint("http://host/ws".into()))
        );
    }

    #[test]
    fn test_secure_endpoint_keeps_scheme() {
        let config = Config::websocket("wss://metrics.example.org/ws").unwrap();
        assert_eq!(config.endpoint(), "wss://metrics.example.org/ws");
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            Config::default().with_columns(0),
            Err(ConfigError::NoColumns)
        );
        assert!(Config::default().with_tick_ms(0).is_err());
        assert!(Config::demo(0).is_err());
    }

    #[test]
    fn test_reconnect_policy_parse() {
        assert_eq!("freeze".parse::<ReconnectPolicy>(), Ok(ReconnectPolicy::Freeze));
        assert_eq!(" Backoff ".parse::<ReconnectPolicy>(), Ok(ReconnectPolicy::Backoff));
        assert!("retry".parse::<ReconnectPolicy>().is_err());
    }

    #[test]
    fn test_demo_endpoint_description() {
        let config = Config::demo(500).unwrap();
        assert_eq!(config.endpoint(), "demo (500ms)");
    }
}
