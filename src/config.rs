//! Client configuration.
//!
//! A [`ClientConfig`] can be built in code or loaded from TOML:
//!
//! ```toml
//! server = "irc.example.net"
//! port = 6667
//! nickname = "slircbot"
//! channels = ["#rust"]
//! strategy = "threaded"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{ClientError, Result};

const DEFAULT_PORT: u16 = 6667;
const DEFAULT_REALNAME: &str = "slirc-client";
const DEFAULT_CONNECT_TIMEOUT: f64 = 30.0;
const DEFAULT_POLL_INTERVAL: f64 = 0.1;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How lines travel between the socket and the message processor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Socket I/O and dispatch share one thread.
    #[default]
    Direct,
    /// Socket I/O runs on its own thread behind two queues.
    Threaded,
}

/// Connection and identity settings for one client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Server host name or address.
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname requested at registration.
    pub nickname: String,
    /// Username (ident). Falls back to the nickname.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Server password sent with PASS, if any.
    #[serde(default)]
    pub password: Option<String>,
    /// Channels an application may join after registration.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Seconds allowed for the TCP connect.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: f64,
    /// Seconds between queue drains of the threaded strategy.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: f64,
    #[serde(default)]
    pub strategy: Strategy,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_realname() -> String {
    DEFAULT_REALNAME.to_string()
}

fn default_connect_timeout() -> f64 {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_poll_interval() -> f64 {
    DEFAULT_POLL_INTERVAL
}

impl ClientConfig {
    /// A configuration with defaults for everything but server and nick.
    pub fn new(server: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_PORT,
            nickname: nickname.into(),
            username: None,
            realname: default_realname(),
            password: None,
            channels: Vec::new(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL,
            strategy: Strategy::Direct,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject values no connection can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(invalid("server must not be empty"));
        }
        if self.nickname.is_empty() || self.nickname.contains(char::is_whitespace) {
            return Err(invalid(format!("invalid nickname {:?}", self.nickname)));
        }
        if self.username().contains(char::is_whitespace) {
            return Err(invalid(format!("invalid username {:?}", self.username())));
        }
        if !(self.connect_timeout_secs.is_finite() && self.connect_timeout_secs > 0.0) {
            return Err(invalid(format!(
                "connect timeout must be positive, got {}",
                self.connect_timeout_secs
            )));
        }
        if !(self.poll_interval_secs.is_finite() && self.poll_interval_secs > 0.0) {
            return Err(invalid(format!(
                "poll interval must be positive, got {}",
                self.poll_interval_secs
            )));
        }
        Ok(())
    }

    /// `host:port` to dial.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nickname)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.connect_timeout_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_CONNECT_TIMEOUT))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.poll_interval_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_POLL_INTERVAL))
    }
}

fn invalid(reason: impl Into<String>) -> ClientError {
    ClientError::InvalidArgument(reason.into())
}
