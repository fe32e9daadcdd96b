use crate::config::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_HOST: &str = "::";
pub const DEFAULT_PATH: &str = "/";
pub const DEFAULT_KEY: &str = "peerjs";

/// PEM files for the HTTPS listener. Only used when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub key: Option<PathBuf>,
    #[serde(default)]
    pub cert: Option<PathBuf>,
}

impl TlsConfig {
    pub fn new(key: impl Into<PathBuf>, cert: impl Into<PathBuf>) -> Self {
        Self {
            key: Some(key.into()),
            cert: Some(cert.into()),
        }
    }

    /// `(key, cert)` when the pair is complete.
    pub fn pair(&self) -> Option<(&Path, &Path)> {
        match (&self.key, &self.cert) {
            (Some(key), Some(cert)) => Some((key.as_path(), cert.as_path())),
            _ => None,
        }
    }
}

/// Effective server configuration, handed to the relay on mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Prefix the presence router and the relay are mounted under.
    pub path: String,
    /// Relay API key, passed through untouched.
    pub key: String,
    /// Running behind a reverse proxy: trust `X-Forwarded-*` headers.
    #[serde(deserialize_with = "deserialize_proxied")]
    pub proxied: bool,
    pub ssl: Option<TlsConfig>,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Relay specific options the presence layer never interprets.
    pub relay: Map<String, Value>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_owned(),
            path: DEFAULT_PATH.to_owned(),
            key: DEFAULT_KEY.to_owned(),
            proxied: false,
            ssl: None,
            cors_origins: Vec::new(),
            relay: Map::new(),
        }
    }
}

impl ServerConfig {
    /// Overlay `options` on top of `self`. Set options win, relay keys are merged one by one.
    pub fn merged(mut self, options: ServerOptions) -> Self {
        if let Some(port) = options.port {
            self.port = port;
        }
        if let Some(host) = options.host {
            self.host = host;
        }
        if let Some(path) = options.path {
            self.path = path;
        }
        if let Some(key) = options.key {
            self.key = key;
        }
        if let Some(proxied) = options.proxied {
            self.proxied = proxied;
        }
        if let Some(ssl) = options.ssl {
            self.ssl = Some(ssl);
        }
        if let Some(origins) = options.cors_origins {
            self.cors_origins = origins;
        }
        if let Some(relay) = options.relay {
            self.relay.extend(relay);
        }
        self
    }

    /// Remove a complete TLS pair from the config, leaving partial pairs in place.
    ///
    /// The listener owns the credentials once it has consumed them, so the
    /// relay sees a config without `ssl`.
    pub fn take_tls(&mut self) -> Option<(PathBuf, PathBuf)> {
        let ssl = self.ssl.as_ref()?;
        let (key, cert) = ssl.pair()?;
        let pair = (key.to_path_buf(), cert.to_path_buf());
        self.ssl = None;
        Some(pair)
    }

    /// Normalized mount prefix, `None` for the root.
    pub fn mount_path(&self) -> Option<String> {
        let trimmed = self.path.trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("/{trimmed}"))
        }
    }
}

/// User supplied overrides. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerOptions {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub path: Option<String>,
    pub key: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_proxied")]
    pub proxied: Option<bool>,
    pub ssl: Option<TlsConfig>,
    pub cors_origins: Option<Vec<String>>,
    pub relay: Option<Map<String, Value>>,
}

impl ServerOptions {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn overlay(self, other: ServerOptions) -> Self {
        Self {
            port: other.port.or(self.port),
            host: other.host.or(self.host),
            path: other.path.or(self.path),
            key: other.key.or(self.key),
            proxied: other.proxied.or(self.proxied),
            ssl: other.ssl.or(self.ssl),
            cors_origins: other.cors_origins.or(self.cors_origins),
            relay: match (self.relay, other.relay) {
                (Some(mut base), Some(extra)) => {
                    base.extend(extra);
                    Some(base)
                }
                (base, extra) => extra.or(base),
            },
        }
    }
}

/// `proxied` is accepted as a bool or as a string, where `"false"` is false
/// and any other non-empty string is true.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProxiedFlag {
    Flag(bool),
    Text(String),
}

impl From<ProxiedFlag> for bool {
    fn from(flag: ProxiedFlag) -> Self {
        match flag {
            ProxiedFlag::Flag(b) => b,
            ProxiedFlag::Text(s) => !s.is_empty() && s != "false",
        }
    }
}

fn deserialize_proxied<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    ProxiedFlag::deserialize(deserializer).map(bool::from)
}

fn deserialize_optional_proxied<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ProxiedFlag>::deserialize(deserializer).map(|flag| flag.map(bool::from))
}
