//! Environment loading for the application configuration.
//!
//! The loader accepts an injectable variable lookup so tests can supply
//! values without mutating the process environment.

use std::net::IpAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AccessKey, AppConfig, BotToken, ListenerConfig};

/// Required shared secret for the HTTP surface.
pub const ENV_ACCESS_KEY: &str = "ACCESS_KEY";
/// Optional credential enabling the auxiliary listener.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Optional comma-separated allow-list of listener identities.
pub const ENV_ALLOWED_USERS: &str = "ALLOWED_TELEGRAM_USERS";
/// Externally reachable application URL for listener replies.
pub const ENV_FRONTEND_URL: &str = "FRONTEND_URL";
/// Artifact directory override.
pub const ENV_DOWNLOADS_DIR: &str = "DOWNLOADS_DIR";
/// HTTP bind address override.
pub const ENV_BIND_ADDR: &str = "VORTEX_BIND_ADDR";
/// HTTP port override.
pub const ENV_HTTP_PORT: &str = "VORTEX_HTTP_PORT";

const DEFAULT_FRONTEND_URL: &str = "https://your-domain.com";
const DEFAULT_DOWNLOADS_DIR: &str = "downloads";
const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
const DEFAULT_HTTP_PORT: u16 = 8000;

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the required access key is absent or any variable
    /// holds an unusable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the required access key is absent or any variable
    /// holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let access_key = non_empty(lookup(ENV_ACCESS_KEY))
            .map(AccessKey::new)
            .ok_or(ConfigError::MissingVar {
                name: ENV_ACCESS_KEY,
            })?;

        let bind_addr = match non_empty(lookup(ENV_BIND_ADDR)) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                name: ENV_BIND_ADDR,
                value,
                reason: "not_an_ip_address",
            })?,
            None => DEFAULT_BIND_ADDR,
        };

        let http_port = match non_empty(lookup(ENV_HTTP_PORT)) {
            Some(value) => {
                let port: u16 = value.parse().map_err(|_| ConfigError::InvalidVar {
                    name: ENV_HTTP_PORT,
                    value: value.clone(),
                    reason: "not_a_port",
                })?;
                if port == 0 {
                    return Err(ConfigError::InvalidVar {
                        name: ENV_HTTP_PORT,
                        value,
                        reason: "zero",
                    });
                }
                port
            }
            None => DEFAULT_HTTP_PORT,
        };

        let downloads_dir = PathBuf::from(
            non_empty(lookup(ENV_DOWNLOADS_DIR))
                .unwrap_or_else(|| DEFAULT_DOWNLOADS_DIR.to_string()),
        );
        let public_app_url = non_empty(lookup(ENV_FRONTEND_URL))
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        let listener = non_empty(lookup(ENV_BOT_TOKEN)).map(|token| ListenerConfig {
            bot_token: BotToken::new(token),
            allowed_user_ids: parse_allowed_users(
                lookup(ENV_ALLOWED_USERS).as_deref().unwrap_or_default(),
            ),
        });

        Ok(Self {
            access_key,
            bind_addr,
            http_port,
            downloads_dir,
            public_app_url,
            listener,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse the comma-separated identity allow-list.
///
/// A malformed entry invalidates the whole list: the error is logged and the
/// listener falls back to allowing all identities.
fn parse_allowed_users(raw: &str) -> Vec<i64> {
    let mut ids = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        match entry.parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                warn!(entry = %entry, "invalid allow-list entry; allowing all users");
                return Vec::new();
            }
        }
    }
    ids
}
