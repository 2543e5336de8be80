//! Typed configuration models and secret newtypes.
//!
//! # Design
//! - Secrets live in newtypes whose `Debug` output is redacted so they never
//!   leak through logs or error context.
//! - Credential verification is constant-time; the comparison must not
//!   short-circuit on the first differing byte.

use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use subtle::ConstantTimeEq;

/// Process-wide shared secret that gates the HTTP surface.
///
/// Immutable after startup; passed explicitly to the components that verify
/// presented credentials.
#[derive(Clone)]
pub struct AccessKey(String);

impl AccessKey {
    /// Wrap a plaintext secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Compare a presented credential against the configured secret.
    ///
    /// Uses a constant-time equality check over the raw bytes; only exact
    /// matches are accepted.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKey(<redacted>)")
    }
}

/// Credential for the auxiliary messaging listener.
#[derive(Clone)]
pub struct BotToken(String);

impl BotToken {
    /// Wrap a plaintext bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Access the raw token for transport URL construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(<redacted>)")
    }
}

/// Auxiliary listener section, present only when the bot credential is set.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Messaging platform credential.
    pub bot_token: BotToken,
    /// Identities permitted to interact with the listener; empty allows all.
    pub allowed_user_ids: Vec<i64>,
}

/// Fully-resolved application configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret guarding job submission and artifact retrieval.
    pub access_key: AccessKey,
    /// Address the HTTP listener binds to.
    pub bind_addr: IpAddr,
    /// Port the HTTP listener binds to.
    pub http_port: u16,
    /// Directory that receives and serves fetched artifacts.
    pub downloads_dir: PathBuf,
    /// Externally reachable application URL used in listener replies.
    pub public_app_url: String,
    /// Auxiliary listener configuration; `None` disables the listener.
    pub listener: Option<ListenerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_key_accepts_exact_match_only() {
        let key = AccessKey::new("super-secret");
        assert!(key.verify("super-secret"));
        assert!(!key.verify("super-secreT"));
        assert!(!key.verify("super-secre"));
        assert!(!key.verify(""));
    }

    #[test]
    fn access_key_rejects_equal_length_near_match() {
        let key = AccessKey::new("abcdefgh");
        assert!(!key.verify("abcdefgx"));
        assert!(!key.verify("xbcdefgh"));
    }

    #[test]
    fn secret_debug_output_is_redacted() {
        let key = AccessKey::new("super-secret");
        let token = BotToken::new("123456:bot-token");
        assert_eq!(format!("{key:?}"), "AccessKey(<redacted>)");
        assert_eq!(format!("{token:?}"), "BotToken(<redacted>)");
    }
}
