//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), SESSION_KEY (at least 64
//! bytes; random per process when unset), SECURE_COOKIES (default false),
//! AUTO_COMPLETE (default true).

use actix_web::cookie::Key;

/// Minimum session key length accepted by the cookie signer.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Master key the cookie key is derived from; None means generate one at startup.
    pub session_key: Option<Vec<u8>>,
    pub secure_cookies: bool,
    /// Close the tournament as soon as its final is decided.
    pub auto_complete: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_key: None,
            secure_cookies: false,
            auto_complete: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let session_key = lookup("SESSION_KEY").and_then(|k| {
            if k.len() >= MIN_SESSION_KEY_LEN {
                Some(k.into_bytes())
            } else {
                log::warn!(
                    "SESSION_KEY shorter than {} bytes, ignoring it",
                    MIN_SESSION_KEY_LEN
                );
                None
            }
        });
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            session_key,
            secure_cookies: lookup("SECURE_COOKIES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.secure_cookies),
            auto_complete: lookup("AUTO_COMPLETE")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.auto_complete),
        }
    }

    /// Cookie key from SESSION_KEY, or a fresh random one (sessions then
    /// do not survive a restart).
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(bytes) => Key::derive_from(bytes),
            None => {
                log::warn!("No SESSION_KEY set, generating a random session key");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]);
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.port, 8080);
        assert!(c.session_key.is_none());
        assert!(!c.secure_cookies);
        assert!(c.auto_complete);
    }

    #[test]
    fn reads_overrides() {
        let key = "k".repeat(64);
        let c = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("SESSION_KEY", key.as_str()),
            ("SECURE_COOKIES", "yes"),
            ("AUTO_COMPLETE", "off"),
        ]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 9000);
        assert_eq!(c.session_key.as_deref(), Some(key.as_bytes()));
        assert!(c.secure_cookies);
        assert!(!c.auto_complete);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[("PORT", "eighty"), ("SESSION_KEY", "short"), ("AUTO_COMPLETE", "maybe")]);
        assert_eq!(c.port, 8080);
        assert!(c.session_key.is_none());
        assert!(c.auto_complete);
    }
}
