// ⚙️ Server Configuration - Read from the environment

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "RECEIPT_POINTS_ADDR";
pub const CORS_VAR: &str = "RECEIPT_POINTS_CORS";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// Allow cross-origin requests from any origin
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            permissive_cors: true,
        }
    }
}

impl ServerConfig {
    /// Load from `RECEIPT_POINTS_ADDR` / `RECEIPT_POINTS_CORS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{ADDR_VAR} is not a socket address: {raw_addr:?}"))?;

        let permissive_cors = match lookup(CORS_VAR) {
            None => true,
            Some(raw) => parse_flag(&raw).with_context(|| format!("Invalid {CORS_VAR}"))?,
        };

        Ok(ServerConfig {
            bind_addr,
            permissive_cors,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected true/false, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ADDR_VAR, "127.0.0.1:3000"),
            (CORS_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert!(!config.permissive_cors);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(ServerConfig::from_lookup(lookup_from(&[(ADDR_VAR, "localhost")])).is_err());
        assert!(ServerConfig::from_lookup(lookup_from(&[(CORS_VAR, "maybe")])).is_err());
    }
}
