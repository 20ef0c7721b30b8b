// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and the startup
//! configuration loaded from them. A missing or malformed value is a startup
//! error, never a per-request one.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `ENS_RPC_URL` | RPC endpoint for the target network | Arbitrum Sepolia public RPC |
//! | `ENS_OWNER_PRIVATE_KEY` | Hex private key of the parent-domain owner | Required |
//! | `ENS_REGISTRY_ADDRESS` | ENS registry contract address | Sepolia registry |
//! | `ENS_RESOLVER_ADDRESS` | Public resolver contract address | Sepolia public resolver |
//! | `ENS_PARENT_DOMAIN` | Parent domain for subdomain registration | `brightlend.eth` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::str::FromStr;

use alloy::primitives::Address;

use crate::naming::types::{
    ARBITRUM_SEPOLIA, DEFAULT_PARENT_DOMAIN, ENS_PUBLIC_RESOLVER_ADDRESS, ENS_REGISTRY_ADDRESS,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const RPC_URL_ENV: &str = "ENS_RPC_URL";
pub const OWNER_KEY_ENV: &str = "ENS_OWNER_PRIVATE_KEY";
pub const REGISTRY_ADDRESS_ENV: &str = "ENS_REGISTRY_ADDRESS";
pub const RESOLVER_ADDRESS_ENV: &str = "ENS_RESOLVER_ADDRESS";
pub const PARENT_DOMAIN_ENV: &str = "ENS_PARENT_DOMAIN";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Configuration error raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Startup configuration for the name service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub rpc_url: String,
    /// Hex-encoded private key of the service signing identity, consumed by
    /// the registrar at startup.
    pub owner_private_key: String,
    pub registry_address: Address,
    pub resolver_address: Address,
    pub parent_domain: String,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                reason: format!("`{raw}` is not a valid port"),
            })?,
            None => 8080,
        };

        let rpc_url = lookup(RPC_URL_ENV).unwrap_or_else(|| ARBITRUM_SEPOLIA.rpc_url.to_string());

        let owner_private_key = lookup(OWNER_KEY_ENV).ok_or(ConfigError::Missing(OWNER_KEY_ENV))?;

        let registry_address = parse_address(
            REGISTRY_ADDRESS_ENV,
            &lookup(REGISTRY_ADDRESS_ENV).unwrap_or_else(|| ENS_REGISTRY_ADDRESS.to_string()),
        )?;
        let resolver_address = parse_address(
            RESOLVER_ADDRESS_ENV,
            &lookup(RESOLVER_ADDRESS_ENV)
                .unwrap_or_else(|| ENS_PUBLIC_RESOLVER_ADDRESS.to_string()),
        )?;

        let parent_domain =
            lookup(PARENT_DOMAIN_ENV).unwrap_or_else(|| DEFAULT_PARENT_DOMAIN.to_string());

        Ok(Self {
            host,
            port,
            rpc_url,
            owner_private_key,
            registry_address,
            resolver_address,
            parent_domain,
        })
    }
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, ConfigError> {
    Address::from_str(raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
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
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config =
            ServiceConfig::from_lookup(lookup_from(&[(OWNER_KEY_ENV, "deadbeef")])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rpc_url, ARBITRUM_SEPOLIA.rpc_url);
        assert_eq!(config.parent_domain, DEFAULT_PARENT_DOMAIN);
        assert_eq!(
            config.registry_address,
            Address::from_str(ENS_REGISTRY_ADDRESS).unwrap()
        );
        assert_eq!(
            config.resolver_address,
            Address::from_str(ENS_PUBLIC_RESOLVER_ADDRESS).unwrap()
        );
    }

    #[test]
    fn missing_signing_key_is_a_startup_error() {
        let err = ServiceConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(OWNER_KEY_ENV)));
    }

    #[test]
    fn malformed_values_are_startup_errors() {
        let err = ServiceConfig::from_lookup(lookup_from(&[
            (OWNER_KEY_ENV, "deadbeef"),
            (PORT_ENV, "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: PORT_ENV, .. }));

        let err = ServiceConfig::from_lookup(lookup_from(&[
            (OWNER_KEY_ENV, "deadbeef"),
            (REGISTRY_ADDRESS_ENV, "0x123"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: REGISTRY_ADDRESS_ENV,
                ..
            }
        ));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (OWNER_KEY_ENV, "deadbeef"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (PARENT_DOMAIN_ENV, "lending.eth"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.parent_domain, "lending.eth");
    }
}
