// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network and naming-protocol constants.

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Arbitrum Sepolia testnet configuration (default deployment target).
pub const ARBITRUM_SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Arbitrum Sepolia",
    chain_id: 421_614,
    rpc_url: "https://sepolia-rollup.arbitrum.io/rpc",
    explorer_url: "https://sepolia.arbiscan.io",
};

/// Arbitrum One mainnet configuration (production target).
#[allow(dead_code)]
pub const ARBITRUM_ONE: NetworkConfig = NetworkConfig {
    name: "Arbitrum One",
    chain_id: 42_161,
    rpc_url: "https://arb1.arbitrum.io/rpc",
    explorer_url: "https://arbiscan.io",
};

/// ENS registry contract deployed on Sepolia.
pub const ENS_REGISTRY_ADDRESS: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

/// ENS public resolver contract deployed on Sepolia.
pub const ENS_PUBLIC_RESOLVER_ADDRESS: &str = "0x8FADE66B79cC9f707aB26799354482EB93a5B7dD";

/// Parent domain that all user subdomains are registered under.
pub const DEFAULT_PARENT_DOMAIN: &str = "brightlend.eth";
