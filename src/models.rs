// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON handling
//! and OpenAPI documentation.
//!
//! The name-registration endpoints use camelCase wire fields (the contract
//! the web client already speaks); user records use snake_case, matching
//! the off-chain `users` table they mirror.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes). Kept as a
/// string at the API boundary; parsed into a checked address type before any
/// on-chain use.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// User Records
// =============================================================================

/// Off-chain user record.
///
/// Rows are created and updated by the auth-provider sync flow; the name
/// registration flow only reads them and fills in the subdomain assignment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique identifier for this user (UUID).
    pub id: String,
    /// User id at the embedded-wallet auth provider.
    pub privy_user_id: String,
    /// The user's wallet address.
    pub wallet_address: WalletAddress,
    /// Phone number from the auth provider, if linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Email address from the auth provider, if linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Platform credit score (new users start at 500).
    pub credit_score: i32,
    /// Assigned subdomain label, once registered. At most one per user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ens_subdomain: Option<String>,
    /// When the subdomain registration was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ens_registered_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Request to sync a user from the auth provider (upsert by provider id).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SyncUserRequest {
    /// User id at the embedded-wallet auth provider.
    pub privy_user_id: String,
    /// Current wallet address for the user.
    pub wallet_address: WalletAddress,
    /// Phone number, if linked.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Email address, if linked.
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Name Registration Models
// =============================================================================

/// Request to register a subdomain for a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNameRequest {
    /// The user record id the subdomain is registered for.
    pub user_id: String,
    /// The wallet address the name should resolve to.
    pub wallet_address: WalletAddress,
    /// Requested label; a label is derived from the wallet address when
    /// absent or empty.
    #[serde(default)]
    pub custom_subdomain: Option<String>,
}

/// Outcome of a registration attempt.
///
/// Either the success fields or `error` are set, never both.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    /// Whether the registration completed.
    pub success: bool,
    /// The registered label. On an already-registered failure this carries
    /// the existing assignment instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// The full domain name, e.g. `user1234abcd.brightlend.eth`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_domain: Option<String>,
    /// Transaction hash of the final registration step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Failure reason, when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Advisory availability check result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Whether the label is currently unassigned.
    pub available: bool,
    /// The label that was checked, echoed back when well-formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// The full domain the label would map to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_domain: Option<String>,
    /// Why the label cannot be used, when malformed or missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Forward-resolution result for a full domain name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    /// The address the name resolves to, or null when no record exists.
    pub address: Option<String>,
    /// Lookup failure reason, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
