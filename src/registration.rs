// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration coordination: request validation, collision handling, the
//! on-chain sequence, and persistence of the resulting assignment.
//!
//! A single attempt moves through a linear stage machine:
//!
//! ```text
//! Received -> Validated -> Deduplicated -> OnChainPending
//!          -> OnChainConfirmed -> Persisted -> Completed
//! ```
//!
//! Failure is terminal from every stage except `Completed`; there is no
//! retry stage. A failed attempt is re-submitted from scratch by the caller,
//! which re-runs the collision check and the full on-chain sequence.

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AvailabilityResponse, RegisterNameRequest, RegistrationResult};
use crate::naming::hash::{full_domain, generate_label, is_valid_label};
use crate::naming::registrar::{EnsClientError, SubnodeRegistrar};
use crate::store::UserStore;

/// Stages of a single registration attempt, surfaced in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Received,
    Validated,
    Deduplicated,
    OnChainPending,
    OnChainConfirmed,
    Persisted,
    Completed,
}

/// A completed registration.
#[derive(Debug, Clone)]
pub struct RegisteredName {
    pub subdomain: String,
    pub full_domain: String,
    pub tx_hash: String,
}

/// Why a registration attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("userId and walletAddress are required")]
    MissingFields,

    #[error("invalid wallet address")]
    InvalidAddress,

    #[error("user not found")]
    UserNotFound,

    #[error("user already has a subdomain assigned")]
    AlreadyRegistered {
        subdomain: String,
        full_domain: String,
    },

    #[error("invalid subdomain: 3-32 lowercase letters, digits and inner hyphens")]
    InvalidLabel,

    #[error("{0}")]
    OnChain(String),
}

impl RegistrationError {
    /// The last stage the attempt reached before failing.
    pub fn stage(&self) -> RegistrationStage {
        match self {
            Self::MissingFields
            | Self::InvalidAddress
            | Self::UserNotFound
            | Self::AlreadyRegistered { .. }
            | Self::InvalidLabel => RegistrationStage::Received,
            Self::OnChain(_) => RegistrationStage::OnChainPending,
        }
    }
}

impl From<RegisteredName> for RegistrationResult {
    fn from(value: RegisteredName) -> Self {
        Self {
            success: true,
            subdomain: Some(value.subdomain),
            full_domain: Some(value.full_domain),
            tx_hash: Some(value.tx_hash),
            error: None,
        }
    }
}

impl From<RegistrationError> for RegistrationResult {
    fn from(value: RegistrationError) -> Self {
        let (subdomain, full_domain) = match &value {
            RegistrationError::AlreadyRegistered {
                subdomain,
                full_domain,
            } => (Some(subdomain.clone()), Some(full_domain.clone())),
            _ => (None, None),
        };
        Self {
            success: false,
            subdomain,
            full_domain,
            tx_hash: None,
            error: Some(value.to_string()),
        }
    }
}

/// Orchestrates a registration attempt end to end.
pub struct RegistrationCoordinator<R> {
    store: Arc<RwLock<UserStore>>,
    registrar: Arc<R>,
    parent_domain: String,
}

impl<R: SubnodeRegistrar> RegistrationCoordinator<R> {
    pub fn new(
        store: Arc<RwLock<UserStore>>,
        registrar: Arc<R>,
        parent_domain: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registrar,
            parent_domain: parent_domain.into(),
        }
    }

    /// Register a subdomain for a user.
    ///
    /// Runs to completion or failure within this call; no background work,
    /// no automatic retry.
    pub async fn register_name(
        &self,
        request: RegisterNameRequest,
    ) -> Result<RegisteredName, RegistrationError> {
        let mut stage = RegistrationStage::Received;
        tracing::debug!(?stage, user_id = %request.user_id, "registration request");

        // Validation: no side effects until the on-chain sequence starts.
        if request.user_id.trim().is_empty() || request.wallet_address.0.trim().is_empty() {
            return Err(RegistrationError::MissingFields);
        }

        let target = Address::from_str(request.wallet_address.0.trim())
            .map_err(|_| RegistrationError::InvalidAddress)?;

        let user = self
            .store
            .read()
            .await
            .user(&request.user_id)
            .ok_or(RegistrationError::UserNotFound)?;

        if let Some(existing) = user.ens_subdomain {
            return Err(RegistrationError::AlreadyRegistered {
                full_domain: full_domain(&existing, &self.parent_domain),
                subdomain: existing,
            });
        }

        let requested = request
            .custom_subdomain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let candidate = requested
            .map(str::to_string)
            .unwrap_or_else(|| generate_label(&request.wallet_address.0));

        if !is_valid_label(&candidate) {
            return Err(RegistrationError::InvalidLabel);
        }
        stage = RegistrationStage::Validated;
        tracing::debug!(?stage, %candidate, "request validated");

        // Collision handling: fall back to a suffixed generated label rather
        // than failing. The fallback is not re-checked against the store;
        // the store's uniqueness guard catches the losing side of a race at
        // persist time.
        let taken = self
            .store
            .read()
            .await
            .user_by_subdomain(&candidate)
            .is_some();
        let label = if taken {
            let suffix = Uuid::new_v4().simple().to_string();
            format!(
                "{}{}",
                generate_label(&request.wallet_address.0),
                &suffix[..4]
            )
        } else {
            candidate
        };
        stage = RegistrationStage::Deduplicated;
        tracing::debug!(?stage, %label, "label selected");

        stage = RegistrationStage::OnChainPending;
        tracing::debug!(?stage, %label, "starting on-chain sequence");
        let tx_hash = self
            .registrar
            .register_subnode(&label, target)
            .await
            .map_err(|err: EnsClientError| {
                tracing::error!(%label, error = %err, "on-chain registration failed");
                RegistrationError::OnChain(err.to_string())
            })?;
        stage = RegistrationStage::OnChainConfirmed;
        tracing::debug!(?stage, %tx_hash, "sequence confirmed");

        // On-chain state is authoritative. A persistence failure here is
        // logged and the attempt still reports success; the off-chain record
        // is reconciled out-of-band.
        match self
            .store
            .write()
            .await
            .assign_subdomain(&request.user_id, &label)
        {
            Ok(_) => {
                stage = RegistrationStage::Persisted;
                tracing::debug!(?stage, user_id = %request.user_id, "assignment persisted");
            }
            Err(err) => {
                tracing::error!(
                    user_id = %request.user_id,
                    %label,
                    error = %err.message,
                    "on-chain registration succeeded but persisting the assignment failed"
                );
            }
        }

        stage = RegistrationStage::Completed;
        let name = full_domain(&label, &self.parent_domain);
        tracing::info!(?stage, %name, %tx_hash, "subdomain registered");

        Ok(RegisteredName {
            subdomain: label,
            full_domain: name,
            tx_hash,
        })
    }

    /// Advisory availability check for a candidate label.
    ///
    /// Not transactionally consistent with a following registration; the
    /// time-of-check/time-of-use gap is accepted.
    pub async fn check_availability(&self, candidate: Option<&str>) -> AvailabilityResponse {
        let Some(label) = candidate.map(str::trim).filter(|s| !s.is_empty()) else {
            return AvailabilityResponse {
                available: false,
                subdomain: None,
                full_domain: None,
                error: Some("subdomain query parameter is required".into()),
            };
        };

        if !is_valid_label(label) {
            return AvailabilityResponse {
                available: false,
                subdomain: None,
                full_domain: None,
                error: Some(
                    "invalid subdomain: 3-32 lowercase letters, digits and inner hyphens".into(),
                ),
            };
        }

        let taken = self.store.read().await.user_by_subdomain(label).is_some();
        AvailabilityResponse {
            available: !taken,
            subdomain: Some(label.to_string()),
            full_domain: Some(full_domain(label, &self.parent_domain)),
            error: None,
        }
    }

    /// Forward-resolve a full domain name through the registrar.
    pub async fn resolve(&self, name: &str) -> Result<Option<Address>, EnsClientError> {
        self.registrar.resolve_addr(name).await
    }
}
