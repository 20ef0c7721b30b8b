// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user record store.
//!
//! Stands in for the platform's off-chain user database. The store owns the
//! record lifecycle (creation via auth-provider sync); the registration flow
//! reads records and writes subdomain assignments through it.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{SyncUserRequest, UserRecord};

#[derive(Default)]
pub struct UserStore {
    /// Records keyed by their record id.
    users: HashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user record by its id.
    pub fn user(&self, user_id: &str) -> Option<UserRecord> {
        self.users.get(user_id).cloned()
    }

    /// Look up a user record by auth-provider id.
    pub fn user_by_privy_id(&self, privy_user_id: &str) -> Option<UserRecord> {
        self.users
            .values()
            .find(|user| user.privy_user_id == privy_user_id)
            .cloned()
    }

    /// Look up the user record holding a subdomain label, if any.
    pub fn user_by_subdomain(&self, label: &str) -> Option<UserRecord> {
        self.users
            .values()
            .find(|user| user.ens_subdomain.as_deref() == Some(label))
            .cloned()
    }

    /// Upsert a user record from the auth provider.
    ///
    /// Creates a new record (initial credit score 500) when the provider id
    /// is unknown, otherwise refreshes the wallet address and contact fields.
    pub fn sync_user(&mut self, request: SyncUserRequest) -> Result<UserRecord, ApiError> {
        if request.privy_user_id.trim().is_empty() {
            return Err(ApiError::bad_request("privy_user_id is required"));
        }
        if request.wallet_address.0.trim().is_empty() {
            return Err(ApiError::bad_request("wallet_address is required"));
        }

        let now = Utc::now();

        if let Some(existing) = self
            .users
            .values_mut()
            .find(|user| user.privy_user_id == request.privy_user_id)
        {
            existing.wallet_address = request.wallet_address;
            existing.phone_number = request.phone_number;
            existing.email = request.email;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let id = Uuid::new_v4().to_string();
        let user = UserRecord {
            id: id.clone(),
            privy_user_id: request.privy_user_id,
            wallet_address: request.wallet_address,
            phone_number: request.phone_number,
            email: request.email,
            credit_score: 500,
            ens_subdomain: None,
            ens_registered_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    /// Record a subdomain assignment for a user.
    ///
    /// One subdomain per user, one user per subdomain; violations surface as
    /// conflicts rather than silently overwriting.
    pub fn assign_subdomain(&mut self, user_id: &str, label: &str) -> Result<UserRecord, ApiError> {
        if let Some(holder) = self.user_by_subdomain(label) {
            if holder.id != user_id {
                return Err(ApiError::conflict(format!(
                    "subdomain {label} is already assigned"
                )));
            }
        }

        let Some(user) = self.users.get_mut(user_id) else {
            return Err(ApiError::not_found(format!("User {user_id}")));
        };

        if user.ens_subdomain.is_some() {
            return Err(ApiError::conflict("user already has a subdomain assigned"));
        }

        let now = Utc::now();
        user.ens_subdomain = Some(label.to_string());
        user.ens_registered_at = Some(now);
        user.updated_at = now;
        Ok(user.clone())
    }
}
