// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::naming::registrar::SubnodeRegistrar;
use crate::registration::RegistrationCoordinator;
use crate::store::UserStore;

/// Shared application state, generic over the registrar so handlers can be
/// exercised against a stub in tests.
pub struct AppState<R> {
    pub store: Arc<RwLock<UserStore>>,
    pub coordinator: Arc<RegistrationCoordinator<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<R: SubnodeRegistrar> AppState<R> {
    pub fn new(store: UserStore, registrar: R, parent_domain: impl Into<String>) -> Self {
        let store = Arc::new(RwLock::new(store));
        let coordinator = RegistrationCoordinator::new(
            Arc::clone(&store),
            Arc::new(registrar),
            parent_domain,
        );
        Self {
            store,
            coordinator: Arc::new(coordinator),
        }
    }
}
