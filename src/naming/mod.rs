// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Naming-protocol integration.
//!
//! This module provides:
//! - Name hashing and label handling (`hash`)
//! - On-chain subdomain registration and resolution (`registrar`)
//! - Network and contract constants (`types`)

pub mod hash;
pub mod registrar;
pub mod types;

pub use registrar::{EnsClientError, EnsRegistrar, SubnodeRegistrar};
pub use types::*;
