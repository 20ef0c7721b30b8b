// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BrightLend Name Service - ENS Subdomain Registration
//!
//! This crate provides the naming backend for the BrightLend lending
//! platform: users get a human-readable subdomain of `brightlend.eth` that
//! resolves to their wallet address, registered on-chain with a
//! service-held signing key.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `naming` - Name hashing and on-chain registry/resolver integration
//! - `registration` - Registration coordination and error taxonomy
//! - `store` - Off-chain user record store

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod registration;
pub mod state;
pub mod store;
