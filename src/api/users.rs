// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{SyncUserRequest, UserRecord},
    naming::registrar::SubnodeRegistrar,
    state::AppState,
};

/// Sync a user from the auth provider.
///
/// Creates the record on first sight of the provider id, refreshes wallet
/// and contact fields otherwise.
#[utoipa::path(
    post,
    path = "/v1/users/sync",
    request_body = SyncUserRequest,
    tag = "Users",
    responses(
        (status = 200, description = "User record after sync", body = UserRecord),
        (status = 400, description = "Missing identifiers")
    )
)]
pub async fn sync_user<R: SubnodeRegistrar>(
    State(state): State<AppState<R>>,
    Json(request): Json<SyncUserRequest>,
) -> Result<Json<UserRecord>, ApiError> {
    let mut store = state.store.write().await;
    let user = store.sync_user(request)?;
    Ok(Json(user))
}

/// Fetch a user record by id.
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User record identifier")
    ),
    tag = "Users",
    responses(
        (status = 200, description = "User record", body = UserRecord),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_user<R: SubnodeRegistrar>(
    Path(user_id): Path<String>,
    State(state): State<AppState<R>>,
) -> Result<Json<UserRecord>, ApiError> {
    state
        .store
        .read()
        .await
        .user(&user_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}
