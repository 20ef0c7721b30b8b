// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Name registration endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    models::{AvailabilityResponse, RegisterNameRequest, RegistrationResult, ResolveResponse},
    naming::registrar::SubnodeRegistrar,
    registration::RegistrationError,
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Candidate subdomain label.
    pub subdomain: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ResolveQuery {
    /// Full domain name, e.g. `user1234abcd.brightlend.eth`.
    pub name: Option<String>,
}

/// Register a subdomain for a user.
///
/// Failures come back as a `RegistrationResult` with `success: false` and a
/// reason in `error`; an already-registered user additionally gets the
/// existing binding echoed back.
#[utoipa::path(
    post,
    path = "/v1/names/register",
    request_body = RegisterNameRequest,
    tag = "Names",
    responses(
        (status = 200, description = "Subdomain registered", body = RegistrationResult),
        (status = 400, description = "Invalid input or label", body = RegistrationResult),
        (status = 404, description = "Unknown user", body = RegistrationResult),
        (status = 409, description = "User already has a subdomain", body = RegistrationResult),
        (status = 502, description = "On-chain registration failed", body = RegistrationResult)
    )
)]
pub async fn register_name<R: SubnodeRegistrar>(
    State(state): State<AppState<R>>,
    Json(request): Json<RegisterNameRequest>,
) -> (StatusCode, Json<RegistrationResult>) {
    match state.coordinator.register_name(request).await {
        Ok(registered) => (StatusCode::OK, Json(registered.into())),
        Err(err) => (error_status(&err), Json(err.into())),
    }
}

fn error_status(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::MissingFields
        | RegistrationError::InvalidAddress
        | RegistrationError::InvalidLabel => StatusCode::BAD_REQUEST,
        RegistrationError::UserNotFound => StatusCode::NOT_FOUND,
        RegistrationError::AlreadyRegistered { .. } => StatusCode::CONFLICT,
        RegistrationError::OnChain(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Advisory availability check for a candidate label.
#[utoipa::path(
    get,
    path = "/v1/names/availability",
    params(AvailabilityQuery),
    tag = "Names",
    responses(
        (status = 200, description = "Availability result", body = AvailabilityResponse),
        (status = 400, description = "Missing or malformed label", body = AvailabilityResponse)
    )
)]
pub async fn check_availability<R: SubnodeRegistrar>(
    State(state): State<AppState<R>>,
    Query(params): Query<AvailabilityQuery>,
) -> (StatusCode, Json<AvailabilityResponse>) {
    let response = state
        .coordinator
        .check_availability(params.subdomain.as_deref())
        .await;

    let status = if response.error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(response))
}

/// Forward-resolve a full domain name to the address it points at.
#[utoipa::path(
    get,
    path = "/v1/names/resolve",
    params(ResolveQuery),
    tag = "Names",
    responses(
        (status = 200, description = "Resolution result", body = ResolveResponse),
        (status = 400, description = "Missing name", body = ResolveResponse),
        (status = 502, description = "Lookup failed", body = ResolveResponse)
    )
)]
pub async fn resolve_name<R: SubnodeRegistrar>(
    State(state): State<AppState<R>>,
    Query(params): Query<ResolveQuery>,
) -> (StatusCode, Json<ResolveResponse>) {
    let Some(name) = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ResolveResponse {
                address: None,
                error: Some("name query parameter is required".into()),
            }),
        );
    };

    match state.coordinator.resolve(name).await {
        Ok(address) => (
            StatusCode::OK,
            Json(ResolveResponse {
                address: address.map(|a| a.to_string()),
                error: None,
            }),
        ),
        Err(err) => (
            StatusCode::BAD_GATEWAY,
            Json(ResolveResponse {
                address: None,
                error: Some(err.to_string()),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SyncUserRequest, WalletAddress};
    use crate::naming::registrar::EnsClientError;
    use crate::store::UserStore;
    use alloy::primitives::{address, Address};

    const WALLET: &str = "0xABCDEF0123456789000000000000000000000001";

    struct StubRegistrar {
        fail: bool,
    }

    impl SubnodeRegistrar for StubRegistrar {
        async fn register_subnode(
            &self,
            _label: &str,
            _target: Address,
        ) -> Result<String, EnsClientError> {
            if self.fail {
                Err(EnsClientError::TransactionFailed(
                    "setAddr: insufficient funds".into(),
                ))
            } else {
                Ok("0x1111111111111111111111111111111111111111111111111111111111111111".into())
            }
        }

        async fn resolve_addr(&self, name: &str) -> Result<Option<Address>, EnsClientError> {
            if name.starts_with("userabcdef01.") {
                Ok(Some(address!(
                    "0xABCDEF0123456789000000000000000000000001"
                )))
            } else {
                Ok(None)
            }
        }
    }

    fn test_state(fail: bool) -> AppState<StubRegistrar> {
        AppState::new(UserStore::new(), StubRegistrar { fail }, "brightlend.eth")
    }

    async fn seed_user(state: &AppState<StubRegistrar>) -> String {
        state
            .store
            .write()
            .await
            .sync_user(SyncUserRequest {
                privy_user_id: "privy_1".into(),
                wallet_address: WalletAddress::from(WALLET),
                phone_number: None,
                email: None,
            })
            .expect("user syncs")
            .id
    }

    #[tokio::test]
    async fn register_success_returns_full_result() {
        let state = test_state(false);
        let user_id = seed_user(&state).await;

        let (status, Json(result)) = register_name(
            State(state.clone()),
            Json(RegisterNameRequest {
                user_id,
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: None,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(result.success);
        assert_eq!(result.subdomain.as_deref(), Some("userabcdef01"));
        assert_eq!(
            result.full_domain.as_deref(),
            Some("userabcdef01.brightlend.eth")
        );
        assert!(result.tx_hash.is_some());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn register_maps_error_categories_to_statuses() {
        let state = test_state(false);
        let user_id = seed_user(&state).await;

        // Unknown user.
        let (status, Json(result)) = register_name(
            State(state.clone()),
            Json(RegisterNameRequest {
                user_id: "missing".into(),
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!result.success);

        // Invalid label.
        let (status, Json(result)) = register_name(
            State(state.clone()),
            Json(RegisterNameRequest {
                user_id: user_id.clone(),
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: Some("AB".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(result.error.is_some());

        // Conflict after a successful registration.
        let (status, _) = register_name(
            State(state.clone()),
            Json(RegisterNameRequest {
                user_id: user_id.clone(),
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, Json(result)) = register_name(
            State(state),
            Json(RegisterNameRequest {
                user_id,
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(result.subdomain.as_deref(), Some("userabcdef01"));
    }

    #[tokio::test]
    async fn register_surfaces_on_chain_failures() {
        let state = test_state(true);
        let user_id = seed_user(&state).await;

        let (status, Json(result)) = register_name(
            State(state),
            Json(RegisterNameRequest {
                user_id,
                wallet_address: WalletAddress::from(WALLET),
                custom_subdomain: None,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("setAddr"));
    }

    #[tokio::test]
    async fn availability_reports_shape_errors_with_bad_request() {
        let state = test_state(false);

        let (status, Json(response)) = check_availability(
            State(state.clone()),
            Query(AvailabilityQuery {
                subdomain: Some("ab".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.available);
        assert!(response.error.is_some());

        let (status, Json(response)) = check_availability(
            State(state),
            Query(AvailabilityQuery {
                subdomain: Some("freelabel".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.available);
        assert_eq!(
            response.full_domain.as_deref(),
            Some("freelabel.brightlend.eth")
        );
    }

    #[tokio::test]
    async fn resolve_returns_address_or_null() {
        let state = test_state(false);

        let (status, Json(response)) = resolve_name(
            State(state.clone()),
            Query(ResolveQuery {
                name: Some("userabcdef01.brightlend.eth".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.address.map(|a| a.to_lowercase()).as_deref(),
            Some("0xabcdef0123456789000000000000000000000001")
        );

        let (status, Json(response)) = resolve_name(
            State(state.clone()),
            Query(ResolveQuery {
                name: Some("unknown.brightlend.eth".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.address.is_none());

        let (status, Json(response)) =
            resolve_name(State(state), Query(ResolveQuery { name: None })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response.error.is_some());
    }
}
