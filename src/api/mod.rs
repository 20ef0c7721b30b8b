// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AvailabilityResponse, RegisterNameRequest, RegistrationResult, ResolveResponse,
        SyncUserRequest, UserRecord, WalletAddress,
    },
    naming::registrar::SubnodeRegistrar,
    state::AppState,
};

pub mod health;
pub mod names;
pub mod users;

pub fn router<R: SubnodeRegistrar + 'static>(state: AppState<R>) -> Router {
    let v1_routes = Router::new()
        .route("/names/register", post(names::register_name::<R>))
        .route("/names/availability", get(names::check_availability::<R>))
        .route("/names/resolve", get(names::resolve_name::<R>))
        .route("/users/sync", post(users::sync_user::<R>))
        .route("/users/{user_id}", get(users::get_user::<R>))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        names::register_name,
        names::check_availability,
        names::resolve_name,
        users::sync_user,
        users::get_user,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            WalletAddress,
            UserRecord,
            SyncUserRequest,
            RegisterNameRequest,
            RegistrationResult,
            AvailabilityResponse,
            ResolveResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Names", description = "Subdomain registration and resolution"),
        (name = "Users", description = "Off-chain user record sync"),
        (name = "Health", description = "Service probes")
    )
)]
struct ApiDoc;
