// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use brightlend_name_server::{
    api::router,
    config::{ServiceConfig, LOG_FORMAT_ENV},
    naming::EnsRegistrar,
    state::AppState,
    store::UserStore,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration and the signing identity are resolved once, before the
    // server accepts any request.
    let config = ServiceConfig::from_env().unwrap_or_else(|err| {
        eprintln!("configuration error: {err}");
        std::process::exit(1);
    });

    let registrar = EnsRegistrar::new(
        &config.rpc_url,
        &config.owner_private_key,
        config.registry_address,
        config.resolver_address,
        config.parent_domain.clone(),
    )
    .unwrap_or_else(|err| {
        eprintln!("registrar setup error: {err}");
        std::process::exit(1);
    });

    tracing::info!(
        parent_domain = %config.parent_domain,
        signer = %registrar.signer_address(),
        registry = %config.registry_address,
        resolver = %config.resolver_address,
        "name service configured"
    );

    let state = AppState::new(UserStore::new(), registrar, config.parent_domain.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("BrightLend name server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
