// Copyright 2025 Strand Contributors (https://github.com/strandhq/strand)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

pub mod api;
pub mod config;
pub mod service;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{
    create_string, delete_string_by_value, filter_by_criteria, get_string_by_value, health_check,
    search_by_natural_language, AppState,
};
use config::{ServerConfig, StorageBackend};
use service::StringService;
use strand_storage::{EntryStore, FileStore, MemoryStore};

/// Assemble the application router.
///
/// Kept separate from [`run_server`] so integration tests can drive the exact
/// production routing without binding a socket.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route(
            "/api/v1/strings",
            post(create_string).get(filter_by_criteria),
        )
        .route(
            "/api/v1/strings/:value",
            get(get_string_by_value).delete(delete_string_by_value),
        )
        .route("/api/v1/search", post(search_by_natural_language))
        .route("/api/v1/health", get(health_check))
        .layer(TraceLayer::new_for_http());

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strand_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Strand Server");
    tracing::info!("Configuration: {:#?}", config);

    config.validate()?;

    let store: Arc<dyn EntryStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory entry store (entries are volatile)");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            let path = config.storage.data_dir.join("strings.json");
            tracing::info!("Opening file entry store at: {:?}", path);
            Arc::new(FileStore::open(path)?)
        }
    };

    let state = AppState {
        service: Arc::new(StringService::new(store)),
    };

    let app = build_router(state, config.server.enable_cors);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
