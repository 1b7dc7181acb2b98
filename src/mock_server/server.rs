//! Mock Pivnet API server.
//!
//! Provides an axum-based HTTP server that simulates the Pivnet API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures, RELEASE_TYPES};
use super::handlers;
use super::state::MockState;
use crate::ClientConfig;

/// In-process Pivnet API served over HTTP on a loopback port.
///
/// Point a [`ClientConfig`] at [`url`](Self::url) (or use
/// [`client_config`](Self::client_config)) to run the real client against it.
pub struct MockServer {
    /// `http://127.0.0.1:<port>`, without the API prefix.
    url: String,
    /// Background task running `axum::serve`.
    handle: JoinHandle<()>,
    /// State read and written by the handlers.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve the default scenario: two products, three releases, two EULAs,
    /// one dependency and one upgrade path.
    pub async fn start() -> Self {
        Self::with_state(MockState::from(Fixtures::default_scenario())).await
    }

    /// Serve no products, releases, EULAs or release types.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve the given state.
    ///
    /// # Panics
    ///
    /// Panics if no loopback port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let app = Self::router(state.clone());

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener has an address");
        tracing::debug!(%addr, "mock Pivnet API listening");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock Pivnet API stopped");
            }
        });

        Self {
            url: format!("http://{addr}"),
            handle,
            state,
        }
    }

    /// Host URL to use as `ClientConfig::host`; routes live under `/api/v2`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Client configuration pointing at this server.
    pub fn client_config(&self, token: &str) -> ClientConfig {
        ClientConfig::new(token).with_host(self.url.clone())
    }

    /// Handle to the live state, for seeding or inspecting data mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        Arc::clone(&self.state)
    }

    /// Abort the server task and wait for it to finish.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Build the axum router with all routes.
    ///
    /// API routes are mounted under `/api/v2` behind the token check;
    /// `/health` is always reachable.
    pub fn router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            .route("/authentication", get(handlers::get_authentication))
            // Product routes
            .route("/products", get(handlers::list_products))
            .route("/products/:slug", get(handlers::get_product))
            // Release routes
            .route(
                "/products/:slug/releases",
                get(handlers::list_releases).post(handlers::create_release),
            )
            .route(
                "/products/:slug/releases/:id",
                get(handlers::get_release)
                    .patch(handlers::update_release)
                    .delete(handlers::delete_release),
            )
            .route("/releases/release_types", get(handlers::list_release_types))
            // Dependency routes
            .route(
                "/products/:slug/releases/:id/dependencies",
                get(handlers::list_dependencies),
            )
            .route(
                "/products/:slug/releases/:id/add_dependency",
                patch(handlers::add_dependency),
            )
            .route(
                "/products/:slug/releases/:id/remove_dependency",
                patch(handlers::remove_dependency),
            )
            // Upgrade path routes
            .route(
                "/products/:slug/releases/:id/upgrade_paths",
                get(handlers::list_upgrade_paths),
            )
            .route(
                "/products/:slug/releases/:id/add_upgrade_path",
                patch(handlers::add_upgrade_path),
            )
            .route(
                "/products/:slug/releases/:id/remove_upgrade_path",
                patch(handlers::remove_upgrade_path),
            )
            // EULA routes
            .route("/eulas", get(handlers::list_eulas))
            .route("/eulas/:slug", get(handlers::get_eula))
            .route(
                "/products/:slug/releases/:id/eula_acceptance",
                post(handlers::accept_eula),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_token,
            ));

        Router::new()
            .nest("/api/v2", api)
            .route("/health", get(health_check))
            .with_state(state)
    }
}

impl From<DefaultScenario> for MockState {
    fn from(scenario: DefaultScenario) -> Self {
        let mut state = RELEASE_TYPES
            .iter()
            .fold(MockState::new(), |state, t| state.with_release_type(t));

        for product in scenario.products {
            state = state.with_product(product);
        }
        for eula in scenario.eulas {
            state = state.with_eula(eula);
        }
        for (product_slug, release) in scenario.releases {
            state = state.with_release(&product_slug, release);
        }
        for (release_id, dependent_id) in scenario.dependencies {
            state.add_dependency(release_id, dependent_id);
        }
        for (release_id, previous_id) in scenario.upgrade_paths {
            state.add_upgrade_path(release_id, previous_id);
        }

        state
    }
}

/// GET /health, outside the token check.
async fn health_check() -> &'static str {
    "ok"
}
