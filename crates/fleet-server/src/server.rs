use std::sync::Arc;

use fleet_service::VehicleService;
use fleet_store::{load_vehicles, InMemoryVehicleStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Fleet registry HTTP server.
pub struct FleetServer {
    config: ServerConfig,
    service: VehicleService,
}

impl FleetServer {
    /// Build a server over an in-memory store, seeded from
    /// `config.data_path` when one is set.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = match &config.data_path {
            Some(path) => {
                let vehicles = load_vehicles(path)?;
                tracing::info!(count = vehicles.len(), path = %path.display(), "loaded seed data");
                InMemoryVehicleStore::with_vehicles(vehicles)
            }
            None => InMemoryVehicleStore::new(),
        };
        let service = VehicleService::new(Arc::new(store));
        Ok(Self::with_service(config, service))
    }

    /// Build a server over an existing service.
    pub fn with_service(config: ServerConfig, service: VehicleService) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.service.clone()), self.config.max_body_bytes)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("fleet server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
