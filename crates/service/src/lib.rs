//! Data service abstraction for the venue locator.
//!
//! The locator reads three collections (buildings, companies, rooms) and
//! issues one write (route computation). Implementations:
//! - [`HttpDataService`]: JSON over HTTP, the production backend
//! - [`MemoryDataService`]: in-process fixtures for tests and demos
//!
//! Methods return boxed futures so the trait stays dyn-compatible.

pub mod http;
pub mod memory;
pub mod route;

use std::future::Future;
use std::pin::Pin;

use catalog::{Building, Company, Room};

pub use http::HttpDataService;
pub use memory::MemoryDataService;
pub use route::{PathRequest, RouteGeometry};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The logical operations offered by the data service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Buildings,
    Companies,
    Rooms,
    CalculatePath,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Buildings => "/buildings",
            Endpoint::Companies => "/companies",
            Endpoint::Rooms => "/rooms",
            Endpoint::CalculatePath => "/paths/calculate",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request to {endpoint:?} failed: {source}")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint:?} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("failed to decode {endpoint:?} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint:?} unavailable: {message}")]
    Unavailable { endpoint: Endpoint, message: String },
}

impl ServiceError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ServiceError::Request { endpoint, .. }
            | ServiceError::Status { endpoint, .. }
            | ServiceError::Decode { endpoint, .. }
            | ServiceError::Unavailable { endpoint, .. } => *endpoint,
        }
    }
}

/// Collaborator contract for catalog reads and route computation.
///
/// Implementations must be `Send + Sync` for use across async tasks.
pub trait DataService: Send + Sync {
    fn buildings(&self) -> BoxFuture<'_, Result<Vec<Building>, ServiceError>>;

    fn companies(&self) -> BoxFuture<'_, Result<Vec<Company>, ServiceError>>;

    fn rooms(&self) -> BoxFuture<'_, Result<Vec<Room>, ServiceError>>;

    /// Non-2xx responses are failures.
    fn calculate_path(
        &self,
        request: PathRequest,
    ) -> BoxFuture<'_, Result<RouteGeometry, ServiceError>>;
}
