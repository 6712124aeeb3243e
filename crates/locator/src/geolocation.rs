use std::sync::Arc;

use foundation::Coordinate;
use service::BoxFuture;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this host")]
    Unsupported,
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("position read timed out")]
    Timeout,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Host position source. One call reads the position once; no polling.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>>;
}

/// Best-effort, one-shot read of the user's position.
///
/// Every failure, and the absence of a provider, degrades to `None`.
#[derive(Clone, Default)]
pub struct GeolocationProbe {
    provider: Option<Arc<dyn GeolocationProvider>>,
}

impl std::fmt::Debug for GeolocationProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeolocationProbe")
            .field("supported", &self.provider.is_some())
            .finish()
    }
}

impl GeolocationProbe {
    pub fn new(provider: Arc<dyn GeolocationProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A host without geolocation capability.
    pub fn unsupported() -> Self {
        Self { provider: None }
    }

    pub async fn probe(&self) -> Option<Coordinate> {
        let Some(provider) = &self.provider else {
            tracing::debug!("{}", GeolocationError::Unsupported);
            return None;
        };
        match provider.current_position().await {
            Ok(position) => {
                tracing::debug!(lat = position.lat, lng = position.lng, "user position");
                Some(position)
            }
            Err(err) => {
                tracing::debug!(error = %err, "user position unavailable");
                None
            }
        }
    }
}

/// Provider answering every read with the same result.
#[derive(Debug, Clone)]
pub struct FixedPosition(pub Result<Coordinate, GeolocationError>);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        let result = self.0.clone();
        Box::pin(async move { result })
    }
}
