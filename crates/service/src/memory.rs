use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use catalog::{Building, Company, Room};
use tokio::sync::RwLock;

use crate::{BoxFuture, DataService, Endpoint, PathRequest, RouteGeometry, ServiceError};

type RouteFn = dyn Fn(&PathRequest) -> Result<RouteGeometry, ServiceError> + Send + Sync;

#[derive(Default)]
struct Fixtures {
    buildings: Vec<Building>,
    companies: Vec<Company>,
    rooms: Vec<Room>,
    failing: HashSet<Endpoint>,
    calls: HashMap<Endpoint, usize>,
    requests: Vec<PathRequest>,
}

/// In-memory data service for tests or offline demos.
///
/// Records every call so callers can assert on what was (not) requested.
/// Route requests are answered by a configurable responder; without one,
/// every destination gets an empty route.
#[derive(Clone, Default)]
pub struct MemoryDataService {
    fixtures: Arc<RwLock<Fixtures>>,
    router: Option<Arc<RouteFn>>,
}

impl MemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route_responder(
        mut self,
        responder: impl Fn(&PathRequest) -> Result<RouteGeometry, ServiceError> + Send + Sync + 'static,
    ) -> Self {
        self.router = Some(Arc::new(responder));
        self
    }

    pub async fn set_buildings(&self, items: Vec<Building>) {
        self.fixtures.write().await.buildings = items;
    }

    pub async fn set_companies(&self, items: Vec<Company>) {
        self.fixtures.write().await.companies = items;
    }

    pub async fn set_rooms(&self, items: Vec<Room>) {
        self.fixtures.write().await.rooms = items;
    }

    /// Makes `endpoint` fail until [`MemoryDataService::recover`] is called.
    pub async fn fail(&self, endpoint: Endpoint) {
        self.fixtures.write().await.failing.insert(endpoint);
    }

    pub async fn recover(&self, endpoint: Endpoint) {
        self.fixtures.write().await.failing.remove(&endpoint);
    }

    pub async fn calls(&self, endpoint: Endpoint) -> usize {
        self.fixtures
            .read()
            .await
            .calls
            .get(&endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub async fn path_requests(&self) -> Vec<PathRequest> {
        self.fixtures.read().await.requests.clone()
    }

    async fn record(&self, endpoint: Endpoint) -> Result<(), ServiceError> {
        let mut fx = self.fixtures.write().await;
        *fx.calls.entry(endpoint).or_insert(0) += 1;
        if fx.failing.contains(&endpoint) {
            return Err(ServiceError::Unavailable {
                endpoint,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl DataService for MemoryDataService {
    fn buildings(&self) -> BoxFuture<'_, Result<Vec<Building>, ServiceError>> {
        Box::pin(async move {
            self.record(Endpoint::Buildings).await?;
            Ok(self.fixtures.read().await.buildings.clone())
        })
    }

    fn companies(&self) -> BoxFuture<'_, Result<Vec<Company>, ServiceError>> {
        Box::pin(async move {
            self.record(Endpoint::Companies).await?;
            Ok(self.fixtures.read().await.companies.clone())
        })
    }

    fn rooms(&self) -> BoxFuture<'_, Result<Vec<Room>, ServiceError>> {
        Box::pin(async move {
            self.record(Endpoint::Rooms).await?;
            Ok(self.fixtures.read().await.rooms.clone())
        })
    }

    fn calculate_path(
        &self,
        request: PathRequest,
    ) -> BoxFuture<'_, Result<RouteGeometry, ServiceError>> {
        Box::pin(async move {
            self.fixtures.write().await.requests.push(request.clone());
            self.record(Endpoint::CalculatePath).await?;
            match &self.router {
                Some(router) => router(&request),
                None => Ok(RouteGeometry::default()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryDataService;
    use crate::{DataService, Endpoint, PathRequest, RouteGeometry, ServiceError};
    use catalog::{BuildingRef, Room};
    use foundation::{Coordinate, LngLat};

    fn room() -> Room {
        Room {
            id: "r1".into(),
            identifier: "101".into(),
            building: BuildingRef {
                display_name: "Prédio 30".into(),
            },
        }
    }

    #[tokio::test]
    async fn serves_fixtures_and_counts_calls() {
        let svc = MemoryDataService::new();
        svc.set_rooms(vec![room()]).await;
        assert_eq!(svc.rooms().await.unwrap(), vec![room()]);
        assert_eq!(svc.calls(Endpoint::Rooms).await, 1);
        assert_eq!(svc.calls(Endpoint::Buildings).await, 0);
    }

    #[tokio::test]
    async fn injected_failures_can_recover() {
        let svc = MemoryDataService::new();
        svc.fail(Endpoint::Companies).await;
        let err = svc.companies().await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable { .. }));
        svc.recover(Endpoint::Companies).await;
        assert!(svc.companies().await.unwrap().is_empty());
        assert_eq!(svc.calls(Endpoint::Companies).await, 2);
    }

    #[tokio::test]
    async fn routes_come_from_the_responder() {
        let svc = MemoryDataService::new().with_route_responder(|req| {
            assert_eq!(req.destination_building_name, "Prédio 30");
            Ok(RouteGeometry {
                path: vec![LngLat::new(-51.17, -30.06)],
            })
        });
        let req = PathRequest {
            start: Coordinate::new(-30.0, -51.0),
            destination_building_name: "Prédio 30".into(),
        };
        let route = svc.calculate_path(req.clone()).await.unwrap();
        assert_eq!(route.path.len(), 1);
        assert_eq!(svc.path_requests().await, vec![req]);
    }
}
