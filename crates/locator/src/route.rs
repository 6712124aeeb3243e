//! Route requests from the fixed entry point to a selected destination.

use catalog::{Building, Category, Company, Room};
use foundation::{Coordinate, GeoBounds};
use service::{DataService, PathRequest, RouteGeometry, ServiceError};

use crate::config::LocatorConfig;
use crate::notice::Notice;

/// Where the user is relative to the campus geofence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartZone {
    Inside,
    Outside,
    Unknown,
}

/// Something the user can ask to be routed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Building(Building),
    Company(Company),
    Room(Room),
}

impl Destination {
    pub fn category(&self) -> Category {
        match self {
            Destination::Building(_) => Category::Building,
            Destination::Company(_) => Category::Company,
            Destination::Room(_) => Category::Room,
        }
    }

    /// Building display name sent to the route service, if there is one.
    pub fn building_name(&self) -> Option<&str> {
        let name = match self {
            Destination::Building(b) => b.display_name.as_str(),
            Destination::Company(c) => return c.building_name(),
            Destination::Room(r) => r.building.display_name.as_str(),
        };
        (!name.is_empty()).then_some(name)
    }
}

impl From<Building> for Destination {
    fn from(b: Building) -> Self {
        Destination::Building(b)
    }
}

impl From<Company> for Destination {
    fn from(c: Company) -> Self {
        Destination::Company(c)
    }
}

impl From<Room> for Destination {
    fn from(r: Room) -> Self {
        Destination::Room(r)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no building is known for {category} destination")]
    BuildingNotFound { category: Category },
    #[error("route to {destination} failed: {source}")]
    Service {
        category: Category,
        destination: String,
        #[source]
        source: ServiceError,
    },
}

impl RouteError {
    pub fn notice(&self) -> Notice {
        match self {
            RouteError::BuildingNotFound { category } => Notice::BuildingNotFound(*category),
            RouteError::Service { category, .. } => Notice::RouteFailed(*category),
        }
    }
}

/// Builds and issues route requests.
///
/// Every route starts at the configured entry. The user's position only
/// selects which diagnostic is logged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteOrchestrator {
    entry: Coordinate,
    geofence: GeoBounds,
}

impl RouteOrchestrator {
    pub fn new(entry: Coordinate, geofence: GeoBounds) -> Self {
        Self { entry, geofence }
    }

    pub fn from_config(config: &LocatorConfig) -> Self {
        Self::new(config.entry_position, config.geofence)
    }

    pub fn entry(&self) -> Coordinate {
        self.entry
    }

    pub fn zone(&self, user: Option<Coordinate>) -> StartZone {
        match user {
            Some(p) if self.geofence.contains(p) => StartZone::Inside,
            Some(_) => StartZone::Outside,
            None => StartZone::Unknown,
        }
    }

    /// Always the entry coordinate, whatever `user` is.
    pub fn resolve_start_position(&self, user: Option<Coordinate>) -> Coordinate {
        match self.zone(user) {
            StartZone::Inside => {
                tracing::info!("user inside campus; routing from the entry")
            }
            StartZone::Outside | StartZone::Unknown => {
                tracing::warn!("user outside campus or position unknown; routing from the entry")
            }
        }
        self.entry
    }

    pub fn prepare(
        &self,
        destination: &Destination,
        user: Option<Coordinate>,
    ) -> Result<PathRequest, RouteError> {
        let Some(name) = destination.building_name() else {
            return Err(RouteError::BuildingNotFound {
                category: destination.category(),
            });
        };
        Ok(PathRequest {
            start: self.resolve_start_position(user),
            destination_building_name: name.to_string(),
        })
    }

    /// Issues exactly one route computation. No retry, no dedup.
    pub async fn request_route(
        &self,
        service: &dyn DataService,
        destination: &Destination,
        user: Option<Coordinate>,
    ) -> Result<RouteGeometry, RouteError> {
        let request = self.prepare(destination, user)?;
        let name = request.destination_building_name.clone();
        tracing::info!(destination = %name, "requesting route");
        match service.calculate_path(request).await {
            Ok(route) => {
                tracing::info!(destination = %name, points = route.path.len(), "route received");
                Ok(route)
            }
            Err(source) => {
                tracing::error!(destination = %name, error = %source, "route request failed");
                Err(RouteError::Service {
                    category: destination.category(),
                    destination: name,
                    source,
                })
            }
        }
    }
}
