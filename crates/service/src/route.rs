use foundation::{Coordinate, LngLat};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of a route computation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    pub start: Coordinate,
    pub destination_building_name: String,
}

/// Route as returned by the routing service, points in `[lng, lat]` order.
///
/// A missing or `null` `path` decodes as an empty route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: Vec<LngLat>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LngLat>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LngLat>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RouteGeometry {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Points converted to `(lat, lng)` order for drawing.
    pub fn to_coordinates(&self) -> Vec<Coordinate> {
        self.path.iter().map(|p| p.to_coordinate()).collect()
    }
}
