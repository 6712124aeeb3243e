//! Map-side state derived from locator events.
//!
//! The core never reads rendering state back; this model is what a map
//! renderer would draw from.

use foundation::{Coordinate, GeoBounds};

use crate::config::LocatorConfig;
use crate::event::LocatorEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct MapViewModel {
    route: Vec<Coordinate>,
    route_bounds: Option<GeoBounds>,
    user_position: Option<Coordinate>,
    panel_height: f64,
    center: Coordinate,
    recenter_margin_px: f64,
}

impl MapViewModel {
    pub fn new(config: &LocatorConfig) -> Self {
        Self {
            route: Vec::new(),
            route_bounds: None,
            user_position: None,
            panel_height: 0.0,
            center: config.map_center,
            recenter_margin_px: config.recenter_margin_px,
        }
    }

    /// Route polyline in `(lat, lng)` order.
    pub fn route(&self) -> &[Coordinate] {
        &self.route
    }

    /// Camera fit for the current route.
    pub fn route_bounds(&self) -> Option<GeoBounds> {
        self.route_bounds
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    pub fn panel_height(&self) -> f64 {
        self.panel_height
    }

    /// Distance of the recenter control from the bottom edge, keeping it
    /// above the panel.
    pub fn recenter_offset(&self) -> f64 {
        self.panel_height + self.recenter_margin_px
    }

    pub fn recenter_target(&self) -> Coordinate {
        self.center
    }

    /// Returns `true` if the model changed.
    pub fn apply(&mut self, event: &LocatorEvent) -> bool {
        match event {
            LocatorEvent::PanelHeightChanged { height, .. } => {
                let changed = self.panel_height != *height;
                self.panel_height = *height;
                changed
            }
            LocatorEvent::RouteChanged(route) => {
                self.route = route
                    .as_ref()
                    .map(|r| r.to_coordinates())
                    .unwrap_or_default();
                self.route_bounds = GeoBounds::fit(self.route.iter().copied());
                true
            }
            LocatorEvent::UserPositionChanged(position) => {
                let changed = self.user_position != *position;
                self.user_position = *position;
                changed
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapViewModel;
    use crate::config::LocatorConfig;
    use crate::event::LocatorEvent;
    use crate::panel::Transition;
    use foundation::{Coordinate, LngLat};
    use pretty_assertions::assert_eq;
    use service::RouteGeometry;

    #[test]
    fn route_is_drawn_in_lat_lng_order() {
        let mut map = MapViewModel::new(&LocatorConfig::default());
        map.apply(&LocatorEvent::RouteChanged(Some(RouteGeometry {
            path: vec![LngLat::new(-51.17, -30.06), LngLat::new(-51.16, -30.05)],
        })));
        assert_eq!(
            map.route(),
            &[Coordinate::new(-30.06, -51.17), Coordinate::new(-30.05, -51.16)]
        );
        let bounds = map.route_bounds().unwrap();
        assert_eq!(bounds.south_west, Coordinate::new(-30.06, -51.17));
        assert_eq!(bounds.north_east, Coordinate::new(-30.05, -51.16));

        map.apply(&LocatorEvent::RouteChanged(None));
        assert!(map.route().is_empty());
        assert_eq!(map.route_bounds(), None);
    }

    #[test]
    fn empty_route_has_nothing_to_fit() {
        let mut map = MapViewModel::new(&LocatorConfig::default());
        map.apply(&LocatorEvent::RouteChanged(Some(RouteGeometry::default())));
        assert!(map.route().is_empty());
        assert_eq!(map.route_bounds(), None);
    }

    #[test]
    fn recenter_control_rides_above_the_panel() {
        let config = LocatorConfig::default();
        let mut map = MapViewModel::new(&config);
        assert!(map.apply(&LocatorEvent::PanelHeightChanged {
            height: 80.0,
            transition: Transition::Immediate,
        }));
        assert_eq!(map.recenter_offset(), 96.0);
        assert_eq!(map.recenter_target(), config.map_center);
        assert!(!map.apply(&LocatorEvent::LoadingChanged(true)));
    }
}
