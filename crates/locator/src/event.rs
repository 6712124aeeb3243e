use catalog::Category;
use foundation::Coordinate;
use service::RouteGeometry;

use crate::notice::Notice;
use crate::panel::Transition;

/// Everything the session reports to its host, in emission order.
///
/// Panel height changes are emitted on every change, including each drag
/// move, so the map can track the panel without lag.
#[derive(Debug, Clone, PartialEq)]
pub enum LocatorEvent {
    PanelHeightChanged { height: f64, transition: Transition },
    /// `None` clears the displayed route.
    RouteChanged(Option<RouteGeometry>),
    UserPositionChanged(Option<Coordinate>),
    LoadingChanged(bool),
    CatalogLoaded(Category),
    ScrollRestored(f64),
    Notice(Notice),
}
