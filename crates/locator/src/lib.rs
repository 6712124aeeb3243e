//! Interaction core of the campus venue locator.
//!
//! A [`LocatorSession`] owns the browsing state of one user: the active
//! category and its search text, lazily loaded catalogs, the product/area
//! drill-down, the draggable bottom panel and route requests. Hosts feed it
//! pointer, viewport and selection input and listen to [`LocatorEvent`]s.

pub mod config;
pub mod drilldown;
pub mod event;
pub mod geolocation;
pub mod map_view;
pub mod notice;
pub mod panel;
pub mod route;
pub mod scroll_lock;
pub mod session;

pub use config::{ConfigError, LocatorConfig};
pub use drilldown::{BrowseSelection, DrillDownNavigator, DrillItem, DrillState, ScrollContainer};
pub use event::LocatorEvent;
pub use geolocation::{GeolocationError, GeolocationProbe, GeolocationProvider};
pub use map_view::MapViewModel;
pub use notice::Notice;
pub use panel::{PanelGestureController, PointerCapture, PointerId, SnapPoints, Transition};
pub use route::{Destination, RouteError, RouteOrchestrator, StartZone};
pub use scroll_lock::{ScrollLock, ScrollLockTarget};
pub use session::{HostBindings, LocatorSession, PanelList};
