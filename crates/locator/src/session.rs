//! The browsing session: category selection, catalogs, search, drill-down,
//! panel gestures and route requests behind one cloneable handle.
//!
//! All state lives behind a single mutex that is never held across an
//! `.await`. The only suspension points are the position read, catalog
//! fetches and route requests; while those are pending the host keeps
//! calling the synchronous operations (drag, search, back).
//!
//! Results of a fetch are stored under the category that requested it even
//! if the user has since switched away. Overlapping fetches share the one
//! loading flag, and the last to finish clears it. Overlapping route
//! requests are not deduplicated; the last response wins.

use std::sync::Arc;

use catalog::{
    Area, Building, CatalogError, Catalogs, Category, Company, Product, Room, TextQuery,
};
use foundation::Coordinate;
use parking_lot::Mutex;
use runtime::EventBus;
use service::{DataService, RouteGeometry, ServiceError};

use crate::config::{ConfigError, LocatorConfig};
use crate::drilldown::{
    BrowseSelection, DrillDownNavigator, DrillItem, NoScrollContainer, ScrollContainer,
};
use crate::event::LocatorEvent;
use crate::geolocation::GeolocationProbe;
use crate::notice::Notice;
use crate::panel::{
    NoPointerCapture, PanelGestureController, PointerCapture, PointerId, SnapPoints, Transition,
};
use crate::route::{Destination, RouteError, RouteOrchestrator};
use crate::scroll_lock::{NoScrollLock, ScrollLock, ScrollLockTarget};

/// Host primitives the session drives.
pub struct HostBindings {
    pub pointer_capture: Box<dyn PointerCapture>,
    pub scroll_lock: Box<dyn ScrollLockTarget>,
    pub scroll_container: Box<dyn ScrollContainer>,
}

impl Default for HostBindings {
    fn default() -> Self {
        Self {
            pointer_capture: Box::new(NoPointerCapture),
            scroll_lock: Box::new(NoScrollLock),
            scroll_container: Box::new(NoScrollContainer),
        }
    }
}

/// What the panel list shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelList {
    /// No category selected yet.
    Idle,
    Loading,
    Buildings(Vec<Building>),
    Companies(Vec<Company>),
    Rooms(Vec<Room>),
    Areas(Vec<Area>),
    Products(Vec<Product>),
    Related {
        item: DrillItem,
        header: String,
        companies: Vec<Company>,
    },
}

impl PanelList {
    pub fn len(&self) -> usize {
        match self {
            PanelList::Idle | PanelList::Loading => 0,
            PanelList::Buildings(v) => v.len(),
            PanelList::Companies(v) => v.len(),
            PanelList::Rooms(v) => v.len(),
            PanelList::Areas(v) => v.len(),
            PanelList::Products(v) => v.len(),
            PanelList::Related { companies, .. } => companies.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct SessionState {
    category: Option<Category>,
    query: TextQuery,
    catalogs: Catalogs,
    navigator: DrillDownNavigator,
    panel: PanelGestureController,
    scroll: Box<dyn ScrollContainer>,
    loading: bool,
    route: Option<RouteGeometry>,
    user_position: Option<Coordinate>,
    located: bool,
    events: EventBus<LocatorEvent>,
}

impl SessionState {
    fn emit_height(&mut self, changed: Option<f64>) -> Option<f64> {
        if let Some(height) = changed {
            let transition = self.panel.transition();
            self.events
                .emit(LocatorEvent::PanelHeightChanged { height, transition });
        }
        changed
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.events.emit(LocatorEvent::LoadingChanged(loading));
        }
    }

    fn set_route(&mut self, route: Option<RouteGeometry>) {
        self.route = route.clone();
        self.events.emit(LocatorEvent::RouteChanged(route));
    }

    fn selection(&self) -> BrowseSelection {
        match (self.category, self.navigator.current()) {
            (None, _) => BrowseSelection::None,
            (Some(c), Some(item)) => BrowseSelection::Detail(c, item.clone()),
            (Some(c), None) => BrowseSelection::Category(c),
        }
    }

    fn visible_list(&self) -> PanelList {
        let Some(category) = self.category else {
            return PanelList::Idle;
        };
        if self.loading {
            return PanelList::Loading;
        }
        if let Some(item) = self.navigator.current() {
            return PanelList::Related {
                item: item.clone(),
                header: item.header(),
                companies: owned(item.related(self.catalogs.companies(), &self.query)),
            };
        }
        let q = &self.query;
        let c = &self.catalogs;
        match category {
            Category::Building => PanelList::Buildings(owned(q.filter(c.buildings()))),
            Category::Company => PanelList::Companies(owned(q.filter(c.companies()))),
            Category::Room => PanelList::Rooms(owned(q.filter(c.rooms()))),
            Category::Area => PanelList::Areas(owned(q.filter(c.areas()))),
            Category::Product => PanelList::Products(owned(q.filter(c.products()))),
        }
    }
}

#[derive(Clone)]
pub struct LocatorSession {
    state: Arc<Mutex<SessionState>>,
    service: Arc<dyn DataService>,
    router: RouteOrchestrator,
    geolocation: GeolocationProbe,
}

impl std::fmt::Debug for LocatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LocatorSession")
            .field("category", &state.category)
            .field("search", &state.query.raw())
            .field("loading", &state.loading)
            .field("panel", &state.panel)
            .field("router", &self.router)
            .finish()
    }
}

impl LocatorSession {
    /// Fails if `config` does not pass [`LocatorConfig::validate`].
    pub fn new(
        config: &LocatorConfig,
        service: Arc<dyn DataService>,
        host: HostBindings,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let panel = PanelGestureController::new(
            SnapPoints::new(config.snap_fractions.clone()),
            config.scroll_lock_margin_px,
            config.snap_animation_ms,
            host.pointer_capture,
            ScrollLock::new(host.scroll_lock),
        );
        let state = SessionState {
            category: None,
            query: TextQuery::default(),
            catalogs: Catalogs::new(),
            navigator: DrillDownNavigator::new(),
            panel,
            scroll: host.scroll_container,
            loading: false,
            route: None,
            user_position: None,
            located: false,
            events: EventBus::new(),
        };
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            service,
            router: RouteOrchestrator::from_config(config),
            geolocation: GeolocationProbe::unsupported(),
        })
    }

    pub fn with_geolocation(mut self, probe: GeolocationProbe) -> Self {
        self.geolocation = probe;
        self
    }

    fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut *state)
    }

    // --- events -----------------------------------------------------------

    /// Subscribers run inline with the emitting call and must not call back
    /// into the session.
    pub fn subscribe(&self, handler: impl FnMut(&LocatorEvent) + Send + 'static) {
        self.with(|s| s.events.subscribe(handler));
    }

    pub fn drain_events(&self) -> Vec<LocatorEvent> {
        self.with(|s| s.events.drain())
    }

    // --- snapshots --------------------------------------------------------

    pub fn selection(&self) -> BrowseSelection {
        self.with(|s| s.selection())
    }

    pub fn search(&self) -> String {
        self.with(|s| s.query.raw().to_string())
    }

    pub fn is_loading(&self) -> bool {
        self.with(|s| s.loading)
    }

    pub fn route(&self) -> Option<RouteGeometry> {
        self.with(|s| s.route.clone())
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.with(|s| s.user_position)
    }

    pub fn is_catalog_loaded(&self, category: Category) -> bool {
        self.with(|s| s.catalogs.is_loaded(category))
    }

    pub fn visible_list(&self) -> PanelList {
        self.with(|s| s.visible_list())
    }

    pub fn panel_height(&self) -> f64 {
        self.with(|s| s.panel.height())
    }

    pub fn panel_transition(&self) -> Transition {
        self.with(|s| s.panel.transition())
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.with(|s| s.panel.is_scroll_locked())
    }

    // --- browsing ---------------------------------------------------------

    /// Switches the active category, clearing search, drill-down and route,
    /// then loads the category's catalog if needed.
    ///
    /// A load failure has already been reported as a notice when this
    /// returns `Err`.
    pub async fn select_category(&self, category: Category) -> Result<(), CatalogError> {
        self.with(|s| {
            tracing::debug!(%category, "select category");
            s.category = Some(category);
            s.navigator.reset(category);
            s.query = TextQuery::default();
            s.set_route(None);
        });
        self.ensure(category).await
    }

    /// Loads `category` unless it is already loaded. Derived catalogs load
    /// companies first when needed.
    pub async fn ensure(&self, category: Category) -> Result<(), CatalogError> {
        if self.with(|s| s.catalogs.is_loaded(category)) {
            return Ok(());
        }
        self.with(|s| s.set_loading(true));
        let result = self.load(category).await;
        self.with(|s| {
            s.set_loading(false);
            if let Err(err) = &result {
                tracing::error!(error = %err, "catalog load failed");
                s.events
                    .emit(LocatorEvent::Notice(Notice::CatalogLoadFailed(category)));
            }
        });
        result
    }

    /// Drops a loaded catalog so the next selection fetches it again.
    pub fn clear_catalog(&self, category: Category) {
        self.with(|s| s.catalogs.clear(category));
    }

    async fn load(&self, category: Category) -> Result<(), CatalogError> {
        match Catalogs::dependency(category) {
            None => self.fetch(category).await.map_err(|e| failed(category, e)),
            Some(dependency) => {
                if !self.with(|s| s.catalogs.is_loaded(dependency)) {
                    self.fetch(dependency)
                        .await
                        .map_err(|e| failed(category, e))?;
                }
                self.with(|s| {
                    if s.catalogs.derive(category) {
                        tracing::debug!(%category, count = s.catalogs.len(category), "derived catalog");
                        s.events.emit(LocatorEvent::CatalogLoaded(category));
                        Ok(())
                    } else {
                        Err(CatalogError::LoadFailed {
                            category,
                            reason: format!("{dependency} catalog is not loaded"),
                        })
                    }
                })
            }
        }
    }

    async fn fetch(&self, category: Category) -> Result<(), ServiceError> {
        tracing::debug!(%category, "fetching catalog");
        match category {
            Category::Building => {
                let items = self.service.buildings().await?;
                self.with(|s| s.catalogs.set_buildings(items));
            }
            Category::Company => {
                let items = self.service.companies().await?;
                self.with(|s| s.catalogs.set_companies(items));
            }
            Category::Room => {
                let items = self.service.rooms().await?;
                self.with(|s| s.catalogs.set_rooms(items));
            }
            Category::Area | Category::Product => return Ok(()),
        }
        self.with(|s| {
            tracing::info!(%category, count = s.catalogs.len(category), "catalog loaded");
            s.events.emit(LocatorEvent::CatalogLoaded(category));
        });
        Ok(())
    }

    pub fn set_search(&self, text: impl Into<String>) {
        let query = TextQuery::new(text);
        self.with(|s| s.query = query);
    }

    /// Opens the related companies of a product or area. Ignored unless
    /// the item belongs to the active category.
    pub fn enter_item(&self, item: impl Into<DrillItem>) -> bool {
        let item = item.into();
        self.with(|s| {
            if s.category != Some(item.category()) {
                return false;
            }
            let offset = s.scroll.scroll_top();
            s.navigator.enter(item, offset);
            true
        })
    }

    pub fn back(&self) -> bool {
        self.with(|s| s.navigator.back())
    }

    /// Runs work deferred to the next tick. Call after the host has laid
    /// out the current list. Returns the restored scroll offset, if any.
    pub fn tick(&self) -> Option<f64> {
        self.with(|s| {
            let offset = s.navigator.run_deferred()?;
            s.scroll.set_scroll_top(offset);
            s.events.emit(LocatorEvent::ScrollRestored(offset));
            Some(offset)
        })
    }

    // --- panel ------------------------------------------------------------

    pub fn measure_viewport(&self, viewport_height: f64) -> Option<f64> {
        self.with(|s| {
            let changed = s.panel.measure_viewport(viewport_height);
            s.emit_height(changed)
        })
    }

    pub fn drag_start(&self, pointer: PointerId, pointer_y: f64) -> bool {
        self.with(|s| s.panel.drag_start(pointer, pointer_y))
    }

    pub fn drag_move(&self, pointer: PointerId, pointer_y: f64) -> Option<f64> {
        self.with(|s| {
            let changed = s.panel.drag_move(pointer, pointer_y);
            s.emit_height(changed)
        })
    }

    pub fn drag_end(&self, pointer: PointerId) -> Option<f64> {
        self.with(|s| {
            let changed = s.panel.drag_end(pointer);
            s.emit_height(changed)
        })
    }

    pub fn drag_cancel(&self, pointer: PointerId) -> Option<f64> {
        self.with(|s| {
            let changed = s.panel.drag_cancel(pointer);
            s.emit_height(changed)
        })
    }

    // --- position and routes ----------------------------------------------

    /// Reads the user's position once per session. Later calls return the
    /// first result without reading again.
    pub async fn locate_user(&self) -> Option<Coordinate> {
        let first = self.with(|s| !std::mem::replace(&mut s.located, true));
        if !first {
            return self.user_position();
        }
        let position = self.geolocation.probe().await;
        self.with(|s| {
            s.user_position = position;
            s.events.emit(LocatorEvent::UserPositionChanged(position));
        });
        position
    }

    /// Requests a route to `destination` and publishes the outcome.
    ///
    /// Success shows the route and collapses the panel to reveal the map.
    /// Any failure clears the route, raises a notice and leaves the panel
    /// where it is.
    pub async fn request_route(
        &self,
        destination: impl Into<Destination>,
    ) -> Result<RouteGeometry, RouteError> {
        let destination = destination.into();
        let user = self.user_position();
        let result = self
            .router
            .request_route(self.service.as_ref(), &destination, user)
            .await;
        self.with(|s| match &result {
            Ok(route) => {
                s.set_route(Some(route.clone()));
                let changed = s.panel.snap_to_min();
                s.emit_height(changed);
            }
            Err(err) => {
                if let RouteError::BuildingNotFound { .. } = err {
                    tracing::warn!(error = %err, "route not requested");
                }
                s.set_route(None);
                s.events.emit(LocatorEvent::Notice(err.notice()));
            }
        });
        result
    }
}

fn owned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

fn failed(category: Category, err: ServiceError) -> CatalogError {
    CatalogError::LoadFailed {
        category,
        reason: err.to_string(),
    }
}
