//! Two-level browsing for products and areas.

use catalog::{Area, CatalogItem, Category, Company, Product, TextQuery};
use runtime::DeferredQueue;

/// Host list container whose scroll offset survives drill-down round trips.
pub trait ScrollContainer: Send {
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, offset: f64);
}

/// A host without a scrollable list. Always reports offset zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScrollContainer;

impl ScrollContainer for NoScrollContainer {
    fn scroll_top(&self) -> f64 {
        0.0
    }

    fn set_scroll_top(&mut self, _offset: f64) {}
}

/// The item whose related companies are being listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillItem {
    Product(Product),
    Area(Area),
}

impl DrillItem {
    pub fn category(&self) -> Category {
        match self {
            DrillItem::Product(_) => Category::Product,
            DrillItem::Area(_) => Category::Area,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DrillItem::Product(p) => &p.name,
            DrillItem::Area(a) => &a.name,
        }
    }

    pub fn header(&self) -> String {
        match self {
            DrillItem::Product(p) => p.header(),
            DrillItem::Area(a) => a.header(),
        }
    }

    pub fn relates_to(&self, company: &Company) -> bool {
        match self {
            DrillItem::Product(p) => p.relates_to(company),
            DrillItem::Area(a) => a.relates_to(company),
        }
    }

    /// Related companies whose *name* matches `query`.
    pub fn related<'a>(&self, companies: &'a [Company], query: &TextQuery) -> Vec<&'a Company> {
        companies
            .iter()
            .filter(|c| self.relates_to(c) && query.matches_text(&c.name))
            .collect()
    }
}

impl From<Product> for DrillItem {
    fn from(p: Product) -> Self {
        DrillItem::Product(p)
    }
}

impl From<Area> for DrillItem {
    fn from(a: Area) -> Self {
        DrillItem::Area(a)
    }
}

impl CatalogItem for DrillItem {
    fn key(&self) -> &str {
        match self {
            DrillItem::Product(p) => p.key(),
            DrillItem::Area(a) => a.key(),
        }
    }

    fn title(&self) -> String {
        self.name().to_string()
    }

    fn search_text(&self) -> String {
        self.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrillState {
    #[default]
    Listing,
    Detail(DrillItem),
}

/// What the panel is currently browsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowseSelection {
    #[default]
    None,
    Category(Category),
    Detail(Category, DrillItem),
}

impl BrowseSelection {
    pub fn category(&self) -> Option<Category> {
        match self {
            BrowseSelection::None => None,
            BrowseSelection::Category(c) | BrowseSelection::Detail(c, _) => Some(*c),
        }
    }

    pub fn drill_item(&self) -> Option<&DrillItem> {
        match self {
            BrowseSelection::Detail(_, item) => Some(item),
            _ => None,
        }
    }
}

/// Listing / detail state machine with a single saved scroll offset.
///
/// Entering a detail view captures the list offset. Going back, or landing
/// on a product or area listing, schedules a restore of that offset for the
/// next tick so the host has laid the listing out first.
#[derive(Debug, Default)]
pub struct DrillDownNavigator {
    state: DrillState,
    saved_offset: f64,
    restores: DeferredQueue<f64>,
}

impl DrillDownNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn current(&self) -> Option<&DrillItem> {
        match &self.state {
            DrillState::Detail(item) => Some(item),
            DrillState::Listing => None,
        }
    }

    pub fn saved_offset(&self) -> f64 {
        self.saved_offset
    }

    pub fn has_pending_restore(&self) -> bool {
        !self.restores.is_empty()
    }

    /// Opens the related-company list for `item`, remembering
    /// `current_offset` in the single slot.
    pub fn enter(&mut self, item: DrillItem, current_offset: f64) {
        self.saved_offset = current_offset;
        tracing::debug!(item = item.name(), offset = current_offset, "drill down");
        self.state = DrillState::Detail(item);
    }

    /// Returns to the listing. No-op when already listing.
    pub fn back(&mut self) -> bool {
        if matches!(self.state, DrillState::Listing) {
            return false;
        }
        self.state = DrillState::Listing;
        self.restores.defer(self.saved_offset);
        true
    }

    /// Resets to the listing after the active category changed.
    pub fn reset(&mut self, category: Category) {
        self.state = DrillState::Listing;
        if category.supports_drilldown() {
            self.restores.defer(self.saved_offset);
        }
    }

    /// Advances one tick. Returns the offset to apply if a restore became
    /// due; when several were queued the newest wins.
    pub fn run_deferred(&mut self) -> Option<f64> {
        self.restores.advance().pop()
    }
}
