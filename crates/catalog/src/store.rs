use std::collections::{BTreeSet, HashSet};

use crate::category::{CatalogSource, Category};
use crate::filter::normalize;
use crate::model::{Area, Building, Company, Product, Room};

#[derive(Debug, Clone)]
struct Slot<T> {
    items: Vec<T>,
    loaded: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
        }
    }
}

impl<T> Slot<T> {
    fn fill(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
    }

    fn reset(&mut self) {
        self.items.clear();
        self.loaded = false;
    }
}

/// In-memory catalogs for one browsing session.
///
/// A catalog is "loaded" once it has been filled successfully; a loaded
/// catalog is never refilled until [`Catalogs::clear`] resets it. Derived
/// catalogs (areas, products) are computed from the company catalog and are
/// reset together with it.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    buildings: Slot<Building>,
    companies: Slot<Company>,
    rooms: Slot<Room>,
    areas: Slot<Area>,
    products: Slot<Product>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, category: Category) -> bool {
        match category {
            Category::Building => self.buildings.loaded,
            Category::Company => self.companies.loaded,
            Category::Room => self.rooms.loaded,
            Category::Area => self.areas.loaded,
            Category::Product => self.products.loaded,
        }
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Building => self.buildings.items.len(),
            Category::Company => self.companies.items.len(),
            Category::Room => self.rooms.items.len(),
            Category::Area => self.areas.items.len(),
            Category::Product => self.products.items.len(),
        }
    }

    /// The catalog that must be loaded before `category` can be derived.
    pub fn dependency(category: Category) -> Option<Category> {
        match category.source() {
            CatalogSource::Fetched => None,
            CatalogSource::Derived { from } => Some(from),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings.items
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies.items
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms.items
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas.items
    }

    pub fn products(&self) -> &[Product] {
        &self.products.items
    }

    pub fn set_buildings(&mut self, items: Vec<Building>) {
        self.buildings.fill(items);
    }

    pub fn set_companies(&mut self, items: Vec<Company>) {
        self.companies.fill(items);
    }

    pub fn set_rooms(&mut self, items: Vec<Room>) {
        self.rooms.fill(items);
    }

    /// Computes a derived catalog from its dependency.
    ///
    /// Returns `false` (and leaves the catalog untouched) when `category` is
    /// not derived or its dependency is not loaded yet.
    pub fn derive(&mut self, category: Category) -> bool {
        if !self.companies.loaded {
            return false;
        }
        match category {
            Category::Area => {
                let areas = derive_areas(&self.companies.items);
                self.areas.fill(areas);
                true
            }
            Category::Product => {
                let products = derive_products(&self.companies.items);
                self.products.fill(products);
                true
            }
            _ => false,
        }
    }

    /// Drops a catalog so the next `ensure` loads it again.
    ///
    /// Clearing companies also clears every catalog derived from them.
    pub fn clear(&mut self, category: Category) {
        match category {
            Category::Building => self.buildings.reset(),
            Category::Room => self.rooms.reset(),
            Category::Area => self.areas.reset(),
            Category::Product => self.products.reset(),
            Category::Company => {
                self.companies.reset();
                self.areas.reset();
                self.products.reset();
            }
        }
    }
}

/// One area per distinct company category name, sorted.
pub fn derive_areas(companies: &[Company]) -> Vec<Area> {
    companies
        .iter()
        .map(|c| c.category.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(Area::named)
        .collect()
}

/// One product per distinct name across all companies, sorted.
///
/// Names that differ only by case or diacritics collapse into the first
/// spelling encountered.
pub fn derive_products(companies: &[Company]) -> Vec<Product> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = companies
        .iter()
        .flat_map(|c| c.products.iter())
        .filter(|name| seen.insert(normalize(name)))
        .cloned()
        .collect();
    names.sort();
    names.into_iter().map(Product::named).collect()
}
