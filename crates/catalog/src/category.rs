use serde::{Deserialize, Serialize};

/// The five browsable entity kinds, in button order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Building,
    Company,
    Room,
    Area,
    Product,
}

/// Where a category's catalog comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Read straight from the data service.
    Fetched,
    /// Computed from another category's catalog.
    Derived { from: Category },
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Building,
        Category::Company,
        Category::Room,
        Category::Area,
        Category::Product,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Building => "Prédio",
            Category::Company => "Empresa",
            Category::Room => "Sala",
            Category::Area => "Área",
            Category::Product => "Produto",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Building => "🏢",
            Category::Company => "💼",
            Category::Room => "🚪",
            Category::Area => "🧩",
            Category::Product => "📦",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn source(self) -> CatalogSource {
        match self {
            Category::Building | Category::Company | Category::Room => CatalogSource::Fetched,
            Category::Area | Category::Product => CatalogSource::Derived {
                from: Category::Company,
            },
        }
    }

    /// Categories that open a second level of related companies.
    pub fn supports_drilldown(self) -> bool {
        matches!(self, Category::Area | Category::Product)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogSource, Category};

    #[test]
    fn labels_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("Area"), None);
    }

    #[test]
    fn derived_categories_depend_on_companies() {
        assert_eq!(Category::Room.source(), CatalogSource::Fetched);
        assert_eq!(
            Category::Product.source(),
            CatalogSource::Derived {
                from: Category::Company
            }
        );
        assert!(Category::Area.supports_drilldown());
        assert!(!Category::Company.supports_drilldown());
    }
}
