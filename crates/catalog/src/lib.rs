pub mod category;
pub mod filter;
pub mod model;
pub mod store;

pub use category::*;
pub use filter::{TextQuery, normalize};
pub use model::*;
pub use store::*;

/// A catalog could not be populated. Recoverable: the catalog stays empty
/// and the next selection of the category retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to load {category} catalog: {reason}")]
    LoadFailed { category: Category, reason: String },
}

impl CatalogError {
    pub fn category(&self) -> Category {
        match self {
            CatalogError::LoadFailed { category, .. } => *category,
        }
    }
}
