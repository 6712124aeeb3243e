//! Locale-insensitive substring filtering over catalog items.
//!
//! Text is lowercased, canonically decomposed (NFD) and stripped of the
//! combining diacritical marks block (U+0300..=U+036F), so "Área" and "area"
//! compare equal.

use unicode_normalization::UnicodeNormalization;

use crate::model::CatalogItem;

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// A search query, normalized once and matched against many items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    raw: String,
    normalized: String,
}

impl TextQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        self.is_empty() || normalize(text).contains(&self.normalized)
    }

    pub fn matches<T: CatalogItem + ?Sized>(&self, item: &T) -> bool {
        self.matches_text(&item.search_text())
    }

    /// Items whose searchable fields contain the query, in input order.
    pub fn filter<'a, T: CatalogItem>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

pub fn matches<T: CatalogItem + ?Sized>(item: &T, query: &str) -> bool {
    TextQuery::new(query).matches(item)
}
