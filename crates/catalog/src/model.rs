use serde::{Deserialize, Serialize};

/// Anything listed in the panel: it has a stable key, a title, and the text
/// the search box is matched against.
pub trait CatalogItem {
    fn key(&self) -> &str;
    fn title(&self) -> String;
    /// Space-joined searchable fields, before normalization.
    fn search_text(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wing {
    pub code: String,
    /// Opaque to the locator; passed through for the map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    /// `0` means the building is known by name only.
    pub number: u32,
    pub campus: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub wings: Vec<Wing>,
}

impl Building {
    pub fn wing_codes(&self) -> Option<String> {
        if self.wings.is_empty() {
            return None;
        }
        Some(
            self.wings
                .iter()
                .map(|w| w.code.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl CatalogItem for Building {
    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        if self.number == 0 {
            self.display_name.clone()
        } else {
            format!("Prédio {}", self.number)
        }
    }

    fn search_text(&self) -> String {
        format!("prédio {} {} {}", self.number, self.campus, self.display_name)
    }
}

/// Reference to the building an entity lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRef {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCategory {
    pub name: String,
    #[serde(default)]
    pub sub_category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub category: CompanyCategory,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub building: Option<BuildingRef>,
}

impl Company {
    /// Label shown above the product list, if there is one.
    pub fn products_label(&self) -> Option<&'static str> {
        match self.products.len() {
            0 => None,
            1 => Some("Produto:"),
            _ => Some("Produtos:"),
        }
    }

    pub fn building_name(&self) -> Option<&str> {
        self.building
            .as_ref()
            .map(|b| b.display_name.as_str())
            .filter(|n| !n.is_empty())
    }
}

impl CatalogItem for Company {
    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        let building = self
            .building
            .as_ref()
            .map(|b| b.display_name.as_str())
            .unwrap_or("");
        format!(
            "{} {} {} {}",
            self.name, self.category.name, self.category.sub_category, building
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub identifier: String,
    pub building: BuildingRef,
}

impl CatalogItem for Room {
    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        format!("Sala {}", self.identifier)
    }

    fn search_text(&self) -> String {
        format!("sala {} {}", self.identifier, self.building.display_name)
    }
}

/// One distinct company category. Derived, never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
}

impl Area {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }

    /// Exact match on the category name.
    pub fn relates_to(&self, company: &Company) -> bool {
        company.category.name == self.name
    }

    pub fn header(&self) -> String {
        format!("Empresas em: {}", self.name)
    }
}

impl CatalogItem for Area {
    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// One distinct product name across all companies. Derived, never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
}

impl Product {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }

    /// Exact match against the company's product list.
    pub fn relates_to(&self, company: &Company) -> bool {
        company.products.iter().any(|p| *p == self.name)
    }

    pub fn header(&self) -> String {
        format!("Empresas com: {}", self.name)
    }
}

impl CatalogItem for Product {
    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn company(name: &str, area: &str, products: &[&str], building: Option<&str>) -> Company {
        Company {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: CompanyCategory {
                name: area.to_string(),
                sub_category: "Software".to_string(),
            },
            products: products.iter().map(|p| p.to_string()).collect(),
            building: building.map(|b| BuildingRef {
                display_name: b.to_string(),
            }),
        }
    }

    #[test]
    fn building_title_depends_on_number() {
        let mut b = Building {
            id: "b1".into(),
            number: 32,
            campus: "Tecnopuc".into(),
            display_name: "Prédio 32".into(),
            wings: vec![],
        };
        assert_eq!(b.title(), "Prédio 32");
        b.number = 0;
        b.display_name = "Global".into();
        assert_eq!(b.title(), "Global");
        assert_eq!(b.search_text(), "prédio 0 Tecnopuc Global");
        assert_eq!(b.wing_codes(), None);
    }

    #[test]
    fn building_wing_codes_are_joined() {
        let b = Building {
            id: "b2".into(),
            number: 99,
            campus: "Tecnopuc".into(),
            display_name: "Prédio 99".into(),
            wings: vec![
                Wing { code: "A".into(), centroid: None },
                Wing { code: "B".into(), centroid: None },
            ],
        };
        assert_eq!(b.wing_codes().as_deref(), Some("A, B"));
    }

    #[test]
    fn company_search_text_tolerates_missing_building() {
        let c = company("Acme", "TI", &[], None);
        assert_eq!(c.search_text(), "Acme TI Software ");
        assert_eq!(c.building_name(), None);
        assert_eq!(c.products_label(), None);
    }

    #[test]
    fn company_product_label_pluralizes() {
        assert_eq!(company("A", "TI", &["x"], None).products_label(), Some("Produto:"));
        assert_eq!(
            company("A", "TI", &["x", "y"], None).products_label(),
            Some("Produtos:")
        );
    }

    #[test]
    fn empty_building_name_is_unresolvable() {
        let c = company("Acme", "TI", &[], Some(""));
        assert_eq!(c.building_name(), None);
        let c = company("Acme", "TI", &[], Some("Prédio 99A"));
        assert_eq!(c.building_name(), Some("Prédio 99A"));
    }

    #[test]
    fn drilldown_relations_use_exact_strings() {
        let c = company("Acme", "Saúde", &["Café"], None);
        assert!(Product::named("Café").relates_to(&c));
        assert!(!Product::named("café").relates_to(&c));
        assert!(Area::named("Saúde").relates_to(&c));
        assert!(!Area::named("Saude").relates_to(&c));
    }

    #[test]
    fn deserializes_service_payloads() {
        let json = r#"[{"id":"1","name":"Acme","category":{"name":"TI","subCategory":"Dev"},
            "products":["App"],"building":{"displayName":"Prédio 32"}},
            {"id":"2","name":"Solo","category":{"name":"TI","subCategory":"Ops"},"building":null}]"#;
        let companies: Vec<Company> = serde_json::from_str(json).unwrap();
        assert_eq!(companies[0].building_name(), Some("Prédio 32"));
        assert!(companies[1].products.is_empty());
        assert!(companies[1].building.is_none());

        let room: Room = serde_json::from_str(
            r#"{"id":"r","identifier":"101","building":{"displayName":"Prédio 30"}}"#,
        )
        .unwrap();
        assert_eq!(room.title(), "Sala 101");
        assert_eq!(room.search_text(), "sala 101 Prédio 30");
    }
}
