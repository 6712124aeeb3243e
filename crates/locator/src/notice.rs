use catalog::Category;

/// User-facing message raised by a failed action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A destination of this category has no building to route to. No
    /// request was made.
    BuildingNotFound(Category),
    /// The route service failed for a destination of this category.
    RouteFailed(Category),
    /// A catalog could not be loaded; reselecting the category retries.
    CatalogLoadFailed(Category),
}

impl Notice {
    pub fn message(self) -> String {
        match self {
            Notice::BuildingNotFound(Category::Company) => {
                "A localização do prédio para esta empresa não foi encontrada.".to_string()
            }
            Notice::BuildingNotFound(Category::Room) => {
                "A localização do prédio para esta sala não foi encontrada.".to_string()
            }
            Notice::BuildingNotFound(_) => {
                "A localização deste prédio não foi encontrada.".to_string()
            }
            Notice::RouteFailed(Category::Company) => {
                "Ocorreu um erro ao calcular a rota para a empresa.".to_string()
            }
            Notice::RouteFailed(Category::Room) => {
                "Ocorreu um erro ao calcular a rota para a sala.".to_string()
            }
            Notice::RouteFailed(_) => "Ocorreu um erro ao calcular a rota.".to_string(),
            Notice::CatalogLoadFailed(category) => {
                format!("Não foi possível carregar a lista de {}.", category.label())
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
