//! Menu categories.

use serde::{Deserialize, Serialize};

/// Menu section a catalog entry belongs to.
///
/// The order of variants here is the order sections appear on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    ClassicPizzas,
    SpecialtyPizzas,
    Sides,
    Drinks,
}

impl Category {
    /// Human-readable section heading.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ClassicPizzas => "Classic Pizzas",
            Self::SpecialtyPizzas => "Specialty Pizzas",
            Self::Sides => "Sides",
            Self::Drinks => "Drinks",
        }
    }

    /// All categories in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::ClassicPizzas,
            Self::SpecialtyPizzas,
            Self::Sides,
            Self::Drinks,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Category::ClassicPizzas.label(), "Classic Pizzas");
        assert_eq!(Category::Drinks.to_string(), "Drinks");
    }

    #[test]
    fn test_all_is_menu_order() {
        let all = Category::all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], Category::ClassicPizzas);
        assert_eq!(all[3], Category::Drinks);
    }
}
