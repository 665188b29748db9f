//! Static menu catalog.
//!
//! The menu is fixed at startup: pizzas, sides, and drinks with their ids,
//! descriptions, and prices. There is no database behind it; the catalog is
//! the authoritative source the cart validates against.

use millbrook_core::{Category, ItemId, Price};

/// A static, read-only description of a purchasable item.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image path under `/static`, if the item has a photo.
    pub image: Option<String>,
    pub category: Category,
}

/// The full menu, ordered as it appears on the page.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// Shorthand for building one hardcoded entry. Prices are cents, so they
/// stay exact without parsing.
fn entry(
    id: i32,
    name: &str,
    description: &str,
    cents: i64,
    image: &str,
    category: Category,
) -> CatalogEntry {
    CatalogEntry {
        id: ItemId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_cents(cents).unwrap_or_else(|_| Price::zero()),
        image: Some(format!("images/{image}")),
        category,
    }
}

impl Catalog {
    /// Build the MillBrook Pizza menu.
    #[must_use]
    pub fn new() -> Self {
        use Category::{ClassicPizzas, Drinks, Sides, SpecialtyPizzas};

        let entries = vec![
            entry(
                1,
                "Classic Margherita",
                "Fresh mozzarella, tomato sauce, fresh basil",
                1299,
                "margherita.jpg",
                ClassicPizzas,
            ),
            entry(
                2,
                "Pepperoni",
                "Pepperoni, mozzarella, tomato sauce",
                1499,
                "pepperoni.jpg",
                ClassicPizzas,
            ),
            entry(
                3,
                "Meat Lovers",
                "Pepperoni, sausage, bacon, ham, mozzarella, tomato sauce",
                1699,
                "meat-lovers.jpg",
                SpecialtyPizzas,
            ),
            entry(
                4,
                "Veggie Supreme",
                "Bell peppers, onions, mushrooms, olives, tomatoes, mozzarella, tomato sauce",
                1599,
                "veggie.jpg",
                SpecialtyPizzas,
            ),
            entry(
                5,
                "BBQ Chicken",
                "Grilled chicken, red onions, cilantro, BBQ sauce, mozzarella",
                1699,
                "bbq-chicken.jpg",
                SpecialtyPizzas,
            ),
            entry(
                6,
                "Hawaiian",
                "Ham, pineapple, mozzarella, tomato sauce",
                1499,
                "hawaiian.jpg",
                ClassicPizzas,
            ),
            entry(
                7,
                "Buffalo Chicken",
                "Buffalo chicken, blue cheese, mozzarella, buffalo sauce drizzle",
                1699,
                "buffalo-chicken.jpg",
                SpecialtyPizzas,
            ),
            entry(
                8,
                "Spinach & Feta",
                "Fresh spinach, feta cheese, garlic, olive oil, mozzarella",
                1599,
                "spinach-feta.jpg",
                SpecialtyPizzas,
            ),
            entry(
                101,
                "Garlic Knots",
                "6 knots with garlic butter and parmesan",
                599,
                "garlic-knots.jpg",
                Sides,
            ),
            entry(
                102,
                "Mozzarella Sticks",
                "6 sticks with marinara sauce",
                699,
                "mozzarella-sticks.jpg",
                Sides,
            ),
            entry(
                103,
                "Caesar Salad",
                "Romaine, croutons, parmesan, caesar dressing",
                799,
                "caesar-salad.jpg",
                Sides,
            ),
            entry(
                104,
                "Buffalo Wings",
                "8 wings with blue cheese dressing",
                999,
                "buffalo-wings.jpg",
                Sides,
            ),
            entry(
                201,
                "Soda",
                "Coke, Diet Coke, Sprite, Root Beer (20oz)",
                249,
                "soda.jpg",
                Drinks,
            ),
            entry(
                202,
                "Bottled Water",
                "16oz bottled water",
                199,
                "water.jpg",
                Drinks,
            ),
            entry(
                203,
                "Iced Tea",
                "Sweet or unsweet (20oz)",
                249,
                "iced-tea.jpg",
                Drinks,
            ),
        ];

        Self { entries }
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries in menu order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries grouped by category, in menu-section order. Categories with
    /// no entries are omitted.
    #[must_use]
    pub fn by_category(&self) -> Vec<(Category, Vec<&CatalogEntry>)> {
        Category::all()
            .into_iter()
            .filter_map(|category| {
                let items: Vec<&CatalogEntry> = self
                    .entries
                    .iter()
                    .filter(|e| e.category == category)
                    .collect();
                (!items.is_empty()).then_some((category, items))
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_menu_size() {
        let catalog = Catalog::new();
        // 8 pizzas, 4 sides, 3 drinks
        assert_eq!(catalog.len(), 15);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new();
        let margherita = catalog.get(ItemId::new(1)).unwrap();
        assert_eq!(margherita.name, "Classic Margherita");
        assert_eq!(margherita.price.amount(), dec!(12.99));

        let soda = catalog.get(ItemId::new(201)).unwrap();
        assert_eq!(soda.price.amount(), dec!(2.49));

        assert!(catalog.get(ItemId::new(999)).is_none());
    }

    #[test]
    fn test_grouping_preserves_section_order() {
        let catalog = Catalog::new();
        let sections = catalog.by_category();
        let order: Vec<Category> = sections.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                Category::ClassicPizzas,
                Category::SpecialtyPizzas,
                Category::Sides,
                Category::Drinks,
            ]
        );

        let (_, drinks) = sections.last().unwrap();
        assert_eq!(drinks.len(), 3);
    }

    #[test]
    fn test_every_entry_has_image_and_description() {
        let catalog = Catalog::new();
        for entry in catalog.entries() {
            assert!(entry.image.is_some(), "{} missing image", entry.name);
            assert!(
                !entry.description.is_empty(),
                "{} missing description",
                entry.name
            );
        }
    }
}
