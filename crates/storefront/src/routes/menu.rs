//! Menu and order-builder page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::catalog::{Catalog, CatalogEntry};
use crate::filters;
use crate::render::CartView;
use crate::state::AppState;

/// Menu item display data for templates.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
}

/// One menu section (category heading plus its items).
#[derive(Debug, Clone)]
pub struct MenuSectionView {
    pub title: String,
    pub items: Vec<MenuItemView>,
}

impl From<&CatalogEntry> for MenuItemView {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.as_i32(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            price: entry.price.to_string(),
            image: entry.image.clone(),
        }
    }
}

/// Build the menu sections in display order.
#[must_use]
pub fn menu_sections(catalog: &Catalog) -> Vec<MenuSectionView> {
    catalog
        .by_category()
        .into_iter()
        .map(|(category, items)| MenuSectionView {
            title: category.label().to_string(),
            items: items.into_iter().map(MenuItemView::from).collect(),
        })
        .collect()
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuTemplate {
    pub sections: Vec<MenuSectionView>,
}

/// Order builder page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/show.html")]
pub struct OrderTemplate {
    pub sections: Vec<MenuSectionView>,
    pub cart: CartView,
}

/// Display the menu, grouped by category.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> impl IntoResponse {
    MenuTemplate {
        sections: menu_sections(state.catalog()),
    }
}

/// Display the order builder: the menu with add buttons and the cart panel.
#[instrument(skip(state))]
pub async fn order(State(state): State<AppState>) -> impl IntoResponse {
    OrderTemplate {
        sections: menu_sections(state.catalog()),
        cart: state.cart_view(),
    }
}
