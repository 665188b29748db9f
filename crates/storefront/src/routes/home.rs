//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::routes::menu::{MenuSectionView, menu_sections};
use crate::state::AppState;

/// Home page template: hero plus the full menu as a preview.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub sections: Vec<MenuSectionView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        sections: menu_sections(state.catalog()),
    }
}
