use axum::{
    Router,
    routing::{get, post, put},
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::db::Store;
use crate::handlers::accounts::{login_handler, register_handler};
use crate::handlers::cafes::{get_cafe_handler, list_cafes_handler, update_count_handler};
use crate::service::password::PasswordScheme;

#[derive(Clone)]
pub struct CafeteriaState {
    pub store: Store,
    pub password_scheme: PasswordScheme,
}

impl CafeteriaState {
    pub fn new(store: Store, password_scheme: PasswordScheme) -> Self {
        Self {
            store,
            password_scheme,
        }
    }
}

/// JSON API under `/api`, login page at `/`, everything else served from `static_dir`.
pub fn cafeteria_router(state: CafeteriaState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    let api = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/cafes", get(list_cafes_handler))
        .route("/cafes/{id}", get(get_cafe_handler))
        .route("/cafes/{id}/count", put(update_count_handler));

    Router::new()
        .nest("/api", api)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
