//! HTTP route handlers for the lunch service.
//!
//! # Route Structure
//!
//! `GET /health` is registered by `app()` in the library root, next to the
//! layers; everything below is built here.
//!
//! ```text
//! GET    /hello               - Greeting
//!
//! # Catalog
//! GET    /search/{price}      - Items with price <= {price} (public)
//! GET    /add/{name}/{price}  - Insert item (protected, ?imageurl=...)
//! POST   /add/{name}/{price}  - Same as GET variant
//! PUT    /update/{id}         - Replace item fields (protected, JSON body)
//! DELETE /delete/{id}         - Remove item (protected)
//! GET    /list                - All items (protected)
//!
//! # Auth
//! POST   /signup              - Create account
//! GET    /login               - Login page
//! POST   /login               - Login action, sets session
//! POST   /logout              - Logout action, always succeeds
//! GET    /check-auth          - Current authentication state
//!
//! # Pages
//! GET    /                    - Home page
//! GET    /admin.html          - Admin page (protected)
//! GET    /styles.css          - Stylesheet
//! GET    /script.js           - Home page script
//! GET    /admin.js            - Admin page script
//! GET    /login.js            - Login page script
//! ```

pub mod auth;
pub mod catalog;
pub mod pages;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/search/{price}", get(catalog::search))
        .route("/add/{name}/{price}", get(catalog::add).post(catalog::add))
        .route("/update/{id}", put(catalog::update))
        .route("/delete/{id}", delete(catalog::delete))
        .route("/list", get(catalog::list))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-auth", get(auth::check_auth))
}

/// Create the static page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/admin.html", get(pages::admin_page))
        .route("/styles.css", get(pages::stylesheet))
        .route("/script.js", get(pages::script))
        .route("/admin.js", get(pages::admin_script))
        .route("/login.js", get(pages::login_script))
        .route("/hello", get(pages::hello))
}

/// Create all routes for the lunch service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(auth_routes())
        .merge(page_routes())
}
