//! HTTP handlers for ztr-web

pub mod health;
pub mod lookup;
pub mod ui;

pub use health::health_routes;
pub use lookup::{lookup_json, lookup_page};
pub use ui::serve_app_js;
