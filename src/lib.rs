pub mod config;
pub mod model;
pub mod persona;
pub mod web;
pub mod widget;

use tera::Tera;

use model::Providers;
use web::profiles::EndpointProfile;

/// Shared, read-only state for every request. Nothing in here changes after
/// startup.
pub struct AppState {
    pub tera: Tera,
    pub providers: Providers,
    pub profiles: Vec<EndpointProfile>,
    pub cv: String,
}
