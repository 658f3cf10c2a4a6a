pub mod error;
pub mod handlers;
pub mod models;
pub mod profiles;
pub mod routes;
