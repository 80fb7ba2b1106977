// Presentation layer - HTTP surface
pub mod app_state;
pub mod calculators;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
