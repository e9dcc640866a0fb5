//! HTTP API handlers
//!
//! Thin plumbing over the engine modules: handlers parse, delegate, and
//! map errors. No business rule lives here.

pub mod components;
pub mod health;
pub mod progress;
pub mod projects;
pub mod validate;

pub use components::component_routes;
pub use health::health_routes;
pub use progress::progress_routes;
pub use projects::project_routes;
pub use validate::validation_routes;
