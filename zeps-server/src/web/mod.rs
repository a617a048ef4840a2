//! Web layer for the route planner.
//!
//! Serves the search form, route pages (HTML or JSON) and station
//! autocomplete.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
