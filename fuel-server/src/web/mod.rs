//! Web layer for the route fuel search.
//!
//! Provides JSON endpoints for searching stations along a route and listing
//! the companies present in the dataset.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
