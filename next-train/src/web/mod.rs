//! Web layer for the next-train board.
//!
//! Serves the dashboard page and a small JSON API over the same board.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
