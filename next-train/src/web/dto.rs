//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::BoardView;

/// Query string carrying the selector value.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Selected station name, or the placeholder
    pub station: Option<String>,
}

/// Selector contents.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Entry meaning "nothing selected"
    pub placeholder: String,

    /// Station names in display order
    pub stations: Vec<String>,
}

/// Error body for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A board view plus the text the page would show for it.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    #[serde(flatten)]
    pub view: BoardView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<BoardView> for BoardResponse {
    fn from(view: BoardView) -> Self {
        let message = view.message();
        Self { view, message }
    }
}
