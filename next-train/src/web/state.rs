//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::board::PredictionBoard;
use crate::predictions::Transport;

/// Shared application state.
pub struct AppState<T> {
    /// Station catalog and prediction client
    pub board: Arc<PredictionBoard<T>>,

    /// Upper bound on one board lookup, fallback retry included
    pub deadline: Duration,
}

impl<T: Transport> AppState<T> {
    /// Create a new app state.
    pub fn new(board: PredictionBoard<T>, deadline: Duration) -> Self {
        Self {
            board: Arc::new(board),
            deadline,
        }
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
            deadline: self.deadline,
        }
    }
}
