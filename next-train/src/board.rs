//! One selection event, start to finish.
//!
//! Turns the selector value into what the display should show: a prompt,
//! an error message, or grouped predictions.

use serde::Serialize;

use crate::format::{GroupedPresentation, format_predictions};
use crate::predictions::{FetchOutcome, PredictionFetcher, Transport};
use crate::stations::{StationCatalog, StationError};

/// What the display shows for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardView {
    /// Nothing selected yet.
    Prompt,

    /// The name is not in the catalog.
    UnknownStation { name: String },

    /// The station has no predictions right now.
    NoPredictions { station: String },

    /// The API could not be reached or refused the request.
    Unavailable { station: String, reason: String },

    /// The API answered with something we could not read.
    Malformed { station: String, reason: String },

    /// Predictions, grouped for display.
    Arrivals {
        station: String,
        presentation: GroupedPresentation,
    },
}

impl BoardView {
    /// Text shown instead of (or above) the predictions.
    pub fn message(&self) -> Option<String> {
        match self {
            BoardView::Prompt => {
                Some("Please select a station to see the next trains.".to_string())
            }
            BoardView::UnknownStation { name } => Some(format!(
                "\"{name}\" is not a known station. Please pick one from the list."
            )),
            BoardView::NoPredictions { station } => {
                Some(format!("No current predictions for {station}."))
            }
            BoardView::Unavailable { station, .. } => Some(format!(
                "Train predictions for {station} are unavailable right now."
            )),
            BoardView::Malformed { station, .. } => Some(format!(
                "The prediction service sent an unexpected response for {station}."
            )),
            BoardView::Arrivals { presentation, .. } if presentation.is_empty() => {
                Some("Trains are listed, but none are assigned to a platform yet.".to_string())
            }
            BoardView::Arrivals { .. } => None,
        }
    }
}

/// Station catalog plus prediction client.
#[derive(Debug)]
pub struct PredictionBoard<T> {
    catalog: StationCatalog,
    fetcher: PredictionFetcher<T>,
}

impl<T: Transport> PredictionBoard<T> {
    pub fn new(catalog: StationCatalog, fetcher: PredictionFetcher<T>) -> Self {
        Self { catalog, fetcher }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    /// Resolve a selector value and fetch its predictions.
    ///
    /// `None` and the placeholder prompt for a selection without fetching.
    pub async fn show(&self, selection: Option<&str>) -> BoardView {
        let Some(name) = selection else {
            return BoardView::Prompt;
        };

        let code = match self.catalog.lookup(name) {
            Ok(code) => code,
            Err(StationError::NoSelection) => return BoardView::Prompt,
            Err(_) => {
                return BoardView::UnknownStation {
                    name: name.to_string(),
                };
            }
        };

        let station = name.to_string();
        match self.fetcher.fetch(code).await {
            FetchOutcome::Success(records) => BoardView::Arrivals {
                station,
                presentation: format_predictions(&records),
            },
            FetchOutcome::EmptyStation => BoardView::NoPredictions { station },
            FetchOutcome::TransportFailure(failure) => BoardView::Unavailable {
                station,
                reason: failure.to_string(),
            },
            FetchOutcome::MalformedResponse(reason) => BoardView::Malformed { station, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::testing::ScriptedTransport;
    use crate::predictions::{ApiKey, PredictionConfig, RawResponse, TransportError};

    fn board(
        script: Vec<Result<RawResponse, TransportError>>,
    ) -> PredictionBoard<ScriptedTransport> {
        let config = PredictionConfig::new(ApiKey::new("test-key").unwrap())
            .with_base_url("http://localhost/predict");
        let fetcher = PredictionFetcher::with_transport(config, ScriptedTransport::new(script));
        PredictionBoard::new(StationCatalog::builtin().unwrap(), fetcher)
    }

    #[tokio::test]
    async fn no_selection_prompts_without_fetching() {
        let board = board(vec![]);

        assert_eq!(board.show(None).await, BoardView::Prompt);
        assert_eq!(board.show(Some("Select a station")).await, BoardView::Prompt);
        assert!(board.fetcher_requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_station_does_not_fetch() {
        let board = board(vec![]);

        assert_eq!(
            board.show(Some("Atlantis")).await,
            BoardView::UnknownStation {
                name: "Atlantis".into()
            }
        );
        assert!(board.fetcher_requests().is_empty());
    }

    #[tokio::test]
    async fn arrivals_are_formatted() {
        let body = r#"{"Trains": [
            {"Car": "8", "Line": "RD", "DestinationName": "Glenmont", "Min": "BRD", "Group": "2"},
            {"Car": "6", "Line": "RD", "DestinationName": "Shady Grove", "Min": "3", "Group": "1"}
        ]}"#;
        let board = board(vec![Ok(RawResponse::new(200, body))]);

        let view = board.show(Some("Suitland")).await;
        let BoardView::Arrivals {
            station,
            presentation,
        } = &view
        else {
            panic!("expected Arrivals, got {view:?}");
        };

        assert_eq!(station, "Suitland");
        assert_eq!(presentation.groups[0].key.as_str(), "1");
        assert_eq!(
            presentation.groups[1].lines[0],
            "8 car train on the RD line, heading to Glenmont, departing in BRD minutes."
        );
        assert_eq!(view.message(), None);
        assert!(board.fetcher_requests()[0].url.ends_with("/F10"));
    }

    #[tokio::test]
    async fn outcomes_map_to_views() {
        let board_for = |response| board(vec![Ok(response)]);

        let view = board_for(RawResponse::new(200, r#"{"Trains": []}"#))
            .show(Some("Ashburn"))
            .await;
        assert_eq!(
            view,
            BoardView::NoPredictions {
                station: "Ashburn".into()
            }
        );

        let view = board_for(RawResponse::new(500, "")).show(Some("Ashburn")).await;
        assert!(
            matches!(view, BoardView::Unavailable { ref reason, .. } if reason.contains("500"))
        );

        let view = board_for(RawResponse::new(200, "{}")).show(Some("Ashburn")).await;
        assert!(matches!(view, BoardView::Malformed { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let board = board(vec![
            Err(TransportError::Connect("refused".into())),
            Err(TransportError::Connect("refused again".into())),
        ]);

        let view = board.show(Some("Reston Town Center")).await;
        assert!(matches!(view, BoardView::Unavailable { .. }));
        assert_eq!(
            view.message().unwrap(),
            "Train predictions for Reston Town Center are unavailable right now."
        );
    }

    #[test]
    fn malformed_and_empty_messages_differ() {
        let empty = BoardView::NoPredictions {
            station: "Suitland".into(),
        };
        let malformed = BoardView::Malformed {
            station: "Suitland".into(),
            reason: "response has no Trains field".into(),
        };

        assert_ne!(empty.message(), malformed.message());
        assert!(empty.message().unwrap().contains("No current predictions"));
    }

    #[test]
    fn serializes_with_status_tag() {
        let view = BoardView::NoPredictions {
            station: "Suitland".into(),
        };
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["status"], "no_predictions");
        assert_eq!(json["station"], "Suitland");
    }

    impl PredictionBoard<ScriptedTransport> {
        pub(crate) fn fetcher_requests(&self) -> Vec<crate::predictions::PredictionRequest> {
            self.fetcher.transport().requests()
        }
    }
}
