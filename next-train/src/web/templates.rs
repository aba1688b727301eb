//! Askama templates for the web frontend.

use askama::Template;

use crate::board::BoardView;
use crate::stations::StationCatalog;

/// The dashboard page: station selector plus prediction panel.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub placeholder: String,
    pub stations: Vec<StationOption>,
    pub panel: BoardPanel,
}

impl IndexTemplate {
    /// Build the page for a selection and its result.
    pub fn new(catalog: &StationCatalog, selection: Option<&str>, panel: BoardPanel) -> Self {
        let stations = catalog
            .names()
            .map(|name| StationOption {
                name: name.to_string(),
                selected: selection == Some(name),
            })
            .collect();

        Self {
            placeholder: catalog.placeholder().to_string(),
            stations,
            panel,
        }
    }
}

/// One entry in the station selector.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub name: String,
    pub selected: bool,
}

/// Prediction panel view model.
#[derive(Debug, Clone, Default)]
pub struct BoardPanel {
    pub title: Option<String>,
    pub message: Option<String>,
    pub groups: Vec<GroupView>,
    pub updated_at: Option<String>,
}

impl BoardPanel {
    /// Create from a board view. `updated_at` is shown only with arrivals.
    pub fn from_view(view: &BoardView, updated_at: String) -> Self {
        let title = match view {
            BoardView::Prompt | BoardView::UnknownStation { .. } => None,
            BoardView::NoPredictions { station }
            | BoardView::Unavailable { station, .. }
            | BoardView::Malformed { station, .. }
            | BoardView::Arrivals { station, .. } => Some(station.clone()),
        };

        let (groups, updated_at) = match view {
            BoardView::Arrivals { presentation, .. } => (
                presentation
                    .groups
                    .iter()
                    .map(|g| GroupView {
                        key: g.key.to_string(),
                        lines: g.lines.clone(),
                    })
                    .collect(),
                Some(updated_at),
            ),
            _ => (Vec::new(), None),
        };

        Self {
            title,
            message: view.message(),
            groups,
            updated_at,
        }
    }
}

/// A group of prediction lines.
#[derive(Debug, Clone)]
pub struct GroupView {
    pub key: String,
    pub lines: Vec<String>,
}
