use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::data::loader::{load_file, ColumnMapping};
use crate::data::model::{AuctionDataset, PlayerRecord};
use crate::data::views::{compute, View, ViewResult, ViewSelection};

/// What the renderer receives, as written by `--headless` and "Export spec…".
#[derive(Serialize)]
struct ViewExport<'a> {
    selection: &'a ViewSelection,
    chart: &'a ChartSpec,
    rows: Vec<&'a PlayerRecord>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a file is opened).
    pub dataset: Option<AuctionDataset>,

    /// File the current table came from.
    pub source: Option<PathBuf>,

    /// Header mapping used for every load.
    pub mapping: ColumnMapping,

    /// Chart picked in the sidebar.
    pub view: View,

    /// Sidebar selections for the current view.
    pub selection: Option<ViewSelection>,

    /// Rows and chart spec for the current selection (cached).
    pub result: Option<ViewResult>,

    /// Colours for the chart's colour column, if it has one.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(view: View, mapping: ColumnMapping) -> Self {
        Self {
            view,
            mapping,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset and reset the sidebar to its defaults.
    pub fn set_dataset(&mut self, dataset: AuctionDataset) {
        if dataset.is_empty() {
            log::warn!("Dataset has no rows; every chart will be empty");
        }
        self.selection = Some(ViewSelection::defaults(self.view, &dataset));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Load a file, keeping the current table if it fails.
    pub fn open(&mut self, path: &Path) {
        match load_file(path, &self.mapping) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.source = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Window title, naming the open file if there is one.
    pub fn window_title(&self) -> String {
        match self.source.as_deref().and_then(Path::file_name) {
            Some(name) => format!("Auction Dashboard - {}", name.to_string_lossy()),
            None => "Auction Dashboard".to_string(),
        }
    }

    /// Switch charts. Selections start over from the view's defaults.
    pub fn set_view(&mut self, view: View) {
        if view == self.view && self.selection.is_some() {
            return;
        }
        self.view = view;
        if let Some(ds) = &self.dataset {
            self.selection = Some(ViewSelection::defaults(view, ds));
        }
        self.recompute();
    }

    /// Recompute the result and colour map after a selection change.
    pub fn recompute(&mut self) {
        let (Some(ds), Some(selection)) = (&self.dataset, &self.selection) else {
            self.result = None;
            self.color_map = None;
            return;
        };
        let result = compute(ds, selection);

        self.color_map = result.chart.color.map(|column| {
            let categories: Vec<String> = result.rows(ds).map(|r| r.display(column)).collect();
            ColorMap::new(&categories, &result.chart.color_sequence)
        });
        self.result = Some(result);
    }

    /// The current selection, chart spec and rows as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        let (Some(ds), Some(selection), Some(result)) =
            (&self.dataset, &self.selection, &self.result)
        else {
            anyhow::bail!("no dataset loaded");
        };
        let export = ViewExport {
            selection,
            chart: &result.chart,
            rows: result.rows(ds).collect(),
        };
        serde_json::to_string_pretty(&export).context("serializing view")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;
    use crate::data::views::OriginMode;

    fn loaded(view: View) -> AppState {
        let mut state = AppState::new(view, ColumnMapping::default());
        state.set_dataset(AuctionDataset::from_records(vec![
            player("Virat", "India", "Delhi", "BATTER", "32-36"),
            player("Pat", "Australia", "FOREIGNER", "BOWLER", "28-32"),
        ]));
        state
    }

    #[test]
    fn loading_computes_the_default_view() {
        let state = loaded(View::SpecialismByOrigin);
        assert_eq!(
            state.selection,
            Some(ViewSelection::SpecialismByOrigin {
                origin: OriginMode::Country
            })
        );
        assert_eq!(state.result.as_ref().unwrap().indices, vec![1]);
        assert!(state.color_map.is_none());
    }

    #[test]
    fn switching_view_resets_selection_and_colours() {
        let mut state = loaded(View::SpecialismByOrigin);
        state.set_view(View::HorizontalBar);
        assert_eq!(state.selection.as_ref().unwrap().view(), View::HorizontalBar);
        let legend = state.color_map.as_ref().unwrap().legend_entries();
        let names: Vec<_> = legend.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["India", "Australia"]);
    }

    #[test]
    fn selection_edits_apply_on_recompute() {
        let mut state = loaded(View::SpecialismByOrigin);
        state.selection = Some(ViewSelection::SpecialismByOrigin {
            origin: OriginMode::StateAssociation,
        });
        state.recompute();
        assert_eq!(state.result.as_ref().unwrap().indices, vec![0]);
    }

    #[test]
    fn failed_open_keeps_current_table() {
        let mut state = loaded(View::Bubble);
        state.open(Path::new("/definitely/not/here.csv"));
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert!(state.status_message.as_ref().unwrap().starts_with("Error:"));
        assert!(state.result.is_some());
    }

    #[test]
    fn open_replaces_table_and_clears_error() {
        let mut state = loaded(View::SpecialismByOrigin);
        state.open(Path::new("/definitely/not/here.csv"));
        assert!(state.status_message.is_some());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(
            &path,
            "Name,Country,State Association,Specialism,Age Group,R/L,C/U/A,Reserve Price Rs Lakh,Age,Test caps,ODI caps,T20 caps,IPL\n\
             Jos,England,FOREIGNER,WICKETKEEPER,32-36,RHB,Capped,200,33,50,150,100,90\n",
        )
        .unwrap();
        assert_eq!(state.window_title(), "Auction Dashboard");
        state.open(&path);
        assert_eq!(state.window_title(), "Auction Dashboard - players.csv");
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 1);
        assert_eq!(state.result.as_ref().unwrap().indices, vec![0]);
    }

    #[test]
    fn export_carries_selection_spec_and_rows() {
        let state = loaded(View::SpecialismByOrigin);
        let json: serde_json::Value = serde_json::from_str(&state.export_json().unwrap()).unwrap();
        assert_eq!(json["selection"]["view"], "specialism_by_origin");
        assert_eq!(json["selection"]["origin"], "country");
        assert_eq!(json["chart"]["kind"], "treemap");
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["label_specialism"], "BOWLER: Pat");
    }

    #[test]
    fn no_dataset_means_no_result() {
        let mut state = AppState::new(View::Bubble, ColumnMapping::default());
        state.set_view(View::PlayerDetails);
        assert!(state.result.is_none());
        assert!(state.selection.is_none());
        assert!(state.export_json().is_err());
    }
}
