mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use app::AuctionDashboardApp;
use config::Cli;
use data::loader::load_file;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mapping = cli.column_mapping()?;
    let mut state = AppState::new(cli.view, mapping);

    if cli.headless {
        // `requires = "dataset"` guarantees a path here.
        if let Some(path) = &cli.dataset {
            let dataset = load_file(path, &state.mapping)?;
            state.set_dataset(dataset);
        }
        println!("{}", state.export_json()?);
        return Ok(());
    }

    if let Some(path) = &cli.dataset {
        state.open(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Auction Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(AuctionDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
