use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::data::loader::ColumnMapping;
use crate::data::views::View;

/// Explore a cricket auction player list as interactive charts.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct Cli {
    /// Auction table to open (.csv, .json or .parquet). Without it the
    /// dashboard starts empty and a file can be opened from the menu.
    pub dataset: Option<PathBuf>,

    /// JSON object mapping columns to source headers,
    /// e.g. {"reserve_price": "Base Price"}
    #[arg(long, value_name = "FILE")]
    pub columns: Option<PathBuf>,

    /// Chart shown first
    #[arg(long, value_enum, default_value_t = View::default())]
    pub view: View,

    /// Print the chosen view with its default selections as JSON and exit
    #[arg(long, requires = "dataset")]
    pub headless: bool,
}

impl Cli {
    /// The header mapping, or the published headers when none is given.
    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        match &self.columns {
            Some(path) => ColumnMapping::from_json_file(path),
            None => Ok(ColumnMapping::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_names_in_kebab_case() {
        let cli = Cli::try_parse_from(["auction-dashboard", "players.csv", "--view", "horizontal-bar"])
            .unwrap();
        assert_eq!(cli.view, View::HorizontalBar);
        assert_eq!(cli.dataset, Some(PathBuf::from("players.csv")));
        assert!(!cli.headless);
    }

    #[test]
    fn headless_needs_a_dataset() {
        assert!(Cli::try_parse_from(["auction-dashboard", "--headless"]).is_err());
        assert!(Cli::try_parse_from(["auction-dashboard", "--view", "nope"]).is_err());
    }

    #[test]
    fn default_mapping_without_columns_flag() {
        let cli = Cli::try_parse_from(["auction-dashboard"]).unwrap();
        assert_eq!(cli.column_mapping().unwrap(), ColumnMapping::default());
        assert_eq!(cli.view, View::SpecialismByOrigin);
    }
}
