use clap::ValueEnum;
use serde::Serialize;

use super::filter::{filtered_indices, EmptySelection, Predicate};
use super::model::{
    AuctionDataset, Column, PlayerRecord, ReservePrice, FOREIGN_ASSOCIATION, HOME_COUNTRY,
    UNCAPPED,
};
use crate::chart::{ChartKind, ChartSpec, Orientation, Template};
use crate::color::set1_prefix;

/// Batting hands offered by the horizontal bar view.
pub const BATTING_HANDS: [&str; 2] = ["RHB", "LHB"];

// ---------------------------------------------------------------------------
// View names and their scalar parameters
// ---------------------------------------------------------------------------

/// The charts the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    SpecialismByOrigin,
    AgeGroupByOrigin,
    Bubble,
    PlayerDetails,
    UncappedSunburst,
    HorizontalBar,
}

impl View {
    pub const ALL: [View; 6] = [
        View::SpecialismByOrigin,
        View::AgeGroupByOrigin,
        View::Bubble,
        View::PlayerDetails,
        View::UncappedSunburst,
        View::HorizontalBar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::SpecialismByOrigin => "Specialism vs Country Origin",
            View::AgeGroupByOrigin => "Age Group vs Country Origin",
            View::Bubble => "Bubble Chart",
            View::PlayerDetails => "Selected Player Details",
            View::UncappedSunburst => "Sunburst Chart",
            View::HorizontalBar => "Horizontal Bar Chart",
        }
    }
}

/// Whether origin is judged by country or by state association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    #[default]
    Country,
    StateAssociation,
}

impl OriginMode {
    pub const ALL: [OriginMode; 2] = [OriginMode::Country, OriginMode::StateAssociation];

    pub fn label(self) -> &'static str {
        match self {
            OriginMode::Country => "Country",
            OriginMode::StateAssociation => "State Association",
        }
    }

    pub fn column(self) -> Column {
        match self {
            OriginMode::Country => Column::Country,
            OriginMode::StateAssociation => Column::StateAssociation,
        }
    }

    fn title(self) -> &'static str {
        match self {
            OriginMode::Country => "Country Origin",
            OriginMode::StateAssociation => "State Association",
        }
    }

    /// The sentinel value whose rows the origin views leave out.
    pub fn excluded(self) -> &'static str {
        match self {
            OriginMode::Country => HOME_COUNTRY,
            OriginMode::StateAssociation => FOREIGN_ASSOCIATION,
        }
    }

    /// Drop the home country, or drop overseas players.
    fn exclusion(self) -> Predicate {
        Predicate::text_ne(self.column(), self.excluded())
    }
}

/// The caps count plotted on the bubble chart's y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsField {
    #[default]
    Test,
    Odi,
    T20,
    Ipl,
}

impl CapsField {
    pub const ALL: [CapsField; 4] = [CapsField::Test, CapsField::Odi, CapsField::T20, CapsField::Ipl];

    pub fn column(self) -> Column {
        match self {
            CapsField::Test => Column::TestCaps,
            CapsField::Odi => Column::OdiCaps,
            CapsField::T20 => Column::T20Caps,
            CapsField::Ipl => Column::IplCaps,
        }
    }

    pub fn label(self) -> &'static str {
        self.column().default_header()
    }
}

// ---------------------------------------------------------------------------
// Multiselect parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetailsSelection {
    /// In selection order; the title lists them this way.
    pub reserve_prices: Vec<ReservePrice>,
    pub specialisms: Vec<String>,
    pub countries: Vec<String>,
}

impl PlayerDetailsSelection {
    pub fn defaults(dataset: &AuctionDataset) -> Self {
        PlayerDetailsSelection {
            reserve_prices: dataset.reserve_prices().iter().take(1).copied().collect(),
            specialisms: dataset.distinct(Column::Specialism).to_vec(),
            countries: dataset.distinct(Column::Country).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UncappedSelection {
    pub countries: Vec<String>,
    pub specialisms: Vec<String>,
    pub age_groups: Vec<String>,
}

impl UncappedSelection {
    pub fn defaults(dataset: &AuctionDataset) -> Self {
        UncappedSelection {
            countries: dataset.distinct(Column::Country).to_vec(),
            specialisms: dataset.distinct(Column::Specialism).to_vec(),
            age_groups: dataset.distinct(Column::AgeGroup).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalBarSelection {
    pub countries: Vec<String>,
    pub batting_hands: Vec<String>,
    pub specialisms: Vec<String>,
}

impl HorizontalBarSelection {
    pub fn defaults(dataset: &AuctionDataset) -> Self {
        HorizontalBarSelection {
            countries: dataset.distinct(Column::Country).to_vec(),
            batting_hands: vec![BATTING_HANDS[0].to_string()],
            specialisms: dataset.distinct(Column::Specialism).to_vec(),
        }
    }
}

/// A view together with everything the user picked for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewSelection {
    SpecialismByOrigin { origin: OriginMode },
    AgeGroupByOrigin { origin: OriginMode },
    Bubble { origin: OriginMode, caps: CapsField },
    PlayerDetails(PlayerDetailsSelection),
    UncappedSunburst(UncappedSelection),
    HorizontalBar(HorizontalBarSelection),
}

impl ViewSelection {
    /// The sidebar defaults for `view` over this dataset.
    pub fn defaults(view: View, dataset: &AuctionDataset) -> Self {
        match view {
            View::SpecialismByOrigin => ViewSelection::SpecialismByOrigin {
                origin: OriginMode::default(),
            },
            View::AgeGroupByOrigin => ViewSelection::AgeGroupByOrigin {
                origin: OriginMode::default(),
            },
            View::Bubble => ViewSelection::Bubble {
                origin: OriginMode::default(),
                caps: CapsField::default(),
            },
            View::PlayerDetails => {
                ViewSelection::PlayerDetails(PlayerDetailsSelection::defaults(dataset))
            }
            View::UncappedSunburst => {
                ViewSelection::UncappedSunburst(UncappedSelection::defaults(dataset))
            }
            View::HorizontalBar => {
                ViewSelection::HorizontalBar(HorizontalBarSelection::defaults(dataset))
            }
        }
    }

    pub fn view(&self) -> View {
        match self {
            ViewSelection::SpecialismByOrigin { .. } => View::SpecialismByOrigin,
            ViewSelection::AgeGroupByOrigin { .. } => View::AgeGroupByOrigin,
            ViewSelection::Bubble { .. } => View::Bubble,
            ViewSelection::PlayerDetails(_) => View::PlayerDetails,
            ViewSelection::UncappedSunburst(_) => View::UncappedSunburst,
            ViewSelection::HorizontalBar(_) => View::HorizontalBar,
        }
    }

    /// The row filter this selection stands for.
    pub fn predicate(&self) -> Predicate {
        match self {
            ViewSelection::SpecialismByOrigin { origin }
            | ViewSelection::AgeGroupByOrigin { origin } => origin.exclusion(),
            ViewSelection::Bubble { origin, .. } => bubble_predicate(*origin),
            ViewSelection::PlayerDetails(sel) => player_details_predicate(sel),
            ViewSelection::UncappedSunburst(sel) => uncapped_predicate(sel),
            ViewSelection::HorizontalBar(sel) => horizontal_bar_predicate(sel),
        }
    }
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// Rows chosen by a view plus how to draw them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    /// Indices into `AuctionDataset::records`, in table order.
    pub indices: Vec<usize>,
    pub chart: ChartSpec,
}

impl ViewResult {
    pub fn rows<'a>(&'a self, dataset: &'a AuctionDataset) -> impl Iterator<Item = &'a PlayerRecord> + 'a {
        self.indices.iter().filter_map(|&i| dataset.records.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Run the query for a selection.
pub fn compute(dataset: &AuctionDataset, selection: &ViewSelection) -> ViewResult {
    let result = match selection {
        ViewSelection::SpecialismByOrigin { origin } => specialism_by_origin(dataset, *origin),
        ViewSelection::AgeGroupByOrigin { origin } => age_group_by_origin(dataset, *origin),
        ViewSelection::Bubble { origin, caps } => bubble(dataset, *origin, *caps),
        ViewSelection::PlayerDetails(sel) => player_details(dataset, sel),
        ViewSelection::UncappedSunburst(sel) => uncapped_sunburst(dataset, sel),
        ViewSelection::HorizontalBar(sel) => horizontal_bar(dataset, sel),
    };
    log::debug!(
        "{:?}: {} of {} rows match {:?}",
        selection.view(),
        result.indices.len(),
        dataset.len(),
        selection.predicate()
    );
    result
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Treemap of specialisms under each origin, leaving out the origin sentinel.
pub fn specialism_by_origin(dataset: &AuctionDataset, origin: OriginMode) -> ViewResult {
    let title = format!(
        "Specialism vs {} (excluding {})",
        origin.title(),
        origin.excluded()
    );
    ViewResult {
        indices: filtered_indices(dataset, &origin.exclusion()),
        chart: ChartSpec::new(ChartKind::Treemap, title)
            .path(&[origin.column(), Column::LabelSpecialism]),
    }
}

/// Sunburst of age group → country → player. Only the filter follows `origin`.
pub fn age_group_by_origin(dataset: &AuctionDataset, origin: OriginMode) -> ViewResult {
    let title = format!(
        "Age Group vs {} (excluding {})",
        origin.title(),
        origin.excluded()
    );
    ViewResult {
        indices: filtered_indices(dataset, &origin.exclusion()),
        chart: ChartSpec::new(ChartKind::Sunburst, title)
            .path(&[Column::AgeGroup, Column::Country, Column::LabelAge]),
    }
}

// The state-association branch keeps Indian rows whatever their association,
// unlike the other origin views.
fn bubble_predicate(origin: OriginMode) -> Predicate {
    let origin_filter = match origin {
        OriginMode::Country => Predicate::text_ne(Column::Country, HOME_COUNTRY),
        OriginMode::StateAssociation => Predicate::text_eq(Column::Country, HOME_COUNTRY)
            .or(Predicate::text_ne(Column::StateAssociation, FOREIGN_ASSOCIATION)),
    };
    origin_filter.and(Predicate::number_ne(Column::IplCaps, 0.0))
}

/// Age against a caps count, for players with at least one IPL appearance.
pub fn bubble(dataset: &AuctionDataset, origin: OriginMode, caps: CapsField) -> ViewResult {
    ViewResult {
        indices: filtered_indices(dataset, &bubble_predicate(origin)),
        chart: ChartSpec::new(ChartKind::Scatter, format!("Bubble Chart: Age vs {}", caps.label()))
            .x(Column::Age)
            .y(&[caps.column()])
            .size(Column::OdiCaps)
            .color(Column::Country)
            .hover_name(Column::Name),
    }
}

// Empty specialism / country lists leave that dimension unfiltered here.
fn player_details_predicate(sel: &PlayerDetailsSelection) -> Predicate {
    Predicate::price_in(&sel.reserve_prices)
        .and(Predicate::text_in(
            Column::Specialism,
            &sel.specialisms,
            EmptySelection::MatchAll,
        ))
        .and(Predicate::text_in(
            Column::Country,
            &sel.countries,
            EmptySelection::MatchAll,
        ))
}

/// Caps per player for the selected reserve prices, as grouped bars.
pub fn player_details(dataset: &AuctionDataset, sel: &PlayerDetailsSelection) -> ViewResult {
    let prices = sel
        .reserve_prices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    ViewResult {
        indices: filtered_indices(dataset, &player_details_predicate(sel)),
        chart: ChartSpec::new(
            ChartKind::Bar,
            format!("Player/s on {prices} Lakh Reserve Price Range"),
        )
        .x(Column::Name)
        .y(&[Column::TestCaps, Column::OdiCaps, Column::T20Caps, Column::IplCaps])
        .label("value", "Number of Caps")
        .whole_number_values()
        .template(Template::Dark),
    }
}

fn uncapped_predicate(sel: &UncappedSelection) -> Predicate {
    Predicate::text_in(Column::Country, &sel.countries, EmptySelection::MatchNone)
        .and(Predicate::text_in(
            Column::Specialism,
            &sel.specialisms,
            EmptySelection::MatchNone,
        ))
        .and(Predicate::text_in(
            Column::AgeGroup,
            &sel.age_groups,
            EmptySelection::MatchNone,
        ))
        .and(Predicate::text_eq(Column::CappedStatus, UNCAPPED))
        .and(Predicate::number_eq(Column::IplCaps, 0.0))
}

/// Uncapped players who never played IPL, by country and state association.
pub fn uncapped_sunburst(dataset: &AuctionDataset, sel: &UncappedSelection) -> ViewResult {
    ViewResult {
        indices: filtered_indices(dataset, &uncapped_predicate(sel)),
        chart: ChartSpec::new(
            ChartKind::Sunburst,
            "Players who are uncapped and never played IPL",
        )
        .path(&[Column::Country, Column::StateAssociation, Column::Name])
        .color(Column::StateAssociation),
    }
}

fn horizontal_bar_predicate(sel: &HorizontalBarSelection) -> Predicate {
    Predicate::text_in(Column::Country, &sel.countries, EmptySelection::MatchNone)
        .and(Predicate::text_in(
            Column::BattingHand,
            &sel.batting_hands,
            EmptySelection::MatchNone,
        ))
        .and(Predicate::text_in(
            Column::Specialism,
            &sel.specialisms,
            EmptySelection::MatchNone,
        ))
}

/// Players per age group, faceted by batting hand.
///
/// The colour sequence is Set1 cut to the number of selected countries; with
/// more countries than colours it is simply the whole palette.
pub fn horizontal_bar(dataset: &AuctionDataset, sel: &HorizontalBarSelection) -> ViewResult {
    ViewResult {
        indices: filtered_indices(dataset, &horizontal_bar_predicate(sel)),
        chart: ChartSpec::new(
            ChartKind::Bar,
            "Players by Age Group, Specialism, and R/L (Second Chart)",
        )
        .y(&[Column::AgeGroup])
        .color(Column::Country)
        .facet_col(Column::BattingHand, 2)
        .text(Column::Name)
        .label(Column::AgeGroup.default_header(), "Player Age Group")
        .template(Template::Dark)
        .orientation(Orientation::Horizontal)
        .color_sequence(set1_prefix(sel.countries.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SET1;
    use crate::data::model::tests::player;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn names(dataset: &AuctionDataset, result: &ViewResult) -> Vec<String> {
        result.rows(dataset).map(|r| r.name.clone()).collect()
    }

    fn with(mut r: PlayerRecord, f: impl FnOnce(&mut PlayerRecord)) -> PlayerRecord {
        f(&mut r);
        r
    }

    fn sample() -> AuctionDataset {
        AuctionDataset::from_records(vec![
            player("Virat", "India", "Delhi", "BATTER", "32-36"),
            player("Pat", "Australia", "FOREIGNER", "BOWLER", "28-32"),
            with(player("Rinku", "India", "FOREIGNER", "BATTER", "<25"), |r| {
                r.ipl_caps = 0;
                r.capped_status = "Uncapped".into();
            }),
            with(player("Jos", "England", "FOREIGNER", "WICKETKEEPER", "32-36"), |r| {
                r.reserve_price = ReservePrice(100.0);
                r.batting_hand = "LHB".into();
            }),
            with(player("Ravi", "India", "Mumbai", "ALL-ROUNDER", "<25"), |r| {
                r.ipl_caps = 0;
                r.capped_status = "Uncapped".into();
            }),
            with(player("Kyle", "New Zealand", "FOREIGNER", "BOWLER", "<25"), |r| {
                r.ipl_caps = 0;
                r.capped_status = "Uncapped".into();
            }),
        ])
    }

    fn all_selections(ds: &AuctionDataset) -> Vec<ViewSelection> {
        let mut selections: Vec<ViewSelection> = View::ALL
            .iter()
            .map(|&v| ViewSelection::defaults(v, ds))
            .collect();
        for origin in OriginMode::ALL {
            selections.push(ViewSelection::SpecialismByOrigin { origin });
            selections.push(ViewSelection::AgeGroupByOrigin { origin });
            for caps in CapsField::ALL {
                selections.push(ViewSelection::Bubble { origin, caps });
            }
        }
        selections
    }

    #[test]
    fn every_view_is_an_exact_projection() {
        let ds = sample();
        for selection in all_selections(&ds) {
            let result = compute(&ds, &selection);
            let predicate = selection.predicate();
            for (i, r) in ds.records.iter().enumerate() {
                assert_eq!(
                    result.indices.contains(&i),
                    predicate.matches(r),
                    "{selection:?} row {i}"
                );
            }
        }
    }

    #[test]
    fn recomputing_is_idempotent() {
        let ds = sample();
        for selection in all_selections(&ds) {
            assert_eq!(compute(&ds, &selection), compute(&ds, &selection));
        }
    }

    #[test]
    fn specialism_by_country_drops_india() {
        let ds = AuctionDataset::from_records(vec![
            player("Virat", "India", "Delhi", "BATTER", "32-36"),
            player("Pat", "Australia", "FOREIGNER", "BOWLER", "28-32"),
        ]);
        let result = specialism_by_origin(&ds, OriginMode::Country);
        assert_eq!(names(&ds, &result), ["Pat"]);
        assert_eq!(result.chart.kind, ChartKind::Treemap);
        assert_eq!(result.chart.path, [Column::Country, Column::LabelSpecialism]);
        assert_eq!(
            result.chart.title,
            "Specialism vs Country Origin (excluding India)"
        );
    }

    #[test]
    fn specialism_by_association_drops_foreigners() {
        let ds = sample();
        let result = specialism_by_origin(&ds, OriginMode::StateAssociation);
        assert_eq!(names(&ds, &result), ["Virat", "Ravi"]);
        assert_eq!(
            result.chart.path,
            [Column::StateAssociation, Column::LabelSpecialism]
        );
        assert!(result.chart.title.ends_with("(excluding FOREIGNER)"));
    }

    #[test]
    fn age_group_path_ignores_origin_mode() {
        let ds = sample();
        let by_country = age_group_by_origin(&ds, OriginMode::Country);
        let by_state = age_group_by_origin(&ds, OriginMode::StateAssociation);
        let path = [Column::AgeGroup, Column::Country, Column::LabelAge];
        assert_eq!(by_country.chart.path, path);
        assert_eq!(by_state.chart.path, path);
        assert_eq!(names(&ds, &by_country), ["Pat", "Jos", "Kyle"]);
        assert_eq!(names(&ds, &by_state), ["Virat", "Ravi"]);
        assert_eq!(
            by_state.chart.title,
            "Age Group vs State Association (excluding FOREIGNER)"
        );
    }

    #[test]
    fn bubble_never_shows_players_without_ipl_caps() {
        let ds = AuctionDataset::from_records(vec![with(
            player("Kyle", "New Zealand", "Otago", "BOWLER", "<25"),
            |r| r.ipl_caps = 0,
        )]);
        for origin in OriginMode::ALL {
            for caps in CapsField::ALL {
                assert!(bubble(&ds, origin, caps).is_empty());
            }
        }
    }

    #[test]
    fn bubble_by_country_drops_india_even_with_ipl_caps() {
        let ds = sample();
        let result = bubble(&ds, OriginMode::Country, CapsField::Test);
        // Virat has IPL caps but is Indian; Kyle is foreign but has none.
        assert_eq!(names(&ds, &result), ["Pat", "Jos"]);
        assert_eq!(result.chart.kind, ChartKind::Scatter);
        assert_eq!(result.chart.y, [Column::TestCaps]);
    }

    #[test]
    fn bubble_association_branch_keeps_indian_foreigners() {
        let ds = AuctionDataset::from_records(vec![
            player("Odd", "India", "FOREIGNER", "BATTER", "<25"),
            player("Pat", "Australia", "FOREIGNER", "BOWLER", "28-32"),
            player("Virat", "India", "Delhi", "BATTER", "32-36"),
        ]);
        let result = bubble(&ds, OriginMode::StateAssociation, CapsField::Odi);
        assert_eq!(names(&ds, &result), ["Odd", "Virat"]);
        // The treemap with the same mode drops that row.
        let treemap = specialism_by_origin(&ds, OriginMode::StateAssociation);
        assert_eq!(names(&ds, &treemap), ["Virat"]);

        let spec = result.chart;
        assert_eq!(spec.title, "Bubble Chart: Age vs ODI caps");
        assert_eq!(spec.x, Some(Column::Age));
        assert_eq!(spec.y, [Column::OdiCaps]);
        assert_eq!(spec.size, Some(Column::OdiCaps));
        assert_eq!(spec.color, Some(Column::Country));
        assert_eq!(spec.hover_name, Some(Column::Name));
    }

    #[test]
    fn player_details_filters_by_selected_price() {
        let ds = sample();
        let mut sel = PlayerDetailsSelection::defaults(&ds);
        sel.reserve_prices = vec![ReservePrice(50.0)];
        let result = player_details(&ds, &sel);
        assert!(result.rows(&ds).all(|r| r.reserve_price == ReservePrice(50.0)));
        assert_eq!(result.indices.len(), 5);
        assert!(result.chart.title.contains("50"));
        assert!(!result.chart.title.contains("100"));

        sel.reserve_prices = vec![ReservePrice(100.0), ReservePrice(50.0)];
        let result = player_details(&ds, &sel);
        assert_eq!(result.indices.len(), 6);
        assert_eq!(
            result.chart.title,
            "Player/s on 100, 50 Lakh Reserve Price Range"
        );
        assert_eq!(result.chart.label_for("value"), "Number of Caps");
    }

    #[test]
    fn player_details_empty_lists_mean_unfiltered() {
        let ds = sample();
        let all = PlayerDetailsSelection::defaults(&ds);
        let mut empty = all.clone();
        empty.specialisms.clear();
        assert_eq!(player_details(&ds, &empty), player_details(&ds, &all));
        empty.countries.clear();
        assert_eq!(player_details(&ds, &empty), player_details(&ds, &all));

        let mut no_price = all;
        no_price.reserve_prices.clear();
        assert!(player_details(&ds, &no_price).is_empty());
    }

    #[test]
    fn uncapped_sunburst_only_uncapped_without_ipl() {
        let ds = sample();
        let result = uncapped_sunburst(&ds, &UncappedSelection::defaults(&ds));
        assert_eq!(names(&ds, &result), ["Rinku", "Ravi", "Kyle"]);
        assert!(result.rows(&ds).all(|r| r.capped_status != "Capped"));
        assert_eq!(
            result.chart.path,
            [Column::Country, Column::StateAssociation, Column::Name]
        );
        assert_eq!(result.chart.color, Some(Column::StateAssociation));
    }

    #[test]
    fn capped_players_never_in_uncapped_sunburst() {
        let ds = AuctionDataset::from_records(vec![with(
            player("Pat", "Australia", "FOREIGNER", "BOWLER", "28-32"),
            |r| r.ipl_caps = 0,
        )]);
        let result = uncapped_sunburst(&ds, &UncappedSelection::defaults(&ds));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_country_selection_matches_nothing() {
        let ds = sample();
        let mut sunburst = UncappedSelection::defaults(&ds);
        sunburst.countries.clear();
        assert!(uncapped_sunburst(&ds, &sunburst).is_empty());

        let mut bars = HorizontalBarSelection::defaults(&ds);
        bars.countries.clear();
        let result = horizontal_bar(&ds, &bars);
        assert!(result.is_empty());
        assert!(result.chart.color_sequence.is_empty());
    }

    #[test]
    fn horizontal_bar_defaults_to_right_handers() {
        let ds = sample();
        let sel = HorizontalBarSelection::defaults(&ds);
        assert_eq!(sel.batting_hands, ["RHB"]);
        let result = horizontal_bar(&ds, &sel);
        assert!(!names(&ds, &result).contains(&"Jos".to_string()));
        assert_eq!(result.indices.len(), 5);

        let spec = result.chart;
        assert_eq!(spec.orientation, Orientation::Horizontal);
        assert_eq!(spec.facet_col, Some(Column::BattingHand));
        assert_eq!(spec.facet_col_wrap, Some(2));
        assert_eq!(spec.text, Some(Column::Name));
        assert_eq!(spec.axis_label(Column::AgeGroup), "Player Age Group");
        assert_eq!(spec.color_sequence, SET1[..4]);
    }

    #[test]
    fn horizontal_bar_palette_truncates_at_set1_length() {
        let ds = sample();
        let mut sel = HorizontalBarSelection::defaults(&ds);
        sel.countries = (0..12).map(|i| format!("Country {i}")).collect();
        let result = horizontal_bar(&ds, &sel);
        assert_eq!(result.chart.color_sequence.len(), SET1.len());
        assert!(result.is_empty());
    }

    #[test]
    fn unknown_selection_values_match_nothing() {
        let ds = sample();
        let sel = HorizontalBarSelection {
            countries: strings(&["Atlantis"]),
            batting_hands: strings(&["RHB", "LHB"]),
            specialisms: ds.distinct(Column::Specialism).to_vec(),
        };
        assert!(horizontal_bar(&ds, &sel).is_empty());
        let sel = PlayerDetailsSelection {
            reserve_prices: vec![ReservePrice(7.0)],
            specialisms: vec![],
            countries: vec![],
        };
        assert!(player_details(&ds, &sel).is_empty());
    }

    #[test]
    fn defaults_cover_distinct_values() {
        let ds = sample();
        let details = PlayerDetailsSelection::defaults(&ds);
        assert_eq!(details.reserve_prices, [ReservePrice(50.0)]);
        assert_eq!(details.countries, ds.distinct(Column::Country));
        assert_eq!(
            details.countries,
            ["India", "Australia", "England", "New Zealand"]
        );
        let sunburst = UncappedSelection::defaults(&ds);
        assert_eq!(sunburst.age_groups, ds.distinct(Column::AgeGroup));
        assert_eq!(sunburst.specialisms, ds.distinct(Column::Specialism));
    }

    #[test]
    fn empty_dataset_yields_empty_specs() {
        let ds = AuctionDataset::default();
        for view in View::ALL {
            let result = compute(&ds, &ViewSelection::defaults(view, &ds));
            assert!(result.is_empty());
            assert!(!result.chart.title.is_empty());
        }
    }
}
