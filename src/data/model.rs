use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel country for domestic players.
pub const HOME_COUNTRY: &str = "India";
/// Sentinel state association for overseas players.
pub const FOREIGN_ASSOCIATION: &str = "FOREIGNER";
/// Capped-status value of players without an international cap.
pub const UNCAPPED: &str = "Uncapped";

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as read from the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, before it is checked against the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number. Text is parsed, so CSV cells work too.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – every field a view can filter, group or encode on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Country,
    StateAssociation,
    Specialism,
    AgeGroup,
    BattingHand,
    CappedStatus,
    ReservePrice,
    Age,
    TestCaps,
    OdiCaps,
    T20Caps,
    IplCaps,
    LabelSpecialism,
    LabelAge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Text,
    Decimal,
    Count,
}

impl Column {
    /// Columns read from the source table, in header order.
    pub const SOURCE: [Column; 13] = [
        Column::Name,
        Column::Country,
        Column::StateAssociation,
        Column::Specialism,
        Column::AgeGroup,
        Column::BattingHand,
        Column::CappedStatus,
        Column::ReservePrice,
        Column::Age,
        Column::TestCaps,
        Column::OdiCaps,
        Column::T20Caps,
        Column::IplCaps,
    ];

    /// Header of the column in the published auction sheet.
    pub fn default_header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Country => "Country",
            Column::StateAssociation => "State Association",
            Column::Specialism => "Specialism",
            Column::AgeGroup => "Age Group",
            Column::BattingHand => "R/L",
            Column::CappedStatus => "C/U/A",
            Column::ReservePrice => "Reserve Price Rs Lakh",
            Column::Age => "Age",
            Column::TestCaps => "Test caps",
            Column::OdiCaps => "ODI caps",
            Column::T20Caps => "T20 caps",
            Column::IplCaps => "IPL",
            Column::LabelSpecialism => "Label",
            Column::LabelAge => "Label_Age",
        }
    }

    fn kind(self) -> ColumnKind {
        match self {
            Column::ReservePrice | Column::Age => ColumnKind::Decimal,
            Column::TestCaps | Column::OdiCaps | Column::T20Caps | Column::IplCaps => {
                ColumnKind::Count
            }
            _ => ColumnKind::Text,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() != ColumnKind::Text
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_header())
    }
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// The source table does not fit the auction schema. Always fatal at load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("missing column '{header}' (expected for {column:?})")]
    MissingColumn { column: Column, header: String },
    #[error("row {row}: column '{column}' expected a number, found '{found}'")]
    NotANumber { row: usize, column: Column, found: String },
    #[error("row {row}: column '{column}' must be a non-negative integer, found '{found}'")]
    InvalidCount { row: usize, column: Column, found: String },
}

// ---------------------------------------------------------------------------
// ReservePrice – numeric, but used as a category by the multiselect
// ---------------------------------------------------------------------------

/// Reserve price in lakhs. Totally ordered so it can be a selection key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservePrice(pub f64);

impl PartialEq for ReservePrice {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for ReservePrice {}

impl PartialOrd for ReservePrice {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReservePrice {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for ReservePrice {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for ReservePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_number(self.0, f)
    }
}

/// Integral values print without a fractional part (`50`, not `50.0`).
fn format_number(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        write!(f, "{v:.0}")
    } else {
        write!(f, "{v}")
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the auction table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub country: String,
    pub state_association: String,
    pub specialism: String,
    pub age_group: String,
    pub batting_hand: String,
    pub capped_status: String,
    pub reserve_price: ReservePrice,
    pub age: f64,
    pub test_caps: u32,
    pub odi_caps: u32,
    pub t20_caps: u32,
    pub ipl_caps: u32,
    /// `specialism + ": " + name`
    pub label_specialism: String,
    /// `age_group + ": " + name`
    pub label_age: String,
}

impl PlayerRecord {
    /// Validate one row of raw cells and derive the display labels.
    ///
    /// Text columns accept anything (a missing cell becomes an empty category);
    /// numeric columns must parse, and caps must be non-negative integers.
    pub fn from_cells(row: usize, cells: &BTreeMap<Column, CellValue>) -> Result<Self, SchemaError> {
        let text = |column: Column| match cells.get(&column) {
            Some(CellValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        };
        let number = |column: Column| -> Result<f64, SchemaError> {
            let cell = cells.get(&column).unwrap_or(&CellValue::Null);
            cell.as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SchemaError::NotANumber {
                    row,
                    column,
                    found: cell.to_string(),
                })
        };
        let count = |column: Column| -> Result<u32, SchemaError> {
            let v = number(column)?;
            if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
                return Err(SchemaError::InvalidCount {
                    row,
                    column,
                    found: v.to_string(),
                });
            }
            Ok(v as u32)
        };

        let name = text(Column::Name);
        let specialism = text(Column::Specialism);
        let age_group = text(Column::AgeGroup);

        Ok(PlayerRecord {
            label_specialism: format!("{specialism}: {name}"),
            label_age: format!("{age_group}: {name}"),
            country: text(Column::Country),
            state_association: text(Column::StateAssociation),
            batting_hand: text(Column::BattingHand),
            capped_status: text(Column::CappedStatus),
            reserve_price: ReservePrice(number(Column::ReservePrice)?),
            age: number(Column::Age)?,
            test_caps: count(Column::TestCaps)?,
            odi_caps: count(Column::OdiCaps)?,
            t20_caps: count(Column::T20Caps)?,
            ipl_caps: count(Column::IplCaps)?,
            name,
            specialism,
            age_group,
        })
    }

    /// Text value of a text column, `None` for numeric columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        let s = match column {
            Column::Name => &self.name,
            Column::Country => &self.country,
            Column::StateAssociation => &self.state_association,
            Column::Specialism => &self.specialism,
            Column::AgeGroup => &self.age_group,
            Column::BattingHand => &self.batting_hand,
            Column::CappedStatus => &self.capped_status,
            Column::LabelSpecialism => &self.label_specialism,
            Column::LabelAge => &self.label_age,
            _ => return None,
        };
        Some(s.as_str())
    }

    /// Numeric value of a numeric column, `None` for text columns.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::ReservePrice => Some(self.reserve_price.0),
            Column::Age => Some(self.age),
            Column::TestCaps => Some(self.test_caps as f64),
            Column::OdiCaps => Some(self.odi_caps as f64),
            Column::T20Caps => Some(self.t20_caps as f64),
            Column::IplCaps => Some(self.ipl_caps as f64),
            _ => None,
        }
    }

    /// Cell rendered for tables and labels.
    pub fn display(&self, column: Column) -> String {
        match column {
            Column::ReservePrice => self.reserve_price.to_string(),
            _ => match self.text(column) {
                Some(s) => s.to_string(),
                None => self.number(column).map(|v| v.to_string()).unwrap_or_default(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// AuctionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full table with distinct values per column, in first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct AuctionDataset {
    pub records: Vec<PlayerRecord>,
    distinct_text: BTreeMap<Column, Vec<String>>,
    distinct_prices: Vec<ReservePrice>,
}

impl AuctionDataset {
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let distinct_text = Column::SOURCE
            .iter()
            .chain([Column::LabelSpecialism, Column::LabelAge].iter())
            .filter(|c| !c.is_numeric())
            .map(|&c| {
                let values = distinct_in_order(
                    records.iter().filter_map(|r| r.text(c)).map(str::to_string),
                );
                (c, values)
            })
            .collect();
        let distinct_prices = distinct_in_order(records.iter().map(|r| r.reserve_price));

        AuctionDataset {
            records,
            distinct_text,
            distinct_prices,
        }
    }

    /// Distinct values of a text column; empty for numeric columns.
    pub fn distinct(&self, column: Column) -> &[String] {
        self.distinct_text
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reserve_prices(&self) -> &[ReservePrice] {
        &self.distinct_prices
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Values with duplicates removed, keeping the first occurrence of each.
pub(crate) fn distinct_in_order<T: Clone + Eq + Hash>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record the way the loader would, for tests across the crate.
    pub(crate) fn player(
        name: &str,
        country: &str,
        state_association: &str,
        specialism: &str,
        age_group: &str,
    ) -> PlayerRecord {
        let mut cells = BTreeMap::new();
        cells.insert(Column::Name, CellValue::Text(name.into()));
        cells.insert(Column::Country, CellValue::Text(country.into()));
        cells.insert(Column::StateAssociation, CellValue::Text(state_association.into()));
        cells.insert(Column::Specialism, CellValue::Text(specialism.into()));
        cells.insert(Column::AgeGroup, CellValue::Text(age_group.into()));
        cells.insert(Column::BattingHand, CellValue::Text("RHB".into()));
        cells.insert(Column::CappedStatus, CellValue::Text("Capped".into()));
        cells.insert(Column::ReservePrice, CellValue::Integer(50));
        cells.insert(Column::Age, CellValue::Integer(27));
        cells.insert(Column::TestCaps, CellValue::Integer(1));
        cells.insert(Column::OdiCaps, CellValue::Integer(2));
        cells.insert(Column::T20Caps, CellValue::Integer(3));
        cells.insert(Column::IplCaps, CellValue::Integer(4));
        PlayerRecord::from_cells(0, &cells).unwrap()
    }

    #[test]
    fn labels_join_category_and_name() {
        let r = player("Pat Cummins", "Australia", "FOREIGNER", "BOWLER", "28-32");
        assert_eq!(r.label_specialism, "BOWLER: Pat Cummins");
        assert_eq!(r.label_age, "28-32: Pat Cummins");
        assert_eq!(r.text(Column::LabelSpecialism), Some("BOWLER: Pat Cummins"));
    }

    #[test]
    fn csv_text_cells_parse_as_numbers() {
        let mut cells = BTreeMap::new();
        cells.insert(Column::ReservePrice, CellValue::Text("12.5".into()));
        cells.insert(Column::Age, CellValue::Text(" 31 ".into()));
        for c in [Column::TestCaps, Column::OdiCaps, Column::T20Caps, Column::IplCaps] {
            cells.insert(c, CellValue::Text("0".into()));
        }
        let r = PlayerRecord::from_cells(3, &cells).unwrap();
        assert_eq!(r.reserve_price, ReservePrice(12.5));
        assert_eq!(r.age, 31.0);
        assert_eq!(r.name, "");
        assert_eq!(r.label_age, ": ");
    }

    #[test]
    fn bad_numbers_are_schema_errors() {
        let mut cells = BTreeMap::new();
        cells.insert(Column::ReservePrice, CellValue::Integer(50));
        cells.insert(Column::Age, CellValue::Text("old".into()));
        let err = PlayerRecord::from_cells(7, &cells).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotANumber {
                row: 7,
                column: Column::Age,
                found: "old".into()
            }
        );

        cells.insert(Column::Age, CellValue::Integer(30));
        cells.insert(Column::TestCaps, CellValue::Integer(-1));
        let err = PlayerRecord::from_cells(7, &cells).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidCount { column: Column::TestCaps, .. }));
    }

    #[test]
    fn reserve_price_display_drops_integral_fraction() {
        assert_eq!(ReservePrice(50.0).to_string(), "50");
        assert_eq!(ReservePrice(12.5).to_string(), "12.5");
    }

    #[test]
    fn distinct_values_keep_first_encounter_order() {
        let ds = AuctionDataset::from_records(vec![
            player("A", "South Africa", "FOREIGNER", "BATTER", "25-28"),
            player("B", "India", "Mumbai", "BOWLER", "<25"),
            player("C", "South Africa", "FOREIGNER", "BATTER", "<25"),
        ]);
        assert_eq!(ds.distinct(Column::Country), ["South Africa", "India"]);
        assert_eq!(ds.distinct(Column::AgeGroup), ["25-28", "<25"]);
        assert_eq!(ds.reserve_prices(), [ReservePrice(50.0)]);
        assert!(ds.distinct(Column::Age).is_empty());
    }

    #[test]
    fn distinct_in_order_keeps_first_occurrence() {
        let values = ["RHB", "LHB", "RHB", "LHB"].iter().map(|s| s.to_string());
        assert_eq!(distinct_in_order(values), ["RHB", "LHB"]);
    }
}
