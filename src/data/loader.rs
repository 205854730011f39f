use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{AuctionDataset, CellValue, Column, PlayerRecord, SchemaError};

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Source header for each column. Unmapped columns use the default header.
///
/// Read from a JSON object such as `{"reserve_price": "Base Price"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    headers: BTreeMap<Column, String>,
}

impl ColumnMapping {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading column mapping {}", path.display()))?;
        serde_json::from_str(&text).context("parsing column mapping")
    }

    pub fn header(&self, column: Column) -> &str {
        self.headers
            .get(&column)
            .map(String::as_str)
            .unwrap_or_else(|| column.default_header())
    }

    /// Position of every source column within `headers`.
    fn locate(&self, headers: &[String]) -> Result<Vec<(Column, usize)>, SchemaError> {
        Column::SOURCE
            .iter()
            .map(|&column| {
                let header = self.header(column);
                headers
                    .iter()
                    .position(|h| h == header)
                    .map(|idx| (column, idx))
                    .ok_or_else(|| SchemaError::MissingColumn {
                        column,
                        header: header.to_string(),
                    })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the auction table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one player per line (the published sheet)
/// * `.json`    – `[{ "Name": ..., "Country": ..., ... }, ...]`
/// * `.parquet` – flat columns named like the CSV headers
pub fn load_file(path: &Path, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path, mapping),
        "json" => load_json(path, mapping),
        "parquet" | "pq" => load_parquet(path, mapping),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} players from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_reader(file, mapping)
}

/// CSV layout: header row with column names, blank cells are nulls.
pub fn load_csv_reader<R: Read>(reader: R, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    log::info!("CSV columns: {headers:?}");

    let positions = mapping.locate(&headers)?;
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: BTreeMap<Column, CellValue> = positions
            .iter()
            .map(|&(column, idx)| {
                let cell = match record.get(idx) {
                    Some(s) if !s.is_empty() => CellValue::Text(s.to_string()),
                    _ => CellValue::Null,
                };
                (column, cell)
            })
            .collect();
        records.push(PlayerRecord::from_cells(row_no, &cells)?);
    }

    Ok(AuctionDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    load_json_str(&text, mapping)
}

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Name": "Pat Cummins", "Country": "Australia", "IPL": 42, ... },
///   ...
/// ]
/// ```
pub fn load_json_str(text: &str, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for column in Column::SOURCE {
            let header = mapping.header(column);
            let value = obj.get(header).ok_or_else(|| SchemaError::MissingColumn {
                column,
                header: header.to_string(),
            })?;
            cells.insert(column, json_to_cell(value));
        }
        records.push(PlayerRecord::from_cells(i, &cells)?);
    }

    Ok(AuctionDataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per header.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, mapping: &ColumnMapping) -> Result<AuctionDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // Checked against the file schema so a file with no rows still fails.
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    log::info!("Parquet columns: {headers:?}");
    let positions = mapping.locate(&headers)?;

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let mut cells = BTreeMap::new();
            for &(column, idx) in &positions {
                let value = extract_cell(batch.column(idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", headers[idx]))?;
                cells.insert(column, value);
            }
            records.push(PlayerRecord::from_cells(records.len(), &cells)?);
        }
    }

    Ok(AuctionDataset::from_records(records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => CellValue::Text(array_value_to_string(col, row)?),
    };
    Ok(value)
}
