use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::location::GeoPoint;
use super::model::{Dataset, VehicleRecord};

/// Number of rows kept when no explicit limit is configured.
pub const DEFAULT_ROW_LIMIT: usize = 2500;

/// Header names the loader cannot do without.
const REQUIRED_COLUMNS: [&str; 10] = [
    "VIN (1-10)",
    "Vehicle Location",
    "City",
    "County",
    "Model Year",
    "Electric Range",
    "Make",
    "Model",
    "Base MSRP",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the registration table from a `.csv` file, keeping at most
/// `row_limit` rows that carry a usable location.
pub fn load_file(path: &Path, row_limit: usize) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file, row_limit).with_context(|| format!("loading {}", path.display()))
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row as published by the state licensing department. Columns not
/// named here are ignored; `Vehicle Location` is read from the raw record
/// before the rest of the row is deserialized.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "VIN (1-10)")]
    vin: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "County")]
    county: String,
    #[serde(rename = "Make")]
    make: String,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Model Year")]
    model_year: i32,
    #[serde(rename = "Electric Range", deserialize_with = "csv::invalid_option")]
    electric_range: Option<i64>,
    #[serde(rename = "Base MSRP", deserialize_with = "csv::invalid_option")]
    base_msrp: Option<f64>,
    #[serde(rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility")]
    cafv_eligibility: String,
}

impl RawRow {
    fn into_record(self, location: GeoPoint) -> VehicleRecord {
        VehicleRecord {
            vin: self.vin,
            city: self.city,
            county: self.county,
            make: self.make,
            model: self.model,
            model_year: self.model_year,
            electric_range: self.electric_range,
            base_msrp: self.base_msrp,
            cafv_eligibility: self.cafv_eligibility,
            location,
        }
    }
}

/// Parse CSV from any reader.
///
/// Rows whose `Vehicle Location` is missing or not a `POINT (lon lat)` are
/// dropped first; the limit then keeps the first `row_limit` survivors in
/// file order.
pub fn load_csv<R: Read>(input: R, row_limit: usize) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("CSV missing column(s): {}", missing.join(", "));
    }

    let location_idx = headers
        .iter()
        .position(|h| h == "Vehicle Location")
        .context("CSV missing 'Vehicle Location' column")?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        if records.len() >= row_limit {
            break;
        }
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;

        // Location decides whether the row exists at all, so it is checked
        // before any other field can fail the load.
        let location = match raw.get(location_idx).unwrap_or("").parse::<GeoPoint>() {
            Ok(point) => point,
            Err(e) => {
                log::debug!("CSV row {row_no}: dropping row, {e}");
                dropped += 1;
                continue;
            }
        };

        let row: RawRow = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(row.into_record(location));
    }

    log::info!(
        "Loaded {} vehicle records ({dropped} dropped without location, limit {row_limit})",
        records.len()
    );

    Ok(Dataset::from_records(records))
}
