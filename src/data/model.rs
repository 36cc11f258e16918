use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::location::GeoPoint;

// ---------------------------------------------------------------------------
// VehicleRecord – one row of the registration table
// ---------------------------------------------------------------------------

/// A single registered vehicle (one row of the source CSV).
///
/// Numeric columns that are frequently blank in the published extract are
/// kept as `Option`; an absent value never satisfies a numeric predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub vin: String,
    pub city: String,
    pub county: String,
    pub make: String,
    pub model: String,
    pub model_year: i32,
    pub electric_range: Option<i64>,
    pub base_msrp: Option<f64>,
    pub cafv_eligibility: String,
    pub location: GeoPoint,
}

impl VehicleRecord {
    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    /// Whether the electric range lies in `[min, max]`.
    pub fn range_within(&self, min: i64, max: i64) -> bool {
        self.electric_range.is_some_and(|r| min <= r && r <= max)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded registrations. Immutable once built; every query borrows it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<VehicleRecord>,
    /// Sorted distinct non-empty cities (dropdown options).
    cities: Vec<String>,
    /// Smallest and largest known electric range.
    range_bounds: Option<(i64, i64)>,
}

impl Dataset {
    /// Build lookup indices from the loaded records.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let cities: BTreeSet<&str> = records
            .iter()
            .map(|r| r.city.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        let cities = cities.into_iter().map(str::to_string).collect();

        let range_bounds = records
            .iter()
            .filter_map(|r| r.electric_range)
            .fold(None, |acc: Option<(i64, i64)>, r| match acc {
                None => Some((r, r)),
                Some((lo, hi)) => Some((lo.min(r), hi.max(r))),
            });

        Dataset {
            records,
            cities,
            range_bounds,
        }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn range_bounds(&self) -> Option<(i64, i64)> {
        self.range_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Registrations per model year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyCount {
    pub model_year: i32,
    pub count: usize,
}

/// County × CAFV eligibility counts. `counts[i][j]` is the number of
/// vehicles in `counties[i]` with eligibility `categories[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountyEligibilityMatrix {
    pub counties: Vec<String>,
    pub categories: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CountyEligibilityMatrix {
    /// Total vehicles in one county across all categories.
    pub fn county_total(&self, county: &str) -> usize {
        self.counties
            .iter()
            .position(|c| c == county)
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    /// The column for one category, aligned with `counties`.
    pub fn column(&self, category_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.counts.iter().map(move |row| row[category_idx])
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

/// A record projected to the columns of the matching-models table.
/// Serialized with the CSV header names as keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeMatch {
    #[serde(rename = "Model Year")]
    pub model_year: i32,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Electric Range")]
    pub electric_range: Option<i64>,
}

impl From<&VehicleRecord> for RangeMatch {
    fn from(r: &VehicleRecord) -> Self {
        RangeMatch {
            model_year: r.model_year,
            make: r.make.clone(),
            model: r.model.clone(),
            electric_range: r.electric_range,
        }
    }
}

/// What the make/model lookup reports for the first matching vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub electric_range: Option<i64>,
    pub base_msrp: Option<f64>,
    pub cafv_eligibility: String,
}

impl fmt::Display for VehicleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Electric Range: {}", OrUnknown(self.electric_range))?;
        writeln!(f, "Base MSRP: {}", OrUnknown(self.base_msrp))?;
        write!(f, "CAFV Eligibility: {}", self.cafv_eligibility)
    }
}

/// Renders `None` as "unknown" in user-facing text.
pub struct OrUnknown<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "unknown"),
        }
    }
}

/// A map point with its hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub tooltip: String,
}

impl From<&VehicleRecord> for MapMarker {
    fn from(r: &VehicleRecord) -> Self {
        MapMarker {
            latitude: r.latitude(),
            longitude: r.longitude(),
            tooltip: format!("{}: {} range", r.city, OrUnknown(r.electric_range)),
        }
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------
