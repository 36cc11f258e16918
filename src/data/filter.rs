use super::model::{Dataset, RangeMatch, VehicleRecord, VehicleSummary};

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Records in `city` whose electric range lies in `[range_min, range_max]`.
///
/// * `city` is `None` or empty → every city passes
/// * `range_min > range_max` → nothing passes
/// * a record with no known range → fails
pub fn filter_by_city_and_range<'a>(
    dataset: &'a Dataset,
    city: Option<&str>,
    range_min: i64,
    range_max: i64,
) -> Vec<&'a VehicleRecord> {
    let city = city.filter(|c| !c.is_empty());
    dataset
        .records()
        .iter()
        .filter(|r| city.map_or(true, |c| r.city == c))
        .filter(|r| r.range_within(range_min, range_max))
        .collect()
}

/// Records with electric range `>= min_range`, projected to the table columns.
pub fn filter_by_minimum_range(dataset: &Dataset, min_range: f64) -> Vec<RangeMatch> {
    dataset
        .records()
        .iter()
        .filter(|r| r.electric_range.is_some_and(|range| range as f64 >= min_range))
        .map(RangeMatch::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Case-insensitive exact match on make and model. Returns the summary of
/// the first match in dataset order, or `None` when nothing matches.
pub fn lookup_by_make_model(dataset: &Dataset, make: &str, model: &str) -> Option<VehicleSummary> {
    let make = make.to_lowercase();
    let model = model.to_lowercase();
    dataset
        .records()
        .iter()
        .find(|r| r.make.to_lowercase() == make && r.model.to_lowercase() == model)
        .map(|r| VehicleSummary {
            electric_range: r.electric_range,
            base_msrp: r.base_msrp,
            cafv_eligibility: r.cafv_eligibility.clone(),
        })
}
