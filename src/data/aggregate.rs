use std::collections::{BTreeMap, BTreeSet};

use super::model::{CountyEligibilityMatrix, Dataset, YearlyCount};

// ---------------------------------------------------------------------------
// Group-by aggregations
// ---------------------------------------------------------------------------

/// Registrations per model year, ascending by year.
pub fn yearly_registration_counts(dataset: &Dataset) -> Vec<YearlyCount> {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for r in dataset.records() {
        *per_year.entry(r.model_year).or_default() += 1;
    }
    per_year
        .into_iter()
        .map(|(model_year, count)| YearlyCount { model_year, count })
        .collect()
}

/// Count vehicles per (county, eligibility) and pivot eligibility into
/// columns. Combinations never seen are zero. Records with an empty county
/// or eligibility are left out, as a group-by drops missing keys.
pub fn county_eligibility_breakdown(dataset: &Dataset) -> CountyEligibilityMatrix {
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut categories: BTreeSet<&str> = BTreeSet::new();

    for r in dataset.records() {
        if r.county.is_empty() || r.cafv_eligibility.is_empty() {
            continue;
        }
        categories.insert(r.cafv_eligibility.as_str());
        *pairs.entry((r.county.as_str(), r.cafv_eligibility.as_str())).or_default() += 1;
    }

    let categories: Vec<&str> = categories.into_iter().collect();
    let mut counties: Vec<String> = Vec::new();
    let mut counts: Vec<Vec<usize>> = Vec::new();

    // BTreeMap iteration is ordered by county first, so each county's
    // pairs are contiguous.
    for ((county, category), n) in pairs {
        if counties.last().map(String::as_str) != Some(county) {
            counties.push(county.to_string());
            counts.push(vec![0; categories.len()]);
        }
        if let (Some(row), Ok(col)) = (counts.last_mut(), categories.binary_search(&category)) {
            row[col] = n;
        }
    }

    CountyEligibilityMatrix {
        counties,
        categories: categories.into_iter().map(str::to_string).collect(),
        counts,
    }
}
