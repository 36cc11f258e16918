use eframe::egui::{Color32, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points,
};

use crate::data::model::{MapMarker, YearlyCount};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

/// Markers closer than this (degrees) to the pointer get their tooltip shown.
const HOVER_RADIUS_DEG: f64 = 0.02;

// ---------------------------------------------------------------------------
// Map (lon/lat scatter)
// ---------------------------------------------------------------------------

/// Vehicles passing the city/range filters, plotted at their location.
pub fn vehicle_map(ui: &mut Ui, state: &AppState) {
    let [lat, lon] = state.map_center;
    let span = state.map_span_degrees;
    let markers = state.markers.clone();
    let hover_markers = markers.clone();

    Plot::new("vehicle_map")
        .height(500.0)
        .data_aspect(1.0 / lat.to_radians().cos() as f32)
        .include_x(lon - span)
        .include_x(lon + span)
        .include_y(lat - span / 2.0)
        .include_y(lat + span / 2.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            match nearest_marker(&hover_markers, value.x, value.y, HOVER_RADIUS_DEG) {
                Some(m) => m.tooltip.clone(),
                None => format!("{:.4}, {:.4}", value.y, value.x),
            }
        })
        .show(ui, |plot_ui| {
            let points: PlotPoints = markers.iter().map(|m| [m.longitude, m.latitude]).collect();
            plot_ui.points(
                Points::new(points)
                    .shape(MarkerShape::Circle)
                    .radius(3.0)
                    .color(Color32::from_rgb(30, 120, 220)),
            );
        });
}

/// The marker nearest to `(lon, lat)`, if any lies within `max_dist` degrees.
pub fn nearest_marker(
    markers: &[MapMarker],
    lon: f64,
    lat: f64,
    max_dist: f64,
) -> Option<&MapMarker> {
    markers
        .iter()
        .map(|m| (m, (m.longitude - lon).hypot(m.latitude - lat)))
        .filter(|(_, d)| *d <= max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(m, _)| m)
}

// ---------------------------------------------------------------------------
// Registrations over time (line chart)
// ---------------------------------------------------------------------------

/// Model years sit on a category axis: point `i` is the `i`-th year present,
/// so gaps between years take no space.
pub fn yearly_chart(ui: &mut Ui, state: &AppState) {
    let (points, years) = yearly_points(&state.yearly_counts);

    Plot::new("yearly_registrations")
        .height(CHART_HEIGHT)
        .x_axis_label("Model Year")
        .y_axis_label("Number of Registrations")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&years, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Registrations")
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name("Registrations")
                    .shape(MarkerShape::Circle)
                    .radius(4.0),
            );
        });
}

/// Chart points at category indices, plus the year label of each index.
fn yearly_points(counts: &[YearlyCount]) -> (Vec<[f64; 2]>, Vec<String>) {
    counts
        .iter()
        .enumerate()
        .map(|(i, c)| ([i as f64, c.count as f64], c.model_year.to_string()))
        .unzip()
}

// ---------------------------------------------------------------------------
// CAFV eligibility by county (stacked bar chart)
// ---------------------------------------------------------------------------

pub fn eligibility_chart(ui: &mut Ui, state: &AppState) {
    let matrix = &state.eligibility;
    if matrix.is_empty() {
        ui.label("No county data.");
        return;
    }

    let mut charts: Vec<BarChart> = Vec::with_capacity(matrix.categories.len());
    for (j, category) in matrix.categories.iter().enumerate() {
        let bars: Vec<Bar> = matrix
            .column(j)
            .zip(&matrix.counties)
            .enumerate()
            .map(|(i, (count, county))| {
                Bar::new(i as f64, count as f64)
                    .name(format!(
                        "{county} ({} vehicles) / {category}",
                        matrix.county_total(county)
                    ))
                    .width(0.7)
            })
            .collect();

        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(category)
            .color(state.palette.color_at(j))
            .stack_on(&below);
        charts.push(chart);
    }

    let counties = matrix.counties.clone();
    Plot::new("eligibility_by_county")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("County")
        .y_axis_label("Number of Vehicles")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&counties, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label for a category axis plotted at indices `0..labels.len()`.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(lon: f64, lat: f64, tooltip: &str) -> MapMarker {
        MapMarker {
            latitude: lat,
            longitude: lon,
            tooltip: tooltip.into(),
        }
    }

    #[test]
    fn nearest_marker_within_radius() {
        let markers = vec![
            marker(-122.33, 47.61, "Seattle: 220 range"),
            marker(-122.44, 47.25, "Tacoma: 84 range"),
        ];
        let hit = nearest_marker(&markers, -122.331, 47.612, HOVER_RADIUS_DEG);
        assert_eq!(hit.map(|m| m.tooltip.as_str()), Some("Seattle: 220 range"));
        assert!(nearest_marker(&markers, -121.0, 46.0, HOVER_RADIUS_DEG).is_none());
        assert!(nearest_marker(&[], -122.33, 47.61, HOVER_RADIUS_DEG).is_none());
    }

    #[test]
    fn axis_labels() {
        let counties = vec!["King".to_string(), "Pierce".to_string()];
        assert_eq!(category_label(&counties, 1.0), "Pierce");
        assert_eq!(category_label(&counties, 0.5), "");
        assert_eq!(category_label(&counties, 2.0), "");
        assert_eq!(category_label(&counties, -1.0), "");
    }

    #[test]
    fn year_axis_skips_missing_years() {
        let counts: Vec<YearlyCount> = [(2011, 4), (2017, 9), (2023, 2)]
            .into_iter()
            .map(|(model_year, count)| YearlyCount { model_year, count })
            .collect();
        let (points, years) = yearly_points(&counts);
        assert_eq!(points, [[0.0, 4.0], [1.0, 9.0], [2.0, 2.0]]);
        assert_eq!(years, ["2011", "2017", "2023"]);

        assert_eq!(category_label(&years, 0.0), "2011");
        assert_eq!(category_label(&years, 1.0), "2017");
        assert_eq!(category_label(&years, 2.0), "2023");
        assert_eq!(category_label(&years, 2017.0), "");
    }
}
