use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::chart::{ChartKind, ChartSpec, Orientation, Template};
use crate::color::{generate_palette, ColorMap};
use crate::data::model::{distinct_in_order, Column, PlayerRecord};
use crate::state::AppState;
use crate::ui::hierarchy_plot;

const DARK_BACKGROUND: Color32 = Color32::from_rgb(17, 17, 17);
const MAX_MARKER_RADIUS: f32 = 20.0;

// ---------------------------------------------------------------------------
// Central panel: title, chart, filtered rows
// ---------------------------------------------------------------------------

/// Render the chart for the current view and the rows behind it.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(result)) = (&state.dataset, &state.result) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an auction file to explore it  (File → Open…, Ctrl+O, or drop it here)");
        });
        return;
    };

    ui.heading(state.view.label());
    ui.label(RichText::new(&result.chart.title).strong());

    let rows: Vec<&PlayerRecord> = result.rows(dataset).collect();
    if result.is_empty() {
        ui.label(RichText::new("No rows match the current selection.").italics());
    }

    if let Some(map) = &state.color_map {
        legend(ui, map);
    }

    let chart_height = (ui.available_height() * 0.6).max(240.0);
    let background = match result.chart.template {
        Template::Dark => DARK_BACKGROUND,
        Template::Default => ui.visuals().extreme_bg_color,
    };

    egui::Frame::default().fill(background).show(ui, |ui: &mut Ui| {
        ui.set_height(chart_height);
        let spec = &result.chart;
        match spec.kind {
            ChartKind::Treemap => hierarchy_plot::treemap(ui, spec, &rows, state.color_map.as_ref()),
            ChartKind::Sunburst => hierarchy_plot::sunburst(ui, spec, &rows, state.color_map.as_ref()),
            ChartKind::Scatter => scatter(ui, spec, &rows, state.color_map.as_ref()),
            ChartKind::Bar => match spec.orientation {
                Orientation::Vertical => grouped_bars(ui, spec, &rows),
                Orientation::Horizontal => faceted_bars(ui, spec, &rows, state.color_map.as_ref()),
            },
        }
    });

    ui.separator();
    rows_table(ui, &rows);
}

fn legend(ui: &mut Ui, map: &ColorMap) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (category, color) in map.legend_entries() {
            ui.label(RichText::new("■").color(color));
            ui.label(category);
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter / bubble
// ---------------------------------------------------------------------------

fn scatter(ui: &mut Ui, spec: &ChartSpec, rows: &[&PlayerRecord], colors: Option<&ColorMap>) {
    let (Some(x), Some(&y)) = (spec.x, spec.y.first()) else {
        return;
    };
    let max_size = spec
        .size
        .map(|c| rows.iter().filter_map(|r| r.number(c)).fold(0.0, f64::max))
        .unwrap_or(0.0);

    Plot::new("scatter")
        .x_axis_label(spec.axis_label(x))
        .y_axis_label(spec.axis_label(y))
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.0}, {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for r in rows {
                let (Some(px), Some(py)) = (r.number(x), r.number(y)) else {
                    continue;
                };
                // Marker area scales with the size column.
                let radius = match spec.size.and_then(|c| r.number(c)) {
                    Some(s) if max_size > 0.0 => {
                        (MAX_MARKER_RADIUS * (s / max_size).sqrt() as f32).max(2.0)
                    }
                    _ => 4.0,
                };
                let color = spec
                    .color
                    .zip(colors)
                    .map(|(c, map)| map.color_for(&r.display(c)))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let name = spec.hover_name.map(|c| r.display(c)).unwrap_or_default();

                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[px, py]]))
                        .name(name)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius)
                        .color(color.gamma_multiply(0.8)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped vertical bars: one category per x value, one bar per y series
// ---------------------------------------------------------------------------

fn grouped_bars(ui: &mut Ui, spec: &ChartSpec, rows: &[&PlayerRecord]) {
    let Some(x) = spec.x else {
        return;
    };
    let categories: Vec<String> = rows.iter().map(|r| r.display(x)).collect();
    let series_colors = generate_palette(spec.y.len());
    let slot = 0.8 / spec.y.len().max(1) as f64;
    let whole = spec.whole_number_values;

    let tick_labels = categories.clone();
    Plot::new("grouped_bars")
        .legend(Legend::default())
        .x_axis_label(spec.axis_label(x))
        .y_axis_label(spec.label_for("value"))
        .x_axis_formatter(move |mark: GridMark, _range| category_at(&tick_labels, mark.value))
        .label_formatter(move |name, value| {
            if whole {
                format!("{name}\n{:.0}", value.y)
            } else {
                format!("{name}\n{:.2}", value.y)
            }
        })
        .show(ui, |plot_ui| {
            for (k, &column) in spec.y.iter().enumerate() {
                let offset = -0.4 + slot * (k as f64 + 0.5);
                let bars: Vec<Bar> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        Bar::new(i as f64 + offset, r.number(column).unwrap_or(0.0))
                            .width(slot)
                            .name(&categories[i])
                    })
                    .collect();
                let color = series_colors
                    .get(k)
                    .copied()
                    .map(Color32::from)
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(spec.axis_label(column))
                        .color(color),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal stacked bars, one small multiple per facet value
// ---------------------------------------------------------------------------

fn faceted_bars(ui: &mut Ui, spec: &ChartSpec, rows: &[&PlayerRecord], colors: Option<&ColorMap>) {
    let Some(&y) = spec.y.first() else {
        return;
    };
    let categories = distinct_in_order(rows.iter().map(|r| r.display(y)));
    let facets: Vec<Option<String>> = match spec.facet_col {
        Some(facet) => distinct_in_order(rows.iter().map(|r| r.display(facet)))
            .into_iter()
            .map(Some)
            .collect(),
        None => vec![None],
    };
    let wrap = spec.facet_col_wrap.unwrap_or(facets.len()).max(1);
    let facet_height = ui.available_height() / facets.len().div_ceil(wrap).max(1) as f32;

    for chunk in facets.chunks(wrap) {
        ui.columns(wrap, |columns: &mut [Ui]| {
            for (ui, facet) in columns.iter_mut().zip(chunk) {
                let facet_rows: Vec<&PlayerRecord> = rows
                    .iter()
                    .copied()
                    .filter(|r| match (spec.facet_col, facet) {
                        (Some(c), Some(value)) => &r.display(c) == value,
                        _ => true,
                    })
                    .collect();
                let id = match (spec.facet_col, facet) {
                    (Some(c), Some(value)) => {
                        let title = format!("{}={value}", spec.axis_label(c));
                        ui.label(title.as_str());
                        title
                    }
                    _ => String::from("bars"),
                };
                let plot = FacetPlot {
                    id: &id,
                    y,
                    categories: &categories,
                    height: facet_height,
                };
                stacked_bars(ui, spec, &plot, &facet_rows, colors);
            }
        });
    }
}

struct FacetPlot<'a> {
    id: &'a str,
    y: Column,
    categories: &'a [String],
    height: f32,
}

fn stacked_bars(
    ui: &mut Ui,
    spec: &ChartSpec,
    plot: &FacetPlot<'_>,
    rows: &[&PlayerRecord],
    colors: Option<&ColorMap>,
) {
    let FacetPlot {
        id,
        y,
        categories,
        height,
    } = *plot;
    // One unit-length segment per player, stacked within its category and
    // grouped into one chart per colour so the legend lists colours.
    let mut stack_height: Vec<f64> = vec![0.0; categories.len()];
    let mut by_color: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
    for r in rows {
        let Some(idx) = categories.iter().position(|c| *c == r.display(y)) else {
            continue;
        };
        let key = spec.color.map(|c| r.display(c)).unwrap_or_default();
        let text = spec.text.map(|c| r.display(c)).unwrap_or_default();
        let bar = Bar::new(idx as f64, 1.0)
            .base_offset(stack_height[idx])
            .width(0.8)
            .name(text);
        stack_height[idx] += 1.0;
        by_color.entry(key).or_default().push(bar);
    }

    let tick_labels = categories.to_vec();
    Plot::new(("facet", id))
        .height(height.max(120.0) - ui.spacing().interact_size.y)
        .legend(Legend::default())
        .y_axis_label(spec.axis_label(y))
        .x_axis_label("count")
        .y_axis_formatter(move |mark: GridMark, _range| category_at(&tick_labels, mark.value))
        .show(ui, |plot_ui| {
            for (key, bars) in by_color {
                let color = colors.map(|m| m.color_for(&key)).unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.bar_chart(BarChart::new(bars).name(key).color(color).horizontal());
            }
        });
}

// ---------------------------------------------------------------------------
// Rows table
// ---------------------------------------------------------------------------

fn rows_table(ui: &mut Ui, rows: &[&PlayerRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(TableColumn::auto().at_least(60.0), Column::SOURCE.len())
        .header(20.0, |mut header| {
            for column in Column::SOURCE {
                header.col(|ui: &mut Ui| {
                    ui.strong(column.default_header());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let record = rows[row.index()];
                for column in Column::SOURCE {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.display(column));
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Tick label for a categorical axis; empty between categories.
fn category_at(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}
