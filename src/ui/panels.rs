use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Column;
use crate::data::views::{
    CapsField, OriginMode, View, ViewSelection, BATTING_HANDS,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart type and selection widgets
// ---------------------------------------------------------------------------

/// Render the left "Select Options" panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Options");
    ui.separator();

    ui.strong("Select Chart Type");
    let current = state.view;
    egui::ComboBox::from_id_salt("chart_type")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for view in View::ALL {
                if ui.selectable_label(current == view, view.label()).clicked() {
                    state.set_view(view);
                }
            }
        });
    ui.separator();

    let (Some(dataset), Some(selection)) = (&state.dataset, &mut state.selection) else {
        ui.label("No dataset loaded.");
        return;
    };

    let changed = ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match selection {
            ViewSelection::SpecialismByOrigin { origin }
            | ViewSelection::AgeGroupByOrigin { origin } => origin_combo(ui, origin),
            ViewSelection::Bubble { origin, caps } => {
                let a = origin_combo(ui, origin);
                let b = caps_combo(ui, caps);
                a || b
            }
            ViewSelection::PlayerDetails(sel) => {
                let a = multiselect(ui, "Select Reserve Prices", dataset.reserve_prices(), &mut sel.reserve_prices);
                let b = multiselect(ui, "Select Specialisms", dataset.distinct(Column::Specialism), &mut sel.specialisms);
                let c = multiselect(ui, "Select Countries", dataset.distinct(Column::Country), &mut sel.countries);
                a || b || c
            }
            ViewSelection::UncappedSunburst(sel) => {
                let a = multiselect(ui, "Select Countries", dataset.distinct(Column::Country), &mut sel.countries);
                let b = multiselect(ui, "Select Specialisms", dataset.distinct(Column::Specialism), &mut sel.specialisms);
                let c = multiselect(ui, "Select Age Groups", dataset.distinct(Column::AgeGroup), &mut sel.age_groups);
                a || b || c
            }
            ViewSelection::HorizontalBar(sel) => {
                let hands: Vec<String> = BATTING_HANDS.iter().map(|h| h.to_string()).collect();
                let a = multiselect(ui, "Select Countries", dataset.distinct(Column::Country), &mut sel.countries);
                let b = multiselect(ui, "Select R/L", &hands, &mut sel.batting_hands);
                let c = multiselect(ui, "Select Specialisms", dataset.distinct(Column::Specialism), &mut sel.specialisms);
                a || b || c
            }
        })
        .inner;

    if changed {
        state.recompute();
    }
}

fn origin_combo(ui: &mut Ui, origin: &mut OriginMode) -> bool {
    ui.strong("Select Origin");
    let before = *origin;
    egui::ComboBox::from_id_salt("origin")
        .selected_text(origin.label())
        .show_ui(ui, |ui: &mut Ui| {
            for mode in OriginMode::ALL {
                ui.selectable_value(origin, mode, mode.label());
            }
        });
    *origin != before
}

fn caps_combo(ui: &mut Ui, caps: &mut CapsField) -> bool {
    ui.strong("Select Caps");
    let before = *caps;
    egui::ComboBox::from_id_salt("caps")
        .selected_text(caps.label())
        .show_ui(ui, |ui: &mut Ui| {
            for field in CapsField::ALL {
                ui.selectable_value(caps, field, field.label());
            }
        });
    *caps != before
}

/// Checkbox list over `options`. Newly ticked values go to the end of
/// `selected`, so it keeps the order the user picked them in.
fn multiselect<T: Clone + PartialEq + ToString>(
    ui: &mut Ui,
    title: &str,
    options: &[T],
    selected: &mut Vec<T>,
) -> bool {
    let mut changed = false;
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = options.to_vec();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for value in options {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    if checked {
                        selected.push(value.clone());
                    } else {
                        selected.retain(|v| v != value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.result.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export spec…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.result.as_ref().map_or(0, |r| r.indices.len());
            ui.label(format!("{} players loaded, {visible} shown", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open auction data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart spec")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();

    let Some(path) = file else {
        return;
    };
    let written = state
        .export_json()
        .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));
    match written {
        Ok(()) => {
            log::info!("Exported chart spec to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
