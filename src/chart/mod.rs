/// Chart layer: a renderer-agnostic description of what to draw.
///
/// ```text
///   views ──► ChartSpec (kind, path, encodings, title, options)
///                 │
///                 ├──► ui::plot       draws it with egui / egui_plot
///                 └──► --headless     prints it as JSON
/// ```
pub mod hierarchy;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::Rgb;
use crate::data::model::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Treemap,
    Sunburst,
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    Default,
    Dark,
}

/// Declarative chart description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Hierarchical grouping for treemap / sunburst, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Column>,
    pub x: Option<Column>,
    /// One or more value series; several series are drawn as grouped bars.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<Column>,
    pub color: Option<Column>,
    pub size: Option<Column>,
    pub facet_col: Option<Column>,
    pub facet_col_wrap: Option<usize>,
    pub text: Option<Column>,
    pub hover_name: Option<Column>,
    pub orientation: Orientation,
    /// Axis / legend label overrides keyed by header (or `value`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Hover values are shown without decimals.
    pub whole_number_values: bool,
    pub template: Template,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub color_sequence: Vec<Rgb>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        ChartSpec {
            kind,
            title: title.into(),
            path: Vec::new(),
            x: None,
            y: Vec::new(),
            color: None,
            size: None,
            facet_col: None,
            facet_col_wrap: None,
            text: None,
            hover_name: None,
            orientation: Orientation::default(),
            labels: BTreeMap::new(),
            whole_number_values: false,
            template: Template::default(),
            color_sequence: Vec::new(),
        }
    }

    pub fn path(mut self, path: &[Column]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub fn x(mut self, column: Column) -> Self {
        self.x = Some(column);
        self
    }

    pub fn y(mut self, columns: &[Column]) -> Self {
        self.y = columns.to_vec();
        self
    }

    pub fn color(mut self, column: Column) -> Self {
        self.color = Some(column);
        self
    }

    pub fn size(mut self, column: Column) -> Self {
        self.size = Some(column);
        self
    }

    pub fn facet_col(mut self, column: Column, wrap: usize) -> Self {
        self.facet_col = Some(column);
        self.facet_col_wrap = Some(wrap);
        self
    }

    pub fn text(mut self, column: Column) -> Self {
        self.text = Some(column);
        self
    }

    pub fn hover_name(mut self, column: Column) -> Self {
        self.hover_name = Some(column);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn label(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels.insert(key.into(), text.into());
        self
    }

    pub fn whole_number_values(mut self) -> Self {
        self.whole_number_values = true;
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn color_sequence(mut self, colors: Vec<Rgb>) -> Self {
        self.color_sequence = colors;
        self
    }

    /// Display label for a header key, honouring overrides.
    pub fn label_for(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn axis_label(&self, column: Column) -> String {
        self.label_for(column.default_header())
    }
}
