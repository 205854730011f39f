use std::collections::BTreeMap;
use std::fmt;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – renderer-independent colour used in chart specs
// ---------------------------------------------------------------------------

/// An sRGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// The nine-colour qualitative "Set1" palette.
pub const SET1: [Rgb; 9] = [
    Rgb(228, 26, 28),
    Rgb(55, 126, 184),
    Rgb(77, 175, 74),
    Rgb(152, 78, 163),
    Rgb(255, 127, 0),
    Rgb(255, 255, 51),
    Rgb(166, 86, 40),
    Rgb(247, 129, 191),
    Rgb(153, 153, 153),
];

/// The first `n` colours of [`SET1`]. Never longer than the palette itself.
pub fn set1_prefix(n: usize) -> Vec<Rgb> {
    SET1.iter().take(n).copied().collect()
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a colour column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    /// Categories in the order they were assigned, for the legend.
    order: Vec<String>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours to `categories` in order.
    ///
    /// An explicit `sequence` is cycled through when shorter than the category
    /// list; without one, a generated palette sized to the categories is used.
    pub fn new(categories: &[String], sequence: &[Rgb]) -> Self {
        let palette = if sequence.is_empty() {
            generate_palette(categories.len())
        } else {
            sequence.to_vec()
        };
        let mut mapping = BTreeMap::new();
        let mut order = Vec::new();
        for category in categories {
            if mapping.contains_key(category) {
                continue;
            }
            let color = palette
                .get(order.len() % palette.len().max(1))
                .copied()
                .map(Color32::from)
                .unwrap_or(Color32::GRAY);
            mapping.insert(category.clone(), color);
            order.push(category.clone());
        }

        ColorMap {
            mapping,
            order,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (category → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|c| (c.clone(), self.color_for(c)))
            .collect()
    }
}
