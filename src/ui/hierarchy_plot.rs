use std::f32::consts::TAU;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2,
};

use crate::chart::hierarchy::{self, HierarchyNode};
use crate::chart::ChartSpec;
use crate::color::{generate_palette, ColorMap};
use crate::data::model::PlayerRecord;

const HEADER_HEIGHT: f32 = 16.0;
const PADDING: f32 = 2.0;
const LABEL_FONT: f32 = 11.0;

// ---------------------------------------------------------------------------
// Layout (pure, no painting)
// ---------------------------------------------------------------------------

/// A laid-out treemap rectangle.
#[derive(Debug, Clone)]
pub struct TreemapCell<'a> {
    pub rect: Rect,
    pub node: &'a HierarchyNode,
    pub depth: usize,
    /// Index of the top-level ancestor, for colouring.
    pub branch: usize,
    /// Labels from the top level down to this node, joined by " / ".
    pub trail: String,
}

/// Slice-and-dice treemap: each node's children split its rectangle along
/// the longer side, in proportion to their row counts. Parents come before
/// their children in the output.
pub fn treemap_layout(root: &HierarchyNode, area: Rect) -> Vec<TreemapCell<'_>> {
    let mut out = Vec::new();
    split_rect(root, area, 1, None, "", &mut out);
    out
}

fn split_rect<'a>(
    node: &'a HierarchyNode,
    rect: Rect,
    depth: usize,
    branch: Option<usize>,
    trail: &str,
    out: &mut Vec<TreemapCell<'a>>,
) {
    let total = node.value.max(1) as f32;
    let horizontal = rect.width() >= rect.height();
    let mut cursor = if horizontal { rect.left() } else { rect.top() };

    for (i, child) in node.children.iter().enumerate() {
        let share = child.value as f32 / total;
        let cell = if horizontal {
            let w = rect.width() * share;
            let r = Rect::from_min_size(Pos2::new(cursor, rect.top()), Vec2::new(w, rect.height()));
            cursor += w;
            r
        } else {
            let h = rect.height() * share;
            let r = Rect::from_min_size(Pos2::new(rect.left(), cursor), Vec2::new(rect.width(), h));
            cursor += h;
            r
        };
        let branch = branch.unwrap_or(i);
        let child_trail = if trail.is_empty() {
            child.label.clone()
        } else {
            format!("{trail} / {}", child.label)
        };
        out.push(TreemapCell {
            rect: cell,
            node: child,
            depth,
            branch,
            trail: child_trail.clone(),
        });

        if !child.children.is_empty() {
            let mut inner = cell.shrink(PADDING);
            inner.min.y = (inner.min.y + HEADER_HEIGHT).min(inner.max.y);
            if inner.width() > 0.0 && inner.height() > 0.0 {
                split_rect(child, inner, depth + 1, Some(branch), &child_trail, out);
            }
        }
    }
}

/// A laid-out sunburst ring segment.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub node: &'a HierarchyNode,
    /// Ring number, 1 being the innermost.
    pub depth: usize,
    pub start: f32,
    pub end: f32,
    pub branch: usize,
    pub trail: String,
}

/// Angular layout: each node's children share its angle in proportion to
/// their row counts.
pub fn sunburst_layout(root: &HierarchyNode) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    split_angle(root, 0.0, TAU, 1, None, "", &mut out);
    out
}

fn split_angle<'a>(
    node: &'a HierarchyNode,
    start: f32,
    end: f32,
    depth: usize,
    branch: Option<usize>,
    trail: &str,
    out: &mut Vec<Segment<'a>>,
) {
    let total = node.value.max(1) as f32;
    let mut cursor = start;
    for (i, child) in node.children.iter().enumerate() {
        let sweep = (end - start) * child.value as f32 / total;
        let branch = branch.unwrap_or(i);
        let child_trail = if trail.is_empty() {
            child.label.clone()
        } else {
            format!("{trail} / {}", child.label)
        };
        out.push(Segment {
            node: child,
            depth,
            start: cursor,
            end: cursor + sweep,
            branch,
            trail: child_trail.clone(),
        });
        split_angle(child, cursor, cursor + sweep, depth + 1, Some(branch), &child_trail, out);
        cursor += sweep;
    }
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Colour of a node: the colour column's value when the whole node shares
/// one, else its top-level branch, lightened with depth.
fn node_color(
    node: &HierarchyNode,
    branch: usize,
    depth: usize,
    palette: &[Color32],
    colors: Option<&ColorMap>,
) -> Color32 {
    if let (Some(map), Some(key)) = (colors, node.color_key.as_deref()) {
        return map.color_for(key);
    }
    let base = palette.get(branch).copied().unwrap_or(Color32::GRAY);
    lighten(base, 0.18 * depth.saturating_sub(1) as f32)
}

fn lighten(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 0.8);
    let mix = |v: u8| (v as f32 + (255.0 - v as f32) * t) as u8;
    Color32::from_rgb(mix(c.r()), mix(c.g()), mix(c.b()))
}

fn branch_palette(root: &HierarchyNode) -> Vec<Color32> {
    generate_palette(root.children.len())
        .into_iter()
        .map(Color32::from)
        .collect()
}

/// Shorten `label` to roughly fit `width` pixels.
fn fit_label(label: &str, width: f32) -> Option<String> {
    let max_chars = (width / (LABEL_FONT * 0.6)) as usize;
    if max_chars < 3 {
        return None;
    }
    if label.chars().count() <= max_chars {
        return Some(label.to_string());
    }
    let cut: String = label.chars().take(max_chars - 1).collect();
    Some(format!("{cut}…"))
}

fn tooltip(response: egui::Response, trail: &str, value: usize) {
    response.on_hover_text_at_pointer(format!("{trail}\ncount: {value}"));
}

/// Draw the spec's path as a treemap.
pub fn treemap(ui: &mut Ui, spec: &ChartSpec, rows: &[&PlayerRecord], colors: Option<&ColorMap>) {
    let root = hierarchy::build(rows.iter().copied(), &spec.path, spec.color);
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let area = response.rect.shrink(PADDING);
    let cells = treemap_layout(&root, area);
    let palette = branch_palette(&root);

    for cell in &cells {
        let fill = node_color(cell.node, cell.branch, cell.depth, &palette, colors);
        painter.rect_filled(cell.rect, 2.0, fill);
        painter.rect_stroke(cell.rect, 2.0, Stroke::new(1.0, Color32::WHITE), egui::StrokeKind::Inside);

        let is_leaf = cell.node.children.is_empty();
        if is_leaf && cell.rect.height() < LABEL_FONT + 2.0 {
            continue;
        }
        if let Some(text) = fit_label(&cell.node.label, cell.rect.width() - 2.0 * PADDING) {
            let (anchor, pos) = if is_leaf {
                (Align2::CENTER_CENTER, cell.rect.center())
            } else {
                (Align2::LEFT_TOP, cell.rect.left_top() + Vec2::splat(PADDING))
            };
            painter.text(pos, anchor, text, FontId::proportional(LABEL_FONT), Color32::BLACK);
        }
    }

    if let Some(pointer) = response.hover_pos() {
        // Children follow their parents, so the last hit is the deepest.
        if let Some(cell) = cells.iter().rev().find(|c| c.rect.contains(pointer)) {
            let (trail, value) = (cell.trail.clone(), cell.node.value);
            tooltip(response, &trail, value);
        }
    }
}

/// Draw the spec's path as a sunburst.
pub fn sunburst(ui: &mut Ui, spec: &ChartSpec, rows: &[&PlayerRecord], colors: Option<&ColorMap>) {
    let root = hierarchy::build(rows.iter().copied(), &spec.path, spec.color);
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - PADDING;
    let rings = root.depth().max(1) as f32;
    let ring_width = radius / rings;
    let segments = sunburst_layout(&root);
    let palette = branch_palette(&root);
    let background = ui.visuals().extreme_bg_color;

    let polar = |angle: f32, r: f32| center + Vec2::angled(angle) * r;

    for seg in &segments {
        let inner = ring_width * (seg.depth - 1) as f32;
        let outer = inner + ring_width;
        let fill = node_color(seg.node, seg.branch, seg.depth, &palette, colors);

        // Ring segments are not convex; paint them as thin convex slices.
        let steps = (((seg.end - seg.start) / 0.05).ceil() as usize).max(1);
        let step = (seg.end - seg.start) / steps as f32;
        for k in 0..steps {
            let a0 = seg.start + step * k as f32;
            let a1 = a0 + step;
            painter.add(Shape::convex_polygon(
                vec![polar(a0, inner), polar(a0, outer), polar(a1, outer), polar(a1, inner)],
                fill,
                Stroke::NONE,
            ));
        }
        let edge = Stroke::new(1.0, background);
        painter.line_segment([polar(seg.start, inner), polar(seg.start, outer)], edge);

        let mid = (seg.start + seg.end) * 0.5;
        let arc = (seg.end - seg.start) * (inner + outer) * 0.5;
        if let Some(text) = fit_label(&seg.node.label, ring_width.min(arc.max(0.0)) * 1.6) {
            if arc > LABEL_FONT * 1.5 {
                let pos = polar(mid, (inner + outer) * 0.5);
                painter.text(pos, Align2::CENTER_CENTER, text, FontId::proportional(LABEL_FONT), Color32::BLACK);
            }
        }
    }

    if let Some(pointer) = response.hover_pos() {
        let offset = pointer - center;
        let r = offset.length();
        let angle = offset.angle().rem_euclid(TAU);
        let ring = (r / ring_width).floor() as usize + 1;
        let hit = segments
            .iter()
            .find(|s| s.depth == ring && angle >= s.start && angle < s.end);
        if let Some(seg) = hit {
            let (trail, value) = (seg.trail.clone(), seg.node.value);
            tooltip(response, &trail, value);
        }
    }
}
