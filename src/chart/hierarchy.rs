use serde::Serialize;

use crate::data::model::{Column, PlayerRecord};

/// Label used for an empty category.
pub const BLANK_LABEL: &str = "(blank)";

/// One node of a treemap / sunburst: a category and the rows beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub label: String,
    /// Number of rows under this node.
    pub value: usize,
    /// The colour-column value shared by every row under this node, if any.
    pub color_key: Option<String>,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn new(label: String) -> Self {
        HierarchyNode {
            label,
            value: 0,
            color_key: None,
            children: Vec::new(),
        }
    }

    /// Number of levels below this node.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn absorb(&mut self, color: Option<&str>, first: bool) {
        self.value += 1;
        if first {
            self.color_key = color.map(str::to_string);
        } else if self.color_key.as_deref() != color {
            self.color_key = None;
        }
    }
}

/// Group rows along `path`, counting rows per node.
///
/// Children keep first-encounter order. Blank categories become their own
/// node labelled [`BLANK_LABEL`].
pub fn build<'a>(
    rows: impl IntoIterator<Item = &'a PlayerRecord>,
    path: &[Column],
    color: Option<Column>,
) -> HierarchyNode {
    let mut root = HierarchyNode::new(String::new());

    for row in rows {
        let color_value = color.map(|c| row.display(c));
        let color_value = color_value.as_deref();
        let first = root.value == 0;
        root.absorb(color_value, first);

        let mut node = &mut root;
        for &column in path {
            let mut label = row.display(column);
            if label.is_empty() {
                label = BLANK_LABEL.to_string();
            }
            let idx = match node.children.iter().position(|c| c.label == label) {
                Some(idx) => idx,
                None => {
                    node.children.push(HierarchyNode::new(label));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
            let first = node.value == 0;
            node.absorb(color_value, first);
        }
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;

    #[test]
    fn groups_and_counts_along_path() {
        let rows = vec![
            player("A", "Australia", "FOREIGNER", "BATTER", "<25"),
            player("B", "England", "FOREIGNER", "BOWLER", "<25"),
            player("C", "Australia", "FOREIGNER", "BOWLER", "25-28"),
        ];
        let root = build(&rows, &[Column::Country, Column::LabelSpecialism], None);
        assert_eq!(root.value, 3);
        assert_eq!(root.depth(), 2);
        let labels: Vec<_> = root.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Australia", "England"]);
        assert_eq!(root.children[0].value, 2);
        assert_eq!(root.children[0].children[1].label, "BOWLER: C");
    }

    #[test]
    fn blank_categories_are_their_own_node() {
        let rows = vec![player("A", "", "FOREIGNER", "BATTER", "<25")];
        let root = build(&rows, &[Column::Country], None);
        assert_eq!(root.children[0].label, BLANK_LABEL);
    }

    #[test]
    fn color_key_is_kept_only_when_shared() {
        let rows = vec![
            player("A", "India", "Mumbai", "BATTER", "<25"),
            player("B", "India", "Delhi", "BATTER", "<25"),
        ];
        let root = build(
            &rows,
            &[Column::Country, Column::StateAssociation, Column::Name],
            Some(Column::StateAssociation),
        );
        let india = &root.children[0];
        assert_eq!(india.color_key, None);
        assert_eq!(india.children[0].color_key.as_deref(), Some("Mumbai"));
        assert_eq!(india.children[1].children[0].color_key.as_deref(), Some("Delhi"));
    }

    #[test]
    fn no_rows_is_an_empty_root() {
        let root = build(std::iter::empty(), &[Column::Country], None);
        assert_eq!(root.value, 0);
        assert!(root.children.is_empty());
    }
}
