//! Static concept map shown alongside search results
//!
//! The map is a small read-only tree. It is not produced by the gateway.

use serde::{Deserialize, Serialize};

/// A node in the concept tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConceptNode>,
    /// Whether the node starts expanded when displayed
    #[serde(default)]
    pub is_expanded: bool,
}

impl ConceptNode {
    /// Creates a collapsed leaf
    pub fn leaf(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children: Vec::new(),
            is_expanded: false,
        }
    }

    /// Creates a node with the given children
    pub fn branch(id: &str, label: &str, children: Vec<ConceptNode>) -> Self {
        Self {
            children,
            ..Self::leaf(id, label)
        }
    }

    /// Marks the node as initially expanded
    pub fn expanded(mut self) -> Self {
        self.is_expanded = true;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a node by id anywhere in the subtree, including `self`
    pub fn find(&self, id: &str) -> Option<&ConceptNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Nodes in depth-first pre-order, paired with their depth
    pub fn walk(&self) -> Vec<(usize, &ConceptNode)> {
        let mut out = Vec::new();
        self.collect(0, &mut out);
        out
    }

    fn collect<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a ConceptNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.collect(depth + 1, out);
        }
    }

    /// Number of leaves in the subtree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(ConceptNode::leaf_count).sum()
        }
    }

    /// Renders the full tree as indented text
    ///
    /// Branches are marked `v` when expanded and `>` when collapsed; leaves
    /// are marked `*`.
    pub fn render(&self) -> String {
        self.walk()
            .into_iter()
            .map(|(depth, node)| {
                let marker = match (node.is_leaf(), node.is_expanded) {
                    (true, _) => '*',
                    (false, true) => 'v',
                    (false, false) => '>',
                };
                format!("{}{} {}", "  ".repeat(depth), marker, node.label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The built-in machine learning concept map
pub fn default_concept_map() -> ConceptNode {
    ConceptNode::branch(
        "root",
        "Machine Learning",
        vec![
            ConceptNode::branch(
                "sl",
                "Supervised Learning",
                vec![
                    ConceptNode::leaf("reg", "Regression"),
                    ConceptNode::leaf("cls", "Classification"),
                ],
            ),
            ConceptNode::branch(
                "ul",
                "Unsupervised Learning",
                vec![
                    ConceptNode::leaf("clust", "Clustering"),
                    ConceptNode::leaf("dim", "Dimensionality Reduction"),
                ],
            ),
            ConceptNode::branch(
                "dl",
                "Deep Learning",
                vec![
                    ConceptNode::leaf("cnn", "CNNs (Vision)"),
                    ConceptNode::leaf("rnn", "RNNs (Sequence)"),
                    ConceptNode::leaf("trans", "Transformers"),
                ],
            )
            .expanded(),
        ],
    )
    .expanded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_shape() {
        let map = default_concept_map();
        assert_eq!(map.label, "Machine Learning");
        assert!(map.is_expanded);
        assert_eq!(map.children.len(), 3);
        assert_eq!(map.leaf_count(), 7);
        assert_eq!(map.walk().len(), 11);
    }

    #[test]
    fn test_find() {
        let map = default_concept_map();
        assert_eq!(map.find("trans").map(|n| n.label.as_str()), Some("Transformers"));
        assert!(map.find("dl").unwrap().is_expanded);
        assert!(!map.find("sl").unwrap().is_expanded);
        assert!(map.find("missing").is_none());
    }

    #[test]
    fn test_render() {
        let rendered = default_concept_map().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "v Machine Learning");
        assert_eq!(lines[1], "  > Supervised Learning");
        assert_eq!(lines[2], "    * Regression");
        assert!(lines.contains(&"  v Deep Learning"));
    }

    #[test]
    fn test_serde_uses_camel_case_and_skips_empty_children() {
        let json = serde_json::to_value(ConceptNode::leaf("x", "X")).unwrap();
        assert_eq!(json["isExpanded"], false);
        assert!(json.get("children").is_none());

        let parsed: ConceptNode =
            serde_json::from_str(r#"{"id":"a","label":"A","children":[{"id":"b","label":"B"}]}"#)
                .unwrap();
        assert_eq!(parsed.leaf_count(), 1);
        assert!(!parsed.is_expanded);
    }
}
