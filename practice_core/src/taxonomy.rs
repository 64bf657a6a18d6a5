use practice_schema::Exercise;
use serde::Serialize;
use tracing::{debug, instrument};

/// One path segment. Leaves carry the exercise id, branches a synthetic
/// `"{segment}-{depth}"` id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    /// Insertion order is display order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|n| n.name == name)
    }
}

/// Root level of the exercise tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    roots: Vec<TreeNode>,
}

impl Taxonomy {
    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.roots.iter().find(|n| n.name == name)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeNode> {
        self.roots.iter()
    }

    /// Leaves in depth-first display order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        for node in &self.roots {
            collect_leaves(node, &mut out);
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }
}

impl<'a> IntoIterator for &'a Taxonomy {
    type Item = &'a TreeNode;
    type IntoIter = std::slice::Iter<'a, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

fn collect_leaves<'a>(node: &'a TreeNode, out: &mut Vec<&'a TreeNode>) {
    if node.is_leaf() {
        out.push(node);
        return;
    }
    for child in &node.children {
        collect_leaves(child, out);
    }
}

pub(crate) fn synthetic_id(segment: &str, depth: usize) -> String {
    format!("{segment}-{depth}")
}

/// Builds the category tree from exercises in the given order.
///
/// Existing nodes are reused on a shared prefix, so two exercises with the
/// same full path collapse into the node created by the first one.
#[instrument(skip_all, fields(exercises = exercises.len()))]
pub fn build_taxonomy(exercises: &[Exercise]) -> Taxonomy {
    let mut taxonomy = Taxonomy::default();

    for exercise in exercises {
        let segments = exercise.segments();
        let last = segments.len() - 1;
        let mut level = &mut taxonomy.roots;

        for (depth, segment) in segments.iter().enumerate() {
            let pos = match level.iter().position(|n| n.name == *segment) {
                Some(pos) => pos,
                None => {
                    let id = if depth == last {
                        exercise.id.clone()
                    } else {
                        synthetic_id(segment, depth)
                    };
                    level.push(TreeNode::new(id, segment));
                    level.len() - 1
                }
            };
            if depth == last {
                break;
            }
            level = &mut level[pos].children;
        }
    }

    debug!(roots = taxonomy.len(), "built exercise taxonomy");
    taxonomy
}
