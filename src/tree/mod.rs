//! Category forest: turns a flat parent-linked list into a renderable tree.
//!
//! The records are flattened once into an id-indexed arena with a
//! parent-to-children index, then walked iteratively with an explicit stack
//! and a visited set bounded by the node count. Bad input cannot hang the
//! walk: unknown parents and self-references become roots, repeated nodes
//! are skipped, and cycle members unreachable from any root are appended as
//! recovery roots so nothing disappears from the listing.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::api::categories::Category;

pub struct CategoryForest {
    nodes: Vec<Category>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl CategoryForest {
    pub fn build(records: Vec<Category>) -> Self {
        let index: HashMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        let mut children = vec![Vec::new(); records.len()];
        let mut roots = Vec::new();
        for (i, record) in records.iter().enumerate() {
            match record.parent_id.as_ref().and_then(|p| index.get(p)).copied() {
                Some(parent) if parent != i => children[parent].push(i),
                // Absent, unknown, or self-referencing parent: a root.
                _ => roots.push(i),
            }
        }

        Self {
            nodes: records,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Category> {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Depth-first walk yielding `(depth, category)` in input order per
    /// sibling group. Terminates on any input, cyclic or not.
    pub fn walk(&self) -> Vec<(usize, &Category)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::with_capacity(self.nodes.len());

        for &root in &self.roots {
            self.descend(root, &mut visited, &mut out);
        }

        // Nodes trapped in a parent cycle are reachable from no root; walk
        // them anyway so every record shows up.
        for i in 0..self.nodes.len() {
            if !visited.contains(&i) {
                warn!(
                    id = %self.nodes[i].id,
                    "Category unreachable from any root (parent cycle), listing at top level"
                );
                self.descend(i, &mut visited, &mut out);
            }
        }

        out
    }

    /// Indented text lines for terminal display.
    pub fn render(&self) -> Vec<String> {
        self.walk()
            .into_iter()
            .map(|(depth, category)| {
                let marker = if category.is_visible { "" } else { "  [hidden]" };
                format!(
                    "{}- {}  (/{}){}",
                    "  ".repeat(depth),
                    category.name,
                    category.slug,
                    marker
                )
            })
            .collect()
    }

    fn descend<'a>(
        &'a self,
        start: usize,
        visited: &mut HashSet<usize>,
        out: &mut Vec<(usize, &'a Category)>,
    ) {
        if visited.contains(&start) {
            return;
        }
        let mut stack = vec![(0usize, start)];
        while let Some((depth, i)) = stack.pop() {
            if !visited.insert(i) {
                warn!(id = %self.nodes[i].id, "Cycle in category parents, skipping repeat");
                continue;
            }
            out.push((depth, &self.nodes[i]));
            // Reverse push so children pop in input order.
            for &child in self.children[i].iter().rev() {
                stack.push((depth + 1, child));
            }
        }
    }
}
