use tracing::warn;

use crate::domain::entities::outline::{Depth, OutlineNode};
use crate::domain::services::classifier::ClassifiedRow;

/// Last node placed at each depth, as arena indices.
#[derive(Debug, Default)]
struct AncestorStack {
    slots: Vec<Option<usize>>,
}

impl AncestorStack {
    fn reset_to(&mut self, node: usize) {
        self.slots.clear();
        self.slots.push(Some(node));
    }

    fn nearest_above(&self, depth: Depth) -> Option<usize> {
        (0..depth.index())
            .rev()
            .find_map(|level| self.slots.get(level).copied().flatten())
    }

    /// Puts `node` at its own slot and drops every deeper slot.
    fn place(&mut self, depth: Depth, node: usize) {
        let level = depth.index();
        if self.slots.len() <= level {
            self.slots.resize(level + 1, None);
        }
        self.slots[level] = Some(node);
        self.slots.truncate(level + 1);
    }
}

struct ArenaNode {
    node: OutlineNode,
    children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuiltForest {
    pub roots: Vec<OutlineNode>,
    /// Ids of non-phase rows promoted to root because nothing shallower preceded them.
    pub orphans: Vec<String>,
}

pub fn build<I>(rows: I) -> BuiltForest
where
    I: IntoIterator<Item = ClassifiedRow>,
{
    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut orphans = Vec::new();
    let mut stack = AncestorStack::default();

    for row in rows {
        let idx = arena.len();
        let depth = row.depth;
        arena.push(ArenaNode {
            node: row.node,
            children: Vec::new(),
        });

        if depth == Depth::Phase {
            roots.push(idx);
            stack.reset_to(idx);
            continue;
        }

        match stack.nearest_above(depth) {
            Some(parent) => arena[parent].children.push(idx),
            None => {
                let id = &arena[idx].node.id;
                warn!(row = %id, depth = depth.index(), "no enclosing outline row, promoting to root");
                orphans.push(id.clone());
                roots.push(idx);
            }
        }
        stack.place(depth, idx);
    }

    let mut slots: Vec<Option<ArenaNode>> = arena.into_iter().map(Some).collect();
    let roots = roots
        .into_iter()
        .filter_map(|idx| materialize(&mut slots, idx))
        .collect();

    BuiltForest { roots, orphans }
}

fn materialize(slots: &mut [Option<ArenaNode>], idx: usize) -> Option<OutlineNode> {
    let ArenaNode { mut node, children } = slots.get_mut(idx)?.take()?;
    node.children = children
        .into_iter()
        .filter_map(|child| materialize(slots, child))
        .collect();
    Some(node)
}
