use tracing::warn;

use crate::domain::entities::outline::OutlineNode;

/// Adds two totals, clamping at the `i64` bounds instead of overflowing.
pub fn add_totals(acc: i64, value: i64) -> i64 {
    acc.checked_add(value).unwrap_or_else(|| {
        warn!(acc, value, "total out of range, clamping");
        acc.saturating_add(value)
    })
}

/// Post-order total. A node with children always takes the sum of its
/// children, whatever total its own row carried.
pub fn aggregate(node: &mut OutlineNode) -> i64 {
    if node.is_leaf() {
        return node.total_price;
    }
    let sum = node
        .children
        .iter_mut()
        .map(aggregate)
        .fold(0, add_totals);
    node.total_price = sum;
    sum
}

/// Aggregates every root and returns the forest total.
pub fn aggregate_forest(roots: &mut [OutlineNode]) -> i64 {
    roots.iter_mut().map(aggregate).fold(0, add_totals)
}
