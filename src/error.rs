use thiserror::Error;

/// A violated structural invariant, as reported by [`AvlTree::validate`].
///
/// None of the tree's own operations can produce these. They indicate a bug, or an `Ord`
/// implementation that is not a total order.
///
/// [`AvlTree::validate`]: crate::AvlTree::validate
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("in-order traversal is not non-decreasing")]
    OutOfOrder,
    #[error("subtree heights differ by more than one: left {left}, right {right}")]
    Unbalanced { left: i8, right: i8 },
    #[error("cached height {cached} does not match computed height {computed}")]
    StaleHeight { cached: i8, computed: i8 },
    #[error("tree reports {len} elements but {counted} are reachable")]
    LenMismatch { len: usize, counted: usize },
}
