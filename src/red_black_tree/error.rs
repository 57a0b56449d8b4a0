use thiserror::Error;

/// A broken invariant found by `RedBlackSet::validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("root node is red")]
    RedRoot,
    #[error("red node has a red child")]
    ConsecutiveReds,
    #[error("unbalanced blacks left: {left} and right: {right}")]
    UnbalancedBlacks { left: usize, right: usize },
    #[error("keys are not in strictly increasing order")]
    OutOfOrder,
    #[error("node's parent link does not match its position")]
    BrokenParentLink,
    #[error("tree counts {expected} elements but {actual} are reachable")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Shape of a valid red black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of reachable nodes.
    pub len: usize,
    /// Number of nodes on the longest root to leaf path.
    pub height: usize,
    /// Number of black nodes on every root to leaf path.
    pub black_height: usize,
}
