use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use super::hash::Digest;

/// Errors raised while constructing a tree. Nothing is built when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Leaves cannot be empty")]
    EmptyInput,

    #[error("Hasher produced a {actual}-byte digest, expected {expected} bytes")]
    DigestLength { expected: usize, actual: usize },
}

/// One step from a parent to a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Location of a node relative to the node validation started from.
///
/// An empty path is the starting node itself and displays as `root`;
/// otherwise the steps follow, e.g. `root/left/right`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<Side>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Side] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, side: Side) {
        self.0.push(side);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<Side>> for NodePath {
    fn from(steps: Vec<Side>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("root")
        } else {
            write!(f, "root/{}", self.0.iter().join("/"))
        }
    }
}

/// Validation verdict for a tampered or corrupted tree: the first node, in
/// left-first post-order, whose stored hash disagrees with its recomputation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Hash mismatch at {at}: expected 0x{}, found 0x{}",
    hex::encode(.expected),
    hex::encode(.found)
)]
pub struct HashMismatch {
    pub at: NodePath,
    pub expected: Digest,
    pub found: Digest,
}
