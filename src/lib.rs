#![deny(clippy::all)]

//! Balanced binary merkle tree over an ordered sequence of values.
//!
//! [`build`] hashes every value into a leaf and folds the leaves into a tree,
//! splitting each run at `ceil(len / 2)` so the left side takes the extra
//! node. Internal nodes store `H(left || right)`, or `H(left || left)` when
//! they have no right child. [`validate`] recomputes every hash bottom-up and
//! reports the first node whose stored hash no longer matches.
//!
//! ```
//! use balanced_merkle_tree::{MerkleTree, Sha256Hash};
//!
//! let tree = MerkleTree::from_leaves(vec!["a", "b", "c"], Sha256Hash)?;
//! assert!(tree.is_valid());
//! assert_eq!(tree.leaf_count(), 3);
//! # Ok::<(), balanced_merkle_tree::TreeError>(())
//! ```

mod domain;

pub use domain::{
    error::{HashMismatch, NodePath, Side, TreeError},
    hash::{
        combine_hashes, Blake3Hash, Digest, DoubleSha256Hash, FnHash, HashMethod, Sha256Hash,
    },
    tree::{
        build, is_valid, par_build, validate, Leaves, MerkleNode, MerkleTree, MerkleTreeOptions,
        NodeKind, DEFAULT_PARALLEL_THRESHOLD,
    },
};
