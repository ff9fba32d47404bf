use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

use super::node::MerkleNode;
use crate::domain::{error::TreeError, hash::HashMethod};

/// Below this many nodes a split is combined on the current thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Build a balanced tree over `values`, keeping their order.
///
/// A single value yields a bare leaf as the root. Otherwise the nodes are
/// split at `ceil(len / 2)`, so the left half takes the extra node when the
/// count is odd, and each half is combined recursively.
pub fn build<V, H, I>(values: I, hasher: &H) -> Result<MerkleNode<V>, TreeError>
where
    V: AsRef<[u8]>,
    H: HashMethod + ?Sized,
    I: IntoIterator<Item = V>,
{
    let total_start = Instant::now();

    let leaves = values
        .into_iter()
        .map(|value| MerkleNode::leaf(value, hasher))
        .collect::<Result<Vec<_>, _>>()?;
    if leaves.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    let leaves_len = leaves.len();
    debug!("Hashing {} leaves took {:?}", leaves_len, total_start.elapsed());

    let build_start = Instant::now();
    let root = combine(leaves, hasher)?;
    debug!("Building the tree took {:?}", build_start.elapsed());

    info!(
        "Built tree over {} leaves in {:?}, root {}",
        leaves_len,
        total_start.elapsed(),
        root.hash_hex()
    );
    Ok(root)
}

/// Same tree as [`build`], with leaf hashing and subtree combination spread
/// over the rayon pool. Splits smaller than `threshold` nodes run inline.
pub fn par_build<V, H>(
    values: Vec<V>,
    hasher: &H,
    threshold: usize,
) -> Result<MerkleNode<V>, TreeError>
where
    V: AsRef<[u8]> + Send,
    H: HashMethod + Sync + ?Sized,
{
    let total_start = Instant::now();
    if values.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let leaves_len = values.len();
    let leaves = values
        .into_par_iter()
        .map(|value| MerkleNode::leaf(value, hasher))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Hashing {} leaves took {:?}", leaves_len, total_start.elapsed());

    let build_start = Instant::now();
    let root = par_combine(leaves, hasher, threshold.max(2))?;
    debug!("Building the tree took {:?}", build_start.elapsed());

    info!(
        "Built tree over {} leaves in {:?} (parallel), root {}",
        leaves_len,
        total_start.elapsed(),
        root.hash_hex()
    );
    Ok(root)
}

/// Index the left half ends at: `ceil(len / 2)`.
fn split_point(len: usize) -> usize {
    len.div_ceil(2)
}

/// Fold a non-empty run of nodes into one subtree.
fn combine<V, H>(mut nodes: Vec<MerkleNode<V>>, hasher: &H) -> Result<MerkleNode<V>, TreeError>
where
    H: HashMethod + ?Sized,
{
    match nodes.len() {
        0 => Err(TreeError::EmptyInput),
        1 => nodes.pop().ok_or(TreeError::EmptyInput),
        len => {
            let right_half = nodes.split_off(split_point(len));
            let left = combine(nodes, hasher)?;
            let right = combine(right_half, hasher)?;
            MerkleNode::internal(left, Some(right), hasher)
        }
    }
}

fn par_combine<V, H>(
    mut nodes: Vec<MerkleNode<V>>,
    hasher: &H,
    threshold: usize,
) -> Result<MerkleNode<V>, TreeError>
where
    V: Send,
    H: HashMethod + Sync + ?Sized,
{
    if nodes.len() < threshold {
        return combine(nodes, hasher);
    }

    let right_half = nodes.split_off(split_point(nodes.len()));
    let (left_res, right_res) = rayon::join(
        || par_combine(nodes, hasher, threshold),
        || par_combine(right_half, hasher, threshold),
    );

    MerkleNode::internal(left_res?, Some(right_res?), hasher)
}
