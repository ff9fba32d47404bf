use log::debug;

use super::node::{MerkleNode, NodeKind};
use crate::domain::{
    error::{HashMismatch, NodePath, Side},
    hash::{combine_hashes, HashMethod},
};

/// Recompute every hash under `node` bottom-up and compare it with the stored one.
///
/// Children are checked before their parent, left before right. The first
/// disagreement is returned and nothing above it is rehashed. Paths in the
/// result are relative to `node`.
pub fn validate<V, H>(node: &MerkleNode<V>, hasher: &H) -> Result<(), HashMismatch>
where
    V: AsRef<[u8]>,
    H: HashMethod + ?Sized,
{
    let mut path = NodePath::root();
    validate_at(node, hasher, &mut path)
}

/// [`validate`] reduced to a verdict.
pub fn is_valid<V, H>(node: &MerkleNode<V>, hasher: &H) -> bool
where
    V: AsRef<[u8]>,
    H: HashMethod + ?Sized,
{
    validate(node, hasher).is_ok()
}

fn validate_at<V, H>(
    node: &MerkleNode<V>,
    hasher: &H,
    path: &mut NodePath,
) -> Result<(), HashMismatch>
where
    V: AsRef<[u8]>,
    H: HashMethod + ?Sized,
{
    let expected = match node.kind() {
        NodeKind::Leaf(value) => hasher.hash(value.as_ref()),
        NodeKind::Internal { left, right } => {
            descend(left, Side::Left, hasher, path)?;
            if let Some(right) = right {
                descend(right, Side::Right, hasher, path)?;
            }
            combine_hashes(hasher, left.hash(), right.as_ref().map(|r| r.hash()))
        }
    };

    if expected.as_slice() != node.hash() {
        let mismatch = HashMismatch {
            at: path.clone(),
            expected,
            found: node.hash().to_vec(),
        };
        debug!("{}", mismatch);
        return Err(mismatch);
    }
    Ok(())
}

fn descend<V, H>(
    child: &MerkleNode<V>,
    side: Side,
    hasher: &H,
    path: &mut NodePath,
) -> Result<(), HashMismatch>
where
    V: AsRef<[u8]>,
    H: HashMethod + ?Sized,
{
    path.push(side);
    validate_at(child, hasher, path)?;
    path.pop();
    Ok(())
}
