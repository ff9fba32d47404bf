use crate::domain::{
    error::TreeError,
    hash::{combine_hashes, Digest, HashMethod},
};

/// Payload of a [`MerkleNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<V> {
    Leaf(V),
    /// A left child is always present; the right one may be missing.
    Internal {
        left: Box<MerkleNode<V>>,
        right: Option<Box<MerkleNode<V>>>,
    },
}

/// A node of a merkle tree together with the hash stored for it.
///
/// Nodes are immutable: no method hands out mutable access to the value, the
/// hash, or the child links. Each internal node owns its children, so dropping
/// a node drops its whole subtree.
///
/// ```text
///          root = H(h12 || h3)
///         /                  \
///   h12 = H(h1 || h2)      h3 = H(c)
///    /          \
/// h1 = H(a)   h2 = H(b)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleNode<V> {
    hash: Digest,
    kind: NodeKind<V>,
}

impl<V: AsRef<[u8]>> MerkleNode<V> {
    /// Build a leaf, hashing the value's bytes.
    pub fn leaf<H: HashMethod + ?Sized>(value: V, hasher: &H) -> Result<Self, TreeError> {
        let hash = checked(hasher, hasher.hash(value.as_ref()))?;
        Ok(Self {
            hash,
            kind: NodeKind::Leaf(value),
        })
    }
}

impl<V> MerkleNode<V> {
    /// Build an internal node over already built children.
    ///
    /// Without a right child the left hash is duplicated before combining.
    pub fn internal<H: HashMethod + ?Sized>(
        left: MerkleNode<V>,
        right: Option<MerkleNode<V>>,
        hasher: &H,
    ) -> Result<Self, TreeError> {
        let hash = combine_hashes(
            hasher,
            &left.hash,
            right.as_ref().map(|r| r.hash.as_slice()),
        );
        let hash = checked(hasher, hash)?;

        Ok(Self {
            hash,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: right.map(Box::new),
            },
        })
    }

    /// Reassemble a node from a stored hash and payload without rehashing.
    ///
    /// Nothing ties `hash` to `kind` here; run the validator before trusting
    /// such a node.
    pub fn from_parts(hash: Digest, kind: NodeKind<V>) -> Self {
        Self { hash, kind }
    }

    pub fn into_parts(self) -> (Digest, NodeKind<V>) {
        (self.hash, self.kind)
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.hash))
    }

    pub fn kind(&self) -> &NodeKind<V> {
        &self.kind
    }

    /// The stored value, for leaves.
    pub fn value(&self) -> Option<&V> {
        match &self.kind {
            NodeKind::Leaf(value) => Some(value),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&MerkleNode<V>> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, .. } => Some(&**left),
        }
    }

    pub fn right(&self) -> Option<&MerkleNode<V>> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { right, .. } => right.as_deref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn has_children(&self) -> bool {
        !self.is_leaf()
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal { left, right } => {
                left.leaf_count() + right.as_ref().map_or(0, |r| r.leaf_count())
            }
        }
    }

    /// Edges on the longest path down to a leaf; a leaf has height 0.
    pub fn height(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal { left, right } => {
                1 + left.height().max(right.as_ref().map_or(0, |r| r.height()))
            }
        }
    }

    /// Leaf values, left to right.
    pub fn leaves(&self) -> Leaves<'_, V> {
        Leaves { stack: vec![self] }
    }
}

/// In-order iterator over the values of a subtree, see [`MerkleNode::leaves`].
#[derive(Debug)]
pub struct Leaves<'a, V> {
    stack: Vec<&'a MerkleNode<V>>,
}

impl<'a, V> Iterator for Leaves<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &node.kind {
                NodeKind::Leaf(value) => return Some(value),
                NodeKind::Internal { left, right } => {
                    // Right first so the left subtree is popped next
                    if let Some(right) = right {
                        self.stack.push(right);
                    }
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

fn checked<H: HashMethod + ?Sized>(hasher: &H, hash: Digest) -> Result<Digest, TreeError> {
    let expected = hasher.output_len();
    if hash.len() != expected {
        return Err(TreeError::DigestLength {
            expected,
            actual: hash.len(),
        });
    }
    Ok(hash)
}
