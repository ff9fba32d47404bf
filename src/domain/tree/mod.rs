use log::debug;

use super::{
    error::{HashMismatch, TreeError},
    hash::HashMethod,
};

pub mod builder;
pub mod node;
pub mod validate;

pub use builder::{build, par_build, DEFAULT_PARALLEL_THRESHOLD};
pub use node::{Leaves, MerkleNode, NodeKind};
pub use validate::{is_valid, validate};

/// How a [`MerkleTree`] is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerkleTreeOptions {
    /// Hash leaves and combine subtrees on the rayon pool.
    pub parallel: bool,
    /// Node count below which a parallel build stops forking.
    pub parallel_threshold: usize,
}

impl Default for MerkleTreeOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// A built tree together with the hasher that built it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree<V, H> {
    root: MerkleNode<V>,
    hasher: H,
}

impl<V, H> MerkleTree<V, H>
where
    V: AsRef<[u8]>,
    H: HashMethod,
{
    /// Build a tree from raw leaf values, in order.
    pub fn from_leaves<I>(leaves: I, hasher: H) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        let root = build(leaves, &hasher)?;
        Ok(Self { root, hasher })
    }

    /// Wrap an existing root, e.g. one reassembled with [`MerkleNode::from_parts`].
    /// Call [`validate`](Self::validate) before trusting it.
    pub fn from_root(root: MerkleNode<V>, hasher: H) -> Self {
        Self { root, hasher }
    }

    pub fn get_root(&self) -> &MerkleNode<V> {
        &self.root
    }

    pub fn root_hash(&self) -> &[u8] {
        self.root.hash()
    }

    pub fn root_hex(&self) -> String {
        self.root.hash_hex()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn leaves(&self) -> Leaves<'_, V> {
        self.root.leaves()
    }

    /// Recompute the whole tree and report the first stale hash, if any.
    pub fn validate(&self) -> Result<(), HashMismatch> {
        validate(&self.root, &self.hasher)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn into_root(self) -> MerkleNode<V> {
        self.root
    }
}

impl<V, H> MerkleTree<V, H>
where
    V: AsRef<[u8]> + Send,
    H: HashMethod + Sync,
{
    /// Build a tree according to `options`.
    pub fn from_leaves_with_options(
        leaves: Vec<V>,
        hasher: H,
        options: &MerkleTreeOptions,
    ) -> Result<Self, TreeError> {
        debug!("Building tree with {:?}", options);
        let root = if options.parallel {
            par_build(leaves, &hasher, options.parallel_threshold)?
        } else {
            build(leaves, &hasher)?
        };
        Ok(Self { root, hasher })
    }
}

#[cfg(test)]
mod tests {
    use super::{MerkleNode, MerkleTree, MerkleTreeOptions, NodeKind};
    use crate::domain::{
        error::TreeError,
        hash::{Blake3Hash, HashMethod, Sha256Hash},
    };
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_leaves_error() {
        let leaves: Vec<String> = vec![];
        let result = MerkleTree::from_leaves(leaves, Sha256Hash);
        assert_eq!(
            result.err(),
            Some(TreeError::EmptyInput),
            "Building a tree from empty leaves must return an error"
        );
    }

    #[test]
    fn test_build_and_validate() {
        let leaves: Vec<String> = (0..33).map(|i| format!("node #{i}")).collect();
        let tree = MerkleTree::from_leaves(leaves.clone(), Sha256Hash).unwrap();

        assert!(tree.is_valid(), "The tree is valid");
        assert_eq!(tree.leaf_count(), 33);
        assert_eq!(tree.height(), 6);
        assert_eq!(tree.root_hash().len(), Sha256Hash.output_len());
        assert_eq!(tree.root_hex(), format!("0x{}", hex::encode(tree.root_hash())));
        assert!(tree.leaves().eq(leaves.iter()));
    }

    #[test]
    fn test_options_select_same_tree() {
        let leaves: Vec<Vec<u8>> = (0..257u16).map(|i| i.to_be_bytes().to_vec()).collect();
        let sequential = MerkleTree::from_leaves_with_options(
            leaves.clone(),
            Blake3Hash,
            &MerkleTreeOptions::default(),
        )
        .unwrap();
        let parallel = MerkleTree::from_leaves_with_options(
            leaves,
            Blake3Hash,
            &MerkleTreeOptions {
                parallel: true,
                parallel_threshold: 8,
            },
        )
        .unwrap();

        assert_eq!(sequential.root_hash(), parallel.root_hash());
        assert!(parallel.is_valid());
    }

    #[test]
    fn test_from_root_reports_tampering() {
        let tree = MerkleTree::from_leaves(vec!["a", "b"], Sha256Hash).unwrap();
        let (hash, kind) = tree.into_root().into_parts();
        let left = match kind {
            NodeKind::Internal { left, .. } => left,
            NodeKind::Leaf(_) => unreachable!(),
        };

        // Stored root hash kept, right leaf "b" replaced by a fresh "c"
        let forged = MerkleNode::from_parts(
            hash,
            NodeKind::Internal {
                left,
                right: Some(Box::new(MerkleNode::leaf("c", &Sha256Hash).unwrap())),
            },
        );
        let tree = MerkleTree::from_root(forged, Sha256Hash);

        let mismatch = tree.validate().unwrap_err();
        assert!(mismatch.at.is_root());
    }

    #[test]
    fn test_concurrent_validation() {
        // A built tree is read-only, so readers need no locking
        let leaves: Vec<String> = (0..100).map(|i| format!("leaf_{i}")).collect();
        let tree = Arc::new(MerkleTree::from_leaves(leaves, Sha256Hash).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || tree.is_valid())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap(), "Every reader must see a valid tree");
        }
    }
}
