pub mod blake;
pub mod func;
pub mod sha256;

pub use blake::Blake3Hash;
pub use func::FnHash;
pub use sha256::{DoubleSha256Hash, Sha256Hash};

/// Raw digest bytes as stored in tree nodes.
pub type Digest = Vec<u8>;

/// A deterministic hash function with a fixed output length.
///
/// The tree only ever sees a hasher through this trait, so any digest
/// algorithm can back it. Implementations must return exactly
/// [`output_len`](HashMethod::output_len) bytes from every call to
/// [`hash`](HashMethod::hash); construction rejects digests of any other size.
pub trait HashMethod {
    /// Number of bytes every digest has.
    fn output_len(&self) -> usize;

    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Digest;

    /// Hash the concatenation `left || right`.
    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        let mut buf = Vec::with_capacity(left.len() + right.len());
        buf.extend_from_slice(left);
        buf.extend_from_slice(right);
        self.hash(&buf)
    }
}

impl<H: HashMethod + ?Sized> HashMethod for &H {
    fn output_len(&self) -> usize {
        (**self).output_len()
    }

    fn hash(&self, data: &[u8]) -> Digest {
        (**self).hash(data)
    }

    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        (**self).hash_pair(left, right)
    }
}

impl<H: HashMethod + ?Sized> HashMethod for Box<H> {
    fn output_len(&self) -> usize {
        (**self).output_len()
    }

    fn hash(&self, data: &[u8]) -> Digest {
        (**self).hash(data)
    }

    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        (**self).hash_pair(left, right)
    }
}

/// Hash of an internal node: `H(left || right)`, or `H(left || left)` when
/// the node has no right child.
pub fn combine_hashes<H: HashMethod + ?Sized>(
    hasher: &H,
    left: &[u8],
    right: Option<&[u8]>,
) -> Digest {
    hasher.hash_pair(left, right.unwrap_or(left))
}

#[cfg(test)]
mod tests {
    use super::{combine_hashes, HashMethod, Sha256Hash};

    #[test]
    fn test_default_hash_pair_is_concatenation() {
        let hasher = Sha256Hash;
        let fn_hasher = super::FnHash::new(32, |data: &[u8]| Sha256Hash.hash(data));

        // The closure adapter uses the provided concatenating hash_pair
        assert_eq!(
            fn_hasher.hash_pair(b"left", b"right"),
            hasher.hash(b"leftright"),
            "Default hash_pair must hash left || right"
        );
    }

    #[test]
    fn test_combine_without_right_duplicates_left() {
        let hasher = Sha256Hash;
        let left = hasher.hash(b"lonely");

        assert_eq!(
            combine_hashes(&hasher, &left, None),
            hasher.hash_pair(&left, &left),
            "A missing right child must duplicate the left hash"
        );
    }

    #[test]
    fn test_combine_order_matters() {
        let hasher = Sha256Hash;
        let a = hasher.hash(b"a");
        let b = hasher.hash(b"b");

        assert_ne!(
            combine_hashes(&hasher, &a, Some(&b)),
            combine_hashes(&hasher, &b, Some(&a)),
            "Swapping children must change the parent hash"
        );
    }

    #[test]
    fn test_boxed_hasher_delegates() {
        let boxed: Box<dyn HashMethod> = Box::new(Sha256Hash);
        assert_eq!(boxed.output_len(), 32);
        assert_eq!(boxed.hash(b"x"), Sha256Hash.hash(b"x"));
    }
}
