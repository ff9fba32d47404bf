use super::{Digest, HashMethod};
use sha2::{digest::FixedOutput, Digest as _, Sha256};

const SHA256_LEN: usize = 32;

/// Single SHA-256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Hash;

impl HashMethod for Sha256Hash {
    fn output_len(&self) -> usize {
        SHA256_LEN
    }

    fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize_fixed().to_vec()
    }

    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        // Streaming update, no intermediate concatenation buffer
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize_fixed().to_vec()
    }
}

/// SHA-256 applied twice, as Bitcoin does for its merkle nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoubleSha256Hash;

impl DoubleSha256Hash {
    fn rehash(once: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(once);
        hasher.finalize_fixed().to_vec()
    }
}

impl HashMethod for DoubleSha256Hash {
    fn output_len(&self) -> usize {
        SHA256_LEN
    }

    fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let once = hasher.finalize_fixed();

        Self::rehash(&once)
    }

    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        let once = hasher.finalize_fixed();

        Self::rehash(&once)
    }
}

#[cfg(test)]
mod tests {
    use super::{DoubleSha256Hash, Sha256Hash};
    use crate::domain::hash::HashMethod;

    #[test]
    fn test_sha256_known_answer() {
        let digest = Sha256Hash.hash(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            "SHA-256 of 'abc' must match the FIPS 180-2 test vector"
        );
    }

    #[test]
    fn test_double_sha256_is_sha256_twice() {
        let once = Sha256Hash.hash(b"abc");
        let twice = Sha256Hash.hash(&once);
        assert_eq!(DoubleSha256Hash.hash(b"abc"), twice);
    }

    #[test]
    fn test_streaming_pair_matches_concatenation() {
        let left = Sha256Hash.hash(b"left");
        let right = Sha256Hash.hash(b"right");
        let concatenated = [left.clone(), right.clone()].concat();

        assert_eq!(
            Sha256Hash.hash_pair(&left, &right),
            Sha256Hash.hash(&concatenated)
        );
        assert_eq!(
            DoubleSha256Hash.hash_pair(&left, &right),
            DoubleSha256Hash.hash(&concatenated)
        );
    }

    #[test]
    fn test_output_len() {
        assert_eq!(Sha256Hash.hash(b"").len(), Sha256Hash.output_len());
        assert_eq!(
            DoubleSha256Hash.hash(b"").len(),
            DoubleSha256Hash.output_len()
        );
    }
}
