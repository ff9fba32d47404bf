use super::{Digest, HashMethod};

/// BLAKE3 with its default 32-byte output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blake3Hash;

impl HashMethod for Blake3Hash {
    fn output_len(&self) -> usize {
        blake3::OUT_LEN
    }

    fn hash(&self, data: &[u8]) -> Digest {
        blake3::hash(data).as_bytes().to_vec()
    }

    fn hash_pair(&self, left: &[u8], right: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().as_bytes().to_vec()
    }
}
