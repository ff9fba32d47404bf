use std::fmt;

use super::{Digest, HashMethod};

/// Adapts a plain closure into a [`HashMethod`].
///
/// The closure cannot report its own output size, so the caller declares it.
/// A closure that returns a different length is caught when a tree is built.
#[derive(Clone)]
pub struct FnHash<F> {
    output_len: usize,
    func: F,
}

impl<F> FnHash<F>
where
    F: Fn(&[u8]) -> Digest,
{
    pub fn new(output_len: usize, func: F) -> Self {
        Self { output_len, func }
    }
}

impl<F> HashMethod for FnHash<F>
where
    F: Fn(&[u8]) -> Digest,
{
    fn output_len(&self) -> usize {
        self.output_len
    }

    fn hash(&self, data: &[u8]) -> Digest {
        (self.func)(data)
    }
}

impl<F> fmt::Debug for FnHash<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHash")
            .field("output_len", &self.output_len)
            .finish_non_exhaustive()
    }
}
