//! Breaking a large sketch into bounded-size chunks.
//!
//! Very large sketches are inconvenient for downstream tools that assume a
//! bounded number of hash values per signature. [`ChunkIter`] partitions the
//! hash values of one signature into consecutive chunks of at most a given
//! size, preserving their order and the identifying metadata. The combined
//! hash count over all chunks is always exactly the size of the source.

use crate::Signature;

use std::cmp;
use std::iter::FusedIterator;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// An iterator that breaks a signature into chunks of bounded size.
///
/// A signature with fewer hash values than the chunk size is yielded as is,
/// in a single chunk. Any other signature is split into consecutive chunks
/// of exactly the chunk size, in the order the hash values are stored,
/// followed by a smaller final chunk if the size is not an exact multiple.
/// In particular, a signature whose size equals the chunk size yields a
/// single full chunk.
///
/// Each chunk is a new signature with the name and the filename of the
/// source. The iterator borrows the source and makes a single pass over it.
///
/// # Panics
///
/// [`ChunkIter::new`] panics if the chunk size is zero.
///
/// # Examples
///
/// ```
/// use sketch_chunk::{ChunkIter, MinHash, Signature};
///
/// let minhash = MinHash::new(
///     31, 0, 0, MinHash::DEFAULT_SEED, "DNA",
///     vec![1, 2, 3, 4, 5, 6, 7], None
/// ).unwrap();
/// let signature = Signature::new(minhash, Some(String::from("large")), None);
///
/// let chunks: Vec<Signature> = ChunkIter::new(&signature, 3).collect();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[0].minhash().mins(), &[1, 2, 3]);
/// assert_eq!(chunks[1].minhash().mins(), &[4, 5, 6]);
/// assert_eq!(chunks[2].minhash().mins(), &[7]);
/// ```
#[derive(Clone, Debug)]
pub struct ChunkIter<'a> {
    source: &'a Signature,
    chunksize: usize,
    // Offset of the first hash value not yet yielded.
    offset: usize,
    // A source smaller than the chunk size is yielded unchanged.
    passthrough: bool,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    /// Creates a new iterator over chunks of at most `chunksize` hash values.
    ///
    /// # Panics
    ///
    /// Panics if `chunksize` is zero.
    pub fn new(source: &'a Signature, chunksize: usize) -> Self {
        assert!(chunksize > 0, "Chunk size must be positive");
        let passthrough = source.size() < chunksize;
        ChunkIter {
            source, chunksize,
            offset: 0,
            passthrough,
            done: false,
        }
    }

    // Number of chunks not yet yielded.
    fn chunks_left(&self) -> usize {
        if self.done {
            return 0;
        }
        if self.passthrough {
            return 1;
        }
        let left = self.source.size() - self.offset;
        left.div_ceil(self.chunksize)
    }
}

impl Iterator for ChunkIter<'_> {
    type Item = Signature;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.passthrough {
            self.done = true;
            return Some(self.source.clone());
        }

        let minhash = self.source.minhash();
        if self.offset >= minhash.len() {
            self.done = true;
            return None;
        }
        let end = cmp::min(self.offset + self.chunksize, minhash.len());
        let hashes = minhash.mins()[self.offset..end].to_vec();
        let abunds = minhash.abundances().map(|counts| counts[self.offset..end].to_vec());
        self.offset = end;
        Some(self.source.with_minhash(minhash.from_hashes(hashes, abunds)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.chunks_left();
        (left, Some(left))
    }
}

impl ExactSizeIterator for ChunkIter<'_> {}

impl FusedIterator for ChunkIter<'_> {}

//-----------------------------------------------------------------------------
