//! # sketch-chunk: bounded-size chunks of MinHash sketches.
//!
//! Some tools that index or search signature collections assume a bounded
//! number of hash values per sketch. Very large sketches, such as those
//! built from deeply sequenced metagenomes, break that assumption. This
//! crate breaks a large sketch into multiple smaller sketches with at most
//! a given number of hash values each, without losing a single hash: the
//! chunks partition the hash sequence of the source in order, and they
//! inherit its name and source filename.
//!
//! The crate ships the `chunksigs` binary, which reads any number of input
//! collections and writes the chunks of every signature to a single output
//! collection:
//!
//! ```text
//! chunksigs -o chunked.zip -m 10000 large1.sig large2.zip
//! ```
//!
//! ### Library structure
//!
//! * [`sketch`]: the [`MinHash`] and [`Signature`] data model.
//! * [`chunker`]: the [`ChunkIter`] partitioning pass.
//! * [`formats`]: the JSON signature file format, compatible with common
//!   sketching tools.
//! * [`storage`]: signature collections ([`storage::load_collection`]) and
//!   the scoped output sink ([`SignatureSink`]).
//! * [`utils`]: file utilities.
//!
//! A signature with fewer hash values than the bound passes through
//! unchanged. The hash counts of the chunks of a signature always sum to
//! the hash count of the source; the driver verifies this invariant and
//! aborts the run if it does not hold.

pub mod chunker;
pub mod formats;
pub mod sketch;
pub mod storage;
pub mod utils;

pub use chunker::ChunkIter;
pub use sketch::{MinHash, Signature};
pub use storage::SignatureSink;
