use super::*;

use crate::MinHash;

use rand::Rng;

//-----------------------------------------------------------------------------

fn sketch_with_hashes(mins: Vec<u64>) -> MinHash {
    let result = MinHash::new(31, 0, 0, MinHash::DEFAULT_SEED, "DNA", mins, None);
    assert!(result.is_ok(), "Failed to create a sketch: {}", result.unwrap_err());
    result.unwrap()
}

fn signature_with_hashes(mins: Vec<u64>) -> Signature {
    Signature::new(
        sketch_with_hashes(mins),
        Some(String::from("test signature")),
        Some(String::from("test.fa")),
    )
}

fn random_hashes(len: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut result: Vec<u64> = (0..len).map(|_| rng.gen()).collect();
    result.sort_unstable();
    result.dedup();
    while result.len() < len {
        result.push(rng.gen());
        result.sort_unstable();
        result.dedup();
    }
    result
}

fn check_chunks(source: &Signature, chunksize: usize) -> Vec<Signature> {
    let chunks: Vec<Signature> = ChunkIter::new(source, chunksize).collect();

    // Size preservation.
    let total: usize = chunks.iter().map(|chunk| chunk.size()).sum();
    assert_eq!(
        total, source.size(),
        "Wrong total hash count for source size {} and chunk size {}", source.size(), chunksize
    );

    // Bound property.
    if source.size() < chunksize {
        assert_eq!(chunks.len(), 1, "A small signature did not yield a single chunk");
        assert_eq!(&chunks[0], source, "A small signature was not yielded unchanged");
    } else {
        for (i, chunk) in chunks.iter().enumerate() {
            if i + 1 < chunks.len() {
                assert_eq!(
                    chunk.size(), chunksize,
                    "Wrong size for chunk {} of {} with chunk size {}", i, chunks.len(), chunksize
                );
            } else {
                assert!(
                    chunk.size() >= 1 && chunk.size() <= chunksize,
                    "Wrong size for the final chunk with chunk size {}", chunksize
                );
            }
        }
    }

    // Order preservation.
    let concatenated: Vec<u64> = chunks.iter()
        .flat_map(|chunk| chunk.minhash().mins().iter().copied())
        .collect();
    assert_eq!(
        concatenated, source.minhash().mins(),
        "Concatenated chunks do not reproduce the source with chunk size {}", chunksize
    );

    // Metadata preservation.
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.name(), source.name(), "Wrong name for chunk {}", i);
        assert_eq!(chunk.filename(), source.filename(), "Wrong filename for chunk {}", i);
    }

    chunks
}

//-----------------------------------------------------------------------------

#[test]
fn chunks_over_random_sketches() {
    for len in [0, 1, 2, 9, 10, 11, 99, 100, 101, 1000] {
        for chunksize in [1, 3, 10, 100, 10000] {
            let source = signature_with_hashes(random_hashes(len));
            let _ = check_chunks(&source, chunksize);
        }
    }
}

#[test]
fn small_signature_is_unchanged() {
    let mut source = signature_with_hashes(vec![1, 2, 3]);
    source.set_md5sum(Some(String::from("cafebabe")));
    let chunks: Vec<Signature> = ChunkIter::new(&source, 10).collect();
    assert_eq!(chunks.len(), 1, "A small signature did not yield a single chunk");
    assert_eq!(chunks[0], source, "A small signature was not yielded unchanged");
    assert_eq!(chunks[0].md5sum(), Some("cafebabe"), "Checksum lost in the passthrough chunk");
}

#[test]
fn empty_signature_is_unchanged() {
    let source = signature_with_hashes(Vec::new());
    let chunks: Vec<Signature> = ChunkIter::new(&source, 10).collect();
    assert_eq!(chunks.len(), 1, "An empty signature did not yield a single chunk");
    assert_eq!(chunks[0], source, "An empty signature was not yielded unchanged");
}

#[test]
fn exact_multiple_of_chunk_size() {
    // A signature of exactly the chunk size goes through the splitting branch
    // and yields one full chunk with no remainder.
    let source = signature_with_hashes((0..10).collect());
    let chunks = check_chunks(&source, 10);
    assert_eq!(chunks.len(), 1, "Wrong number of chunks at the boundary");
    assert_eq!(chunks[0].size(), 10, "Wrong chunk size at the boundary");

    let source = signature_with_hashes((0..30).collect());
    let chunks = check_chunks(&source, 10);
    assert_eq!(chunks.len(), 3, "Wrong number of chunks for an exact multiple");
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.size(), 10, "Wrong size for chunk {} of an exact multiple", i);
    }
}

#[test]
fn rechunking_is_idempotent() {
    let source = signature_with_hashes((0..25).collect());
    let chunks = check_chunks(&source, 10);
    for (i, chunk) in chunks.iter().enumerate() {
        let rechunked: Vec<Signature> = ChunkIter::new(chunk, 10).collect();
        assert_eq!(rechunked.len(), 1, "Re-chunking chunk {} yielded multiple chunks", i);
        assert_eq!(&rechunked[0], chunk, "Re-chunking changed chunk {}", i);
    }
}

#[test]
fn seven_hashes_in_threes() {
    let source = signature_with_hashes(vec![1, 2, 3, 4, 5, 6, 7]);
    let chunks = check_chunks(&source, 3);
    assert_eq!(chunks.len(), 3, "Wrong number of chunks");
    assert_eq!(chunks[0].minhash().mins(), &[1, 2, 3], "Wrong hashes in chunk 0");
    assert_eq!(chunks[1].minhash().mins(), &[4, 5, 6], "Wrong hashes in chunk 1");
    assert_eq!(chunks[2].minhash().mins(), &[7], "Wrong hashes in chunk 2");
}

#[test]
fn default_bound_with_full_sketch() {
    let source = signature_with_hashes(random_hashes(10000));
    let chunks = check_chunks(&source, 10000);
    assert_eq!(chunks.len(), 1, "Wrong number of chunks for a full sketch at the default bound");
    assert_eq!(chunks[0].size(), 10000, "Wrong chunk size for a full sketch at the default bound");
}

#[test]
fn abundances_follow_hashes() {
    let minhash = MinHash::new(
        21, 0, 0, MinHash::DEFAULT_SEED, "DNA",
        vec![1, 2, 3, 4, 5, 6, 7],
        Some(vec![10, 20, 30, 40, 50, 60, 70]),
    ).unwrap();
    let source = Signature::new(minhash, Some(String::from("abund")), None);

    let chunks = check_chunks(&source, 3);
    assert_eq!(chunks[0].minhash().abundances(), Some(&[10, 20, 30][..]), "Wrong abundances in chunk 0");
    assert_eq!(chunks[1].minhash().abundances(), Some(&[40, 50, 60][..]), "Wrong abundances in chunk 1");
    assert_eq!(chunks[2].minhash().abundances(), Some(&[70][..]), "Wrong abundances in chunk 2");
}

#[test]
fn reported_length_is_exact() {
    let source = signature_with_hashes((0..25).collect());
    let mut iter = ChunkIter::new(&source, 10);
    assert_eq!(iter.len(), 3, "Wrong initial chunk count");
    let _ = iter.next();
    assert_eq!(iter.len(), 2, "Wrong chunk count after one chunk");
    let _ = iter.next();
    let _ = iter.next();
    assert_eq!(iter.len(), 0, "Wrong chunk count after the final chunk");
    assert!(iter.next().is_none(), "Chunks yielded past the end");
}

#[test]
#[should_panic]
fn zero_chunk_size_panics() {
    let source = signature_with_hashes(vec![1, 2, 3]);
    let _ = ChunkIter::new(&source, 0);
}

//-----------------------------------------------------------------------------
