//! MinHash sketches and the signatures that contain them.
//!
//! A [`MinHash`] stores an ordered sequence of hash values and the parameters
//! of the sketch they were drawn with. A [`Signature`] wraps one sketch
//! together with identifying metadata. Both are immutable value objects:
//! operations that need a different hash sequence build a new sketch with
//! [`MinHash::from_hashes`] and a new signature with [`Signature::with_minhash`].

//-----------------------------------------------------------------------------

/// A MinHash sketch: an ordered sequence of hash values with sketch parameters.
///
/// The hash values are stored in the order given by the source collection.
/// For sketches produced by standard tools this is ascending order, but the
/// sketch does not enforce or depend on it. Abundances, when present, are
/// aligned with the hash values.
///
/// # Examples
///
/// ```
/// use sketch_chunk::MinHash;
///
/// let minhash = MinHash::new(31, 0, 0, MinHash::DEFAULT_SEED, "DNA", vec![2, 3, 5, 7], None).unwrap();
/// assert_eq!(minhash.len(), 4);
/// assert_eq!(minhash.ksize(), 31);
/// assert!(minhash.abundances().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinHash {
    ksize: u32,
    num: u32,
    max_hash: u64,
    seed: u64,
    molecule: String,
    mins: Vec<u64>,
    abunds: Option<Vec<u64>>,
}

impl MinHash {
    /// Default hash seed used by standard sketching tools.
    pub const DEFAULT_SEED: u64 = 42;

    /// Creates a new sketch from parameters and hash values.
    ///
    /// # Arguments
    ///
    /// * `ksize`: K-mer size the hashes were drawn with.
    /// * `num`: Capacity of a bounded-size sketch, or 0 for a scaled sketch.
    /// * `max_hash`: Largest hash value retained by a scaled sketch, or 0 if unbounded.
    /// * `seed`: Hash seed.
    /// * `molecule`: Molecule type, such as `DNA` or `protein`.
    /// * `mins`: Hash values in source order.
    /// * `abunds`: Optional abundances aligned with the hash values.
    ///
    /// Returns an error if the abundance vector is present but its length
    /// does not match the number of hash values.
    pub fn new(
        ksize: u32, num: u32, max_hash: u64, seed: u64, molecule: &str,
        mins: Vec<u64>, abunds: Option<Vec<u64>>
    ) -> Result<Self, String> {
        if let Some(counts) = &abunds {
            if counts.len() != mins.len() {
                return Err(format!(
                    "Abundance count {} does not match hash count {}", counts.len(), mins.len()
                ));
            }
        }
        Ok(MinHash {
            ksize, num, max_hash, seed,
            molecule: molecule.to_string(),
            mins, abunds,
        })
    }

    /// Creates a new sketch with the same parameters but different hash values.
    ///
    /// The caller must pass an abundance vector aligned with the hash values,
    /// or [`None`] if the source sketch does not track abundances.
    pub fn from_hashes(&self, mins: Vec<u64>, abunds: Option<Vec<u64>>) -> Self {
        MinHash {
            ksize: self.ksize,
            num: self.num,
            max_hash: self.max_hash,
            seed: self.seed,
            molecule: self.molecule.clone(),
            mins, abunds,
        }
    }

    /// Returns the number of hash values in the sketch.
    pub fn len(&self) -> usize {
        self.mins.len()
    }

    /// Returns `true` if the sketch contains no hash values.
    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    /// Returns the k-mer size.
    pub fn ksize(&self) -> u32 {
        self.ksize
    }

    /// Returns the capacity of a bounded-size sketch, or 0 for a scaled sketch.
    pub fn num(&self) -> u32 {
        self.num
    }

    /// Returns the largest retained hash value, or 0 if unbounded.
    pub fn max_hash(&self) -> u64 {
        self.max_hash
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the molecule type.
    pub fn molecule(&self) -> &str {
        &self.molecule
    }

    /// Returns the hash values in source order.
    pub fn mins(&self) -> &[u64] {
        &self.mins
    }

    /// Returns the abundances aligned with the hash values, if tracked.
    pub fn abundances(&self) -> Option<&[u64]> {
        self.abunds.as_deref()
    }

    /// Returns an iterator over the hash values in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.mins.iter()
    }
}

//-----------------------------------------------------------------------------

/// A signature: one MinHash sketch with identifying metadata.
///
/// The name and the source filename are optional, as in signature files
/// written by standard tools. The md5 checksum is carried through from the
/// source file when present. It describes the stored sketch, so deriving a
/// new signature with [`Signature::with_minhash`] clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    name: Option<String>,
    filename: Option<String>,
    md5sum: Option<String>,
    minhash: MinHash,
}

impl Signature {
    /// Creates a new signature from a sketch and metadata.
    pub fn new(minhash: MinHash, name: Option<String>, filename: Option<String>) -> Self {
        Signature {
            name, filename,
            md5sum: None,
            minhash,
        }
    }

    /// Creates a new signature with the same metadata but a different sketch.
    ///
    /// The checksum is not copied, as it describes the original sketch.
    pub fn with_minhash(&self, minhash: MinHash) -> Self {
        Signature {
            name: self.name.clone(),
            filename: self.filename.clone(),
            md5sum: None,
            minhash,
        }
    }

    /// Sets the md5 checksum carried through from the source file.
    pub fn set_md5sum(&mut self, md5sum: Option<String>) {
        self.md5sum = md5sum;
    }

    /// Returns the name of the signature, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the source filename of the signature, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns the md5 checksum from the source file, if any.
    pub fn md5sum(&self) -> Option<&str> {
        self.md5sum.as_deref()
    }

    /// Returns the sketch stored in the signature.
    pub fn minhash(&self) -> &MinHash {
        &self.minhash
    }

    /// Returns the number of hash values in the stored sketch.
    pub fn size(&self) -> usize {
        self.minhash.len()
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
