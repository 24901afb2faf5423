//! Support for reading and writing signature files.
//!
//! A signature file is a JSON array of signature records. Each record
//! carries identifying metadata and an array of sketches, typically one per
//! k-mer size. The format is compatible with the files written by common
//! sketching tools:
//!
//! ```text
//! [
//!   {
//!     "class": "sourmash_signature",
//!     "name": "sample",
//!     "filename": "sample.fa",
//!     "signatures": [
//!       { "ksize": 31, "seed": 42, "num": 0, "max_hash": 0,
//!         "molecule": "DNA", "mins": [ ... ] }
//!     ]
//!   }
//! ]
//! ```
//!
//! Reading flattens the records: [`parse_signatures`] and
//! [`load_signature_file`] return one [`Signature`] per sketch, in file
//! order. Writing produces one record per signature. Unknown fields in the
//! input are ignored; missing sketch parameters fall back to the defaults
//! used by standard tools.

use crate::{Signature, MinHash};
use crate::utils;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};


//-----------------------------------------------------------------------------

/// Class tag identifying a signature record.
pub const FORMAT_CLASS: &str = "sourmash_signature";

/// Version of the signature format written by this crate.
pub const FORMAT_VERSION: f64 = 0.4;

// License tag written into new records.
const FORMAT_LICENSE: &str = "CC0";

//-----------------------------------------------------------------------------

// A signature record in a JSON signature file.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SignatureRecord {
    class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<f64>,
    signatures: Vec<SketchRecord>,
}

// A sketch within a signature record.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SketchRecord {
    ksize: u32,
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default)]
    num: u32,
    #[serde(default)]
    max_hash: u64,
    #[serde(default = "default_molecule")]
    molecule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    md5sum: Option<String>,
    mins: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    abundances: Option<Vec<u64>>,
}

fn default_seed() -> u64 {
    MinHash::DEFAULT_SEED
}

fn default_molecule() -> String {
    String::from("DNA")
}

//-----------------------------------------------------------------------------

// Flattens a record into one signature per sketch.
fn signatures_from_record(record: SignatureRecord) -> Result<Vec<Signature>, String> {
    if record.class != FORMAT_CLASS {
        return Err(format!("Unsupported record class: {}", record.class));
    }
    let mut result = Vec::with_capacity(record.signatures.len());
    for sketch in record.signatures {
        let minhash = MinHash::new(
            sketch.ksize, sketch.num, sketch.max_hash, sketch.seed, &sketch.molecule,
            sketch.mins, sketch.abundances
        )?;
        let mut signature = Signature::new(minhash, record.name.clone(), record.filename.clone());
        signature.set_md5sum(sketch.md5sum);
        result.push(signature);
    }
    Ok(result)
}

// Builds a record containing a single sketch.
fn record_from_signature(signature: &Signature) -> SignatureRecord {
    let minhash = signature.minhash();
    let sketch = SketchRecord {
        ksize: minhash.ksize(),
        seed: minhash.seed(),
        num: minhash.num(),
        max_hash: minhash.max_hash(),
        molecule: minhash.molecule().to_string(),
        md5sum: signature.md5sum().map(String::from),
        mins: minhash.mins().to_vec(),
        abundances: minhash.abundances().map(|counts| counts.to_vec()),
    };
    SignatureRecord {
        class: FORMAT_CLASS.to_string(),
        name: signature.name().map(String::from),
        filename: signature.filename().map(String::from),
        license: Some(FORMAT_LICENSE.to_string()),
        version: Some(FORMAT_VERSION),
        signatures: vec![sketch],
    }
}

//-----------------------------------------------------------------------------

/// Parses a JSON signature file from the reader.
///
/// Returns one signature per sketch, in file order.
/// Returns an error if the input is not valid JSON, if a record has an
/// unsupported class, or if a sketch is internally inconsistent.
pub fn parse_signatures<R: Read>(reader: R) -> Result<Vec<Signature>, String> {
    let records: Vec<SignatureRecord> = serde_json::from_reader(reader)
        .map_err(|x| x.to_string())?;
    let mut result = Vec::new();
    for record in records {
        result.extend(signatures_from_record(record)?);
    }
    Ok(result)
}

/// Loads signatures from a JSON signature file, which may be gzip-compressed.
///
/// Returns one signature per sketch, in file order.
///
/// # Examples
///
/// ```
/// use sketch_chunk::{formats, utils};
///
/// let filename = utils::get_test_data("two-sketches.sig");
/// let signatures = formats::load_signature_file(&filename).unwrap();
/// assert_eq!(signatures.len(), 2);
/// assert_eq!(signatures[0].name(), Some("sample"));
/// ```
pub fn load_signature_file<P: AsRef<Path>>(filename: P) -> Result<Vec<Signature>, String> {
    let reader = utils::open_file(&filename).map_err(|x| {
        format!("{}: {}", filename.as_ref().display(), x)
    })?;
    parse_signatures(reader).map_err(|x| {
        format!("{}: {}", filename.as_ref().display(), x)
    })
}

/// Serializes the signatures as a JSON signature file, one record per signature.
pub fn signatures_to_json(signatures: &[Signature]) -> Result<Vec<u8>, String> {
    let records: Vec<SignatureRecord> = signatures.iter().map(record_from_signature).collect();
    serde_json::to_vec(&records).map_err(|x| x.to_string())
}

//-----------------------------------------------------------------------------
