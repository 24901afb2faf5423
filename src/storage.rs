//! Signature collections and the output sink.
//!
//! A collection is a file containing any number of signatures: either a
//! JSON signature file (see [`crate::formats`]), possibly gzip-compressed,
//! or a zip archive whose entries are signature files. [`load_collection`]
//! reads either kind.
//!
//! [`SignatureSink`] is the write side. It is a scoped handle to the output
//! container: signatures are appended one at a time in the order given, and
//! the container is finalized by [`SignatureSink::finish`] or, as a
//! fallback, when the sink is dropped. The fallback keeps the container
//! well-formed for the signatures added before an error aborted the run.

use crate::Signature;
use crate::{formats, utils};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::slice;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use zip::{CompressionMethod, ZipArchive, ZipWriter};
use zip::write::SimpleFileOptions;


//-----------------------------------------------------------------------------

// Returns `true` if the path has the given extension, ignoring case.
fn has_extension(filename: &Path, extension: &str) -> bool {
    match filename.extension() {
        Some(ext) => ext.eq_ignore_ascii_case(extension),
        None => false,
    }
}

// Returns `true` if the entry name looks like a signature file.
fn is_signature_entry(name: &str) -> bool {
    name.ends_with(".sig") || name.ends_with(".sig.gz")
}

//-----------------------------------------------------------------------------

/// Loads all signatures stored in the given collection file.
///
/// A file with extension `.zip` is read as an archive: the signatures of
/// every `.sig` / `.sig.gz` entry are returned in archive order, and other
/// entries are skipped. Any other file is read as a JSON signature file,
/// which may be gzip-compressed. Unreadable and malformed input is an
/// error; there is no partial recovery.
pub fn load_collection<P: AsRef<Path>>(filename: P) -> Result<Vec<Signature>, String> {
    let filename = filename.as_ref();
    if has_extension(filename, "zip") {
        load_zip_collection(filename)
    } else {
        formats::load_signature_file(filename)
    }
}

// Loads the signatures from every signature entry in a zip archive.
fn load_zip_collection(filename: &Path) -> Result<Vec<Signature>, String> {
    let file = File::open(filename).map_err(|x| x.to_string())?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|x| {
        format!("{}: {}", filename.display(), x)
    })?;

    let mut result = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|x| x.to_string())?;
        let name = entry.name().to_string();
        if !is_signature_entry(&name) {
            continue;
        }
        let signatures = if name.ends_with(".gz") {
            formats::parse_signatures(MultiGzDecoder::new(entry))
        } else {
            formats::parse_signatures(entry)
        };
        result.extend(signatures.map_err(|x| {
            format!("{} in {}: {}", name, filename.display(), x)
        })?);
    }
    Ok(result)
}

//-----------------------------------------------------------------------------

// The container behind a sink.
enum SinkInner {
    // Each signature becomes a gzipped entry in the archive.
    Zip(ZipWriter<BufWriter<File>>),
    // Signatures are collected and written as a single JSON file on finish.
    Json {
        file: File,
        gzip: bool,
        signatures: Vec<Signature>,
    },
}

/// A scoped output sink that collects signatures into a single container.
///
/// The container is chosen by the file name passed to
/// [`SignatureSink::open`]: extension `.zip` opens an archive where each
/// signature is stored as its own gzipped entry, while any other name opens
/// a JSON signature file, gzip-compressed if the name ends in `.gz`.
///
/// Call [`SignatureSink::finish`] to finalize the container and get the
/// number of signatures written. If the sink is dropped without a call to
/// `finish`, it finalizes the container on a best-effort basis, so that an
/// aborted run still leaves well-formed output for the signatures added so
/// far. Errors in the fallback are ignored; call `finish` to see them.
///
/// # Examples
///
/// ```
/// use sketch_chunk::{MinHash, Signature, SignatureSink};
/// use sketch_chunk::{storage, utils};
/// use std::fs;
///
/// let minhash = MinHash::new(31, 0, 0, MinHash::DEFAULT_SEED, "DNA", vec![1, 2, 3], None).unwrap();
/// let signature = Signature::new(minhash, Some(String::from("example")), None);
///
/// let output = utils::temp_file_name("sink-example");
/// let mut sink = SignatureSink::open(&output).unwrap();
/// sink.add(&signature).unwrap();
/// assert_eq!(sink.finish().unwrap(), 1);
///
/// let loaded = storage::load_collection(&output).unwrap();
/// assert_eq!(loaded.len(), 1);
/// fs::remove_file(&output).unwrap();
/// ```
pub struct SignatureSink {
    filename: PathBuf,
    inner: Option<SinkInner>,
    written: usize,
}

impl SignatureSink {
    /// Opens a sink writing to the given file.
    ///
    /// The file is created immediately, so an unwritable destination fails
    /// here rather than at the end of the run.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<Self, String> {
        let filename = filename.as_ref().to_path_buf();
        let file = File::create(&filename).map_err(|x| {
            format!("{}: {}", filename.display(), x)
        })?;
        let inner = if has_extension(&filename, "zip") {
            SinkInner::Zip(ZipWriter::new(BufWriter::new(file)))
        } else {
            let gzip = has_extension(&filename, "gz");
            SinkInner::Json { file, gzip, signatures: Vec::new() }
        };
        Ok(SignatureSink {
            filename,
            inner: Some(inner),
            written: 0,
        })
    }

    /// Returns the name of the output file.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Returns the number of signatures added so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Appends one signature to the container.
    ///
    /// Returns an error if the sink is already finished or the write fails.
    pub fn add(&mut self, signature: &Signature) -> Result<(), String> {
        let inner = self.inner.as_mut()
            .ok_or_else(|| String::from("The sink is already finished"))?;
        match inner {
            SinkInner::Zip(writer) => {
                let name = format!("signatures/{:06}.sig.gz", self.written);
                let options = SimpleFileOptions::default()
                    .compression_method(CompressionMethod::Stored);
                writer.start_file(name, options).map_err(|x| x.to_string())?;
                let json = formats::signatures_to_json(slice::from_ref(signature))?;
                let mut encoder = GzEncoder::new(&mut *writer, Compression::default());
                encoder.write_all(&json).map_err(|x| x.to_string())?;
                let _ = encoder.finish().map_err(|x| x.to_string())?;
            },
            SinkInner::Json { signatures, .. } => {
                signatures.push(signature.clone());
            },
        }
        self.written += 1;
        Ok(())
    }

    /// Finalizes the container and returns the number of signatures written.
    pub fn finish(mut self) -> Result<usize, String> {
        self.finalize()?;
        Ok(self.written)
    }

    // Finalizes the container if it is still open.
    fn finalize(&mut self) -> Result<(), String> {
        match self.inner.take() {
            None => Ok(()),
            Some(SinkInner::Zip(writer)) => {
                let mut inner = writer.finish().map_err(|x| x.to_string())?;
                inner.flush().map_err(|x| x.to_string())
            },
            Some(SinkInner::Json { file, gzip, signatures }) => {
                let json = formats::signatures_to_json(&signatures)?;
                let mut writer = BufWriter::new(file);
                if gzip {
                    let mut encoder = GzEncoder::new(writer, Compression::default());
                    encoder.write_all(&json).map_err(|x| x.to_string())?;
                    let mut inner = encoder.finish().map_err(|x| x.to_string())?;
                    inner.flush().map_err(|x| x.to_string())?;
                } else {
                    writer.write_all(&json).map_err(|x| x.to_string())?;
                    writer.flush().map_err(|x| x.to_string())?;
                }
                Ok(())
            },
        }
    }
}

impl std::fmt::Debug for SignatureSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSink")
            .field("filename", &self.filename)
            .field("written", &self.written)
            .finish()
    }
}

impl Drop for SignatureSink {
    fn drop(&mut self) {
        let _ = self.finalize();
    }
}

//-----------------------------------------------------------------------------
