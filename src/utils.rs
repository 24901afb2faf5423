//! Utility functions for working with files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::io::{BufRead, BufReader, Read};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::read::MultiGzDecoder;

//-----------------------------------------------------------------------------

/// Returns the full file name for a specific test file.
pub fn get_test_data(filename: &'static str) -> PathBuf {
    let mut buf = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    buf.push("test-data");
    buf.push(filename);
    buf
}

static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns a name for a temporary file in the system temp directory.
///
/// The name is based on the given prefix, the process id, and a counter.
/// The file itself is not created.
pub fn temp_file_name(prefix: &str) -> PathBuf {
    let count = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let name = format!("{}_{}_{}", prefix, process::id(), count);
    let mut buf = std::env::temp_dir();
    buf.push(name);
    buf
}

//-----------------------------------------------------------------------------

const SIZE_UNITS: [(f64, &str); 6] = [
    (1.0, "B"),
    (1024.0, "KiB"),
    (1024.0 * 1024.0, "MiB"),
    (1024.0 * 1024.0 * 1024.0, "GiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0, "PiB"),
];

/// Returns a human-readable representation of the given number of bytes.
pub fn human_readable_size(bytes: usize) -> String {
    let mut unit = 0;
    let value = bytes as f64;
    while unit + 1 < SIZE_UNITS.len() && value >= SIZE_UNITS[unit + 1].0 {
        unit += 1;
    }
    format!("{:.3} {}", value / SIZE_UNITS[unit].0, SIZE_UNITS[unit].1)
}

/// Returns a human-readable size of the file.
pub fn file_size<P: AsRef<Path>>(filename: P) -> Option<String> {
    let metadata = fs::metadata(filename).ok()?;
    Some(human_readable_size(metadata.len() as usize))
}

/// Returns `true` if the file exists.
pub fn file_exists<P: AsRef<Path>>(filename: P) -> bool {
    fs::metadata(filename).is_ok()
}

/// Returns `true` if the file appears to be gzip-compressed.
pub fn is_gzipped<P: AsRef<Path>>(filename: P) -> bool {
    let file = match File::open(filename) {
        Ok(f) => f,
        Err(_) => return false,
    };
    let mut reader = BufReader::new(file);
    let mut magic = [0; 2];
    let len = reader.read(&mut magic).ok();
    len == Some(2) && magic == [0x1F, 0x8B]
}

/// Returns a buffered reader for the file, which may be gzip-compressed.
pub fn open_file<P: AsRef<Path>>(filename: P) -> Result<Box<dyn BufRead>, String> {
    let file = File::open(&filename).map_err(|x| x.to_string())?;
    let inner = BufReader::new(file);
    if is_gzipped(&filename) {
        let inner = MultiGzDecoder::new(inner);
        Ok(Box::new(BufReader::new(inner)))
    } else {
        Ok(Box::new(inner))
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    #[test]
    fn readable_sizes() {
        assert_eq!(human_readable_size(0), "0.000 B", "Wrong size for 0 bytes");
        assert_eq!(human_readable_size(1023), "1023.000 B", "Wrong size below 1 KiB");
        assert_eq!(human_readable_size(1024), "1.000 KiB", "Wrong size for 1 KiB");
        assert_eq!(human_readable_size(3 * 1024 * 1024), "3.000 MiB", "Wrong size for 3 MiB");
    }

    #[test]
    fn temp_file_names() {
        let first = temp_file_name("utils");
        let second = temp_file_name("utils");
        assert_ne!(first, second, "Duplicate temporary file names");
    }

    #[test]
    fn gzip_detection() {
        let plain_file = temp_file_name("plain");
        fs::write(&plain_file, b"some uncompressed text").unwrap();
        assert!(!is_gzipped(&plain_file), "Plain file detected as gzipped");

        let gz_file = temp_file_name("gzipped");
        let mut encoder = GzEncoder::new(File::create(&gz_file).unwrap(), Compression::default());
        encoder.write_all(b"some compressed text").unwrap();
        encoder.finish().unwrap();
        assert!(is_gzipped(&gz_file), "Gzipped file not detected");

        let mut reader = open_file(&gz_file).unwrap();
        let mut contents = String::new();
        reader.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "some compressed text", "Wrong contents after decompression");

        let _ = fs::remove_file(&plain_file);
        let _ = fs::remove_file(&gz_file);
    }
}

//-----------------------------------------------------------------------------
