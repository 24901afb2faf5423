use std::path::PathBuf;
use std::time::Instant;
use std::{env, fs, process};

use sketch_chunk::{ChunkIter, SignatureSink};
use sketch_chunk::{storage, utils};

use getopts::Options;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    // Parse arguments.
    let config = Config::new();

    // Check if the output already exists.
    if utils::file_exists(&config.output) {
        if config.overwrite {
            eprintln!("Overwriting output {}", config.output.display());
            fs::remove_file(&config.output).map_err(|x| x.to_string())?;
        } else {
            return Err(format!("Output {} already exists", config.output.display()));
        }
    }

    // Break every signature into chunks and write the chunks as they are
    // produced. The sink finalizes the output even if the run aborts.
    let mut sink = SignatureSink::open(&config.output)?;
    let mut signatures = 0;
    for input in config.inputs.iter() {
        println!("loading from {}", input.display());
        let collection = storage::load_collection(input)?;
        for signature in collection.iter() {
            let mut n_chunks = 0;
            let mut total = 0;
            for chunk in ChunkIter::new(signature, config.chunk_size) {
                total += chunk.size();
                n_chunks += 1;
                sink.add(&chunk)?;
            }
            if total != signature.size() {
                return Err(format!(
                    "Chunking wrote {} hashes for a signature of {} hashes", total, signature.size()
                ));
            }
            println!("finished sig; {} chunks / {} hashes.", n_chunks, total);
            signatures += 1;
        }
    }
    let written = sink.finish()?;

    // Statistics.
    eprintln!(
        "Wrote {} chunks from {} signatures to {}",
        written, signatures, config.output.display()
    );
    let size = utils::file_size(&config.output).unwrap_or(String::from("unknown"));
    eprintln!("Final output size: {}", size);

    let end_time = Instant::now();
    let seconds = end_time.duration_since(start_time).as_secs_f64();
    eprintln!("Used {:.3} seconds", seconds);

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub chunk_size: usize,
    pub overwrite: bool,
}

impl Config {
    const DEFAULT_CHUNK_SIZE: usize = 10000;

    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();
        let header = format!("Usage: {} [options] -o output.zip signatures1 [signatures2 ...]", program);

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("o", "output", "output collection location (e.g. .zip); required", "FILE");
        let chunk_desc = format!(
            "maximum number of hashes per signature (default: {})", Self::DEFAULT_CHUNK_SIZE
        );
        opts.optopt("m", "max-hashes-per-sig", &chunk_desc, "INT");
        opts.optflag("", "overwrite", "overwrite the output file if it exists");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        let output = if let Some(s) = matches.opt_str("o") {
            PathBuf::from(s)
        } else {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        };

        let mut chunk_size = Self::DEFAULT_CHUNK_SIZE;
        if let Some(s) = matches.opt_str("m") {
            match s.parse::<usize>() {
                Ok(size) if size > 0 => chunk_size = size,
                _ => {
                    eprintln!("Invalid chunk size: {}", s);
                    process::exit(1);
                }
            }
        }

        if matches.free.is_empty() {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }
        let inputs = matches.free.iter().map(PathBuf::from).collect();

        let overwrite = matches.opt_present("overwrite");

        Config {
            inputs, output,
            chunk_size,
            overwrite,
        }
    }
}

//-----------------------------------------------------------------------------
