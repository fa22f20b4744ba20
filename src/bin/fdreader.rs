//! CLI tool for reading a regular file through the lock-guarded chunk engine.
//!
//! This tool uses the `fdreader` library to copy a file to stdout (or to an
//! output file), one bounded chunk at a time.

use clap::Parser;
use fdreader::{Advice, FileHandle, LockMode, Options, Status};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Read a regular file in bounded chunks under an exclusive advisory lock.
#[derive(Parser, Debug)]
#[command(name = "fdreader")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the file to read
    path: PathBuf,

    /// Bytes per chunk (default: the file's preferred I/O block size)
    #[arg(short, long, default_value = "0")]
    chunk_size: usize,

    /// Access pattern hint: normal, sequential, random, noreuse, willneed, dontneed
    #[arg(short, long, default_value = "sequential")]
    advice: Advice,

    /// Read the whole file in a single locked call instead of streaming
    #[arg(long)]
    all: bool,

    /// Fail instead of waiting when another reader holds the lock
    #[arg(long)]
    non_blocking: bool,

    /// Enable verbose output (metadata, chunk count, final status)
    #[arg(short, long)]
    verbose: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(status) if !status.is_error() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("Error: read failed with status {}", status);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Status, Box<dyn std::error::Error>> {
    let lock_mode = if args.non_blocking {
        LockMode::NonBlocking
    } else {
        LockMode::Blocking
    };

    let options = Options::new()
        .with_read_size(args.chunk_size)
        .with_advice(args.advice)
        .with_lock_mode(lock_mode);

    let mut handle = FileHandle::open_with(&args.path, options).map_err(|e| {
        if args.verbose {
            eprintln!("Open status: {}", e.status());
        }
        e
    })?;

    if args.verbose {
        let meta = handle.metadata();
        eprintln!("File: {}", handle.path().display());
        eprintln!("Size: {}", meta.size);
        eprintln!("Block size: {}", meta.block_size);
        eprintln!("Chunk size: {}", handle.read_size());
        eprintln!("Advice: {}", args.advice);
        eprintln!("Lock mode: {:?}", lock_mode);
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let status = if args.all {
        let (status, data) = handle.read_all();
        if !status.is_error() {
            out.write_all(data)?;
        }
        status
    } else {
        let mut chunks = 0usize;
        let status = handle.try_read_stream(|chunk| {
            chunks += 1;
            out.write_all(chunk)
        })?;
        if args.verbose {
            eprintln!("Chunks: {}", chunks);
        }
        status
    };

    out.flush()?;

    if args.verbose {
        eprintln!("Status: {}", status);
        if let Some(output_path) = &args.output {
            eprintln!("Output written to: {}", output_path.display());
        }
    }

    Ok(status)
}
