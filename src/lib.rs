//! # fdreader
//!
//! Lock-guarded, chunked reading of regular files with composable status flags.
//!
//! ## Overview
//!
//! `fdreader` wraps a read-only file descriptor in a [`FileHandle`] that
//! validates the path at open time, captures the file's size and preferred
//! I/O block size, and passes an access pattern hint to the kernel with
//! `posix_fadvise`. Reads go through a bounded-chunk engine that:
//!
//! - Holds an exclusive `flock` advisory lock for the duration of each call
//! - Issues reads of at most the preferred block size
//! - Accumulates short reads until the requested count is met
//! - Stops at end-of-file or at the first hard error
//!
//! Outcomes are reported as a [`Status`] bit set rather than a single code,
//! so a failed open can be both `ERROR` and `NOT_FOUND`, and a short read can
//! be both `OK` and `EOF`.
//!
//! ## Example
//!
//! ```no_run
//! use fdreader::{Advice, FileHandle, Options};
//!
//! let options = Options::new().with_advice(Advice::Sequential);
//! let mut handle = FileHandle::open_with("/path/to/file", options).unwrap();
//!
//! // Read one block.
//! let state = handle.read(0);
//! println!("{} bytes, status {}", state.bytes_read, state.status);
//!
//! // Stream the rest in 64 KiB chunks.
//! handle.set_read_size(64 * 1024);
//! let status = handle.read_stream(|chunk| println!("chunk of {} bytes", chunk.len()));
//! assert!(status.is_eof());
//! ```
//!
//! ## Locking
//!
//! Locks are advisory and cooperative: they only exclude other readers that
//! also lock. By default acquisition blocks; select [`LockMode::NonBlocking`]
//! to fail fast with `ERROR | COULD_NOT_LOCK` instead.

mod error;
mod handle;
mod lock;
mod options;
mod reader;
mod state;
mod status;

pub use error::{Error, Result};
pub use handle::{FileHandle, FileKind, Metadata};
pub use options::{Advice, LockMode, Options, DEFAULT_MAX_READ_SIZE};
pub use state::ReadState;
pub use status::Status;
