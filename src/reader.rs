//! The lock-guarded, bounded-chunk read engine.
//!
//! Every read acquires an exclusive advisory lock on the descriptor, issues
//! reads of at most the preferred block size until the target is met or the
//! file is exhausted, and releases the lock before returning.

use crate::handle::FileHandle;
use crate::lock::FileLock;
use crate::options::Options;
use crate::state::ReadState;
use crate::status::Status;

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

impl FileHandle {
    /// Read up to `bytes` bytes from the current offset.
    ///
    /// Zero reads the configured read size (see
    /// [`set_read_size`](FileHandle::set_read_size)). Counts above
    /// [`Options::max_read_size`] are capped to it. The bytes obtained
    /// replace the handle's buffer and are available through
    /// [`get`](FileHandle::get).
    ///
    /// Consecutive calls advance through the file. The returned status carries
    /// `EOF` when a read hit the end of the file before the target was met.
    pub fn read(&mut self, bytes: usize) -> ReadState {
        let target = if bytes == 0 { self.read_size() } else { bytes };
        let target = target.min(self.options.max_read_size.max(1));
        self.read_chunk(target, false)
    }

    /// Read the whole file from the beginning.
    ///
    /// The target is the size captured at open time, so the buffer never
    /// holds more than that. `EOF` is only reported if the file turned out to
    /// be shorter than the snapshot.
    pub fn read_all(&mut self) -> (Status, &[u8]) {
        let target = usize::try_from(self.metadata.size).unwrap_or(usize::MAX);
        let state = self.read_chunk(target, true);
        (state.status, self.buffer.as_slice())
    }

    /// Read the file in chunks of the configured read size, handing each
    /// non-empty chunk to `f` in file order.
    ///
    /// Streaming starts at the current offset and stops at the first `EOF` or
    /// `ERROR`, which is returned. A chunk from a failed read is not delivered.
    pub fn read_stream<F>(&mut self, mut f: F) -> Status
    where
        F: FnMut(&[u8]),
    {
        let result = self.try_read_stream(|chunk| {
            f(chunk);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }

    /// Like [`read_stream`](FileHandle::read_stream), but stops as soon as
    /// `f` returns an error and hands that error back.
    pub fn try_read_stream<F, E>(&mut self, mut f: F) -> Result<Status, E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let chunk = self.read_size();
        loop {
            let state = self.read(chunk);
            if state.bytes_read > 0 && !state.status.is_error() {
                f(&self.buffer)?;
            }
            if !state.status.should_continue() {
                return Ok(state.status);
            }
        }
    }

    /// The bytes obtained by the most recent read call.
    pub fn get(&self) -> &[u8] {
        &self.buffer
    }

    fn read_chunk(&mut self, target: usize, rewind: bool) -> ReadState {
        self.buffer.clear();

        let Some(file) = &self.file else {
            log::error!("read on closed handle {}", self.path.display());
            return ReadState::failed(Status::empty());
        };

        let ctx = ReadContext::new(file, self.metadata.block_size, &self.options);
        ctx.read_into(&mut self.buffer, target, rewind)
    }
}

/// Internal helper to perform the locked read loop.
struct ReadContext<'a> {
    file: &'a File,
    block_size: usize,
    options: &'a Options,
}

impl<'a> ReadContext<'a> {
    fn new(file: &'a File, block_size: usize, options: &'a Options) -> Self {
        Self {
            file,
            block_size,
            options,
        }
    }

    fn read_into(&self, buf: &mut Vec<u8>, target: usize, rewind: bool) -> ReadState {
        let lock = match FileLock::acquire(self.file, self.options.lock_mode) {
            Ok(lock) => lock,
            Err(e) => {
                log::warn!("could not acquire read lock: {}", e);
                return ReadState::failed(Status::COULD_NOT_LOCK);
            }
        };

        let mut file = self.file;
        let status = if rewind {
            match file.seek(SeekFrom::Start(0)) {
                Ok(_) => read_blocks(&mut file, buf, target, self.block_size, self.options.debug),
                Err(e) => {
                    log::error!("failed to seek to start of file: {}", e);
                    Status::ERROR
                }
            }
        } else {
            read_blocks(&mut file, buf, target, self.block_size, self.options.debug)
        };

        ReadState::new(buf.len(), settle(status, lock.release()))
    }
}

/// Fold the outcome of the lock release into the read status.
///
/// A failed unlock overrides the read status.
fn settle(status: Status, released: io::Result<()>) -> Status {
    match released {
        Ok(()) => status,
        Err(e) => {
            log::warn!("could not release read lock: {}", e);
            Status::lock_failure()
        }
    }
}

/// Fill `buf` with up to `target` bytes from `reader`, one block at a time.
///
/// Stops at the first zero-length read (`OK | EOF`) or hard error (`ERROR`).
/// Bytes obtained before an error stay in `buf`.
fn read_blocks<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    target: usize,
    block_size: usize,
    debug: bool,
) -> Status {
    let mut remaining = target;

    while remaining > 0 {
        let want = remaining.min(block_size);
        let start = buf.len();
        buf.resize(start + want, 0);

        let n = match read_retrying(reader, &mut buf[start..]) {
            Ok(n) => n,
            Err(e) => {
                buf.truncate(start);
                log::error!("read failed after {} bytes: {}", start, e);
                return Status::ERROR;
            }
        };
        buf.truncate(start + n);

        if debug {
            log::debug!("read {} of {} bytes at buffer offset {}", n, want, start);
        }

        if n == 0 {
            return Status::ok_eof();
        }
        remaining -= n;
    }

    Status::OK
}

/// `read(2)` that retries when interrupted by a signal.
fn read_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
