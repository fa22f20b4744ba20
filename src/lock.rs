//! Advisory `flock(2)` guard scoped to a single read.

use crate::options::LockMode;
use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// An exclusive advisory lock held on an open file.
///
/// Release it with [`FileLock::release`] to observe unlock failures. If the
/// guard is dropped instead, the lock is released and any failure is logged.
#[derive(Debug)]
pub(crate) struct FileLock {
    fd: RawFd,
    held: bool,
}

impl FileLock {
    /// Acquire an exclusive lock on `file` using `mode`.
    ///
    /// In [`LockMode::NonBlocking`] a contended lock fails with
    /// [`io::ErrorKind::WouldBlock`].
    pub(crate) fn acquire(file: &File, mode: LockMode) -> io::Result<Self> {
        let fd = file.as_raw_fd();
        let op = match mode {
            LockMode::Blocking => libc::LOCK_EX,
            LockMode::NonBlocking => libc::LOCK_EX | libc::LOCK_NB,
        };
        flock(fd, op)?;
        log::debug!("acquired {:?} lock on fd {}", mode, fd);
        Ok(Self { fd, held: true })
    }

    /// Release the lock, reporting failure to the caller.
    pub(crate) fn release(mut self) -> io::Result<()> {
        self.held = false;
        flock(self.fd, libc::LOCK_UN)
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if self.held {
            if let Err(e) = flock(self.fd, libc::LOCK_UN) {
                log::warn!("failed to release lock on fd {}: {}", self.fd, e);
            }
        }
    }
}

/// `flock(2)` that retries when interrupted by a signal.
fn flock(fd: RawFd, op: libc::c_int) -> io::Result<()> {
    loop {
        let ret = unsafe { libc::flock(fd, op) };
        if ret == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
