//! File handle lifecycle: open, validate, configure and close.

use crate::error::{Error, Result};
use crate::options::{Advice, Options};

use std::ffi::CString;
use std::fmt;
use std::fs::{self, File, FileType, OpenOptions};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, MetadataExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

/// The type of filesystem object a path refers to.
///
/// Symbolic links are followed, so the target's type is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Unknown,
}

impl From<FileType> for FileKind {
    fn from(ft: FileType) -> Self {
        if ft.is_file() {
            FileKind::Regular
        } else if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_block_device() {
            FileKind::BlockDevice
        } else if ft.is_char_device() {
            FileKind::CharDevice
        } else if ft.is_fifo() {
            FileKind::Fifo
        } else if ft.is_socket() {
            FileKind::Socket
        } else {
            FileKind::Unknown
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::Regular => "regular file",
            FileKind::Directory => "directory",
            FileKind::BlockDevice => "block device",
            FileKind::CharDevice => "character device",
            FileKind::Fifo => "fifo",
            FileKind::Socket => "socket",
            FileKind::Unknown => "unknown file type",
        };
        f.write_str(name)
    }
}

/// Snapshot of file metadata taken when the handle was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Total size in bytes.
    pub size: u64,
    /// Preferred I/O block size (`st_blksize`). Never zero.
    pub block_size: usize,
    pub kind: FileKind,
}

impl Metadata {
    fn from_std(meta: &fs::Metadata) -> Self {
        Self {
            size: meta.len(),
            block_size: usize::try_from(meta.blksize()).unwrap_or(0).max(1),
            kind: FileKind::from(meta.file_type()),
        }
    }
}

/// An open regular file read through the lock-guarded chunk engine.
///
/// The handle exclusively owns its descriptor. It is released when the handle
/// is dropped or [`close`](FileHandle::close) is called, whichever comes first.
#[derive(Debug)]
pub struct FileHandle {
    pub(crate) file: Option<File>,
    pub(crate) path: PathBuf,
    pub(crate) metadata: Metadata,
    pub(crate) options: Options,
    pub(crate) buffer: Vec<u8>,
}

impl FileHandle {
    /// Open `path` for reading with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, Options::default())
    }

    /// Open `path` for reading with the given options.
    ///
    /// Fails with [`Error::NotFound`] or [`Error::InsufficientAccess`] if the
    /// path cannot be accessed, and with [`Error::InvalidType`] if it is not a
    /// regular file.
    pub fn open_with<P: AsRef<Path>>(path: P, options: Options) -> Result<Self> {
        let path = path.as_ref();

        check_access(path)?;

        let kind = FileKind::from(fs::metadata(path)?.file_type());
        if kind != FileKind::Regular {
            return Err(Error::InvalidType(path.to_path_buf(), kind));
        }

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(options.custom_flags & !libc::O_ACCMODE)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => Error::InsufficientAccess(path.to_path_buf()),
                _ => Error::Io(e),
            })?;

        // The path may have been swapped between stat and open.
        let metadata = Metadata::from_std(&file.metadata()?);
        if metadata.kind != FileKind::Regular {
            return Err(Error::InvalidType(path.to_path_buf(), metadata.kind));
        }

        advise(&file, options.advice);

        log::debug!(
            "opened {} (size {}, block size {})",
            path.display(),
            metadata.size,
            metadata.block_size
        );

        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            metadata,
            options,
            buffer: Vec::new(),
        })
    }

    /// Whether the handle still owns an open descriptor.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Close the descriptor. Closing an already closed handle does nothing.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            log::debug!("closed {}", self.path.display());
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metadata captured at open time.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Bytes a default [`read`](FileHandle::read) targets.
    pub fn read_size(&self) -> usize {
        self.options.read_size.unwrap_or(self.metadata.block_size)
    }

    /// Set the default read size for subsequent reads.
    ///
    /// Zero restores the preferred block size.
    pub fn set_read_size(&mut self, size: usize) -> &mut Self {
        self.options.read_size = (size != 0).then_some(size);
        self
    }

    /// Change the access pattern hint and pass it to the kernel immediately.
    pub fn set_access_advice(&mut self, advice: Advice) -> &mut Self {
        self.options.advice = advice;
        if let Some(file) = &self.file {
            advise(file, advice);
        }
        self
    }
}

/// Check that `path` exists and is readable with `access(2)`.
fn check_access(path: &Path) -> Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let ret = unsafe { libc::access(c_path.as_ptr(), libc::R_OK) };
    if ret == 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ENOENT) | Some(libc::ENOTDIR) => Err(Error::NotFound(path.to_path_buf())),
        Some(libc::EACCES) | Some(libc::EPERM) => {
            Err(Error::InsufficientAccess(path.to_path_buf()))
        }
        _ => Err(Error::Io(err)),
    }
}

/// Apply the access hint to the whole file. Failures are only logged.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn advise(file: &File, advice: Advice) {
    use std::os::unix::io::AsRawFd;

    let ret = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, 0, advice.as_raw()) };
    if ret != 0 {
        log::warn!(
            "posix_fadvise({}) failed: {}",
            advice,
            io::Error::from_raw_os_error(ret)
        );
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn advise(_file: &File, advice: Advice) {
    log::debug!("access advice {} not supported on this platform", advice);
}
