//! Configuration options for fdreader handles.

use std::fmt;
use std::str::FromStr;

/// Default ceiling for a single read request (256 MiB).
pub const DEFAULT_MAX_READ_SIZE: usize = 256 * 1024 * 1024;

/// Access pattern hint passed to the kernel with `posix_fadvise(2)`.
///
/// The hint only tunes read-ahead and caching. It never changes what a read
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Advice {
    Normal,
    #[default]
    Sequential,
    Random,
    NoReuse,
    WillNeed,
    DontNeed,
}

impl Advice {
    /// The `POSIX_FADV_*` constant for this hint.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub(crate) fn as_raw(self) -> libc::c_int {
        match self {
            Advice::Normal => libc::POSIX_FADV_NORMAL,
            Advice::Sequential => libc::POSIX_FADV_SEQUENTIAL,
            Advice::Random => libc::POSIX_FADV_RANDOM,
            Advice::NoReuse => libc::POSIX_FADV_NOREUSE,
            Advice::WillNeed => libc::POSIX_FADV_WILLNEED,
            Advice::DontNeed => libc::POSIX_FADV_DONTNEED,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Advice::Normal => "normal",
            Advice::Sequential => "sequential",
            Advice::Random => "random",
            Advice::NoReuse => "noreuse",
            Advice::WillNeed => "willneed",
            Advice::DontNeed => "dontneed",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Advice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "normal" => Ok(Advice::Normal),
            "sequential" => Ok(Advice::Sequential),
            "random" => Ok(Advice::Random),
            "noreuse" => Ok(Advice::NoReuse),
            "willneed" => Ok(Advice::WillNeed),
            "dontneed" => Ok(Advice::DontNeed),
            other => Err(format!("unknown access advice: {}", other)),
        }
    }
}

/// How the per-read advisory lock is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// Wait until the exclusive lock is granted (`LOCK_EX`).
    #[default]
    Blocking,
    /// Fail the read immediately if another reader holds the lock
    /// (`LOCK_EX | LOCK_NB`).
    NonBlocking,
}

/// Options for controlling how a file is opened and read.
#[derive(Debug, Clone)]
pub struct Options {
    /// Target bytes per [`read`](crate::FileHandle::read) when no explicit
    /// count is given.
    ///
    /// `None` (default) uses the file's preferred I/O block size.
    pub read_size: Option<usize>,

    /// Access pattern hint applied at open time.
    pub advice: Advice,

    /// Lock acquisition mode used by every read.
    pub lock_mode: LockMode,

    /// Extra `open(2)` flags, e.g. `libc::O_NOATIME`.
    ///
    /// The file is always opened read-only; access mode bits are masked off.
    pub custom_flags: i32,

    /// Largest number of bytes a single [`read`](crate::FileHandle::read)
    /// places in the buffer.
    ///
    /// Larger requests are capped to this size. Whole-file reads are bounded
    /// by the size captured at open time instead.
    pub max_read_size: usize,

    /// Log every bounded read issued by the engine at debug level.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            read_size: None,
            advice: Advice::default(),
            lock_mode: LockMode::default(),
            custom_flags: 0,
            max_read_size: DEFAULT_MAX_READ_SIZE,
            debug: false,
        }
    }
}

impl Options {
    /// Create a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default read size. Zero restores the block-size default.
    pub fn with_read_size(mut self, size: usize) -> Self {
        self.read_size = (size != 0).then_some(size);
        self
    }

    pub fn with_advice(mut self, advice: Advice) -> Self {
        self.advice = advice;
        self
    }

    pub fn with_lock_mode(mut self, mode: LockMode) -> Self {
        self.lock_mode = mode;
        self
    }

    pub fn with_custom_flags(mut self, flags: i32) -> Self {
        self.custom_flags = flags;
        self
    }

    pub fn with_max_read_size(mut self, size: usize) -> Self {
        self.max_read_size = size;
        self
    }

    /// Enable or disable per-chunk debug logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
