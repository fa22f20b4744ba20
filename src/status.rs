//! Status flags returned from open and read operations.

use std::fmt;

bitflags::bitflags! {
    /// Result status of an operation.
    ///
    /// Flags are independent: a single operation can fail for more than one
    /// reason, so a failed open is reported as e.g. `ERROR | NOT_FOUND`.
    /// Statuses produced by this crate never carry both [`Status::OK`] and
    /// [`Status::ERROR`]. [`Status::EOF`] may accompany either.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// The operation succeeded.
        const OK = 1 << 0;
        /// The operation failed.
        const ERROR = 1 << 1;
        /// The end of the file was reached.
        const EOF = 1 << 2;
        /// The advisory lock could not be acquired or released.
        const COULD_NOT_LOCK = 1 << 3;
        /// The path does not exist.
        const NOT_FOUND = 1 << 4;
        /// The caller lacks permission to read the path.
        const INSUFFICIENT_ACCESS = 1 << 5;
        /// The path is not a regular file.
        const INVALID_TYPE = 1 << 6;
    }
}

impl Status {
    /// Status of a read that stopped at the end of the file.
    pub const fn ok_eof() -> Self {
        Self::OK.union(Self::EOF)
    }

    /// Status of a failed lock acquisition or release.
    pub const fn lock_failure() -> Self {
        Self::ERROR.union(Self::COULD_NOT_LOCK)
    }

    pub fn is_ok(&self) -> bool {
        self.contains(Self::OK)
    }

    pub fn is_error(&self) -> bool {
        self.contains(Self::ERROR)
    }

    pub fn is_eof(&self) -> bool {
        self.contains(Self::EOF)
    }

    pub fn is_lock_failure(&self) -> bool {
        self.contains(Self::COULD_NOT_LOCK)
    }

    pub fn is_not_found(&self) -> bool {
        self.contains(Self::NOT_FOUND)
    }

    pub fn is_access_error(&self) -> bool {
        self.contains(Self::INSUFFICIENT_ACCESS)
    }

    pub fn is_type_error(&self) -> bool {
        self.contains(Self::INVALID_TYPE)
    }

    /// Whether the read finished without error and more data may follow.
    ///
    /// Streaming stops as soon as this is false.
    pub fn should_continue(&self) -> bool {
        self.is_ok() && !self.is_eof()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_predicates() {
        let status = Status::OK;
        assert!(status.is_ok());
        assert!(!status.is_error());
        assert!(!status.is_eof());
        assert!(!status.is_lock_failure());
        assert!(!status.is_not_found());
        assert!(!status.is_access_error());
        assert!(!status.is_type_error());
    }

    #[test]
    fn test_composed_flags_keep_every_cause() {
        let status = Status::ERROR | Status::INSUFFICIENT_ACCESS;
        assert!(status.is_error());
        assert!(status.is_access_error());
        assert!(!status.is_ok());
        assert!(!status.is_not_found());

        let status = Status::lock_failure();
        assert!(status.is_error());
        assert!(status.is_lock_failure());
        assert!(!status.is_eof());
    }

    #[test]
    fn test_eof_with_ok() {
        let status = Status::ok_eof();
        assert!(status.is_ok());
        assert!(status.is_eof());
        assert!(!status.is_error());
        assert!(!status.should_continue());
        assert!(Status::OK.should_continue());
        assert!(!Status::ERROR.should_continue());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::OK.to_string(), "OK");
        assert_eq!(
            (Status::ERROR | Status::NOT_FOUND).to_string(),
            "ERROR | NOT_FOUND"
        );
        assert_eq!(Status::empty().to_string(), "NONE");
    }
}
