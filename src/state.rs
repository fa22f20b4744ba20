//! State returned from read operations.

use crate::status::Status;

/// Result state from a single read call.
///
/// `bytes_read` counts every byte copied during the call, including bytes
/// obtained before a failing read. Check `status` before trusting the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadState {
    /// Number of bytes placed in the handle's buffer.
    pub bytes_read: usize,

    /// Outcome flags of the call.
    pub status: Status,
}

impl ReadState {
    pub fn new(bytes_read: usize, status: Status) -> Self {
        Self { bytes_read, status }
    }

    /// A failed call that obtained no data.
    pub fn failed(status: Status) -> Self {
        Self {
            bytes_read: 0,
            status: status | Status::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_new() {
        let state = ReadState::new(4096, Status::OK);
        assert_eq!(state.bytes_read, 4096);
        assert!(state.status.is_ok());
    }

    #[test]
    fn test_state_failed() {
        let state = ReadState::failed(Status::COULD_NOT_LOCK);
        assert_eq!(state.bytes_read, 0);
        assert!(state.status.is_error());
        assert!(state.status.is_lock_failure());
        assert!(!state.status.is_ok());
    }
}
