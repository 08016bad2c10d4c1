//! Error types for the FINS protocol.

use std::io;
use thiserror::Error;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors that can occur during FINS communication.
///
/// The taxonomy is closed to six kinds, chosen so a caller can match on the
/// *category* of failure without needing to inspect a reason string:
/// connection setup/teardown, timeouts, malformed addresses, read failures,
/// write failures, and PLC-reported protocol errors.
#[derive(Debug, Error)]
pub enum FinsError {
    /// The transport could not be established, or was lost mid-session.
    #[error("connection error: {reason}")]
    Connection {
        /// Description of what went wrong.
        reason: String,
    },

    /// No response arrived before the configured timeout elapsed.
    #[error("communication timeout")]
    Timeout,

    /// A memory address (textual or structured) could not be resolved to a
    /// valid area/word/bit triple, or violated a documented limit (e.g. the
    /// 32-address cap on a multi-read).
    #[error("invalid address: {reason}")]
    InvalidAddress {
        /// Description of the addressing error.
        reason: String,
    },

    /// A read operation failed for a reason not covered by the other kinds
    /// (insufficient payload bytes, malformed response, SID mismatch).
    #[error("read failed: {reason}")]
    Read {
        /// Description of the failure.
        reason: String,
    },

    /// Symmetric to [`FinsError::Read`], for write operations.
    #[error("write failed: {reason}")]
    Write {
        /// Description of the failure.
        reason: String,
    },

    /// The PLC itself reported a non-zero main/sub response code.
    #[error("PLC reported an error: main code 0x{main_code:02X}, sub code 0x{sub_code:02X}")]
    Protocol {
        /// Main response code from the PLC.
        main_code: u8,
        /// Sub response code from the PLC.
        sub_code: u8,
    },
}

impl FinsError {
    /// Creates a new `Connection` error.
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidAddress` error.
    pub fn invalid_address(reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            reason: reason.into(),
        }
    }

    /// Creates a new `Read` error.
    pub fn read(reason: impl Into<String>) -> Self {
        Self::Read {
            reason: reason.into(),
        }
    }

    /// Creates a new `Write` error.
    pub fn write(reason: impl Into<String>) -> Self {
        Self::Write {
            reason: reason.into(),
        }
    }

    /// Creates a new `Protocol` error from the PLC's main/sub response codes.
    pub fn protocol(main_code: u8, sub_code: u8) -> Self {
        Self::Protocol {
            main_code,
            sub_code,
        }
    }

    /// Reclassifies a [`FinsError::Read`] as a [`FinsError::Write`], leaving
    /// every other kind untouched. Used by write-shaped session operations
    /// that share response-decoding helpers with reads.
    pub(crate) fn into_write(self) -> Self {
        match self {
            FinsError::Read { reason } => FinsError::Write { reason },
            other => other,
        }
    }
}

impl From<io::Error> for FinsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => FinsError::Timeout,
            _ => FinsError::connection(err.to_string()),
        }
    }
}

/// Returns a short, human-readable description of an error, naming the
/// address or command that failed where one is known.
///
/// This is a thin wrapper over [`FinsError`]'s `Display` impl, kept as a
/// free function so callers who only want a log-friendly string don't need
/// to import the `Display`/`ToString` traits themselves.
pub fn fins_error_description(err: &FinsError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_display() {
        let err = FinsError::protocol(0x01, 0x01);
        assert_eq!(
            err.to_string(),
            "PLC reported an error: main code 0x01, sub code 0x01"
        );
    }

    #[test]
    fn test_invalid_address_display() {
        let err = FinsError::invalid_address("unknown memory area prefix 'ZZ'");
        assert_eq!(
            err.to_string(),
            "invalid address: unknown memory area prefix 'ZZ'"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(FinsError::Timeout.to_string(), "communication timeout");
    }

    #[test]
    fn test_into_write_reclassifies_read_only() {
        let read = FinsError::read("short response").into_write();
        assert!(matches!(read, FinsError::Write { .. }));

        let timeout = FinsError::Timeout.into_write();
        assert!(matches!(timeout, FinsError::Timeout));
    }

    #[test]
    fn test_io_error_mapping() {
        let would_block = io::Error::from(io::ErrorKind::WouldBlock);
        assert!(matches!(FinsError::from(would_block), FinsError::Timeout));

        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(matches!(
            FinsError::from(refused),
            FinsError::Connection { .. }
        ));
    }

    #[test]
    fn test_fins_error_description() {
        let err = FinsError::invalid_address("bad address");
        assert_eq!(fins_error_description(&err), err.to_string());
    }
}
