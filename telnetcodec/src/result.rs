//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by the argument helpers and the encoder.
///
/// Decoding never fails: malformed input from the peer is absorbed by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An I/O error occurred while writing encoded output.
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },

    /// Error occurred while parsing or building subnegotiation data.
    SubnegotiationError {
        /// The telnet option being subnegotiated
        option: Option<u8>,
        /// Specific reason for the failure
        reason: SubnegotiationErrorKind,
    },

    /// A window dimension does not fit the 16 bit NAWS field.
    InvalidWindowSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Specific kinds of subnegotiation errors with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnegotiationErrorKind {
    /// Insufficient data available to decode the subnegotiation.
    InsufficientData {
        /// Number of bytes required
        required: usize,
        /// Number of bytes available
        available: usize,
    },

    /// Unrecognized sub-command byte.
    InvalidCommand {
        /// The invalid command byte
        command: u8,
    },

    /// A value exceeded the length accepted on the wire.
    ValueTooLong {
        /// Length of the rejected value
        length: usize,
        /// Largest accepted length
        limit: usize,
    },
}

impl std::error::Error for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::IOError { kind, operation } => {
                write!(f, "I/O error during {}: {:?}", operation, kind)
            }
            CodecError::SubnegotiationError { option, reason } => {
                if let Some(opt) = option {
                    write!(f, "Subnegotiation error for option {}: {}", opt, reason)
                } else {
                    write!(f, "Subnegotiation error: {}", reason)
                }
            }
            CodecError::InvalidWindowSize { width, height } => {
                write!(f, "Window size {}x{} outside 0-65535", width, height)
            }
        }
    }
}

impl std::fmt::Display for SubnegotiationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubnegotiationErrorKind::InsufficientData {
                required,
                available,
            } => {
                write!(
                    f,
                    "insufficient data (required: {}, available: {})",
                    required, available
                )
            }
            SubnegotiationErrorKind::InvalidCommand { command } => {
                write!(f, "invalid command: 0x{:02X}", command)
            }
            SubnegotiationErrorKind::ValueTooLong { length, limit } => {
                write!(f, "value of {} bytes exceeds limit of {}", length, limit)
            }
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::SubnegotiationError {
            option: Some(31),
            reason: SubnegotiationErrorKind::InsufficientData {
                required: 4,
                available: 2,
            },
        };
        assert_eq!(
            err.to_string(),
            "Subnegotiation error for option 31: insufficient data (required: 4, available: 2)"
        );
        let err = CodecError::InvalidWindowSize {
            width: 70000,
            height: 24,
        };
        assert_eq!(err.to_string(), "Window size 70000x24 outside 0-65535");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "short write");
        let err = CodecError::from(io);
        assert!(matches!(
            err,
            CodecError::IOError {
                kind: std::io::ErrorKind::WriteZero,
                ..
            }
        ));
    }
}
