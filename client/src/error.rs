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

//! Client error types

use otelnet_telnetcodec::CodecError;
use otelnet_terminal::TerminalError;
use std::io;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// Connection attempt did not finish in time
    #[error("Connection to {address} timed out")]
    ConnectionTimeout {
        /// `host:port` that was dialed
        address: String,
    },

    /// Connection refused
    #[error("Connection refused")]
    ConnectionRefused,

    /// Connection closed by the peer
    #[error("Connection closed by remote host")]
    ConnectionClosed,

    /// No connection has been established
    #[error("Not connected")]
    NotConnected,

    /// Local terminal failure
    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    /// Telnet argument encoding failure
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ClientError {
    /// True for failures that end the connection.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionRefused
                | Self::ConnectionClosed
                | Self::NotConnected
        )
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Self::ConnectionClosed,
            _ => Self::Io(error),
        }
    }
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified() {
        let refused: ClientError = io::Error::from(io::ErrorKind::ConnectionRefused).into();
        assert!(matches!(refused, ClientError::ConnectionRefused));
        let reset: ClientError = io::Error::from(io::ErrorKind::ConnectionReset).into();
        assert!(matches!(reset, ClientError::ConnectionClosed));
        let other: ClientError = io::Error::other("disk").into();
        assert!(matches!(other, ClientError::Io(_)));
    }

    #[test]
    fn connection_errors() {
        assert!(ClientError::ConnectionClosed.is_connection_error());
        assert!(
            ClientError::ConnectionTimeout {
                address: "h:23".to_string()
            }
            .is_connection_error()
        );
        assert!(!ClientError::Terminal(TerminalError::Unsupported).is_connection_error());
    }

    #[test]
    fn display() {
        let error = ClientError::ConnectionTimeout {
            address: "example.org:23".to_string(),
        };
        assert_eq!(error.to_string(), "Connection to example.org:23 timed out");
        assert_eq!(
            ClientError::ConnectionClosed.to_string(),
            "Connection closed by remote host"
        );
    }
}
