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

use thiserror::Error;

/// Result type for the terminal
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Failures while controlling the local terminal
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Standard input is not attached to a terminal
    #[error("standard input is not a terminal")]
    NotATerminal,

    /// The current terminal attributes could not be read
    #[error("failed to read terminal attributes: {0}")]
    ReadAttributes(#[source] std::io::Error),

    /// New terminal attributes could not be applied
    #[error("failed to apply terminal attributes: {0}")]
    ApplyAttributes(#[source] std::io::Error),

    /// A signal observer could not be registered
    #[error("failed to install {signal} handler: {source}")]
    SignalRegistration {
        /// Signal name, e.g. `SIGWINCH`
        signal: &'static str,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Terminal control is not available on this platform
    #[error("terminal control is not supported on this platform")]
    Unsupported,

    /// Other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(unix)]
impl From<nix::Error> for TerminalError {
    fn from(errno: nix::Error) -> Self {
        TerminalError::Io(std::io::Error::from(errno))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let terminal_error: TerminalError = io_error.into();

        match terminal_error {
            TerminalError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_terminal_error_from_errno() {
        let terminal_error: TerminalError = nix::Error::ENOTTY.into();
        match terminal_error {
            TerminalError::Io(e) => assert_eq!(e.raw_os_error(), Some(libc::ENOTTY)),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_terminal_error_display() {
        let error = TerminalError::SignalRegistration {
            signal: "SIGWINCH",
            source: std::io::Error::other("denied"),
        };
        assert_eq!(error.to_string(), "failed to install SIGWINCH handler: denied");
        assert_eq!(
            TerminalError::NotATerminal.to_string(),
            "standard input is not a terminal"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let error = TerminalError::ApplyAttributes(std::io::Error::other("busy"));
        assert!(error.source().is_some());
        assert!(TerminalError::Unsupported.source().is_none());
    }
}
