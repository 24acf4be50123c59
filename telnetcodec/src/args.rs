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

use crate::TelnetOption;
use crate::args::linemode::LineModeOption;
use crate::consts;
use bytes::Bytes;
use std::fmt::Formatter;

pub mod environ;
pub mod linemode;
pub mod naws;
pub mod tspeed;
pub mod ttype;

///
/// Telnet Subnegotiation Argument received from the peer.
///
/// Built from the unescaped subnegotiation buffer, whose first byte is the option code.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetArgument {
    /// `TTYPE SEND`: the peer wants our next terminal type name.
    TerminalTypeSend,
    /// `TSPEED SEND`: the peer wants our terminal speed.
    TerminalSpeedSend,
    /// `ENVIRON SEND`: the peer wants our environment variables.
    EnvironmentSend,
    /// A LINEMODE sub-message.
    LineMode(LineModeOption),
    /// A subnegotiation the client does not act on, kept verbatim without the option code.
    Unknown(TelnetOption, Bytes),
}

impl TelnetArgument {
    ///
    /// Interprets a completed subnegotiation buffer.
    ///
    /// Never fails: anything that is not a request we answer comes back as
    /// [`TelnetArgument::Unknown`] so the caller can drop it.
    ///
    pub fn parse(buffer: &[u8]) -> Option<TelnetArgument> {
        let (&code, body) = buffer.split_first()?;
        let option = TelnetOption::from_u8(code);
        let argument = match (option, body.first().copied()) {
            (TelnetOption::TTYPE, Some(consts::option::sub::SEND)) => {
                TelnetArgument::TerminalTypeSend
            }
            (TelnetOption::TSPEED, Some(consts::option::sub::SEND)) => {
                TelnetArgument::TerminalSpeedSend
            }
            (TelnetOption::Environment, Some(consts::option::sub::SEND)) => {
                TelnetArgument::EnvironmentSend
            }
            (TelnetOption::Linemode, Some(_)) => match LineModeOption::parse(body) {
                Ok(message) => TelnetArgument::LineMode(message),
                Err(_) => TelnetArgument::Unknown(option, Bytes::copy_from_slice(body)),
            },
            _ => TelnetArgument::Unknown(option, Bytes::copy_from_slice(body)),
        };
        Some(argument)
    }

    /// Returns the `TelnetOption` associated with this argument.
    pub fn option(&self) -> TelnetOption {
        match self {
            TelnetArgument::TerminalTypeSend => TelnetOption::TTYPE,
            TelnetArgument::TerminalSpeedSend => TelnetOption::TSPEED,
            TelnetArgument::EnvironmentSend => TelnetOption::Environment,
            TelnetArgument::LineMode(_) => TelnetOption::Linemode,
            TelnetArgument::Unknown(option, _) => *option,
        }
    }
}

impl std::fmt::Display for TelnetArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetArgument::TerminalTypeSend => write!(f, "TTYPE SEND"),
            TelnetArgument::TerminalSpeedSend => write!(f, "TSPEED SEND"),
            TelnetArgument::EnvironmentSend => write!(f, "ENVIRON SEND"),
            TelnetArgument::LineMode(v) => write!(f, "LINEMODE {v}"),
            TelnetArgument::Unknown(o, v) => write!(f, "{o}-{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::linemode::LineModeFlags;

    #[test]
    fn parse_send_requests() {
        assert_eq!(
            TelnetArgument::parse(&[24, 1]),
            Some(TelnetArgument::TerminalTypeSend)
        );
        assert_eq!(
            TelnetArgument::parse(&[32, 1]),
            Some(TelnetArgument::TerminalSpeedSend)
        );
        assert_eq!(
            TelnetArgument::parse(&[36, 1, 0, b'U']),
            Some(TelnetArgument::EnvironmentSend)
        );
    }

    #[test]
    fn parse_linemode_mode() {
        assert_eq!(
            TelnetArgument::parse(&[34, 1, 0x05]),
            Some(TelnetArgument::LineMode(LineModeOption::Mode {
                mode: LineModeFlags::from_byte(0x05)
            }))
        );
    }

    #[test]
    fn parse_everything_else_as_unknown() {
        assert_eq!(TelnetArgument::parse(&[]), None);
        assert_eq!(
            TelnetArgument::parse(&[24, 0, b'X']),
            Some(TelnetArgument::Unknown(
                TelnetOption::TTYPE,
                Bytes::from_static(&[0, b'X'])
            ))
        );
        let unknown = TelnetArgument::parse(&[99, 7]).expect("non-empty");
        assert_eq!(unknown.option(), TelnetOption::Unknown(99));
        assert_eq!(
            TelnetArgument::parse(&[34, 9]),
            Some(TelnetArgument::Unknown(
                TelnetOption::Linemode,
                Bytes::from_static(&[9])
            ))
        );
    }
}
