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

//! Telnet protocol byte values ([RFC854](https://tools.ietf.org/html/rfc854)).

/// Interpret As Command
pub const IAC: u8 = 255;
/// Refuse or demand the peer stop performing an option
pub const DONT: u8 = 254;
/// Request or confirm the peer performs an option
pub const DO: u8 = 253;
/// Refuse or stop performing an option locally
pub const WONT: u8 = 252;
/// Offer or confirm performing an option locally
pub const WILL: u8 = 251;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Go Ahead
pub const GA: u8 = 249;
/// Erase Line
pub const EL: u8 = 248;
/// Erase Character
pub const EC: u8 = 247;
/// Are You There
pub const AYT: u8 = 246;
/// Abort Output
pub const AO: u8 = 245;
/// Interrupt Process
pub const IP: u8 = 244;
/// Break
pub const BRK: u8 = 243;
/// Data Mark
pub const DM: u8 = 242;
/// No Operation
pub const NOP: u8 = 241;
/// Subnegotiation End
pub const SE: u8 = 240;
/// End of Record
pub const EOR: u8 = 239;

/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';
/// Null
pub const NUL: u8 = 0;

/// Telnet option codes recognized by the client.
pub mod option {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    pub const BINARY: u8 = 0;
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TTYPE: u8 = 24;
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    pub const NAWS: u8 = 31;
    /// Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    pub const TSPEED: u8 = 32;
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    pub const LINEMODE: u8 = 34;
    /// Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    pub const ENVIRON: u8 = 36;

    /// Sub-commands shared by TTYPE, TSPEED and ENVIRON.
    pub mod sub {
        /// Value follows
        pub const IS: u8 = 0;
        /// Request the value
        pub const SEND: u8 = 1;
    }

    /// ENVIRON tags ([RFC1572](https://tools.ietf.org/html/rfc1572))
    pub mod environ {
        /// Variable name follows
        pub const VAR: u8 = 0;
        /// Variable value follows
        pub const VALUE: u8 = 1;
        /// Escape the next byte
        pub const ESC: u8 = 2;
        /// User defined variable name follows
        pub const USERVAR: u8 = 3;
    }

    /// LINEMODE sub-commands and mode bits ([RFC1184](https://tools.ietf.org/html/rfc1184))
    pub mod linemode {
        /// MODE sub-command
        pub const MODE: u8 = 1;
        /// FORWARDMASK sub-command
        pub const FORWARDMASK: u8 = 2;
        /// SLC sub-command
        pub const SLC: u8 = 3;

        /// Client performs local line editing
        pub const MODE_EDIT: u8 = 0x01;
        /// Client traps interrupt signals locally
        pub const MODE_TRAPSIG: u8 = 0x02;
        /// Acknowledgement of a mode change
        pub const MODE_ACK: u8 = 0x04;
        /// Expand tabs to spaces
        pub const MODE_SOFT_TAB: u8 = 0x08;
        /// Echo non-printable characters literally
        pub const MODE_LIT_ECHO: u8 = 0x10;
    }
}
