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

//! # OTelnet Telnet Protocol Engine
//!
//! This crate is the protocol core of the `otelnet` client: a byte-stream transformer that
//! sits between a TCP socket and the user's terminal. It performs no I/O of its own.
//!
//! ## Overview
//!
//! The Telnet protocol (RFC 854) interleaves application data with commands introduced by
//! the IAC byte (0xFF). This crate handles:
//!
//! - **Input decoding**: strips commands and subnegotiations from the wire and returns the
//!   application payload, including NVT carriage return handling (`CR NUL`, `CR LF`)
//! - **Option negotiation**: answers DO, DONT, WILL and WONT so that every state change is
//!   acknowledged exactly once and repeated requests never start a negotiation loop
//! - **Subnegotiation**: answers TERMINAL-TYPE, TERMINAL-SPEED, ENVIRON and LINEMODE
//!   requests and reports window size through NAWS
//! - **Output escaping**: doubles IAC in outgoing data
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! The state machine. Feed it socket bytes with [`TelnetCodec::process_input`]; drain the
//! replies it queued with [`TelnetCodec::take_output`] and the option changes it observed
//! with [`TelnetCodec::poll_event`]. It also implements the `tokio_util::codec` traits.
//!
//! ### [`OptionTable`]
//!
//! Four 256-entry boolean tables (local/remote enabled, local/remote supported). The
//! accept policy and side effect of each option come from a single lookup table, see
//! [`OptionPolicy`].
//!
//! ### [`TelnetFrame`]
//!
//! Outbound commands with their wire encoding.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use otelnet_telnetcodec::{TelnetCodec, TelnetEvent};
//!
//! let mut codec = TelnetCodec::new();
//! codec.initial_negotiation();
//! let offers = codec.take_output(); // write to the socket
//!
//! let payload = codec.process_input(b"\xFF\xFB\x01\xFF\xFB\x03Welcome\r\n");
//! assert_eq!(&payload[..], b"Welcome\r\n");
//! while let Some(event) = codec.poll_event() {
//!     if let TelnetEvent::InputModeChanged(mode) = event {
//!         println!("input is now {mode} at a time");
//!     }
//! }
//! let replies = codec.take_output(); // DO ECHO, DO SGA
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 856: Telnet Binary Transmission
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1079: Telnet Terminal Speed Option
//! - RFC 1091: Telnet Terminal-Type Option
//! - RFC 1184: Telnet Linemode Option
//! - RFC 1572: Telnet Environment Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
mod codec;
pub mod consts;
mod config;
mod event;
mod frame;
mod options;
mod result;

pub use self::args::{TelnetArgument, environ, linemode, naws, tspeed, ttype};
pub use self::codec::{AYT_REPLY, MAX_SUBNEGOTIATION_LEN, TelnetCodec};
pub use self::config::TelnetConfig;
pub use self::event::{InputMode, TelnetEvent};
pub use self::frame::TelnetFrame;
pub use self::options::{
    Negotiated, OptionEffect, OptionPolicy, OptionTable, TelnetOption, TelnetSide,
};
pub use self::result::{CodecError, CodecResult, SubnegotiationErrorKind};
