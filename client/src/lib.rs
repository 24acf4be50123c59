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

//! # otelnet Client
//!
//! Interactive Telnet client library behind the `otelnet` binary.
//!
//! ## Features
//!
//! - **Option Negotiation** - BINARY, ECHO, SGA, TTYPE, NAWS, TSPEED, ENVIRON and LINEMODE
//! - **Raw Terminal** - Keystrokes go to the peer one at a time, the terminal is always restored
//! - **Console Mode** - Ctrl+] opens a local command line (`help`, `stats`, `ls`, `cd`, `quit`)
//! - **Session Log** - Optional hex dump of all traffic with timestamps
//!
//! ## Quick Start
//!
//! ```no_run
//! use otelnet_client::{ClientConfig, Connection, Session};
//! use otelnet_terminal::TerminalController;
//!
//! # async fn example() -> otelnet_client::Result<()> {
//! let config = ClientConfig::new("localhost", 23);
//! let mut connection = Connection::connect(&config).await?;
//! connection.send_initial_negotiation().await?;
//!
//! let mut terminal = TerminalController::new();
//! terminal.install_signal_handlers()?;
//! terminal.enable_raw_mode();
//!
//! let mut session = Session::new(terminal, connection);
//! let end = session.run().await?;
//!
//! let (mut terminal, connection) = session.into_parts();
//! terminal.disable_raw_mode();
//! println!("{end:?}\n{}", connection.stats());
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending Data
//!
//! ```no_run
//! # use otelnet_client::{Connection, Result};
//! # async fn example(connection: &mut Connection) -> Result<()> {
//! // IAC bytes are doubled on the way out
//! connection.send_data(b"ls -l\r").await?;
//!
//! // Poll for a reply without waiting
//! if let Some(raw) = connection.try_read()? {
//!     let payload = connection.process_input(&raw).await?;
//!     print!("{}", String::from_utf8_lossy(&payload));
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod connection;
mod error;
mod logger;
pub mod mode;
mod session;
mod shell;

pub use config::ClientConfig;
pub use connection::{Connection, ConnectionStats};
pub use error::{ClientError, Result};
pub use logger::{Direction, SessionLogger, hex_dump};
pub use mode::{InteractionMode, KeyAction, KeyOutcome, ModeState};
pub use session::{CLOSED_MESSAGE, SIGNAL_MESSAGE, Session, SessionEnd};
pub use shell::{CommandShell, ShellOutcome, split_command_line};

// Re-export the protocol and terminal types the client API exposes
pub use otelnet_telnetcodec::naws::WindowSize;
pub use otelnet_telnetcodec::{InputMode, TelnetCodec, TelnetConfig, TelnetEvent, TelnetOption};
pub use otelnet_terminal::{TerminalController, TerminalError, TerminalSize};
