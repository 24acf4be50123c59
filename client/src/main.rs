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

//! `otelnet` - interactive Telnet client
//!
//! ## Usage
//!
//! ```bash
//! otelnet [--log FILE] <host> <port>
//! ```
//!
//! Set `RUST_LOG` (for example `RUST_LOG=otelnet_telnetcodec=debug`) to see protocol
//! tracing on standard error.

use clap::{ArgAction, Parser};
use otelnet_client::{ClientConfig, Connection, Session, SessionLogger};
use otelnet_terminal::TerminalController;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Interactive Telnet client with a local command console
#[derive(Debug, Parser)]
#[command(name = "otelnet", version, disable_version_flag = true)]
struct Args {
    /// Server hostname or IP address
    host: String,

    /// Server port
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Append a hex dump of all traffic to FILE
    #[arg(short = 'l', long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

/// Writes `\n` as `\r\n`. Raw mode turns off output processing, so a bare line feed
/// on the tty would not return the cursor.
struct TerminalLines<W>(W);

impl<W: Write> Write for TerminalLines<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        for (index, line) in buf.split(|byte| *byte == b'\n').enumerate() {
            if index > 0 {
                self.0.write_all(b"\r\n")?;
            }
            self.0.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

fn diagnostics_writer() -> BoxMakeWriter {
    if std::io::stderr().is_terminal() {
        BoxMakeWriter::new(|| TerminalLines(std::io::stderr()))
    } else {
        BoxMakeWriter::new(std::io::stderr)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(diagnostics_writer())
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run(args))
}

async fn run(args: Args) -> ExitCode {
    let mut terminal = TerminalController::new();
    let size = terminal.window_size();

    let mut config =
        ClientConfig::new(args.host, args.port).with_window_size(size.cols, size.rows);
    if let Some(path) = args.log {
        config = config.with_log_file(path);
    }

    println!("otelnet {}", env!("CARGO_PKG_VERSION"));
    println!("Connecting to {}...", config.address());

    let mut connection = match Connection::connect(&config).await {
        Ok(connection) => connection,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(error) = connection.send_initial_negotiation().await {
        eprintln!("Error: {error}");
        return ExitCode::FAILURE;
    }

    println!("Connected to {}", connection.peer_addr());
    println!("Press Ctrl+] for console mode");
    println!("Press Ctrl+C to disconnect");
    println!();

    let logger = config
        .log_file
        .as_ref()
        .and_then(|path| match SessionLogger::open(path) {
            Ok(logger) => Some(logger),
            Err(error) => {
                warn!("Session log {} unavailable: {}", path.display(), error);
                None
            }
        });

    if let Err(error) = terminal.install_signal_handlers() {
        warn!("Signal handlers unavailable: {}", error);
    }
    if !terminal.enable_raw_mode() {
        warn!("Continuing without raw mode");
    }

    let mut session = Session::new(terminal, connection)
        .with_logger(logger)
        .with_poll_interval(config.poll_interval);
    let outcome = session.run().await;

    let (mut terminal, mut connection) = session.into_parts();
    terminal.disable_raw_mode();
    if let Err(error) = connection.shutdown().await {
        warn!("Shutdown failed: {}", error);
    }

    let status = match outcome {
        Ok(end) => {
            debug!("Session ended: {:?}", end);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    };
    println!("\n{}", connection.stats());
    status
}
