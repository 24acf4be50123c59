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

//! The interactive control loop

use crate::mode::{CONSOLE_PROMPT, KeyAction, ModeState};
use crate::{ClientError, CommandShell, Connection, Result, SessionLogger, ShellOutcome};
use otelnet_telnetcodec::TelnetEvent;
use otelnet_telnetcodec::naws::WindowSize;
use otelnet_terminal::{DefaultPlatform, TerminalController, TerminalPlatform};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Keyboard bytes read per loop iteration.
const KEYBOARD_CHUNK: usize = 64;

pub const CLOSED_MESSAGE: &[u8] = b"\r\n[Connection closed by remote host]\r\n";
pub const SIGNAL_MESSAGE: &[u8] = b"\r\n[Exiting due to signal]\r\n";

/// Why [`Session::run`] returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEnd {
    /// The user quit from console mode
    Quit,
    /// An interrupt or terminate signal arrived
    Signal,
    /// The peer closed the connection
    ConnectionClosed,
}

///
/// Couples the local terminal with a connection and shuttles bytes between them.
///
/// Each [`Session::step`] polls, in order, the resize flag, the keyboard and the socket,
/// and never waits on any of them. [`Session::run`] repeats steps with a short pause until
/// the user quits, a signal arrives or the peer goes away.
///
/// The session never restores the terminal itself. Take the parts back with
/// [`Session::into_parts`] and restore before printing anything further.
///
pub struct Session<P: TerminalPlatform = DefaultPlatform> {
    terminal: TerminalController<P>,
    connection: Connection,
    mode: ModeState,
    shell: CommandShell,
    logger: Option<SessionLogger>,
    poll_interval: Duration,
}

impl<P: TerminalPlatform> Session<P> {
    pub fn new(terminal: TerminalController<P>, connection: Connection) -> Session<P> {
        Session {
            terminal,
            connection,
            mode: ModeState::new(),
            shell: CommandShell::new(),
            logger: None,
            poll_interval: Duration::from_millis(10),
        }
    }

    pub fn with_shell(mut self, shell: CommandShell) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_logger(mut self, logger: Option<SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn terminal(&self) -> &TerminalController<P> {
        &self.terminal
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    /// Gives back the terminal and connection.
    pub fn into_parts(self) -> (TerminalController<P>, Connection) {
        (self.terminal, self.connection)
    }

    ///
    /// Runs the loop until the session ends.
    ///
    /// Peer close and signals are normal endings and print their notice to the terminal.
    /// Any other connection failure is returned as an error.
    ///
    pub async fn run(&mut self) -> Result<SessionEnd> {
        loop {
            if self.terminal.should_exit() {
                info!("Exit requested by signal");
                self.show(SIGNAL_MESSAGE);
                return Ok(SessionEnd::Signal);
            }
            match self.step().await {
                Ok(Some(end)) => return Ok(end),
                Ok(None) => {}
                Err(ClientError::ConnectionClosed) => {
                    self.show(CLOSED_MESSAGE);
                    return Ok(SessionEnd::ConnectionClosed);
                }
                Err(error) => return Err(error),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One pass over the resize flag, the keyboard and the socket.
    pub async fn step(&mut self) -> Result<Option<SessionEnd>> {
        if let Some(size) = self.terminal.check_window_size_changed() {
            debug!("Terminal resized to {}", size);
            self.connection
                .update_window_size(WindowSize::new(size.cols, size.rows))
                .await?;
        }

        if let Some(end) = self.poll_keyboard().await? {
            return Ok(Some(end));
        }

        self.poll_socket().await?;
        Ok(None)
    }

    async fn poll_keyboard(&mut self) -> Result<Option<SessionEnd>> {
        let mut keys = [0u8; KEYBOARD_CHUNK];
        let count = match self.terminal.read_input(&mut keys) {
            Ok(count) => count,
            Err(error) => {
                warn!("Keyboard read failed: {}", error);
                return Ok(None);
            }
        };

        let mut outgoing = Vec::new();
        for &key in &keys[..count] {
            let outcome = self
                .mode
                .handle_key(key, self.connection.codec().remote_echo());
            self.show(&outcome.screen);
            match outcome.action {
                KeyAction::None => {}
                KeyAction::Send(byte) => outgoing.push(byte),
                KeyAction::Command(line) => {
                    self.send(&outgoing).await?;
                    outgoing.clear();
                    if self.run_command(&line) == ShellOutcome::Quit {
                        return Ok(Some(self.quit()));
                    }
                }
                KeyAction::Quit => {
                    self.send(&outgoing).await?;
                    return Ok(Some(self.quit()));
                }
            }
        }
        self.send(&outgoing).await?;
        Ok(None)
    }

    async fn poll_socket(&mut self) -> Result<()> {
        let Some(raw) = self.connection.try_read()? else {
            return Ok(());
        };
        if let Some(logger) = self.logger.as_mut() {
            logger.log_received(&raw);
        }
        let payload = self.connection.process_input(&raw).await?;
        self.report_events();
        if self.mode.is_client() && !payload.is_empty() {
            self.show(&payload);
        } else if !payload.is_empty() {
            trace!("Discarding {} bytes received in console mode", payload.len());
        }
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let sent = self.connection.send_data(data).await?;
        if let Some(logger) = self.logger.as_mut() {
            logger.log_sent(&sent);
        }
        Ok(())
    }

    fn run_command(&mut self, line: &str) -> ShellOutcome {
        let stats = self.connection.stats();
        let mut screen = Vec::new();
        let outcome = match self.shell.execute(line, Some(&stats), &mut screen) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Console command '{}' failed: {}", line, error);
                ShellOutcome::Unhandled
            }
        };
        self.show(&screen);
        if outcome != ShellOutcome::Quit && self.mode.is_console() {
            self.show(CONSOLE_PROMPT);
        }
        outcome
    }

    fn quit(&mut self) -> SessionEnd {
        info!("Quit requested from console");
        self.terminal.request_exit();
        SessionEnd::Quit
    }

    fn report_events(&mut self) {
        while let Some(event) = self.connection.codec_mut().poll_event() {
            match event {
                TelnetEvent::OptionStatus(option, side, enabled) => {
                    debug!(
                        "{} {} is now {}",
                        side,
                        option,
                        if enabled { "on" } else { "off" }
                    );
                }
                TelnetEvent::InputModeChanged(mode) => info!("Input mode is now {}", mode),
                TelnetEvent::AreYouThere => debug!("Answered AYT"),
                TelnetEvent::UnhandledSubnegotiation(option) => {
                    trace!("Dropped subnegotiation for {}", option)
                }
            }
        }
    }

    fn show(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        if let Err(error) = self.terminal.write_output(data) {
            warn!("Terminal write failed: {}", error);
        }
    }
}

impl<P: TerminalPlatform> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("terminal", &self.terminal)
            .field("connection", &self.connection)
            .field("mode", &self.mode.mode())
            .finish_non_exhaustive()
    }
}
