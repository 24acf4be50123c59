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

//! Keystroke routing between the remote session and the local console

use tracing::debug;

/// Ctrl+], switches from client to console mode.
pub const CONSOLE_TRIGGER: u8 = 0x1D;

/// Ctrl+D, leaves the program from console mode.
pub const QUIT_KEY: u8 = 0x04;

/// Longest console line accepted; further input is dropped.
pub const CONSOLE_LINE_LIMIT: usize = 1023;

pub const CONSOLE_PROMPT: &[u8] = b"otelnet> ";
pub const CONSOLE_BANNER: &[u8] =
    b"\r\n[Console Mode - Enter empty line to return, 'quit' to exit]\r\n";
pub const CLIENT_BANNER: &[u8] = b"\r\n[Back to client mode]\r\n";
pub const QUIT_MESSAGE: &[u8] = b"\r\n[Ctrl+D detected, exiting...]\r\n";

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;
const ERASE: &[u8] = b"\x08 \x08";

/// Where keystrokes go.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InteractionMode {
    /// Keystrokes are sent to the remote host
    #[default]
    Client,
    /// Keystrokes edit a local command line
    Console,
}

/// What the coordinator does after a keystroke, beyond writing the echo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyAction {
    None,
    /// Forward the byte to the peer
    Send(u8),
    /// Run a trimmed, non-empty console command line
    Command(String),
    /// Leave the program
    Quit,
}

/// Screen output and follow-up action for one keystroke.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyOutcome {
    pub screen: Vec<u8>,
    pub action: KeyAction,
}

impl KeyOutcome {
    fn new(screen: impl Into<Vec<u8>>, action: KeyAction) -> KeyOutcome {
        KeyOutcome {
            screen: screen.into(),
            action,
        }
    }
}

///
/// The interaction mode plus the console line being edited.
///
/// Starts in [`InteractionMode::Client`]. The trigger byte enters console mode, an empty
/// console line returns to client mode. The state is pure: it never touches the terminal
/// or the socket, it only says what should be shown and done.
///
#[derive(Debug, Default)]
pub struct ModeState {
    mode: InteractionMode,
    line: Vec<u8>,
    after_cr: bool,
}

impl ModeState {
    pub fn new() -> ModeState {
        ModeState::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_client(&self) -> bool {
        self.mode == InteractionMode::Client
    }

    pub fn is_console(&self) -> bool {
        self.mode == InteractionMode::Console
    }

    /// The console line typed so far.
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Switches to console mode, returning the banner and prompt to show.
    pub fn enter_console(&mut self) -> Vec<u8> {
        if self.is_console() {
            return Vec::new();
        }
        debug!("Entering console mode");
        self.mode = InteractionMode::Console;
        self.line.clear();
        self.after_cr = false;
        [CONSOLE_BANNER, CONSOLE_PROMPT].concat()
    }

    /// Switches to client mode, returning the notice to show.
    pub fn leave_console(&mut self) -> Vec<u8> {
        if self.is_client() {
            return Vec::new();
        }
        debug!("Returning to client mode");
        self.mode = InteractionMode::Client;
        self.line.clear();
        CLIENT_BANNER.to_vec()
    }

    /// Routes one keystroke. `remote_echo` tells whether the peer echoes client input.
    pub fn handle_key(&mut self, byte: u8, remote_echo: bool) -> KeyOutcome {
        match self.mode {
            InteractionMode::Client => self.client_key(byte, remote_echo),
            InteractionMode::Console => self.console_key(byte),
        }
    }

    fn client_key(&mut self, byte: u8, remote_echo: bool) -> KeyOutcome {
        if byte == CONSOLE_TRIGGER {
            return KeyOutcome::new(self.enter_console(), KeyAction::None);
        }
        let echo = if remote_echo {
            Vec::new()
        } else {
            local_echo(byte)
        };
        KeyOutcome::new(echo, KeyAction::Send(byte))
    }

    fn console_key(&mut self, byte: u8) -> KeyOutcome {
        let after_cr = std::mem::replace(&mut self.after_cr, byte == b'\r');
        match byte {
            // A terminal sending CR LF for Enter submits one line, not two.
            b'\n' if after_cr => KeyOutcome::new(Vec::new(), KeyAction::None),
            b'\r' | b'\n' => {
                let line = std::mem::take(&mut self.line);
                let command = String::from_utf8_lossy(&line).trim().to_string();
                if command.is_empty() {
                    let mut screen = b"\r\n".to_vec();
                    screen.extend(self.leave_console());
                    KeyOutcome::new(screen, KeyAction::None)
                } else {
                    KeyOutcome::new(b"\r\n".to_vec(), KeyAction::Command(command))
                }
            }
            BACKSPACE | DELETE => match self.line.pop() {
                Some(_) => KeyOutcome::new(ERASE, KeyAction::None),
                None => KeyOutcome::new(Vec::new(), KeyAction::None),
            },
            QUIT_KEY => KeyOutcome::new(QUIT_MESSAGE, KeyAction::Quit),
            0x20..=0x7E if self.line.len() < CONSOLE_LINE_LIMIT => {
                self.line.push(byte);
                KeyOutcome::new(vec![byte], KeyAction::None)
            }
            _ => KeyOutcome::new(Vec::new(), KeyAction::None),
        }
    }
}

/// Local rendering of a byte sent while the peer does not echo.
fn local_echo(byte: u8) -> Vec<u8> {
    match byte {
        b'\r' => b"\r\n".to_vec(),
        BACKSPACE | DELETE => ERASE.to_vec(),
        0x00..=0x1F => Vec::new(),
        _ => vec![byte],
    }
}
