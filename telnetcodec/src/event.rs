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

use super::TelnetOption;
use crate::options::TelnetSide;

///
/// `TelnetEvent` records something the peer changed while input was being processed.
/// The codec queues events instead of calling out; the owner drains them with
/// [`TelnetCodec::poll_event`](crate::TelnetCodec::poll_event) after each batch of input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Indicate a completed Negotiation
    /// Parameters: (option, side, enabled)
    /// - option: The telnet option that was negotiated
    /// - side: Whether this is Local or Remote
    /// - enabled: true if option is now enabled, false if disabled
    OptionStatus(TelnetOption, TelnetSide, bool),
    /// The derived input mode changed
    InputModeChanged(InputMode),
    /// The peer asked whether we are alive; a reply has already been queued
    AreYouThere,
    /// A subnegotiation for an option we do not handle was dropped
    UnhandledSubnegotiation(TelnetOption),
}

/// How keyboard input is edited, derived from the negotiated options.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum InputMode {
    /// Input is edited locally and sent a line at a time
    #[default]
    Line,
    /// Every keystroke goes straight to the peer, which echoes and edits
    Character,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Line => write!(f, "line"),
            InputMode::Character => write!(f, "character"),
        }
    }
}
