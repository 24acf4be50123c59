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

use crate::{TelnetFrame, consts};
use std::fmt::Formatter;
use tracing::{debug, trace};

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// understood by the client. Everything else is carried as [`TelnetOption::Unknown`].
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TTYPE,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    NAWS,
    /// [`consts::option::TSPEED`] Terminal Speed [RFC1079](http://www.iana.org/go/rfc1079)
    TSPEED,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode,
    /// [`consts::option::ENVIRON`] Environment Option [RFC1572](http://www.iana.org/go/rfc1572)
    Environment,
    /// Any option code the client does not recognize
    Unknown(u8),
}

impl TelnetOption {
    /// Option code as sent on the wire.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::TTYPE => consts::option::TTYPE,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::TSPEED => consts::option::TSPEED,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::Environment => consts::option::ENVIRON,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Maps a wire option code to a `TelnetOption`.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::TTYPE => TelnetOption::TTYPE,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::TSPEED => TelnetOption::TSPEED,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::ENVIRON => TelnetOption::Environment,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// Side effect attached to this option once it changes state.
    pub fn effect(&self) -> OptionEffect {
        OPTION_POLICIES[self.to_u8() as usize].effect
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::TransmitBinary => write!(f, "BINARY"),
            TelnetOption::Echo => write!(f, "ECHO"),
            TelnetOption::SuppressGoAhead => write!(f, "SGA"),
            TelnetOption::TTYPE => write!(f, "TTYPE"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::TSPEED => write!(f, "TSPEED"),
            TelnetOption::Linemode => write!(f, "LINEMODE"),
            TelnetOption::Environment => write!(f, "ENVIRON"),
            TelnetOption::Unknown(byte) => write!(f, "UNKNOWN({byte})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Which end of the connection performs an option.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetSide {
    /// We perform the option (peer sent DO/DONT)
    Local,
    /// The peer performs the option (peer sent WILL/WONT)
    Remote,
}

impl std::fmt::Display for TelnetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetSide::Local => write!(f, "Local"),
            TelnetSide::Remote => write!(f, "Remote"),
        }
    }
}

/// What the protocol engine does when an option changes state, beyond recording it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OptionEffect {
    /// Only the enabled flag changes
    #[default]
    None,
    /// Remote BINARY switches off CR/NUL translation on input
    BinaryTransmission,
    /// Remote ECHO moves echo duties to the peer
    RemoteEcho,
    /// Remote SGA participates in input mode selection
    SuppressGoAhead,
    /// Local NAWS sends the current window size immediately
    WindowSizeReport,
    /// Local LINEMODE hands line editing control to the peer
    LineMode,
}

/// Accept policy and side effect for a single option code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OptionPolicy {
    /// Accept DO for this option
    pub local: bool,
    /// Accept WILL for this option
    pub remote: bool,
    /// Applied when the option changes state
    pub effect: OptionEffect,
}

impl OptionPolicy {
    const REFUSE: OptionPolicy = OptionPolicy {
        local: false,
        remote: false,
        effect: OptionEffect::None,
    };

    const fn new(local: bool, remote: bool, effect: OptionEffect) -> OptionPolicy {
        OptionPolicy {
            local,
            remote,
            effect,
        }
    }
}

/// Default negotiation policy, indexed by option code.
static OPTION_POLICIES: [OptionPolicy; 256] = build_policies();

const fn build_policies() -> [OptionPolicy; 256] {
    let mut table = [OptionPolicy::REFUSE; 256];
    table[consts::option::BINARY as usize] =
        OptionPolicy::new(true, true, OptionEffect::BinaryTransmission);
    table[consts::option::ECHO as usize] = OptionPolicy::new(false, true, OptionEffect::RemoteEcho);
    table[consts::option::SGA as usize] =
        OptionPolicy::new(true, true, OptionEffect::SuppressGoAhead);
    table[consts::option::TTYPE as usize] = OptionPolicy::new(true, false, OptionEffect::None);
    table[consts::option::NAWS as usize] =
        OptionPolicy::new(true, false, OptionEffect::WindowSizeReport);
    table[consts::option::TSPEED as usize] = OptionPolicy::new(true, false, OptionEffect::None);
    table[consts::option::LINEMODE as usize] =
        OptionPolicy::new(true, false, OptionEffect::LineMode);
    table[consts::option::ENVIRON as usize] = OptionPolicy::new(true, false, OptionEffect::None);
    table
}

/// Result of feeding one peer negotiation message into the [`OptionTable`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Negotiated {
    /// Frame to send back to the peer, if any
    pub reply: Option<TelnetFrame>,
    /// New enabled state, present only when the recorded state actually changed
    pub changed: Option<(TelnetSide, bool)>,
}

///
/// Per-option negotiation state for both ends of the connection.
///
/// Enabled flags only ever move in response to a peer message, and a message that would
/// leave a flag where it already is produces no acknowledgement. Requests for unsupported
/// options are refused on every receipt without touching the table.
///
#[derive(Clone)]
pub struct OptionTable {
    local_enabled: [bool; 256],
    remote_enabled: [bool; 256],
    local_supported: [bool; 256],
    remote_supported: [bool; 256],
}

impl OptionTable {
    /// Table with nothing supported and nothing enabled.
    pub fn empty() -> OptionTable {
        OptionTable {
            local_enabled: [false; 256],
            remote_enabled: [false; 256],
            local_supported: [false; 256],
            remote_supported: [false; 256],
        }
    }

    /// Checks if we will perform the given option when asked
    pub fn is_supported_local(&self, option: TelnetOption) -> bool {
        self.local_supported[option.to_u8() as usize]
    }

    /// Checks if we let the peer perform the given option
    pub fn is_supported_remote(&self, option: TelnetOption) -> bool {
        self.remote_supported[option.to_u8() as usize]
    }

    /// Overrides the local accept policy for an option.
    pub fn set_supported_local(&mut self, option: TelnetOption, supported: bool) {
        self.local_supported[option.to_u8() as usize] = supported;
    }

    /// Overrides the remote accept policy for an option.
    pub fn set_supported_remote(&mut self, option: TelnetOption, supported: bool) {
        self.remote_supported[option.to_u8() as usize] = supported;
    }

    /// Whether we currently perform the option.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.local_enabled[option.to_u8() as usize]
    }

    /// Whether the peer currently performs the option.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.remote_enabled[option.to_u8() as usize]
    }

    ///
    /// Applies a negotiation frame received from the peer.
    ///
    /// | Received | Supported, disabled | Supported, enabled | Enabled (any) | Unsupported |
    /// |----------|---------------------|--------------------|---------------|-------------|
    /// | WILL     | enable, send DO     | nothing            |               | send DONT   |
    /// | DO       | enable, send WILL   | nothing            |               | send WONT   |
    /// | WONT     |                     |                    | disable, DONT | nothing     |
    /// | DONT     |                     |                    | disable, WONT | nothing     |
    ///
    /// Non-negotiation frames are ignored.
    ///
    pub fn handle_received(&mut self, frame: &TelnetFrame) -> Negotiated {
        match *frame {
            TelnetFrame::Will(option) => {
                let index = option.to_u8() as usize;
                if !self.remote_supported[index] {
                    debug!("Refusing WILL {option}");
                    return Negotiated {
                        reply: Some(TelnetFrame::Dont(option)),
                        changed: None,
                    };
                }
                if self.remote_enabled[index] {
                    trace!("WILL {option} already in effect");
                    return Negotiated::default();
                }
                self.remote_enabled[index] = true;
                Negotiated {
                    reply: Some(TelnetFrame::Do(option)),
                    changed: Some((TelnetSide::Remote, true)),
                }
            }
            TelnetFrame::Wont(option) => {
                let index = option.to_u8() as usize;
                if !self.remote_enabled[index] {
                    trace!("WONT {option} already in effect");
                    return Negotiated::default();
                }
                self.remote_enabled[index] = false;
                Negotiated {
                    reply: Some(TelnetFrame::Dont(option)),
                    changed: Some((TelnetSide::Remote, false)),
                }
            }
            TelnetFrame::Do(option) => {
                let index = option.to_u8() as usize;
                if !self.local_supported[index] {
                    debug!("Refusing DO {option}");
                    return Negotiated {
                        reply: Some(TelnetFrame::Wont(option)),
                        changed: None,
                    };
                }
                if self.local_enabled[index] {
                    trace!("DO {option} already in effect");
                    return Negotiated::default();
                }
                self.local_enabled[index] = true;
                Negotiated {
                    reply: Some(TelnetFrame::Will(option)),
                    changed: Some((TelnetSide::Local, true)),
                }
            }
            TelnetFrame::Dont(option) => {
                let index = option.to_u8() as usize;
                if !self.local_enabled[index] {
                    trace!("DONT {option} already in effect");
                    return Negotiated::default();
                }
                self.local_enabled[index] = false;
                Negotiated {
                    reply: Some(TelnetFrame::Wont(option)),
                    changed: Some((TelnetSide::Local, false)),
                }
            }
            _ => Negotiated::default(),
        }
    }
}

impl Default for OptionTable {
    /// Supported flags seeded from the built-in option policy, nothing enabled.
    fn default() -> Self {
        let mut table = OptionTable::empty();
        for (code, policy) in OPTION_POLICIES.iter().enumerate() {
            table.local_supported[code] = policy.local;
            table.remote_supported[code] = policy.remote;
        }
        table
    }
}

impl std::fmt::Debug for OptionTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let local: Vec<TelnetOption> = (0..=255u8)
            .filter(|code| self.local_enabled[*code as usize])
            .map(TelnetOption::from_u8)
            .collect();
        let remote: Vec<TelnetOption> = (0..=255u8)
            .filter(|code| self.remote_enabled[*code as usize])
            .map(TelnetOption::from_u8)
            .collect();
        f.debug_struct("OptionTable")
            .field("local_enabled", &local)
            .field("remote_enabled", &remote)
            .finish()
    }
}
