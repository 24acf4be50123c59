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

//! Line Mode Options ([RFC1184](https://tools.ietf.org/html/rfc1184))

use crate::consts;
use crate::consts::option::linemode::{
    MODE_ACK, MODE_EDIT, MODE_LIT_ECHO, MODE_SOFT_TAB, MODE_TRAPSIG,
};
use crate::result::{CodecError, CodecResult, SubnegotiationErrorKind};
use bytes::{BufMut, Bytes, BytesMut};

const MODE_MASK: u8 = MODE_EDIT | MODE_TRAPSIG | MODE_ACK | MODE_SOFT_TAB | MODE_LIT_ECHO;

/// Telnet Line Mode Option sub-messages received from the peer
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LineModeOption {
    /// MODE command - set line mode and flags
    Mode {
        /// Mode flags
        mode: LineModeFlags,
    },
    /// FORWARDMASK command, kept as the raw bitmask
    ForwardMask {
        /// Up to 32 bytes, one bit per character code
        mask: Bytes,
    },
    /// SLC (Special Line Character) command
    Slc {
        /// List of special line character definitions
        chars: Vec<SlcTriplet>,
    },
}

impl LineModeOption {
    /// Parse a line mode sub-message, `data` starting at the sub-command byte.
    ///
    /// FORWARDMASK and SLC may be preceded by a DO/DONT/WILL/WONT byte on the wire;
    /// that form is accepted as well.
    pub fn parse(data: &[u8]) -> CodecResult<Self> {
        let Some((&command, body)) = data.split_first() else {
            return Err(insufficient(1, 0));
        };

        match command {
            consts::option::linemode::MODE => match body.first() {
                Some(&mask) => Ok(Self::Mode {
                    mode: LineModeFlags::from_byte(mask),
                }),
                None => Err(insufficient(2, data.len())),
            },
            consts::option::linemode::FORWARDMASK => Ok(Self::ForwardMask {
                mask: Bytes::copy_from_slice(&body[..body.len().min(32)]),
            }),
            consts::option::linemode::SLC => Ok(Self::Slc {
                chars: body
                    .chunks_exact(3)
                    .map(|triplet| SlcTriplet {
                        function: triplet[0],
                        modifiers: triplet[1],
                        value: triplet[2],
                    })
                    .collect(),
            }),
            consts::DO | consts::DONT | consts::WILL | consts::WONT => Self::parse(body),
            command => Err(CodecError::SubnegotiationError {
                option: Some(consts::option::LINEMODE),
                reason: SubnegotiationErrorKind::InvalidCommand { command },
            }),
        }
    }

    /// Serialize this sub-message, without the LINEMODE option code.
    pub fn serialize(&self, buf: &mut impl BufMut) {
        match self {
            Self::Mode { mode } => {
                buf.put_u8(consts::option::linemode::MODE);
                buf.put_u8(mode.to_byte());
            }
            Self::ForwardMask { mask } => {
                buf.put_u8(consts::option::linemode::FORWARDMASK);
                buf.put_slice(mask);
            }
            Self::Slc { chars } => {
                buf.put_u8(consts::option::linemode::SLC);
                for slc in chars {
                    buf.put_u8(slc.function);
                    buf.put_u8(slc.modifiers);
                    buf.put_u8(slc.value);
                }
            }
        }
    }

    /// Subnegotiation payload `LINEMODE <sub-message>`, unescaped.
    pub fn to_subnegotiation(&self) -> Bytes {
        let mut payload = BytesMut::new();
        payload.put_u8(consts::option::LINEMODE);
        self.serialize(&mut payload);
        payload.freeze()
    }
}

impl std::fmt::Display for LineModeOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineModeOption::Mode { mode } => write!(f, "MODE {mode}"),
            LineModeOption::ForwardMask { mask } => write!(f, "FORWARDMASK ({} bytes)", mask.len()),
            LineModeOption::Slc { chars } => write!(f, "SLC ({} triplets)", chars.len()),
        }
    }
}

fn insufficient(required: usize, available: usize) -> CodecError {
    CodecError::SubnegotiationError {
        option: Some(consts::option::LINEMODE),
        reason: SubnegotiationErrorKind::InsufficientData {
            required,
            available,
        },
    }
}

/// Line Mode flags (used with MODE command)
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct LineModeFlags {
    /// Edit mode - client performs line editing
    pub edit: bool,
    /// Trapsig mode - client handles signals locally
    pub trapsig: bool,
    /// ACK mode - acknowledgment of mode changes
    pub ack: bool,
    /// Soft tab mode - client converts tabs to spaces
    pub soft_tab: bool,
    /// Lit echo mode - literal echo of all characters
    pub lit_echo: bool,
    /// Bits with no assigned meaning, carried through unchanged
    pub reserved: u8,
}

impl LineModeFlags {
    /// Create flags from a byte value
    pub fn from_byte(byte: u8) -> Self {
        Self {
            edit: (byte & MODE_EDIT) != 0,
            trapsig: (byte & MODE_TRAPSIG) != 0,
            ack: (byte & MODE_ACK) != 0,
            soft_tab: (byte & MODE_SOFT_TAB) != 0,
            lit_echo: (byte & MODE_LIT_ECHO) != 0,
            reserved: byte & !MODE_MASK,
        }
    }

    /// Convert flags to a byte value
    pub fn to_byte(&self) -> u8 {
        let mut byte = self.reserved & !MODE_MASK;
        if self.edit {
            byte |= MODE_EDIT;
        }
        if self.trapsig {
            byte |= MODE_TRAPSIG;
        }
        if self.ack {
            byte |= MODE_ACK;
        }
        if self.soft_tab {
            byte |= MODE_SOFT_TAB;
        }
        if self.lit_echo {
            byte |= MODE_LIT_ECHO;
        }
        byte
    }
}

impl std::fmt::Display for LineModeFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}", self.to_byte())
    }
}

/// One Special Line Character definition: function, modifier bits, character.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SlcTriplet {
    /// SLC function code
    pub function: u8,
    /// Support level and flush/ack modifier bits
    pub modifiers: u8,
    /// Character value (or 0 if not supported)
    pub value: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_bits_follow_rfc1184() {
        let flags = LineModeFlags::from_byte(0x1F);
        assert!(flags.edit && flags.trapsig && flags.ack && flags.soft_tab && flags.lit_echo);
        let ack_only = LineModeFlags::from_byte(0x04);
        assert!(ack_only.ack);
        assert!(!ack_only.edit);
        assert_eq!(LineModeFlags::from_byte(0x0B).to_byte(), 0x0B);
        assert_eq!(LineModeFlags::from_byte(0xE5).to_byte(), 0xE5);
    }

    #[test]
    fn parse_mode_requires_mask() {
        assert!(LineModeOption::parse(&[1]).is_err());
        assert!(LineModeOption::parse(&[]).is_err());
        assert_eq!(
            LineModeOption::parse(&[1, 0x01]),
            Ok(LineModeOption::Mode {
                mode: LineModeFlags {
                    edit: true,
                    ..LineModeFlags::default()
                }
            })
        );
    }

    #[test]
    fn parse_forwardmask_with_negotiation_prefix() {
        let parsed = LineModeOption::parse(&[253, 2, 0xFF, 0x00]);
        assert_eq!(
            parsed,
            Ok(LineModeOption::ForwardMask {
                mask: Bytes::from_static(&[0xFF, 0x00])
            })
        );
    }

    #[test]
    fn parse_slc_triplets_ignores_trailing_bytes() {
        let parsed = LineModeOption::parse(&[3, 3, 2, 3, 4, 2, 0x0F, 9]);
        assert_eq!(
            parsed,
            Ok(LineModeOption::Slc {
                chars: vec![
                    SlcTriplet {
                        function: 3,
                        modifiers: 2,
                        value: 3
                    },
                    SlcTriplet {
                        function: 4,
                        modifiers: 2,
                        value: 0x0F
                    },
                ]
            })
        );
    }

    #[test]
    fn unknown_sub_command_is_an_error() {
        assert!(matches!(
            LineModeOption::parse(&[9, 0]),
            Err(CodecError::SubnegotiationError {
                reason: SubnegotiationErrorKind::InvalidCommand { command: 9 },
                ..
            })
        ));
    }

    #[test]
    fn mode_reply_payload() {
        let reply = LineModeOption::Mode {
            mode: LineModeFlags::from_byte(0x05),
        }
        .to_subnegotiation();
        assert_eq!(&reply[..], &[34, 1, 0x05]);
    }
}
