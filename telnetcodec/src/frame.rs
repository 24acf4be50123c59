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

use crate::{TelnetOption, consts};
use bytes::{BufMut, Bytes};

///
/// Outbound Telnet frame. Each variant has a single wire encoding produced by the
/// [`Encoder`](tokio_util::codec::Encoder) implementation on [`TelnetCodec`](crate::TelnetCodec).
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetFrame {
    /// Application data. Literal IAC bytes are doubled on encode.
    Data(Bytes),
    /// Two byte command such as `IAC NOP` or `IAC AYT`
    Command(u8),
    /// `IAC DO <option>`
    Do(TelnetOption),
    /// `IAC DONT <option>`
    Dont(TelnetOption),
    /// `IAC WILL <option>`
    Will(TelnetOption),
    /// `IAC WONT <option>`
    Wont(TelnetOption),
    /// `IAC SB <payload> IAC SE` where the payload starts with the option code.
    /// Literal IAC bytes in the payload are doubled on encode.
    Subnegotiate(Bytes),
}

impl TelnetFrame {
    /// Option a negotiation frame refers to.
    pub fn option(&self) -> Option<TelnetOption> {
        match self {
            TelnetFrame::Do(option)
            | TelnetFrame::Dont(option)
            | TelnetFrame::Will(option)
            | TelnetFrame::Wont(option) => Some(*option),
            TelnetFrame::Subnegotiate(payload) => {
                payload.first().map(|code| TelnetOption::from_u8(*code))
            }
            TelnetFrame::Data(_) | TelnetFrame::Command(_) => None,
        }
    }

    /// Upper bound on the encoded size, used to reserve buffer space.
    pub fn encoded_len_hint(&self) -> usize {
        match self {
            TelnetFrame::Data(data) => data.len() * 2,
            TelnetFrame::Command(_) => 2,
            TelnetFrame::Do(_)
            | TelnetFrame::Dont(_)
            | TelnetFrame::Will(_)
            | TelnetFrame::Wont(_) => 3,
            TelnetFrame::Subnegotiate(payload) => payload.len() * 2 + 4,
        }
    }

    /// Writes the wire form of this frame into `dst`.
    pub fn write_to<B: BufMut>(&self, dst: &mut B) {
        match self {
            TelnetFrame::Data(data) => put_escaped(dst, data),
            TelnetFrame::Command(command) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(*command);
            }
            TelnetFrame::Do(option) => put_negotiation(dst, consts::DO, *option),
            TelnetFrame::Dont(option) => put_negotiation(dst, consts::DONT, *option),
            TelnetFrame::Will(option) => put_negotiation(dst, consts::WILL, *option),
            TelnetFrame::Wont(option) => put_negotiation(dst, consts::WONT, *option),
            TelnetFrame::Subnegotiate(payload) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                put_escaped(dst, payload);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
    }
}

impl std::fmt::Display for TelnetFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetFrame::Data(data) => write!(f, "Data({} bytes)", data.len()),
            TelnetFrame::Command(command) => write!(f, "IAC {command}"),
            TelnetFrame::Do(option) => write!(f, "DO {option}"),
            TelnetFrame::Dont(option) => write!(f, "DONT {option}"),
            TelnetFrame::Will(option) => write!(f, "WILL {option}"),
            TelnetFrame::Wont(option) => write!(f, "WONT {option}"),
            TelnetFrame::Subnegotiate(payload) => match payload.first() {
                Some(code) => write!(
                    f,
                    "SB {} ({} bytes)",
                    TelnetOption::from_u8(*code),
                    payload.len()
                ),
                None => write!(f, "SB (empty)"),
            },
        }
    }
}

fn put_negotiation<B: BufMut>(dst: &mut B, command: u8, option: TelnetOption) {
    dst.put_u8(consts::IAC);
    dst.put_u8(command);
    dst.put_u8(option.to_u8());
}

/// Copies `data` into `dst`, doubling every IAC.
pub(crate) fn put_escaped<B: BufMut>(dst: &mut B, data: &[u8]) {
    let mut rest = data;
    while let Some(position) = rest.iter().position(|byte| *byte == consts::IAC) {
        dst.put_slice(&rest[..=position]);
        dst.put_u8(consts::IAC);
        rest = &rest[position + 1..];
    }
    dst.put_slice(rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn encode(frame: TelnetFrame) -> Vec<u8> {
        let mut buffer = BytesMut::new();
        frame.write_to(&mut buffer);
        buffer.to_vec()
    }

    #[test]
    fn negotiation_frames_are_three_bytes() {
        assert_eq!(encode(TelnetFrame::Will(TelnetOption::NAWS)), vec![255, 251, 31]);
        assert_eq!(encode(TelnetFrame::Dont(TelnetOption::Unknown(99))), vec![255, 254, 99]);
    }

    #[test]
    fn data_doubles_iac() {
        assert_eq!(
            encode(TelnetFrame::Data(Bytes::from_static(&[1, 255, 2, 255]))),
            vec![1, 255, 255, 2, 255, 255]
        );
    }

    #[test]
    fn subnegotiation_is_framed_and_escaped() {
        assert_eq!(
            encode(TelnetFrame::Subnegotiate(Bytes::from_static(&[31, 0, 255, 0, 24]))),
            vec![255, 250, 31, 0, 255, 255, 0, 24, 255, 240]
        );
    }

    #[test]
    fn display_names_option() {
        assert_eq!(TelnetFrame::Do(TelnetOption::Echo).to_string(), "DO ECHO");
        assert_eq!(
            TelnetFrame::Subnegotiate(Bytes::from_static(&[24, 0])).to_string(),
            "SB TTYPE (2 bytes)"
        );
    }
}
