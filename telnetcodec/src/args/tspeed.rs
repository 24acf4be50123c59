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

//! Terminal Speed ([RFC1079](https://tools.ietf.org/html/rfc1079))

use crate::consts;
use bytes::{BufMut, Bytes, BytesMut};

/// Transmit and receive line speed, reported as `"<transmit>,<receive>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalSpeed {
    /// Transmit speed in bits per second
    pub transmit: u32,
    /// Receive speed in bits per second
    pub receive: u32,
}

impl TerminalSpeed {
    /// Creates a speed pair.
    pub fn new(transmit: u32, receive: u32) -> Self {
        TerminalSpeed { transmit, receive }
    }

    /// Subnegotiation payload `TSPEED IS <transmit>,<receive>`, unescaped.
    pub fn is_reply(&self) -> Bytes {
        let text = self.to_string();
        let mut payload = BytesMut::with_capacity(2 + text.len());
        payload.put_u8(consts::option::TSPEED);
        payload.put_u8(consts::option::sub::IS);
        payload.put_slice(text.as_bytes());
        payload.freeze()
    }
}

impl Default for TerminalSpeed {
    fn default() -> Self {
        TerminalSpeed::new(38400, 38400)
    }
}

impl std::fmt::Display for TerminalSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.transmit, self.receive)
    }
}

impl std::str::FromStr for TerminalSpeed {
    type Err = std::num::ParseIntError;

    /// Parses `"38400,38400"`; a single number is used for both directions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((transmit, receive)) => Ok(TerminalSpeed::new(
                transmit.trim().parse()?,
                receive.trim().parse()?,
            )),
            None => {
                let speed = s.trim().parse()?;
                Ok(TerminalSpeed::new(speed, speed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reply() {
        assert_eq!(&TerminalSpeed::default().is_reply()[..], b"\x20\x0038400,38400");
    }

    #[test]
    fn parses_pairs_and_singles() {
        assert_eq!("9600,19200".parse(), Ok(TerminalSpeed::new(9600, 19200)));
        assert_eq!(" 115200 ".parse(), Ok(TerminalSpeed::new(115200, 115200)));
        assert!("fast".parse::<TerminalSpeed>().is_err());
    }
}
