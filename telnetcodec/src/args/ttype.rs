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

//! Terminal Type ([RFC1091](https://tools.ietf.org/html/rfc1091))

use crate::consts;
use bytes::{BufMut, Bytes, BytesMut};

/// Terminal type names offered to the peer in round-robin order.
///
/// Each `TTYPE SEND` takes the next name; after the last one the cycle starts over,
/// which is how the peer learns the list has been exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalTypes {
    names: Vec<String>,
    next: usize,
}

impl TerminalTypes {
    /// Creates a cycle over `names`. An empty list answers with `UNKNOWN`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TerminalTypes {
            names: names.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// Returns the name to report next and advances the cycle.
    pub fn advance(&mut self) -> &str {
        if self.names.is_empty() {
            return "UNKNOWN";
        }
        let index = self.next % self.names.len();
        self.next = (index + 1) % self.names.len();
        &self.names[index]
    }

    /// Configured names in offer order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Restarts the cycle from the first name.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Default for TerminalTypes {
    fn default() -> Self {
        TerminalTypes::new(["XTERM", "VT100", "ANSI"])
    }
}

/// Subnegotiation payload `TTYPE IS <name>`, unescaped.
pub fn is_reply(name: &str) -> Bytes {
    let mut payload = BytesMut::with_capacity(2 + name.len());
    payload.put_u8(consts::option::TTYPE);
    payload.put_u8(consts::option::sub::IS);
    payload.put_slice(name.as_bytes());
    payload.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_and_wraps() {
        let mut types = TerminalTypes::default();
        let seen: Vec<String> = (0..7).map(|_| types.advance().to_string()).collect();
        assert_eq!(
            seen,
            ["XTERM", "VT100", "ANSI", "XTERM", "VT100", "ANSI", "XTERM"]
        );
        types.reset();
        assert_eq!(types.advance(), "XTERM");
    }

    #[test]
    fn empty_list_reports_unknown() {
        let mut types = TerminalTypes::new(Vec::<String>::new());
        assert_eq!(types.advance(), "UNKNOWN");
        assert_eq!(types.advance(), "UNKNOWN");
    }

    #[test]
    fn reply_layout() {
        assert_eq!(&is_reply("VT100")[..], b"\x18\x00VT100");
    }
}
