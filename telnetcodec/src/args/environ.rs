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

//! Environment Option ([RFC1572](https://tools.ietf.org/html/rfc1572))

use crate::consts;
use crate::consts::option::environ::{ESC, USERVAR, VALUE, VAR};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// Values this long or longer are never sent.
pub const VALUE_LIMIT: usize = 64;

/// Environment variables exported to the peer on `ENVIRON SEND`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironVariables {
    names: Vec<String>,
}

impl EnvironVariables {
    /// Exports the given variable names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnvironVariables {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exported variable names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    ///
    /// Builds `ENVIRON IS (VAR name VALUE value)*` from whichever variables `lookup`
    /// resolves. Empty values and values of [`VALUE_LIMIT`] bytes or more are skipped.
    /// Returns `None` when no variable qualifies, in which case nothing is sent.
    ///
    pub fn is_reply<F>(&self, lookup: F) -> Option<Bytes>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut payload = BytesMut::new();
        payload.put_u8(consts::option::ENVIRON);
        payload.put_u8(consts::option::sub::IS);
        let header = payload.len();
        for name in &self.names {
            let Some(value) = lookup(name) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            if value.len() >= VALUE_LIMIT {
                debug!("Not exporting {name}: {} bytes", value.len());
                continue;
            }
            payload.put_u8(VAR);
            put_escaped(&mut payload, name.as_bytes());
            payload.put_u8(VALUE);
            put_escaped(&mut payload, value.as_bytes());
        }
        (payload.len() > header).then(|| payload.freeze())
    }

}

/// Default lookup for [`EnvironVariables::is_reply`]: the process environment.
pub fn process_environment(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Default for EnvironVariables {
    fn default() -> Self {
        EnvironVariables::new(["USER", "DISPLAY"])
    }
}

fn put_escaped(dst: &mut BytesMut, text: &[u8]) {
    for byte in text {
        if matches!(*byte, VAR | VALUE | ESC | USERVAR) {
            dst.put_u8(ESC);
        }
        dst.put_u8(*byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "USER" => Some("alice".to_string()),
            "DISPLAY" => Some(":0".to_string()),
            "EMPTY" => Some(String::new()),
            "HUGE" => Some("x".repeat(VALUE_LIMIT)),
            _ => None,
        }
    }

    #[test]
    fn exports_present_variables() {
        let reply = EnvironVariables::default().is_reply(lookup);
        assert_eq!(
            reply.as_deref(),
            Some(&b"\x24\x00\x00USER\x01alice\x00DISPLAY\x01:0"[..])
        );
    }

    #[test]
    fn skips_missing_empty_and_oversized() {
        let vars = EnvironVariables::new(["MISSING", "EMPTY", "HUGE", "USER"]);
        assert_eq!(
            vars.is_reply(lookup).as_deref(),
            Some(&b"\x24\x00\x00USER\x01alice"[..])
        );
    }

    #[test]
    fn nothing_available_sends_nothing() {
        let vars = EnvironVariables::new(["MISSING", "EMPTY"]);
        assert_eq!(vars.is_reply(lookup), None);
    }

    #[test]
    fn control_bytes_are_escaped() {
        let vars = EnvironVariables::new(["X"]);
        let reply = vars.is_reply(|_| Some("a\x01b".to_string()));
        assert_eq!(reply.as_deref(), Some(&b"\x24\x00\x00X\x01a\x02\x01b"[..]));
    }

    #[test]
    fn process_environment_misses_unset_names() {
        assert_eq!(process_environment("OTELNET_SURELY_UNSET_VARIABLE"), None);
        let vars = EnvironVariables::new(["OTELNET_SURELY_UNSET_VARIABLE"]);
        assert_eq!(vars.is_reply(process_environment), None);
    }
}
