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

//! Session traffic log

use chrono::Local;
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BYTES_PER_LINE: usize = 16;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

///
/// Renders `data` as a hex dump, 16 bytes per line.
///
/// Every line starts with `prefix`, lists the bytes as lowercase two-digit hex followed by
/// a space, pads short lines so the columns align, then shows ` | ` and the bytes as ASCII
/// with anything outside 0x20..=0x7E rendered as `.`. Empty input renders nothing.
///
pub fn hex_dump(prefix: &str, data: &[u8]) -> String {
    let mut dump = String::new();
    for chunk in data.chunks(BYTES_PER_LINE) {
        dump.push_str(prefix);
        for byte in chunk {
            let _ = write!(dump, "{byte:02x} ");
        }
        for _ in chunk.len()..BYTES_PER_LINE {
            dump.push_str("   ");
        }
        dump.push_str(" | ");
        dump.extend(chunk.iter().map(|&byte| match byte {
            0x20..=0x7E => byte as char,
            _ => '.',
        }));
        dump.push('\n');
    }
    dump
}

/// Direction of logged traffic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    fn tag(self) -> &'static str {
        match self {
            Direction::Sent => "SENT",
            Direction::Received => "RECV",
        }
    }
}

///
/// Appends a timestamped hex dump of every buffer sent or received to a file.
///
/// Write failures are reported with `warn!` and otherwise ignored so that logging can
/// never end a session. The end-of-session marker is written when the logger is dropped.
///
#[derive(Debug)]
pub struct SessionLogger {
    file: File,
    path: PathBuf,
}

impl SessionLogger {
    /// Opens `path` for appending and writes the session start marker.
    pub fn open(path: impl AsRef<Path>) -> io::Result<SessionLogger> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut logger = SessionLogger { file, path };
        logger.marker("Session started");
        debug!("Logging session to {}", logger.path.display());
        Ok(logger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_sent(&mut self, data: &[u8]) {
        self.log(Direction::Sent, data);
    }

    pub fn log_received(&mut self, data: &[u8]) {
        self.log(Direction::Received, data);
    }

    pub fn log(&mut self, direction: Direction, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let prefix = format!("[{}][{}] ", timestamp(), direction.tag());
        self.write(hex_dump(&prefix, data).as_bytes());
    }

    fn marker(&mut self, text: &str) {
        let line = format!("[{}] === {} ===\n", timestamp(), text);
        self.write(line.as_bytes());
    }

    fn write(&mut self, bytes: &[u8]) {
        if let Err(error) = self.file.write_all(bytes).and_then(|_| self.file.flush()) {
            warn!("Failed to write session log {}: {}", self.path.display(), error);
        }
    }
}

impl Drop for SessionLogger {
    fn drop(&mut self) {
        self.marker("Session ended");
    }
}
