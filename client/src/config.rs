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

//! Client configuration

use otelnet_telnetcodec::TelnetConfig;
use otelnet_telnetcodec::naws::WindowSize;
use otelnet_telnetcodec::tspeed::TerminalSpeed;
use std::path::PathBuf;
use std::time::Duration;

/// Telnet client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Terminal types offered in turn on TTYPE SEND
    pub terminal_types: Vec<String>,

    /// Terminal speed reported on TSPEED SEND
    pub terminal_speed: TerminalSpeed,

    /// Environment variables exported on ENVIRON SEND
    pub environ: Vec<String>,

    /// Window size reported before the terminal is queried
    pub window_size: WindowSize,

    /// Connection timeout (None to wait for the OS)
    pub connect_timeout: Option<Duration>,

    /// Pause between polls of the keyboard and socket
    pub poll_interval: Duration,

    /// Buffer size for incoming data
    pub buffer_size: usize,

    /// Session log file, if traffic should be recorded
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            terminal_types: vec!["XTERM".to_string(), "VT100".to_string(), "ANSI".to_string()],
            terminal_speed: TerminalSpeed::default(),
            environ: vec!["USER".to_string(), "DISPLAY".to_string()],
            window_size: WindowSize::default(),
            connect_timeout: Some(Duration::from_secs(10)),
            poll_interval: Duration::from_millis(10),
            buffer_size: 4096,
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the terminal type cycle
    pub fn with_terminal_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminal_types = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the terminal speed
    pub fn with_terminal_speed(mut self, speed: TerminalSpeed) -> Self {
        self.terminal_speed = speed;
        self
    }

    /// Set the exported environment variable names
    pub fn with_environ<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environ = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the terminal size
    pub fn with_window_size(mut self, cols: u16, rows: u16) -> Self {
        self.window_size = WindowSize::new(cols, rows);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the receive buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Record session traffic to `path`
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The subset of this configuration the protocol engine reports to the peer.
    pub fn telnet_config(&self) -> TelnetConfig {
        TelnetConfig::new()
            .with_terminal_types(self.terminal_types.iter().cloned())
            .with_terminal_speed(self.terminal_speed)
            .with_environ(self.environ.iter().cloned())
            .with_window_size(self.window_size)
    }
}
