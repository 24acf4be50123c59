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

use crate::args::environ::EnvironVariables;
use crate::args::naws::WindowSize;
use crate::args::tspeed::TerminalSpeed;
use crate::args::ttype::TerminalTypes;

/// Values the codec reports to the peer during subnegotiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelnetConfig {
    /// Names cycled through on `TTYPE SEND`
    pub terminal_types: TerminalTypes,
    /// Reported on `TSPEED SEND`
    pub terminal_speed: TerminalSpeed,
    /// Variables exported on `ENVIRON SEND`
    pub environ: EnvironVariables,
    /// Window size reported once NAWS is accepted
    pub window_size: WindowSize,
}

impl TelnetConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the terminal type cycle
    pub fn with_terminal_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminal_types = TerminalTypes::new(names);
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
        self.environ = EnvironVariables::new(names);
        self
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, size: WindowSize) -> Self {
        self.window_size = size;
        self
    }
}

impl Default for TelnetConfig {
    fn default() -> Self {
        Self {
            terminal_types: TerminalTypes::default(),
            terminal_speed: TerminalSpeed::default(),
            environ: EnvironVariables::default(),
            window_size: WindowSize::default(),
        }
    }
}
