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

use crate::platform::TerminalPlatform;
use crate::{TerminalError, TerminalResult, TerminalSize};
use std::io::{Read, Write};

/// Stand-in for platforms without termios. Raw mode and signals are unavailable;
/// plain blocking standard I/O still works.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedTerminal;

impl UnsupportedTerminal {
    pub fn new() -> UnsupportedTerminal {
        UnsupportedTerminal
    }
}

impl TerminalPlatform for UnsupportedTerminal {
    type Snapshot = ();

    fn is_terminal(&self) -> bool {
        false
    }

    fn capture(&self) -> TerminalResult<()> {
        Err(TerminalError::Unsupported)
    }

    fn apply_raw(&self, _original: &()) -> TerminalResult<()> {
        Err(TerminalError::Unsupported)
    }

    fn restore(&self, _original: &()) -> TerminalResult<()> {
        Ok(())
    }

    fn set_nonblocking(&self, _enabled: bool) -> TerminalResult<()> {
        Err(TerminalError::Unsupported)
    }

    fn window_size(&self) -> Option<TerminalSize> {
        None
    }

    fn install_exit_handlers(&self) -> TerminalResult<()> {
        Err(TerminalError::Unsupported)
    }

    fn install_resize_handler(&self) -> TerminalResult<()> {
        Err(TerminalError::Unsupported)
    }

    fn read_input(&self, buffer: &mut [u8]) -> TerminalResult<usize> {
        Ok(std::io::stdin().read(buffer)?)
    }

    fn write_output(&self, data: &[u8]) -> TerminalResult<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()?;
        Ok(())
    }

    fn flush_output(&self) {
        let _ = std::io::stdout().flush();
    }

    fn reset_terminal(&self) {}
}
