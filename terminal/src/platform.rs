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

use crate::{TerminalResult, TerminalSize};

///
/// The operating-system calls the [`crate::TerminalController`] is built on.
///
/// One implementation exists per supported platform plus a stub that reports
/// [`crate::TerminalError::Unsupported`]. Implementations hold no policy: idempotence,
/// snapshot ownership and error swallowing live in the controller.
///
pub trait TerminalPlatform {
    /// Saved terminal attributes, as captured before raw mode.
    type Snapshot: Clone;

    /// Whether standard input is a terminal.
    fn is_terminal(&self) -> bool;

    /// Reads the current attribute set of standard input.
    fn capture(&self) -> TerminalResult<Self::Snapshot>;

    /// Applies a raw-mode attribute set derived from a copy of `original`.
    fn apply_raw(&self, original: &Self::Snapshot) -> TerminalResult<()>;

    /// Applies `original` unchanged.
    fn restore(&self, original: &Self::Snapshot) -> TerminalResult<()>;

    /// Switches standard input between blocking and non-blocking reads.
    fn set_nonblocking(&self, enabled: bool) -> TerminalResult<()>;

    /// Current geometry, or `None` if it cannot be queried.
    fn window_size(&self) -> Option<TerminalSize>;

    /// Routes SIGINT and SIGTERM to the process exit flag.
    fn install_exit_handlers(&self) -> TerminalResult<()>;

    /// Routes SIGWINCH to the process resize flag.
    fn install_resize_handler(&self) -> TerminalResult<()>;

    /// Reads available keyboard bytes. Returns 0 when nothing is pending.
    fn read_input(&self, buffer: &mut [u8]) -> TerminalResult<usize>;

    /// Writes all of `data` to the screen and flushes it.
    fn write_output(&self, data: &[u8]) -> TerminalResult<()>;

    /// Flushes buffered screen output.
    fn flush_output(&self);

    /// Starts the platform's terminal reset command without waiting for it.
    fn reset_terminal(&self);
}
