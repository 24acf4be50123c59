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
use crate::{SignalFlags, TerminalResult, TerminalSize};
use tracing::{debug, warn};

/// Platform used by [`TerminalController::new`].
#[cfg(unix)]
pub type DefaultPlatform = crate::PosixTerminal;

/// Platform used by [`TerminalController::new`].
#[cfg(not(unix))]
pub type DefaultPlatform = crate::UnsupportedTerminal;

///
/// Owns the local terminal for the lifetime of a session.
///
/// The original attribute set is captured on the first successful raw-mode request and
/// kept untouched from then on; every later enable works from a copy and every disable
/// restores it. Raw mode is released again when the controller is dropped.
///
pub struct TerminalController<P: TerminalPlatform = DefaultPlatform> {
    platform: P,
    signals: SignalFlags,
    original: Option<P::Snapshot>,
    raw_enabled: bool,
}

impl TerminalController<DefaultPlatform> {
    /// Controller for this process' standard input/output.
    pub fn new() -> Self {
        TerminalController::with_platform(DefaultPlatform::default(), SignalFlags::process())
    }
}

impl Default for TerminalController<DefaultPlatform> {
    fn default() -> Self {
        TerminalController::new()
    }
}

impl<P: TerminalPlatform> TerminalController<P> {
    pub fn with_platform(platform: P, signals: SignalFlags) -> Self {
        TerminalController {
            platform,
            signals,
            original: None,
            raw_enabled: false,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn signals(&self) -> SignalFlags {
        self.signals
    }

    pub fn is_raw(&self) -> bool {
        self.raw_enabled
    }

    /// Puts the terminal into raw, non-blocking mode. Does nothing if already raw.
    pub fn try_enable_raw_mode(&mut self) -> TerminalResult<()> {
        if self.raw_enabled {
            return Ok(());
        }
        let original = match self.original.clone() {
            Some(original) => original,
            None => {
                let captured = self.platform.capture()?;
                self.original = Some(captured.clone());
                captured
            }
        };
        self.platform.apply_raw(&original)?;
        if let Err(error) = self.platform.set_nonblocking(true) {
            if let Err(restore_error) = self.platform.restore(&original) {
                warn!("Failed to restore terminal after partial raw mode: {restore_error}");
            }
            return Err(error);
        }
        self.raw_enabled = true;
        debug!("Raw mode enabled");
        Ok(())
    }

    /// [`TerminalController::try_enable_raw_mode`], logging the failure.
    pub fn enable_raw_mode(&mut self) -> bool {
        match self.try_enable_raw_mode() {
            Ok(()) => true,
            Err(error) => {
                warn!("Failed to enable raw mode: {error}");
                false
            }
        }
    }

    ///
    /// Restores the captured attributes and blocking input.
    ///
    /// Safe to call any number of times and from teardown paths: failures are logged, never
    /// returned. After restoring, the platform reset command is started in the background
    /// in case something else changed the tty underneath us.
    ///
    pub fn disable_raw_mode(&mut self) {
        if !self.raw_enabled {
            return;
        }
        self.raw_enabled = false;
        self.platform.flush_output();
        if let Some(original) = &self.original {
            if let Err(error) = self.platform.restore(original) {
                warn!("Failed to restore terminal attributes: {error}");
            }
        }
        if let Err(error) = self.platform.set_nonblocking(false) {
            warn!("Failed to restore blocking input: {error}");
        }
        self.platform.reset_terminal();
        debug!("Terminal restored");
    }

    /// Routes interrupt, terminate and window-change signals to [`SignalFlags`].
    ///
    /// Only a failure on the exit signals is returned; a missing window-change signal
    /// leaves resize tracking disabled.
    pub fn install_signal_handlers(&self) -> TerminalResult<()> {
        self.platform.install_exit_handlers()?;
        if let Err(error) = self.platform.install_resize_handler() {
            warn!("Window resize tracking unavailable: {error}");
        }
        debug!("Signal handlers installed");
        Ok(())
    }

    /// Current geometry, 80x24 when it cannot be determined.
    pub fn window_size(&self) -> TerminalSize {
        self.platform.window_size().unwrap_or_else(|| {
            debug!("Window size unavailable, assuming {}", TerminalSize::FALLBACK);
            TerminalSize::FALLBACK
        })
    }

    /// Consumes a pending resize notification and re-queries the geometry.
    pub fn check_window_size_changed(&self) -> Option<TerminalSize> {
        self.signals.take_resize().then(|| self.window_size())
    }

    pub fn should_exit(&self) -> bool {
        self.signals.exit_requested()
    }

    pub fn request_exit(&self) {
        self.signals.request_exit();
    }

    pub fn read_input(&self, buffer: &mut [u8]) -> TerminalResult<usize> {
        self.platform.read_input(buffer)
    }

    pub fn write_output(&self, data: &[u8]) -> TerminalResult<()> {
        self.platform.write_output(data)
    }
}

impl<P: TerminalPlatform> Drop for TerminalController<P> {
    fn drop(&mut self) {
        self.disable_raw_mode();
    }
}

impl<P: TerminalPlatform> std::fmt::Debug for TerminalController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalController")
            .field("raw_enabled", &self.raw_enabled)
            .field("captured", &self.original.is_some())
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}
