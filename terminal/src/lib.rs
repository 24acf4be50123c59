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

//! Local terminal control for `otelnet`.
//!
//! [`TerminalController`] switches standard input into raw mode and back, watches for
//! interrupt, terminate and window-change signals through [`SignalFlags`], and reports the
//! window geometry. The OS calls sit behind [`TerminalPlatform`]; [`PosixTerminal`] is the
//! real implementation and [`UnsupportedTerminal`] keeps other platforms building.

mod controller;
mod platform;
#[cfg(unix)]
mod posix;
mod result;
mod signal;
mod types;
mod unsupported;

pub use self::controller::{DefaultPlatform, TerminalController};
pub use self::platform::TerminalPlatform;
#[cfg(unix)]
pub use self::posix::PosixTerminal;
pub use self::result::{TerminalError, TerminalResult};
pub use self::signal::SignalFlags;
pub use self::types::TerminalSize;
pub use self::unsupported::UnsupportedTerminal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports_exist() {
        let _ = std::any::type_name::<TerminalController>();
        let _ = std::any::type_name::<TerminalError>();
        let _ = std::any::type_name::<TerminalResult<()>>();
        let _ = std::any::type_name::<SignalFlags>();
        let _ = std::any::type_name::<TerminalSize>();
    }

    #[test]
    fn test_unsupported_controller_degrades() {
        let mut terminal =
            TerminalController::with_platform(UnsupportedTerminal::new(), SignalFlags::detached());
        assert!(!terminal.enable_raw_mode());
        assert!(terminal.install_signal_handlers().is_err());
        assert_eq!(terminal.window_size(), TerminalSize::new(80, 24));
        terminal.disable_raw_mode();
    }
}
