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

use std::sync::atomic::{AtomicBool, Ordering};

static EXIT_REQUESTED: AtomicBool = AtomicBool::new(false);
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

///
/// The only state shared between signal delivery and the main loop.
///
/// Lifecycle: the process-wide pair is created zeroed at startup and wired to SIGINT,
/// SIGTERM and SIGWINCH by [`crate::TerminalController::install_signal_handlers`]. The
/// main loop reads [`SignalFlags::exit_requested`] every iteration; the resize flag is
/// cleared when [`SignalFlags::take_resize`] consumes it. Handlers only ever store `true`.
///
#[derive(Clone, Copy, Debug)]
pub struct SignalFlags {
    exit: &'static AtomicBool,
    resize: &'static AtomicBool,
}

impl SignalFlags {
    /// Flags set by this process' signal handlers.
    pub fn process() -> SignalFlags {
        SignalFlags {
            exit: &EXIT_REQUESTED,
            resize: &RESIZE_PENDING,
        }
    }

    /// A private pair no signal handler writes to. Allocated once and never freed.
    pub fn detached() -> SignalFlags {
        SignalFlags {
            exit: Box::leak(Box::new(AtomicBool::new(false))),
            resize: Box::leak(Box::new(AtomicBool::new(false))),
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
    }

    pub fn mark_resized(&self) {
        self.resize.store(true, Ordering::SeqCst);
    }

    /// Clears the resize flag, returning whether it was set.
    pub fn take_resize(&self) -> bool {
        self.resize.swap(false, Ordering::SeqCst)
    }
}

impl Default for SignalFlags {
    fn default() -> Self {
        SignalFlags::process()
    }
}

#[cfg(unix)]
pub(crate) extern "C" fn handle_exit_signal(_: libc::c_int) {
    EXIT_REQUESTED.store(true, Ordering::SeqCst);
}

#[cfg(unix)]
pub(crate) extern "C" fn handle_resize_signal(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_flag_is_consumed_once() {
        let flags = SignalFlags::detached();
        assert!(!flags.take_resize());
        flags.mark_resized();
        flags.mark_resized();
        assert!(flags.take_resize());
        assert!(!flags.take_resize());
    }

    #[test]
    fn exit_flag_is_sticky() {
        let flags = SignalFlags::detached();
        assert!(!flags.exit_requested());
        flags.request_exit();
        assert!(flags.exit_requested());
        assert!(flags.exit_requested());
    }

    #[test]
    fn detached_flags_are_independent() {
        let a = SignalFlags::detached();
        let b = SignalFlags::detached();
        a.request_exit();
        assert!(!b.exit_requested());
    }
}
