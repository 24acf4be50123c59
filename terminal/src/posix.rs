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
use crate::signal::{handle_exit_signal, handle_resize_signal};
use crate::{TerminalError, TerminalResult, TerminalSize};
use nix::errno::Errno;
use nix::fcntl::{FcntlArg, OFlag, fcntl};
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use nix::sys::termios::{
    ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices, Termios,
    tcgetattr, tcsetattr,
};
use std::io::{IsTerminal, Write};
use std::os::fd::AsFd;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, trace};

/// Terminal control through termios, fcntl, ioctl and sigaction on standard input/output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PosixTerminal;

impl PosixTerminal {
    pub fn new() -> PosixTerminal {
        PosixTerminal
    }
}

/// Raw attribute set: no input translation, no output processing, 8-bit characters,
/// no echo, no line discipline, reads return after 0 bytes or 100 ms.
fn make_raw(original: &Termios) -> Termios {
    let mut raw = original.clone();
    raw.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.control_flags.remove(ControlFlags::CSIZE);
    raw.control_flags.insert(ControlFlags::CS8);
    raw.local_flags
        .remove(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;
    raw
}

fn install_handler(signal: Signal, handler: extern "C" fn(libc::c_int)) -> TerminalResult<()> {
    let action = SigAction::new(
        SigHandler::Handler(handler),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: the handlers only store into static atomics, which is async-signal-safe.
    unsafe { sigaction(signal, &action) }.map_err(|errno| TerminalError::SignalRegistration {
        signal: signal.as_str(),
        source: errno.into(),
    })?;
    trace!("Installed {} handler", signal.as_str());
    Ok(())
}

///
/// Reads from `source` only when it already has something to deliver.
///
/// Readiness is checked with a zero-timeout poll first, so the call returns at once
/// whether or not the descriptor is in non-blocking mode. Returns 0 when nothing is
/// pending, at end of input, or when the read was interrupted.
///
fn read_ready<F: AsFd>(source: F, buffer: &mut [u8]) -> TerminalResult<usize> {
    let fd = source.as_fd();
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::ZERO) {
        Ok(0) | Err(Errno::EINTR) => return Ok(0),
        Ok(_) => {}
        Err(errno) => return Err(errno.into()),
    }
    let ready = fds[0].revents().unwrap_or(PollFlags::empty());
    if ready.contains(PollFlags::POLLNVAL) {
        return Ok(0);
    }
    match nix::unistd::read(fd, buffer) {
        Ok(count) => Ok(count),
        Err(Errno::EAGAIN | Errno::EINTR) => Ok(0),
        Err(errno) => Err(errno.into()),
    }
}

fn query_window_size(fd: libc::c_int) -> Option<TerminalSize> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a `winsize` into the provided, correctly sized struct.
    let ret = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if ret == -1 || ws.ws_col == 0 || ws.ws_row == 0 {
        None
    } else {
        Some(TerminalSize::new(ws.ws_col, ws.ws_row))
    }
}

impl TerminalPlatform for PosixTerminal {
    type Snapshot = Termios;

    fn is_terminal(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    fn capture(&self) -> TerminalResult<Termios> {
        if !self.is_terminal() {
            return Err(TerminalError::NotATerminal);
        }
        tcgetattr(std::io::stdin()).map_err(|errno| TerminalError::ReadAttributes(errno.into()))
    }

    fn apply_raw(&self, original: &Termios) -> TerminalResult<()> {
        let raw = make_raw(original);
        tcsetattr(std::io::stdin(), SetArg::TCSAFLUSH, &raw)
            .map_err(|errno| TerminalError::ApplyAttributes(errno.into()))
    }

    fn restore(&self, original: &Termios) -> TerminalResult<()> {
        tcsetattr(std::io::stdin(), SetArg::TCSAFLUSH, original)
            .map_err(|errno| TerminalError::ApplyAttributes(errno.into()))
    }

    fn set_nonblocking(&self, enabled: bool) -> TerminalResult<()> {
        let stdin = std::io::stdin();
        let flags = OFlag::from_bits_truncate(fcntl(&stdin, FcntlArg::F_GETFL)?);
        let flags = if enabled {
            flags | OFlag::O_NONBLOCK
        } else {
            flags & !OFlag::O_NONBLOCK
        };
        fcntl(&stdin, FcntlArg::F_SETFL(flags))?;
        Ok(())
    }

    fn window_size(&self) -> Option<TerminalSize> {
        query_window_size(libc::STDOUT_FILENO).or_else(|| query_window_size(libc::STDIN_FILENO))
    }

    fn install_exit_handlers(&self) -> TerminalResult<()> {
        install_handler(Signal::SIGINT, handle_exit_signal)?;
        install_handler(Signal::SIGTERM, handle_exit_signal)
    }

    fn install_resize_handler(&self) -> TerminalResult<()> {
        install_handler(Signal::SIGWINCH, handle_resize_signal)
    }

    fn read_input(&self, buffer: &mut [u8]) -> TerminalResult<usize> {
        read_ready(std::io::stdin(), buffer)
    }

    fn write_output(&self, mut data: &[u8]) -> TerminalResult<()> {
        // Standard output usually shares the non-blocking tty description with stdin.
        let mut stdout = std::io::stdout().lock();
        while !data.is_empty() {
            match stdout.write(data) {
                Ok(0) => return Err(std::io::Error::from(std::io::ErrorKind::WriteZero).into()),
                Ok(written) => data = &data[written..],
                Err(error) if error.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(error) if error.kind() == std::io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error.into()),
            }
        }
        loop {
            match stdout.flush() {
                Ok(()) => return Ok(()),
                Err(error) if error.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    fn flush_output(&self) {
        if let Err(error) = std::io::stdout().flush() {
            debug!("Failed to flush terminal output: {error}");
        }
    }

    fn reset_terminal(&self) {
        let child = Command::new("stty")
            .arg("sane")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match child {
            Ok(mut child) => {
                // Reap in the background so the caller never waits on it.
                let reaper = std::thread::Builder::new()
                    .name("stty-reaper".to_string())
                    .spawn(move || child.wait());
                if let Err(error) = reaper {
                    debug!("Failed to start stty reaper: {error}");
                }
            }
            Err(error) => debug!("Failed to run stty sane: {error}"),
        }
    }
}
