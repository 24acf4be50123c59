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

//! Console mode commands

use crate::ConnectionStats;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const HELP: &str = "\r\n\
=== Console Commands ===\r\n\
\x20 [empty]       - Return to client mode\r\n\
\x20 quit, exit    - Disconnect and exit program\r\n\
\x20 help, ?       - Show this help message\r\n\
\x20 stats         - Show connection statistics\r\n\
\r\n\
=== File Transfer ===\r\n\
\x20 sz, sy, sx    - Send files (ZMODEM, YMODEM, XMODEM)\r\n\
\x20 rz, ry, rx    - Receive files (ZMODEM, YMODEM, XMODEM)\r\n\
\x20 kermit        - Kermit transfer\r\n\
\r\n\
=== File Management ===\r\n\
\x20 ls [dir]      - List files in directory\r\n\
\x20 pwd           - Print working directory\r\n\
\x20 cd <dir>      - Change directory\r\n\
\r\n\
=== Examples ===\r\n\
\x20 ls /tmp                  - List /tmp directory\r\n\
========================\r\n";

const TRANSFER_VERBS: [&str; 7] = ["sz", "sy", "sx", "rz", "ry", "rx", "kermit"];

/// Result of running one console command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShellOutcome {
    /// The command ran
    Handled,
    /// The command was unknown or failed; a message has been written
    Unhandled,
    /// The user asked to disconnect
    Quit,
}

///
/// Interprets console command lines.
///
/// The shell keeps its own working directory, so `cd` never changes the directory of the
/// process. Output uses CRLF line endings because it is written to a raw-mode terminal.
///
#[derive(Clone, Debug)]
pub struct CommandShell {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl CommandShell {
    /// Starts in the process working directory with `~` taken from `HOME`.
    pub fn new() -> CommandShell {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home = std::env::var_os("HOME").map(PathBuf::from);
        CommandShell::with_directories(cwd, home)
    }

    pub fn with_directories(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> CommandShell {
        CommandShell {
            cwd: cwd.into(),
            home,
        }
    }

    /// Directory that relative paths resolve against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    ///
    /// Runs one trimmed command line and writes its output to `out`.
    ///
    /// The verb is case-insensitive. `stats` reports `stats` when given, or that there is no
    /// connection. Only failures to write to `out` are returned as errors.
    ///
    pub fn execute<W: Write>(
        &mut self,
        line: &str,
        stats: Option<&ConnectionStats>,
        out: &mut W,
    ) -> io::Result<ShellOutcome> {
        let parts = split_command_line(line);
        let Some((verb, args)) = parts.split_first() else {
            return Ok(ShellOutcome::Unhandled);
        };
        let verb = verb.to_lowercase();
        debug!("Console command '{}' with {} argument(s)", verb, args.len());

        match verb.as_str() {
            "quit" | "exit" => {
                out.write_all(b"\r\n[Exiting...]\r\n")?;
                Ok(ShellOutcome::Quit)
            }
            "help" | "?" => {
                out.write_all(HELP.as_bytes())?;
                Ok(ShellOutcome::Handled)
            }
            "stats" => {
                match stats {
                    Some(stats) => {
                        write!(out, "\r\n{}\r\n", stats.to_string().replace('\n', "\r\n"))?
                    }
                    None => out.write_all(b"\r\n[No active connection]\r\n")?,
                }
                Ok(ShellOutcome::Handled)
            }
            "ls" => self.list(args.first().map(String::as_str).unwrap_or("."), out),
            "pwd" => {
                write!(out, "\r\n{}\r\n", self.cwd.display())?;
                Ok(ShellOutcome::Handled)
            }
            "cd" => match args.first() {
                Some(target) => self.change_directory(target, out),
                None => {
                    out.write_all(b"\r\n[Error: cd requires a directory argument]\r\n")?;
                    Ok(ShellOutcome::Unhandled)
                }
            },
            verb if TRANSFER_VERBS.contains(&verb) => {
                write!(out, "\r\n[File transfer command '{verb}' not yet implemented]\r\n")?;
                Ok(ShellOutcome::Handled)
            }
            verb => {
                write!(
                    out,
                    "\r\n[Unknown command: {verb}. Type 'help' for available commands]\r\n"
                )?;
                Ok(ShellOutcome::Unhandled)
            }
        }
    }

    fn list<W: Write>(&self, target: &str, out: &mut W) -> io::Result<ShellOutcome> {
        let path = self.resolve(target);
        if !path.is_dir() {
            write!(out, "\r\n[Error: Directory not found: {target}]\r\n")?;
            return Ok(ShellOutcome::Unhandled);
        }
        let full = std::fs::canonicalize(&path).unwrap_or(path);
        let mut entries = match std::fs::read_dir(&full) {
            Ok(entries) => entries.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
            Err(error) => {
                write!(out, "\r\n[Error listing directory: {error}]\r\n")?;
                return Ok(ShellOutcome::Unhandled);
            }
        };
        entries.sort_by_key(|entry| entry.file_name());

        write!(out, "\r\n[Directory listing: {}]\r\n", full.display())?;
        for entry in &entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let metadata = std::fs::metadata(entry.path());
            match metadata {
                Ok(metadata) if metadata.is_dir() => write!(out, "  {name}/\r\n")?,
                Ok(metadata) => write!(out, "  {name} ({} bytes)\r\n", metadata.len())?,
                Err(_) => write!(out, "  {name}\r\n")?,
            }
        }
        write!(out, "\r\n[Total: {} entries]\r\n", entries.len())?;
        Ok(ShellOutcome::Handled)
    }

    fn change_directory<W: Write>(
        &mut self,
        target: &str,
        out: &mut W,
    ) -> io::Result<ShellOutcome> {
        let path = self.resolve(target);
        let changed = std::fs::canonicalize(&path).and_then(|full| {
            if full.is_dir() {
                Ok(full)
            } else {
                Err(io::Error::new(io::ErrorKind::NotADirectory, "Not a directory"))
            }
        });
        match changed {
            Ok(full) => {
                self.cwd = full;
                write!(out, "\r\n[Changed to: {}]\r\n", self.cwd.display())?;
                Ok(ShellOutcome::Handled)
            }
            Err(error) => {
                write!(out, "\r\n[Error changing directory: {error}]\r\n")?;
                Ok(ShellOutcome::Unhandled)
            }
        }
    }

    fn resolve(&self, target: &str) -> PathBuf {
        let expanded = match (target.strip_prefix('~'), &self.home) {
            (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
            _ => PathBuf::from(target),
        };
        self.cwd.join(expanded)
    }
}

impl Default for CommandShell {
    fn default() -> Self {
        CommandShell::new()
    }
}

/// Splits on spaces and tabs outside double quotes; the quotes themselves are dropped.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn run(shell: &mut CommandShell, line: &str) -> (ShellOutcome, String) {
        let mut out = Vec::new();
        let outcome = shell.execute(line, None, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn scratch() -> (TempDir, CommandShell) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        let shell = CommandShell::with_directories(dir.path(), Some(dir.path().join("sub")));
        (dir, shell)
    }

    #[test]
    fn splits_quoted_arguments() {
        assert_eq!(split_command_line("ls  \"my dir\"\tx"), vec!["ls", "my dir", "x"]);
        assert_eq!(split_command_line("cd a\"b c\"d"), vec!["cd", "ab cd"]);
        assert!(split_command_line("   ").is_empty());
    }

    #[test]
    fn quit_and_exit() {
        let (_dir, mut shell) = scratch();
        assert_eq!(run(&mut shell, "quit"), (ShellOutcome::Quit, "\r\n[Exiting...]\r\n".into()));
        assert_eq!(run(&mut shell, "EXIT").0, ShellOutcome::Quit);
    }

    #[test]
    fn help_lists_commands() {
        let (_dir, mut shell) = scratch();
        let (outcome, text) = run(&mut shell, "?");
        assert_eq!(outcome, ShellOutcome::Handled);
        assert!(text.contains("=== Console Commands ===\r\n"));
        assert!(text.contains("  cd <dir>      - Change directory\r\n"));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn stats_with_and_without_connection() {
        let (_dir, mut shell) = scratch();
        assert_eq!(
            run(&mut shell, "stats").1,
            "\r\n[No active connection]\r\n"
        );

        let stats = ConnectionStats {
            bytes_sent: 3,
            bytes_received: 7,
            duration: Duration::from_secs(2),
        };
        let mut out = Vec::new();
        shell.execute("stats", Some(&stats), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\r\n=== Connection Statistics ===\r\n"));
        assert!(text.contains("Bytes received: 7\r\n"));
        assert!(text.ends_with("============================\r\n"));
    }

    #[test]
    fn ls_lists_sorted_entries() {
        let (dir, mut shell) = scratch();
        let (outcome, text) = run(&mut shell, "ls");
        assert_eq!(outcome, ShellOutcome::Handled);
        let full = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(
            text,
            format!(
                "\r\n[Directory listing: {}]\r\n{}",
                full.display(),
                "  notes.txt (5 bytes)\r\n  sub/\r\n\r\n[Total: 2 entries]\r\n"
            )
        );
    }

    #[test]
    fn ls_missing_directory() {
        let (_dir, mut shell) = scratch();
        assert_eq!(
            run(&mut shell, "ls nowhere"),
            (
                ShellOutcome::Unhandled,
                "\r\n[Error: Directory not found: nowhere]\r\n".into()
            )
        );
    }

    #[test]
    fn cd_and_pwd_track_shell_directory() {
        let (dir, mut shell) = scratch();
        let process_cwd = std::env::current_dir().unwrap();
        let sub = std::fs::canonicalize(dir.path().join("sub")).unwrap();

        let (outcome, text) = run(&mut shell, "cd sub");
        assert_eq!(outcome, ShellOutcome::Handled);
        assert_eq!(text, format!("\r\n[Changed to: {}]\r\n", sub.display()));
        assert_eq!(run(&mut shell, "pwd").1, format!("\r\n{}\r\n", sub.display()));
        assert_eq!(std::env::current_dir().unwrap(), process_cwd);

        run(&mut shell, "cd ..");
        run(&mut shell, "cd ~");
        assert_eq!(shell.cwd(), sub.as_path());
    }

    #[test]
    fn cd_errors() {
        let (_dir, mut shell) = scratch();
        assert_eq!(
            run(&mut shell, "cd"),
            (
                ShellOutcome::Unhandled,
                "\r\n[Error: cd requires a directory argument]\r\n".into()
            )
        );
        let (outcome, text) = run(&mut shell, "cd notes.txt");
        assert_eq!(outcome, ShellOutcome::Unhandled);
        assert!(text.starts_with("\r\n[Error changing directory: "));
    }

    #[test]
    fn transfer_and_unknown_verbs() {
        let (_dir, mut shell) = scratch();
        assert_eq!(
            run(&mut shell, "SZ file.bin"),
            (
                ShellOutcome::Handled,
                "\r\n[File transfer command 'sz' not yet implemented]\r\n".into()
            )
        );
        assert_eq!(
            run(&mut shell, "frobnicate"),
            (
                ShellOutcome::Unhandled,
                "\r\n[Unknown command: frobnicate. Type 'help' for available commands]\r\n".into()
            )
        );
    }
}
