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

/// Terminal geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalSize {
    /// Size assumed when the terminal cannot be queried.
    pub const FALLBACK: TerminalSize = TerminalSize { cols: 80, rows: 24 };

    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl std::fmt::Display for TerminalSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== TerminalSize Tests =====

    #[test]
    fn test_terminal_size_new() {
        let size = TerminalSize::new(80, 24);
        assert_eq!(size.cols, 80);
        assert_eq!(size.rows, 24);
    }

    #[test]
    fn test_terminal_size_default_is_fallback() {
        assert_eq!(TerminalSize::default(), TerminalSize::new(80, 24));
    }

    #[test]
    fn test_terminal_size_equality() {
        let size1 = TerminalSize::new(80, 24);
        let size2 = TerminalSize::new(80, 24);
        let size3 = TerminalSize::new(100, 30);

        assert_eq!(size1, size2);
        assert_ne!(size1, size3);
    }

    #[test]
    fn test_terminal_size_display() {
        assert_eq!(TerminalSize::new(132, 43).to_string(), "132x43");
    }

    #[test]
    fn test_terminal_size_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(TerminalSize::new(80, 24));
        set.insert(TerminalSize::new(80, 24)); // Duplicate
        set.insert(TerminalSize::new(100, 30));

        assert_eq!(set.len(), 2);
    }
}
