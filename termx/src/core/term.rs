// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty

use miette::IntoDiagnostic;
use std::io::IsTerminal;

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

impl TTYResult {
    fn from_is_tty(is_tty: bool) -> Self {
        if is_tty {
            TTYResult::IsInteractive
        } else {
            TTYResult::IsNotInteractive
        }
    }
}

/// Returns [`TTYResult::IsInteractive`] if stdin is an interactive terminal (TTY). When
/// you run `echo "test" | cargo run` this returns [`TTYResult::IsNotInteractive`].
#[must_use]
pub fn is_stdin_interactive() -> TTYResult {
    TTYResult::from_is_tty(std::io::stdin().is_terminal())
}

/// If you run `cargo run | grep foo` this returns [`TTYResult::IsNotInteractive`].
#[must_use]
pub fn is_stdout_interactive() -> TTYResult {
    TTYResult::from_is_tty(std::io::stdout().is_terminal())
}

/// Get the terminal size as `(columns, rows)`. Queried on every call; terminal size is
/// never cached since the window can be resized between two renders.
///
/// # Errors
///
/// Returns an error if the size can't be determined, eg stdout is not a TTY.
pub fn get_size() -> miette::Result<(u16, u16)> {
    crossterm::terminal::size().into_diagnostic()
}

/// Get the terminal size, falling back to [`DEFAULT_WIDTH`] x [`DEFAULT_HEIGHT`].
#[must_use]
pub fn get_size_or_default() -> (u16, u16) {
    get_size().unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
