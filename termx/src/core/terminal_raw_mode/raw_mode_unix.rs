// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios API.

use rustix::{fd::{AsFd, BorrowedFd},
             termios::{self, OptionalActions, Termios}};
use std::{fs::File, io};

pub type PlatformSnapshot = Termios;

/// Either stdin (when it is a tty) or `/dev/tty` (when stdin is redirected).
enum TerminalFd {
    Stdin(io::Stdin),
    DevTty(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

fn get_terminal_fd() -> io::Result<TerminalFd> {
    let stdin = io::stdin();
    if termios::isatty(&stdin) {
        Ok(TerminalFd::Stdin(stdin))
    } else {
        let file = File::options().read(true).write(true).open("/dev/tty")?;
        Ok(TerminalFd::DevTty(file))
    }
}

pub fn enable_raw_mode() -> miette::Result<PlatformSnapshot> {
    let fd = get_terminal_fd()
        .map_err(|e| miette::miette!("failed to get terminal file descriptor: {e}"))?;

    let original = termios::tcgetattr(&fd)
        .map_err(|e| miette::miette!("failed to retrieve terminal attributes: {e}"))?;

    // `make_raw()` is cfmakeraw: clears ICANON, ISIG, ECHO and sets VMIN=1, VTIME=0.
    let mut raw = original.clone();
    raw.make_raw();

    termios::tcsetattr(&fd, OptionalActions::Now, &raw)
        .map_err(|e| miette::miette!("failed to set terminal attributes: {e}"))?;

    Ok(original)
}

pub fn restore_mode(snapshot: &PlatformSnapshot) -> miette::Result<()> {
    let fd = get_terminal_fd()
        .map_err(|e| miette::miette!("failed to get terminal file descriptor: {e}"))?;

    termios::tcsetattr(&fd, OptionalActions::Now, snapshot)
        .map_err(|e| miette::miette!("failed to set terminal attributes: {e}"))?;

    Ok(())
}
