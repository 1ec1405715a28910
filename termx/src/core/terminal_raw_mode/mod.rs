// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode with an explicit snapshot of the previous terminal settings.
//!
//! [`enable_raw_mode()`] returns a [`RawModeSnapshot`] of the settings it replaced, and
//! [`restore_mode()`] puts exactly those settings back. There is no process-wide saved
//! state: whoever entered raw mode owns the snapshot, which is what lets
//! [`crate::TerminalSession::restore()`] be idempotent.
//!
//! - Unix uses [`rustix`] termios (`tcgetattr`, `make_raw`, `tcsetattr`).
//! - Everything else falls back to [`crossterm`].

// Attach.
mod raw_mode_core;
#[cfg(unix)]
mod raw_mode_unix;
#[cfg(not(unix))]
mod raw_mode_windows;

// Re-export.
pub use raw_mode_core::*;
