// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#[cfg(unix)]
use super::raw_mode_unix as platform;
#[cfg(not(unix))]
use super::raw_mode_windows as platform;

/// The terminal settings in effect before raw mode was entered. Opaque, not `Clone`:
/// it is meant to be restored once, by its owner.
#[derive(Debug)]
pub struct RawModeSnapshot {
    pub(super) inner: platform::PlatformSnapshot,
}

/// Put the controlling terminal into raw mode (no line buffering, no echo, no signal
/// keys) and return the settings that were replaced.
///
/// # Errors
///
/// Returns an error if the terminal attributes can't be read or written.
pub fn enable_raw_mode() -> miette::Result<RawModeSnapshot> {
    let inner = platform::enable_raw_mode()?;
    Ok(RawModeSnapshot { inner })
}

/// Restore the settings captured by [`enable_raw_mode()`].
///
/// # Errors
///
/// Returns an error if the terminal attributes can't be written.
pub fn restore_mode(snapshot: &RawModeSnapshot) -> miette::Result<()> {
    platform::restore_mode(&snapshot.inner)
}
