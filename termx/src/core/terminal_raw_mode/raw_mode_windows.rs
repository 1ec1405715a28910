// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic as _;

/// Crossterm keeps the original console mode itself, so there is nothing to carry.
#[derive(Debug)]
pub struct PlatformSnapshot;

pub fn enable_raw_mode() -> miette::Result<PlatformSnapshot> {
    crossterm::terminal::enable_raw_mode().into_diagnostic()?;
    Ok(PlatformSnapshot)
}

pub fn restore_mode(_snapshot: &PlatformSnapshot) -> miette::Result<()> {
    crossterm::terminal::disable_raw_mode().into_diagnostic()
}
