// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{INPUT_READ_BUFFER_SIZE, SendRawInput};
use std::io::Read;

/// Source of raw key bytes. Each [`InputDevice::read_chunk`] is exactly one blocking
/// `read` on the underlying source, which is what the key decoder expects: a key press
/// arrives as one chunk.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: Box<SendRawInput>,
    pub is_mock: bool,
}

impl Default for InputDevice {
    fn default() -> Self { Self::new_stdin() }
}

impl InputDevice {
    #[must_use]
    pub fn new_stdin() -> Self {
        Self {
            resource: Box::new(std::io::stdin()),
            is_mock: false,
        }
    }

    /// Read at most [`INPUT_READ_BUFFER_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns the OS error from the underlying `read`. A return value of `Ok(0)` means
    /// EOF and is left to the caller to interpret.
    pub fn read_chunk(
        &mut self,
        buffer: &mut [u8; INPUT_READ_BUFFER_SIZE],
    ) -> std::io::Result<usize> {
        self.resource.read(buffer)
    }
}
