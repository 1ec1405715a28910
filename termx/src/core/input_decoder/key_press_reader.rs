// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{KeyEvent, read_key_event};
use crate::{InputDevice, TermxResult};

/// Where the foreground event loop gets its next key press from. This is the only place
/// the loop blocks.
pub trait KeyPressReader {
    /// # Errors
    ///
    /// Returns [`crate::TermxError::Io`] when no further key press can be read. The event
    /// loop ends on the first error.
    fn read_key_press(&mut self) -> TermxResult<KeyEvent>;
}

impl KeyPressReader for InputDevice {
    fn read_key_press(&mut self) -> TermxResult<KeyEvent> { read_key_event(self) }
}
