// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// One decoded read from the input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Control(ControlKey),
    /// Printable ASCII, `!` through `~`. Space is [`ControlKey::Space`].
    Rune(char),
    /// Anything the decoder doesn't recognize, with the bytes that were read.
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ControlKey {
    #[strum(serialize = "↑")]
    Up,
    #[strum(serialize = "↓")]
    Down,
    #[strum(serialize = "←")]
    Left,
    #[strum(serialize = "→")]
    Right,
    Enter,
    #[strum(serialize = "Esc")]
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    #[strum(serialize = "PgUp")]
    PageUp,
    #[strum(serialize = "PgDn")]
    PageDown,
    #[strum(serialize = "Ctrl+C")]
    CtrlC,
    #[strum(serialize = "Ctrl+D")]
    CtrlD,
    Space,
}

impl From<ControlKey> for KeyEvent {
    fn from(key: ControlKey) -> Self { KeyEvent::Control(key) }
}

impl KeyEvent {
    #[must_use]
    pub fn is_control(&self, key: ControlKey) -> bool {
        matches!(self, KeyEvent::Control(it) if *it == key)
    }
}
