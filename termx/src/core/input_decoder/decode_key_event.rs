// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte chunk to [`KeyEvent`].
//!
//! The decoder is stateless: each chunk is decoded on its own, nothing carries over to
//! the next read. A CSI sequence that arrives split across two reads (eg `ESC` then
//! `[A`) decodes as two [`KeyEvent::Unknown`] events rather than one arrow key. Local
//! terminals deliver a key press in a single read, so this only shows up over slow or
//! fragmented links.

use super::{ControlKey, KeyEvent};
use crate::{DEVELOPMENT_MODE, INPUT_READ_BUFFER_SIZE, InputDevice, TermxResult};

pub const ASCII_ESC: u8 = 0x1b;
pub const ASCII_DEL: u8 = 0x7f;
pub const ASCII_BS: u8 = 0x08;
pub const ASCII_ETX: u8 = 0x03;
pub const ASCII_EOT: u8 = 0x04;
pub const ASCII_SPACE: u8 = b' ';
pub const ASCII_TILDE: u8 = b'~';
pub const CSI_BRACKET: u8 = b'[';

/// Decode one chunk of bytes, as returned by a single read.
#[must_use]
pub fn decode_key_event(bytes: &[u8]) -> KeyEvent {
    let maybe_decoded = match bytes {
        [single] => decode_single_byte(*single),
        [ASCII_ESC, CSI_BRACKET, params @ ..] if !params.is_empty() => {
            decode_csi_params(params).map(KeyEvent::Control)
        }
        _ => None,
    };
    maybe_decoded.unwrap_or_else(|| KeyEvent::Unknown(bytes.to_vec()))
}

fn decode_single_byte(byte: u8) -> Option<KeyEvent> {
    let key = match byte {
        b'\r' | b'\n' => ControlKey::Enter,
        b'\t' => ControlKey::Tab,
        ASCII_DEL | ASCII_BS => ControlKey::Backspace,
        ASCII_ESC => ControlKey::Escape,
        ASCII_ETX => ControlKey::CtrlC,
        ASCII_EOT => ControlKey::CtrlD,
        ASCII_SPACE => ControlKey::Space,
        b'!'..=ASCII_TILDE => return Some(KeyEvent::Rune(char::from(byte))),
        _ => return None,
    };
    Some(KeyEvent::Control(key))
}

/// `params` is everything after `ESC [`.
fn decode_csi_params(params: &[u8]) -> Option<ControlKey> {
    match params {
        [b'A', ..] => Some(ControlKey::Up),
        [b'B', ..] => Some(ControlKey::Down),
        [b'C', ..] => Some(ControlKey::Right),
        [b'D', ..] => Some(ControlKey::Left),
        [b'H', ..] => Some(ControlKey::Home),
        [b'F', ..] => Some(ControlKey::End),
        [b'3', ASCII_TILDE, ..] => Some(ControlKey::Delete),
        [b'5', ASCII_TILDE, ..] => Some(ControlKey::PageUp),
        [b'6', ASCII_TILDE, ..] => Some(ControlKey::PageDown),
        _ => None,
    }
}

/// Block on one read from `input_device` and decode it.
///
/// # Errors
///
/// Returns [`crate::TermxError::Io`] if the read fails or returns zero bytes (EOF). There
/// is no retry.
pub fn read_key_event(input_device: &mut InputDevice) -> TermxResult<KeyEvent> {
    let mut buffer = [0_u8; INPUT_READ_BUFFER_SIZE];
    let bytes_read = input_device.read_chunk(&mut buffer)?;
    if bytes_read == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input stream closed",
        )
        .into());
    }

    let key_event = decode_key_event(&buffer[..bytes_read]);

    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "decoded key event", key_event = ?key_event);
    });

    Ok(key_event)
}
