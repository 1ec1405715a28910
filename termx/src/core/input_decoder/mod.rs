// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod decode_key_event;
pub mod key_event;
pub mod key_press_reader;

// Re-export.
pub use decode_key_event::*;
pub use key_event::*;
pub use key_press_reader::*;
