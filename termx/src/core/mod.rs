// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod common;
pub mod input_decoder;
pub mod log;
pub mod style;
pub mod term;
pub mod terminal_io;
pub mod terminal_raw_mode;
pub mod terminal_session;
pub mod test_fixtures;

// Re-export.
pub use common::*;
pub use input_decoder::*;
pub use log::*;
pub use style::*;
pub use term::*;
pub use terminal_io::*;
pub use terminal_raw_mode::*;
pub use terminal_session::*;
pub use test_fixtures::*;
