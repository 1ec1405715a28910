// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::StdMutex;
use std::sync::Arc;

/// Type alias for a `Send`-able output device (stdout, stderr, [`crate::StdoutMock`]).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able raw terminal wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

/// Type alias for a `Send`-able input source (stdin, [`crate::ChunkedReadMock`]).
pub type SendRawInput = dyn std::io::Read + Send;

/// Largest chunk read from the input source in one call.
pub const INPUT_READ_BUFFER_SIZE: usize = 256;
