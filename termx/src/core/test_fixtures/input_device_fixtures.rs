// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InputDevice, KeyEvent, KeyPressReader, StdMutex, TermxResult,
            lock_ignore_poison};
use std::{collections::VecDeque,
          io::{Read, Result},
          sync::Arc};

#[derive(Debug, Default)]
struct ChunkedReadState {
    chunks: VecDeque<Vec<u8>>,
    fail_next_read: bool,
}

/// A [`Read`] that hands out one pre-recorded chunk per `read` call, the way a terminal
/// delivers one key press per read. Once the chunks run out every read returns `Ok(0)`
/// (EOF). Cloning shares the queue, so a test can keep a handle after the mock is moved
/// into an [`InputDevice`].
#[derive(Clone, Debug, Default)]
pub struct ChunkedReadMock {
    state: Arc<StdMutex<ChunkedReadState>>,
}

impl ChunkedReadMock {
    #[must_use]
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            state: Arc::new(StdMutex::new(ChunkedReadState {
                chunks: chunks.into(),
                fail_next_read: false,
            })),
        }
    }

    pub fn push_chunk(&self, chunk: impl Into<Vec<u8>>) {
        lock_ignore_poison(&self.state).chunks.push_back(chunk.into());
    }

    /// Make the next `read` return an OS style error.
    pub fn fail_next_read(&self) { lock_ignore_poison(&self.state).fail_next_read = true; }

    #[must_use]
    pub fn remaining_chunks(&self) -> usize { lock_ignore_poison(&self.state).chunks.len() }
}

impl Read for ChunkedReadMock {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = lock_ignore_poison(&self.state);
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        }
        let Some(chunk) = state.chunks.pop_front() else {
            return Ok(0);
        };
        let count = chunk.len().min(buf.len());
        buf[..count].copy_from_slice(&chunk[..count]);
        Ok(count)
    }
}

pub trait InputDeviceExt {
    fn new_mock(chunks: Vec<Vec<u8>>) -> (InputDevice, ChunkedReadMock);
}

impl InputDeviceExt for InputDevice {
    fn new_mock(chunks: Vec<Vec<u8>>) -> (InputDevice, ChunkedReadMock) {
        let read_mock = ChunkedReadMock::new(chunks);
        let input_device = InputDevice {
            resource: Box::new(read_mock.clone()),
            is_mock: true,
        };
        (input_device, read_mock)
    }
}

/// Key presses that are already decoded. Reading past the end is an EOF error, the same
/// as a closed input stream.
#[derive(Debug, Default)]
pub struct KeyEventQueue {
    pub key_events: VecDeque<KeyEvent>,
}

impl KeyEventQueue {
    pub fn new(key_events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            key_events: key_events.into_iter().collect(),
        }
    }
}

impl KeyPressReader for KeyEventQueue {
    fn read_key_press(&mut self) -> TermxResult<KeyEvent> {
        self.key_events.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no more key events")
                .into()
        })
    }
}
