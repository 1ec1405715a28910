// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEVELOPMENT_MODE, SafeRawTerminal, SendRawTerminal, StdMutex,
            lock_ignore_poison};
use std::{io::Write,
          sync::{Arc, MutexGuard}};

/// Macro to simplify locking and getting a mutable reference to the output device.
/// Don't call this again in the same scope, it will deadlock! A safe approach is
/// to use this macro in a separate block scope.
///
/// ```
/// use std::io::Write;
/// use r3bl_termx::{lock_output_device_as_mut, OutputDevice};
/// let device = OutputDevice::new_stdout();
/// {
///     let mut_ref = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"Hello, world!\n");
/// }
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut $device.lock()
    };
}

/// Who is allowed to write to the terminal right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOwner {
    /// The widget event loop (the default).
    Foreground,
    /// A running [`crate::AnimationScheduler`], which holds an [`AnimationOutputToken`].
    Animation,
}

#[derive(Debug)]
struct OutputOwnership {
    owner: OutputOwner,
    /// Foreground bytes written while the animation owns the line.
    pause_buffer: Vec<u8>,
}

type SafeOutputOwnership = Arc<StdMutex<OutputOwnership>>;

/// This struct represents an output device that can be used to write to the terminal.
/// - It is safe to clone. Clones share the writer and the ownership state.
/// - Foreground code writes with [`Self::lock()`] or [`lock_output_device_as_mut`].
/// - A background animation writes through an [`AnimationOutputToken`] obtained from
///   [`Self::try_acquire_animation_token()`]. While that token is alive, foreground writes
///   are held back in a pause buffer, and they are flushed in order when the token is
///   dropped. Only one token can exist at a time.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
    ownership: SafeOutputOwnership,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self::new(Arc::new(StdMutex::new(std::io::stdout())), false)
    }

    #[must_use]
    pub fn new_stderr() -> Self {
        Self::new(Arc::new(StdMutex::new(std::io::stderr())), false)
    }

    #[must_use]
    pub fn new(resource: SafeRawTerminal, is_mock: bool) -> Self {
        Self {
            resource,
            is_mock,
            ownership: Arc::new(StdMutex::new(OutputOwnership {
                owner: OutputOwner::Foreground,
                pause_buffer: Vec::new(),
            })),
        }
    }
}

impl OutputDevice {
    /// Locks the output device for a foreground write.
    ///
    /// ```
    /// use std::io::Write;
    /// use r3bl_termx::OutputDevice;
    ///
    /// let device = OutputDevice::new_stdout();
    /// let _ = device.lock().write_all(b"Hello, world!\n");
    /// ```
    ///
    /// The returned writer holds the ownership lock for its lifetime, so ownership can't
    /// change in the middle of a foreground write sequence.
    pub fn lock(&self) -> ForegroundWriter<'_> {
        ForegroundWriter {
            ownership: lock_ignore_poison(&self.ownership),
            resource: &self.resource,
        }
    }

    #[must_use]
    pub fn current_owner(&self) -> OutputOwner { lock_ignore_poison(&self.ownership).owner }

    /// Hand the terminal to a background animation. Returns [None] if an animation
    /// already holds it.
    #[must_use]
    pub fn try_acquire_animation_token(&self) -> Option<AnimationOutputToken> {
        let mut ownership = lock_ignore_poison(&self.ownership);
        if ownership.owner == OutputOwner::Animation {
            return None;
        }
        ownership.owner = OutputOwner::Animation;

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "output handed to animation");
        });

        Some(AnimationOutputToken {
            resource: self.resource.clone(),
            ownership: self.ownership.clone(),
        })
    }
}

/// Foreground [`Write`] handle returned by [`OutputDevice::lock()`]. Writes go straight
/// to the terminal, unless an animation currently owns it, in which case they are
/// buffered until the animation hands the terminal back.
#[allow(missing_debug_implementations)]
pub struct ForegroundWriter<'a> {
    ownership: MutexGuard<'a, OutputOwnership>,
    resource: &'a SafeRawTerminal,
}

impl Write for ForegroundWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.ownership.owner {
            OutputOwner::Foreground => lock_ignore_poison(self.resource).write(buf),
            OutputOwner::Animation => {
                self.ownership.pause_buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.ownership.owner {
            OutputOwner::Foreground => lock_ignore_poison(self.resource).flush(),
            OutputOwner::Animation => Ok(()),
        }
    }
}

/// Exclusive right to write to the terminal, held by a running animation. Dropping it
/// returns ownership to the foreground and flushes whatever the foreground wrote in the
/// meantime.
#[allow(missing_debug_implementations)]
pub struct AnimationOutputToken {
    resource: SafeRawTerminal,
    ownership: SafeOutputOwnership,
}

impl AnimationOutputToken {
    pub fn lock(&self) -> MutexGuard<'_, SendRawTerminal> { lock_ignore_poison(&self.resource) }

    /// # Errors
    ///
    /// Returns the error from the underlying writer.
    pub fn write_all_and_flush(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(bytes)?;
        writer.flush()
    }
}

impl Drop for AnimationOutputToken {
    fn drop(&mut self) {
        let mut ownership = lock_ignore_poison(&self.ownership);
        ownership.owner = OutputOwner::Foreground;
        let pending = std::mem::take(&mut ownership.pause_buffer);

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(
                message = "output handed back to foreground",
                pending_bytes = pending.len()
            );
        });

        if !pending.is_empty() {
            let mut writer = lock_ignore_poison(&self.resource);
            // Nowhere to report a failure from drop.
            writer.write_all(&pending).ok();
            writer.flush().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputDeviceExt;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stdout_output_device_is_not_mock() {
        let device = OutputDevice::new_stdout();
        assert!(!device.is_mock);
        assert_eq!(device.current_owner(), OutputOwner::Foreground);
    }

    #[test]
    fn test_foreground_write_goes_straight_through() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        lock_output_device_as_mut!(device).write_all(b"hello").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "hello");
    }

    #[test]
    fn test_only_one_animation_token_at_a_time() {
        let (device, _stdout_mock) = OutputDevice::new_mock();
        let token = device.try_acquire_animation_token();
        assert!(token.is_some());
        assert!(device.clone().try_acquire_animation_token().is_none());
        drop(token);
        assert!(device.try_acquire_animation_token().is_some());
    }

    #[test]
    fn test_foreground_writes_are_held_until_token_is_dropped() {
        let (device, stdout_mock) = OutputDevice::new_mock();

        let token = device.try_acquire_animation_token().unwrap();
        assert_eq!(device.current_owner(), OutputOwner::Animation);

        token.write_all_and_flush(b"[frame]").unwrap();
        device.lock().write_all(b"[foreground]").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "[frame]");

        drop(token);
        assert_eq!(device.current_owner(), OutputOwner::Foreground);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "[frame][foreground]"
        );
    }
}
