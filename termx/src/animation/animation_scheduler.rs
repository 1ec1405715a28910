// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AnimationOutputToken, DEVELOPMENT_MODE, OutputDevice, SafeBool, StdMutex,
            TermxError, TermxResult, TickRenderer, execute_commands_no_lock,
            lock_ignore_poison};
use crossterm::{style::Print,
                terminal::{Clear, ClearType}};
use std::{sync::Arc, time::Duration};
use tokio::{sync::broadcast, task::JoinHandle, time::interval};

pub const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(100);

/// How long [`AnimationScheduler::stop()`] waits for the task to paint its final line.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// What is left on the animation line once it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalLine {
    Clear,
    /// Painted after clearing, followed by a newline.
    Replace(String),
}

/// Repaints one line of the terminal on a fixed interval, from a tokio task.
///
/// While it runs, the scheduler holds the [`AnimationOutputToken`] of its
/// [`OutputDevice`], so foreground writes through the same device are held back until
/// [`Self::stop()`] returns.
///
/// ```no_run
/// use r3bl_termx::{AnimationScheduler, OutputDevice};
///
/// # async fn example() -> r3bl_termx::TermxResult<()> {
/// let mut scheduler = AnimationScheduler::new(OutputDevice::new_stdout());
/// scheduler.start(|frame_index: usize| format!("working {}", ".".repeat(frame_index % 4)))?;
/// // ... do the work ...
/// scheduler.stop().await;
/// # Ok(())
/// # }
/// ```
#[allow(missing_debug_implementations)]
pub struct AnimationScheduler {
    tick_delay: Duration,
    output_device: OutputDevice,
    safe_is_running: SafeBool,
    shutdown_sender: broadcast::Sender<FinalLine>,
    maybe_task: Option<JoinHandle<()>>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(output_device: OutputDevice) -> Self {
        let (shutdown_sender, _) = broadcast::channel(1);
        Self {
            tick_delay: DEFAULT_TICK_DELAY,
            output_device,
            safe_is_running: Arc::new(StdMutex::new(false)),
            shutdown_sender,
            maybe_task: None,
        }
    }

    /// Takes effect on the next [`Self::start()`].
    #[must_use]
    pub fn with_tick_delay(mut self, tick_delay: Duration) -> Self {
        self.tick_delay = tick_delay;
        self
    }

    #[must_use]
    pub fn tick_delay(&self) -> Duration { self.tick_delay }

    /// False once [`Self::stop()`] is called, or once the task gave up after failing to
    /// write a frame.
    #[must_use]
    pub fn is_running(&self) -> bool { *lock_ignore_poison(&self.safe_is_running) }

    /// Spawn the animation task. The first frame is painted right away.
    ///
    /// Returns `Ok(true)` when the animation is running after this call (including when
    /// it already was), and `Ok(false)` when another animation owns the output device.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] when called outside a tokio runtime.
    pub fn start(&mut self, renderer: impl TickRenderer) -> TermxResult<bool> {
        self.reap_finished_task();
        if self.is_running() {
            return Ok(true);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|error| TermxError::Io(std::io::Error::other(error)))?;

        let Some(token) = self.output_device.try_acquire_animation_token() else {
            return Ok(false);
        };

        *lock_ignore_poison(&self.safe_is_running) = true;

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(
                message = "animation scheduler started",
                tick_delay = ?self.tick_delay
            );
        });

        let task = AnimationTask {
            tick_delay: self.tick_delay,
            token,
            safe_is_running: self.safe_is_running.clone(),
            shutdown_receiver: self.shutdown_sender.subscribe(),
        };
        self.maybe_task = Some(runtime.spawn(task.run(renderer)));

        Ok(true)
    }

    /// Forget a task that already exited on its own, eg after a failed write.
    fn reap_finished_task(&mut self) {
        if self.maybe_task.as_ref().is_some_and(JoinHandle::is_finished) {
            self.maybe_task = None;
            *lock_ignore_poison(&self.safe_is_running) = false;
        }
    }

    /// Stop and leave the line cleared. Does nothing if not running.
    pub async fn stop(&mut self) { self.stop_with(FinalLine::Clear).await; }

    /// Stop, then leave `final_line` on the animation line. Waits up to
    /// [`STOP_TIMEOUT`] for the task to finish, then aborts it. Either way the output
    /// device is back in the foreground's hands when this returns.
    pub async fn stop_with(&mut self, final_line: FinalLine) {
        let Some(task) = self.maybe_task.take() else {
            return;
        };
        *lock_ignore_poison(&self.safe_is_running) = false;

        // Fails only if the task already exited, which is fine.
        self.shutdown_sender.send(final_line).ok();

        let abort_handle = task.abort_handle();
        if tokio::time::timeout(STOP_TIMEOUT, task).await.is_err() {
            tracing::warn!(message = "animation task did not stop in time, aborting it");
            abort_handle.abort();
        }

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "animation scheduler stopped");
        });
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        *lock_ignore_poison(&self.safe_is_running) = false;
        if let Some(task) = self.maybe_task.take() {
            task.abort();
        }
    }
}

/// Everything the spawned task owns.
struct AnimationTask {
    tick_delay: Duration,
    token: AnimationOutputToken,
    safe_is_running: SafeBool,
    shutdown_receiver: broadcast::Receiver<FinalLine>,
}

impl AnimationTask {
    async fn run(mut self, mut renderer: impl TickRenderer) {
        // A zero period panics in tokio.
        let mut interval = interval(self.tick_delay.max(Duration::from_millis(1)));
        let mut frame_index = 0;

        loop {
            tokio::select! {
                // Shutdown wins over a tick that is due at the same time.
                biased;

                // This branch is cancel safe because recv is cancel safe.
                result = self.shutdown_receiver.recv() => {
                    let final_line = result.unwrap_or(FinalLine::Clear);
                    if let Err(error) = paint_final_line(&self.token, &final_line) {
                        tracing::warn!(message = "failed to paint final line", error = %error);
                    }
                    break;
                }

                // This branch is cancel safe because tick is cancel safe.
                _ = interval.tick() => {
                    if !*lock_ignore_poison(&self.safe_is_running) {
                        continue;
                    }
                    let line = renderer.render_tick(frame_index);
                    if let Err(error) = paint_tick(&self.token, &line) {
                        tracing::warn!(message = "failed to paint frame", error = %error);
                        *lock_ignore_poison(&self.safe_is_running) = false;
                        break;
                    }
                    frame_index += 1;
                }
            }
        }

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "animation task exited", frames = frame_index);
        });
        // Dropping the token flushes the foreground writes held back meanwhile.
    }
}

fn paint_tick(token: &AnimationOutputToken, line: &str) -> std::io::Result<()> {
    let mut writer = token.lock();
    execute_commands_no_lock!(
        &mut *writer,
        Print("\r"),
        Clear(ClearType::CurrentLine),
        Print(line)
    );
    Ok(())
}

fn paint_final_line(token: &AnimationOutputToken, final_line: &FinalLine) -> std::io::Result<()> {
    let mut writer = token.lock();
    match final_line {
        FinalLine::Clear => {
            execute_commands_no_lock!(&mut *writer, Print("\r"), Clear(ClearType::CurrentLine));
        }
        FinalLine::Replace(text) => {
            execute_commands_no_lock!(
                &mut *writer,
                Print("\r"),
                Clear(ClearType::CurrentLine),
                Print(text),
                Print("\r\n")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDeviceExt, OutputOwner};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    /// Records each frame index it is asked for.
    fn recording_renderer() -> (impl TickRenderer, Arc<StdMutex<Vec<usize>>>) {
        let frames = Arc::new(StdMutex::new(vec![]));
        let frames_clone = frames.clone();
        let renderer = move |frame_index: usize| {
            lock_ignore_poison(&frames_clone).push(frame_index);
            format!("frame {frame_index}")
        };
        (renderer, frames)
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_then_cleared() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut scheduler = AnimationScheduler::new(output_device.clone());
        let (renderer, frames) = recording_renderer();

        assert!(scheduler.start(renderer).unwrap());
        assert!(scheduler.is_running());
        assert_eq!(output_device.current_owner(), OutputOwner::Animation);

        // Ticks at 0, 100 and 200 ms.
        tokio::time::sleep(Duration::from_millis(250)).await;
        scheduler.stop().await;

        assert_eq!(*lock_ignore_poison(&frames), vec![0, 1, 2]);
        assert!(!scheduler.is_running());
        assert_eq!(output_device.current_owner(), OutputOwner::Foreground);

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("frame 0"));
        assert!(output.contains("frame 2"));
        assert!(!output.contains("frame 3"));
        assert!(output.ends_with("\r\x1b[2K"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_line_replaces_animation() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut scheduler = AnimationScheduler::new(output_device);
        scheduler.start(|_| "busy".to_string()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler
            .stop_with(FinalLine::Replace("done".to_string()))
            .await;
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .ends_with("\r\x1b[2Kdone\r\n")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_are_idempotent() {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let mut scheduler = AnimationScheduler::new(output_device)
            .with_tick_delay(Duration::from_millis(10));
        let (renderer, frames) = recording_renderer();

        scheduler.stop().await;
        assert!(scheduler.start(renderer).unwrap());
        assert!(scheduler.start(|_| String::new()).unwrap());
        tokio::time::sleep(Duration::from_millis(25)).await;
        scheduler.stop().await;
        scheduler.stop().await;

        // The second start didn't replace the renderer.
        assert_eq!(*lock_ignore_poison(&frames), vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_animation_per_output_device() {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let mut first = AnimationScheduler::new(output_device.clone());
        let mut second = AnimationScheduler::new(output_device);

        assert!(first.start(|_| "first".to_string()).unwrap());
        assert!(!second.start(|_| "second".to_string()).unwrap());
        assert!(!second.is_running());

        first.stop().await;
        assert!(second.start(|_| "second".to_string()).unwrap());
        second.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreground_writes_wait_for_stop() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut scheduler = AnimationScheduler::new(output_device.clone());
        scheduler.start(|_| "spin".to_string()).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        output_device.lock().write_all(b"log line\n").unwrap();
        assert!(!stdout_mock.get_copy_of_buffer_as_string().contains("log line"));

        scheduler.stop().await;
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with("\r\x1b[2Klog line\n"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("terminal went away"))
        }

        fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_ends_animation() {
        let output_device = OutputDevice::new(Arc::new(StdMutex::new(FailingWriter)), true);
        let mut scheduler = AnimationScheduler::new(output_device.clone());
        let (renderer, frames) = recording_renderer();

        assert!(scheduler.start(renderer).unwrap());
        tokio::time::sleep(Duration::from_millis(250)).await;

        // The first frame failed, so the task is gone and the device is handed back.
        assert_eq!(*lock_ignore_poison(&frames), vec![0]);
        assert!(!scheduler.is_running());
        assert_eq!(output_device.current_owner(), OutputOwner::Foreground);

        // A new start spawns a fresh task, which fails the same way.
        let (renderer, frames) = recording_renderer();
        assert!(scheduler.start(renderer).unwrap());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*lock_ignore_poison(&frames), vec![0]);
        assert!(!scheduler.is_running());

        // Nothing left to stop.
        scheduler.stop().await;
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let mut scheduler = AnimationScheduler::new(output_device.clone());
        let result = scheduler.start(|_| String::new());
        assert!(matches!(result, Err(TermxError::Io(_))));
        assert_eq!(output_device.current_owner(), OutputOwner::Foreground);
    }
}
