// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEVELOPMENT_MODE, InputDevice, OutputDevice, RawModeSnapshot, StdMutex,
            TTYResult, TermxError, TermxResult, enable_raw_mode, execute_commands,
            get_size_or_default, is_stdin_interactive, lock_ignore_poison, restore_mode};
use crossterm::{cursor::{Hide, MoveTo, Show},
                style::{ContentStyle, Print, PrintStyledContent},
                terminal::{Clear, ClearType}};
use std::sync::Arc;

/// Which terminal a [`TerminalSession`] drives.
#[derive(Debug, Clone, Default)]
pub enum TtyBackend {
    /// The process' controlling terminal.
    #[default]
    Real,
    /// An in-memory terminal, for tests.
    Mock(MockTty),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    Cooked,
    Raw,
}

#[derive(Debug)]
struct MockTtyState {
    mode: TerminalMode,
    raw_mode_entered_count: usize,
    restored_count: usize,
}

/// Records what a [`TerminalSession`] did to the terminal mode, without touching the
/// real one. Clones share state.
#[derive(Debug, Clone)]
pub struct MockTty {
    pub interactive: bool,
    pub size: (u16, u16),
    state: Arc<StdMutex<MockTtyState>>,
}

impl MockTty {
    #[must_use]
    pub fn new(interactive: bool, size: (u16, u16)) -> Self {
        Self {
            interactive,
            size,
            state: Arc::new(StdMutex::new(MockTtyState {
                mode: TerminalMode::Cooked,
                raw_mode_entered_count: 0,
                restored_count: 0,
            })),
        }
    }

    #[must_use]
    pub fn mode(&self) -> TerminalMode { lock_ignore_poison(&self.state).mode }

    #[must_use]
    pub fn raw_mode_entered_count(&self) -> usize {
        lock_ignore_poison(&self.state).raw_mode_entered_count
    }

    #[must_use]
    pub fn restored_count(&self) -> usize { lock_ignore_poison(&self.state).restored_count }
}

/// Pre-raw-mode state held by an initialized session.
#[derive(Debug)]
enum SessionSnapshot {
    Real(RawModeSnapshot),
    Mock(TerminalMode),
}

/// The devices a widget runs against. [`TerminalIo::default()`] is stdin, stdout and the
/// controlling terminal.
#[allow(missing_debug_implementations)]
#[derive(Default)]
pub struct TerminalIo {
    pub output_device: OutputDevice,
    pub input_device: InputDevice,
    pub tty: TtyBackend,
}

impl TerminalIo {
    /// In-memory terminal: `chunks` are the reads the widget will see, one per key press.
    #[must_use]
    pub fn new_mock(chunks: Vec<Vec<u8>>) -> (TerminalIo, crate::StdoutMock, MockTty) {
        use crate::{InputDeviceExt, OutputDeviceExt};
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (input_device, _) = InputDevice::new_mock(chunks);
        let mock_tty = MockTty::new(true, (80, 24));
        let io = TerminalIo {
            output_device,
            input_device,
            tty: TtyBackend::Mock(mock_tty.clone()),
        };
        (io, stdout_mock, mock_tty)
    }
}

/// Raw mode lifecycle and unbuffered drawing primitives for one widget invocation.
///
/// 1. [`Self::init()`] checks that stdin is a terminal, snapshots the terminal mode,
///    enters raw mode, hides the cursor and clears the screen.
/// 2. The drawing methods each emit their escape sequences and flush immediately.
/// 3. [`Self::restore()`] shows the cursor and puts the snapshot back. It runs at most
///    once per [`Self::init()`]; extra calls are no-ops. It also runs on drop, so early
///    returns, `?` and cancellation all leave the terminal usable.
#[allow(missing_debug_implementations)]
pub struct TerminalSession {
    output_device: OutputDevice,
    tty: TtyBackend,
    maybe_snapshot: Option<SessionSnapshot>,
    is_cursor_visible: bool,
}

impl TerminalSession {
    #[must_use]
    pub fn new(output_device: OutputDevice, tty: TtyBackend) -> Self {
        Self {
            output_device,
            tty,
            maybe_snapshot: None,
            is_cursor_visible: true,
        }
    }

    #[must_use]
    pub fn output_device(&self) -> &OutputDevice { &self.output_device }

    #[must_use]
    pub fn is_initialized(&self) -> bool { self.maybe_snapshot.is_some() }

    #[must_use]
    pub fn is_cursor_visible(&self) -> bool { self.is_cursor_visible }

    fn is_interactive(&self) -> bool {
        match &self.tty {
            TtyBackend::Real => is_stdin_interactive() == TTYResult::IsInteractive,
            TtyBackend::Mock(mock_tty) => mock_tty.interactive,
        }
    }

    /// # Errors
    ///
    /// - [`TermxError::NotATerminal`] if stdin is not an interactive terminal.
    /// - [`TermxError::Io`] if raw mode can't be entered or the screen can't be written.
    pub fn init(&mut self) -> TermxResult<()> {
        if self.is_initialized() {
            return Ok(());
        }
        if !self.is_interactive() {
            return Err(TermxError::NotATerminal);
        }

        let snapshot = match &self.tty {
            TtyBackend::Real => SessionSnapshot::Real(
                enable_raw_mode().map_err(|report| TermxError::from_report(&report))?,
            ),
            TtyBackend::Mock(mock_tty) => {
                let mut state = lock_ignore_poison(&mock_tty.state);
                let previous = state.mode;
                state.mode = TerminalMode::Raw;
                state.raw_mode_entered_count += 1;
                SessionSnapshot::Mock(previous)
            }
        };
        self.maybe_snapshot = Some(snapshot);

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "terminal session init", tty = ?self.tty);
        });

        self.hide_cursor()?;
        self.clear_screen()
    }

    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the cursor can't be shown or the terminal mode
    /// can't be reset. The snapshot is consumed either way, so a failed restore is not
    /// retried by [`Drop`].
    pub fn restore(&mut self) -> TermxResult<()> {
        let Some(snapshot) = self.maybe_snapshot.take() else {
            return Ok(());
        };

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "terminal session restore");
        });

        let show_cursor_result = self.show_cursor();

        match (snapshot, &self.tty) {
            (SessionSnapshot::Real(snapshot), _) => {
                restore_mode(&snapshot).map_err(|report| TermxError::from_report(&report))?;
            }
            (SessionSnapshot::Mock(previous), TtyBackend::Mock(mock_tty)) => {
                let mut state = lock_ignore_poison(&mock_tty.state);
                state.mode = previous;
                state.restored_count += 1;
            }
            (SessionSnapshot::Mock(_), TtyBackend::Real) => {}
        }

        show_cursor_result
    }

    /// Current width in columns. Queried every time.
    #[must_use]
    pub fn width(&self) -> u16 {
        match &self.tty {
            TtyBackend::Real => get_size_or_default().0,
            TtyBackend::Mock(mock_tty) => mock_tty.size.0,
        }
    }

    /// Current height in rows. Queried every time.
    #[must_use]
    pub fn height(&self) -> u16 {
        match &self.tty {
            TtyBackend::Real => get_size_or_default().1,
            TtyBackend::Mock(mock_tty) => mock_tty.size.1,
        }
    }
}

/// Drawing primitives. Every call flushes.
impl TerminalSession {
    /// 0-based column `x` and row `y`. Emits `ESC[row;colH`.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> TermxResult<()> {
        execute_commands!(self.output_device, MoveTo(x, y));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn write(&mut self, text: impl AsRef<str>) -> TermxResult<()> {
        execute_commands!(self.output_device, Print(text.as_ref()));
        Ok(())
    }

    /// Write `text` wrapped in the SGR sequences for `style`, followed by a reset.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn write_styled(
        &mut self,
        text: impl AsRef<str>,
        style: ContentStyle,
    ) -> TermxResult<()> {
        execute_commands!(
            self.output_device,
            PrintStyledContent(style.apply(text.as_ref()))
        );
        Ok(())
    }

    /// Raw mode turns off output post-processing, so a bare `\n` doesn't return the
    /// carriage.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn new_line(&mut self) -> TermxResult<()> { self.write("\r\n") }

    /// Emits `ESC[2K`. The cursor stays where it is.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn clear_line(&mut self) -> TermxResult<()> {
        execute_commands!(self.output_device, Clear(ClearType::CurrentLine));
        Ok(())
    }

    /// Emits `ESC[2J` and homes the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn clear_screen(&mut self) -> TermxResult<()> {
        execute_commands!(self.output_device, Clear(ClearType::All), MoveTo(0, 0));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn hide_cursor(&mut self) -> TermxResult<()> {
        execute_commands!(self.output_device, Hide);
        self.is_cursor_visible = false;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn show_cursor(&mut self) -> TermxResult<()> {
        execute_commands!(self.output_device, Show);
        self.is_cursor_visible = true;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Nowhere to report a failure from drop.
        self.restore().ok();
    }
}
