// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::FunctionComponent;
use crate::{DEVELOPMENT_MODE, KeyEvent, KeyPressReader, TerminalSession, TermxResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLoopResult<T> {
    Continue,
    ContinueAndRerender,
    ExitWithResult(T),
    ExitWithoutResult,
}

/// Run one widget to completion:
/// 1. initialize the session (raw mode, hidden cursor, clear screen),
/// 2. render once,
/// 3. block on one key press at a time, pass it to `on_keypress`, rerender when asked,
/// 4. clear the viewport and restore the session.
///
/// Returns [`EventLoopResult::ExitWithResult`] or [`EventLoopResult::ExitWithoutResult`].
///
/// # Errors
///
/// - [`crate::TermxError::NotATerminal`] from [`TerminalSession::init()`].
/// - [`crate::TermxError::Io`] when a key press can't be read or the terminal can't be
///   written. There is no retry. The session is restored before the error is returned.
pub fn enter_event_loop_sync<S, T>(
    session: &mut TerminalSession,
    state: &mut S,
    function_component: &mut impl FunctionComponent<S>,
    mut on_keypress: impl FnMut(&mut S, KeyEvent) -> EventLoopResult<T>,
    key_press_reader: &mut impl KeyPressReader,
) -> TermxResult<EventLoopResult<T>> {
    session.init()?;

    let result = run_event_loop(
        session,
        state,
        function_component,
        &mut on_keypress,
        key_press_reader,
    );

    // Restore even if the loop failed, then report the first error.
    let restore_result = session.restore();
    let return_this = result?;
    restore_result?;

    Ok(return_this)
}

fn run_event_loop<S, T>(
    session: &mut TerminalSession,
    state: &mut S,
    function_component: &mut impl FunctionComponent<S>,
    on_keypress: &mut impl FnMut(&mut S, KeyEvent) -> EventLoopResult<T>,
    key_press_reader: &mut impl KeyPressReader,
) -> TermxResult<EventLoopResult<T>> {
    // First render before blocking the main thread for user input.
    function_component.render(session, state)?;

    loop {
        let key_event = key_press_reader.read_key_press()?;

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "event loop key press", key_event = ?key_event);
        });

        match on_keypress(state, key_event) {
            EventLoopResult::Continue => {}
            EventLoopResult::ContinueAndRerender => {
                function_component.render(session, state)?;
            }
            EventLoopResult::ExitWithResult(it) => {
                function_component.clear_viewport(session, state)?;
                return Ok(EventLoopResult::ExitWithResult(it));
            }
            EventLoopResult::ExitWithoutResult => {
                function_component.clear_viewport(session, state)?;
                return Ok(EventLoopResult::ExitWithoutResult);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControlKey, KeyEventQueue, MockTty, OutputDevice, OutputDeviceExt,
                StyleSheet, TerminalMode, TtyBackend};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Counter {
        count: usize,
        render_count: usize,
    }

    struct CounterComponent {
        style_sheet: StyleSheet,
    }

    impl FunctionComponent<Counter> for CounterComponent {
        fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

        fn render(
            &mut self,
            session: &mut TerminalSession,
            state: &Counter,
        ) -> TermxResult<()> {
            session.write(format!("count={}", state.count))
        }
    }

    fn on_keypress(state: &mut Counter, key_event: KeyEvent) -> EventLoopResult<usize> {
        match key_event {
            KeyEvent::Control(ControlKey::Up) => {
                state.count += 1;
                state.render_count += 1;
                EventLoopResult::ContinueAndRerender
            }
            KeyEvent::Control(ControlKey::Enter) => EventLoopResult::ExitWithResult(state.count),
            KeyEvent::Control(ControlKey::Escape) => EventLoopResult::ExitWithoutResult,
            _ => EventLoopResult::Continue,
        }
    }

    fn new_session() -> (TerminalSession, crate::StdoutMock, MockTty) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mock_tty = MockTty::new(true, (80, 24));
        let session = TerminalSession::new(output_device, TtyBackend::Mock(mock_tty.clone()));
        (session, stdout_mock, mock_tty)
    }

    #[test]
    fn test_exit_with_result() {
        let (mut session, stdout_mock, mock_tty) = new_session();
        let mut state = Counter::default();
        let mut component = CounterComponent {
            style_sheet: StyleSheet::no_color(),
        };
        let mut reader = KeyEventQueue::new([
            ControlKey::Up.into(),
            KeyEvent::Rune('x'),
            ControlKey::Up.into(),
            ControlKey::Enter.into(),
        ]);

        let result = enter_event_loop_sync(
            &mut session,
            &mut state,
            &mut component,
            on_keypress,
            &mut reader,
        )
        .unwrap();

        assert_eq!(result, EventLoopResult::ExitWithResult(2));
        assert_eq!(state.render_count, 2);
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("count=0count=1count=2"));
        assert_eq!(mock_tty.mode(), TerminalMode::Cooked);
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_exit_without_result() {
        let (mut session, _stdout_mock, _mock_tty) = new_session();
        let mut reader = KeyEventQueue::new([ControlKey::Escape.into()]);
        let result = enter_event_loop_sync(
            &mut session,
            &mut Counter::default(),
            &mut CounterComponent {
                style_sheet: StyleSheet::default(),
            },
            on_keypress,
            &mut reader,
        )
        .unwrap();
        assert_eq!(result, EventLoopResult::ExitWithoutResult);
    }

    #[test]
    fn test_read_error_restores_session() {
        let (mut session, _stdout_mock, mock_tty) = new_session();
        let mut reader = KeyEventQueue::new([ControlKey::Up.into()]);
        let result = enter_event_loop_sync(
            &mut session,
            &mut Counter::default(),
            &mut CounterComponent {
                style_sheet: StyleSheet::default(),
            },
            on_keypress,
            &mut reader,
        );
        assert!(result.unwrap_err().is_fatal());
        assert_eq!(mock_tty.mode(), TerminalMode::Cooked);
        assert_eq!(mock_tty.restored_count(), 1);
        assert!(session.is_cursor_visible());
    }

    #[test]
    fn test_not_a_terminal_never_renders() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mock_tty = MockTty::new(false, (80, 24));
        let mut session = TerminalSession::new(output_device, TtyBackend::Mock(mock_tty));
        let mut reader = KeyEventQueue::new([]);
        let result = enter_event_loop_sync(
            &mut session,
            &mut Counter::default(),
            &mut CounterComponent {
                style_sheet: StyleSheet::default(),
            },
            on_keypress,
            &mut reader,
        );
        assert!(matches!(result, Err(crate::TermxError::NotATerminal)));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
    }
}
