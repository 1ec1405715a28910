// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode lifecycle of [`TerminalSession`] against mock and real terminals.

use pretty_assertions::assert_eq;
use r3bl_termx::{MockTty, OutputDevice, OutputDeviceExt, TerminalMode, TerminalSession,
                 TermxError, TtyBackend};
use serial_test::serial;

#[test]
fn test_init_then_restore_twice() {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let mock_tty = MockTty::new(true, (120, 40));
    let mut session = TerminalSession::new(output_device, TtyBackend::Mock(mock_tty.clone()));

    session.init().unwrap();
    assert_eq!(mock_tty.mode(), TerminalMode::Raw);
    assert!(!session.is_cursor_visible());
    assert_eq!((session.width(), session.height()), (120, 40));
    assert_eq!(
        stdout_mock.get_copy_of_buffer_as_string(),
        "\x1b[?25l\x1b[2J\x1b[1;1H"
    );

    session.restore().unwrap();
    session.restore().unwrap();
    assert_eq!(mock_tty.mode(), TerminalMode::Cooked);
    assert_eq!(mock_tty.restored_count(), 1);
    assert!(session.is_cursor_visible());

    // Dropping an already restored session does nothing more.
    drop(session);
    assert_eq!(mock_tty.restored_count(), 1);
}

#[test]
fn test_drop_restores() {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let mock_tty = MockTty::new(true, (80, 24));
    {
        let mut session =
            TerminalSession::new(output_device, TtyBackend::Mock(mock_tty.clone()));
        session.init().unwrap();
        session.write("partial").unwrap();
    }
    assert_eq!(mock_tty.mode(), TerminalMode::Cooked);
    assert_eq!(mock_tty.restored_count(), 1);
    assert!(stdout_mock.get_copy_of_buffer_as_string().ends_with("partial\x1b[?25h"));
}

#[test]
fn test_non_interactive_is_rejected() {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let mock_tty = MockTty::new(false, (80, 24));
    let mut session = TerminalSession::new(output_device, TtyBackend::Mock(mock_tty.clone()));

    assert!(matches!(session.init(), Err(TermxError::NotATerminal)));
    assert!(!session.is_initialized());
    assert_eq!(mock_tty.raw_mode_entered_count(), 0);
    assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");

    // Nothing to restore.
    session.restore().unwrap();
    assert_eq!(mock_tty.restored_count(), 0);
}

/// Under `cargo test` stdin is usually not a terminal. When it is, the session must
/// still round trip cleanly.
#[serial]
#[test]
fn test_real_terminal() {
    let (output_device, _stdout_mock) = OutputDevice::new_mock();
    let mut session = TerminalSession::new(output_device, TtyBackend::Real);
    match session.init() {
        Err(TermxError::NotATerminal) => assert!(!session.is_initialized()),
        Ok(()) => {
            assert!(session.is_initialized());
            session.restore().unwrap();
            assert!(!session.is_initialized());
        }
        Err(error) => panic!("unexpected error: {error}"),
    }
}
