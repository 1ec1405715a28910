// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Queue crossterm commands on the foreground output device, locking it once per
/// command. Nothing is flushed, see [`execute_commands!`] for that.
#[macro_export]
macro_rules! queue_commands {
    ($output_device:expr $(, $command:expr)* $(,)?) => {{
        $(
            ::crossterm::QueueableCommand::queue(
                $crate::lock_output_device_as_mut!($output_device),
                $command
            )?;
        )*
    }}
}

/// Queue crossterm commands on the foreground output device and flush it right away.
/// This is how every drawing primitive in [`crate::TerminalSession`] reaches the
/// terminal, so nothing is ever left sitting in a buffer between key presses.
#[macro_export]
macro_rules! execute_commands {
    ($output_device:expr $(, $command:expr)* $(,)?) => {{
        {
            let mut writer = $output_device.lock();
            $(
                ::crossterm::QueueableCommand::queue(&mut writer, $command)?;
            )*
            ::std::io::Write::flush(&mut writer)?;
        }
    }}
}

/// Same as [`execute_commands!`] but for a writer that is already locked, eg the guard
/// returned by [`crate::AnimationOutputToken::lock()`].
#[macro_export]
macro_rules! execute_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        $(
            ::crossterm::QueueableCommand::queue($writer, $command)?;
        )*
        ::std::io::Write::flush($writer)?;
    }}
}
