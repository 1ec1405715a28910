// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ControllerAction, EventLoopResult, FunctionComponent, KeyEvent,
            SelectionController, StyleSheet, TerminalIo, TerminalSession, TermxError,
            TermxResult, enter_event_loop_sync, render_row, truncate_to_width};
use crossterm::style::ContentStyle;

/// An interactive prompt that runs until the user commits a value or cancels.
///
/// ```no_run
/// use r3bl_termx::{Confirm, Widget};
///
/// let mut deploy = false;
/// // `deploy` is only written when the user answers.
/// Confirm::new("Deploy to production?").run_into(&mut deploy).ok();
/// ```
pub trait Widget {
    type Output;

    /// Run against the given devices. Tests pass [`TerminalIo::new_mock()`].
    ///
    /// # Errors
    ///
    /// - [`TermxError::Cancelled`] when the user presses Escape or `Ctrl+C`.
    /// - [`TermxError::NotATerminal`] when stdin is not a terminal.
    /// - [`TermxError::Io`] when the terminal can't be read or written.
    fn run_with(&mut self, io: TerminalIo) -> TermxResult<Self::Output>;

    /// Run against stdin, stdout and the controlling terminal.
    ///
    /// # Errors
    ///
    /// See [`Self::run_with()`].
    fn run(&mut self) -> TermxResult<Self::Output> { self.run_with(TerminalIo::default()) }

    /// Like [`Self::run()`], but writes the committed value into `out`. On any error
    /// `out` is left untouched.
    ///
    /// # Errors
    ///
    /// See [`Self::run_with()`].
    fn run_into(&mut self, out: &mut Self::Output) -> TermxResult<()> {
        *out = self.run()?;
        Ok(())
    }

    /// [`Self::run_into()`] against the given devices.
    ///
    /// # Errors
    ///
    /// See [`Self::run_with()`].
    fn run_with_into(&mut self, io: TerminalIo, out: &mut Self::Output) -> TermxResult<()> {
        *out = self.run_with(io)?;
        Ok(())
    }
}

/// Wire a widget's state and component to the devices in `io`, and turn
/// [`EventLoopResult::ExitWithoutResult`] into [`TermxError::Cancelled`].
///
/// # Errors
///
/// See [`Widget::run_with()`].
pub fn run_widget_event_loop<S, T>(
    io: TerminalIo,
    state: &mut S,
    function_component: &mut impl FunctionComponent<S>,
    on_keypress: impl FnMut(&mut S, KeyEvent) -> EventLoopResult<T>,
) -> TermxResult<T> {
    let TerminalIo {
        output_device,
        mut input_device,
        tty,
    } = io;
    let mut session = TerminalSession::new(output_device, tty);

    match enter_event_loop_sync(
        &mut session,
        state,
        function_component,
        on_keypress,
        &mut input_device,
    )? {
        EventLoopResult::ExitWithResult(it) => Ok(it),
        _ => Err(TermxError::Cancelled),
    }
}

/// The usual mapping from a [`SelectionController`] action to the event loop.
/// `on_confirm` builds the result once the controller has confirmed.
pub fn controller_action_to_result<T>(
    action: ControllerAction,
    controller: &SelectionController,
    on_confirm: impl FnOnce(&SelectionController) -> Option<T>,
) -> EventLoopResult<T> {
    match action {
        ControllerAction::Ignored => EventLoopResult::Continue,
        ControllerAction::Redraw | ControllerAction::OpenSubmenu(_) => {
            EventLoopResult::ContinueAndRerender
        }
        ControllerAction::Confirmed => match on_confirm(controller) {
            Some(it) => EventLoopResult::ExitWithResult(it),
            None => EventLoopResult::ExitWithoutResult,
        },
        ControllerAction::Cancelled => EventLoopResult::ExitWithoutResult,
    }
}

/// How one list row looks.
#[derive(Debug, Clone)]
pub struct RowDecoration {
    pub text: String,
    pub style: ContentStyle,
}

/// Draw the rows of `controller` that are inside its window starting at `row`, then a
/// "N more" line if rows are hidden below. Returns the next free row.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn render_list_window(
    session: &mut TerminalSession,
    mut row: u16,
    controller: &SelectionController,
    style_sheet: &StyleSheet,
    decorate: impl Fn(usize, bool) -> RowDecoration,
) -> TermxResult<u16> {
    let width = usize::from(session.width());
    let window = controller.window();

    for filtered_row in window.range() {
        let original_index = controller.filtered()[filtered_row];
        let is_focused = filtered_row == controller.cursor();
        let RowDecoration { text, style } = decorate(original_index, is_focused);
        render_row(session, row, truncate_to_width(&text, width), style)?;
        row += 1;
    }

    if window.hidden_below() > 0 {
        render_row(
            session,
            row,
            format!("  ... {} more", window.hidden_below()),
            style_sheet.muted_style,
        )?;
        row += 1;
    }

    Ok(row)
}

/// Draw `message` in the error style, if there is one. Returns the next free row.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn render_inline_error(
    session: &mut TerminalSession,
    row: u16,
    maybe_message: Option<&str>,
    style_sheet: &StyleSheet,
) -> TermxResult<u16> {
    match maybe_message {
        Some(message) => {
            render_row(session, row, format!("✗ {message}"), style_sheet.error_style)?;
            Ok(row + 1)
        }
        None => Ok(row),
    }
}
