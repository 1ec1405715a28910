// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{StyleSheet, TerminalSession, TermxResult};
use crossterm::style::ContentStyle;

/// The rendering half of a widget. The event loop owns the [`TerminalSession`] and
/// hands it to [`Self::render()`] after every key press that changed `S`.
pub trait FunctionComponent<S> {
    fn get_style_sheet(&self) -> &StyleSheet;

    /// Draw the whole widget for `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    fn render(&mut self, session: &mut TerminalSession, state: &S) -> TermxResult<()>;

    /// Wipe whatever [`Self::render()`] drew. Called once when the event loop exits.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    fn clear_viewport(&mut self, session: &mut TerminalSession, _state: &S) -> TermxResult<()> {
        session.clear_screen()
    }
}

/// Draw one row of a widget, starting at column 0 of `row`.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn render_row(
    session: &mut TerminalSession,
    row: u16,
    text: impl AsRef<str>,
    style: ContentStyle,
) -> TermxResult<()> {
    session.move_cursor(0, row)?;
    session.clear_line()?;
    session.write_styled(text, style)
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut it: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    it.push('…');
    it
}
