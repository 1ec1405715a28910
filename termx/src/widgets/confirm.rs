// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Widget, run_widget_event_loop};
use crate::{ControlKey, EventLoopResult, FunctionComponent, KeyEvent, StyleSheet,
            TerminalIo, TerminalSession, TermxResult, render_row};

const CONFIRM_HELP: &str =
    "←→/Tab to toggle • Y/N shortcuts • Enter to confirm • Ctrl+C to cancel";

/// A yes or no question. `y` and `n` answer right away.
#[derive(Debug, Clone)]
pub struct Confirm {
    question: String,
    default_value: bool,
    style_sheet: StyleSheet,
}

impl Confirm {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default_value: false,
            style_sheet: StyleSheet::default(),
        }
    }

    /// Which answer is highlighted at the start. Defaults to No.
    #[must_use]
    pub fn with_default(mut self, value: bool) -> Self {
        self.default_value = value;
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }
}

fn on_keypress(value: &mut bool, key: KeyEvent) -> EventLoopResult<bool> {
    match key {
        KeyEvent::Control(ControlKey::Left | ControlKey::Right | ControlKey::Tab) => {
            *value = !*value;
            EventLoopResult::ContinueAndRerender
        }
        KeyEvent::Rune('y' | 'Y') => EventLoopResult::ExitWithResult(true),
        KeyEvent::Rune('n' | 'N') => EventLoopResult::ExitWithResult(false),
        KeyEvent::Control(ControlKey::Enter) => EventLoopResult::ExitWithResult(*value),
        KeyEvent::Control(ControlKey::Escape | ControlKey::CtrlC) => {
            EventLoopResult::ExitWithoutResult
        }
        _ => EventLoopResult::Continue,
    }
}

impl Widget for Confirm {
    type Output = bool;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<bool> {
        let mut value = self.default_value;
        let mut component = ConfirmComponent {
            question: &self.question,
            style_sheet: self.style_sheet,
        };
        run_widget_event_loop(io, &mut value, &mut component, on_keypress)
    }
}

struct ConfirmComponent<'a> {
    question: &'a str,
    style_sheet: StyleSheet,
}

impl FunctionComponent<bool> for ConfirmComponent<'_> {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(&mut self, session: &mut TerminalSession, value: &bool) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        render_row(session, 0, self.question, style_sheet.header_style)?;

        let (yes_style, no_style) = if *value {
            (style_sheet.focused_and_selected_style, style_sheet.unselected_style)
        } else {
            (style_sheet.unselected_style, style_sheet.focused_and_selected_style)
        };
        render_row(session, 2, "  Yes (Y)  ", yes_style)?;
        session.write("  ")?;
        session.write_styled("  No (N)  ", no_style)?;

        render_row(session, 4, CONFIRM_HELP, style_sheet.muted_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TermxError;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn run(default_value: bool, keys: &[&[u8]]) -> TermxResult<bool> {
        let (io, _, _) = TerminalIo::new_mock(keys.iter().map(|it| it.to_vec()).collect());
        Confirm::new("Continue?")
            .with_default(default_value)
            .with_style_sheet(StyleSheet::no_color())
            .run_with(io)
    }

    #[test_case(false, &[b"\r"], false ; "enter keeps default no")]
    #[test_case(true, &[b"\r"], true ; "enter keeps default yes")]
    #[test_case(false, &[b"\x1b[C", b"\r"], true ; "right toggles")]
    #[test_case(false, &[b"\t", b"\x1b[D", b"\r"], false ; "tab then left toggles back")]
    #[test_case(false, &[b"Y"], true ; "y shortcut")]
    #[test_case(true, &[b"n"], false ; "n shortcut")]
    #[test_case(true, &[b"x", b"\r"], true ; "other runes ignored")]
    fn test_answers(default_value: bool, keys: &[&[u8]], expected: bool) {
        assert_eq!(run(default_value, keys).unwrap(), expected);
    }

    #[test]
    fn test_cancel() {
        assert!(matches!(run(true, &[b"\x1b"]), Err(TermxError::Cancelled)));
        assert!(matches!(run(true, &[b"\x03"]), Err(TermxError::Cancelled)));
    }

    #[test]
    fn test_render() {
        let (io, stdout_mock, _) = TerminalIo::new_mock(vec![b"\r".to_vec()]);
        Confirm::new("Deploy?")
            .with_style_sheet(StyleSheet::no_color())
            .run_with(io)
            .unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("Deploy?"));
        assert!(output.contains("  Yes (Y)      No (N)  "));
        assert!(output.contains(CONFIRM_HELP));
    }
}
