// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Widget, render_inline_error, run_widget_event_loop};
use crate::{ControlKey, EventLoopResult, FunctionComponent, KeyEvent, StyleSheet,
            TerminalIo, TerminalSession, TermxResult, render_row};

/// Checks a text value. The `Err` message is shown under the input.
pub type TextValidator = Box<dyn Fn(&str) -> Result<(), String>>;

pub const PASSWORD_MASK: char = '•';
const PROMPT: &str = "> ";
const TEXT_INPUT_HELP: &str = "Enter to confirm • Ctrl+C to cancel";

/// A single line of text with a movable cursor.
///
/// ```no_run
/// use r3bl_termx::{TextInput, Widget, validators};
///
/// let email = TextInput::new("Email")
///     .with_placeholder("you@example.com")
///     .with_validator(validators::email())
///     .run();
/// ```
#[allow(missing_debug_implementations)]
pub struct TextInput {
    label: String,
    placeholder: Option<String>,
    initial_value: String,
    max_length: Option<usize>,
    is_password: bool,
    validators: Vec<TextValidator>,
    style_sheet: StyleSheet,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: None,
            initial_value: String::new(),
            max_length: None,
            is_password: false,
            validators: vec![],
            style_sheet: StyleSheet::default(),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Characters past `max_length` are not inserted.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Show [`PASSWORD_MASK`] for each character.
    #[must_use]
    pub fn as_password(mut self) -> Self {
        self.is_password = true;
        self
    }

    /// Validators run in the order they were added. The first error wins.
    #[must_use]
    pub fn with_validator(mut self, validator: TextValidator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }
}

/// Ready made [`TextValidator`]s.
pub mod validators {
    use super::TextValidator;

    /// Rejects values that are empty after trimming.
    #[must_use]
    pub fn required(message: impl Into<String>) -> TextValidator {
        let message = message.into();
        Box::new(move |value| {
            if value.trim().is_empty() {
                Err(message.clone())
            } else {
                Ok(())
            }
        })
    }

    #[must_use]
    pub fn min_length(min: usize) -> TextValidator {
        Box::new(move |value| {
            if value.chars().count() < min {
                Err(format!("must be at least {min} characters"))
            } else {
                Ok(())
            }
        })
    }

    #[must_use]
    pub fn max_length(max: usize) -> TextValidator {
        Box::new(move |value| {
            if value.chars().count() > max {
                Err(format!("must be at most {max} characters"))
            } else {
                Ok(())
            }
        })
    }

    /// Only checks for an `@` followed somewhere by a `.`.
    #[must_use]
    pub fn email() -> TextValidator {
        Box::new(|value| match value.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
            _ => Err("invalid email format".to_string()),
        })
    }
}

#[derive(Debug, Default)]
struct TextInputState {
    buffer: Vec<char>,
    cursor: usize,
    max_length: Option<usize>,
    error: Option<String>,
}

impl TextInputState {
    fn value(&self) -> String { self.buffer.iter().collect() }

    fn insert(&mut self, ch: char) -> bool {
        if self.max_length.is_some_and(|max| self.buffer.len() >= max) {
            return false;
        }
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    fn edit(&mut self, key: &KeyEvent) -> bool {
        match key {
            KeyEvent::Rune(ch) => self.insert(*ch),
            KeyEvent::Control(ControlKey::Space) => self.insert(' '),
            KeyEvent::Control(ControlKey::Backspace) if self.cursor > 0 => {
                self.cursor -= 1;
                self.buffer.remove(self.cursor);
                true
            }
            KeyEvent::Control(ControlKey::Delete) if self.cursor < self.buffer.len() => {
                self.buffer.remove(self.cursor);
                true
            }
            _ => false,
        }
    }

    fn move_cursor(&mut self, key: &KeyEvent) -> bool {
        let new_cursor = match key {
            KeyEvent::Control(ControlKey::Left) => self.cursor.saturating_sub(1),
            KeyEvent::Control(ControlKey::Right) => (self.cursor + 1).min(self.buffer.len()),
            KeyEvent::Control(ControlKey::Home) => 0,
            KeyEvent::Control(ControlKey::End) => self.buffer.len(),
            _ => return false,
        };
        let moved = new_cursor != self.cursor;
        self.cursor = new_cursor;
        moved
    }
}

impl Widget for TextInput {
    type Output = String;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<String> {
        let buffer: Vec<char> = match self.max_length {
            Some(max) => self.initial_value.chars().take(max).collect(),
            None => self.initial_value.chars().collect(),
        };
        let mut state = TextInputState {
            cursor: buffer.len(),
            buffer,
            max_length: self.max_length,
            error: None,
        };
        let mut component = TextInputComponent {
            label: &self.label,
            placeholder: self.placeholder.as_deref(),
            is_password: self.is_password,
            style_sheet: self.style_sheet,
        };
        let validators = &self.validators;

        run_widget_event_loop(io, &mut state, &mut component, |state, key| match key {
            KeyEvent::Control(ControlKey::CtrlC | ControlKey::Escape) => {
                EventLoopResult::ExitWithoutResult
            }
            KeyEvent::Control(ControlKey::Enter) => {
                let value = state.value();
                match validators.iter().find_map(|validator| validator(&value).err()) {
                    Some(message) => {
                        state.error = Some(message);
                        EventLoopResult::ContinueAndRerender
                    }
                    None => EventLoopResult::ExitWithResult(value),
                }
            }
            _ if state.edit(&key) => {
                state.error = None;
                EventLoopResult::ContinueAndRerender
            }
            _ if state.move_cursor(&key) => EventLoopResult::ContinueAndRerender,
            _ => EventLoopResult::Continue,
        })
    }
}

struct TextInputComponent<'a> {
    label: &'a str,
    placeholder: Option<&'a str>,
    is_password: bool,
    style_sheet: StyleSheet,
}

impl FunctionComponent<TextInputState> for TextInputComponent<'_> {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(
        &mut self,
        session: &mut TerminalSession,
        state: &TextInputState,
    ) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;
        session.show_cursor()?;

        render_row(session, 0, self.label, style_sheet.header_style)?;

        match (state.buffer.is_empty(), self.placeholder) {
            (true, Some(placeholder)) => {
                render_row(session, 1, format!("{PROMPT}{placeholder}"), style_sheet.muted_style)?;
            }
            _ => {
                let text: String = if self.is_password {
                    std::iter::repeat_n(PASSWORD_MASK, state.buffer.len()).collect()
                } else {
                    state.value()
                };
                render_row(session, 1, format!("{PROMPT}{text}"), style_sheet.focused_style)?;
            }
        }

        let row = render_inline_error(session, 2, state.error.as_deref(), &style_sheet)?;
        render_row(session, row + 1, TEXT_INPUT_HELP, style_sheet.muted_style)?;

        // Leave the terminal cursor where the next character goes.
        let column = u16::try_from(PROMPT.len() + state.cursor).unwrap_or(u16::MAX);
        session.move_cursor(column, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TermxError;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const LEFT: &[u8] = b"\x1b[D";
    const HOME: &[u8] = b"\x1b[H";
    const END: &[u8] = b"\x1b[F";
    const DELETE: &[u8] = b"\x1b[3~";
    const BACKSPACE: &[u8] = b"\x7f";
    const ENTER: &[u8] = b"\r";
    const ESC: &[u8] = b"\x1b";

    fn chunks(keys: &[&[u8]]) -> Vec<Vec<u8>> { keys.iter().map(|it| it.to_vec()).collect() }

    fn name_input() -> TextInput {
        TextInput::new("Name").with_style_sheet(StyleSheet::no_color())
    }

    #[test]
    fn test_typing_and_cursor_editing() {
        let (io, _, _) = TerminalIo::new_mock(chunks(&[
            b"a", b"c", LEFT, b"b", // abc
            HOME, DELETE, // bc
            END, BACKSPACE, // b
            b" ", b"z", ENTER,
        ]));
        assert_eq!(name_input().run_with(io).unwrap(), "b z");
    }

    #[test]
    fn test_initial_value_and_max_length() {
        let (io, _, _) = TerminalIo::new_mock(chunks(&[b"!", BACKSPACE, b"?", ENTER]));
        let result = name_input()
            .with_initial_value("hello")
            .with_max_length(5)
            .run_with(io)
            .unwrap();
        assert_eq!(result, "hell?");
    }

    #[test]
    fn test_password_is_masked() {
        let (io, stdout_mock, _) = TerminalIo::new_mock(chunks(&[b"p", b"w", ENTER]));
        assert_eq!(name_input().as_password().run_with(io).unwrap(), "pw");
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("> ••"));
        assert!(!output.contains("> pw"));
    }

    #[test]
    fn test_validation_error_cleared_by_edit() {
        let (io, stdout_mock, _) =
            TerminalIo::new_mock(chunks(&[ENTER, b" ", ENTER, b"x", ENTER]));
        let result = name_input()
            .with_placeholder("Your name")
            .with_validator(validators::required("name is required"))
            .run_with(io)
            .unwrap();
        assert_eq!(result, " x");
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("> Your name"));
        assert!(output.contains("✗ name is required"));
    }

    #[test]
    fn test_cancel() {
        let (io, _, _) = TerminalIo::new_mock(chunks(&[b"a", ESC]));
        assert!(matches!(name_input().run_with(io), Err(TermxError::Cancelled)));
        let (io, _, _) = TerminalIo::new_mock(chunks(&[b"\x03"]));
        assert!(matches!(name_input().run_with(io), Err(TermxError::Cancelled)));
    }

    #[test_case("", Some("must be at least 3 characters") ; "too short")]
    #[test_case("abc", None ; "exactly min")]
    #[test_case("abcdefg", Some("must be at most 6 characters") ; "too long")]
    fn test_length_validators(value: &str, expected: Option<&str>) {
        let validators = [validators::min_length(3), validators::max_length(6)];
        let actual = validators.iter().find_map(|it| it(value).err());
        assert_eq!(actual.as_deref(), expected);
    }

    #[test_case("dev@r3bl.com", true)]
    #[test_case("dev@localhost", false)]
    #[test_case("@r3bl.com", false)]
    #[test_case("r3bl.com", false)]
    fn test_email_validator(value: &str, is_valid: bool) {
        assert_eq!(validators::email()(value).is_ok(), is_valid);
    }
}
