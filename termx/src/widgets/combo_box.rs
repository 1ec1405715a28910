// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RowDecoration, TextValidator, Widget, render_inline_error, render_list_window,
            run_widget_event_loop};
use crate::{CaseSensitivity, Capabilities, ControlKey, ControllerConfig, CursorPolicy,
            DedupKey, EscapePolicy, EventLoopResult, FunctionComponent, KeyEvent,
            SelectionController, StyleSheet, TerminalIo, TerminalSession, TermxResult,
            render_row};

pub const COMBO_BOX_MAX_DISPLAY: usize = 8;

/// Free text with suggestions. Typing opens a dropdown of matching options, ranked the
/// same way as [`crate::Select`]. Tab completes the highlighted suggestion, Enter takes
/// it (when the dropdown is open) and then validates the text.
///
/// By default any text is accepted. [`Self::without_custom_input()`] only accepts one of
/// the options.
#[allow(missing_debug_implementations)]
pub struct ComboBox {
    label: String,
    options: Vec<String>,
    placeholder: Option<String>,
    allow_custom: bool,
    case_sensitivity: CaseSensitivity,
    max_display: usize,
    maybe_validator: Option<TextValidator>,
    style_sheet: StyleSheet,
}

impl ComboBox {
    pub fn new(
        label: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            placeholder: None,
            allow_custom: true,
            case_sensitivity: CaseSensitivity::Insensitive,
            max_display: COMBO_BOX_MAX_DISPLAY,
            maybe_validator: None,
            style_sheet: StyleSheet::default(),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Strict mode: the result must match one of the options.
    #[must_use]
    pub fn without_custom_input(mut self) -> Self {
        self.allow_custom = false;
        self
    }

    #[must_use]
    pub fn with_case_sensitive_search(mut self) -> Self {
        self.case_sensitivity = CaseSensitivity::Sensitive;
        self
    }

    #[must_use]
    pub fn with_max_display(mut self, max_display: usize) -> Self {
        self.max_display = max_display.max(1);
        self
    }

    #[must_use]
    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> Result<(), String> + 'static,
    ) -> Self {
        self.maybe_validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }
}

/// Everything the combobox needs while it runs.
struct ComboBoxState<'a> {
    value: String,
    is_dropdown_open: bool,
    dropdown: SelectionController,
    error: Option<String>,
    allow_custom: bool,
    case_sensitivity: CaseSensitivity,
    maybe_validator: Option<&'a TextValidator>,
}

impl ComboBoxState<'_> {
    fn is_known_option(&self) -> bool {
        self.dropdown.options().iter().any(|option| match self.case_sensitivity {
            CaseSensitivity::Sensitive => *option == self.value,
            CaseSensitivity::Insensitive => option.to_lowercase() == self.value.to_lowercase(),
        })
    }

    fn validate(&self) -> Result<(), String> {
        if !self.allow_custom && !self.value.is_empty() && !self.is_known_option() {
            return Err("Value must be one of the options".to_string());
        }
        match self.maybe_validator {
            Some(validator) => validator(&self.value),
            None => Ok(()),
        }
    }

    fn edit(&mut self, edit: impl FnOnce(&mut String) -> bool) -> EventLoopResult<String> {
        if !edit(&mut self.value) {
            return EventLoopResult::Continue;
        }
        self.error = None;
        self.dropdown.set_query(&self.value);
        self.is_dropdown_open = !self.value.is_empty();
        EventLoopResult::ContinueAndRerender
    }

    fn take_focused_suggestion(&mut self) -> bool {
        let Some(label) = self.dropdown.focused_label().map(str::to_string) else {
            return false;
        };
        self.value = label;
        self.is_dropdown_open = false;
        self.dropdown.set_query(&self.value);
        true
    }

    fn on_keypress(&mut self, key: KeyEvent) -> EventLoopResult<String> {
        match key {
            KeyEvent::Control(ControlKey::CtrlC) => EventLoopResult::ExitWithoutResult,
            KeyEvent::Control(
                ControlKey::Up
                | ControlKey::Down
                | ControlKey::Home
                | ControlKey::End
                | ControlKey::PageUp
                | ControlKey::PageDown,
            ) => {
                if !self.is_dropdown_open {
                    self.is_dropdown_open = true;
                    self.dropdown.set_query(&self.value);
                } else {
                    self.dropdown.handle_key(&key);
                }
                EventLoopResult::ContinueAndRerender
            }
            KeyEvent::Control(ControlKey::Tab) => {
                if self.take_focused_suggestion() {
                    self.error = None;
                    EventLoopResult::ContinueAndRerender
                } else {
                    EventLoopResult::Continue
                }
            }
            KeyEvent::Control(ControlKey::Enter) => {
                if self.is_dropdown_open {
                    self.take_focused_suggestion();
                }
                match self.validate() {
                    Ok(()) => EventLoopResult::ExitWithResult(self.value.clone()),
                    Err(message) => {
                        self.error = Some(message);
                        EventLoopResult::ContinueAndRerender
                    }
                }
            }
            KeyEvent::Control(ControlKey::Escape) => {
                if self.value.is_empty() {
                    return EventLoopResult::ExitWithoutResult;
                }
                self.is_dropdown_open = false;
                EventLoopResult::ContinueAndRerender
            }
            KeyEvent::Control(ControlKey::Backspace) => self.edit(|it| it.pop().is_some()),
            KeyEvent::Control(ControlKey::Space) => self.edit(|it| {
                it.push(' ');
                true
            }),
            KeyEvent::Rune(ch) => self.edit(|it| {
                it.push(ch);
                true
            }),
            _ => EventLoopResult::Continue,
        }
    }
}

impl Widget for ComboBox {
    type Output = String;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<String> {
        let config = ControllerConfig {
            capabilities: Capabilities::default(),
            cursor_policy: CursorPolicy::Clamp,
            escape_policy: EscapePolicy::Cancel,
            case_sensitivity: self.case_sensitivity,
            dedup_key: DedupKey::ByValue,
            visible_rows: self.max_display,
        };
        let mut state = ComboBoxState {
            value: String::new(),
            is_dropdown_open: false,
            dropdown: SelectionController::new(&self.options, config),
            error: None,
            allow_custom: self.allow_custom,
            case_sensitivity: self.case_sensitivity,
            maybe_validator: self.maybe_validator.as_ref(),
        };
        let mut component = ComboBoxComponent {
            label: &self.label,
            placeholder: self.placeholder.as_deref(),
            style_sheet: self.style_sheet,
        };
        run_widget_event_loop(io, &mut state, &mut component, ComboBoxState::on_keypress)
    }
}

struct ComboBoxComponent<'a> {
    label: &'a str,
    placeholder: Option<&'a str>,
    style_sheet: StyleSheet,
}

impl<'a> FunctionComponent<ComboBoxState<'a>> for ComboBoxComponent<'_> {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(
        &mut self,
        session: &mut TerminalSession,
        state: &ComboBoxState<'a>,
    ) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        render_row(session, 0, self.label, style_sheet.header_style)?;
        let help = if state.allow_custom {
            "Type a value or search • ↑↓ Suggestions • Tab Complete • Enter Confirm"
        } else {
            "Type to search • ↑↓ Navigate • Tab Complete • Enter Select • Esc Cancel"
        };
        render_row(session, 1, help, style_sheet.muted_style)?;

        match (state.value.is_empty(), self.placeholder) {
            (true, Some(placeholder)) => {
                render_row(session, 3, format!("> {placeholder}"), style_sheet.muted_style)?;
            }
            _ => {
                render_row(session, 3, format!("> {}", state.value), style_sheet.focused_style)?;
            }
        }

        let mut row = 5;
        if state.is_dropdown_open {
            if state.dropdown.filtered().is_empty() {
                if state.allow_custom {
                    render_row(
                        session,
                        row,
                        "No matching options. The typed value will be used.",
                        style_sheet.muted_style,
                    )?;
                } else {
                    render_row(session, row, "No matching options.", style_sheet.error_style)?;
                }
                row += 1;
            } else {
                row = render_list_window(
                    session,
                    row,
                    &state.dropdown,
                    &style_sheet,
                    |index, is_focused| {
                        let option = &state.dropdown.options()[index];
                        if is_focused {
                            RowDecoration {
                                text: format!("❯ {option}"),
                                style: style_sheet.focused_style,
                            }
                        } else {
                            RowDecoration {
                                text: format!("  {option}"),
                                style: style_sheet.unselected_style,
                            }
                        }
                    },
                )?;
            }
        }

        if state.allow_custom && !state.value.is_empty() && !state.is_known_option() {
            render_row(
                session,
                row,
                format!("Custom value: \"{}\"", state.value),
                style_sheet.accent_style,
            )?;
            row += 1;
        }

        render_inline_error(session, row, state.error.as_deref(), &style_sheet)?;
        Ok(())
    }
}
