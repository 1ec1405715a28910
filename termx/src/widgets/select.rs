// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RowDecoration, Widget, controller_action_to_result, render_inline_error,
            render_list_window, run_widget_event_loop};
use crate::{CaseSensitivity, Capabilities, ControllerConfig, CursorPolicy, DedupKey,
            EscapePolicy, FunctionComponent, SelectionController, SelectionMode,
            StyleSheet, TerminalIo, TerminalSession, TermxResult, render_row};

pub const SELECT_VISIBLE_ROWS: usize = 7;
pub const SELECT_PLACEHOLDER: &str = "Type to filter...";
const SELECT_HELP: &str =
    "↑↓ Navigate • Enter Select • Type to filter • Esc Clear filter • Ctrl+C Cancel";

/// Pick one option from a list, typing to filter it. While filtering, options with the
/// same label are shown once. Escape clears the filter, or cancels when there is none.
#[derive(Debug, Clone)]
pub struct Select {
    label: String,
    options: Vec<String>,
    maybe_initial_value: Option<String>,
    placeholder: String,
    visible_rows: usize,
    case_sensitivity: CaseSensitivity,
    style_sheet: StyleSheet,
}

impl Select {
    pub fn new(
        label: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            maybe_initial_value: None,
            placeholder: SELECT_PLACEHOLDER.to_string(),
            visible_rows: SELECT_VISIBLE_ROWS,
            case_sensitivity: CaseSensitivity::Insensitive,
            style_sheet: StyleSheet::default(),
        }
    }

    /// Start with the cursor on this option.
    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.maybe_initial_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_visible_rows(mut self, visible_rows: usize) -> Self {
        self.visible_rows = visible_rows.max(1);
        self
    }

    #[must_use]
    pub fn with_case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    fn create_controller(&self) -> SelectionController {
        let config = ControllerConfig {
            capabilities: Capabilities::from(SelectionMode::Single),
            cursor_policy: CursorPolicy::Clamp,
            escape_policy: EscapePolicy::ClearQueryThenCancel,
            case_sensitivity: self.case_sensitivity,
            dedup_key: DedupKey::ByValue,
            visible_rows: self.visible_rows,
        };
        let controller = SelectionController::new(&self.options, config);
        match self
            .maybe_initial_value
            .as_ref()
            .and_then(|value| self.options.iter().position(|it| it == value))
        {
            Some(index) => controller.with_cursor_on(index),
            None => controller,
        }
    }
}

impl Widget for Select {
    type Output = String;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<String> {
        let mut controller = self.create_controller();
        let mut component = SelectComponent {
            label: self.label.clone(),
            placeholder: self.placeholder.clone(),
            style_sheet: self.style_sheet,
        };
        run_widget_event_loop(io, &mut controller, &mut component, |controller, key| {
            let action = controller.handle_key(&key);
            controller_action_to_result(action, controller, |it| {
                it.focused_label().map(str::to_string)
            })
        })
    }
}

struct SelectComponent {
    label: String,
    placeholder: String,
    style_sheet: StyleSheet,
}

impl FunctionComponent<SelectionController> for SelectComponent {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(
        &mut self,
        session: &mut TerminalSession,
        controller: &SelectionController,
    ) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        render_row(session, 0, &self.label, style_sheet.header_style)?;
        if controller.query().is_empty() {
            render_row(session, 1, &self.placeholder, style_sheet.muted_style)?;
        } else {
            render_row(
                session,
                1,
                format!("Filter: {}", controller.query()),
                style_sheet.unselected_style,
            )?;
        }

        let mut row = render_list_window(
            session,
            3,
            controller,
            &style_sheet,
            |index, is_focused| {
                let option = &controller.options()[index];
                if is_focused {
                    RowDecoration {
                        text: format!("▶ {option}"),
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

        row = render_inline_error(session, row, controller.error(), &style_sheet)?;
        render_row(
            session,
            row + 1,
            format!(
                "{}/{} items",
                controller.filtered().len(),
                controller.options().len()
            ),
            style_sheet.muted_style,
        )?;
        render_row(session, row + 2, SELECT_HELP, style_sheet.muted_style)
    }
}
