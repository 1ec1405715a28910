// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RowDecoration, Widget, controller_action_to_result, render_inline_error,
            render_list_window, run_widget_event_loop};
use crate::{CaseSensitivity, Capabilities, ControllerConfig, CursorPolicy, DedupKey,
            EscapePolicy, FunctionComponent, SelectionController, SelectionMode,
            SelectionValidator, StyleSheet, TerminalIo, TerminalSession, TermxResult,
            render_row};

pub const MULTI_SELECT_VISIBLE_ROWS: usize = 10;
const MULTI_SELECT_HELP: &str =
    "↑↓ Navigate • Space Toggle • Tab All • Ctrl+D None • Enter Confirm • Esc Cancel";

/// Check any number of options. Typing filters the list, Enter while filtering goes
/// back to toggling, and Enter while toggling validates the selection. Tab checks every
/// visible option up to the maximum and Ctrl+D unchecks everything.
///
/// ```no_run
/// use r3bl_termx::{MultiSelect, Widget};
///
/// let environments = MultiSelect::new(
///     "Deploy to",
///     ["development", "staging", "production"],
/// )
/// .with_min_selections(1)
/// .run();
/// ```
#[allow(missing_debug_implementations)]
pub struct MultiSelect {
    label: String,
    options: Vec<String>,
    placeholder: Option<String>,
    min_selections: usize,
    max_selections: Option<usize>,
    maybe_validator: Option<SelectionValidator>,
    initially_selected: Vec<usize>,
    visible_rows: usize,
    case_sensitivity: CaseSensitivity,
    show_help: bool,
    style_sheet: StyleSheet,
}

impl MultiSelect {
    pub fn new(
        label: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            placeholder: None,
            min_selections: 0,
            max_selections: None,
            maybe_validator: None,
            initially_selected: vec![],
            visible_rows: MULTI_SELECT_VISIBLE_ROWS,
            case_sensitivity: CaseSensitivity::Insensitive,
            show_help: true,
            style_sheet: StyleSheet::default(),
        }
    }

    /// Common languages, runtimes and platforms. Pick between 1 and 5.
    pub fn technologies() -> Self {
        Self::new(
            "Select technologies",
            [
                "Go", "Python", "JavaScript", "TypeScript", "Rust", "Java", "C++", "C#", "PHP",
                "Ruby", "Docker", "Kubernetes", "AWS", "GCP", "Azure", "PostgreSQL", "MySQL",
                "MongoDB", "Redis", "Elasticsearch",
            ],
        )
        .with_placeholder("No technology selected")
        .with_min_selections(1)
        .with_max_selections(5)
    }

    /// Deployment environments. Pick at least one.
    pub fn environments() -> Self {
        Self::new(
            "Select environments",
            ["development", "staging", "production", "testing"],
        )
        .with_min_selections(1)
    }

    pub fn features() -> Self {
        Self::new(
            "Select features",
            [
                "Authentication", "Authorization", "Cache", "Logging", "Monitoring", "Metrics",
                "Backup", "Recovery", "REST API", "GraphQL", "WebSocket", "gRPC",
            ],
        )
        .with_placeholder("No feature selected")
    }

    /// Shown under the count while nothing is selected.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_min_selections(mut self, min: usize) -> Self {
        self.min_selections = min;
        self
    }

    #[must_use]
    pub fn with_max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self
    }

    /// Runs after the count checks. Receives the checked labels in option order.
    #[must_use]
    pub fn with_validator(
        mut self,
        validator: impl Fn(&[&str]) -> Result<(), String> + 'static,
    ) -> Self {
        self.maybe_validator = Some(Box::new(validator));
        self
    }

    /// Options checked when the widget starts.
    #[must_use]
    pub fn with_selected(mut self, labels: &[&str]) -> Self {
        self.initially_selected = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| labels.contains(&option.as_str()))
            .map(|(index, _)| index)
            .collect();
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
    pub fn without_help(mut self) -> Self {
        self.show_help = false;
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    fn create_controller(&mut self) -> SelectionController {
        let config = ControllerConfig {
            capabilities: Capabilities::from(SelectionMode::Multiple),
            cursor_policy: CursorPolicy::Clamp,
            escape_policy: EscapePolicy::Cancel,
            case_sensitivity: self.case_sensitivity,
            dedup_key: DedupKey::ByIndex,
            visible_rows: self.visible_rows,
        };
        let mut controller = SelectionController::new(&self.options, config)
            .with_min_selections(self.min_selections)
            .with_selected(self.initially_selected.iter().copied());
        if let Some(max) = self.max_selections {
            controller = controller.with_max_selections(max);
        }
        // The validator moves into the controller for the run, and comes back after.
        if let Some(validator) = self.maybe_validator.take() {
            controller = controller.with_validator(validator);
        }
        controller
    }
}

impl Widget for MultiSelect {
    type Output = Vec<String>;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<Vec<String>> {
        let mut controller = self.create_controller();
        let mut component = MultiSelectComponent {
            label: self.label.clone(),
            placeholder: self.placeholder.clone(),
            show_help: self.show_help,
            style_sheet: self.style_sheet,
        };
        let result =
            run_widget_event_loop(io, &mut controller, &mut component, |controller, key| {
                let action = controller.handle_key(&key);
                controller_action_to_result(action, controller, |it| {
                    Some(
                        it.selected_labels()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    )
                })
            });
        self.maybe_validator = controller.take_validator();
        result
    }
}

struct MultiSelectComponent {
    label: String,
    placeholder: Option<String>,
    show_help: bool,
    style_sheet: StyleSheet,
}

impl FunctionComponent<SelectionController> for MultiSelectComponent {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(
        &mut self,
        session: &mut TerminalSession,
        controller: &SelectionController,
    ) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        let mut row = 0;
        render_row(session, row, &self.label, style_sheet.header_style)?;
        row += 1;
        if self.show_help {
            render_row(session, row, MULTI_SELECT_HELP, style_sheet.muted_style)?;
            row += 1;
        }

        if !controller.query().is_empty() {
            render_row(
                session,
                row,
                format!("Search: {}", controller.query()),
                style_sheet.unselected_style,
            )?;
            row += 1;
        }

        render_row(
            session,
            row,
            format!(
                "Selected: {}/{}",
                controller.selected_count(),
                controller.options().len()
            ),
            style_sheet.accent_style,
        )?;
        row += 1;
        if controller.selected_count() == 0
            && let Some(placeholder) = &self.placeholder
        {
            render_row(session, row, placeholder, style_sheet.muted_style)?;
            row += 1;
        }
        row += 1;

        if controller.filtered().is_empty() {
            render_row(session, row, "No matching options", style_sheet.error_style)?;
            row += 1;
        } else {
            row = render_list_window(
                session,
                row,
                controller,
                &style_sheet,
                |index, is_focused| {
                    let is_selected = controller.is_selected(index);
                    let checkbox = if is_selected { "☑" } else { "☐" };
                    let cursor = if is_focused { "❯" } else { " " };
                    let style = match (is_focused, is_selected) {
                        (true, true) => style_sheet.focused_and_selected_style,
                        (true, false) => style_sheet.focused_style,
                        (false, true) => style_sheet.selected_style,
                        (false, false) => style_sheet.unselected_style,
                    };
                    RowDecoration {
                        text: format!("{cursor} {checkbox} {}", controller.options()[index]),
                        style,
                    }
                },
            )?;
        }

        render_inline_error(session, row, controller.error(), &style_sheet)?;
        Ok(())
    }
}
