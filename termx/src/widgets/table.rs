// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RowDecoration, Widget, controller_action_to_result, render_list_window,
            run_widget_event_loop};
use crate::{Capabilities, ControllerConfig, CursorPolicy, FunctionComponent, OutputDevice,
            SelectionController, StyleSheet, TerminalIo, TerminalSession, TermxError,
            TermxResult, render_row};
use crossterm::style::PrintStyledContent;
use std::io::Write;

pub const TABLE_VISIBLE_ROWS: usize = 10;
const TABLE_HELP: &str = "↑↓ Navigate • Enter Select • Esc Cancel";

/// Box drawing glyphs for one horizontal rule: left, junction, right.
#[derive(Debug, Clone, Copy)]
struct Rule {
    left: char,
    junction: char,
    right: char,
}

const TOP_RULE: Rule = Rule { left: '┌', junction: '┬', right: '┐' };
const MIDDLE_RULE: Rule = Rule { left: '├', junction: '┼', right: '┤' };
const BOTTOM_RULE: Rule = Rule { left: '└', junction: '┴', right: '┘' };

/// Rows of text cells under a header. Printed once with [`Self::render()`], or run as a
/// widget to pick a row, in which case the output is the index of that row.
///
/// ```
/// use r3bl_termx::Table;
///
/// let mut table = Table::new(["Name", "Lang"]);
/// table.add_row(["termx", "Rust"]).unwrap();
/// assert_eq!(
///     table.render_to_string(),
///     "┌───────┬──────┐\n\
///      │ Name  │ Lang │\n\
///      ├───────┼──────┤\n\
///      │ termx │ Rust │\n\
///      └───────┴──────┘\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    has_border: bool,
    is_compact: bool,
    visible_rows: usize,
    style_sheet: StyleSheet,
}

impl Table {
    pub fn new(headers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: None,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: vec![],
            has_border: true,
            is_compact: false,
            visible_rows: TABLE_VISIBLE_ROWS,
            style_sheet: StyleSheet::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`TermxError::Validation`] if the row doesn't have one cell per header.
    pub fn add_row(
        &mut self,
        cells: impl IntoIterator<Item = impl Into<String>>,
    ) -> TermxResult<()> {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() != self.headers.len() {
            return Err(TermxError::validation(format!(
                "row has {} cells, expected {}",
                cells.len(),
                self.headers.len()
            )));
        }
        self.rows.push(cells);
        Ok(())
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Without a border, columns are separated by two spaces and the header is
    /// underlined.
    #[must_use]
    pub fn with_border(mut self, has_border: bool) -> Self {
        self.has_border = has_border;
        self
    }

    /// No padding inside cells.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.is_compact = true;
        self
    }

    #[must_use]
    pub fn with_visible_rows(mut self, visible_rows: usize) -> Self {
        self.visible_rows = visible_rows.max(1);
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] { &self.rows }

    /// Widest cell in each column, header included, counted in chars.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .chain(std::iter::once(header))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn padding(&self) -> usize { if self.is_compact { 0 } else { 1 } }

    fn format_cells(&self, cells: &[String], widths: &[usize]) -> String {
        let pad = " ".repeat(self.padding());
        let padded = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{pad}{cell:<width$}{pad}"));
        if self.has_border {
            format!("│{}│", padded.collect::<Vec<_>>().join("│"))
        } else {
            padded.collect::<Vec<_>>().join("  ").trim_end().to_string()
        }
    }

    fn format_rule(&self, rule: Rule, widths: &[usize]) -> String {
        let segments: Vec<String> = widths
            .iter()
            .map(|width| "─".repeat(width + 2 * self.padding()))
            .collect();
        if self.has_border {
            format!(
                "{}{}{}",
                rule.left,
                segments.join(&rule.junction.to_string()),
                rule.right
            )
        } else {
            segments.join("  ")
        }
    }

    fn header_lines(&self, widths: &[usize]) -> Vec<String> {
        let mut lines = vec![];
        if self.has_border {
            lines.push(self.format_rule(TOP_RULE, widths));
        }
        lines.push(self.format_cells(&self.headers, widths));
        lines.push(self.format_rule(MIDDLE_RULE, widths));
        lines
    }

    fn footer_line(&self, widths: &[usize]) -> Option<String> {
        self.has_border.then(|| self.format_rule(BOTTOM_RULE, widths))
    }

    /// Every line of the table, each ending in a newline.
    #[must_use]
    pub fn render_to_string(&self) -> String {
        let widths = self.column_widths();
        let mut lines = vec![];
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        lines.extend(self.header_lines(&widths));
        lines.extend(self.rows.iter().map(|row| self.format_cells(row, &widths)));
        lines.extend(self.footer_line(&widths));
        lines.iter().map(|line| format!("{line}\n")).collect()
    }

    /// Print the table once, header styled, without taking over the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`TermxError::Io`] if the output device can't be written.
    pub fn render(&self, output_device: &OutputDevice) -> TermxResult<()> {
        let widths = self.column_widths();
        let mut writer = output_device.lock();
        if let Some(title) = &self.title {
            crossterm::QueueableCommand::queue(
                &mut writer,
                PrintStyledContent(self.style_sheet.header_style.apply(title.as_str())),
            )?;
            writeln!(writer)?;
        }
        for line in self.header_lines(&widths) {
            crossterm::QueueableCommand::queue(
                &mut writer,
                PrintStyledContent(self.style_sheet.header_style.apply(line.as_str())),
            )?;
            writeln!(writer)?;
        }
        for row in &self.rows {
            writeln!(writer, "{}", self.format_cells(row, &widths))?;
        }
        if let Some(footer) = self.footer_line(&widths) {
            writeln!(writer, "{footer}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Widget for Table {
    type Output = usize;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<usize> {
        let widths = self.column_widths();
        let lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| self.format_cells(row, &widths))
            .collect();
        let config = ControllerConfig {
            capabilities: Capabilities::default(),
            cursor_policy: CursorPolicy::Clamp,
            visible_rows: self.visible_rows,
            ..Default::default()
        };
        let mut controller = SelectionController::new(&lines, config);
        let mut component = TableComponent {
            title: self.title.as_deref(),
            header_lines: self.header_lines(&widths),
            footer_line: self.footer_line(&widths),
            style_sheet: self.style_sheet,
        };
        run_widget_event_loop(io, &mut controller, &mut component, |controller, key| {
            let action = controller.handle_key(&key);
            controller_action_to_result(action, controller, SelectionController::focused_index)
        })
    }
}

struct TableComponent<'a> {
    title: Option<&'a str>,
    header_lines: Vec<String>,
    footer_line: Option<String>,
    style_sheet: StyleSheet,
}

impl FunctionComponent<SelectionController> for TableComponent<'_> {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(
        &mut self,
        session: &mut TerminalSession,
        controller: &SelectionController,
    ) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        let mut row = 0;
        if let Some(title) = self.title {
            render_row(session, row, title, style_sheet.header_style)?;
            row += 2;
        }
        for line in &self.header_lines {
            render_row(session, row, format!("  {line}"), style_sheet.header_style)?;
            row += 1;
        }

        row = render_list_window(
            session,
            row,
            controller,
            &style_sheet,
            |index, is_focused| {
                let line = &controller.options()[index];
                if is_focused {
                    RowDecoration {
                        text: format!("❯ {line}"),
                        style: style_sheet.focused_style,
                    }
                } else {
                    RowDecoration {
                        text: format!("  {line}"),
                        style: style_sheet.unselected_style,
                    }
                }
            },
        )?;

        if let Some(footer) = &self.footer_line {
            render_row(session, row, format!("  {footer}"), style_sheet.header_style)?;
            row += 1;
        }
        render_row(session, row + 1, TABLE_HELP, style_sheet.muted_style)
    }
}
