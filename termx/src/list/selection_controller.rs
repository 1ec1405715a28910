// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CaseSensitivity, ControlKey, DEVELOPMENT_MODE, DedupKey, InlineString,
            KeyEvent, ListWindow, filter_options};
use std::collections::BTreeSet;

/// Validates the labels of a multiselect selection. `Err` carries the message shown
/// under the list.
pub type SelectionValidator = Box<dyn Fn(&[&str]) -> Result<(), String>>;

/// Maps to [`Capabilities::supports_multiple`]. Accepted on the command line by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

/// What a particular list widget lets the user do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Printable keys edit a query that filters the list.
    pub supports_search: bool,
    /// Space toggles rows, Enter validates the whole set.
    pub supports_multiple: bool,
    /// Enter on a row that owns a submenu opens it instead of confirming.
    pub supports_submenus: bool,
}

impl From<SelectionMode> for Capabilities {
    fn from(mode: SelectionMode) -> Self {
        Capabilities {
            supports_search: true,
            supports_multiple: mode == SelectionMode::Multiple,
            supports_submenus: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Stop at the first and last row.
    #[default]
    Clamp,
    /// Up from the first row goes to the last, and vice versa.
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    #[default]
    Cancel,
    /// A non empty query is cleared first. Escape on an empty query cancels.
    ClearQueryThenCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SelectionPhase {
    Browsing,
    Searching,
    Confirmed,
    Cancelled,
}

impl SelectionPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool { matches!(self, Self::Confirmed | Self::Cancelled) }
}

/// What the widget should do after a key press was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction {
    /// Nothing changed.
    Ignored,
    Redraw,
    Confirmed,
    Cancelled,
    /// Enter on a row that owns a submenu. Carries the original option index.
    OpenSubmenu(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub capabilities: Capabilities,
    pub cursor_policy: CursorPolicy,
    pub escape_policy: EscapePolicy,
    pub case_sensitivity: CaseSensitivity,
    pub dedup_key: DedupKey,
    /// Rows on screen. Used for paging and for [`SelectionController::window()`].
    pub visible_rows: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            cursor_policy: CursorPolicy::Clamp,
            escape_policy: EscapePolicy::Cancel,
            case_sensitivity: CaseSensitivity::Insensitive,
            dedup_key: DedupKey::ByIndex,
            visible_rows: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// The key handling shared by every list widget: select, multiselect, the combobox
/// dropdown, menu and table. A widget picks a [`ControllerConfig`], feeds it key presses
/// with [`Self::handle_key()`], and renders from the accessors.
///
/// Invariants, which hold after every call:
/// - `filtered` holds original option indices, none of them twice.
/// - `cursor < filtered.len()`, or `cursor == 0` when nothing matches.
/// - With a selectability mask, the cursor sits on a selectable row whenever there is
///   one.
/// - `selected` only ever holds original indices, so it survives refiltering.
#[allow(missing_debug_implementations)]
pub struct SelectionController {
    config: ControllerConfig,
    options: Vec<String>,
    phase: SelectionPhase,
    cursor: usize,
    filtered: Vec<usize>,
    selected: BTreeSet<usize>,
    query: InlineString,
    min_selections: usize,
    max_selections: Option<usize>,
    validator: Option<SelectionValidator>,
    error: Option<String>,
    maybe_selectable: Option<Vec<bool>>,
    maybe_shortcuts: Option<Vec<Option<char>>>,
    maybe_submenus: Option<Vec<bool>>,
}

impl SelectionController {
    pub fn new<T: AsRef<str>>(options: &[T], config: ControllerConfig) -> Self {
        let options: Vec<String> = options.iter().map(|it| it.as_ref().to_string()).collect();
        let mut it = Self {
            config,
            filtered: vec![],
            options,
            phase: SelectionPhase::Browsing,
            cursor: 0,
            selected: BTreeSet::new(),
            query: InlineString::new(),
            min_selections: 0,
            max_selections: None,
            validator: None,
            error: None,
            maybe_selectable: None,
            maybe_shortcuts: None,
            maybe_submenus: None,
        };
        it.refilter();
        it
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

    #[must_use]
    pub fn with_validator(mut self, validator: SelectionValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// One flag per option. The cursor never rests on an option flagged `false`.
    #[must_use]
    pub fn with_selectable_mask(mut self, mask: Vec<bool>) -> Self {
        self.maybe_selectable = Some(mask);
        self.cursor = self.seek(0, Direction::Down).unwrap_or(0);
        self
    }

    /// One optional shortcut per option, matched case-insensitively when search is off.
    #[must_use]
    pub fn with_shortcuts(mut self, shortcuts: Vec<Option<char>>) -> Self {
        self.maybe_shortcuts = Some(shortcuts);
        self
    }

    /// One flag per option, `true` when that option opens a submenu.
    #[must_use]
    pub fn with_submenus(mut self, submenus: Vec<bool>) -> Self {
        self.maybe_submenus = Some(submenus);
        self
    }

    /// Put the cursor on the row showing `original_index`, if it is visible and
    /// selectable.
    #[must_use]
    pub fn with_cursor_on(mut self, original_index: usize) -> Self {
        if let Some(row) = self.filtered.iter().position(|&it| it == original_index)
            && self.is_selectable_row(row)
        {
            self.cursor = row;
        }
        self
    }

    /// Pre-check options, eg the current values of a setting.
    #[must_use]
    pub fn with_selected(mut self, original_indices: impl IntoIterator<Item = usize>) -> Self {
        self.selected.extend(
            original_indices
                .into_iter()
                .filter(|&it| it < self.options.len()),
        );
        self
    }
}

/// Accessors used to render.
impl SelectionController {
    #[must_use]
    pub fn phase(&self) -> SelectionPhase { self.phase }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn query(&self) -> &str { &self.query }

    #[must_use]
    pub fn options(&self) -> &[String] { &self.options }

    /// Original indices of the rows that match the query, in display order.
    #[must_use]
    pub fn filtered(&self) -> &[usize] { &self.filtered }

    #[must_use]
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig { &self.config }

    #[must_use]
    pub fn is_selected(&self, original_index: usize) -> bool {
        self.selected.contains(&original_index)
    }

    /// Checked options, as original indices in ascending order.
    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize { self.selected.len() }

    /// Labels of the checked options, in original order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected
            .iter()
            .map(|&it| self.options[it].as_str())
            .collect()
    }

    /// Original index under the cursor.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> { self.filtered.get(self.cursor).copied() }

    #[must_use]
    pub fn focused_label(&self) -> Option<&str> {
        self.focused_index().map(|it| self.options[it].as_str())
    }

    #[must_use]
    pub fn window(&self) -> ListWindow {
        ListWindow::new(self.cursor, self.filtered.len(), self.config.visible_rows)
    }

    /// Replace the query from outside, eg the text of a combobox. The cursor goes back
    /// to the first row.
    pub fn set_query(&mut self, query: &str) {
        self.query = InlineString::from(query);
        self.refilter();
        self.phase = if self.query.is_empty() {
            SelectionPhase::Browsing
        } else {
            SelectionPhase::Searching
        };
    }

    /// Check every selectable row of the current filter, in order, until the maximum is
    /// reached. Rows left unchecked because of the maximum set the same error as a
    /// rejected toggle.
    pub fn select_all_visible(&mut self) -> ControllerAction {
        let before = self.selected.len();
        let mut is_capped = false;
        for row in 0..self.filtered.len() {
            let original_index = self.filtered[row];
            if !self.is_selectable_row(row) || self.selected.contains(&original_index) {
                continue;
            }
            if self.max_selections.is_some_and(|max| self.selected.len() >= max) {
                is_capped = true;
                break;
            }
            self.selected.insert(original_index);
        }

        if let (true, Some(max)) = (is_capped, self.max_selections) {
            self.error = Some(format!("You can select at most {max} options"));
            return ControllerAction::Redraw;
        }
        if self.selected.len() == before {
            ControllerAction::Ignored
        } else {
            ControllerAction::Redraw
        }
    }

    /// Uncheck everything, including rows hidden by the filter.
    pub fn clear_selection(&mut self) -> ControllerAction {
        if self.selected.is_empty() {
            return ControllerAction::Ignored;
        }
        self.selected.clear();
        ControllerAction::Redraw
    }

    /// Hand the validator back, eg to reuse it for another run of the same widget.
    pub fn take_validator(&mut self) -> Option<SelectionValidator> { self.validator.take() }

    /// Cancelled and confirmed controllers ignore keys. This puts one back to
    /// browsing, eg when a menu returns from a submenu.
    pub fn resume(&mut self) {
        if self.phase.is_terminal() {
            self.phase = SelectionPhase::Browsing;
        }
    }
}

impl SelectionController {
    /// Apply one key press. A validation error from an earlier Enter is cleared by any
    /// key that does something.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ControllerAction {
        if self.phase.is_terminal() {
            return ControllerAction::Ignored;
        }

        let maybe_previous_error = self.error.take();
        let action = self.dispatch(key);
        if action == ControllerAction::Ignored {
            self.error = maybe_previous_error;
        }

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "selection controller",
                key = ?key,
                action = ?action,
                phase = %self.phase,
                cursor = self.cursor,
                query = %self.query
            );
        });

        action
    }

    fn dispatch(&mut self, key: &KeyEvent) -> ControllerAction {
        let capabilities = self.config.capabilities;
        match key {
            KeyEvent::Control(ControlKey::CtrlC) => self.cancel(),
            KeyEvent::Control(ControlKey::Up) => self.move_cursor(Direction::Up),
            KeyEvent::Control(ControlKey::Down) => self.move_cursor(Direction::Down),
            KeyEvent::Control(ControlKey::Home) => self.jump_to(0, Direction::Down),
            KeyEvent::Control(ControlKey::End) => {
                self.jump_to(self.filtered.len().saturating_sub(1), Direction::Up)
            }
            KeyEvent::Control(ControlKey::PageUp) => self.page(Direction::Up),
            KeyEvent::Control(ControlKey::PageDown) => self.page(Direction::Down),
            KeyEvent::Control(ControlKey::Space) => self.space(),
            KeyEvent::Control(ControlKey::Enter) => self.enter(),
            KeyEvent::Control(ControlKey::Escape) => self.escape(),
            KeyEvent::Control(ControlKey::Tab) if capabilities.supports_multiple => {
                self.select_all_visible()
            }
            KeyEvent::Control(ControlKey::CtrlD) if capabilities.supports_multiple => {
                self.clear_selection()
            }
            KeyEvent::Control(ControlKey::Backspace) if capabilities.supports_search => {
                self.pop_query_char()
            }
            KeyEvent::Rune(ch) if capabilities.supports_search => self.push_query_char(*ch),
            KeyEvent::Rune(ch) => match self.shortcut(*ch) {
                ControllerAction::Ignored if *ch == 'j' => self.move_cursor(Direction::Down),
                ControllerAction::Ignored if *ch == 'k' => self.move_cursor(Direction::Up),
                action => action,
            },
            _ => ControllerAction::Ignored,
        }
    }

    fn cancel(&mut self) -> ControllerAction {
        self.phase = SelectionPhase::Cancelled;
        ControllerAction::Cancelled
    }

    fn space(&mut self) -> ControllerAction {
        let capabilities = self.config.capabilities;
        match self.phase {
            SelectionPhase::Searching if capabilities.supports_search => {
                self.push_query_char(' ')
            }
            SelectionPhase::Browsing if capabilities.supports_multiple => {
                self.toggle_focused()
            }
            _ => ControllerAction::Ignored,
        }
    }

    fn toggle_focused(&mut self) -> ControllerAction {
        let Some(original_index) = self.focused_index() else {
            return ControllerAction::Ignored;
        };
        if !self.is_selectable_row(self.cursor) {
            return ControllerAction::Ignored;
        }

        if self.selected.remove(&original_index) {
            return ControllerAction::Redraw;
        }

        match self.max_selections {
            Some(max) if self.selected.len() >= max => {
                self.error = Some(format!("You can select at most {max} options"));
            }
            _ => {
                self.selected.insert(original_index);
            }
        }
        ControllerAction::Redraw
    }

    fn enter(&mut self) -> ControllerAction {
        let capabilities = self.config.capabilities;

        if capabilities.supports_multiple {
            if self.phase == SelectionPhase::Searching {
                self.phase = SelectionPhase::Browsing;
                return ControllerAction::Redraw;
            }
            return match self.validate_selection() {
                Ok(()) => {
                    self.phase = SelectionPhase::Confirmed;
                    ControllerAction::Confirmed
                }
                Err(message) => {
                    self.error = Some(message);
                    ControllerAction::Redraw
                }
            };
        }

        let Some(original_index) = self.focused_index() else {
            return ControllerAction::Ignored;
        };
        if !self.is_selectable_row(self.cursor) {
            return ControllerAction::Ignored;
        }

        if capabilities.supports_submenus && self.has_submenu(original_index) {
            return ControllerAction::OpenSubmenu(original_index);
        }

        self.phase = SelectionPhase::Confirmed;
        ControllerAction::Confirmed
    }

    /// Count bounds first, then the custom validator.
    fn validate_selection(&self) -> Result<(), String> {
        let count = self.selected.len();
        if count < self.min_selections {
            return Err(format!(
                "Select at least {} option{}",
                self.min_selections,
                if self.min_selections == 1 { "" } else { "s" }
            ));
        }
        if let Some(max) = self.max_selections
            && count > max
        {
            return Err(format!("You can select at most {max} options"));
        }
        match &self.validator {
            Some(validator) => validator(&self.selected_labels()),
            None => Ok(()),
        }
    }

    fn escape(&mut self) -> ControllerAction {
        if self.config.escape_policy == EscapePolicy::ClearQueryThenCancel
            && !self.query.is_empty()
        {
            self.set_query("");
            return ControllerAction::Redraw;
        }
        self.cancel()
    }

    fn push_query_char(&mut self, ch: char) -> ControllerAction {
        self.query.push(ch);
        self.refilter();
        self.phase = SelectionPhase::Searching;
        ControllerAction::Redraw
    }

    fn pop_query_char(&mut self) -> ControllerAction {
        if self.query.pop().is_none() {
            return ControllerAction::Ignored;
        }
        self.refilter();
        if self.query.is_empty() {
            self.phase = SelectionPhase::Browsing;
        }
        ControllerAction::Redraw
    }

    fn shortcut(&mut self, ch: char) -> ControllerAction {
        let Some(shortcuts) = &self.maybe_shortcuts else {
            return ControllerAction::Ignored;
        };
        let maybe_row = self.filtered.iter().position(|&original_index| {
            shortcuts
                .get(original_index)
                .copied()
                .flatten()
                .is_some_and(|it| it.eq_ignore_ascii_case(&ch))
        });
        match maybe_row {
            Some(row) if self.is_selectable_row(row) => {
                self.cursor = row;
                self.enter()
            }
            _ => ControllerAction::Ignored,
        }
    }
}

/// Cursor movement.
impl SelectionController {
    fn refilter(&mut self) {
        self.filtered = filter_options(
            &self.options,
            &self.query,
            self.config.case_sensitivity,
            self.config.dedup_key,
        );
        self.cursor = self.seek(0, Direction::Down).unwrap_or(0);
    }

    fn is_selectable_row(&self, row: usize) -> bool {
        let Some(&original_index) = self.filtered.get(row) else {
            return false;
        };
        self.maybe_selectable
            .as_ref()
            .is_none_or(|mask| mask.get(original_index).copied().unwrap_or(false))
    }

    fn has_submenu(&self, original_index: usize) -> bool {
        self.maybe_submenus
            .as_ref()
            .and_then(|it| it.get(original_index).copied())
            .unwrap_or(false)
    }

    /// First selectable row at or after `from` going in `direction`, without wrapping.
    fn seek(&self, from: usize, direction: Direction) -> Option<usize> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        let from = from.min(len - 1);
        match direction {
            Direction::Down => (from..len).find(|&row| self.is_selectable_row(row)),
            Direction::Up => (0..=from).rev().find(|&row| self.is_selectable_row(row)),
        }
    }

    fn move_cursor(&mut self, direction: Direction) -> ControllerAction {
        let len = self.filtered.len();
        if len == 0 {
            return ControllerAction::Ignored;
        }

        let maybe_next = match self.config.cursor_policy {
            CursorPolicy::Clamp => match direction {
                Direction::Down if self.cursor + 1 < len => {
                    self.seek(self.cursor + 1, Direction::Down)
                }
                Direction::Up if self.cursor > 0 => self.seek(self.cursor - 1, Direction::Up),
                _ => None,
            },
            CursorPolicy::Wrap => (1..=len)
                .map(|step| match direction {
                    Direction::Down => (self.cursor + step) % len,
                    Direction::Up => (self.cursor + len - step % len) % len,
                })
                .find(|&row| self.is_selectable_row(row)),
        };

        if let Some(next) = maybe_next {
            self.cursor = next;
        }
        ControllerAction::Redraw
    }

    fn jump_to(&mut self, row: usize, direction: Direction) -> ControllerAction {
        match self.seek(row, direction) {
            Some(it) => {
                self.cursor = it;
                ControllerAction::Redraw
            }
            None => ControllerAction::Ignored,
        }
    }

    fn page(&mut self, direction: Direction) -> ControllerAction {
        let len = self.filtered.len();
        if len == 0 {
            return ControllerAction::Ignored;
        }
        let page = self.config.visible_rows.max(1);
        let target = match direction {
            Direction::Up => self.cursor.saturating_sub(page),
            Direction::Down => (self.cursor + page).min(len - 1),
        };
        let opposite = match direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        };
        let maybe_next = self
            .seek(target, direction)
            .or_else(|| self.seek(target, opposite));
        if let Some(next) = maybe_next {
            self.cursor = next;
        }
        ControllerAction::Redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TECHNOLOGIES: [&str; 6] = ["Go", "Python", "JavaScript", "TypeScript", "Rust", "Java"];

    fn multi_select_config() -> ControllerConfig {
        ControllerConfig {
            capabilities: Capabilities::from(SelectionMode::Multiple),
            dedup_key: DedupKey::ByIndex,
            visible_rows: 10,
            ..Default::default()
        }
    }

    fn single_select_config() -> ControllerConfig {
        ControllerConfig {
            capabilities: Capabilities::from(SelectionMode::Single),
            dedup_key: DedupKey::ByValue,
            ..Default::default()
        }
    }

    fn press(controller: &mut SelectionController, keys: &[KeyEvent]) -> ControllerAction {
        let mut last = ControllerAction::Ignored;
        for key in keys {
            last = controller.handle_key(key);
        }
        last
    }

    fn down() -> KeyEvent { ControlKey::Down.into() }
    fn up() -> KeyEvent { ControlKey::Up.into() }
    fn space() -> KeyEvent { ControlKey::Space.into() }
    fn enter() -> KeyEvent { ControlKey::Enter.into() }

    #[test]
    fn test_min_max_multiselect() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config())
            .with_min_selections(1)
            .with_max_selections(2);

        // Enter with nothing selected.
        assert_eq!(press(&mut controller, &[enter()]), ControllerAction::Redraw);
        assert_eq!(controller.phase(), SelectionPhase::Browsing);
        assert_eq!(controller.error(), Some("Select at least 1 option"));

        // The next key clears the error.
        press(&mut controller, &[space(), down(), space(), down(), space()]);
        assert_eq!(controller.selected_count(), 2);
        assert_eq!(controller.selected_labels(), vec!["Go", "Python"]);
        assert_eq!(controller.error(), Some("You can select at most 2 options"));

        assert_eq!(press(&mut controller, &[enter()]), ControllerAction::Confirmed);
        assert_eq!(controller.phase(), SelectionPhase::Confirmed);
    }

    #[test]
    fn test_select_all_stops_at_max() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config())
            .with_max_selections(3);
        press(&mut controller, &[down(), space()]);

        let tab = KeyEvent::from(ControlKey::Tab);
        assert_eq!(controller.handle_key(&tab), ControllerAction::Redraw);
        assert_eq!(controller.selected_labels(), vec!["Go", "Python", "JavaScript"]);
        assert_eq!(controller.error(), Some("You can select at most 3 options"));
    }

    #[test]
    fn test_select_all_follows_filter_and_clear_drops_everything() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config());
        press(&mut controller, &[space()]);
        press(
            &mut controller,
            &[KeyEvent::Rune('s'), KeyEvent::Rune('c'), ControlKey::Tab.into()],
        );
        assert_eq!(controller.selected_labels(), vec!["Go", "JavaScript", "TypeScript"]);
        assert_eq!(controller.error(), None);

        // Everything already checked.
        assert_eq!(controller.select_all_visible(), ControllerAction::Ignored);

        let ctrl_d = KeyEvent::from(ControlKey::CtrlD);
        assert_eq!(controller.handle_key(&ctrl_d), ControllerAction::Redraw);
        assert_eq!(controller.selected_count(), 0);
        assert_eq!(controller.handle_key(&ctrl_d), ControllerAction::Ignored);
    }

    #[test]
    fn test_select_all_needs_multiple() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        let tab = KeyEvent::from(ControlKey::Tab);
        assert_eq!(controller.handle_key(&tab), ControllerAction::Ignored);
        assert_eq!(controller.selected_count(), 0);
    }

    #[test]
    fn test_error_survives_ignored_keys() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config())
            .with_min_selections(1);
        press(&mut controller, &[enter()]);
        assert_eq!(
            controller.handle_key(&KeyEvent::Unknown(vec![0x1b, b'[', b'Z'])),
            ControllerAction::Ignored
        );
        assert!(controller.error().is_some());
        press(&mut controller, &[down()]);
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn test_custom_validator_runs_after_count_checks() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config())
            .with_validator(Box::new(|labels| {
                if labels.contains(&"Java") && labels.contains(&"JavaScript") {
                    Err("Pick one of Java and JavaScript".to_string())
                } else {
                    Ok(())
                }
            }));

        press(&mut controller, &[down(), down(), space()]);
        press(&mut controller, &[ControlKey::End.into(), space(), enter()]);
        assert_eq!(controller.error(), Some("Pick one of Java and JavaScript"));
        assert_eq!(controller.phase(), SelectionPhase::Browsing);

        press(&mut controller, &[space(), enter()]);
        assert_eq!(controller.phase(), SelectionPhase::Confirmed);
        assert_eq!(controller.selected_labels(), vec!["JavaScript"]);
    }

    #[test]
    fn test_typing_filters_and_resets_cursor() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        press(&mut controller, &[down(), down()]);
        assert_eq!(controller.cursor(), 2);

        press(&mut controller, &[KeyEvent::Rune('j'), KeyEvent::Rune('a')]);
        assert_eq!(controller.phase(), SelectionPhase::Searching);
        assert_eq!(controller.query(), "ja");
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.filtered(), &[2, 5]);

        press(&mut controller, &[KeyEvent::Rune('v'), KeyEvent::Rune('a')]);
        // Exact match first.
        assert_eq!(controller.filtered(), &[5, 2]);

        press(&mut controller, &[enter()]);
        assert_eq!(controller.phase(), SelectionPhase::Confirmed);
        assert_eq!(controller.focused_label(), Some("Java"));
    }

    #[test]
    fn test_backspace_returns_to_browsing() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        press(&mut controller, &[KeyEvent::Rune('r')]);
        assert_eq!(controller.phase(), SelectionPhase::Searching);

        press(&mut controller, &[ControlKey::Backspace.into()]);
        assert_eq!(controller.phase(), SelectionPhase::Browsing);
        assert_eq!(controller.filtered().len(), TECHNOLOGIES.len());
        assert_eq!(
            press(&mut controller, &[ControlKey::Backspace.into()]),
            ControllerAction::Ignored
        );
    }

    #[test]
    fn test_enter_on_empty_filter_is_noop() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        press(&mut controller, &[KeyEvent::Rune('z'), KeyEvent::Rune('z')]);
        assert!(controller.filtered().is_empty());
        assert_eq!(press(&mut controller, &[enter()]), ControllerAction::Ignored);
        assert_eq!(controller.phase(), SelectionPhase::Searching);
    }

    #[test]
    fn test_multiselect_enter_in_search_keeps_filter() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config());
        press(&mut controller, &[KeyEvent::Rune('s'), KeyEvent::Rune('c')]);
        assert_eq!(press(&mut controller, &[enter()]), ControllerAction::Redraw);
        assert_eq!(controller.phase(), SelectionPhase::Browsing);
        assert_eq!(controller.query(), "sc");
        assert_eq!(controller.filtered(), &[2, 3]);

        // Space toggles again once browsing.
        press(&mut controller, &[down(), space()]);
        assert_eq!(controller.selected_labels(), vec!["TypeScript"]);
    }

    #[test]
    fn test_space_in_search_appends_to_query() {
        let options = ["New York", "Newark", "York"];
        let mut controller = SelectionController::new(&options, multi_select_config());
        press(
            &mut controller,
            &[KeyEvent::Rune('w'), space(), KeyEvent::Rune('y')],
        );
        assert_eq!(controller.query(), "w y");
        assert_eq!(controller.filtered(), &[0]);
        assert_eq!(controller.selected_count(), 0);
    }

    #[test]
    fn test_selection_survives_refilter() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config());
        press(&mut controller, &[ControlKey::End.into(), space()]);
        press(&mut controller, &[KeyEvent::Rune('g'), KeyEvent::Rune('o')]);
        assert_eq!(controller.filtered(), &[0]);
        assert!(controller.is_selected(5));
    }

    #[test]
    fn test_escape_policies() {
        let config = ControllerConfig {
            escape_policy: EscapePolicy::ClearQueryThenCancel,
            ..single_select_config()
        };
        let mut controller = SelectionController::new(&TECHNOLOGIES, config);
        press(&mut controller, &[KeyEvent::Rune('p')]);
        assert_eq!(
            press(&mut controller, &[ControlKey::Escape.into()]),
            ControllerAction::Redraw
        );
        assert_eq!(controller.query(), "");
        assert_eq!(controller.phase(), SelectionPhase::Browsing);
        assert_eq!(
            press(&mut controller, &[ControlKey::Escape.into()]),
            ControllerAction::Cancelled
        );

        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        press(&mut controller, &[KeyEvent::Rune('p')]);
        assert_eq!(
            press(&mut controller, &[ControlKey::Escape.into()]),
            ControllerAction::Cancelled
        );
    }

    #[test]
    fn test_ctrl_c_cancels_from_any_phase() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, multi_select_config());
        press(&mut controller, &[KeyEvent::Rune('g')]);
        assert_eq!(
            press(&mut controller, &[ControlKey::CtrlC.into()]),
            ControllerAction::Cancelled
        );
        assert_eq!(controller.phase(), SelectionPhase::Cancelled);
        assert_eq!(press(&mut controller, &[down()]), ControllerAction::Ignored);
    }

    #[test]
    fn test_clamp_and_wrap() {
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        press(&mut controller, &[up()]);
        assert_eq!(controller.cursor(), 0);
        press(&mut controller, &[ControlKey::End.into(), down()]);
        assert_eq!(controller.cursor(), 5);

        let config = ControllerConfig {
            cursor_policy: CursorPolicy::Wrap,
            ..single_select_config()
        };
        let mut controller = SelectionController::new(&TECHNOLOGIES, config);
        press(&mut controller, &[up()]);
        assert_eq!(controller.cursor(), 5);
        press(&mut controller, &[down()]);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_vim_keys_only_without_search() {
        let config = ControllerConfig {
            capabilities: Capabilities::default(),
            ..Default::default()
        };
        let mut controller = SelectionController::new(&TECHNOLOGIES, config);
        press(&mut controller, &[KeyEvent::Rune('j'), KeyEvent::Rune('j')]);
        assert_eq!(controller.cursor(), 2);
        press(&mut controller, &[KeyEvent::Rune('k')]);
        assert_eq!(controller.cursor(), 1);
        assert_eq!(controller.query(), "");
    }

    #[test]
    fn test_paging() {
        let options: Vec<String> = (0..20).map(|it| format!("item {it}")).collect();
        let config = ControllerConfig {
            visible_rows: 5,
            ..single_select_config()
        };
        let mut controller = SelectionController::new(&options, config);
        press(&mut controller, &[ControlKey::PageDown.into()]);
        assert_eq!(controller.cursor(), 5);
        press(&mut controller, &vec![KeyEvent::from(ControlKey::PageDown); 4]);
        assert_eq!(controller.cursor(), 19);
        press(&mut controller, &[ControlKey::PageUp.into(), ControlKey::PageUp.into()]);
        assert_eq!(controller.cursor(), 9);
        assert_eq!(controller.window().range(), 5..10);
        press(&mut controller, &[ControlKey::Home.into()]);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_mask_skips_unselectable_rows() {
        let options = ["New", "---", "Open", "Save (disabled)", "Quit"];
        let config = ControllerConfig {
            capabilities: Capabilities::default(),
            cursor_policy: CursorPolicy::Wrap,
            ..Default::default()
        };
        let mut controller = SelectionController::new(&options, config)
            .with_selectable_mask(vec![true, false, true, false, true]);

        press(&mut controller, &[down()]);
        assert_eq!(controller.cursor(), 2);
        press(&mut controller, &[down()]);
        assert_eq!(controller.cursor(), 4);
        press(&mut controller, &[down()]);
        assert_eq!(controller.cursor(), 0);
        press(&mut controller, &[up()]);
        assert_eq!(controller.cursor(), 4);
    }

    #[test]
    fn test_mask_moves_initial_cursor() {
        let options = ["---", "Open"];
        let controller =
            SelectionController::new(&options, ControllerConfig::default())
                .with_selectable_mask(vec![false, true]);
        assert_eq!(controller.cursor(), 1);
    }

    #[test]
    fn test_shortcuts_confirm_and_submenus_open() {
        let options = ["New", "Recent", "Quit"];
        let config = ControllerConfig {
            capabilities: Capabilities {
                supports_submenus: true,
                ..Default::default()
            },
            cursor_policy: CursorPolicy::Wrap,
            ..Default::default()
        };
        let mut controller = SelectionController::new(&options, config)
            .with_shortcuts(vec![Some('n'), Some('r'), Some('q')])
            .with_submenus(vec![false, true, false]);

        assert_eq!(
            press(&mut controller, &[KeyEvent::Rune('R')]),
            ControllerAction::OpenSubmenu(1)
        );
        assert_eq!(controller.phase(), SelectionPhase::Browsing);

        assert_eq!(
            press(&mut controller, &[KeyEvent::Rune('x')]),
            ControllerAction::Ignored
        );
        assert_eq!(
            press(&mut controller, &[KeyEvent::Rune('q')]),
            ControllerAction::Confirmed
        );
        assert_eq!(controller.focused_index(), Some(2));

        controller.resume();
        assert_eq!(controller.phase(), SelectionPhase::Browsing);
    }

    #[test]
    fn test_with_cursor_on_initial_value() {
        let controller = SelectionController::new(&TECHNOLOGIES, single_select_config())
            .with_cursor_on(4);
        assert_eq!(controller.focused_label(), Some("Rust"));
    }

    #[test]
    fn test_cursor_invariant_after_random_keys() {
        let keys = [
            KeyEvent::Rune('a'),
            down(),
            down(),
            KeyEvent::Rune('v'),
            ControlKey::Backspace.into(),
            ControlKey::End.into(),
            KeyEvent::Rune('x'),
            up(),
            ControlKey::Backspace.into(),
            ControlKey::PageDown.into(),
            KeyEvent::Rune('t'),
        ];
        let mut controller = SelectionController::new(&TECHNOLOGIES, single_select_config());
        for key in &keys {
            controller.handle_key(key);
            let len = controller.filtered().len();
            assert!(
                (len == 0 && controller.cursor() == 0) || controller.cursor() < len,
                "after {key:?}"
            );
        }
    }

    #[test]
    fn test_selection_mode_from_str() {
        use std::str::FromStr;
        assert_eq!(SelectionMode::from_str("multiple").unwrap(), SelectionMode::Multiple);
        assert_eq!(SelectionMode::Single.to_string(), "single");
    }
}
