// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{RowDecoration, Widget, controller_action_to_result, render_inline_error,
            render_list_window, run_widget_event_loop};
use crate::{Capabilities, ControlKey, ControllerAction, ControllerConfig, CursorPolicy,
            DEVELOPMENT_MODE, EventLoopResult, FunctionComponent, InlineVec, KeyEvent,
            SelectionController, StyleSheet, TerminalIo, TerminalSession, TermxResult,
            render_row, truncate_to_width};

pub const MENU_VISIBLE_ROWS: usize = 15;
pub const DEFAULT_MENU_MAX_WIDTH: usize = 80;
const MENU_HELP: &str = "↑↓ Navigate • Enter Select • Shortcut keys • Esc Back • Ctrl+C Exit";
const BREADCRUMB_SEPARATOR: &str = " > ";
const SUBMENU_ICON: &str = "📁";
const ITEM_ICON: &str = "•";

/// Runs when its item is chosen. An `Err` is shown in the menu, which stays open.
pub type MenuAction = Box<dyn Fn() -> Result<(), String>>;

#[allow(missing_debug_implementations)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub shortcut: Option<char>,
    pub is_disabled: bool,
    pub is_separator: bool,
    pub submenu: Option<Menu>,
    pub action: Option<MenuAction>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            shortcut: None,
            is_disabled: false,
            is_separator: false,
            submenu: None,
            action: None,
        }
    }

    /// A divider line. The cursor skips it.
    #[must_use]
    pub fn separator() -> Self {
        Self {
            is_separator: true,
            ..Self::new("", "")
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Matched case insensitively.
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.is_disabled = true;
        self
    }

    #[must_use]
    pub fn with_submenu(mut self, submenu: Menu) -> Self {
        self.submenu = Some(submenu);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Fn() -> Result<(), String> + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    fn is_selectable(&self) -> bool { !self.is_disabled && !self.is_separator }
}

/// A list of actions, possibly nested. Running it returns the id of the chosen item.
///
/// ```no_run
/// use r3bl_termx::{Menu, Widget};
///
/// let settings = Menu::new("Settings")
///     .add_item("theme", "Theme")
///     .add_item("keys", "Key bindings");
/// let chosen_id = Menu::new("Main")
///     .add_item_with_icon("new", "New file", "📄")
///     .add_submenu("settings", "Settings", settings)
///     .add_separator()
///     .add_item("quit", "Quit")
///     .run();
/// ```
#[allow(missing_debug_implementations)]
pub struct Menu {
    title: String,
    items: Vec<MenuItem>,
    show_icons: bool,
    show_descriptions: bool,
    show_shortcuts: bool,
    max_width: usize,
    style_sheet: StyleSheet,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: vec![],
            show_icons: true,
            show_descriptions: true,
            show_shortcuts: true,
            max_width: DEFAULT_MENU_MAX_WIDTH,
            style_sheet: StyleSheet::default(),
        }
    }

    #[must_use]
    pub fn add_item(self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.add_full_item(MenuItem::new(id, label))
    }

    #[must_use]
    pub fn add_item_with_icon(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        self.add_full_item(MenuItem::new(id, label).with_icon(icon))
    }

    #[must_use]
    pub fn add_item_with_description(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.add_full_item(MenuItem::new(id, label).with_description(description))
    }

    #[must_use]
    pub fn add_submenu(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        submenu: Menu,
    ) -> Self {
        self.add_full_item(MenuItem::new(id, label).with_submenu(submenu))
    }

    #[must_use]
    pub fn add_separator(self) -> Self { self.add_full_item(MenuItem::separator()) }

    #[must_use]
    pub fn add_full_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn without_icons(mut self) -> Self {
        self.show_icons = false;
        self
    }

    #[must_use]
    pub fn without_descriptions(mut self) -> Self {
        self.show_descriptions = false;
        self
    }

    #[must_use]
    pub fn without_shortcuts(mut self) -> Self {
        self.show_shortcuts = false;
        self
    }

    /// Longer rows and descriptions are cut with `…`. Applies to submenus as well.
    #[must_use]
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Applies to submenus as well.
    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] { &self.items }

    fn create_controller(&self, show_shortcuts: bool) -> SelectionController {
        let config = ControllerConfig {
            capabilities: Capabilities {
                supports_search: false,
                supports_multiple: false,
                supports_submenus: true,
            },
            cursor_policy: CursorPolicy::Wrap,
            visible_rows: MENU_VISIBLE_ROWS,
            ..Default::default()
        };
        let labels: Vec<&str> = self.items.iter().map(|it| it.label.as_str()).collect();
        let controller = SelectionController::new(&labels, config)
            .with_selectable_mask(self.items.iter().map(MenuItem::is_selectable).collect())
            .with_submenus(self.items.iter().map(|it| it.submenu.is_some()).collect());
        if show_shortcuts {
            controller.with_shortcuts(self.items.iter().map(|it| it.shortcut).collect())
        } else {
            controller
        }
    }
}

/// One open menu. The root is at the bottom of the stack.
struct MenuLevel<'a> {
    menu: &'a Menu,
    controller: SelectionController,
    error: Option<String>,
}

struct MenuState<'a> {
    levels: Vec<MenuLevel<'a>>,
    show_shortcuts: bool,
}

impl<'a> MenuState<'a> {
    fn new(root: &'a Menu) -> Self {
        let mut it = Self {
            levels: vec![],
            show_shortcuts: root.show_shortcuts,
        };
        it.push(root);
        it
    }

    fn push(&mut self, menu: &'a Menu) {
        self.levels.push(MenuLevel {
            menu,
            controller: menu.create_controller(self.show_shortcuts),
            error: None,
        });
    }

    fn breadcrumb(&self) -> String {
        self.levels
            .iter()
            .map(|it| it.menu.title.as_str())
            .collect::<InlineVec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }

    fn on_keypress(&mut self, key: KeyEvent) -> EventLoopResult<String> {
        match key {
            KeyEvent::Control(ControlKey::CtrlC) => return EventLoopResult::ExitWithoutResult,
            KeyEvent::Control(ControlKey::Escape) if self.levels.len() > 1 => {
                self.levels.pop();
                return EventLoopResult::ContinueAndRerender;
            }
            _ => {}
        }

        let Some(level) = self.levels.last_mut() else {
            return EventLoopResult::ExitWithoutResult;
        };
        let menu = level.menu;
        let action = level.controller.handle_key(&key);
        if action != ControllerAction::Ignored {
            level.error = None;
        }

        match action {
            ControllerAction::OpenSubmenu(index) => {
                if let Some(submenu) = &menu.items[index].submenu {
                    self.push(submenu);
                }
                EventLoopResult::ContinueAndRerender
            }
            ControllerAction::Confirmed => {
                let Some(item) = level.controller.focused_index().map(|it| &menu.items[it])
                else {
                    return EventLoopResult::ExitWithoutResult;
                };
                match item.action.as_ref().map(|run_action| run_action()) {
                    Some(Err(message)) => {
                        DEVELOPMENT_MODE.then(|| {
                            tracing::debug!(
                                message = "menu action failed",
                                id = %item.id,
                                error = %message
                            );
                        });
                        level.error = Some(message);
                        level.controller.resume();
                        EventLoopResult::ContinueAndRerender
                    }
                    _ => EventLoopResult::ExitWithResult(item.id.clone()),
                }
            }
            other => controller_action_to_result(other, &level.controller, |_| None),
        }
    }
}

impl Widget for Menu {
    type Output = String;

    fn run_with(&mut self, io: TerminalIo) -> TermxResult<String> {
        let root: &Menu = self;
        let mut state = MenuState::new(root);
        let mut component = MenuComponent {
            show_icons: root.show_icons,
            show_descriptions: root.show_descriptions,
            max_width: root.max_width,
            style_sheet: root.style_sheet,
        };
        run_widget_event_loop(io, &mut state, &mut component, MenuState::on_keypress)
    }
}

struct MenuComponent {
    show_icons: bool,
    show_descriptions: bool,
    max_width: usize,
    style_sheet: StyleSheet,
}

impl MenuComponent {
    fn decorate(&self, item: &MenuItem, is_focused: bool, show_shortcuts: bool) -> RowDecoration {
        let style_sheet = &self.style_sheet;
        if item.is_separator {
            return RowDecoration {
                text: format!("  {}", "─".repeat((self.max_width / 2).min(20))),
                style: style_sheet.muted_style,
            };
        }

        let mut text = String::from(if is_focused { "❯ " } else { "  " });
        if self.show_icons {
            let icon = match (&item.icon, &item.submenu) {
                (Some(icon), _) => icon.as_str(),
                (None, Some(_)) => SUBMENU_ICON,
                (None, None) => ITEM_ICON,
            };
            text.push_str(icon);
            text.push(' ');
        }
        text.push_str(&item.label);
        if show_shortcuts && let Some(shortcut) = item.shortcut {
            text.push_str(&format!(" [{shortcut}]"));
        }
        if item.submenu.is_some() {
            text.push_str(" ▶");
        }
        if item.is_disabled {
            text.push_str(" (disabled)");
        }

        let style = if item.is_disabled {
            style_sheet.muted_style
        } else if is_focused {
            style_sheet.focused_style
        } else {
            style_sheet.unselected_style
        };
        RowDecoration {
            text: truncate_to_width(&text, self.max_width),
            style,
        }
    }
}

impl<'a> FunctionComponent<MenuState<'a>> for MenuComponent {
    fn get_style_sheet(&self) -> &StyleSheet { &self.style_sheet }

    fn render(&mut self, session: &mut TerminalSession, state: &MenuState<'a>) -> TermxResult<()> {
        let style_sheet = self.style_sheet;
        session.clear_screen()?;

        let Some(level) = state.levels.last() else {
            return Ok(());
        };

        render_row(session, 0, state.breadcrumb(), style_sheet.header_style)?;
        render_row(session, 1, MENU_HELP, style_sheet.muted_style)?;

        let mut row = render_list_window(
            session,
            3,
            &level.controller,
            &style_sheet,
            |index, is_focused| {
                self.decorate(&level.menu.items[index], is_focused, state.show_shortcuts)
            },
        )?;

        if self.show_descriptions
            && let Some(description) = level
                .controller
                .focused_index()
                .and_then(|it| level.menu.items[it].description.as_ref())
        {
            row += 1;
            render_row(
                session,
                row,
                truncate_to_width(description, self.max_width),
                style_sheet.muted_style,
            )?;
            row += 1;
        }

        render_inline_error(session, row, level.error.as_deref(), &style_sheet)?;
        Ok(())
    }
}
