// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::{Attributes, Color, ContentStyle};

/// Colors used by every widget. There is no process-wide current theme: pass a
/// `StyleSheet` to a widget with its `with_style_sheet()` builder, otherwise it uses
/// [`StyleSheet::default()`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleSheet {
    /// Row under the cursor that is also checked (multiselect).
    pub focused_and_selected_style: ContentStyle,
    /// Row under the cursor.
    pub focused_style: ContentStyle,
    pub unselected_style: ContentStyle,
    /// Checked row not under the cursor.
    pub selected_style: ContentStyle,
    /// Widget label, table headers, menu title.
    pub header_style: ContentStyle,
    /// Help line, placeholder, "N more", disabled items.
    pub muted_style: ContentStyle,
    /// Inline validation message.
    pub error_style: ContentStyle,
    /// Spinner frame, filled part of the progress bar.
    pub accent_style: ContentStyle,
}

#[must_use]
pub fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

#[must_use]
pub fn fg_bg(fg_color: Color, bg_color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(fg_color),
        background_color: Some(bg_color),
        ..ContentStyle::default()
    }
}

#[must_use]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color { Color::Rgb { r, g, b } }

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet {
            focused_and_selected_style: fg_bg(rgb(20, 244, 0), rgb(85, 0, 113)),
            focused_style: fg(rgb(20, 244, 0)),
            unselected_style: ContentStyle::default(),
            selected_style: fg_bg(rgb(230, 230, 250), rgb(85, 0, 113)),
            header_style: fg_bg(rgb(171, 204, 242), rgb(31, 36, 46)),
            muted_style: fg(rgb(110, 110, 110)),
            error_style: ContentStyle {
                attributes: Attributes::from(crossterm::style::Attribute::Bold),
                ..fg(rgb(255, 85, 85))
            },
            accent_style: fg(rgb(0, 200, 255)),
        }
    }
}

impl StyleSheet {
    #[must_use]
    pub fn sea_foam_style() -> Self {
        StyleSheet {
            focused_and_selected_style: fg_bg(rgb(0, 255, 255), rgb(0, 95, 95)),
            focused_style: fg_bg(rgb(0, 255, 255), rgb(31, 36, 46)),
            unselected_style: fg_bg(rgb(200, 200, 200), rgb(31, 36, 46)),
            selected_style: fg_bg(rgb(175, 255, 255), rgb(0, 95, 95)),
            header_style: fg_bg(rgb(190, 230, 120), rgb(18, 40, 68)),
            ..StyleSheet::default()
        }
    }

    #[must_use]
    pub fn hot_pink_style() -> Self {
        StyleSheet {
            focused_and_selected_style: fg_bg(rgb(255, 0, 214), rgb(70, 0, 120)),
            focused_style: fg_bg(rgb(255, 0, 214), rgb(31, 36, 46)),
            unselected_style: fg_bg(rgb(200, 150, 255), rgb(31, 36, 46)),
            selected_style: fg_bg(rgb(255, 180, 220), rgb(70, 0, 120)),
            header_style: fg_bg(rgb(175, 255, 255), rgb(18, 40, 68)),
            accent_style: fg(rgb(255, 0, 214)),
            ..StyleSheet::default()
        }
    }

    /// Plain text everywhere. Useful when stdout is not a color terminal, and in tests.
    #[must_use]
    pub fn no_color() -> Self {
        let plain = ContentStyle::default();
        StyleSheet {
            focused_and_selected_style: plain,
            focused_style: plain,
            unselected_style: plain,
            selected_style: plain,
            header_style: plain,
            muted_style: plain,
            error_style: plain,
            accent_style: plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_style() {
        let style_sheet = StyleSheet::default();
        assert_eq!(
            style_sheet.focused_style.foreground_color,
            Some(rgb(20, 244, 0))
        );
        assert_eq!(style_sheet.unselected_style, ContentStyle::default());
    }

    #[test]
    fn test_presets_differ_from_default() {
        assert_ne!(StyleSheet::sea_foam_style(), StyleSheet::default());
        assert_ne!(StyleSheet::hot_pink_style(), StyleSheet::default());
        assert_eq!(
            StyleSheet::sea_foam_style().error_style,
            StyleSheet::default().error_style
        );
    }

    #[test]
    fn test_no_color_has_no_colors() {
        let style_sheet = StyleSheet::no_color();
        assert_eq!(style_sheet.header_style.foreground_color, None);
        assert_eq!(style_sheet.accent_style.background_color, None);
    }
}
