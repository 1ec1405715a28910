// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Frame tables for [`crate::Spinner`]. Parse one by name with `"dots".parse()`, or accept
/// it as a `clap` argument.
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
pub enum SpinnerStyle {
    #[default]
    Dots,
    Line,
    Circle,
    Arrow,
    Clock,
    Bounce,
    Pulse,
    Growing,
    Box,
    Bracket,
}

impl SpinnerStyle {
    #[must_use]
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            Self::Line => &["|", "/", "-", "\\"],
            Self::Circle => &["◐", "◓", "◑", "◒"],
            Self::Arrow => &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
            Self::Clock => &[
                "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
            ],
            Self::Bounce => &["⠁", "⠂", "⠄", "⠂"],
            Self::Pulse => &["●", "○", "●", "○"],
            Self::Growing => &[
                "▁", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃",
            ],
            Self::Box => &["▖", "▘", "▝", "▗"],
            Self::Bracket => &[
                "[    ]", "[=   ]", "[==  ]", "[=== ]", "[ ===]", "[  ==]", "[   =]",
            ],
        }
    }

    /// The frame for `frame_index`, cycling through the table.
    #[must_use]
    pub fn frame(self, frame_index: usize) -> &'static str {
        let frames = self.frames();
        frames[frame_index % frames.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    #[test_case("dots", SpinnerStyle::Dots)]
    #[test_case("bracket", SpinnerStyle::Bracket)]
    #[test_case("growing", SpinnerStyle::Growing)]
    fn test_parse_by_name(name: &str, expected: SpinnerStyle) {
        assert_eq!(SpinnerStyle::from_str(name).unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("sparkles".parse::<SpinnerStyle>().is_err());
    }

    #[test]
    fn test_every_style_has_frames() {
        for style in SpinnerStyle::iter() {
            assert!(!style.frames().is_empty(), "{style} has no frames");
        }
        assert_eq!(SpinnerStyle::Clock.frames().len(), 12);
    }

    #[test]
    fn test_frame_cycles() {
        assert_eq!(SpinnerStyle::Line.frame(0), "|");
        assert_eq!(SpinnerStyle::Line.frame(3), "\\");
        assert_eq!(SpinnerStyle::Line.frame(4), "|");
    }
}
