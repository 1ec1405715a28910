// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OutputDevice, StdMutex, StyleSheet, TermxResult, TickRenderer, execute_commands,
            lock_ignore_poison};
use crossterm::{style::Print,
                terminal::{Clear, ClearType}};
use std::sync::Arc;

pub const DEFAULT_PROGRESS_BAR_WIDTH: usize = 40;
pub const DEFAULT_FILL_CHAR: char = '█';
pub const DEFAULT_EMPTY_CHAR: char = '░';

/// Shared counter behind a [`ProgressBar`]. Clones of the bar share it, so one clone can
/// be handed to an [`crate::AnimationScheduler`] while another is updated by the work.
pub type SafeProgress = Arc<StdMutex<u64>>;

/// A determinate progress bar: `label [████░░░░]  50%`.
///
/// Paint it yourself after each update with [`Self::paint()`], or let an
/// [`crate::AnimationScheduler`] repaint a clone of it on every tick:
///
/// ```no_run
/// use r3bl_termx::{AnimationScheduler, OutputDevice, ProgressBar};
///
/// # async fn example() -> r3bl_termx::TermxResult<()> {
/// let bar = ProgressBar::new(200).with_label("Downloading");
/// let mut scheduler = AnimationScheduler::new(OutputDevice::new_stdout());
/// scheduler.start(bar.clone())?;
/// for _ in 0..200 {
///     bar.increment(1);
/// }
/// scheduler.stop().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    width: usize,
    fill_char: char,
    empty_char: char,
    label: String,
    show_percent: bool,
    style_sheet: StyleSheet,
    progress: SafeProgress,
}

impl ProgressBar {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            width: DEFAULT_PROGRESS_BAR_WIDTH,
            fill_char: DEFAULT_FILL_CHAR,
            empty_char: DEFAULT_EMPTY_CHAR,
            label: String::new(),
            show_percent: true,
            style_sheet: StyleSheet::default(),
            progress: Arc::new(StdMutex::new(0)),
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_chars(mut self, fill_char: char, empty_char: char) -> Self {
        self.fill_char = fill_char;
        self.empty_char = empty_char;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl AsRef<str>) -> Self {
        self.label = strip_ansi_escapes::strip_str(label.as_ref());
        self
    }

    #[must_use]
    pub fn without_percent(mut self) -> Self {
        self.show_percent = false;
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    /// Set the progress, capped at the total.
    pub fn update(&self, current: u64) {
        *lock_ignore_poison(&self.progress) = current.min(self.total);
    }

    pub fn increment(&self, delta: u64) {
        let mut progress = lock_ignore_poison(&self.progress);
        *progress = progress.saturating_add(delta).min(self.total);
    }

    #[must_use]
    pub fn current(&self) -> u64 { *lock_ignore_poison(&self.progress) }

    #[must_use]
    pub fn total(&self) -> u64 { self.total }

    #[must_use]
    pub fn handle(&self) -> SafeProgress { self.progress.clone() }

    #[must_use]
    pub fn is_complete(&self) -> bool { self.current() >= self.total }

    /// Whole percent, rounded down. An empty total counts as complete.
    #[must_use]
    pub fn percent(&self) -> u64 {
        match self.total {
            0 => 100,
            total => scale(self.current(), 100, total),
        }
    }

    /// The bar without any escape sequences.
    #[must_use]
    pub fn render_plain_line(&self) -> String {
        let (filled, empty) = self.split_width();
        let mut line = String::new();
        if !self.label.is_empty() {
            line.push_str(&self.label);
            line.push(' ');
        }
        line.push('[');
        line.extend(std::iter::repeat_n(self.fill_char, filled));
        line.extend(std::iter::repeat_n(self.empty_char, empty));
        line.push(']');
        if self.show_percent {
            line.push_str(&format!(" {:>3}%", self.percent()));
        }
        line
    }

    /// The bar with the filled part in the accent style.
    #[must_use]
    pub fn render_line(&self) -> String {
        let (filled, empty) = self.split_width();
        let fill: String = std::iter::repeat_n(self.fill_char, filled).collect();
        let rest: String = std::iter::repeat_n(self.empty_char, empty).collect();
        let label = if self.label.is_empty() {
            String::new()
        } else {
            format!("{} ", self.label)
        };
        let percent = if self.show_percent {
            format!(" {:>3}%", self.percent())
        } else {
            String::new()
        };
        format!(
            "{label}[{}{}]{percent}",
            self.style_sheet.accent_style.apply(fill),
            self.style_sheet.muted_style.apply(rest)
        )
    }

    /// Overwrite the current line with the bar, from the foreground.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TermxError::Io`] if the output device can't be written.
    pub fn paint(&self, output_device: &OutputDevice) -> TermxResult<()> {
        execute_commands!(
            output_device,
            Print("\r"),
            Clear(ClearType::CurrentLine),
            Print(self.render_line())
        );
        Ok(())
    }

    fn split_width(&self) -> (usize, usize) {
        let filled = match self.total {
            0 => self.width,
            total => {
                let width = u64::try_from(self.width).unwrap_or(u64::MAX);
                usize::try_from(scale(self.current(), width, total)).unwrap_or(self.width)
            }
        };
        let filled = filled.min(self.width);
        (filled, self.width - filled)
    }
}

/// `value * numerator / denominator` without overflowing, given `value <= denominator`.
fn scale(value: u64, numerator: u64, denominator: u64) -> u64 {
    let scaled = u128::from(value) * u128::from(numerator) / u128::from(denominator);
    u64::try_from(scaled).unwrap_or(numerator)
}

impl TickRenderer for ProgressBar {
    fn render_tick(&mut self, _frame_index: usize) -> String { self.render_line() }
}
