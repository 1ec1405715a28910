// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AnimationScheduler, FinalLine, OutputDevice, SpinnerStyle, StyleSheet,
            TermxResult, TickRenderer};
use crossterm::style::ContentStyle;
use std::time::Duration;

pub const DEFAULT_SPINNER_LABEL: &str = "Loading...";

/// An indeterminate progress indicator on the current line.
///
/// ```no_run
/// use r3bl_termx::{Spinner, SpinnerStyle};
///
/// # async fn example() -> r3bl_termx::TermxResult<()> {
/// let mut spinner = Spinner::new("Fetching crates").with_style(SpinnerStyle::Circle);
/// spinner.start()?;
/// // ... do the work ...
/// spinner.stop_with_message("Fetched 12 crates").await;
/// # Ok(())
/// # }
/// ```
#[allow(missing_debug_implementations)]
pub struct Spinner {
    label: String,
    style: SpinnerStyle,
    style_sheet: StyleSheet,
    scheduler: AnimationScheduler,
}

impl Default for Spinner {
    fn default() -> Self { Self::new(DEFAULT_SPINNER_LABEL) }
}

impl Spinner {
    /// Escape sequences in `label` are stripped, so it can't move the cursor.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            label: strip_ansi_escapes::strip_str(label.as_ref()),
            style: SpinnerStyle::default(),
            style_sheet: StyleSheet::default(),
            scheduler: AnimationScheduler::new(OutputDevice::new_stdout()),
        }
    }

    pub fn loading() -> Self { Self::new(DEFAULT_SPINNER_LABEL) }

    pub fn processing() -> Self { Self::new("Processing...").with_style(SpinnerStyle::Line) }

    pub fn downloading() -> Self {
        Self::new("Downloading...").with_style(SpinnerStyle::Growing)
    }

    pub fn installing() -> Self { Self::new("Installing...").with_style(SpinnerStyle::Circle) }

    pub fn connecting() -> Self { Self::new("Connecting...").with_style(SpinnerStyle::Pulse) }

    #[must_use]
    pub fn with_style(mut self, style: SpinnerStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_tick_delay(mut self, tick_delay: Duration) -> Self {
        self.scheduler = self.scheduler.with_tick_delay(tick_delay);
        self
    }

    #[must_use]
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    /// Paint somewhere other than stdout, eg [`crate::OutputDeviceExt::new_mock()`].
    #[must_use]
    pub fn with_output_device(mut self, output_device: OutputDevice) -> Self {
        let tick_delay = self.scheduler.tick_delay();
        self.scheduler = AnimationScheduler::new(output_device).with_tick_delay(tick_delay);
        self
    }

    #[must_use]
    pub fn label(&self) -> &str { &self.label }

    #[must_use]
    pub fn is_running(&self) -> bool { self.scheduler.is_running() }

    /// See [`AnimationScheduler::start()`] for the return value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TermxError::Io`] when called outside a tokio runtime.
    pub fn start(&mut self) -> TermxResult<bool> {
        self.scheduler.start(SpinnerRenderer {
            style: self.style,
            frame_style: self.style_sheet.accent_style,
            label: self.label.clone(),
        })
    }

    /// Stop and clear the line.
    pub async fn stop(&mut self) { self.scheduler.stop().await; }

    /// Stop and leave `✓ message` on the line.
    pub async fn stop_with_message(&mut self, message: impl AsRef<str>) {
        let line = format!(
            "{} {}",
            self.style_sheet.accent_style.apply("✓"),
            strip_ansi_escapes::strip_str(message.as_ref())
        );
        self.scheduler.stop_with(FinalLine::Replace(line)).await;
    }

    /// Stop and leave `✗ message` on the line.
    pub async fn stop_with_error(&mut self, message: impl AsRef<str>) {
        let line = format!(
            "{} {}",
            self.style_sheet.error_style.apply("✗"),
            strip_ansi_escapes::strip_str(message.as_ref())
        );
        self.scheduler.stop_with(FinalLine::Replace(line)).await;
    }
}

struct SpinnerRenderer {
    style: SpinnerStyle,
    frame_style: ContentStyle,
    label: String,
}

impl TickRenderer for SpinnerRenderer {
    fn render_tick(&mut self, frame_index: usize) -> String {
        format!(
            "{} {}",
            self.frame_style.apply(self.style.frame(frame_index)),
            self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputDeviceExt;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_is_sanitized() {
        let spinner = Spinner::new("\x1b[31mred\x1b[0m \x1b[2Jlabel");
        assert_eq!(spinner.label(), "red label");
        assert_eq!(Spinner::default().label(), DEFAULT_SPINNER_LABEL);
    }

    #[test]
    fn test_presets() {
        let presets = [
            (Spinner::loading(), "Loading...", SpinnerStyle::Dots),
            (Spinner::processing(), "Processing...", SpinnerStyle::Line),
            (Spinner::downloading(), "Downloading...", SpinnerStyle::Growing),
            (Spinner::installing(), "Installing...", SpinnerStyle::Circle),
            (Spinner::connecting(), "Connecting...", SpinnerStyle::Pulse),
        ];
        for (spinner, label, style) in presets {
            assert_eq!(spinner.label(), label);
            assert_eq!(spinner.style, style);
            assert!(!spinner.is_running());
        }
    }

    #[test]
    fn test_renderer_cycles_frames() {
        let mut renderer = SpinnerRenderer {
            style: SpinnerStyle::Line,
            frame_style: StyleSheet::no_color().accent_style,
            label: "wait".to_string(),
        };
        let frames: Vec<String> = (0..5).map(|it| renderer.render_tick(it)).collect();
        assert_eq!(frames, vec!["| wait", "/ wait", "- wait", "\\ wait", "| wait"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_paints_frames_then_message() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut spinner = Spinner::new("Building")
            .with_style(SpinnerStyle::Circle)
            .with_tick_delay(Duration::from_millis(50))
            .with_style_sheet(StyleSheet::no_color())
            .with_output_device(output_device);

        assert!(spinner.start().unwrap());
        tokio::time::sleep(Duration::from_millis(120)).await;
        spinner.stop_with_message("Built").await;
        assert!(!spinner.is_running());

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert_eq!(output, "◐ Building◓ Building◑ Building✓ Built\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_with_error() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut spinner = Spinner::new("Uploading")
            .with_style_sheet(StyleSheet::no_color())
            .with_output_device(output_device);
        spinner.start().unwrap();
        spinner.stop_with_error("Upload failed").await;
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string_strip_ansi()
                .ends_with("✗ Upload failed\n")
        );
    }
}
