// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

/// First visible row for a list of `len` rows showing at most `visible` of them, such
/// that `cursor` is on screen. The window follows the cursor down and never runs past
/// the end of the list. It does not remember where it was last time, so moving the
/// cursor up inside the window scrolls it.
#[must_use]
pub fn window_start(cursor: usize, len: usize, visible: usize) -> usize {
    let start = cursor.saturating_sub(visible.saturating_sub(1));
    start.min(len.saturating_sub(visible))
}

/// The slice of a filtered list that is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

impl ListWindow {
    #[must_use]
    pub fn new(cursor: usize, len: usize, visible: usize) -> Self {
        let start = window_start(cursor, len, visible);
        let end = (start + visible).min(len);
        Self { start, end, len }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> { self.start..self.end }

    /// Rows below the window, shown as "N more".
    #[must_use]
    pub fn hidden_below(&self) -> usize { self.len - self.end }

    #[must_use]
    pub fn hidden_above(&self) -> usize { self.start }
}
