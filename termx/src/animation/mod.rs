// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Things that repaint themselves without key presses. An [`AnimationScheduler`] runs a
//! [`TickRenderer`] on a tokio interval, holding the output device's
//! [`crate::AnimationOutputToken`] until it is stopped. [`Spinner`] and [`ProgressBar`]
//! are the two renderers that ship with the crate.

// Attach.
pub mod animation_scheduler;
pub mod progress_bar;
pub mod spinner;
pub mod spinner_style;
pub mod tick_renderer;

// Re-export.
pub use animation_scheduler::*;
pub use progress_bar::*;
pub use spinner::*;
pub use spinner_style::*;
pub use tick_renderer::*;
