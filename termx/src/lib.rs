// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termx combobox multiselect

//! # r3bl_termx
//!
//! Interactive terminal widgets that run one prompt at a time in raw mode and hand a
//! value back to the caller:
//!
//! | Widget                     | Returns                              |
//! | -------------------------- | ------------------------------------ |
//! | [`Select`]                 | the chosen label                     |
//! | [`MultiSelect`]            | the checked labels, in option order  |
//! | [`ComboBox`]               | typed text or a suggestion           |
//! | [`Menu`]                   | the id of the chosen item            |
//! | [`Table`]                  | the index of the chosen row          |
//! | [`TextInput`]              | the validated text                   |
//! | [`Confirm`]                | `true` or `false`                    |
//!
//! Plus two animations that run on a tokio task next to your own work:
//! [`Spinner`] and [`ProgressBar`], both driven by an [`AnimationScheduler`].
//!
//! ```no_run
//! use r3bl_termx::{Select, StyleSheet, TermxError, Widget};
//!
//! let mut select = Select::new("Pick a language", ["Go", "Python", "Rust"])
//!     .with_style_sheet(StyleSheet::sea_foam_style());
//! match select.run() {
//!     Ok(language) => println!("{language}"),
//!     Err(TermxError::Cancelled) => println!("maybe later"),
//!     Err(error) => eprintln!("{error:?}"),
//! }
//! ```
//!
//! # How it fits together
//!
//! 1. [`TerminalSession`] enters raw mode on [`TerminalSession::init()`] and always
//!    restores the previous terminal settings, on [`TerminalSession::restore()`] or on
//!    drop.
//! 2. [`decode_key_event()`] turns each read from stdin (up to 256 bytes) into a
//!    [`KeyEvent`]. A CSI sequence that arrives split across two reads decodes as two
//!    [`KeyEvent::Unknown`] events.
//! 3. [`filter_options()`] ranks options against the query: exact matches, then prefix
//!    matches, then substring matches.
//! 4. [`SelectionController`] is the one state machine behind every list widget. Each
//!    widget picks its [`Capabilities`], [`CursorPolicy`] and [`EscapePolicy`], and only
//!    supplies rendering and validation.
//! 5. [`enter_event_loop_sync()`] renders a [`FunctionComponent`], then blocks on one key
//!    press at a time until the widget exits.
//! 6. [`AnimationScheduler`] repaints one line on a fixed interval from a tokio task. It
//!    holds an [`AnimationOutputToken`] while it runs, so anything the foreground writes
//!    to the same [`OutputDevice`] meanwhile is buffered and flushed when it stops.
//!
//! # Errors
//!
//! Every widget returns a [`TermxResult`]. [`TermxError::Cancelled`] means the user
//! pressed Escape or `Ctrl+C`, and is distinct from the fatal
//! [`TermxError::NotATerminal`] and [`TermxError::Io`]. Validation failures are shown
//! inline and never leave the event loop.
//!
//! # Logging
//!
//! Widgets draw on stdout, so send logs to a file with [`init_tracing()`] and
//! [`TracingConfig::new_file()`], and flip [`DEVELOPMENT_MODE`] to see the event loop
//! and controller traces.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod animation;
pub mod core;
pub mod list;
pub mod widgets;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
#[allow(ambiguous_glob_reexports)]
pub use animation::*;
#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use list::*;
#[allow(ambiguous_glob_reexports)]
pub use widgets::*;

/// Turn on verbose `tracing::debug!` output from the session, the event loop, the
/// selection controller and the animation scheduler.
pub const DEVELOPMENT_MODE: bool = false;
