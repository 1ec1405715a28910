// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The list runtime every widget is built on: [`filter_options()`] ranks options
//! against a query, [`SelectionController`] turns key presses into cursor, query and
//! selection changes, and [`enter_event_loop_sync()`] drives a [`FunctionComponent`]
//! against a [`crate::TerminalSession`].

// Attach.
pub mod event_loop;
pub mod function_component;
pub mod list_filter;
pub mod selection_controller;
pub mod viewport;

// Re-export.
pub use event_loop::*;
pub use function_component::*;
pub use list_filter::*;
pub use selection_controller::*;
pub use viewport::*;
