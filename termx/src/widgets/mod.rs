// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Ready to use prompts. Each one implements [`Widget`], so it can be run against the
//! real terminal with [`Widget::run()`] or against mocks with [`Widget::run_with()`].

// Attach.
pub mod combo_box;
pub mod confirm;
pub mod menu;
pub mod multi_select;
pub mod select;
pub mod table;
pub mod text_input;
pub mod widget;

// Re-export.
pub use combo_box::*;
pub use confirm::*;
pub use menu::*;
pub use multi_select::*;
pub use select::*;
pub use table::*;
pub use text_input::*;
pub use widget::*;
