// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod style_sheet;

// Re-export.
pub use style_sheet::*;
