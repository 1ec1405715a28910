// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Produces the text of one animation frame. The [`crate::AnimationScheduler`] calls
/// this once per tick, with `frame_index` starting at 0 and going up by one each time.
///
/// The returned line may contain SGR sequences, but no newlines: the scheduler
/// overwrites it in place.
pub trait TickRenderer: Send + 'static {
    fn render_tick(&mut self, frame_index: usize) -> String;
}

impl<F> TickRenderer for F
where
    F: FnMut(usize) -> String + Send + 'static,
{
    fn render_tick(&mut self, frame_index: usize) -> String { self(frame_index) }
}
