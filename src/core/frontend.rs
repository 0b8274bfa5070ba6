//! Seams to the outside world: a read-only view for rendering, a non-blocking key
//! source, and the frame loop that drives a day through them.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use log::debug;

use super::customers::CustomerQueue;
use super::prep::SideStation;
use super::production::ProductionPipeline;
use super::resources::ResourcePool;
use super::rng::RandomSource;
use super::session::{Command, DaySession};
use super::shop::ShopMeta;
use super::types::Topping;

/// Everything a renderer may look at during a frame
pub struct DayView<'s> {
    pub day: u32,
    pub remaining_secs: u32,
    pub meta: &'s ShopMeta,
    pub pool: &'s ResourcePool,
    pub pipeline: &'s ProductionPipeline,
    pub sides: &'s SideStation,
    pub queue: &'s CustomerQueue,
    pub next_topping: Topping,
    pub message: &'s str,
}

/// Presentation layer, called once per frame after the state has advanced
pub trait Renderer {
    fn render(&mut self, view: &DayView<'_>);
}

/// Keyboard-like input that never blocks
pub trait InputSource {
    /// At most one key press per call
    fn poll_key(&mut self) -> Option<char>;
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &DayView<'_>) {}
}

/// Replays a fixed list of per-frame inputs; `None` entries are idle frames
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Option<char>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// One key per frame, no idle frames in between
    pub fn keys(keys: &str) -> Self {
        Self::new(keys.chars().map(Some))
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<char> {
        self.frames.pop_front().flatten()
    }
}

/// Frame loop for a day: poll one key, advance the session, render, then idle
/// until the next frame is due.
#[derive(Debug, Clone)]
pub struct DayRunner {
    frame_interval: Option<Duration>,
}

impl DayRunner {
    /// Sleep between frames to hold `frames_per_second`
    pub fn paced(frames_per_second: u32) -> Self {
        Self {
            frame_interval: Some(Duration::from_millis(1000 / frames_per_second.max(1) as u64)),
        }
    }

    /// Run frames back to back
    pub fn unpaced() -> Self {
        Self {
            frame_interval: None,
        }
    }

    /// Drive `session` until the day is over. Returns the number of frames run.
    pub fn run<R: RandomSource>(
        &self,
        session: &mut DaySession<'_, R>,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> u64 {
        let mut frames = 0;
        while !session.is_over() {
            let command = input.poll_key().and_then(Command::from_key);
            session.frame(command);
            renderer.render(&session.view());
            frames += 1;
            if let Some(interval) = self.frame_interval {
                thread::sleep(interval);
            }
        }
        debug!("[Runner] Day {} finished after {} frames", session.day(), frames);
        frames
    }
}
