use std::{collections::VecDeque, time::Duration};

use crate::{
    export::DownloadSink,
    foundation::error::{SketchError, SketchResult},
    host::Host,
    layout::surface::Viewport,
    runtime::{clock::Millis, debounce::Debouncer, sketch::SketchContext},
};

/// Key that saves the current canvas.
pub(crate) const SAVE_KEY: char = 's';

/// Input delivered to the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The viewport changed size or pixel ratio.
    Resize(Viewport),
    /// A key was pressed; only `s` does anything.
    KeyPress(char),
    /// Export the canvas as if the save key had been pressed.
    ExportRequested,
}

/// Single-threaded page runtime on a virtual clock.
///
/// Events are queued with [`EventLoop::post`] and handled in order by the next
/// [`EventLoop::advance`]. Resizes go through a trailing-edge debounce; animation frames, when
/// the config asks for them, are timers too. Handler failures are logged and kept for
/// [`EventLoop::take_errors`]; they never stop the loop.
pub struct EventLoop<H, S> {
    ctx: SketchContext<H, S>,
    now: Millis,
    queue: VecDeque<Event>,
    resize: Debouncer<Viewport>,
    frame_interval: Duration,
    next_frame: Option<Millis>,
    relayouts: u64,
    animation_ticks: u64,
    errors: Vec<SketchError>,
}

impl<H: Host, S: DownloadSink> EventLoop<H, S> {
    /// Lay out and draw the first surface for `viewport` at time zero.
    pub fn start(ctx: SketchContext<H, S>, viewport: Viewport) -> SketchResult<Self> {
        let config = ctx.config();
        let resize = Debouncer::new(config.resize_quiet());
        let frame_interval = config.frame_interval();

        let mut rt = Self {
            ctx,
            now: Millis::default(),
            queue: VecDeque::new(),
            resize,
            frame_interval,
            next_frame: None,
            relayouts: 0,
            animation_ticks: 0,
            errors: Vec::new(),
        };
        rt.ctx.layout_canvas(viewport)?;
        rt.schedule_frame();
        Ok(rt)
    }

    /// Queue an event for the next [`EventLoop::advance`].
    pub fn post(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Handle queued events, then run every timer due within `by`, in deadline order.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now.after(by);
        loop {
            while let Some(event) = self.queue.pop_front() {
                self.dispatch(event);
            }

            let resize_at = self.resize.deadline().filter(|at| *at <= target);
            let frame_at = self.next_frame.filter(|at| *at <= target);
            match (resize_at, frame_at) {
                (Some(r), Some(f)) if r <= f => self.fire_resize(r),
                (Some(r), None) => self.fire_resize(r),
                (_, Some(f)) => self.fire_frame(f),
                (None, None) => break,
            }
        }
        self.now = target;
    }

    /// Handle queued events and let any pending resize fire.
    ///
    /// Animation frames keep rescheduling themselves, so this does not wait for them.
    pub fn settle(&mut self) {
        self.advance(Duration::ZERO);
        if let Some(at) = self.resize.deadline() {
            self.advance(at.since(self.now));
        }
    }

    fn dispatch(&mut self, event: Event) {
        tracing::trace!(now = %self.now, ?event, "event");
        match event {
            Event::Resize(viewport) => {
                if self.resize.schedule(self.now, viewport) {
                    tracing::debug!(now = %self.now, "resize restarted the debounce");
                }
            }
            Event::KeyPress(SAVE_KEY) | Event::ExportRequested => {
                let res = self.ctx.export().map(|_| ());
                self.record(res);
            }
            Event::KeyPress(_) => {}
        }
    }

    fn fire_resize(&mut self, at: Millis) {
        self.now = at;
        let Some(viewport) = self.resize.take_due(at) else {
            return;
        };
        self.relayouts += 1;
        tracing::debug!(now = %self.now, relayouts = self.relayouts, "debounced relayout");
        let res = self.ctx.layout_canvas(viewport).map(|_| ());
        self.record(res);
        self.schedule_frame();
    }

    fn fire_frame(&mut self, at: Millis) {
        self.now = at;
        self.next_frame = None;
        self.animation_ticks += 1;
        let res = self.ctx.draw_canvas().map(|_| ());
        self.record(res);
        self.schedule_frame();
    }

    fn schedule_frame(&mut self) {
        self.next_frame = self
            .ctx
            .take_animation_frame_request()
            .then(|| self.now.after(self.frame_interval));
    }

    fn record(&mut self, res: SketchResult<()>) {
        if let Err(e) = res {
            tracing::error!(now = %self.now, error = %e, "handler failed");
            self.errors.push(e);
        }
    }
}

impl<H, S> EventLoop<H, S> {
    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// The sketch being driven.
    pub fn context(&self) -> &SketchContext<H, S> {
        &self.ctx
    }

    /// Stop the loop and return the sketch.
    pub fn into_context(self) -> SketchContext<H, S> {
        self.ctx
    }

    /// Debounced relayouts so far, not counting the initial layout.
    pub fn relayout_count(&self) -> u64 {
        self.relayouts
    }

    /// Animation frames drawn so far.
    pub fn animation_ticks(&self) -> u64 {
        self.animation_ticks
    }

    /// Whether a resize is waiting out its quiet period.
    pub fn resize_pending(&self) -> bool {
        self.resize.deadline().is_some()
    }

    /// Drain the errors handlers have reported.
    pub fn take_errors(&mut self) -> Vec<SketchError> {
        std::mem::take(&mut self.errors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/event_loop.rs"]
mod tests;
