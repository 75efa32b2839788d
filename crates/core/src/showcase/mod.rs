//! The auto-scrolling category showcase.
//!
//! [`Showcase`] owns one strip: its items, scroll state, animation driver and
//! the frame request that keeps it moving. Each frame it advances the
//! position, recomputes emphasis for the whole rendered sequence and hands the
//! result to its [`RenderSurface`].
//!
//! The scheduled callback only holds a weak reference to the widget. Teardown
//! cancels the pending request, and a callback that still fires afterwards
//! finds nothing alive and returns.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, trace, warn};

use crate::{
    config::ShowcaseConfig,
    emphasis::{CenterWeightPresenter, EmphasisValue},
    interaction::{InteractionController, InteractionEvent},
    render::{RenderSurface, StripFrame},
    sequence::{DisplayItem, ItemSequencer},
    timeline::{AnimationDriver, FrameHandle, FrameLoop, ScrollState, TickOutcome},
    LoopTopology,
};

struct ShowcaseInner {
    sequencer: ItemSequencer,
    /// `None` when the geometry is degenerate and the strip is disabled.
    presenter: Option<CenterWeightPresenter>,
    driver: AnimationDriver,
    state: ScrollState,
    interaction: InteractionController,
    viewport_width: f64,
    surface: Box<dyn RenderSurface>,
    frame: Option<FrameHandle>,
    alive: bool,
    frames_presented: u64,
}

impl ShowcaseInner {
    fn compose(&self, timestamp: Option<f64>) -> StripFrame {
        match &self.presenter {
            Some(presenter) => StripFrame::compose(
                &self.sequencer,
                presenter,
                self.state.position(),
                self.viewport_width,
                timestamp,
            ),
            None => StripFrame::empty(self.viewport_width),
        }
    }

    fn present(&mut self, timestamp: Option<f64>) {
        let frame = self.compose(timestamp);
        self.surface.present(&frame);
        self.frames_presented += 1;
    }

    fn on_frame(&mut self, timestamp: f64) {
        let topology = self.presenter.as_ref().map(CenterWeightPresenter::topology);
        let outcome = self.driver.tick(&mut self.state, topology, timestamp);
        trace!(timestamp, ?outcome, position = self.state.position(), "showcase frame");
        if outcome != TickOutcome::Disabled {
            self.present(Some(timestamp));
        }
    }
}

/// Handle to a mounted showcase strip. Dropping it tears the strip down.
pub struct Showcase {
    inner: Rc<RefCell<ShowcaseInner>>,
}

impl Showcase {
    /// Mounts a strip and schedules its first frame on `frames`.
    ///
    /// Degenerate setups (no items, non-positive unit width, or a config that
    /// fails validation) mount disabled: one empty frame is presented and no
    /// frame is ever requested.
    pub fn mount(
        items: Vec<DisplayItem>,
        config: &ShowcaseConfig,
        frames: &FrameLoop,
        surface: impl RenderSurface + 'static,
    ) -> Self {
        let sequencer = ItemSequencer::new(items);
        let presenter = match config.validate() {
            Ok(()) => LoopTopology::new(
                sequencer.len(),
                config.layout.card_width,
                config.layout.gap,
            )
            .map(|topology| CenterWeightPresenter::new(topology, config.emphasis.clone())),
            Err(err) => {
                warn!(%err, "invalid showcase configuration");
                None
            }
        };

        if presenter.is_none() {
            debug!(
                items = sequencer.len(),
                unit_width = config.unit_width(),
                "showcase disabled"
            );
        }

        let inner = Rc::new(RefCell::new(ShowcaseInner {
            sequencer,
            presenter,
            driver: AnimationDriver::new(config.motion.clone()),
            state: ScrollState::new(),
            interaction: InteractionController::new(),
            viewport_width: config.layout.viewport_width,
            surface: Box::new(surface),
            frame: None,
            alive: true,
            frames_presented: 0,
        }));

        let enabled = inner.borrow().presenter.is_some();
        if enabled {
            let handle = schedule(frames, Rc::downgrade(&inner));
            inner.borrow_mut().frame = Some(handle);
            debug!(items = inner.borrow().sequencer.len(), "showcase mounted");
        } else {
            inner.borrow_mut().present(None);
        }

        Self { inner }
    }

    /// Routes a surface event through the interaction controller.
    pub fn handle(&self, event: InteractionEvent) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive {
            return;
        }
        let ShowcaseInner {
            interaction,
            state,
            presenter,
            ..
        } = &mut *inner;
        let topology = presenter.as_ref().map(CenterWeightPresenter::topology);
        let changed = interaction.apply(event, state, topology);

        if let InteractionEvent::ManualScroll { offset } = event {
            trace!(offset, position = inner.state.position(), "manual scroll");
            // Emphasis follows every position change, not just frame ticks.
            if changed {
                inner.present(None);
            }
        } else if changed {
            debug!(?event, paused = inner.state.is_paused(), "showcase pause toggled");
        }
    }

    pub fn pointer_enter(&self) {
        self.handle(InteractionEvent::PointerEnter);
    }

    pub fn pointer_leave(&self) {
        self.handle(InteractionEvent::PointerLeave);
    }

    pub fn focus_in(&self) {
        self.handle(InteractionEvent::FocusIn);
    }

    pub fn focus_out(&self) {
        self.handle(InteractionEvent::FocusOut);
    }

    /// Accepts an absolute offset from a drag or direct scroll; the driver
    /// continues from the wrapped value on the next tick.
    pub fn manual_scroll(&self, offset: f64) {
        self.handle(InteractionEvent::ManualScroll { offset });
    }

    /// Records a new viewport measurement and re-presents the strip.
    pub fn resize(&self, viewport_width: f64) {
        let mut inner = self.inner.borrow_mut();
        if !inner.alive || inner.viewport_width == viewport_width {
            return;
        }
        inner.viewport_width = viewport_width;
        inner.present(None);
    }

    pub fn position(&self) -> f64 {
        self.inner.borrow().state.position()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().state.is_paused()
    }

    /// Whether animation is possible at all for this strip.
    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().presenter.is_some()
    }

    /// Whether a frame is currently scheduled.
    pub fn is_running(&self) -> bool {
        let inner = self.inner.borrow();
        inner.alive && inner.frame.as_ref().is_some_and(FrameHandle::is_pending)
    }

    pub fn item_count(&self) -> usize {
        self.inner.borrow().sequencer.len()
    }

    pub fn viewport_width(&self) -> f64 {
        self.inner.borrow().viewport_width
    }

    pub fn frames_presented(&self) -> u64 {
        self.inner.borrow().frames_presented
    }

    /// Emphasis for all `2N` rendered cards at the current position.
    pub fn emphasis(&self) -> Vec<EmphasisValue> {
        let inner = self.inner.borrow();
        match &inner.presenter {
            Some(presenter) => presenter.evaluate(inner.state.position(), inner.viewport_width),
            None => Vec::new(),
        }
    }

    /// Composes the current frame without presenting it.
    pub fn snapshot(&self) -> StripFrame {
        self.inner.borrow().compose(None)
    }

    /// Cancels the pending frame and stops reacting to events. Safe to call
    /// more than once.
    pub fn teardown(&self) {
        let handle = {
            let mut inner = self.inner.borrow_mut();
            if !inner.alive {
                return;
            }
            inner.alive = false;
            inner.frame.take()
        };
        if let Some(mut handle) = handle {
            handle.cancel();
        }
        debug!("showcase torn down");
    }
}

impl Drop for Showcase {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for Showcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Showcase")
            .field("items", &inner.sequencer.len())
            .field("enabled", &inner.presenter.is_some())
            .field("state", &inner.state)
            .field("viewport_width", &inner.viewport_width)
            .field("alive", &inner.alive)
            .finish()
    }
}

fn schedule(frame_loop: &FrameLoop, target: Weak<RefCell<ShowcaseInner>>) -> FrameHandle {
    let frames = frame_loop.downgrade();
    frame_loop.request_frame(move |timestamp| {
        let Some(inner) = target.upgrade() else {
            trace!("frame fired after the showcase was dropped");
            return;
        };
        if !inner.borrow().alive {
            return;
        }

        inner.borrow_mut().on_frame(timestamp);

        if let Some(frame_loop) = frames.upgrade() {
            let next = schedule(&frame_loop, Rc::downgrade(&inner));
            inner.borrow_mut().frame = Some(next);
        }
    })
}
