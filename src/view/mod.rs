//! Host integration for the wave animation.
//!
//! [`WaveView`] owns the configuration, the latest viewport, the scheduler and
//! the renderer. A host forwards its lifecycle events (attach, detach,
//! visibility, resize) and calls [`WaveView::poll`] from its update loop and
//! [`WaveView::paint`] from its paint callback.

use crate::render::{CompositeRenderer, RenderError};
use crate::scheduler::{Clock, FrameScheduler, RepaintSink, SchedulerState, SystemClock};
use crate::wave::{ViewBounds, ViewportGeometry, WaveConfig, WavePath, WaveRuntimeState};
use image::RgbaImage;
use std::time::Duration;

/// Window visibility as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
    Gone,
}

/// A circular liquid-wave view.
pub struct WaveView<C: Clock = SystemClock> {
    config: WaveConfig,
    viewport: Option<ViewportGeometry>,
    scheduler: FrameScheduler<C>,
    renderer: CompositeRenderer,
}

impl WaveView<SystemClock> {
    pub fn new(config: WaveConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> WaveView<C> {
    pub fn with_clock(config: WaveConfig, clock: C) -> Self {
        let runtime = WaveRuntimeState::new(&config.params());
        Self {
            config,
            viewport: None,
            scheduler: FrameScheduler::with_clock(runtime, clock),
            renderer: CompositeRenderer::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: CompositeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.scheduler = self.scheduler.with_frame_interval(frame_interval);
        self
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Geometry from the last resize, if any.
    pub fn viewport(&self) -> Option<&ViewportGeometry> {
        self.viewport.as_ref()
    }

    pub fn scheduler(&self) -> &FrameScheduler<C> {
        &self.scheduler
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn path(&self) -> &WavePath {
        self.scheduler.path()
    }

    pub fn on_attached(&mut self) {
        self.scheduler.start();
    }

    pub fn on_detached(&mut self) {
        self.scheduler.stop();
    }

    /// `Gone` stops the animation; any other visibility re-posts a tick right away.
    pub fn on_visibility_changed(&mut self, visibility: Visibility) {
        log::debug!("Wave view visibility changed to {:?}", visibility);
        match visibility {
            Visibility::Gone => self.scheduler.stop(),
            Visibility::Visible | Visibility::Invisible => self.scheduler.restart(),
        }
    }

    /// Recompute the viewport for new bounds.
    pub fn on_resize(&mut self, bounds: ViewBounds) {
        let viewport = ViewportGeometry::new(bounds, &self.config);
        log::debug!(
            "Wave view resized to {}x{} (wavelength {:.1})",
            viewport.width,
            viewport.height,
            viewport.wavelength
        );
        self.viewport = Some(viewport);
        self.scheduler
            .reseed_background(&WaveRuntimeState::new(&self.config.params()));
    }

    /// Run the pending tick if it is due.
    ///
    /// Returns how long the host may wait before polling again, or `None` when stopped.
    /// Ticks are held back until the first resize.
    pub fn poll(&mut self, repaint: &mut dyn RepaintSink) -> Option<Duration> {
        match self.viewport {
            Some(viewport) => self.scheduler.poll(&self.config, &viewport, repaint),
            None => self
                .scheduler
                .is_running()
                .then_some(self.scheduler.frame_interval()),
        }
    }

    /// Paint the current frame onto `output`.
    ///
    /// A rendering failure stops the animation before the error is returned,
    /// so a host that keeps polling will not retry the allocation every frame.
    pub fn paint(&mut self, output: &mut RgbaImage) -> Result<(), RenderError> {
        let Some(viewport) = self.viewport else {
            return Ok(());
        };
        if self.scheduler.path().is_empty() {
            return Ok(());
        }

        let result = self.renderer.render(
            self.scheduler.path(),
            self.config.foreground,
            self.config.background,
            &viewport,
            output,
        );
        if let Err(err) = &result {
            log::error!("Wave rendering failed, stopping animation: {}", err);
            self.scheduler.stop();
        }
        result
    }
}
