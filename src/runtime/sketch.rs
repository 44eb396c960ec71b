use crate::{
    config::SketchConfig,
    export::{Download, DownloadSink, encode_png, export_file_name},
    features::generate::{FeatureRecord, generate_features},
    foundation::error::{SketchError, SketchResult},
    host::Host,
    layout::surface::{SurfaceLayout, Viewport, layout_surface},
    params::UrlOverrides,
    render::{FrameRGBA, cpu::CpuRasterizer, scene::build_scene},
    runtime::state::{Latch, LifecycleState},
};

/// Message posted to the parent context after a forced download.
pub(crate) const FORCE_DOWNLOADED_MESSAGE: &str = "forceDownloaded";

/// The single drawing surface currently on the page.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    id: String,
    generation: u64,
    layout: SurfaceLayout,
    frame: Option<FrameRGBA>,
}

impl CanvasSurface {
    /// Element id of the surface.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 1 for the first surface of a run, incremented on every recreation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size and placement.
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Pixels of the last completed draw, if any.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }
}

/// What a draw pass did besides painting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Digest of the painted pixels.
    pub fingerprint: u64,
    /// This pass signalled "preview ready" to the host.
    pub previewed: bool,
    /// The forced download this pass performed, if any.
    pub forced_download: Option<Download>,
}

/// Process-wide state of one run: features, overrides, the current surface and the one-shot
/// latches, passed explicitly to layout and drawing.
pub struct SketchContext<H, S> {
    config: SketchConfig,
    overrides: UrlOverrides,
    host: H,
    sink: S,
    features: FeatureRecord,
    state: LifecycleState,
    surface: Option<CanvasSurface>,
    surfaces_created: u64,
    rasterizer: CpuRasterizer,
    preview: Latch,
    forced_download: Latch,
    animation_frame_requested: bool,
}

impl<H: Host, S: DownloadSink> SketchContext<H, S> {
    /// Validate the config and run setup: decide the features and report them to the host.
    pub fn new(
        config: SketchConfig,
        overrides: UrlOverrides,
        mut host: H,
        sink: S,
    ) -> SketchResult<Self> {
        config.validate()?;
        let features = generate_features(&mut host);

        let mut ctx = Self {
            config,
            overrides,
            host,
            sink,
            features,
            state: LifecycleState::Uninitialized,
            surface: None,
            surfaces_created: 0,
            rasterizer: CpuRasterizer::new(),
            preview: Latch::Armed,
            forced_download: Latch::Armed,
            animation_frame_requested: false,
        };
        ctx.transition(LifecycleState::FeaturesComputed);
        Ok(ctx)
    }

    /// Recreate the surface for `viewport` and draw into it.
    #[tracing::instrument(skip(self))]
    pub fn layout_canvas(&mut self, viewport: Viewport) -> SketchResult<DrawOutcome> {
        self.animation_frame_requested = false;

        let layout = layout_surface(viewport, self.config.ratio, self.overrides.force_width);
        if let Some(old) = self.surface.take() {
            tracing::debug!(generation = old.generation, "removed previous surface");
        }

        self.surfaces_created += 1;
        tracing::debug!(
            generation = self.surfaces_created,
            backing_width = layout.backing_width,
            backing_height = layout.backing_height,
            css_width = layout.css_width,
            css_height = layout.css_height,
            left = layout.left,
            top = layout.top,
            "created surface"
        );
        self.surface = Some(CanvasSurface {
            id: self.config.canvas_id.clone(),
            generation: self.surfaces_created,
            layout,
            frame: None,
        });
        self.transition(LifecycleState::Ready);

        self.draw_canvas()
    }

    /// Paint the current surface and run the first-render side effects.
    ///
    /// The first successful pass signals the host preview. When `forceDownload` is set, the
    /// first pass also exports and posts `forceDownloaded` to the parent; this happens at
    /// most once per run even if that export fails.
    pub fn draw_canvas(&mut self) -> SketchResult<DrawOutcome> {
        self.animation_frame_requested = false;

        let (width, height) = match &self.surface {
            Some(surface) => surface.layout.backing_size(),
            None => return Err(SketchError::render("no surface has been laid out")),
        };

        self.transition(LifecycleState::Rendering);
        let scene = build_scene(&self.features, width, height);
        let rendered = self.rasterizer.render(&scene);
        self.transition(LifecycleState::Idle);

        let frame = rendered?;
        let fingerprint = frame.fingerprint();
        if let Some(surface) = self.surface.as_mut() {
            surface.frame = Some(frame);
        }

        let previewed = self.preview.fire();
        if previewed {
            self.host.preview();
        }

        let mut forced_download = None;
        if self.overrides.force_download && self.forced_download.fire() {
            forced_download = Some(self.export()?);
            self.host.post_parent_message(FORCE_DOWNLOADED_MESSAGE);
        }

        if self.config.animated {
            self.animation_frame_requested = true;
        }

        Ok(DrawOutcome {
            fingerprint,
            previewed,
            forced_download,
        })
    }

    /// Encode the current surface as PNG and hand it to the download sink.
    #[tracing::instrument(skip(self))]
    pub fn export(&mut self) -> SketchResult<Download> {
        let frame = self
            .surface
            .as_ref()
            .and_then(|s| s.frame.as_ref())
            .ok_or_else(|| SketchError::export("nothing has been drawn yet"))?;

        let padded_id = self.overrides.padded_force_id();
        let file_name = export_file_name(
            &self.config.prefix,
            self.host.hash().as_str(),
            padded_id.as_deref(),
        );
        let bytes = encode_png(frame)?;
        let download = self.sink.download(&file_name, &bytes)?;
        tracing::info!(file = %download.file_name, bytes = download.len, "exported canvas");
        Ok(download)
    }

    /// Take the pending animation-frame request left by the last draw.
    pub(crate) fn take_animation_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.animation_frame_requested)
    }

    fn transition(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal lifecycle step {:?} -> {next:?}",
            self.state
        );
        tracing::trace!(from = ?self.state, to = ?next, "lifecycle");
        self.state = next;
    }
}

impl<H, S> SketchContext<H, S> {
    /// The run's features.
    pub fn features(&self) -> &FeatureRecord {
        &self.features
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The surface currently on the page.
    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    /// How many surfaces have been created so far.
    pub fn surfaces_created(&self) -> u64 {
        self.surfaces_created
    }

    /// Whether the host has been told a preview is ready.
    pub fn preview_signalled(&self) -> bool {
        self.preview.is_fired()
    }

    /// Whether the forced download has happened.
    pub fn force_downloaded(&self) -> bool {
        self.forced_download.is_fired()
    }

    /// Active configuration.
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Query-string overrides.
    pub fn overrides(&self) -> &UrlOverrides {
        &self.overrides
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The download sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the host and sink.
    pub fn into_parts(self) -> (H, S) {
        (self.host, self.sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/sketch.rs"]
mod tests;
