//! fxcanvas is a deterministic generative-art canvas template.
//!
//! A run is driven by a host platform that supplies a seeded random source and a run hash.
//! The crate turns that into pixels in three stages:
//!
//! 1. **Setup**: `Host -> FeatureRecord` (all random decisions, made exactly once)
//! 2. **Layout**: `Viewport + UrlOverrides -> SurfaceLayout` (fit the canvas, pick the backing size)
//! 3. **Draw**: `FeatureRecord + size -> Scene -> FrameRGBA` (CPU raster via `vello_cpu`)
//!
//! Exports encode the current surface as PNG and hand it to a [`DownloadSink`].
//!
//! The browser page the template was written for is modelled as a single-threaded runtime
//! ([`EventLoop`]) with a virtual clock: resizes are debounced, `s` saves, and the one-shot
//! preview / forced-download side effects are latches on [`SketchContext`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same hash yields the same features and byte-identical pixels.
//! - **No randomness in drawing**: only setup consumes the host random source.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod export;
mod features;
mod foundation;
mod host;
mod layout;
mod params;
mod render;
mod runtime;

pub use config::SketchConfig;
pub use export::{
    DirectorySink, Download, DownloadSink, InMemorySink, encode_png, export_file_name,
};
pub use features::generate::{FeatureRecord, FeatureSummary, FeatureValue, generate_features};
pub use features::palette::{BACKGROUNDS, FOREGROUNDS, NamedColor};
pub use foundation::core::{Color, Line, Point, Rect};
pub use foundation::error::{SketchError, SketchResult};
pub use host::hash::FxHash;
pub use host::rand::Sfc32;
pub use host::{HeadlessHost, Host};
pub use layout::surface::{SurfaceLayout, Viewport, layout_surface};
pub use params::UrlOverrides;
pub use render::cpu::CpuRasterizer;
pub use render::scene::{DrawOp, LineCap, Scene, build_scene};
pub use render::{FrameRGBA, unpremultiply_in_place};
pub use runtime::clock::Millis;
pub use runtime::event_loop::{Event, EventLoop};
pub use runtime::sketch::{CanvasSurface, DrawOutcome, SketchContext};
pub use runtime::state::{Latch, LifecycleState};
