use std::f64::consts::PI;

use kurbo::{Arc, BezPath, Line, PathEl, Point, Vec2};

use crate::{
    foundation::{
        core::Color,
        error::{SketchError, SketchResult},
    },
    render::{
        FrameRGBA,
        scene::{DrawOp, LineCap, Scene},
    },
};

const CURVE_TOLERANCE: f64 = 0.1;

/// CPU rasterizer for [`Scene`]s, powered by `vello_cpu`.
///
/// The render context is kept between calls and reused while the surface size is unchanged.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("ctx_size", &self.ctx.as_ref().map(|c| (c.width(), c.height())))
            .finish()
    }
}

impl CpuRasterizer {
    /// A rasterizer with no cached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `scene` into a new premultiplied RGBA8 frame of the scene's size.
    #[tracing::instrument(skip_all, fields(width = scene.width, height = scene.height, ops = scene.ops.len()))]
    pub fn render(&mut self, scene: &Scene) -> SketchResult<FrameRGBA> {
        let (width, height) = surface_size_u16(scene.width, scene.height)?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for op in &scene.ops {
            match *op {
                DrawOp::FillRect { rect, color } => {
                    ctx.set_paint(paint(color));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        rect.x0, rect.y0, rect.x1, rect.y1,
                    ));
                }
                DrawOp::StrokeLine {
                    line,
                    width,
                    cap,
                    color,
                } => {
                    ctx.set_paint(paint(color));
                    ctx.fill_path(&bezpath_to_cpu(&stroke_outline(line, width, cap)));
                }
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: scene.width,
            height: scene.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn surface_size_u16(width: u32, height: u32) -> SketchResult<(u16, u16)> {
    let w = u16::try_from(width).ok().filter(|v| *v > 0);
    let h = u16::try_from(height).ok().filter(|v| *v > 0);
    match (w, h) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(SketchError::render(format!(
            "cannot rasterize a {width}x{height} surface (each side must be 1..={})",
            u16::MAX
        ))),
    }
}

fn paint(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Closed outline covered by stroking `line` with the given width and cap.
///
/// A round-capped segment is a capsule: two parallel edges joined by half circles around
/// each endpoint. A zero-length round segment degenerates to a disc.
pub(crate) fn stroke_outline(line: Line, width: f64, cap: LineCap) -> BezPath {
    let r = width / 2.0;
    let d = line.p1 - line.p0;
    let theta = if d.hypot2() > 0.0 { d.atan2() } else { 0.0 };
    let n = Vec2::new(-theta.sin(), theta.cos()) * r;

    let a = line.p0 + n;
    let b = line.p1 + n;
    let c = line.p1 - n;
    let e = line.p0 - n;

    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    match cap {
        LineCap::Butt => {
            path.line_to(c);
            path.line_to(e);
        }
        LineCap::Round => {
            half_circle(&mut path, line.p1, r, theta + PI / 2.0);
            path.line_to(e);
            half_circle(&mut path, line.p0, r, theta - PI / 2.0);
        }
    }
    path.close_path();
    path
}

// Clockwise-in-math-angles sweep of PI starting at `start`, i.e. bulging away from the segment.
fn half_circle(path: &mut BezPath, center: Point, r: f64, start: f64) {
    let arc = Arc::new(center, Vec2::new(r, r), start, -PI, 0.0);
    path.extend(arc.append_iter(CURVE_TOLERANCE));
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
