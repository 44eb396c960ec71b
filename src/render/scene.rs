use crate::{
    features::generate::FeatureRecord,
    foundation::core::{Color, Line, Point, Rect},
};

/// How the ends of a stroked line are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    Butt,
    /// Half-disc of the stroke width centred on the endpoint.
    Round,
}

/// One drawing command, in surface pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill colour.
        color: Color,
    },
    /// Stroke a straight segment.
    StrokeLine {
        /// Segment centre line.
        line: Line,
        /// Stroke width.
        width: f64,
        /// End cap style.
        cap: LineCap,
        /// Stroke colour.
        color: Color,
    },
}

/// Display list for one surface, painted in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Commands, back to front.
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// The stroked lines of the scene, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = (&Line, f64, LineCap, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokeLine {
                line,
                width,
                cap,
                color,
            } => Some((line, *width, *cap, *color)),
            DrawOp::FillRect { .. } => None,
        })
    }
}

/// Describe the artwork for a `width` x `height` surface.
///
/// The background covers the surface. Lines are spaced evenly down the surface at
/// `height / (count + 1)` intervals, span the middle third horizontally, are `height / 10`
/// thick and have round caps. Every size is relative to the surface, so the same features
/// look identical at any resolution.
pub fn build_scene(features: &FeatureRecord, width: u32, height: u32) -> Scene {
    let w = f64::from(width);
    let h = f64::from(height);

    let mut ops = Vec::with_capacity(1 + features.line_count());
    ops.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, w, h),
        color: features.background(),
    });

    let line_step = h / (features.line_count() as f64 + 1.0);
    let stroke_width = h / 10.0;
    for (i, color) in features.line_colours().iter().enumerate() {
        let y = line_step * (i as f64 + 1.0);
        ops.push(DrawOp::StrokeLine {
            line: Line::new(Point::new(w / 3.0, y), Point::new((w / 3.0) * 2.0, y)),
            width: stroke_width,
            cap: LineCap::Round,
            color: *color,
        });
    }

    Scene { width, height, ops }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
