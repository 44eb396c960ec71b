use std::str::FromStr;

use crate::foundation::error::SketchError;

/// The window the canvas is fitted into, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Inner width in CSS pixels.
    pub width: f64,
    /// Inner height in CSS pixels.
    pub height: f64,
    /// Physical pixels per CSS pixel.
    #[serde(default = "one")]
    pub device_pixel_ratio: f64,
}

fn one() -> f64 {
    1.0
}

impl Viewport {
    /// Viewport with a device pixel ratio of 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Same viewport with a different device pixel ratio.
    pub fn with_device_pixel_ratio(self, device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            ..self
        }
    }
}

/// Parses `WIDTHxHEIGHT` with an optional `@RATIO` suffix, e.g. `800x600` or `390x844@3`.
impl FromStr for Viewport {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SketchError::validation(format!("invalid viewport \"{s}\" (want WxH[@DPR])"));
        let (size, dpr) = match s.split_once('@') {
            Some((size, dpr)) => (size, dpr.trim().parse::<f64>().map_err(|_| bad())?),
            None => (s, 1.0),
        };
        let (w, h) = size.split_once(['x', 'X']).ok_or_else(bad)?;
        let w: f64 = w.trim().parse().map_err(|_| bad())?;
        let h: f64 = h.trim().parse().map_err(|_| bad())?;
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(w) || !finite_positive(h) || !finite_positive(dpr) {
            return Err(bad());
        }
        Ok(Self::new(w, h).with_device_pixel_ratio(dpr))
    }
}

/// Where and how big the drawing surface is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceLayout {
    /// Backing-store width in physical pixels.
    pub backing_width: u32,
    /// Backing-store height in physical pixels.
    pub backing_height: u32,
    /// Display width in CSS pixels.
    pub css_width: f64,
    /// Display height in CSS pixels.
    pub css_height: f64,
    /// Absolute left offset that centres the surface.
    pub left: f64,
    /// Absolute top offset that centres the surface.
    pub top: f64,
    /// Device pixel ratio actually applied to the backing store.
    pub device_pixel_ratio: f64,
}

impl SurfaceLayout {
    /// `(backing_width, backing_height)`.
    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }
}

/// Fit a `ratio` (width / height) surface inside `viewport`.
///
/// The display size shrinks to the limiting viewport dimension and is centred. The backing
/// store is the display size times the device pixel ratio, truncated to whole pixels. A
/// `force_width` replaces the backing width verbatim, derives the height from the ratio, and
/// pins the device pixel ratio to 1; the display size is unaffected.
pub fn layout_surface(viewport: Viewport, ratio: f64, force_width: Option<u32>) -> SurfaceLayout {
    let Viewport {
        width: vw,
        height: vh,
        device_pixel_ratio,
    } = viewport;

    let mut dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        tracing::warn!(device_pixel_ratio, "unusable device pixel ratio, using 1");
        1.0
    };

    let mut css_width = vw;
    let mut css_height = css_width / ratio;
    if css_height > vh {
        css_height = vh;
        css_width = vh * ratio;
    }

    let mut target_height = css_height;
    let mut target_width = target_height * ratio;

    if let Some(fw) = force_width {
        target_width = f64::from(fw);
        target_height = (target_width / ratio).floor();
        dpr = 1.0;
    }

    SurfaceLayout {
        backing_width: (target_width * dpr) as u32,
        backing_height: (target_height * dpr) as u32,
        css_width,
        css_height,
        left: (vw - css_width) / 2.0,
        top: (vh - css_height) / 2.0,
        device_pixel_ratio: dpr,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/surface.rs"]
mod tests;
