use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{SketchError, SketchResult};

/// Per-project settings of the template.
///
/// Missing JSON fields fall back to [`SketchConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Canvas aspect ratio, width / height (e.g. `1.0`, `16/9`, `1/1.414`).
    pub ratio: f64,
    /// Filename prefix for exported images.
    pub prefix: String,
    /// Redraw on every animation frame.
    pub animated: bool,
    /// Quiet period after the last resize before relayout.
    pub resize_quiet_ms: u64,
    /// Interval between animation frames when `animated` is set.
    pub frame_interval_ms: u64,
    /// Id given to the drawing surface.
    pub canvas_id: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            prefix: "my_fxhash_project".to_owned(),
            animated: false,
            resize_quiet_ms: 100,
            frame_interval_ms: 16,
            canvas_id: "target".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Read a JSON config file and validate it.
    pub fn from_path(path: &Path) -> SketchResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| SketchError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants the runtime relies on.
    pub fn validate(&self) -> SketchResult<()> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(SketchError::validation(format!(
                "ratio must be finite and > 0, got {}",
                self.ratio
            )));
        }
        if self.prefix.trim().is_empty() {
            return Err(SketchError::validation("prefix must not be empty"));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(SketchError::validation("prefix must not contain path separators"));
        }
        if self.frame_interval_ms == 0 {
            return Err(SketchError::validation("frame_interval_ms must be > 0"));
        }
        if self.canvas_id.is_empty() {
            return Err(SketchError::validation("canvas_id must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.resize_quiet_ms)
    }

    pub(crate) fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
