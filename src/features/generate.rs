use std::collections::BTreeMap;

use crate::{
    features::palette::{BACKGROUNDS, FOREGROUNDS, NamedColor},
    foundation::{
        core::Color,
        error::{SketchError, SketchResult},
    },
    host::Host,
};

/// Smallest and largest number of lines a run can have.
pub(crate) const LINE_COUNT_RANGE: std::ops::RangeInclusive<usize> = 2..=4;

/// Everything the renderer needs to draw a run.
///
/// Built once during setup and never mutated; the renderer only reads it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FeatureRecord {
    background: NamedColor,
    line_colours: Vec<Color>,
}

impl FeatureRecord {
    /// Assemble a record directly; the line count must lie in `2..=4`.
    pub fn new(background: NamedColor, line_colours: Vec<Color>) -> SketchResult<Self> {
        if !LINE_COUNT_RANGE.contains(&line_colours.len()) {
            return Err(SketchError::validation(format!(
                "line count must be in {}..={}, got {}",
                LINE_COUNT_RANGE.start(),
                LINE_COUNT_RANGE.end(),
                line_colours.len()
            )));
        }
        Ok(Self {
            background,
            line_colours,
        })
    }

    /// Background colour.
    pub fn background(&self) -> Color {
        self.background.color
    }

    /// Display name of the background colour.
    pub fn background_name(&self) -> &'static str {
        self.background.name
    }

    /// Line colours, top to bottom.
    pub fn line_colours(&self) -> &[Color] {
        &self.line_colours
    }

    /// Number of lines to draw.
    pub fn line_count(&self) -> usize {
        self.line_colours.len()
    }

    /// Display-oriented projection reported to the host.
    pub fn summary(&self) -> FeatureSummary {
        let mut summary = FeatureSummary::default();
        summary.insert("Background", FeatureValue::Text(self.background.name.to_owned()));
        summary.insert(
            "Number of lines",
            FeatureValue::Number(self.line_colours.len() as u64),
        );
        summary
    }
}

/// A display value in the feature summary.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Integer feature.
    Number(u64),
    /// Free-text feature.
    Text(String),
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Human-readable feature summary: display name to display value.
///
/// Entries are kept sorted by display name, in iteration and in the serialised JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FeatureSummary(BTreeMap<String, FeatureValue>);

impl FeatureSummary {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.0.insert(name.into(), value);
    }

    /// Look up a feature by display name.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.0.get(name)
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the summary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Make every random decision for the run and report the summary to the host.
///
/// Consumes exactly `2 + line_count` samples, in this order: background, line count, then
/// one per line.
#[tracing::instrument(skip_all, fields(hash = %host.hash()))]
pub fn generate_features<H: Host + ?Sized>(host: &mut H) -> FeatureRecord {
    let background = BACKGROUNDS[pick_index(host.rand(), BACKGROUNDS.len())];

    let span = LINE_COUNT_RANGE.end() - LINE_COUNT_RANGE.start() + 1;
    let line_count = pick_index(host.rand(), span) + LINE_COUNT_RANGE.start();

    let line_colours = (0..line_count)
        .map(|_| FOREGROUNDS[pick_index(host.rand(), FOREGROUNDS.len())])
        .collect();

    let record = FeatureRecord {
        background,
        line_colours,
    };
    let summary = record.summary();
    for (name, value) in summary.iter() {
        tracing::info!(feature = name, value = %value, "feature");
    }
    host.report_features(&summary);
    record
}

/// `floor(sample * len)`, clamped into `0..len`.
fn pick_index(sample: f64, len: usize) -> usize {
    let i = (sample * len as f64).floor();
    (i as usize).min(len.saturating_sub(1))
}

#[cfg(test)]
#[path = "../../tests/unit/features/generate.rs"]
mod tests;
