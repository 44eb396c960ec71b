pub(crate) mod hash;
pub(crate) mod rand;

use crate::features::generate::FeatureSummary;
use hash::FxHash;
use rand::Sfc32;

/// The token-generation platform a sketch runs inside.
///
/// The host owns the run identity (hash + seeded random source) and receives the sketch's
/// reports. Only setup may call [`Host::rand`]; drawing must not consume randomness.
pub trait Host {
    /// The run-identifying hash.
    fn hash(&self) -> &FxHash;

    /// Next uniform sample in `[0, 1)`, deterministic for a given hash.
    fn rand(&mut self) -> f64;

    /// Receive the human-readable feature summary (called once, before readiness).
    fn report_features(&mut self, summary: &FeatureSummary);

    /// The first render finished; a preview snapshot may be captured.
    fn preview(&mut self);

    /// One-shot message to the embedding parent context.
    fn post_parent_message(&mut self, message: &str);
}

/// In-process host that mirrors the fxhash snippet and records everything it is told.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    hash: FxHash,
    rng: Sfc32,
    features: Option<FeatureSummary>,
    previews: u32,
    parent_messages: Vec<String>,
}

impl HeadlessHost {
    /// Host for a given run hash; the random source is seeded from it.
    pub fn new(hash: FxHash) -> Self {
        Self {
            rng: hash.rng(),
            hash,
            features: None,
            previews: 0,
            parent_messages: Vec::new(),
        }
    }

    /// The summary reported by the sketch, if any.
    pub fn reported_features(&self) -> Option<&FeatureSummary> {
        self.features.as_ref()
    }

    /// How many times the sketch signalled "preview ready".
    pub fn preview_count(&self) -> u32 {
        self.previews
    }

    /// Messages posted to the parent context, in order.
    pub fn parent_messages(&self) -> &[String] {
        &self.parent_messages
    }
}

impl Host for HeadlessHost {
    fn hash(&self) -> &FxHash {
        &self.hash
    }

    fn rand(&mut self) -> f64 {
        self.rng.next_f64()
    }

    fn report_features(&mut self, summary: &FeatureSummary) {
        if self.features.is_some() {
            tracing::warn!("features reported more than once; keeping the latest");
        }
        self.features = Some(summary.clone());
    }

    fn preview(&mut self) {
        self.previews = self.previews.saturating_add(1);
        tracing::debug!(count = self.previews, "host preview signalled");
    }

    fn post_parent_message(&mut self, message: &str) {
        tracing::debug!(message, "posted message to parent");
        self.parent_messages.push(message.to_owned());
    }
}

#[cfg(test)]
#[path = "../tests/unit/host/host.rs"]
mod tests;
