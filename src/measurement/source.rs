//! The measurement source trait.

use crate::types::{Measurement, NoiseModel};

/// A producer of ordered measurement batches.
///
/// Implementations may generate batches however they like (hardware reads,
/// simulation, replay from a file) as long as they declare their noise
/// characteristics. Batch order is significant: later batches compound on
/// top of earlier ones through the multiplicative posterior update.
pub trait MeasurementSource {
    /// Yield the next batch, or `None` when exhausted.
    fn next_batch(&mut self) -> Option<Vec<Measurement>>;

    /// The declared noise characteristics of this source.
    fn noise(&self) -> NoiseModel;
}

/// Replay a fixed list of batches. Useful for tests and for feeding
/// pre-collected data through the streaming API.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    batches: std::vec::IntoIter<Vec<Measurement>>,
    noise: NoiseModel,
}

impl ReplaySource {
    /// Create a replay source over pre-collected batches.
    pub fn new(batches: Vec<Vec<Measurement>>, noise: NoiseModel) -> Self {
        Self {
            batches: batches.into_iter(),
            noise,
        }
    }
}

impl MeasurementSource for ReplaySource {
    fn next_batch(&mut self) -> Option<Vec<Measurement>> {
        self.batches.next()
    }

    fn noise(&self) -> NoiseModel {
        self.noise
    }
}
