//! Measurement source abstraction.
//!
//! The inference core never generates its own measurements or noise; both
//! are injected. Any producer of `(value, count)` batches with a declared
//! noise model can drive the oracle, regardless of how its stream was
//! produced.

mod source;
mod synthetic;

pub use source::{MeasurementSource, ReplaySource};
pub use synthetic::SyntheticSource;

use std::collections::BTreeMap;

use crate::types::Measurement;

/// Aggregate measurements into a value → count histogram.
pub fn histogram(measurements: &[Measurement]) -> BTreeMap<u64, u64> {
    let mut hist = BTreeMap::new();
    for m in measurements {
        if m.count > 0 {
            *hist.entry(m.value).or_insert(0) += m.count;
        }
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_merges_duplicates() {
        let measurements = vec![
            Measurement::new(5, 3),
            Measurement::new(5, 2),
            Measurement::new(9, 1),
            Measurement::new(7, 0),
        ];
        let hist = histogram(&measurements);
        assert_eq!(hist.get(&5), Some(&5));
        assert_eq!(hist.get(&9), Some(&1));
        assert_eq!(hist.get(&7), None);
    }

    #[test]
    fn histogram_of_empty_is_empty() {
        assert!(histogram(&[]).is_empty());
    }
}
