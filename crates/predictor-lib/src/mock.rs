//! Mock prediction client for offline development
//!
//! Returns a uniformly random weight in `[0, 10)` pounds per record, with no
//! network calls and no error paths.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::models::Baby;

pub struct MockPredictionClient {
    rng: StdRng,
}

impl MockPredictionClient {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One random value per input record, order-aligned
    pub fn mock_batch_predict(&mut self, records: &[Baby]) -> Vec<f64> {
        info!(instances = records.len(), "mock prediction");
        records
            .iter()
            .map(|_| self.rng.gen_range(0.0..10.0))
            .collect()
    }
}

impl Default for MockPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records(n: usize) -> Vec<Baby> {
        (0..n)
            .map(|i| {
                Baby::from_csv(&format!("7.5,True,28,White,1,40.0,True,,,key{}", i)).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_output_length_matches_input() {
        let mut client = MockPredictionClient::new();
        for n in [0, 1, 5, 100] {
            let records = sample_records(n);
            assert_eq!(client.mock_batch_predict(&records).len(), n);
        }
    }

    #[test]
    fn test_values_in_range() {
        let mut client = MockPredictionClient::seeded(7);
        let records = sample_records(1000);
        for value in client.mock_batch_predict(&records) {
            assert!((0.0..10.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let records = sample_records(10);
        let a = MockPredictionClient::seeded(42).mock_batch_predict(&records);
        let b = MockPredictionClient::seeded(42).mock_batch_predict(&records);
        assert_eq!(a, b);
    }
}
