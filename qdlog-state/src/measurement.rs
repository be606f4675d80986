//! Multi-shot sampling of measurement outcomes

use crate::error::{Result, StateError};
use rand::Rng;
use std::collections::HashMap;

/// Sampling result containing counts from multiple measurement shots
#[derive(Debug, Clone, Default)]
pub struct SamplingResult {
    /// Map from outcome index to count
    pub counts: HashMap<usize, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    pub fn new(shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
        }
    }

    /// Add a measurement outcome
    pub fn add_outcome(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Get the count for a specific outcome
    pub fn get_count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Get the probability of an outcome (count / shots)
    pub fn get_probability(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Outcomes sorted by count (descending), ties by outcome
    pub fn sorted_outcomes(&self) -> Vec<(usize, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }

    /// Convert counts to bitstring format
    ///
    /// Bit 0 of the outcome is the rightmost character.
    pub fn to_bitstring_counts(&self, width: usize) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (format!("{:0width$b}", outcome, width = width), count))
            .collect()
    }
}

/// Draw `shots` outcomes from `probabilities`
///
/// Uses a cumulative table and binary search, so the distribution need not
/// be exactly normalized; it is rescaled by its total.
///
/// # Errors
/// Returns error if the distribution is empty, has a negative or non-finite
/// entry, or sums to zero.
pub fn sample_outcomes<R: Rng + ?Sized>(
    probabilities: &[f64],
    shots: usize,
    rng: &mut R,
) -> Result<SamplingResult> {
    if probabilities.is_empty() {
        return Err(StateError::InvalidDistribution {
            reason: "empty distribution".to_string(),
        });
    }
    if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(StateError::InvalidDistribution {
            reason: format!("invalid probability {}", p),
        });
    }

    let mut cumulative = Vec::with_capacity(probabilities.len());
    let mut total = 0.0;
    for &p in probabilities {
        total += p;
        cumulative.push(total);
    }
    if total <= 0.0 {
        return Err(StateError::InvalidDistribution {
            reason: "total probability is zero".to_string(),
        });
    }

    let last = probabilities.len() - 1;
    let mut result = SamplingResult::new(shots);
    for _ in 0..shots {
        let r = rng.gen::<f64>() * total;
        let outcome = cumulative.partition_point(|&c| c <= r).min(last);
        result.add_outcome(outcome);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampling_result() {
        let mut result = SamplingResult::new(100);
        for _ in 0..60 {
            result.add_outcome(0);
        }
        for _ in 0..40 {
            result.add_outcome(1);
        }

        assert_eq!(result.get_count(0), 60);
        assert_relative_eq!(result.get_probability(1), 0.4);
        assert_eq!(result.sorted_outcomes(), vec![(0, 60), (1, 40)]);
    }

    #[test]
    fn test_bitstring_counts() {
        let mut result = SamplingResult::new(2);
        result.add_outcome(0b0011);
        result.add_outcome(0b1000);

        let counts = result.to_bitstring_counts(4);
        assert_eq!(counts.get("0011"), Some(&1));
        assert_eq!(counts.get("1000"), Some(&1));
    }

    #[test]
    fn test_deterministic_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = sample_outcomes(&[0.0, 0.0, 1.0, 0.0], 50, &mut rng).unwrap();
        assert_eq!(result.get_count(2), 50);
    }

    #[test]
    fn test_seeded_sampling_reproducible() {
        let probs = [0.1, 0.2, 0.3, 0.4];
        let a = sample_outcomes(&probs, 200, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = sample_outcomes(&probs, 200, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_invalid_distributions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample_outcomes(&[], 1, &mut rng).is_err());
        assert!(sample_outcomes(&[0.0, 0.0], 1, &mut rng).is_err());
        assert!(sample_outcomes(&[0.5, -0.1], 1, &mut rng).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_never_samples_zero_probability(mask in 1u8..=255, seed in any::<u64>()) {
            let probs: Vec<f64> = (0..8).map(|i| if mask >> i & 1 == 1 { 1.0 } else { 0.0 }).collect();
            let result = sample_outcomes(&probs, 64, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(result.counts.values().sum::<usize>(), 64);
            for outcome in result.counts.keys() {
                prop_assert!(probs[*outcome] > 0.0);
            }
        }
    }
}
