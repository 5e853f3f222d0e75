//! Probability engine: raw scores to normalized selection weights.
//!
//! Weights follow an inverse law so that candidates with lower raw scores
//! (picked less often so far) are more likely to be picked next.
//!
//! # Formula
//!
//! `weight_i = (1 / (score_i + epsilon + offset)) / Σ_j (1 / (score_j + epsilon + offset))`
//!
//! followed by a floor (at least [`MIN_SEGMENT_WEIGHT`]), a residual fix on the last weight and one
//! final normalizing pass so the weights sum to 1 as closely as `f64` allows.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::candidate::{Candidate, WeightedCandidate};
use crate::error::InputError;

/// Smallest weight ever handed out, whatever the configured floor.
///
/// Keeps every segment at least a few nanoradians wide, so its end angle
/// stays distinct from its start after accumulation in `f64`.
pub const MIN_SEGMENT_WEIGHT: f64 = 1e-9;

/// Parameters of the inverse-score law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Added to every raw score so a zero score stays well-behaved
    pub epsilon: f64,
    /// Fixed offset in the denominator; bounds the weight of a zero score
    pub offset: f64,
    /// Lower bound on any single weight; below [`MIN_SEGMENT_WEIGHT`] that
    /// constant applies instead
    pub min_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-8,
            offset: 0.01,
            min_weight: 0.0,
        }
    }
}

impl WeightConfig {
    /// Weight floor used by the video renderer: a hundredth of a degree.
    pub const RENDER_FLOOR: f64 = 0.01 / 360.0;

    /// Check that the parameters produce finite, positive weights.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] when a parameter is non-finite,
    /// when `epsilon + offset` is not positive, or when `min_weight` falls
    /// outside `[0, 1)`.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(InputError::invalid_config(
                "epsilon",
                format!("must be finite and non-negative (got {})", self.epsilon),
            ));
        }
        if !self.offset.is_finite() || self.epsilon + self.offset <= 0.0 {
            return Err(InputError::invalid_config(
                "offset",
                format!(
                    "epsilon + offset must be positive (got {})",
                    self.epsilon + self.offset
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.min_weight) {
            return Err(InputError::invalid_config(
                "min_weight",
                format!("must lie in [0, 1) (got {})", self.min_weight),
            ));
        }
        Ok(())
    }
}

/// Compute one normalized weight per candidate, preserving order.
///
/// The input is the already-filtered active roster; the `excluded` flag is
/// not consulted here. An empty input yields an empty output.
///
/// # Example
///
/// ```
/// use sector::{compute_weights, Candidate, WeightConfig};
///
/// let weights = compute_weights(
///     &[Candidate::new("ada", 1.0), Candidate::new("bob", 4.0)],
///     &WeightConfig::default(),
/// );
/// assert!(weights[0].weight > weights[1].weight);
/// let total: f64 = weights.iter().map(|w| w.weight).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn compute_weights(candidates: &[Candidate], config: &WeightConfig) -> Vec<WeightedCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let inverted: Vec<f64> = candidates
        .iter()
        .map(|c| 1.0 / (c.raw_score + config.epsilon + config.offset))
        .collect();

    let mut weights = normalized(&inverted);

    let floor = config.min_weight.max(MIN_SEGMENT_WEIGHT);
    let mut lifted = 0usize;
    for w in &mut weights {
        if *w < floor {
            *w = floor;
            lifted += 1;
        }
    }
    if lifted > 0 {
        trace!(lifted, floor, "weights raised to floor");
        weights = normalized(&weights);
    }

    // Residual fix, then one more pass so rounding in the fix is spread out
    let sum: f64 = weights.iter().sum();
    if let Some(last) = weights.last_mut() {
        *last += 1.0 - sum;
    }
    let weights = normalized(&weights);

    candidates
        .iter()
        .zip(weights)
        .map(|(c, weight)| WeightedCandidate::new(c.id.clone(), weight))
        .collect()
}

fn normalized(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values.iter().map(|v| v / total).collect()
}

/// Draw an index with probability proportional to its weight.
///
/// Returns `None` for an empty list. Float shortfall in the cumulative scan
/// falls through to the last index.
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[WeightedCandidate], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.iter().map(|w| w.weight).sum();
    let draw = rng.gen::<f64>() * total;

    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w.weight;
        if draw < cumulative {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sum(weights: &[WeightedCandidate]) -> f64 {
        weights.iter().map(|w| w.weight).sum()
    }

    mod compute_tests {
        use super::*;

        #[test]
        fn empty_input_gives_empty_output() {
            assert!(compute_weights(&[], &WeightConfig::default()).is_empty());
        }

        #[test]
        fn single_candidate_gets_everything() {
            let w = compute_weights(&[Candidate::new("solo", 7.0)], &WeightConfig::default());
            assert_eq!(w.len(), 1);
            assert!((w[0].weight - 1.0).abs() < 1e-15);
        }

        #[test]
        fn two_candidate_example() {
            let candidates = [Candidate::new("A", 1.0), Candidate::new("B", 4.0)];
            let w = compute_weights(&candidates, &WeightConfig::default());

            // inverted ≈ [0.990, 0.2494] → ≈ [0.7989, 0.2011]
            assert!((w[0].weight - 0.7989).abs() < 1e-4, "got {}", w[0].weight);
            assert!((w[1].weight - 0.2011).abs() < 1e-4, "got {}", w[1].weight);
            assert!(w[0].weight > w[1].weight);
            assert!((sum(&w) - 1.0).abs() <= 2.0 * f64::EPSILON);
        }

        #[test]
        fn preserves_order_and_ids() {
            let candidates = [
                Candidate::new("c", 3.0),
                Candidate::new("a", 1.0),
                Candidate::new("b", 2.0),
            ];
            let w = compute_weights(&candidates, &WeightConfig::default());
            let ids: Vec<_> = w.iter().map(|w| w.id.as_str()).collect();
            assert_eq!(ids, vec!["c", "a", "b"]);
        }

        #[test]
        fn zero_score_is_favored_but_finite() {
            let candidates = [Candidate::new("fresh", 0.0), Candidate::new("veteran", 10.0)];
            let w = compute_weights(&candidates, &WeightConfig::default());
            assert!(w[0].weight.is_finite());
            assert!(w[0].weight > 0.99);
            assert!(w[1].weight > 0.0);
        }

        #[test]
        fn equal_scores_give_equal_weights() {
            let candidates: Vec<_> = (0..4)
                .map(|i| Candidate::new(format!("c{i}").as_str(), 5.0))
                .collect();
            let w = compute_weights(&candidates, &WeightConfig::default());
            for wc in &w {
                assert!((wc.weight - 0.25).abs() < 1e-12);
            }
        }

        #[test]
        fn floor_lifts_tiny_weights() {
            let config = WeightConfig {
                min_weight: 0.05,
                ..WeightConfig::default()
            };
            let candidates = [Candidate::new("fresh", 0.0), Candidate::new("veteran", 1000.0)];
            let unfloored = compute_weights(&candidates, &WeightConfig::default());
            let floored = compute_weights(&candidates, &config);

            assert!(unfloored[1].weight < 0.001);
            assert!(floored[1].weight > 0.04);
            assert!((sum(&floored) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn huge_score_ratio_keeps_minimum_weight() {
            let candidates = [
                Candidate::new("a", 0.0),
                Candidate::new("b", 1e15),
                Candidate::new("c", 0.0),
            ];
            let w = compute_weights(&candidates, &WeightConfig::default());
            assert!(w[1].weight >= MIN_SEGMENT_WEIGHT * 0.999);
            assert!(w[0].weight > w[1].weight);
            assert!((sum(&w) - 1.0).abs() < 1e-12);
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn default_is_valid() {
            assert!(WeightConfig::default().validate().is_ok());
        }

        #[test]
        fn rejects_zero_denominator() {
            let config = WeightConfig {
                epsilon: 0.0,
                offset: 0.0,
                min_weight: 0.0,
            };
            assert!(matches!(
                config.validate(),
                Err(InputError::InvalidConfig { field: "offset", .. })
            ));
        }

        #[test]
        fn rejects_floor_of_one() {
            let config = WeightConfig {
                min_weight: 1.0,
                ..WeightConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn rejects_nan_epsilon() {
            let config = WeightConfig {
                epsilon: f64::NAN,
                ..WeightConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }

    mod pick_tests {
        use super::*;

        #[test]
        fn empty_gives_none() {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            assert_eq!(pick_weighted(&[], &mut rng), None);
        }

        #[test]
        fn heavy_weight_wins_most_draws() {
            let weights = [
                WeightedCandidate::new("heavy", 0.9),
                WeightedCandidate::new("light", 0.1),
            ];
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            let heavy = (0..10_000)
                .filter(|_| pick_weighted(&weights, &mut rng) == Some(0))
                .count();
            assert!((8_700..9_300).contains(&heavy), "heavy picked {heavy} times");
        }

        #[test]
        fn same_seed_same_picks() {
            let weights = [
                WeightedCandidate::new("a", 0.3),
                WeightedCandidate::new("b", 0.3),
                WeightedCandidate::new("c", 0.4),
            ];
            let mut rng1 = ChaCha8Rng::seed_from_u64(7);
            let mut rng2 = ChaCha8Rng::seed_from_u64(7);
            let picks1: Vec<_> = (0..50).map(|_| pick_weighted(&weights, &mut rng1)).collect();
            let picks2: Vec<_> = (0..50).map(|_| pick_weighted(&weights, &mut rng2)).collect();
            assert_eq!(picks1, picks2);
        }
    }
}
