use crate::error::{AccuracyError, Result};
use serde::{Deserialize, Serialize};

/// Sorted (ascending) points scored by one group in one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsDistribution {
    values: Vec<f64>,
}

impl PointsDistribution {
    /// Build a distribution from points in any order. Non-finite values are dropped.
    pub fn from_unsorted(mut values: Vec<f64>) -> Self {
        values.retain(|v| v.is_finite());
        values.sort_by(|a, b| a.total_cmp(b));
        Self { values }
    }

    /// Percentile rank of `points` within this distribution
    pub fn percentile(&self, points: f64) -> Result<u8> {
        percentile(&self.values, points)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Percentile rank (0-100) of `value` in an ascending sequence
///
/// Anything at or above the maximum is 100 and anything below the minimum is 0.
/// Otherwise the first index `i` with `sorted[i] <= value <= sorted[i + 1]`
/// gives `floor(i * 100 / len)`. An empty sequence has no percentile; a single
/// value splits the line at itself.
pub fn percentile(sorted: &[f64], value: f64) -> Result<u8> {
    if !value.is_finite() {
        return Err(AccuracyError::InvalidValue(value));
    }
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Err(AccuracyError::InsufficientData { len: 0 });
    };

    if value >= max {
        return Ok(100);
    }
    if value < min {
        return Ok(0);
    }

    let len = sorted.len();
    let index = sorted
        .windows(2)
        .position(|pair| pair[0] <= value && value <= pair[1])
        // min <= value < max always lands in some pair
        .unwrap_or(len - 1);

    Ok((index * 100 / len) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIVE: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    #[test]
    fn test_bracketing_index() {
        assert_eq!(percentile(&FIVE, 25.0).unwrap(), 20);
        assert_eq!(percentile(&FIVE, 10.0).unwrap(), 0);
        assert_eq!(percentile(&FIVE, 45.0).unwrap(), 60);
    }

    #[test]
    fn test_at_or_above_max() {
        assert_eq!(percentile(&FIVE, 50.0).unwrap(), 100);
        assert_eq!(percentile(&FIVE, 72.4).unwrap(), 100);
    }

    #[test]
    fn test_below_min() {
        assert_eq!(percentile(&FIVE, -3.2).unwrap(), 0);
    }

    #[test]
    fn test_small_distributions() {
        assert_eq!(percentile(&[], 5.0), Err(AccuracyError::InsufficientData { len: 0 }));
        assert_eq!(percentile(&[12.0], 12.0).unwrap(), 100);
        assert_eq!(percentile(&[12.0], 11.0).unwrap(), 0);
    }

    #[test]
    fn test_non_finite_value() {
        assert!(matches!(percentile(&FIVE, f64::NAN), Err(AccuracyError::InvalidValue(_))));
    }

    #[test]
    fn test_distribution_sorts_input() {
        let dist = PointsDistribution::from_unsorted(vec![40.0, 10.0, f64::NAN, 30.0, 50.0, 20.0]);
        assert_eq!(dist.values(), &FIVE);
        assert_eq!(dist.percentile(25.0).unwrap(), 20);
    }

    proptest! {
        #[test]
        fn prop_percentile_is_monotonic(
            mut values in prop::collection::vec(-20.0f64..60.0, 1..40),
            a in -30.0f64..70.0,
            b in -30.0f64..70.0,
        ) {
            values.sort_by(|x, y| x.total_cmp(y));
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = percentile(&values, lo).unwrap();
            let p_hi = percentile(&values, hi).unwrap();
            prop_assert!(p_lo <= p_hi);
            prop_assert!(p_hi <= 100);
        }
    }
}
