//! Summary statistics over numeric facet values.

use search_model::ValueDetails;

use crate::error::{ParametricError, Result};

/// Statistics over plain values, each counted once.
pub fn compute_details(values: &[f64]) -> Result<ValueDetails> {
    let weighted: Vec<(f64, u64)> = values.iter().map(|&value| (value, 1)).collect();
    compute_weighted_details(&weighted)
}

/// Statistics over `(value, occurrences)` pairs, as reported by faceting
/// backends.
///
/// Non-finite values and zero occurrence counts are skipped. The average is
/// a running mean clamped into `[min, max]`, so `min <= average <= max` holds
/// even where the plain sum overflows. Where the distance between a value and
/// the current mean overflows, the mean moves as a weighted blend instead.
pub fn compute_weighted_details(values: &[(f64, u64)]) -> Result<ValueDetails> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut mean = 0.0;
    let mut total: u64 = 0;

    for &(value, occurrences) in values {
        if occurrences == 0 || !value.is_finite() {
            continue;
        }
        total = total.saturating_add(occurrences);
        min = min.min(value);
        max = max.max(value);
        sum += value * occurrences as f64;
        let weight = occurrences as f64 / total as f64;
        let step = (value - mean) * weight;
        mean = if step.is_finite() {
            mean + step
        } else {
            mean * (1.0 - weight) + value * weight
        };
    }

    if total == 0 {
        return Err(ParametricError::EmptyPopulation { field: None });
    }

    let average = if mean.is_finite() {
        mean
    } else {
        min / 2.0 + max / 2.0
    };
    Ok(ValueDetails {
        min,
        max,
        average: average.clamp(min, max),
        sum,
        total_values: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value() {
        let details = compute_details(&[4.5]).unwrap();
        assert_eq!(details.min, 4.5);
        assert_eq!(details.max, 4.5);
        assert_eq!(details.average, 4.5);
        assert_eq!(details.sum, 4.5);
        assert_eq!(details.total_values, 1);
    }

    #[test]
    fn weighted_average() {
        let details = compute_weighted_details(&[(1.0, 3), (5.0, 1), (100.0, 0)]).unwrap();
        assert_eq!(details.min, 1.0);
        assert_eq!(details.max, 5.0);
        assert_eq!(details.sum, 8.0);
        assert_eq!(details.average, 2.0);
        assert_eq!(details.total_values, 4);
    }

    #[test]
    fn empty_population() {
        assert!(matches!(
            compute_details(&[]),
            Err(ParametricError::EmptyPopulation { field: None })
        ));
        assert!(matches!(
            compute_weighted_details(&[(1.0, 0)]),
            Err(ParametricError::EmptyPopulation { .. })
        ));
    }

    #[test]
    fn huge_values_keep_average_in_range() {
        let details = compute_details(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(details.average, f64::MAX);
        assert!(details.sum.is_infinite());
    }

    #[test]
    fn opposite_extremes_keep_a_finite_average() {
        let details = compute_details(&[-f64::MAX, f64::MAX, -f64::MAX]).unwrap();
        assert!(details.average.is_finite());
        assert!(details.min <= details.average && details.average <= details.max);
        assert_eq!(details.total_values, 3);
    }
}
