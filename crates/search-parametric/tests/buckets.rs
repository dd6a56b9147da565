//! Bucket layouts and statistics properties.

use proptest::prelude::*;
use search_model::RangeBucket;
use search_parametric::{bucket, bucket_values, compute_details, compute_weighted_details};

fn render(buckets: &[RangeBucket]) -> String {
    buckets
        .iter()
        .map(|b| {
            let close = if b.closed { "]" } else { ")" };
            format!("[{}, {}{} {}", b.lower_bound, b.upper_bound, close, b.count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn quartile_layout() {
    let buckets = bucket_values(
        0.0,
        100.0,
        4,
        &[(3.0, 2), (25.0, 1), (60.0, 5), (100.0, 1)],
    )
    .unwrap();

    insta::assert_snapshot!(render(&buckets), @r"
    [0, 25) 2
    [25, 50) 1
    [50, 75) 5
    [75, 100] 1
    ");
}

#[test]
fn fractional_layout() {
    let buckets = bucket_values(-10.0, 10.0, 8, &[(-10.0, 1), (0.0, 3), (9.99, 2)]).unwrap();

    insta::assert_snapshot!(render(&buckets), @r"
    [-10, -7.5) 1
    [-7.5, -5) 0
    [-5, -2.5) 0
    [-2.5, 0) 0
    [0, 2.5) 3
    [2.5, 5) 0
    [5, 7.5) 0
    [7.5, 10] 2
    ");
}

#[test]
fn alternating_extremes_average_stays_in_range() {
    let details = compute_details(&[-f64::MAX, f64::MAX, -f64::MAX]).unwrap();

    assert!(!details.average.is_nan());
    assert!(details.min <= details.average);
    assert!(details.average <= details.max);
    assert_eq!(details.min, -f64::MAX);
    assert_eq!(details.max, f64::MAX);
}

#[test]
fn weighted_extremes_average_stays_in_range() {
    let details = compute_weighted_details(&[(f64::MAX, 5), (-f64::MAX, 1), (f64::MAX, 2)]).unwrap();

    assert!(details.average.is_finite());
    assert!(details.min <= details.average && details.average <= details.max);
    assert_eq!(details.total_values, 8);
}

proptest! {
    #[test]
    fn buckets_partition_wide_ranges(
        min in -f64::MAX..-1.0e300,
        max in 1.0e300..f64::MAX,
        count in 1usize..64,
    ) {
        let buckets = bucket(min, max, count).unwrap();

        prop_assert_eq!(buckets.len(), count);
        prop_assert_eq!(buckets[0].lower_bound, min);
        prop_assert_eq!(buckets[count - 1].upper_bound, max);
        for b in &buckets {
            prop_assert!(b.lower_bound.is_finite() && b.upper_bound.is_finite());
            prop_assert!(b.lower_bound <= b.upper_bound);
        }
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
        prop_assert_eq!(buckets.iter().filter(|b| b.contains(min)).count(), 1);
        prop_assert_eq!(buckets.iter().filter(|b| b.contains(max)).count(), 1);
    }

    #[test]
    fn average_within_bounds_at_extremes(
        values in prop::collection::vec(
            prop_oneof![Just(f64::MAX), Just(-f64::MAX), -8.0e307f64..8.0e307],
            1..32,
        ),
    ) {
        let details = compute_details(&values).unwrap();
        prop_assert!(details.min <= details.average);
        prop_assert!(details.average <= details.max);
    }

    #[test]
    fn buckets_partition_the_range(
        min in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        count in 1usize..64,
    ) {
        let max = min + span;
        prop_assume!(min < max);
        let buckets = bucket(min, max, count).unwrap();

        prop_assert_eq!(buckets.len(), count);
        prop_assert_eq!(buckets[0].lower_bound, min);
        prop_assert_eq!(buckets[count - 1].upper_bound, max);
        prop_assert!(buckets[count - 1].closed);
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
            prop_assert!(!pair[0].closed);
        }
    }

    #[test]
    fn every_value_in_range_lands_once(
        min in -1.0e3f64..1.0e3,
        span in 1.0e-2f64..1.0e3,
        count in 1usize..32,
        fraction in 0.0f64..=1.0,
    ) {
        let max = min + span;
        let value = (min + span * fraction).clamp(min, max);
        let buckets = bucket(min, max, count).unwrap();
        let containing = buckets.iter().filter(|b| b.contains(value)).count();
        prop_assert_eq!(containing, 1);
    }

    #[test]
    fn average_within_bounds(values in prop::collection::vec(-1.0e12f64..1.0e12, 1..64)) {
        let details = compute_details(&values).unwrap();
        prop_assert!(details.min <= details.average);
        prop_assert!(details.average <= details.max);
        prop_assert_eq!(details.total_values, values.len() as u64);
    }

    #[test]
    fn weighted_average_within_bounds(
        values in prop::collection::vec((-1.0e9f64..1.0e9, 1u64..1000), 1..32),
    ) {
        let details = compute_weighted_details(&values).unwrap();
        prop_assert!(details.min <= details.average);
        prop_assert!(details.average <= details.max);
    }

    #[test]
    fn single_value_is_its_own_summary(value in -1.0e12f64..1.0e12) {
        let details = compute_details(&[value]).unwrap();
        prop_assert_eq!(details.min, value);
        prop_assert_eq!(details.max, value);
        prop_assert_eq!(details.average, value);
    }
}
