//! Equal-width range bucketing for numeric facets.

use search_model::RangeBucket;

use crate::error::{ParametricError, Result};

/// Split `[min, max]` into `count` equal-width buckets.
///
/// Every bucket is half-open except the last, whose upper bound is exactly
/// `max` and inclusive. A degenerate range (`min == max`) yields one closed
/// bucket of zero width whatever `count` is.
pub fn bucket(min: f64, max: f64, count: usize) -> Result<Vec<RangeBucket>> {
    if count == 0 {
        return Err(ParametricError::InvalidBucketCount);
    }
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(ParametricError::InvalidRange { min, max });
    }
    if min == max {
        return Ok(vec![RangeBucket {
            lower_bound: min,
            upper_bound: max,
            closed: true,
            count: 0,
        }]);
    }

    let n = count as f64;
    let width = (max - min) / n;
    // Adjacent buckets share the exact same boundary value.
    let boundary = |i: usize| {
        if i == 0 {
            min
        } else if i == count {
            max
        } else if width.is_finite() {
            min + width * i as f64
        } else {
            // Span wider than f64::MAX: interpolate without forming it.
            let t = i as f64 / n;
            min * (1.0 - t) + max * t
        }
    };

    Ok((0..count)
        .map(|i| RangeBucket {
            lower_bound: boundary(i),
            upper_bound: boundary(i + 1),
            closed: i + 1 == count,
            count: 0,
        })
        .collect())
}

/// Add weighted `(value, occurrences)` pairs to the bucket containing each
/// value. Values outside the bucketed range are ignored.
pub fn assign_counts(buckets: &mut [RangeBucket], values: &[(f64, u64)]) {
    let mut ignored = 0u64;
    for &(value, occurrences) in values {
        match buckets.iter_mut().find(|bucket| bucket.contains(value)) {
            Some(bucket) => bucket.count += occurrences,
            None => ignored += occurrences,
        }
    }
    if ignored > 0 {
        tracing::debug!(ignored, "Values outside bucketed range");
    }
}

/// [`bucket`] followed by [`assign_counts`].
pub fn bucket_values(
    min: f64,
    max: f64,
    count: usize,
    values: &[(f64, u64)],
) -> Result<Vec<RangeBucket>> {
    let mut buckets = bucket(min, max, count)?;
    assign_counts(&mut buckets, values);
    Ok(buckets)
}
