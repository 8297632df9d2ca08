//! Summary statistics and the fixed six-bucket histogram.
//!
//! Both entrypoints take the full history in any order and are total: an empty history is a
//! normal state (`None` / all-zero histogram), never an error.
//!
//! Precondition: every multiplier is finite and inside `[1.00, 100.00]`. Nothing here
//! re-validates; manual input is checked by the caller before it is recorded.

use crashboard_types::{
    round_multiplier, Bucket, Histogram, Outcome, Summary, HIGH_CRASH_THRESHOLD,
    LOW_CRASH_THRESHOLD, MOON_CRASH_THRESHOLD,
};

/// Arithmetic mean, unrounded. `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of values already sorted ascending. `None` when empty.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let count = sorted.len();
    if count == 0 {
        return None;
    }
    let mid = count / 2;
    if count % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation (divides by `n`), unrounded. `None` when empty.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Summarise the history, or `None` if it is empty.
///
/// `average`, `median` and `volatility` are rounded to two decimals; `min` and `max` are
/// returned as stored.
pub fn summarize(outcomes: &[Outcome]) -> Option<Summary> {
    let mut values: Vec<f64> = outcomes.iter().map(|outcome| outcome.multiplier).collect();
    values.sort_by(f64::total_cmp);

    let average = mean(&values)?;
    let median = median_sorted(&values)?;
    let volatility = population_std_dev(&values)?;
    let min = *values.first()?;
    let max = *values.last()?;

    Some(Summary {
        count: values.len(),
        average: round_multiplier(average),
        median: round_multiplier(median),
        max,
        min,
        volatility: round_multiplier(volatility),
        crashes_below_2x: values.iter().filter(|v| **v < LOW_CRASH_THRESHOLD).count(),
        crashes_above_5x: values.iter().filter(|v| **v >= HIGH_CRASH_THRESHOLD).count(),
        crashes_above_10x: values.iter().filter(|v| **v >= MOON_CRASH_THRESHOLD).count(),
    })
}

/// Bucket for a multiplier: the first whose exclusive upper bound is above it.
///
/// Values on a boundary belong to the bucket that starts there (`2.0` is in `[2.0, 3.0)`).
pub fn bucket_for(multiplier: f64) -> Bucket {
    Bucket::ALL
        .into_iter()
        .find(|bucket| bucket.upper().map_or(true, |upper| multiplier < upper))
        .unwrap_or(Bucket::Moon)
}

/// Count the history into the six fixed buckets.
pub fn histogram(outcomes: &[Outcome]) -> Histogram {
    let mut histogram = Histogram::default();
    for outcome in outcomes {
        histogram.increment(bucket_for(outcome.multiplier));
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{create_outcome, create_outcomes};
    use proptest::prelude::*;

    #[test]
    fn test_summarize_empty_is_none() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_summarize_example() {
        let outcomes = create_outcomes(&[1.50, 2.50, 9.99, 1.00]);
        let summary = summarize(&outcomes).expect("summary");
        assert_eq!(summary.count, 4);
        assert_eq!(summary.average, 3.75);
        assert_eq!(summary.median, 2.00);
        assert_eq!(summary.max, 9.99);
        assert_eq!(summary.min, 1.00);
        assert_eq!(summary.crashes_below_2x, 2);
        assert_eq!(summary.crashes_above_5x, 1);
        assert_eq!(summary.crashes_above_10x, 0);
    }

    #[test]
    fn test_summarize_odd_count_takes_middle() {
        let outcomes = create_outcomes(&[7.0, 1.2, 3.3]);
        let summary = summarize(&outcomes).expect("summary");
        assert_eq!(summary.median, 3.3);
        assert_eq!(summary.min, 1.2);
        assert_eq!(summary.max, 7.0);
    }

    #[test]
    fn test_summarize_single_outcome() {
        let summary = summarize(&[create_outcome(1, 12.34)]).expect("summary");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 12.34);
        assert_eq!(summary.median, 12.34);
        assert_eq!(summary.volatility, 0.0);
        assert_eq!(summary.crashes_above_5x, 1);
        assert_eq!(summary.crashes_above_10x, 1);
    }

    #[test]
    fn test_volatility_is_population_std_dev() {
        // mean 5, squared deviations 9 + 1 + 1 + 9 = 20, /4 = 5
        let values = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(population_std_dev(&values), Some(5f64.sqrt()));
        let summary = summarize(&create_outcomes(&values)).expect("summary");
        assert_eq!(summary.volatility, 2.24);
    }

    #[test]
    fn test_thresholds_are_inclusive_above() {
        let outcomes = create_outcomes(&[1.99, 2.0, 4.99, 5.0, 9.99, 10.0]);
        let summary = summarize(&outcomes).expect("summary");
        assert_eq!(summary.crashes_below_2x, 1);
        assert_eq!(summary.crashes_above_5x, 3);
        assert_eq!(summary.crashes_above_10x, 1);
    }

    #[test]
    fn test_summarize_ignores_list_order() {
        let forward = create_outcomes(&[3.1, 1.4, 22.0, 5.5, 1.0]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(summarize(&forward), summarize(&reversed));
    }

    #[test]
    fn test_histogram_empty() {
        let histogram = histogram(&[]);
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.iter().count(), Bucket::COUNT);
        assert!(histogram.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn test_histogram_boundaries() {
        let outcomes = create_outcomes(&[1.0, 1.49, 1.5, 1.99, 2.0, 2.99, 3.0, 4.99, 5.0, 9.99, 10.0, 100.0]);
        let histogram = histogram(&outcomes);
        for bucket in Bucket::ALL {
            assert_eq!(histogram.count(bucket), 2, "bucket {bucket:?}");
        }
        assert_eq!(histogram.total(), outcomes.len() as u64);
    }

    #[test]
    fn test_bucket_for_boundaries() {
        assert_eq!(bucket_for(1.0), Bucket::Under1_5);
        assert_eq!(bucket_for(1.5), Bucket::Under2);
        assert_eq!(bucket_for(2.0), Bucket::Under3);
        assert_eq!(bucket_for(3.0), Bucket::Under5);
        assert_eq!(bucket_for(5.0), Bucket::Under10);
        assert_eq!(bucket_for(10.0), Bucket::Moon);
        assert_eq!(bucket_for(49.99), Bucket::Moon);
    }

    fn cents_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(100u32..=10_000, 1..=100)
            .prop_map(|cents| cents.into_iter().map(|c| c as f64 / 100.0).collect())
    }

    proptest! {
        #[test]
        fn summary_is_bounded_by_extrema(values in cents_strategy()) {
            let summary = summarize(&create_outcomes(&values)).expect("non-empty");
            prop_assert_eq!(summary.count, values.len());
            prop_assert!(summary.min <= summary.median && summary.median <= summary.max);
            prop_assert!(summary.min <= summary.average && summary.average <= summary.max);
            prop_assert!(summary.volatility >= 0.0);
        }

        #[test]
        fn low_and_high_counts_never_overlap(values in cents_strategy()) {
            let summary = summarize(&create_outcomes(&values)).expect("non-empty");
            prop_assert!(summary.crashes_below_2x + summary.crashes_above_5x <= summary.count);
            prop_assert!(summary.crashes_above_10x <= summary.crashes_above_5x);
        }

        #[test]
        fn histogram_counts_every_outcome_once(values in prop::collection::vec(100u32..=10_000, 0..=100)) {
            let values: Vec<f64> = values.into_iter().map(|c| c as f64 / 100.0).collect();
            let outcomes = create_outcomes(&values);
            let histogram = histogram(&outcomes);
            prop_assert_eq!(histogram.total(), values.len() as u64);
            for value in &values {
                prop_assert!(bucket_for(*value).contains(*value));
            }
        }

        #[test]
        fn volatility_is_zero_iff_values_identical(values in cents_strategy()) {
            let std_dev = population_std_dev(&values).expect("non-empty");
            let identical = values.iter().all(|value| *value == values[0]);
            if identical {
                let summary = summarize(&create_outcomes(&values)).expect("non-empty");
                prop_assert_eq!(summary.volatility, 0.0);
            } else {
                prop_assert!(std_dev > 0.0);
            }
        }

        #[test]
        fn identical_values_have_zero_volatility(cents in 100u32..=10_000, count in 1usize..=100) {
            let values = vec![cents as f64 / 100.0; count];
            let summary = summarize(&create_outcomes(&values)).expect("non-empty");
            prop_assert_eq!(summary.volatility, 0.0);
            prop_assert_eq!(summary.min, summary.max);
        }
    }
}
