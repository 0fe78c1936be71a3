use contracts::shared::analytics::MetricComparison;

/// Relative change of `current` against `previous` as a signed fraction.
///
/// `None` when either side is missing or non-finite, or when the baseline is
/// zero. Never panics.
pub fn delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if !current.is_finite() || !previous.is_finite() || previous == 0.0 {
        return None;
    }
    let change = (current - previous) / previous;
    change.is_finite().then_some(change)
}

/// Assemble the full comparison of one value against both baselines.
pub fn compare(current: Option<f64>, previous: Option<f64>, year_ago: Option<f64>) -> MetricComparison {
    MetricComparison {
        current,
        previous,
        year_ago,
        mom: delta(current, previous),
        yoy: delta(current, year_ago),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_change() {
        let change = delta(Some(120.0), Some(100.0)).unwrap();
        assert!((change - 0.2).abs() < 1e-9);
        let change = delta(Some(80.0), Some(100.0)).unwrap();
        assert!((change + 0.2).abs() < 1e-9);
        assert_eq!(delta(Some(100.0), Some(100.0)), Some(0.0));
    }

    #[test]
    fn test_zero_baseline() {
        for x in [0.0, 1.0, -5.0, 1e12] {
            assert_eq!(delta(Some(x), Some(0.0)), None);
            assert_eq!(delta(Some(x), Some(-0.0)), None);
        }
    }

    #[test]
    fn test_missing_and_non_finite() {
        for y in [0.0, 1.0, 100.0] {
            assert_eq!(delta(None, Some(y)), None);
            assert_eq!(delta(Some(y), None), None);
        }
        assert_eq!(delta(Some(f64::NAN), Some(1.0)), None);
        assert_eq!(delta(Some(1.0), Some(f64::NAN)), None);
        assert_eq!(delta(Some(f64::INFINITY), Some(1.0)), None);
        assert_eq!(delta(Some(1.0), Some(f64::NEG_INFINITY)), None);
        assert_eq!(delta(Some(f64::MAX), Some(-f64::MIN_POSITIVE)), None);
    }

    #[test]
    fn test_negative_baseline_keeps_sign_convention() {
        // (current - previous) / previous with a negative baseline
        let change = delta(Some(-50.0), Some(-100.0)).unwrap();
        assert!((change + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_compare() {
        let cmp = compare(Some(1200.0), Some(1000.0), None);
        assert_eq!(cmp.current, Some(1200.0));
        assert!((cmp.mom.unwrap() - 0.2).abs() < 1e-9);
        assert_eq!(cmp.yoy, None);
    }
}
