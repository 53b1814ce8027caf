use super::model::{Dimension, Record};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition records by a categorical dimension, preserving the order in
/// which group keys are first encountered.
pub fn group_by<'a>(
    records: impl Iterator<Item = &'a Record>,
    dim: Dimension,
) -> Vec<(String, Vec<&'a Record>)> {
    let mut groups: Vec<(String, Vec<&'a Record>)> = Vec::new();
    for rec in records {
        let key = rec.field(dim);
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, members)) => members.push(rec),
            None => groups.push((key.to_string(), vec![rec])),
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Bar: mean purchase amount by chain
// ---------------------------------------------------------------------------

/// Mean `purchase_amount` per chain, groups in first-encountered order.
/// Missing amounts are skipped; a chain with no numeric amount at all is
/// dropped rather than reported with an undefined mean.
pub fn mean_purchase_by_chain<'a>(
    records: impl Iterator<Item = &'a Record>,
) -> Vec<(String, f64)> {
    group_by(records, Dimension::Chain)
        .into_iter()
        .filter_map(|(chain, members)| {
            let amounts: Vec<f64> = members
                .iter()
                .filter_map(|r| r.purchase_amount)
                .filter(|v| v.is_finite())
                .collect();
            if amounts.is_empty() {
                return None;
            }
            let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
            Some((chain, mean))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pie: respondent count by gender
// ---------------------------------------------------------------------------

/// Record count per gender, groups in first-encountered order.
/// Counts always sum to the number of input records.
pub fn count_by_gender<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<(String, usize)> {
    group_by(records, Dimension::Gender)
        .into_iter()
        .map(|(gender, members)| (gender, members.len()))
        .collect()
}

// ---------------------------------------------------------------------------
// Box plot: five-number summary of purchase amount by chain
// ---------------------------------------------------------------------------

/// Quartiles, whiskers clamped to the observed range, and the values falling
/// outside the whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNumberSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values strictly outside the whiskers, ascending, duplicates kept.
    pub outliers: Vec<f64>,
}

/// Quantile `p` in [0, 1] over **sorted** values, linear interpolation
/// between the two bounding order statistics (the R-7 definition:
/// rank = p * (n - 1)).
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

impl FiveNumberSummary {
    /// Compute the summary from raw values. Non-finite values are dropped;
    /// returns `None` when nothing numeric remains.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        // Whiskers never extend past the observed extremes.
        let lower_whisker = min.max(q1 - 1.5 * iqr);
        let upper_whisker = max.min(q3 + 1.5 * iqr);

        let outliers: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(FiveNumberSummary {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Five-number summary of `purchase_amount` per chain, groups in
/// first-encountered order. Chains with no numeric amounts are dropped.
pub fn box_stats_by_chain<'a>(
    records: impl Iterator<Item = &'a Record>,
) -> Vec<(String, FiveNumberSummary)> {
    group_by(records, Dimension::Chain)
        .into_iter()
        .filter_map(|(chain, members)| {
            let amounts: Vec<f64> = members.iter().filter_map(|r| r.purchase_amount).collect();
            FiveNumberSummary::compute(&amounts).map(|summary| (chain, summary))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, chain: &str, amount: Option<f64>) -> Record {
        Record {
            gender: gender.to_string(),
            payment_method: "Cash".to_string(),
            chain: chain.to_string(),
            age: None,
            income: None,
            purchase_amount: amount,
            family_size: None,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    // --- grouping ---

    #[test]
    fn groups_keep_first_encountered_order() {
        let recs = vec![
            record("F", "Kroger", Some(1.0)),
            record("M", "Aldi", Some(2.0)),
            record("F", "Kroger", Some(3.0)),
            record("M", "Costco", Some(4.0)),
        ];
        let groups = group_by(recs.iter(), Dimension::Chain);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Kroger", "Aldi", "Costco"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    // --- bar ---

    #[test]
    fn mean_of_two_record_group() {
        let recs = vec![
            record("F", "Kroger", Some(10.0)),
            record("M", "Kroger", Some(20.0)),
        ];
        let means = mean_purchase_by_chain(recs.iter());
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].0, "Kroger");
        assert!(approx(means[0].1, 15.0));
    }

    #[test]
    fn missing_amounts_are_excluded_from_means() {
        let recs = vec![
            record("F", "Kroger", Some(10.0)),
            record("M", "Kroger", None),
            record("F", "Aldi", None),
        ];
        let means = mean_purchase_by_chain(recs.iter());
        // Aldi has no numeric amount → dropped entirely.
        assert_eq!(means.len(), 1);
        assert!(approx(means[0].1, 10.0));
    }

    #[test]
    fn empty_input_yields_no_means() {
        assert!(mean_purchase_by_chain(std::iter::empty::<&Record>()).is_empty());
    }

    // --- pie ---

    #[test]
    fn counts_sum_to_input_length() {
        let recs = vec![
            record("F", "Kroger", Some(1.0)),
            record("M", "Aldi", None),
            record("F", "Costco", Some(3.0)),
        ];
        let counts = count_by_gender(recs.iter());
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, recs.len());
        assert_eq!(counts[0], ("F".to_string(), 2));
        assert_eq!(counts[1], ("M".to_string(), 1));
    }

    // --- box ---

    #[test]
    fn quartiles_use_linear_interpolation() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let s = FiveNumberSummary::compute(&values).unwrap();
        assert!(approx(s.q1, 3.25));
        assert!(approx(s.median, 5.5));
        assert!(approx(s.q3, 7.75));
        assert!(approx(s.lower_whisker, 1.0));
        assert!(approx(s.upper_whisker, 10.0));
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn singleton_group_collapses_to_one_value() {
        let s = FiveNumberSummary::compute(&[42.0]).unwrap();
        assert_eq!(s.q1, 42.0);
        assert_eq!(s.median, 42.0);
        assert_eq!(s.q3, 42.0);
        assert_eq!(s.lower_whisker, 42.0);
        assert_eq!(s.upper_whisker, 42.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn extreme_value_is_an_outlier_and_whisker_clamps() {
        // 1..=10 plus an extreme point far above q3 + 1.5*IQR.
        // n = 11: q1 = 3.5, q3 = 8.5, IQR = 5, upper fence = 16.
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(100.0);
        let s = FiveNumberSummary::compute(&values).unwrap();
        assert_eq!(s.outliers, vec![100.0]);
        // Upper whisker is min(max, q3 + 1.5*IQR): the fence, since the
        // observed max lies beyond it.
        assert!(approx(s.upper_whisker, 16.0));
        assert!(approx(s.lower_whisker, 1.0));
    }

    #[test]
    fn whisker_is_the_fence_not_the_largest_inlier() {
        // Same data: the fence (16) falls between the largest inlier (10)
        // and the outlier (100), and the whisker sits exactly on it.
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(100.0);
        let s = FiveNumberSummary::compute(&values).unwrap();
        assert!(approx(s.q1, 3.5));
        assert!(approx(s.q3, 8.5));
        assert!(approx(s.upper_whisker, s.q3 + 1.5 * (s.q3 - s.q1)));
        assert!(s.upper_whisker > 10.0 && s.upper_whisker < 100.0);
    }

    #[test]
    fn duplicate_outliers_are_all_kept() {
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(100.0);
        values.push(100.0);
        let s = FiveNumberSummary::compute(&values).unwrap();
        assert_eq!(s.outliers, vec![100.0, 100.0]);
    }

    #[test]
    fn box_groups_in_first_encountered_order() {
        let recs = vec![
            record("F", "Walmart", Some(5.0)),
            record("M", "Aldi", Some(7.0)),
            record("F", "Walmart", Some(9.0)),
        ];
        let stats = box_stats_by_chain(recs.iter());
        assert_eq!(stats[0].0, "Walmart");
        assert_eq!(stats[1].0, "Aldi");
        assert!(approx(stats[0].1.median, 7.0));
    }

    #[test]
    fn all_missing_group_is_dropped() {
        let recs = vec![record("F", "Walmart", None)];
        assert!(box_stats_by_chain(recs.iter()).is_empty());
    }
}
