use super::model::{Dimension, SurveyDataset};

// ---------------------------------------------------------------------------
// Filter selection: one chosen value (or "All") per categorical dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state. `None` means "All" (no constraint);
/// `Some(v)` keeps only records whose field equals `v` exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub gender: Option<String>,
    pub payment_method: Option<String>,
    pub chain: Option<String>,
}

impl FilterSelection {
    /// The selection for one dimension.
    pub fn get(&self, dim: Dimension) -> Option<&str> {
        match dim {
            Dimension::Gender => self.gender.as_deref(),
            Dimension::PaymentMethod => self.payment_method.as_deref(),
            Dimension::Chain => self.chain.as_deref(),
        }
    }

    /// Replace the selection for one dimension.
    pub fn set(&mut self, dim: Dimension, value: Option<String>) {
        match dim {
            Dimension::Gender => self.gender = value,
            Dimension::PaymentMethod => self.payment_method = value,
            Dimension::Chain => self.chain = value,
        }
    }

    /// True when every dimension is "All".
    pub fn is_all(&self) -> bool {
        self.gender.is_none() && self.payment_method.is_none() && self.chain.is_none()
    }
}

/// Return indices of records that pass the current selection.
///
/// A record passes when, for every dimension, the selection is "All" or the
/// record's field matches the selected value exactly (case-sensitive, no
/// normalisation). Output preserves source order; an empty result is a valid
/// "no data" outcome, not an error.
pub fn filtered_indices(dataset: &SurveyDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            Dimension::ALL.iter().all(|&dim| match selection.get(dim) {
                Some(wanted) => rec.field(dim) == wanted,
                None => true,
            })
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn record(gender: &str, payment: &str, chain: &str) -> Record {
        Record {
            gender: gender.to_string(),
            payment_method: payment.to_string(),
            chain: chain.to_string(),
            age: None,
            income: None,
            purchase_amount: Some(1.0),
            family_size: None,
        }
    }

    fn dataset() -> SurveyDataset {
        SurveyDataset::from_records(vec![
            record("Female", "Cash", "Kroger"),
            record("Male", "Credit Card", "Aldi"),
            record("Female", "Debit Card", "Aldi"),
            record("Male", "Cash", "Kroger"),
        ])
    }

    #[test]
    fn all_selection_keeps_everything_in_order() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &FilterSelection::default());
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_dimension_filter() {
        let ds = dataset();
        let sel = FilterSelection {
            gender: Some("Female".to_string()),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);
    }

    #[test]
    fn dimensions_intersect() {
        let ds = dataset();
        let sel = FilterSelection {
            gender: Some("Male".to_string()),
            chain: Some("Kroger".to_string()),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![3]);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let ds = dataset();
        let sel = FilterSelection {
            gender: Some("female".to_string()),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn empty_intersection_is_a_valid_result() {
        let ds = dataset();
        let sel = FilterSelection {
            gender: Some("Male".to_string()),
            payment_method: Some("Debit Card".to_string()),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let sel = FilterSelection {
            chain: Some("Aldi".to_string()),
            ..Default::default()
        };
        let first = filtered_indices(&ds, &sel);
        // Re-filter the already-filtered subset: every survivor passes again.
        let survivors =
            SurveyDataset::from_records(first.iter().map(|&i| ds.records[i].clone()).collect());
        let second = filtered_indices(&survivors, &sel);
        assert_eq!(second.len(), first.len());
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
    }
}
