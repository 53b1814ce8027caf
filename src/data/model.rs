use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one survey response
// ---------------------------------------------------------------------------

/// A single survey response (one row of the source table).
///
/// Numeric fields are `None` when the source cell was blank or not a number;
/// aggregates skip missing values instead of propagating NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub gender: String,
    pub payment_method: String,
    pub chain: String,
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub purchase_amount: Option<f64>,
    pub family_size: Option<f64>,
}

/// The categorical fields a record can be filtered or grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Gender,
    PaymentMethod,
    Chain,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Gender,
        Dimension::PaymentMethod,
        Dimension::Chain,
    ];

    /// Human-readable label, also the source column name.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Gender => "Gender",
            Dimension::PaymentMethod => "PaymentMethod",
            Dimension::Chain => "Chain",
        }
    }
}

impl Record {
    /// The record's value for a categorical dimension.
    pub fn field(&self, dim: Dimension) -> &str {
        match dim {
            Dimension::Gender => &self.gender,
            Dimension::PaymentMethod => &self.payment_method,
            Dimension::Chain => &self.chain,
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed categorical domains.
/// Immutable after load; filtering works on row indices.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    /// All survey responses (rows), in source order.
    pub records: Vec<Record>,
    /// Sorted distinct values per categorical dimension, same order as
    /// [`Dimension::ALL`]. Dropdown option lists are built from these.
    pub domains: [Vec<String>; 3],
}

impl SurveyDataset {
    /// Build categorical domains from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut domains: [Vec<String>; 3] = Default::default();
        for (slot, dim) in domains.iter_mut().zip(Dimension::ALL) {
            let distinct: BTreeSet<&str> = records.iter().map(|r| r.field(dim)).collect();
            *slot = distinct.into_iter().map(str::to_string).collect();
        }
        SurveyDataset { records, domains }
    }

    /// Distinct values for one dimension.
    pub fn domain(&self, dim: Dimension) -> &[String] {
        match dim {
            Dimension::Gender => &self.domains[0],
            Dimension::PaymentMethod => &self.domains[1],
            Dimension::Chain => &self.domains[2],
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
