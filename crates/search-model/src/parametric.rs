use serde::{Deserialize, Serialize};

/// Summary statistics over a numeric facet.
///
/// Constructed by the parametric crate, which guarantees
/// `min <= average <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDetails {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub sum: f64,
    pub total_values: u64,
}

/// One equal-width slice of a numeric range.
///
/// Half-open `[lower, upper)` unless `closed` is set, which is only the case
/// for the final bucket of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBucket {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub closed: bool,
    pub count: u64,
}

impl RangeBucket {
    pub fn contains(&self, value: f64) -> bool {
        if self.closed {
            value >= self.lower_bound && value <= self.upper_bound
        } else {
            value >= self.lower_bound && value < self.upper_bound
        }
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// A facet value and the number of matching documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub value: String,
    pub count: u64,
}

impl TagValue {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Facet values for one field, decorated with its canonical identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTagValues {
    /// Backend field name the values were reported under.
    pub name: String,
    /// Canonical id when the backend name is a configured alias.
    pub id: Option<String>,
    pub display_name: String,
    pub values: Vec<TagValue>,
}

/// Bucketed numeric facet for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRanges {
    pub name: String,
    pub id: Option<String>,
    pub display_name: String,
    pub details: ValueDetails,
    pub buckets: Vec<RangeBucket>,
}

/// One value of a dependent (hierarchical) facet.
///
/// `dependents` holds the values of the next requested field, counted over
/// only the documents that carry this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentFieldValues {
    /// Backend field name of this level.
    pub name: String,
    pub id: Option<String>,
    pub display_name: String,
    pub value: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<DependentFieldValues>,
}

impl DependentFieldValues {
    /// Depth of the deepest branch, counting this level.
    pub fn depth(&self) -> usize {
        1 + self
            .dependents
            .iter()
            .map(DependentFieldValues::depth)
            .max()
            .unwrap_or(0)
    }
}
