//! Parametric value requests against a faceting backend.
//!
//! The backend only knows raw field names and returns raw tag values. The
//! service picks field names from the registry by category, issues a single
//! aggregation request, then decorates the results with canonical identity
//! and, for numeric fields, statistics and range buckets. Dependent requests
//! return a tree instead: the values of each field nested under the values of
//! the field before it.

use std::collections::BTreeMap;

use search_fields::{FieldCategory, FieldTypeRegistry, SharedRegistry};
use search_model::{DependentFieldValues, FieldRanges, FieldTagValues, TagValue, ValueDetails};
use search_normalize::parse_number;

use crate::buckets::bucket_values;
use crate::details::compute_weighted_details;
use crate::error::{ParametricError, Result};

/// Tag-value aggregation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametricRequest {
    /// Raw backend field names; empty means "every field of the category".
    pub field_names: Vec<String>,
    pub query_text: String,
    pub field_text: String,
    pub databases: Vec<String>,
    pub max_values: Option<u32>,
}

impl ParametricRequest {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Self::default()
        }
    }

    pub fn with_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_field_text(mut self, field_text: impl Into<String>) -> Self {
        self.field_text = field_text.into();
        self
    }

    pub fn with_databases<I, S>(mut self, databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases = databases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_values(mut self, max_values: u32) -> Self {
        self.max_values = Some(max_values);
        self
    }
}

/// Tag values for one raw field, as the backend reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValueResponse {
    pub field_name: String,
    pub values: Vec<TagValue>,
}

impl TagValueResponse {
    pub fn new(field_name: impl Into<String>, values: Vec<TagValue>) -> Self {
        Self {
            field_name: field_name.into(),
            values,
        }
    }
}

/// A raw dependent facet value. Nesting follows the order of the requested
/// field names: top-level values belong to the first field, their
/// `dependents` to the second, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentTagValue {
    pub value: String,
    pub count: u64,
    pub dependents: Vec<DependentTagValue>,
}

impl DependentTagValue {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
            dependents: Vec::new(),
        }
    }

    pub fn with_dependents(mut self, dependents: Vec<DependentTagValue>) -> Self {
        self.dependents = dependents;
        self
    }
}

/// Faceting backend. Transport, authentication and retries belong to the
/// implementor.
pub trait ParametricBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn tag_values(
        &self,
        request: &ParametricRequest,
    ) -> std::result::Result<Vec<TagValueResponse>, Self::Error>;

    /// Tag values of `request.field_names`, each field counted within the
    /// values of the one before it.
    fn dependent_tag_values(
        &self,
        request: &ParametricRequest,
    ) -> std::result::Result<Vec<DependentTagValue>, Self::Error>;
}

/// Bucketing for one numeric field. Bounds default to the observed min/max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketingParams {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl BucketingParams {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            min: None,
            max: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParametricValuesService<B> {
    registry: SharedRegistry,
    backend: B,
}

impl<B: ParametricBackend> ParametricValuesService<B> {
    pub fn new(registry: SharedRegistry, backend: B) -> Self {
        Self { registry, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Facet values for the requested fields, or for every parametric field
    /// when none are named. Fields without values are dropped; values are
    /// ordered by count, most frequent first.
    pub fn parametric_values(&self, request: &ParametricRequest) -> Result<Vec<FieldTagValues>> {
        let registry = self.registry.snapshot();
        let responses = self.fetch(&registry, request, FieldCategory::Parametric)?;

        Ok(responses
            .into_iter()
            .filter(|response| !response.values.is_empty())
            .map(|response| {
                let mut values = response.values;
                values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
                let (id, display_name) = identity(&registry, &response.field_name);
                FieldTagValues {
                    name: response.field_name,
                    id,
                    display_name,
                    values,
                }
            })
            .collect())
    }

    /// Statistics per numeric field, keyed by raw field name.
    pub fn value_details(
        &self,
        request: &ParametricRequest,
    ) -> Result<BTreeMap<String, ValueDetails>> {
        let registry = self.registry.snapshot();
        let responses = self.fetch(&registry, request, FieldCategory::Numeric)?;

        let mut details = BTreeMap::new();
        for response in responses {
            let population = numeric_population(&response);
            let summary = compute_weighted_details(&population)
                .map_err(|_| ParametricError::empty(&response.field_name))?;
            details.insert(response.field_name, summary);
        }
        Ok(details)
    }

    /// Range buckets for each field in `params`.
    ///
    /// The request's own field list is replaced by the keys of `params`.
    pub fn numeric_buckets(
        &self,
        request: &ParametricRequest,
        params: &BTreeMap<String, BucketingParams>,
    ) -> Result<Vec<FieldRanges>> {
        if params.is_empty() {
            return Ok(Vec::new());
        }
        let registry = self.registry.snapshot();
        let request = request.clone().with_field_names(params.keys().cloned());
        let responses = self.fetch(&registry, &request, FieldCategory::Numeric)?;

        let mut ranges = Vec::with_capacity(responses.len());
        for response in responses {
            let Some(field_params) = params.get(&response.field_name) else {
                tracing::debug!(field = %response.field_name, "Ignoring unrequested field");
                continue;
            };
            let population = numeric_population(&response);
            let details = compute_weighted_details(&population)
                .map_err(|_| ParametricError::empty(&response.field_name))?;
            let min = field_params.min.unwrap_or(details.min);
            let max = field_params.max.unwrap_or(details.max);
            let buckets = bucket_values(min, max, field_params.count, &population)?;

            let (id, display_name) = identity(&registry, &response.field_name);
            ranges.push(FieldRanges {
                name: response.field_name,
                id,
                display_name,
                details,
                buckets,
            });
        }
        Ok(ranges)
    }

    /// Hierarchical facet values over the requested fields, or over every
    /// parametric field in registry order when none are named.
    ///
    /// Each level is decorated with the identity of its field. Zero-count
    /// values are dropped at every level, siblings are ordered by count (most
    /// frequent first), and nesting deeper than the field list is discarded.
    pub fn dependent_parametric_values(
        &self,
        request: &ParametricRequest,
    ) -> Result<Vec<DependentFieldValues>> {
        let registry = self.registry.snapshot();
        let Some(request) = with_category_fields(&registry, request, FieldCategory::Parametric)
        else {
            return Ok(Vec::new());
        };
        tracing::debug!(
            fields = request.field_names.len(),
            "Requesting dependent tag values"
        );
        let roots = self
            .backend
            .dependent_tag_values(&request)
            .map_err(backend_error)?;

        let levels: Vec<FieldLevel<'_>> = request
            .field_names
            .iter()
            .map(|name| {
                let (id, display_name) = identity(&registry, name);
                FieldLevel {
                    name: name.as_str(),
                    id,
                    display_name,
                }
            })
            .collect();
        Ok(decorate_dependents(roots, &levels))
    }

    fn fetch(
        &self,
        registry: &FieldTypeRegistry,
        request: &ParametricRequest,
        category: FieldCategory,
    ) -> Result<Vec<TagValueResponse>> {
        let Some(request) = with_category_fields(registry, request, category) else {
            return Ok(Vec::new());
        };
        tracing::debug!(
            %category,
            fields = request.field_names.len(),
            "Requesting tag values"
        );
        self.backend.tag_values(&request).map_err(backend_error)
    }
}

/// `request` with its field list filled from `category` when empty; `None`
/// when there is nothing to ask for.
fn with_category_fields(
    registry: &FieldTypeRegistry,
    request: &ParametricRequest,
    category: FieldCategory,
) -> Option<ParametricRequest> {
    let field_names = if request.field_names.is_empty() {
        registry.backend_names(category)
    } else {
        request.field_names.clone()
    };
    if field_names.is_empty() {
        tracing::debug!(%category, "No fields to request");
        return None;
    }
    Some(ParametricRequest {
        field_names,
        ..request.clone()
    })
}

fn backend_error<E>(error: E) -> ParametricError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ParametricError::Backend(Box::new(error))
}

struct FieldLevel<'a> {
    name: &'a str,
    id: Option<String>,
    display_name: String,
}

fn decorate_dependents(
    values: Vec<DependentTagValue>,
    levels: &[FieldLevel<'_>],
) -> Vec<DependentFieldValues> {
    let Some((level, deeper)) = levels.split_first() else {
        if !values.is_empty() {
            tracing::debug!(
                dropped = values.len(),
                "Dependent values nested deeper than the requested fields"
            );
        }
        return Vec::new();
    };

    let mut decorated: Vec<DependentFieldValues> = values
        .into_iter()
        .filter(|value| value.count > 0)
        .map(|value| DependentFieldValues {
            name: level.name.to_string(),
            id: level.id.clone(),
            display_name: level.display_name.clone(),
            value: value.value,
            count: value.count,
            dependents: decorate_dependents(value.dependents, deeper),
        })
        .collect();
    decorated.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    decorated
}

fn identity(registry: &FieldTypeRegistry, field_name: &str) -> (Option<String>, String) {
    match registry.resolve(field_name) {
        Some(field) => (Some(field.id.clone()), field.display_name.clone()),
        None => (None, field_name.to_string()),
    }
}

fn numeric_population(response: &TagValueResponse) -> Vec<(f64, u64)> {
    response
        .values
        .iter()
        .filter_map(|tag| match parse_number(&tag.value) {
            Some(number) => Some((number, tag.count)),
            None => {
                tracing::debug!(
                    field = %response.field_name,
                    value = %tag.value,
                    "Skipping non-numeric tag value"
                );
                None
            }
        })
        .collect()
}
