use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, info, info_span};

use search_fields::{FieldCategory, FieldTypeRegistry, load_registry};
use search_model::{CanonicalField, Namespace, RangeBucket, ValueDetails};
use search_normalize::{DomainResolver, NormalizeContext, SearchResults, normalize_query_results};
use search_parametric::{bucket_values, compute_details};

/// Inputs of the `normalize` command besides the response file.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub namespaces: Vec<Namespace>,
    pub caller_domain: String,
    /// Overrides the well-known public index list when non-empty.
    pub public_indexes: Vec<String>,
}

pub fn run_normalize(
    response_path: &Path,
    fields_path: &Path,
    options: &NormalizeOptions,
) -> Result<SearchResults> {
    let span = info_span!("normalize", response = %response_path.display());
    let _guard = span.enter();

    let registry = load_registry(fields_path)
        .with_context(|| format!("load field configuration {}", fields_path.display()))?;
    let response = read_json(response_path)?;
    let resolver = if options.public_indexes.is_empty() {
        DomainResolver::default()
    } else {
        DomainResolver::new(options.public_indexes.iter().cloned())
    };

    let context = NormalizeContext::new(
        &registry,
        &resolver,
        &options.namespaces,
        &options.caller_domain,
    );
    let results = normalize_query_results(&response, &context)
        .with_context(|| format!("normalize {}", response_path.display()))?;
    info!(
        documents = results.documents.len(),
        rejected = results.rejected.len(),
        "Normalized response"
    );
    Ok(results)
}

/// Configured fields, optionally limited to one category.
pub fn run_fields(fields_path: &Path, category: Option<FieldCategory>) -> Result<Vec<CanonicalField>> {
    let registry: FieldTypeRegistry = load_registry(fields_path)
        .with_context(|| format!("load field configuration {}", fields_path.display()))?;
    let fields = match category {
        Some(category) => registry.fields_in(category).cloned().collect(),
        None => registry.fields().cloned().collect(),
    };
    Ok(fields)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketReport {
    pub details: ValueDetails,
    pub buckets: Vec<RangeBucket>,
}

/// Bucket a JSON array of numbers.
pub fn run_buckets(
    values_path: &Path,
    count: usize,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<BucketReport> {
    let values = read_numbers(values_path)?;
    debug!(values = values.len(), "Loaded values");

    let details = compute_details(&values).context("summarize values")?;
    let weighted: Vec<(f64, u64)> = values.iter().map(|&value| (value, 1)).collect();
    let buckets = bucket_values(
        min.unwrap_or(details.min),
        max.unwrap_or(details.max),
        count,
        &weighted,
    )
    .context("bucket values")?;
    Ok(BucketReport { details, buckets })
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse JSON {}", path.display()))
}

fn read_numbers(path: &Path) -> Result<Vec<f64>> {
    let Value::Array(items) = read_json(path)? else {
        bail!("{} must contain a JSON array of numbers", path.display());
    };
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_f64()
                .with_context(|| format!("{}: element {position} is not a number", path.display()))
        })
        .collect()
}
