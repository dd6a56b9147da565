//! Whole query responses: batches of records plus the response envelope.

use serde::Serialize;
use serde_json::Value;

use search_fields::FieldTypeRegistry;
use search_model::{Document, Namespace};

use crate::domain::DomainResolver;
use crate::error::{NormalizeError, Result};
use crate::normalizer::ResultNormalizer;
use crate::record::{RawRecord, json_kind};

/// Everything needed to turn one backend response into documents for one
/// caller.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub registry: &'a FieldTypeRegistry,
    pub resolver: &'a DomainResolver,
    pub queried: &'a [Namespace],
    pub caller_domain: &'a str,
}

impl<'a> NormalizeContext<'a> {
    pub fn new(
        registry: &'a FieldTypeRegistry,
        resolver: &'a DomainResolver,
        queried: &'a [Namespace],
        caller_domain: &'a str,
    ) -> Self {
        Self {
            registry,
            resolver,
            queried,
            caller_domain,
        }
    }

    /// Normalize one record and attach its resolved domain.
    pub fn normalize(&self, record: &RawRecord) -> Result<Document> {
        let document = ResultNormalizer::new(self.registry).normalize(record)?;
        let domain = self
            .resolver
            .resolve(document.index(), self.queried, self.caller_domain);
        Ok(document.with_domain(domain))
    }
}

/// A record that could not become a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Zero-based position in the backend response.
    pub position: usize,
    pub error: NormalizeError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub documents: Vec<Document>,
    pub rejected: Vec<RejectedRecord>,
}

impl NormalizedBatch {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalize every record, keeping successes in input order.
pub fn normalize_records<'r, I>(records: I, context: &NormalizeContext<'_>) -> NormalizedBatch
where
    I: IntoIterator<Item = &'r RawRecord>,
{
    collect_batch(records.into_iter().map(|record| context.normalize(record)))
}

fn collect_batch<I>(outcomes: I) -> NormalizedBatch
where
    I: IntoIterator<Item = Result<Document>>,
{
    let mut batch = NormalizedBatch::default();
    for (position, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(document) => batch.documents.push(document),
            Err(error) => {
                tracing::warn!(position, %error, "Rejected search result");
                batch.rejected.push(RejectedRecord { position, error });
            }
        }
    }
    batch
}

/// A normalized query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub documents: Vec<Document>,
    pub total_results: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_correction: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub rejected: Vec<RejectedRecord>,
}

/// Normalize a JSON query response envelope.
///
/// A missing `documents` member is an empty result set. Individual records
/// that fail land in [`SearchResults::rejected`]; only an envelope of the
/// wrong shape fails the whole call.
pub fn normalize_query_results(
    response: &Value,
    context: &NormalizeContext<'_>,
) -> Result<SearchResults> {
    let Value::Object(envelope) = response else {
        return Err(NormalizeError::NotAnObject {
            found: json_kind(response),
        });
    };

    let nodes: &[Value] = match envelope.get("documents") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(NormalizeError::MalformedResponse {
                reason: format!("'documents' is {}, expected an array", json_kind(other)),
            });
        }
    };

    let total_results = match envelope.get("total_results") {
        None | Some(Value::Null) => 0,
        Some(value) => value.as_u64().ok_or_else(|| NormalizeError::MalformedResponse {
            reason: format!("'total_results' is not a non-negative integer: {value}"),
        })?,
    };

    let warnings: Vec<String> = envelope
        .get("warnings")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Backend reported a warning");
    }

    let batch = collect_batch(
        nodes
            .iter()
            .map(|node| RawRecord::from_json(node).and_then(|record| context.normalize(&record))),
    );
    tracing::debug!(
        documents = batch.documents.len(),
        rejected = batch.rejected.len(),
        total_results,
        "Normalized query response"
    );

    Ok(SearchResults {
        documents: batch.documents,
        total_results,
        expanded_query: string_member(envelope, "expanded_query"),
        suggestion: string_member(envelope, "suggestion"),
        auto_correction: string_member(envelope, "auto_correction"),
        warnings,
        rejected: batch.rejected,
    })
}

fn string_member(envelope: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    envelope.get(key).and_then(Value::as_str).map(str::to_string)
}
