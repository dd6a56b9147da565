//! Raw record → canonical [`Document`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use search_fields::FieldTypeRegistry;
use search_model::{Document, FieldValue, PromotionCategory, Timestamp};

use crate::datetime::parse_date;
use crate::error::{NormalizeError, Result};
use crate::numeric::parse_number;
use crate::record::RawRecord;
use crate::value::parse_values;

/// Fixed attribute names read independently of the field registry.
pub mod names {
    pub const REFERENCE: &str = "reference";
    pub const INDEX: &str = "index";
    pub const TITLE: &str = "title";
    pub const SUMMARY: &str = "summary";
    pub const WEIGHT: &str = "weight";
    pub const PROMOTION: &str = "promotion";
    pub const PROMOTION_NAME: &str = "promotion_name";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const URL: &str = "url";
    pub const OFFSET: &str = "offset";
    pub const AUTHOR: &str = "author";
    pub const CATEGORY: &str = "category";
    pub const DATE: &str = "date";
    pub const DATE_CREATED: &str = "date_created";
    pub const CREATED_DATE: &str = "created_date";
    pub const DATE_MODIFIED: &str = "date_modified";
    pub const MODIFIED_DATE: &str = "modified_date";
    pub const QMS_ID: &str = "qmsid";
    pub const INJECTED_PROMOTION: &str = "injectedpromotion";
}

/// Builds documents from raw records using one registry snapshot.
///
/// Holds no state besides the borrowed registry, so one normalizer can serve
/// any number of records, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ResultNormalizer<'a> {
    registry: &'a FieldTypeRegistry,
}

impl<'a> ResultNormalizer<'a> {
    pub fn new(registry: &'a FieldTypeRegistry) -> Self {
        Self { registry }
    }

    /// Normalize one record.
    ///
    /// Only a missing `reference` or `index` fails; every other problem
    /// leaves the affected attribute unset.
    pub fn normalize(&self, record: &RawRecord) -> Result<Document> {
        let reference = identity(record, names::REFERENCE)?;
        let index = identity(record, names::INDEX)?;

        let document = Document::builder(reference, index)
            .title(first_string(record, names::TITLE))
            .summary(first_string(record, names::SUMMARY))
            .content_type(first_string(record, names::CONTENT_TYPE))
            .url(first_string(record, names::URL))
            .offset(first_string(record, names::OFFSET))
            .authors(record.values(names::AUTHOR).to_vec())
            .categories(record.values(names::CATEGORY).to_vec())
            .date(first_date(record, &[names::DATE]))
            .date_created(first_date(record, &[names::DATE_CREATED, names::CREATED_DATE]))
            .date_modified(first_date(record, &[names::DATE_MODIFIED, names::MODIFIED_DATE]))
            .weight(weight(record))
            .qms_id(first_string(record, names::QMS_ID))
            .promotion_name(first_string(record, names::PROMOTION_NAME))
            .injected_promotion(
                record
                    .first(names::INJECTED_PROMOTION)
                    .map(|value| value.trim().eq_ignore_ascii_case("true")),
            )
            .promotion_category(promotion(record))
            .extra_fields(self.extract_fields(record))
            .build();

        Ok(document)
    }

    /// Typed values for every configured alias present on the record.
    ///
    /// Fields are visited in id order and aliases in configured order; a later
    /// alias of the same field replaces the values of an earlier one.
    pub fn extract_fields(&self, record: &RawRecord) -> BTreeMap<String, FieldValue> {
        let mut extracted: BTreeMap<String, FieldValue> = BTreeMap::new();

        for field in self.registry.fields() {
            for alias in &field.aliases {
                let raw_values = record.values(alias);
                if raw_values.is_empty() {
                    continue;
                }
                let values = match parse_values(field, raw_values) {
                    Ok(values) => values,
                    Err(error) => {
                        tracing::debug!(
                            field = %field.id,
                            alias = %alias,
                            %error,
                            "Dropped unparseable field value"
                        );
                        continue;
                    }
                };
                match extracted.entry(field.id.clone()) {
                    Entry::Occupied(mut existing) => existing.get_mut().replace(alias.clone(), values),
                    Entry::Vacant(slot) => {
                        slot.insert(FieldValue::new(field, alias.clone(), values));
                    }
                }
            }
        }

        extracted
    }
}

/// Normalize `record` against `registry`.
pub fn normalize_record(record: &RawRecord, registry: &FieldTypeRegistry) -> Result<Document> {
    ResultNormalizer::new(registry).normalize(record)
}

fn identity(record: &RawRecord, attribute: &'static str) -> Result<String> {
    record
        .first(attribute)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .ok_or(NormalizeError::MissingIdentity { attribute })
}

fn first_string(record: &RawRecord, name: &str) -> Option<String> {
    record.first(name).map(str::to_string)
}

/// First value of the first name whose first value parses.
fn first_date(record: &RawRecord, names: &[&str]) -> Option<Timestamp> {
    names.iter().find_map(|name| {
        let raw = record.first(name)?;
        let parsed = parse_date(raw);
        if parsed.is_none() {
            tracing::debug!(field = %name, raw = %raw, "Ignoring unparseable date");
        }
        parsed
    })
}

fn weight(record: &RawRecord) -> Option<f64> {
    let raw = record.first(names::WEIGHT)?;
    let parsed = parse_number(raw);
    if parsed.is_none() {
        tracing::debug!(raw = %raw, "Ignoring unparseable weight");
    }
    parsed
}

fn promotion(record: &RawRecord) -> Option<PromotionCategory> {
    let code = record.first(names::PROMOTION)?;
    let category = PromotionCategory::from_backend_code(code);
    if category.is_none() {
        tracing::debug!(code = %code, "Unknown promotion type");
    }
    category
}
