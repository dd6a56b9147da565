//! Canonical search result.
//!
//! A [`Document`] is produced once per raw backend record and never mutated.
//! The only way to derive a changed document is [`Document::to_builder`],
//! which copies every attribute into a fresh [`DocumentBuilder`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::value::FieldValue;

/// How a result was injected into the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionCategory {
    None,
    Spotlight,
    StaticContent,
    CardinalPlacement,
}

impl PromotionCategory {
    /// Map a backend promotion-type code. Unknown codes have no category.
    pub fn from_backend_code(code: &str) -> Option<Self> {
        match code.trim() {
            "DYNAMIC_PROMOTION" | "STATIC_REFERENCE_PROMOTION" => Some(Self::Spotlight),
            "STATIC_CONTENT_PROMOTION" => Some(Self::StaticContent),
            "CARDINAL_PLACEMENT" => Some(Self::CardinalPlacement),
            "NONE" => Some(Self::None),
            _ => None,
        }
    }

    pub fn is_promotion(&self) -> bool {
        !matches!(self, PromotionCategory::None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    reference: String,
    index: String,
    domain: String,
    title: Option<String>,
    summary: Option<String>,
    content_type: Option<String>,
    url: Option<String>,
    offset: Option<String>,
    authors: Vec<String>,
    categories: Vec<String>,
    date: Option<Timestamp>,
    date_created: Option<Timestamp>,
    date_modified: Option<Timestamp>,
    weight: Option<f64>,
    qms_id: Option<String>,
    promotion_name: Option<String>,
    injected_promotion: Option<bool>,
    promotion_category: Option<PromotionCategory>,
    extra_fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn builder(reference: impl Into<String>, index: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(reference, index)
    }

    /// Copy this document into a builder for a copy-with-changes.
    pub fn to_builder(&self) -> DocumentBuilder {
        DocumentBuilder {
            document: self.clone(),
        }
    }

    /// Convenience over [`Document::to_builder`] for attaching a resolved domain.
    pub fn with_domain(&self, domain: impl Into<String>) -> Document {
        self.to_builder().domain(domain).build()
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Resolved owning domain; empty until attached.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn date(&self) -> Option<Timestamp> {
        self.date
    }

    pub fn date_created(&self) -> Option<Timestamp> {
        self.date_created
    }

    pub fn date_modified(&self) -> Option<Timestamp> {
        self.date_modified
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn qms_id(&self) -> Option<&str> {
        self.qms_id.as_deref()
    }

    pub fn promotion_name(&self) -> Option<&str> {
        self.promotion_name.as_deref()
    }

    pub fn injected_promotion(&self) -> Option<bool> {
        self.injected_promotion
    }

    pub fn promotion_category(&self) -> Option<PromotionCategory> {
        self.promotion_category
    }

    pub fn extra_fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.extra_fields
    }

    pub fn extra_field(&self, id: &str) -> Option<&FieldValue> {
        self.extra_fields.get(id)
    }
}

/// Accumulates attributes for a [`Document`]. Setters consume and return the
/// builder; `None`-style absence is expressed by not calling the setter.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new(reference: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            document: Document {
                reference: reference.into(),
                index: index.into(),
                domain: String::new(),
                title: None,
                summary: None,
                content_type: None,
                url: None,
                offset: None,
                authors: Vec::new(),
                categories: Vec::new(),
                date: None,
                date_created: None,
                date_modified: None,
                weight: None,
                qms_id: None,
                promotion_name: None,
                injected_promotion: None,
                promotion_category: None,
                extra_fields: BTreeMap::new(),
            },
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.document.domain = domain.into();
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.document.title = title;
        self
    }

    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.document.summary = summary;
        self
    }

    pub fn content_type(mut self, content_type: Option<String>) -> Self {
        self.document.content_type = content_type;
        self
    }

    pub fn url(mut self, url: Option<String>) -> Self {
        self.document.url = url;
        self
    }

    pub fn offset(mut self, offset: Option<String>) -> Self {
        self.document.offset = offset;
        self
    }

    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.document.authors = authors;
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.document.categories = categories;
        self
    }

    pub fn date(mut self, date: Option<Timestamp>) -> Self {
        self.document.date = date;
        self
    }

    pub fn date_created(mut self, date_created: Option<Timestamp>) -> Self {
        self.document.date_created = date_created;
        self
    }

    pub fn date_modified(mut self, date_modified: Option<Timestamp>) -> Self {
        self.document.date_modified = date_modified;
        self
    }

    pub fn weight(mut self, weight: Option<f64>) -> Self {
        self.document.weight = weight;
        self
    }

    pub fn qms_id(mut self, qms_id: Option<String>) -> Self {
        self.document.qms_id = qms_id;
        self
    }

    pub fn promotion_name(mut self, promotion_name: Option<String>) -> Self {
        self.document.promotion_name = promotion_name;
        self
    }

    pub fn injected_promotion(mut self, injected_promotion: Option<bool>) -> Self {
        self.document.injected_promotion = injected_promotion;
        self
    }

    pub fn promotion_category(mut self, category: Option<PromotionCategory>) -> Self {
        self.document.promotion_category = category;
        self
    }

    pub fn extra_fields(mut self, extra_fields: BTreeMap<String, FieldValue>) -> Self {
        self.document.extra_fields = extra_fields;
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}
