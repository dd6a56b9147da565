//! Owning-domain resolution for federated results.
//!
//! Some backends report only the index a result came from, not the domain
//! that owns it. The domain is inferred, first match wins:
//!
//! 1. an index the caller queried with that exact name
//! 2. a well-known public index → [`PUBLIC_INDEXES_DOMAIN`]
//! 3. the caller's own domain

use std::collections::BTreeSet;

use search_model::{Namespace, PUBLIC_INDEXES_DOMAIN};

/// Indexes every tenant can query.
pub const DEFAULT_PUBLIC_INDEXES: &[&str] = &[
    "wiki_chi",
    "wiki_eng",
    "wiki_fra",
    "wiki_ger",
    "wiki_ita",
    "wiki_spa",
    "world_factbook",
    "news_eng",
    "news_fra",
    "news_ger",
    "news_ita",
    "arxiv",
    "patents",
];

/// Resolve the domain of a result reported under `reported_index`.
///
/// When `queried` holds the same name under several domains the first entry
/// wins; index names are not guaranteed unique across domains.
pub fn resolve_domain(
    reported_index: &str,
    queried: &[Namespace],
    public_indexes: &BTreeSet<String>,
    caller_domain: &str,
) -> String {
    if let Some(position) = queried.iter().position(|ns| ns.name == reported_index) {
        let chosen = &queried[position];
        if queried[position + 1..]
            .iter()
            .any(|ns| ns.name == reported_index && ns.domain != chosen.domain)
        {
            tracing::debug!(
                index = %reported_index,
                domain = %chosen.domain,
                "Index name queried under several domains; using first match"
            );
        }
        return chosen.domain.clone();
    }
    if public_indexes.contains(reported_index) {
        return PUBLIC_INDEXES_DOMAIN.to_string();
    }
    caller_domain.to_string()
}

/// [`resolve_domain`] with a fixed public index set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResolver {
    public_indexes: BTreeSet<String>,
}

impl DomainResolver {
    pub fn new<I, S>(public_indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public_indexes: public_indexes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_public(&self, index: &str) -> bool {
        self.public_indexes.contains(index)
    }

    pub fn public_indexes(&self) -> &BTreeSet<String> {
        &self.public_indexes
    }

    pub fn resolve(&self, reported_index: &str, queried: &[Namespace], caller_domain: &str) -> String {
        resolve_domain(reported_index, queried, &self.public_indexes, caller_domain)
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_INDEXES.iter().copied())
    }
}
