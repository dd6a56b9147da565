//! Registry-driven parametric requests against an in-memory backend.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use search_fields::{FieldTypeRegistry, SharedRegistry};
use search_model::{CanonicalField, FieldType, TagValue};
use search_parametric::{
    BucketingParams, DependentTagValue, ParametricBackend, ParametricError, ParametricRequest,
    ParametricValuesService, TagValueResponse,
};

/// Answers from a fixed table and records every request it sees.
#[derive(Default)]
struct FakeBackend {
    table: BTreeMap<String, Vec<TagValue>>,
    tree: Vec<DependentTagValue>,
    requests: RefCell<Vec<ParametricRequest>>,
    fail: bool,
}

impl FakeBackend {
    fn with(mut self, field: &str, values: &[(&str, u64)]) -> Self {
        self.table.insert(
            field.to_string(),
            values.iter().map(|(v, c)| TagValue::new(*v, *c)).collect(),
        );
        self
    }

    fn with_tree(mut self, tree: Vec<DependentTagValue>) -> Self {
        self.tree = tree;
        self
    }
}

impl ParametricBackend for FakeBackend {
    type Error = io::Error;

    fn tag_values(&self, request: &ParametricRequest) -> Result<Vec<TagValueResponse>, io::Error> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "backend down"));
        }
        Ok(request
            .field_names
            .iter()
            .filter_map(|name| {
                self.table
                    .get(name)
                    .map(|values| TagValueResponse::new(name.clone(), values.clone()))
            })
            .collect())
    }

    fn dependent_tag_values(
        &self,
        request: &ParametricRequest,
    ) -> Result<Vec<DependentTagValue>, io::Error> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "backend down"));
        }
        Ok(self.tree.clone())
    }
}

fn registry() -> SharedRegistry {
    FieldTypeRegistry::new([
        CanonicalField::new("author", FieldType::String)
            .with_display_name("Author")
            .with_aliases(["AUTHOR"])
            .with_parametric(true),
        CanonicalField::new("price", FieldType::Number)
            .with_display_name("Price")
            .with_aliases(["PRICE"])
            .with_parametric(true),
        CanonicalField::new("body", FieldType::String).with_aliases(["DRECONTENT"]),
    ])
    .unwrap()
    .into()
}

fn backend() -> FakeBackend {
    FakeBackend::default()
        .with("AUTHOR", &[("Smith", 2), ("Jones", 5), ("Adams", 2)])
        .with("PRICE", &[("10", 1), ("20", 3), ("n/a", 7), ("40", 1)])
        .with("EMPTY", &[])
        .with("UNCONFIGURED", &[("x", 1)])
}

#[test]
fn defaults_to_parametric_fields() {
    let service = ParametricValuesService::new(registry(), backend());

    let fields = service
        .parametric_values(&ParametricRequest::new("*"))
        .unwrap();

    let requested = &service.backend().requests.borrow()[0];
    assert_eq!(requested.field_names, vec!["AUTHOR", "PRICE"]);
    assert_eq!(requested.query_text, "*");

    assert_eq!(fields.len(), 2);
    let author = &fields[0];
    assert_eq!(author.id.as_deref(), Some("author"));
    assert_eq!(author.display_name, "Author");
    let ordered: Vec<(&str, u64)> = author
        .values
        .iter()
        .map(|v| (v.value.as_str(), v.count))
        .collect();
    assert_eq!(ordered, vec![("Jones", 5), ("Adams", 2), ("Smith", 2)]);
}

#[test]
fn explicit_fields_are_passed_through() {
    let service = ParametricValuesService::new(registry(), backend());
    let request = ParametricRequest::new("cats")
        .with_field_names(["UNCONFIGURED", "EMPTY"])
        .with_databases(["news_eng"])
        .with_field_text("MATCH{x}:TYPE")
        .with_max_values(10);

    let fields = service.parametric_values(&request).unwrap();

    assert_eq!(service.backend().requests.borrow()[0], request);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "UNCONFIGURED");
    assert_eq!(fields[0].id, None);
    assert_eq!(fields[0].display_name, "UNCONFIGURED");
}

#[test]
fn numeric_details_skip_non_numeric_values() {
    let service = ParametricValuesService::new(registry(), backend());

    let details = service.value_details(&ParametricRequest::new("*")).unwrap();

    let price = details["PRICE"];
    assert_eq!(price.min, 10.0);
    assert_eq!(price.max, 40.0);
    assert_eq!(price.sum, 110.0);
    assert_eq!(price.total_values, 5);
    assert_eq!(price.average, 22.0);
    assert_eq!(service.backend().requests.borrow()[0].field_names, vec!["PRICE"]);
}

#[test]
fn field_without_numbers_is_empty_population() {
    let service = ParametricValuesService::new(registry(), backend());
    let request = ParametricRequest::new("*").with_field_names(["AUTHOR"]);

    let error = service.value_details(&request).unwrap_err();

    assert!(matches!(
        error,
        ParametricError::EmptyPopulation { field: Some(ref f) } if f == "AUTHOR"
    ));
    assert_eq!(error.to_string(), "no values to summarize for field 'AUTHOR'");
}

#[test]
fn buckets_use_observed_range_by_default() {
    let service = ParametricValuesService::new(registry(), backend());
    let mut params = BTreeMap::new();
    params.insert("PRICE".to_string(), BucketingParams::new(3));

    let ranges = service
        .numeric_buckets(&ParametricRequest::new("*"), &params)
        .unwrap();

    assert_eq!(ranges.len(), 1);
    let price = &ranges[0];
    assert_eq!(price.id.as_deref(), Some("price"));
    assert_eq!(price.display_name, "Price");
    let layout: Vec<(f64, f64, u64)> = price
        .buckets
        .iter()
        .map(|b| (b.lower_bound, b.upper_bound, b.count))
        .collect();
    assert_eq!(layout, vec![(10.0, 20.0, 1), (20.0, 30.0, 3), (30.0, 40.0, 1)]);
}

#[test]
fn explicit_bucket_range_overrides_observed() {
    let service = ParametricValuesService::new(registry(), backend());
    let mut params = BTreeMap::new();
    params.insert("PRICE".to_string(), BucketingParams::new(2).with_range(0.0, 20.0));

    let ranges = service
        .numeric_buckets(&ParametricRequest::new("*"), &params)
        .unwrap();

    let counts: Vec<u64> = ranges[0].buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![0, 4]);
    assert_eq!(ranges[0].details.max, 40.0);
}

#[test]
fn backend_failure_is_wrapped() {
    let backend = FakeBackend {
        fail: true,
        ..FakeBackend::default()
    };
    let service = ParametricValuesService::new(registry(), backend);

    let error = service
        .parametric_values(&ParametricRequest::new("*"))
        .unwrap_err();

    assert!(matches!(error, ParametricError::Backend(_)));
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(source.to_string(), "backend down");
}

#[test]
fn no_parametric_fields_skips_backend() {
    let service = ParametricValuesService::new(FieldTypeRegistry::empty().into(), backend());

    let fields = service
        .parametric_values(&ParametricRequest::new("*"))
        .unwrap();

    assert!(fields.is_empty());
    assert!(service.backend().requests.borrow().is_empty());
}

#[test]
fn registry_swap_changes_requested_fields() {
    let shared = registry();
    let service = ParametricValuesService::new(shared.clone(), backend());

    shared.replace(
        FieldTypeRegistry::new([CanonicalField::new("price", FieldType::Number)
            .with_aliases(["PRICE"])
            .with_parametric(true)])
        .unwrap(),
    );
    service.parametric_values(&ParametricRequest::new("*")).unwrap();

    assert_eq!(service.backend().requests.borrow()[0].field_names, vec!["PRICE"]);
}

fn leaf(value: &str, count: u64) -> DependentTagValue {
    DependentTagValue::new(value, count)
}

/// Author -> price tree, deliberately unordered and with a zero count.
fn author_price_tree() -> Vec<DependentTagValue> {
    vec![
        leaf("Smith", 2).with_dependents(vec![leaf("10", 2)]),
        leaf("Jones", 5).with_dependents(vec![leaf("10", 1), leaf("40", 4), leaf("20", 0)]),
        leaf("Nobody", 0).with_dependents(vec![leaf("10", 3)]),
    ]
}

#[test]
fn dependent_values_are_nested_by_field_order() {
    let service = ParametricValuesService::new(registry(), backend().with_tree(author_price_tree()));

    let tree = service
        .dependent_parametric_values(&ParametricRequest::new("*"))
        .unwrap();

    assert_eq!(
        service.backend().requests.borrow()[0].field_names,
        vec!["AUTHOR", "PRICE"]
    );
    let top: Vec<(&str, u64)> = tree.iter().map(|v| (v.value.as_str(), v.count)).collect();
    assert_eq!(top, vec![("Jones", 5), ("Smith", 2)]);

    let jones = &tree[0];
    assert_eq!(jones.name, "AUTHOR");
    assert_eq!(jones.id.as_deref(), Some("author"));
    assert_eq!(jones.display_name, "Author");
    assert_eq!(jones.depth(), 2);

    let prices: Vec<(&str, &str, u64)> = jones
        .dependents
        .iter()
        .map(|v| (v.display_name.as_str(), v.value.as_str(), v.count))
        .collect();
    assert_eq!(prices, vec![("Price", "40", 4), ("Price", "10", 1)]);
    assert!(jones.dependents.iter().all(|v| v.dependents.is_empty()));
}

#[test]
fn dependent_values_deeper_than_fields_are_dropped() {
    let tree = vec![leaf("Jones", 5).with_dependents(vec![
        leaf("10", 5).with_dependents(vec![leaf("orphan", 5)]),
    ])];
    let service = ParametricValuesService::new(registry(), backend().with_tree(tree));
    let request = ParametricRequest::new("*").with_field_names(["AUTHOR", "UNCONFIGURED"]);

    let tree = service.dependent_parametric_values(&request).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].depth(), 2);
    let child = &tree[0].dependents[0];
    assert_eq!(child.name, "UNCONFIGURED");
    assert_eq!(child.id, None);
    assert_eq!(child.display_name, "UNCONFIGURED");
    assert!(child.dependents.is_empty());
}

#[test]
fn dependent_values_serialize_as_a_tree() {
    let tree = vec![leaf("Jones", 5).with_dependents(vec![leaf("40", 4)])];
    let service = ParametricValuesService::new(registry(), backend().with_tree(tree));

    let tree = service
        .dependent_parametric_values(&ParametricRequest::new("*"))
        .unwrap();

    insta::assert_snapshot!(serde_json::to_string_pretty(&tree).unwrap(), @r#"
    [
      {
        "name": "AUTHOR",
        "id": "author",
        "displayName": "Author",
        "value": "Jones",
        "count": 5,
        "dependents": [
          {
            "name": "PRICE",
            "id": "price",
            "displayName": "Price",
            "value": "40",
            "count": 4
          }
        ]
      }
    ]
    "#);
}

#[test]
fn dependent_request_without_fields_skips_backend() {
    let service = ParametricValuesService::new(
        FieldTypeRegistry::empty().into(),
        backend().with_tree(author_price_tree()),
    );

    let tree = service
        .dependent_parametric_values(&ParametricRequest::new("*"))
        .unwrap();

    assert!(tree.is_empty());
    assert!(service.backend().requests.borrow().is_empty());
}

#[test]
fn dependent_backend_failure_is_wrapped() {
    let backend = FakeBackend {
        fail: true,
        ..FakeBackend::default()
    };
    let service = ParametricValuesService::new(registry(), backend);

    let error = service
        .dependent_parametric_values(&ParametricRequest::new("*"))
        .unwrap_err();

    assert!(matches!(error, ParametricError::Backend(_)));
}
