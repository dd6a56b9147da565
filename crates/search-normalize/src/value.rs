//! Typed parsing of raw field values, dispatched on [`FieldType`].

use search_model::{CanonicalField, FieldType, TypedValue};

use crate::datetime::parse_date;
use crate::error::ValueParseError;
use crate::numeric::{parse_boolean, parse_number};

/// Parse one raw scalar as `field_type`. Dates report failure as
/// [`ValueParseError::Date`] with a count of one.
pub fn parse_value(field_type: FieldType, raw: &str) -> Result<TypedValue, ValueParseError> {
    match field_type {
        FieldType::String => Ok(TypedValue::String(raw.to_string())),
        FieldType::Number => parse_number(raw)
            .map(TypedValue::Number)
            .ok_or_else(|| ValueParseError::Number {
                raw: raw.to_string(),
            }),
        FieldType::Boolean => parse_boolean(raw)
            .map(TypedValue::Boolean)
            .ok_or_else(|| ValueParseError::Boolean {
                raw: raw.to_string(),
            }),
        FieldType::Date => parse_date(raw)
            .map(TypedValue::Date)
            .ok_or(ValueParseError::Date { count: 1 }),
    }
}

/// Parse every raw occurrence of one alias.
///
/// Numbers and booleans are all-or-nothing: one bad value rejects the whole
/// occurrence. Unparseable dates are skipped individually; the occurrence
/// fails only when none of them parse.
pub fn parse_values(
    field: &CanonicalField,
    raw_values: &[String],
) -> Result<Vec<TypedValue>, ValueParseError> {
    match field.field_type {
        FieldType::Date => {
            let dates: Vec<TypedValue> = raw_values
                .iter()
                .filter_map(|raw| parse_date(raw).map(TypedValue::Date))
                .collect();
            if dates.is_empty() {
                Err(ValueParseError::Date {
                    count: raw_values.len(),
                })
            } else {
                Ok(dates)
            }
        }
        field_type => raw_values
            .iter()
            .map(|raw| parse_value(field_type, raw))
            .collect(),
    }
}
