//! Resolver for `external://structured_store/json_date_range/` references
//!
//! A date-range attribute stores `{"date1": ..., "date2": ...}` as ISO
//! dates but reads and writes as one human phrase. The conversion is owned
//! by the record's converter, so the accessor is bound at attachment time
//! rather than at resolution time.

use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};

use crate::converters::DateRangeConverter;
use crate::error::{StoreError, StoreResult};
use crate::schema::{ScalarType, SchemaInspector};
use crate::store::{Accessor, Attachment, StoreMap};

use super::{RefResolver, ResolverContext, ResolverFactory, ResolverRegistry, SelectOption};

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves date-range properties stored as an ISO date pair.
pub struct DateRangeResolver {
    property: String,
}

fn parse_stored_date(value: Option<&Value>) -> Option<NaiveDate> {
    let text = value?.as_str()?;
    // Stored values may carry a trailing time component; the date is always
    // the first ten characters.
    let date_part = text.get(..10)?;
    NaiveDate::parse_from_str(date_part, STORED_DATE_FORMAT).ok()
}

fn range_accessor(property: &str, converter: Arc<dyn DateRangeConverter>) -> Accessor {
    let get_name = property.to_string();
    let set_name = property.to_string();
    let get_converter = Arc::clone(&converter);

    Accessor::new(
        Box::new(move |store: &StoreMap| {
            Ok(match store.get(&get_name) {
                None | Some(Value::Null) => None,
                Some(Value::String(text)) => Some(Value::String(text.clone())),
                Some(Value::Object(pair)) => {
                    let start = parse_stored_date(pair.get("date1"));
                    match start {
                        None => None,
                        Some(start) => {
                            let end = parse_stored_date(pair.get("date2")).unwrap_or(start);
                            Some(Value::String(get_converter.convert_to_string(start, end)))
                        }
                    }
                }
                Some(_) => None,
            })
        }),
        Box::new(move |store: &mut StoreMap, value: Value| {
            let stored = match &value {
                Value::String(text) if !text.trim().is_empty() => {
                    let (start, end) = converter.convert_to_dates(text);
                    let mut pair = Map::new();
                    pair.insert("date1".into(), iso_or_null(start));
                    pair.insert("date2".into(), iso_or_null(end));
                    Value::Object(pair)
                }
                _ => Value::Null,
            };
            store.insert(set_name.clone(), stored);
            Ok(())
        }),
    )
}

fn iso_or_null(date: Option<NaiveDate>) -> Value {
    match date {
        Some(date) => Value::String(date.format(STORED_DATE_FORMAT).to_string()),
        None => Value::Null,
    }
}

impl RefResolver for DateRangeResolver {
    fn define_attribute(&self, _registry: &ResolverRegistry) -> StoreResult<Attachment> {
        let property = self.property.clone();
        Ok(Attachment::new(move |record| {
            let converter = record.date_range_converter();
            record.install_accessor(property.clone(), range_accessor(&property, converter));
            Ok(())
        }))
    }

    fn options_array(&self, _registry: &ResolverRegistry) -> StoreResult<Vec<SelectOption>> {
        Ok(Vec::new())
    }

    fn scalar_type(&self) -> StoreResult<ScalarType> {
        Err(StoreError::unsupported_attribute_type(
            &self.property,
            "json_date_range",
        ))
    }
}

/// Factory for date-range references.
pub struct DateRangeResolverFactory;

impl ResolverFactory for DateRangeResolverFactory {
    fn id(&self) -> &'static str {
        "json_date_range"
    }

    fn pattern(&self) -> Regex {
        Regex::new(r"^external://structured_store/json_date_range/")
            .expect("date range pattern is valid")
    }

    fn build(
        &self,
        _inspector: Arc<SchemaInspector>,
        property: String,
        _property_schema: Map<String, Value>,
        _ref_string: String,
        _context: ResolverContext,
    ) -> Box<dyn RefResolver> {
        Box::new(DateRangeResolver { property })
    }
}
