//! Record serialization at the API boundary.
//!
//! `serialize_record` replaces the store-native `_id` with its string
//! form; `record_to_json` encodes the result for the wire. Every record
//! returned by the API goes through both.

use crate::constants::ID_FIELD;
use crate::models::Record;
use chrono::{DateTime, NaiveDateTime, Timelike};
use mongodb::bson::Bson;
use serde_json::{Map, Number, Value};

/// Make a record's identifier JSON-safe; other fields are untouched
pub fn serialize_record(mut record: Record) -> Record {
    if let Some(id) = record.get_mut(ID_FIELD) {
        let as_string = match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => std::mem::take(s),
            ref other => other.to_string(),
        };
        *id = Bson::String(as_string);
    }
    record
}

/// Encode a serialized record as JSON
pub fn record_to_json(record: Record) -> Value {
    let fields: Map<String, Value> = record
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(fields)
}

/// Serialize and encode a batch of records in store order
pub fn records_to_json(records: Vec<Record>) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| record_to_json(serialize_record(record)))
        .collect()
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::String(s) => Value::String(s),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        // NaN and infinities have no JSON form
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::DateTime(at) => match DateTime::from_timestamp_millis(at.timestamp_millis()) {
            Some(instant) => Value::String(isoformat(instant.naive_utc())),
            None => Value::from(at.timestamp_millis()),
        },
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => record_to_json(doc),
        other => other.into_relaxed_extjson(),
    }
}

/// Naive UTC rendering: whole seconds, or six fractional digits when
/// there is a sub-second part
fn isoformat(at: NaiveDateTime) -> String {
    if at.nanosecond() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_becomes_string() {
        let oid = ObjectId::new();
        let record = serialize_record(doc! { "_id": oid, "value": 1.5 });

        assert_eq!(record.get_str("_id").unwrap(), oid.to_hex());
        assert_eq!(record.get_f64("value").unwrap(), 1.5);
    }

    #[test]
    fn test_record_without_id_is_unchanged() {
        let original = doc! { "value": 3, "label": "a" };
        assert_eq!(serialize_record(original.clone()), original);
    }

    #[test]
    fn test_field_order_preserved() {
        let record = doc! { "timestamp": 1, "_id": ObjectId::new(), "b": 2, "a": 3 };
        let keys: Vec<String> = serialize_record(record).keys().cloned().collect();
        assert_eq!(keys, vec!["timestamp", "_id", "b", "a"]);
    }

    #[test]
    fn test_wire_encoding() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let record = doc! {
            "_id": oid,
            "timestamp": mongodb::bson::DateTime::from_millis(1_700_000_000_000),
            "value": f64::NAN,
            "count": 7_i64,
            "ok": true,
            "missing": Bson::Null,
            "nested": { "ref": oid, "tags": ["x", "y"] },
        };

        let encoded = record_to_json(serialize_record(record));
        assert_eq!(
            encoded,
            json!({
                "_id": "65a1b2c3d4e5f60718293a4b",
                "timestamp": "2023-11-14T22:13:20",
                "value": null,
                "count": 7,
                "ok": true,
                "missing": null,
                "nested": { "ref": "65a1b2c3d4e5f60718293a4b", "tags": ["x", "y"] },
            })
        );
    }

    #[test]
    fn test_other_id_types_become_strings() {
        let record = serialize_record(doc! { "_id": 42_i32, "value": 1 });
        assert_eq!(record.get_str("_id").unwrap(), "42");

        let record = serialize_record(doc! { "_id": "already-a-string" });
        assert_eq!(record.get_str("_id").unwrap(), "already-a-string");
    }

    #[test]
    fn test_datetime_sub_second_precision() {
        let record = doc! {
            "whole": mongodb::bson::DateTime::from_millis(1_717_200_000_000),
            "fraction": mongodb::bson::DateTime::from_millis(1_717_200_000_123),
            "early": mongodb::bson::DateTime::from_millis(-61_000_000_000_000),
        };

        let encoded = record_to_json(record);
        assert_eq!(encoded["whole"], json!("2024-06-01T00:00:00"));
        assert_eq!(encoded["fraction"], json!("2024-06-01T00:00:00.123000"));
        assert_eq!(encoded["early"], json!("0036-12-26T11:33:20"));
    }
}
