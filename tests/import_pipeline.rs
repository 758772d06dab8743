//! Import pipeline tests against the in-memory sink.

use mongo_seed::report::{summarize, summarize_error};
use mongo_seed::testing::MemorySink;
use mongo_seed::{execute, run_import, Action, ExitStatus, ImportFailure, SeedError};
use seed_core::{registry, FieldDefinition, FieldKind, IndexKind, Schema, SchemaError};
use seed_file::FileError;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn product_schema() -> Schema {
    Schema::new(
        "Product",
        None,
        vec![
            FieldDefinition::required("name", FieldKind::String),
            FieldDefinition::required("price", FieldKind::Number),
        ],
    )
    .unwrap()
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

fn station(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Z Kingsland",
        "type": "retail",
        "is_active": true,
        "location": {
            "address": "461 New North Road",
            "suburb": "Kingsland",
            "city": "Auckland",
            "region": "Auckland",
            "postcode": "1021",
            "latitude": "-36.8721",
            "longitude": "174.7450"
        },
        "fuels": [
            {"name": "ZX Premium", "short_name": "95", "price": 3.099, "lastUpdated": "2024-03-01T08:00:00Z"}
        ],
        "services": ["car wash", "ATM"],
        "opening_hours": {
            "monday_to_friday": "6am - 10pm",
            "saturday": "7am - 10pm",
            "sunday": "7am - 9pm",
            "is_24_7": false
        },
        "lastUpdated": "2024-03-01T08:00:00Z"
    })
}

#[tokio::test]
async fn test_scenario_single_valid_record() {
    let file = json_file(&json!([{"name": "Alpha", "price": 10}]));
    let sink = MemorySink::new("products");

    let outcome = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert_eq!(outcome.total, 1);
    assert_eq!(outcome.accepted, 1);
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.inserted, 1);
    assert!(outcome.failure.is_none());
    assert_eq!(summarize(&outcome).status, ExitStatus::Success);
    assert_eq!(sink.documents()[0].get("name"), Some(&json!("Alpha")));
}

#[tokio::test]
async fn test_scenario_all_records_invalid() {
    let file = json_file(&json!([{"price": 10}]));
    let sink = MemorySink::new("products");

    let outcome = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert_eq!(outcome.accepted, 0);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].violations, vec!["name is required"]);
    assert!(matches!(outcome.failure, Some(ImportFailure::NoValidRecords)));
    assert_eq!(sink.insert_calls(), 0);
    assert_eq!(summarize(&outcome).status, ExitStatus::Failure);
}

#[tokio::test]
async fn test_scenario_partial_import() {
    let file = json_file(&json!([{"name": "A", "price": 1}, {"price": 2}]));
    let sink = MemorySink::new("products");

    let outcome = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert_eq!(outcome.accepted, 1);
    assert_eq!(outcome.skipped(), 1);
    assert_eq!(outcome.inserted, 1);
    assert_eq!(sink.insert_calls(), 1);
    assert_eq!(sink.len(), 1);

    let summary = summarize(&outcome);
    assert_eq!(summary.status, ExitStatus::Success);
    let warnings: Vec<&str> = summary.warnings().collect();
    assert_eq!(
        warnings[0],
        r#"Skipping invalid entry #2: {"price":2}; reason: name is required"#
    );
}

#[tokio::test]
async fn test_accepted_records_are_stored_unchanged() {
    let record = json!({"name": "A", "price": 1.5, "sku": "X-1", "tags": ["new"]});
    let file = json_file(&json!([record.clone()]));
    let sink = MemorySink::new("products");

    run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert_eq!(Value::Object(sink.documents()[0].clone()), record);
}

#[tokio::test]
async fn test_wrapped_stations_payload() {
    let schema = registry::lookup("ZStation").unwrap();
    let mut broken = station("st-3");
    broken["location"]
        .as_object_mut()
        .unwrap()
        .remove("city");
    broken["fuels"][0]["price"] = json!("3.10");

    let file = json_file(&json!({"stations": [station("st-1"), station("st-2"), broken]}));
    let sink = MemorySink::new("stations");

    let outcome = run_import(&sink, &schema, file.path()).await.unwrap();

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.rejected[0].index, 2);
    assert_eq!(
        outcome.rejected[0].violations,
        vec![
            "location.city is required",
            "fuels[0].price expected number, got string",
        ]
    );
}

#[tokio::test]
async fn test_store_failure_reports_partial_write() {
    let file = json_file(&json!([
        {"_id": 1, "name": "A", "price": 1},
        {"_id": 1, "name": "B", "price": 2}
    ]));
    let sink = MemorySink::new("products");

    let outcome = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert!(matches!(outcome.failure, Some(ImportFailure::Store(_))));
    assert_eq!(sink.len(), 1);
    assert_eq!(outcome.inserted, 1);

    let summary = summarize(&outcome);
    assert_eq!(summary.status, ExitStatus::Failure);
    assert!(summary
        .errors()
        .next()
        .unwrap()
        .starts_with("Error importing data:"));
    assert!(summary
        .warnings()
        .any(|w| w == "1 document(s) written before the failure."));
}

#[tokio::test]
async fn test_station_fixture_is_valid() {
    let schema = registry::lookup("ZStation").unwrap();
    let file = json_file(&json!([station("st-1")]));
    let sink = MemorySink::new("stations");

    let outcome = run_import(&sink, &schema, file.path()).await.unwrap();

    assert!(outcome.rejected.is_empty(), "{:?}", outcome.rejected);
    assert_eq!(outcome.inserted, 1);
}

#[tokio::test]
async fn test_unstorable_integer_is_skipped_not_fatal() {
    let file = json_file(&json!([
        {"name": "A", "price": 1},
        {"name": "B", "price": u64::MAX}
    ]));
    let sink = MemorySink::new("products");

    let outcome = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap();

    assert!(outcome.failure.is_none());
    assert_eq!(outcome.inserted, 1);
    assert_eq!(
        outcome.rejected[0].violations,
        vec!["price expected number, got integer out of range"]
    );
}

#[tokio::test]
async fn test_auction_import_ensures_text_index() {
    let file = json_file(&json!([
        {"title": "Lamp", "description": "Brass", "start_price": 10, "reserve_price": 25}
    ]));
    let schema = registry::lookup("AuctionItem").unwrap();
    let sink = MemorySink::new("items");

    run_import(&sink, &schema, file.path()).await.unwrap();

    let indexes = sink.indexes();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].fields, vec!["title", "description"]);
    assert_eq!(indexes[0].kind, IndexKind::Text);
}

#[tokio::test]
async fn test_empty_array_is_empty_input() {
    let file = json_file(&json!([]));
    let sink = MemorySink::new("products");

    let err = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::EmptyInput(_)));
    assert_eq!(sink.insert_calls(), 0);
}

#[tokio::test]
async fn test_missing_file() {
    let sink = MemorySink::new("products");
    let path = PathBuf::from("/nonexistent/products.json");

    let err = run_import(&sink, &product_schema(), &path)
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::File(FileError::NotFound(_))));
    assert_eq!(summarize_error(&err).status, ExitStatus::Failure);
}

#[tokio::test]
async fn test_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[{{\"name\": \"A\",}}").unwrap();
    let sink = MemorySink::new("products");

    let err = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::File(FileError::Parse { .. })));
    assert_eq!(sink.insert_calls(), 0);
}

#[tokio::test]
async fn test_object_without_payload_key() {
    let file = json_file(&json!({"items": []}));
    let sink = MemorySink::new("products");

    let err = run_import(&sink, &product_schema(), file.path())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Payload { .. }));
}

#[tokio::test]
async fn test_execute_import_builds_summary() {
    let file = json_file(&json!([
        {"title": "Lamp", "description": "Brass", "start_price": 10, "reserve_price": 25},
        {"title": "Chair", "description": "Oak", "start_price": "5", "reserve_price": 8}
    ]));
    let schema = registry::lookup("AuctionItem").unwrap();
    let sink = MemorySink::new("items");
    let action = Action::Import {
        file: file.path().to_path_buf(),
    };

    let summary = execute(&action, &schema, &sink).await;

    assert_eq!(summary.status, ExitStatus::Success);
    assert_eq!(sink.len(), 1);
    assert!(summary
        .warnings()
        .any(|w| w.ends_with("reason: start_price expected number, got string")));
}

#[test]
fn test_unknown_model() {
    let err = registry::lookup("Widget").unwrap_err();
    assert!(matches!(err, SchemaError::UnknownModel { .. }));

    let summary = summarize_error(&err.into());
    assert_eq!(summary.status, ExitStatus::Failure);
    assert!(summary.errors().next().unwrap().contains("Widget"));
}
