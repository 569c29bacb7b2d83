use super::*;
use crate::net::transport::Method;
use crate::test_helpers::{MockTransport, api_over, json_response, raw_response, record};
use serde_json::json;

fn genres() -> ListView {
    ListView::new(
        "Categories",
        vec![record(json!({ "id": 1, "name": "Action" })), record(json!({ "id": 2, "name": "Drama" }))],
        vec![FieldPath::parse("name")],
        vec![DisplayField::new("id", "ID"), DisplayField::new("name", "Name")],
    )
}

fn movies() -> ListView {
    ListView::new(
        "Movies",
        vec![
            record(json!({
                "id": 10,
                "title": "Seven Samurai",
                "release_year": 1954,
                "country": { "id": 1, "name": "Japan" },
                "categories": [{ "name": "Action" }, { "name": "Drama" }],
            })),
            record(json!({ "id": 11, "title": "Amelie", "country": null, "categories": [] })),
            record(json!({ "id": 12, "title": "Heat", "country.name": "literal" })),
        ],
        vec![FieldPath::parse("title"), FieldPath::parse("country.name"), FieldPath::parse("categories"), FieldPath::parse("release_year")],
        vec![
            DisplayField::new("title", "Title"),
            DisplayField::new("country.name", "Country"),
            DisplayField::new("categories", "Categories"),
        ],
    )
}

fn keys(records: &[&Record]) -> Vec<i64> {
    records.iter().filter_map(|record| record.key_int("id")).collect()
}

// =============================================================
// filter
// =============================================================

#[test]
fn filter_is_case_insensitive_substring() {
    let view = genres();
    assert_eq!(keys(&view.filter("dra")), vec![2]);
    assert_eq!(keys(&view.filter("ACT")), vec![1]);
}

#[test]
fn query_spaces_are_part_of_the_match() {
    let view = ListView::new(
        "Categories",
        vec![record(json!({ "id": 1, "name": "Drama" })), record(json!({ "id": 2, "name": "Crime drama" }))],
        vec![FieldPath::parse("name")],
        Vec::new(),
    );
    assert_eq!(keys(&view.filter(" drama")), vec![2]);
    assert_eq!(keys(&view.filter("drama")), vec![1, 2]);
}

#[test]
fn blank_query_returns_everything() {
    let view = genres();
    assert_eq!(view.filter("").len(), 2);
    assert_eq!(view.filter("   ").len(), 2);
}

#[test]
fn filter_reaches_nested_and_array_fields() {
    let view = movies();
    assert_eq!(keys(&view.filter("japan")), vec![10]);
    assert_eq!(keys(&view.filter("drama")), vec![10]);
    assert_eq!(keys(&view.filter("1954")), vec![10]);
}

#[test]
fn null_and_missing_fields_never_match() {
    let view = movies();
    assert!(view.filter("null").is_empty());
    assert!(view.filter("zzz").is_empty());
}

// =============================================================
// rows
// =============================================================

#[test]
fn headers_follow_display_fields() {
    assert_eq!(movies().headers(), vec!["Title", "Country", "Categories"]);
}

#[test]
fn rows_resolve_paths_then_literal_keys() {
    let rows = movies().rows("");
    assert_eq!(rows[0].key, "10");
    assert_eq!(rows[0].cells, vec!["Seven Samurai", "Japan", "Action, Drama"]);
    assert_eq!(rows[1].cells, vec!["Amelie", MISSING_CELL, MISSING_CELL]);
    assert_eq!(rows[2].cells, vec!["Heat", "literal", MISSING_CELL]);
}

#[test]
fn custom_renderer_wins() {
    let field = DisplayField::new("name", "Name").with_render(|record| format!("#{}", record.key_text("id").unwrap_or_default()));
    assert_eq!(cell(&record(json!({ "id": 3, "name": "Thriller" })), &field), "#3");
}

#[test]
fn rows_respect_query() {
    let rows = genres().rows("dra");
    assert_eq!(rows, vec![ListRow { key: "2".into(), cells: vec!["2".into(), "Drama".into()] }]);
}

// =============================================================
// delete
// =============================================================

#[tokio::test]
async fn delete_uses_lowercased_title() {
    let transport = MockTransport::new(vec![json_response(200, &json!({ "message": "deleted" }))]);
    let api = api_over(transport.clone());
    let view = genres();

    view.delete(&api, &view.records()[1]).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.path, "/api/categories/delete/2");
    assert_eq!(view.records().len(), 2);
}

#[tokio::test]
async fn delete_failure_keeps_records() {
    let transport = MockTransport::new(vec![raw_response(500, "text/plain", "boom")]);
    let api = api_over(transport);
    let view = genres();

    let err = view.delete(&api, &view.records()[0]).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(view.records().len(), 2);
}

#[tokio::test]
async fn delete_without_key_sends_nothing() {
    let transport = MockTransport::new(Vec::new());
    let api = api_over(transport.clone());

    let err = genres().delete(&api, &record(json!({ "name": "Orphan" }))).await.unwrap_err();

    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}
