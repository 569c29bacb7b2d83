use super::*;
use crate::fields::FieldKind;
use crate::net::transport::Method;
use crate::test_helpers::{MockTransport, api_over, json_response};
use serde_json::json;

#[test]
fn title_selects_field_set() {
    let form = AddForm::new("Movies");
    assert_eq!(form.kind(), Some(ResourceKind::Movie));
    assert!(form.fields().iter().any(|field| field.name == "release_year" && field.kind == FieldKind::Number));

    assert_eq!(AddForm::new("country").fields().len(), 1);
    assert_eq!(AddForm::new("USER").kind(), Some(ResourceKind::User));
}

#[test]
fn unknown_title_has_no_fields() {
    let form = AddForm::new("Directors");
    assert_eq!(form.kind(), None);
    assert!(form.fields().is_empty());
}

#[test]
fn set_field_coerces_by_descriptor() {
    let mut form = AddForm::new("movie");
    form.set_field("title", "1917");
    form.set_field("release_year", "2019");
    form.set_field("country_id", "4");
    assert_eq!(form.draft().get("title"), Some(&json!("1917")));
    assert_eq!(form.draft().get("release_year"), Some(&json!(2019)));
    assert_eq!(form.draft().get("country_id"), Some(&json!(4)));
}

#[test]
fn set_options_fills_select() {
    let mut form = AddForm::new("movie");
    form.set_options("type_id", vec![SelectOption::new("1", "Feature")]);
    let field = form.fields().iter().find(|field| field.name == "type_id").unwrap();
    assert_eq!(field.options.len(), 1);
}

#[tokio::test]
async fn submit_resets_draft_on_success() {
    let mut form = AddForm::new("category");
    form.set_field("name", "Noir");

    let sent = form.submit(|draft| async move { Ok::<_, AdminError>(draft) }).await.unwrap();

    assert_eq!(sent.get("name"), Some(&json!("Noir")));
    assert!(form.draft().is_empty());
}

#[tokio::test]
async fn submit_resets_draft_on_failure() {
    let mut form = AddForm::new("Directors");
    form.set_value("name", json!("Kurosawa"));

    let result: Result<(), _> = form.submit(|_| async { Err(AdminError::Network("down".into())) }).await;

    assert!(result.is_err());
    assert!(form.draft().is_empty());
}

#[tokio::test]
async fn submit_to_posts_draft() {
    let transport = MockTransport::new(vec![json_response(201, &json!({ "id": 5, "type_name": "Documentary" }))]);
    let api = api_over(transport.clone());
    let mut form = AddForm::new("Types");
    form.set_field("type_name", "Documentary");

    let created = form.submit_to(&api).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/api/types/add");
    assert_eq!(sent.body, Some(json!({ "type_name": "Documentary" })));
    assert_eq!(created.key_int("id"), Some(5));
    assert!(form.draft().is_empty());
}

#[tokio::test]
async fn submit_to_unknown_resource_sends_nothing() {
    let transport = MockTransport::new(Vec::new());
    let api = api_over(transport.clone());
    let mut form = AddForm::new("studio");
    form.set_value("name", json!("Toho"));

    let err = form.submit_to(&api).await.unwrap_err();

    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
    assert!(form.draft().is_empty());
}
