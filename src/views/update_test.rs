use super::*;
use crate::fields::FormField;
use crate::net::transport::Method;
use crate::state::navigation::History;
use crate::test_helpers::{MockTransport, api_over, json_response, raw_response, record};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn category_form() -> UpdateForm {
    UpdateForm::new(
        vec![record(json!({ "id": 1, "name": "Action" })), record(json!({ "id": 2, "name": "Drama" }))],
        vec![FormField::text("name", "Name")],
        "/api/categories",
    )
}

// =============================================================
// selection
// =============================================================

#[test]
fn options_use_record_labels() {
    let options = category_form().options();
    assert_eq!(options, vec![SelectOption::new("1", "Action"), SelectOption::new("2", "Drama")]);
}

#[test]
fn select_copies_record_into_draft() {
    let mut form = category_form();
    form.select(" 2 ").unwrap();
    assert_eq!(form.draft().and_then(|d| d.get("name")), Some(&json!("Drama")));
    assert!(matches!(form.state(), UpdateState::Selected { .. }));
    assert_eq!(form.error(), None);
}

#[test]
fn select_unknown_id_resets() {
    let mut form = category_form();
    form.select("1").unwrap();

    let err = form.select("99").unwrap_err();

    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(form.state(), &UpdateState::NoSelection);
    assert!(form.error().is_some());
}

#[test]
fn select_non_numeric_id_resets() {
    let mut form = category_form();
    assert!(form.select("two").is_err());
    assert_eq!(form.state(), &UpdateState::NoSelection);
}

#[test]
fn set_field_requires_selection() {
    let mut form = category_form();
    assert!(form.set_field("name", "Crime").is_err());

    form.select("1").unwrap();
    form.set_field("name", "Crime").unwrap();

    let UpdateState::Selected { original, draft } = form.state() else {
        panic!("expected selection");
    };
    assert_eq!(original.get("name"), Some(&json!("Action")));
    assert_eq!(draft.get("name"), Some(&json!("Crime")));
}

// =============================================================
// submit
// =============================================================

#[tokio::test]
async fn submit_puts_and_redirects() {
    let transport = MockTransport::new(vec![json_response(200, &json!({ "id": 2, "name": "Comedy" }))]);
    let api = api_over(transport.clone());
    let history = History::starting_at("/admin/categories/update");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut form = category_form().on_success(Box::new(move |saved: &Record| {
        sink.lock().unwrap().push(saved.clone());
    }));

    form.select("2").unwrap();
    form.set_field("name", "Comedy").unwrap();
    let saved = form.submit(&api, &history).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.path, "/api/categories/2");
    assert_eq!(sent.body, Some(json!({ "id": 2, "name": "Comedy" })));
    assert_eq!(saved.get("name"), Some(&json!("Comedy")));
    assert_eq!(history.current().as_deref(), Some("/admin/categories"));
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(form.state(), &UpdateState::NoSelection);
}

#[tokio::test]
async fn empty_success_body_reports_draft() {
    let transport = MockTransport::new(vec![raw_response(204, "text/plain", "")]);
    let api = api_over(transport);
    let history = History::default();
    let mut form = category_form();

    form.select("1").unwrap();
    let saved = form.submit(&api, &history).await.unwrap();

    assert_eq!(saved.get("name"), Some(&json!("Action")));
}

#[tokio::test]
async fn submit_failure_keeps_draft_and_sets_server_message() {
    let transport = MockTransport::new(vec![json_response(422, &json!({ "message": "Name already exists" }))]);
    let api = api_over(transport);
    let history = History::starting_at("/admin/categories/update");
    let mut form = category_form();

    form.select("2").unwrap();
    form.set_field("name", "Action").unwrap();
    let err = form.submit(&api, &history).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(form.error(), Some("Name already exists"));
    assert_eq!(form.draft().and_then(|d| d.get("name")), Some(&json!("Action")));
    assert!(matches!(form.state(), UpdateState::Selected { .. }));
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn submit_failure_without_message_uses_fallback() {
    let transport = MockTransport::new(vec![Err(AdminError::Network("refused".into()))]);
    let api = api_over(transport);
    let mut form = category_form();

    form.select("1").unwrap();
    form.submit(&api, &History::default()).await.unwrap_err();

    assert_eq!(form.error(), Some(UPDATE_FAILURE_MESSAGE));
}

#[tokio::test]
async fn submit_without_selection_sends_nothing() {
    let transport = MockTransport::new(Vec::new());
    let api = api_over(transport.clone());
    let mut form = category_form();

    let err = form.submit(&api, &History::default()).await.unwrap_err();

    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn explicit_redirect_overrides_derived_route() {
    let transport = MockTransport::new(vec![json_response(200, &json!({ "id": 1 }))]);
    let api = api_over(transport);
    let history = History::default();
    let mut form = category_form().with_redirect("/admin/dashboard");

    form.select("1").unwrap();
    form.submit(&api, &history).await.unwrap();

    assert_eq!(history.current().as_deref(), Some("/admin/dashboard"));
}

// =============================================================
// derive_redirect
// =============================================================

#[test]
fn derive_redirect_strips_api_and_update() {
    assert_eq!(derive_redirect("/api/categories"), "/admin/categories");
    assert_eq!(derive_redirect("/api/movies/update"), "/admin/movies");
    assert_eq!(derive_redirect("/api/types/"), "/admin/types");
}

#[test]
fn derive_redirect_handles_other_shapes() {
    assert_eq!(derive_redirect("/v2/users"), "/admin/v2/users");
    assert_eq!(derive_redirect(""), "/admin");
}
