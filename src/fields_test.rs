use super::*;
use serde_json::json;

#[test]
fn field_kind_parses_known_names() {
    assert_eq!(FieldKind::parse("textarea"), Some(FieldKind::Textarea));
    assert_eq!(FieldKind::parse("select"), Some(FieldKind::Select));
    assert_eq!(FieldKind::parse("checkbox"), None);
    assert_eq!(FieldKind::Number.as_str(), "number");
}

#[test]
fn coerce_number_field() {
    let field = FormField::number("release_year", "Year");
    assert_eq!(field.coerce("1985"), json!(1985));
    assert_eq!(field.coerce(" 8.5 "), json!(8.5));
    assert_eq!(field.coerce("soon"), json!("soon"));
}

#[test]
fn coerce_select_ids_become_numbers() {
    let field = FormField::select("country_id", "Country", vec![SelectOption::new("3", "Japan")]);
    assert_eq!(field.coerce("3"), json!(3));

    let role = FormField::select("role", "Role", vec![SelectOption::new("admin", "Admin")]);
    assert_eq!(role.coerce("admin"), json!("admin"));
}

#[test]
fn coerce_text_keeps_digits_as_string() {
    let field = FormField::text("name", "Name");
    assert_eq!(field.coerce("1984"), json!("1984"));
}

#[test]
fn coerce_input_falls_back_to_string() {
    let fields = vec![FormField::number("duration", "Duration")];
    assert_eq!(coerce_input(&fields, "duration", "120"), json!(120));
    assert_eq!(coerce_input(&fields, "nickname", "120"), json!("120"));
}

#[test]
fn options_from_records_uses_labels() {
    let records = vec![
        Record::from_value(json!({ "id": 1, "name": "France" })).unwrap(),
        Record::from_value(json!({ "id": 2 })).unwrap(),
        Record::from_value(json!({ "name": "no key" })).unwrap(),
    ];
    let options = options_from_records(&records, "id");
    assert_eq!(options, vec![SelectOption::new("1", "France"), SelectOption::new("2", "2")]);
}

#[test]
fn display_field_renderer_and_debug() {
    let field = DisplayField::new("rating", "Rating").with_render(|_| "★".into());
    let record = Record::new();
    assert_eq!(field.render.as_ref().map(|render| render(&record)).as_deref(), Some("★"));
    assert!(format!("{field:?}").contains("<fn>"));
    assert_eq!(field.path().as_str(), "rating");
}

#[test]
fn placeholder_builder() {
    let field = FormField::text("email", "Email").with_placeholder("user@example.com");
    assert_eq!(field.placeholder.as_deref(), Some("user@example.com"));
    assert_eq!(field.kind, FieldKind::Text);
}
