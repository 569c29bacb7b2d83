use super::*;
use serde_json::json;

#[test]
fn from_title_matches_singular_and_plural() {
    assert_eq!(ResourceKind::from_title("Movie"), Some(ResourceKind::Movie));
    assert_eq!(ResourceKind::from_title("categories"), Some(ResourceKind::Category));
    assert_eq!(ResourceKind::from_title("  COUNTRY "), Some(ResourceKind::Country));
    assert_eq!(ResourceKind::from_title("Types"), Some(ResourceKind::Type));
    assert_eq!(ResourceKind::from_title("user"), Some(ResourceKind::User));
    assert_eq!(ResourceKind::from_title("director"), None);
}

#[test]
fn title_lowercases_to_segment() {
    for kind in ResourceKind::ALL {
        assert_eq!(kind.title().to_lowercase(), kind.segment());
    }
}

#[test]
fn from_str_reports_unknown_resource() {
    let err = "studio".parse::<ResourceKind>().unwrap_err();
    assert_eq!(err, AdminError::Validation("unknown resource: studio".into()));
    assert_eq!("movies".parse::<ResourceKind>().unwrap(), ResourceKind::Movie);
}

#[test]
fn collection_path_is_api_segment() {
    assert_eq!(ResourceKind::Category.collection_path(), "/api/categories");
    assert_eq!(ResourceKind::Type.collection_path(), "/api/types");
}

#[test]
fn movie_search_includes_nested_and_array_fields() {
    let keys: Vec<String> = ResourceKind::Movie
        .search_fields()
        .iter()
        .map(|path| path.as_str().to_owned())
        .collect();
    assert!(keys.contains(&"country.name".to_owned()));
    assert!(keys.contains(&"categories".to_owned()));
}

#[test]
fn user_edit_fields_drop_password() {
    let create: Vec<_> = ResourceKind::User.form_fields().into_iter().map(|f| f.name).collect();
    let edit: Vec<_> = ResourceKind::User.edit_fields().into_iter().map(|f| f.name).collect();
    assert!(create.contains(&"password".to_owned()));
    assert!(!edit.contains(&"password".to_owned()));
}

#[test]
fn movie_rating_column_renders_one_decimal() {
    let field = ResourceKind::Movie
        .display_fields()
        .into_iter()
        .find(|f| f.key == "rating")
        .unwrap();
    let render = field.render.unwrap();
    let rated = Record::from_value(json!({ "rating": 8 })).unwrap();
    let unrated = Record::from_value(json!({})).unwrap();
    assert_eq!(render(&rated), "8.0/10");
    assert_eq!(render(&unrated), "N/A");
}

#[test]
fn list_view_uses_resource_title() {
    let view = ResourceKind::Country.list_view(Vec::new());
    assert_eq!(view.title(), "Countries");
    assert_eq!(view.headers(), vec!["ID", "Name"]);
}

#[test]
fn update_form_targets_collection_endpoint() {
    let form = ResourceKind::Category.update_form(Vec::new());
    assert_eq!(form.update_endpoint(), "/api/categories");
    assert_eq!(form.redirect_route(), "/admin/categories");
}
