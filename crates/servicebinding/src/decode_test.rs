// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use super::*;

#[rstest]
#[case::string(r#""quoted""#, json!("quoted"))]
#[case::integer("443", json!(443))]
#[case::float("1.5", json!(1.5))]
#[case::big_integer(
    "12345678901234567890123",
    serde_json::from_str::<Value>("12345678901234567890123").unwrap()
)]
#[case::boolean("true", json!(true))]
#[case::null("null", Value::Null)]
#[case::list(r#"["a", "b"]"#, json!(["a", "b"]))]
#[case::object(r#"{"a": {"b": 1}}"#, json!({"a": {"b": 1}}))]
#[case::bare_word("data-xsuaa-clientid", json!("data-xsuaa-clientid"))]
#[case::url("https://some.host:443/endpoint", json!("https://some.host:443/endpoint"))]
#[case::padded_bare_word("  xsuaa \n", json!("xsuaa"))]
fn test_parse_json_content(#[case] raw: &str, #[case] expected: Value) {
    assert_eq!(parse_json_content(raw), Some(expected));
}

#[rstest]
#[case("12345678901234567890123")]
#[case("-98765432109876543210987")]
#[case("3.14159265358979323846264338327950288")]
fn test_parse_json_content_keeps_every_digit(#[case] raw: &str) {
    let value = parse_json_content(raw).expect("Should parse number");
    assert!(value.is_number());
    assert_eq!(value.to_string(), raw);
}

#[rstest]
#[case::empty("")]
#[case::blank("  \n ")]
#[case::broken_object("{\"a\": ")]
#[case::broken_list("[1, 2")]
#[case::unterminated_string("\"abc")]
fn test_parse_json_content_unparsable(#[case] raw: &str) {
    assert_eq!(parse_json_content(raw), None);
}

#[rstest]
fn test_add_text_property_keeps_empty_content() {
    let mut properties = Map::new();
    add_property(
        &mut properties,
        &BindingProperty::new("empty_text", PropertyFormat::Text),
        "",
    );
    add_property(
        &mut properties,
        &BindingProperty::new("number_text", PropertyFormat::Text),
        "443",
    );

    assert_eq!(properties.get("empty_text"), Some(&json!("")));
    assert_eq!(properties.get("number_text"), Some(&json!("443")));
}

#[rstest]
fn test_add_json_property() {
    let mut properties = Map::new();
    add_property(
        &mut properties,
        &BindingProperty::new("tags", PropertyFormat::Json),
        r#"["tag-1", "tag-2"]"#,
    );
    add_property(
        &mut properties,
        &BindingProperty::new("empty_json", PropertyFormat::Json),
        "",
    );

    assert_eq!(properties.get("tags"), Some(&json!(["tag-1", "tag-2"])));
    assert!(!properties.contains_key("empty_json"));
}

#[rstest]
fn test_add_container_property_splices_keys() {
    let mut properties = Map::new();
    properties.insert("url".to_string(), json!("old"));
    add_property(
        &mut properties,
        &BindingProperty::new("credentials", PropertyFormat::Json).as_container(),
        r#"{"url": "https://new", "zone_uuid": "zone"}"#,
    );

    assert_eq!(
        Value::Object(properties),
        json!({"url": "https://new", "zone_uuid": "zone"})
    );
}

#[rstest]
#[case::list(r#"["element 1", "element 2"]"#)]
#[case::integer("1337")]
#[case::bare_word("value")]
#[case::empty("")]
fn test_add_container_property_requires_object(#[case] raw: &str) {
    let mut properties = Map::new();
    add_property(
        &mut properties,
        &BindingProperty::new("container", PropertyFormat::Json).as_container(),
        raw,
    );
    assert!(properties.is_empty());
}

#[rstest]
fn test_add_unknown_format_property_is_ignored() {
    let mut properties = Map::new();
    add_property(
        &mut properties,
        &BindingProperty::new("unknown_property", PropertyFormat::Unknown),
        "some value",
    );
    assert!(properties.is_empty());
}

#[rstest]
fn test_container_flag_is_ignored_for_text() {
    let mut properties = Map::new();
    add_property(
        &mut properties,
        &BindingProperty::new("token", PropertyFormat::Text).as_container(),
        r#"{"a": 1}"#,
    );
    assert_eq!(properties.get("token"), Some(&json!(r#"{"a": 1}"#)));
}

#[rstest]
#[case::trailing_newline("value\n", "value")]
#[case::crlf("line 1\r\nline 2\r\n", "line 1\nline 2")]
#[case::inner_blank_line("a\n\nb", "a\n\nb")]
#[case::empty("", "")]
fn test_read_property_file(#[case] content: &str, #[case] expected: &str) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("property");
    std::fs::write(&path, content).unwrap();

    assert_eq!(read_property_file(&path).unwrap(), expected);
}

#[rstest]
fn test_read_property_file_rejects_invalid_utf8() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("property");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    assert!(matches!(
        read_property_file(&path),
        Err(crate::Error::ReadFailed { .. })
    ));
}

#[rstest]
fn test_read_property_uses_source_name() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("service-plan"), "lite\n").unwrap();

    let plan = BindingProperty::new("plan", PropertyFormat::Text).with_source_name("service-plan");
    assert_eq!(read_property(tmp.path(), &plan).as_deref(), Some("lite"));

    let missing = BindingProperty::new("missing", PropertyFormat::Text);
    assert_eq!(read_property(tmp.path(), &missing), None);

    std::fs::create_dir(tmp.path().join("directory")).unwrap();
    let directory = BindingProperty::new("directory", PropertyFormat::Text);
    assert_eq!(read_property(tmp.path(), &directory), None);
}

#[rstest]
#[case::parent("../secret")]
#[case::nested_parent("nested/../../secret")]
fn test_read_property_stays_in_binding_directory(#[case] source_name: &str) {
    let tmp = TempDir::new().unwrap();
    let binding_path = tmp.path().join("binding");
    std::fs::create_dir_all(binding_path.join("nested")).unwrap();
    std::fs::write(tmp.path().join("secret"), "outside\n").unwrap();

    let property = BindingProperty::new("secret", PropertyFormat::Text).with_source_name(source_name);
    assert_eq!(read_property(&binding_path, &property), None);
}

#[rstest]
fn test_read_property_rejects_absolute_source_name() {
    let tmp = TempDir::new().unwrap();
    let binding_path = tmp.path().join("binding");
    std::fs::create_dir_all(&binding_path).unwrap();
    let outside = tmp.path().join("secret");
    std::fs::write(&outside, "outside\n").unwrap();

    let property = BindingProperty::new("secret", PropertyFormat::Text)
        .with_source_name(outside.to_string_lossy());
    assert_eq!(read_property(&binding_path, &property), None);
}

#[rstest]
fn test_read_property_allows_nested_source_name() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("..data")).unwrap();
    std::fs::write(tmp.path().join("..data").join("plan"), "lite\n").unwrap();

    let property = BindingProperty::new("plan", PropertyFormat::Text).with_source_name("./..data/plan");
    assert_eq!(read_property(tmp.path(), &property).as_deref(), Some("lite"));
}
