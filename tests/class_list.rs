use formwidgets::{
    Adornment, Composition, Decoration, Field, FieldAttrs, INPUT_BASE, Input, class_list,
};
use serde_json::json;

const FAMILIES: [&str; 3] = ["icon", "labeled", "action"];

fn tokens(prepend: Decoration, append: Decoration) -> Vec<String> {
    class_list(&INPUT_BASE, &Composition::new(prepend, append))
        .iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn empty_composition_has_no_family_tokens() {
    let list = tokens(Decoration::None, Decoration::None);
    assert_eq!(list, ["ui", "input"]);
    for family in FAMILIES {
        assert!(list.iter().all(|token| !token.ends_with(family)));
    }
}

#[test]
fn both_sides_collapse_into_combined_token() {
    let cases = [
        (Decoration::Icon, "icon"),
        (Decoration::Label, "labeled"),
        (Decoration::Action, "action"),
    ];
    for (decoration, family) in cases {
        let list = tokens(decoration, decoration);
        assert!(list.contains(&format!("left right {family}")));
        assert!(!list.contains(&format!("left {family}")));
        assert!(!list.contains(&format!("right {family}")));
        assert!(!list.contains(&format!("right left {family}")));
    }
}

#[test]
fn mixed_sides_emit_one_token_per_family() {
    assert_eq!(
        tokens(Decoration::Label, Decoration::Action),
        ["ui", "input", "left labeled", "right action"]
    );
    assert_eq!(
        tokens(Decoration::None, Decoration::Icon),
        ["ui", "input", "right icon"]
    );
}

#[test]
fn fluid_is_independent() {
    let list = class_list(
        &INPUT_BASE,
        &Composition::new(Decoration::Icon, Decoration::None).with_fluid(true),
    );
    assert_eq!(list.to_string(), "ui input left icon fluid");
}

#[test]
fn input_view_follows_adornments() {
    let input = Input::new()
        .with_prepend(Adornment::label("https://"))
        .with_append(Adornment::action("Go"))
        .with_placeholder("site");
    let node = input.view("example.org");
    let root = node.as_element().unwrap();
    assert_eq!(root.class.to_string(), "ui input left labeled right action");
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[0].text_content(), "https://");
    assert_eq!(root.children[2].text_content(), "Go");
    let inner = root.children[1].as_element().unwrap();
    assert_eq!(inner.attrs.get("value").map(String::as_str), Some("example.org"));
    assert_eq!(inner.attrs.get("placeholder").map(String::as_str), Some("site"));
}

#[test]
fn field_wraps_input_with_label_and_error() {
    let mut field = Field::from_attrs(&json!({
        "label": "Name",
        "help": "as on passport",
        "fluid": true,
    }));
    field.set_error("required");
    let node = field.view("");
    let root = node.as_element().unwrap();
    assert!(root.class.contains("field"));
    assert!(root.class.contains("error"));
    assert!(node.find_by_class("fluid").is_some());
    let text = node.text_content();
    assert!(text.contains("Name"));
    assert!(text.contains("as on passport"));
    assert!(text.contains("required"));
    assert_eq!(FieldAttrs::from_report(&FieldAttrs::schema().validate(&json!({}))).label, None);
}
