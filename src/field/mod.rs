//! Labelled, validated input wrapper. Widgets such as the date picker hold a
//! `Field` and delegate their input rendering to it.

mod input;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    attrs::{AttrType, AttributeIssue, AttributeReport, AttributeRule, AttributeSchema},
    vdom::{Element, Node},
};

pub use input::{Adornment, Input};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldAttrs {
    pub label: Option<String>,
    pub help: Option<String>,
    pub placeholder: Option<String>,
    pub name: Option<String>,
    pub fluid: bool,
    pub read_only: bool,
    #[serde(rename = "type")]
    pub input_type: String,
}

impl Default for FieldAttrs {
    fn default() -> Self {
        Self {
            label: None,
            help: None,
            placeholder: None,
            name: None,
            fluid: false,
            read_only: false,
            input_type: "text".to_string(),
        }
    }
}

impl FieldAttrs {
    pub fn schema() -> AttributeSchema {
        AttributeSchema::new("Field")
            .attr(
                "label",
                AttributeRule::optional(AttrType::String).with_default(Value::Null),
            )
            .attr(
                "help",
                AttributeRule::optional(AttrType::String).with_default(Value::Null),
            )
            .attr(
                "placeholder",
                AttributeRule::optional(AttrType::String).with_default(Value::Null),
            )
            .attr(
                "name",
                AttributeRule::optional(AttrType::String).with_default(Value::Null),
            )
            .attr(
                "fluid",
                AttributeRule::optional(AttrType::Boolean).with_default(false),
            )
            .attr(
                "readOnly",
                AttributeRule::optional(AttrType::Boolean).with_default(false),
            )
            .attr(
                "type",
                AttributeRule::optional(AttrType::String).with_default("text"),
            )
    }

    /// Reads field attributes out of an already validated bag.
    pub fn from_report(report: &AttributeReport) -> Self {
        deserialize_resolved(report, "Field")
    }
}

/// Deserializes the resolved bag, falling back to defaults on failure.
pub(crate) fn deserialize_resolved<T>(report: &AttributeReport, component: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    serde_json::from_value(Value::Object(report.resolved.clone())).unwrap_or_else(|err| {
        tracing::warn!(component, "falling back to default attributes: {err}");
        T::default()
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    attrs: FieldAttrs,
    input: Input,
    error: Option<String>,
    issues: Vec<AttributeIssue>,
}

impl Field {
    /// Validates `attrs` against [`FieldAttrs::schema`]; violations are kept
    /// and logged, never fatal.
    pub fn from_attrs(attrs: &Value) -> Self {
        let report = FieldAttrs::schema().validate(attrs);
        Self::new(FieldAttrs::from_report(&report)).with_issues(report.issues)
    }

    pub fn new(attrs: FieldAttrs) -> Self {
        let mut input = Input::new()
            .with_type(attrs.input_type.clone())
            .with_fluid(attrs.fluid)
            .with_read_only(attrs.read_only);
        if let Some(name) = &attrs.name {
            input = input.with_name(name.clone());
        }
        if let Some(placeholder) = &attrs.placeholder {
            input = input.with_placeholder(placeholder.clone());
        }
        Self {
            attrs,
            input,
            error: None,
            issues: Vec::new(),
        }
    }

    /// Records configuration violations and shows them in the error slot.
    pub fn with_issues(mut self, issues: Vec<AttributeIssue>) -> Self {
        if !issues.is_empty() {
            let summary = issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            self.error = Some(format!("invalid attributes: {summary}"));
        }
        self.issues = issues;
        self
    }

    pub fn attrs(&self) -> &FieldAttrs {
        &self.attrs
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn label(&self) -> Option<&str> {
        self.attrs.label.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Configuration violations found while building the field.
    pub fn issues(&self) -> &[AttributeIssue] {
        &self.issues
    }

    pub fn view(&self, value: &str) -> Node {
        let mut root = Element::new("div").class("field");
        if self.error.is_some() {
            root = root.class("error");
        }
        if let Some(label) = &self.attrs.label {
            root = root.child(Element::new("label").child(Node::text(label.clone())));
        }
        root = root.child(self.input.view(value));
        if let Some(help) = &self.attrs.help {
            root = root.child(
                Element::new("div")
                    .class("help")
                    .child(Node::text(help.clone())),
            );
        }
        if let Some(error) = &self.error {
            root = root.child(
                Element::new("div")
                    .class("ui")
                    .class("pointing")
                    .class("red")
                    .class("basic")
                    .class("label")
                    .child(Node::text(error.clone())),
            );
        }
        root.into()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_from_attribute_bag() {
        let field = Field::from_attrs(&json!({
            "label": "Start date",
            "placeholder": "pick one",
            "fluid": true,
        }));
        assert!(field.issues().is_empty());
        assert_eq!(field.label(), Some("Start date"));
        assert!(field.input().class_list().contains("fluid"));
        assert_eq!(field.input().placeholder(), Some("pick one"));
    }

    #[test]
    fn invalid_attribute_is_reported_but_field_still_renders() {
        let field = Field::from_attrs(&json!({"fluid": "wide"}));
        assert_eq!(field.issues().len(), 1);
        assert!(!field.attrs().fluid);
        assert!(field.error().is_some_and(|error| error.contains("fluid")));
        let node = field.view("x");
        let root = node.as_element().unwrap();
        assert!(root.class.contains("error"));
    }

    #[test]
    fn view_contains_label_input_and_error() {
        let mut field = Field::new(FieldAttrs {
            label: Some("When".into()),
            help: Some("Any weekday".into()),
            ..FieldAttrs::default()
        });
        field.set_error("required");
        let node = field.view("2024-01-01");
        let root = node.as_element().unwrap();
        assert!(root.class.contains("error"));
        assert_eq!(root.children.len(), 4);
        assert!(node.text_content().contains("When"));
        assert!(node.text_content().contains("required"));
        field.clear_error();
        assert!(!field.view("").as_element().unwrap().class.contains("error"));
    }
}
