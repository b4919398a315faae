//! Attribute schemas for widget configuration.
//!
//! A schema is compiled to JSON Schema and evaluated by `jsonschema`.
//! Violations are collected into a report and logged; the resolved attribute
//! bag falls back to declared defaults so rendering can go on.

use std::fmt;

use indexmap::IndexMap;
use jsonschema::validator_for;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    String,
    Boolean,
}

impl AttrType {
    fn json_type(self) -> &'static str {
        match self {
            AttrType::String => "string",
            AttrType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRule {
    pub required: bool,
    pub kind: AttrType,
    pub default: Option<Value>,
}

impl AttributeRule {
    pub fn required(kind: AttrType) -> Self {
        Self {
            required: true,
            kind,
            default: None,
        }
    }

    pub fn optional(kind: AttrType) -> Self {
        Self {
            required: false,
            kind,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeIssue {
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for AttributeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = if self.pointer.is_empty() {
            "<root>"
        } else {
            &self.pointer
        };
        write!(f, "{pointer}: {}", self.message)
    }
}

impl std::error::Error for AttributeIssue {}

#[derive(Debug, Clone, Default)]
pub struct AttributeReport {
    pub resolved: Map<String, Value>,
    pub issues: Vec<AttributeIssue>,
}

impl AttributeReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeSchema {
    component: String,
    rules: IndexMap<String, AttributeRule>,
}

impl AttributeSchema {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            rules: IndexMap::new(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn attr(mut self, name: impl Into<String>, rule: AttributeRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Layers `other` on top of `self`; rules in `other` win.
    pub fn extend(mut self, other: AttributeSchema) -> Self {
        self.component = other.component;
        self.rules.extend(other.rules);
        self
    }

    pub fn rule(&self, name: &str) -> Option<&AttributeRule> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &AttributeRule)> + '_ {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Attributes that are neither required nor defaulted.
    pub fn uncovered(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|(_, rule)| !rule.required && rule.default.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, rule) in &self.rules {
            let mut property = json!({ "type": rule.kind.json_type() });
            if let Some(default) = &rule.default {
                property["default"] = default.clone();
            }
            properties.insert(name.clone(), property);
            if rule.required {
                required.push(Value::String(name.clone()));
            }
        }
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": self.component,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Validates `attrs` and resolves defaults for missing or invalid entries.
    pub fn validate(&self, attrs: &Value) -> AttributeReport {
        let mut report = AttributeReport::default();
        let instance = match attrs {
            Value::Object(_) => attrs.clone(),
            Value::Null => Value::Object(Map::new()),
            other => {
                report.issues.push(AttributeIssue {
                    pointer: String::new(),
                    message: format!("attributes must be an object, got {other}"),
                });
                Value::Object(Map::new())
            }
        };

        match validator_for(&self.to_json_schema()) {
            Ok(validator) => {
                for error in validator.iter_errors(&instance) {
                    report.issues.push(AttributeIssue {
                        pointer: error.instance_path.to_string(),
                        message: error.to_string(),
                    });
                }
            }
            Err(err) => report.issues.push(AttributeIssue {
                pointer: String::new(),
                message: format!("attribute schema failed to compile: {err}"),
            }),
        }

        let mut resolved = instance.as_object().cloned().unwrap_or_default();
        for (name, rule) in &self.rules {
            let pointer = format!("/{name}");
            let invalid = report.issues.iter().any(|issue| issue.pointer == pointer);
            if invalid {
                resolved.remove(name);
            }
            if !resolved.contains_key(name)
                && let Some(default) = &rule.default
            {
                resolved.insert(name.clone(), default.clone());
            }
        }
        report.resolved = resolved;

        for issue in &report.issues {
            tracing::warn!(component = %self.component, "invalid attribute {issue}");
        }
        report
    }
}
