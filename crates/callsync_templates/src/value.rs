//! Resolved template values.
//!
//! Resolution produces either a scalar or an ordered list; list items are
//! scalars or flat field maps. The string form of a scalar is what
//! substitution emits.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single substitutable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

/// One item of a list value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListItem {
    Scalar(Scalar),
    /// A flat row; block expansion addresses the fields by name.
    Map(BTreeMap<String, Scalar>),
}

impl ListItem {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ListItem::Scalar(scalar) => Some(scalar),
            ListItem::Map(_) => None,
        }
    }

    /// A named field of a map item.
    pub fn field(&self, name: &str) -> Option<&Scalar> {
        match self {
            ListItem::Scalar(_) => None,
            ListItem::Map(fields) => fields.get(name),
        }
    }
}

/// A resolved variable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TemplateValue {
    Scalar(Scalar),
    List(Vec<ListItem>),
}

impl TemplateValue {
    pub fn text(value: impl Into<String>) -> Self {
        TemplateValue::Scalar(Scalar::Text(value.into()))
    }

    pub fn int(value: i64) -> Self {
        TemplateValue::Scalar(Scalar::Int(value))
    }

    pub fn float(value: f64) -> Self {
        TemplateValue::Scalar(Scalar::Float(value))
    }

    /// A list of text scalars.
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TemplateValue::List(
            values.into_iter().map(|v| ListItem::Scalar(Scalar::Text(v.into()))).collect(),
        )
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            TemplateValue::Scalar(scalar) => Some(scalar),
            TemplateValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ListItem]> {
        match self {
            TemplateValue::Scalar(_) => None,
            TemplateValue::List(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TemplateValue::List(_))
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::text(value)
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::text(value)
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::int(value)
    }
}

impl From<f64> for TemplateValue {
    fn from(value: f64) -> Self {
        TemplateValue::float(value)
    }
}

/// The full variable table built by one resolution pass, keyed by
/// variable name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResolvedVariables {
    values: BTreeMap<String, TemplateValue>,
}

impl ResolvedVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TemplateValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.values.get(name)
    }

    /// The scalar under `name`, if the entry is scalar-valued.
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.get(name).and_then(TemplateValue::as_scalar)
    }

    /// The list under `name`, if the entry is list-valued.
    pub fn list(&self, name: &str) -> Option<&[ListItem]> {
        self.get(name).and_then(TemplateValue::as_list)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TemplateValue)> {
        self.values.iter()
    }
}

/// Caller-supplied values for custom-sourced variables, keyed by
/// variable name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CustomValues {
    values: BTreeMap<String, TemplateValue>,
}

impl CustomValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TemplateValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.values.get(name)
    }

    /// Overlays `other` on top of this table; entries in `other` win.
    pub fn merge(&mut self, other: CustomValues) {
        self.values.extend(other.values);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
