//! Assembly of JSON option objects and `setOptions` statements.
//!
//! Fields are kept in insertion order. A field whose value is omitted never
//! produces a key; an explicitly empty list produces `[]`.

use crate::error::CompileError;
use crate::value::{AttrValue, Converter, ValueKind, js_bool};

/// One configured attribute: field name, its kind, and the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: ValueKind,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(name: &'static str, kind: ValueKind, value: impl Into<AttrValue>) -> Self {
        Self {
            name,
            kind,
            value: value.into(),
        }
    }
}

/// Ordered list of rendered `"name": value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFields {
    fields: Vec<String>,
}

impl JsonFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose value is already a script literal. The name is not escaped.
    pub fn push_literal(&mut self, name: &str, js_value: impl AsRef<str>) {
        self.fields
            .push(format!("\"{}\": {}", name, js_value.as_ref()));
    }

    pub fn push_bool(&mut self, name: &str, value: bool) {
        self.push_literal(name, js_bool(value));
    }

    /// Validate and add `value`; omitted values add nothing.
    pub fn push_value(
        &mut self,
        name: &str,
        kind: ValueKind,
        value: &AttrValue,
        conv: &Converter<'_>,
    ) -> Result<(), CompileError> {
        let converted = conv
            .convert_value(kind, value)
            .map_err(|source| CompileError::InvalidField {
                field: name.to_string(),
                source,
            })?;
        if let Some(js) = converted {
            self.push_literal(name, js);
        }
        Ok(())
    }

    /// Shorthand for a scalar text value; empty text is omitted.
    pub fn push_text(
        &mut self,
        name: &str,
        kind: ValueKind,
        text: &str,
        conv: &Converter<'_>,
    ) -> Result<(), CompileError> {
        self.push_value(name, kind, &AttrValue::scalar(text), conv)
    }

    pub fn push_attributes(
        &mut self,
        attributes: &[Attribute],
        conv: &Converter<'_>,
    ) -> Result<(), CompileError> {
        for attr in attributes {
            self.push_value(attr.name, attr.kind, &attr.value, conv)?;
        }
        Ok(())
    }

    pub fn from_attributes(
        attributes: &[Attribute],
        conv: &Converter<'_>,
    ) -> Result<Self, CompileError> {
        let mut fields = Self::new();
        fields.push_attributes(attributes, conv)?;
        Ok(fields)
    }

    /// `{"a": 1,\n"b": 2}`
    pub fn to_object(&self) -> String {
        format!("{{{}}}", self.fields.join(",\n"))
    }

    /// `<owner>.setOptions({...});`
    pub fn set_options(&self, owner: &str) -> String {
        format!("{}.setOptions({});", owner, self.to_object())
    }
}
