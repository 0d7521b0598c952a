//! Value layer: typed validation of raw attribute text and conversion to
//! script literal syntax.
//!
//! Each [`ValueKind`] has exactly one conversion rule. Collections are not a
//! kind of their own: an [`AttrValue::List`] is converted item by item with
//! its declared per-item kind and joined into an array literal.

pub mod escape;
pub mod url;

pub use url::{AppRoot, Identity, PathResolver, VIRTUAL_PATH_MARKER};

use crate::error::ValueError;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles")
});

/// How a raw attribute text is validated and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Escaped, double-quoted string.
    Text,
    /// Non-negative decimal integer.
    Unsigned,
    /// Url, virtual paths resolved, then quoted like text.
    Url,
    /// Severity name or integer, emitted as a number.
    Level,
    /// Client-side regular expression (look-around and backreferences
    /// allowed), emitted as a quoted string.
    Regex,
    /// Generated script identifier, emitted unquoted.
    Identifier,
}

/// Raw value of one attribute as configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttrValue {
    /// Not configured. The field is left out of the output.
    #[default]
    Absent,
    Scalar(String),
    /// Configured list. An empty list is still emitted, as `[]`.
    List(Vec<String>),
}

impl AttrValue {
    pub fn scalar(text: impl Into<String>) -> Self {
        AttrValue::Scalar(text.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Absent, or a scalar holding the empty string.
    pub fn is_omitted(&self) -> bool {
        match self {
            AttrValue::Absent => true,
            AttrValue::Scalar(text) => text.is_empty(),
            AttrValue::List(_) => false,
        }
    }
}

impl From<Option<String>> for AttrValue {
    fn from(value: Option<String>) -> Self {
        value.map(AttrValue::Scalar).unwrap_or_default()
    }
}

impl From<Option<Vec<String>>> for AttrValue {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map(AttrValue::List).unwrap_or_default()
    }
}

/// Literal for a typed boolean.
pub fn js_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Numeric value of a severity given by name or as an integer.
pub fn level_value(text: &str) -> Result<i64, ValueError> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i32>() {
        return Ok(n as i64);
    }
    let level = match trimmed.to_ascii_uppercase().as_str() {
        "ALL" => i32::MIN,
        "TRACE" => 1000,
        "DEBUG" => 2000,
        "INFO" => 3000,
        "WARN" => 4000,
        "ERROR" => 5000,
        "FATAL" => 6000,
        "OFF" => i32::MAX,
        _ => return Err(ValueError::UnknownLevel(text.to_string())),
    };
    Ok(level as i64)
}

/// Converts raw texts to script literals. Holds the host's path resolver so
/// url values can be made absolute.
#[derive(Clone, Copy)]
pub struct Converter<'r> {
    resolver: &'r dyn PathResolver,
}

impl<'r> Converter<'r> {
    pub fn new(resolver: &'r dyn PathResolver) -> Self {
        Self { resolver }
    }

    pub fn convert(&self, kind: ValueKind, raw: &str) -> Result<String, ValueError> {
        match kind {
            ValueKind::Text => Ok(escape::quote(raw)),
            ValueKind::Unsigned => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ValueError::NotUnsigned(raw.to_string()));
                }
                trimmed
                    .parse::<u32>()
                    .map(|n| n.to_string())
                    .map_err(|_| ValueError::NotUnsigned(raw.to_string()))
            }
            ValueKind::Url => {
                let absolute = url::absolute_url(raw, self.resolver)?;
                Ok(escape::quote(&absolute))
            }
            ValueKind::Level => level_value(raw).map(|n| n.to_string()),
            ValueKind::Regex => match fancy_regex::Regex::new(raw) {
                Ok(_) => Ok(escape::quote(raw)),
                Err(e) => Err(ValueError::InvalidRegex {
                    text: raw.to_string(),
                    reason: e.to_string(),
                }),
            },
            ValueKind::Identifier => {
                if IDENTIFIER_RE.is_match(raw) {
                    Ok(raw.to_string())
                } else {
                    Err(ValueError::InvalidIdentifier(raw.to_string()))
                }
            }
        }
    }

    /// Convert every item with `kind` and join into `[v1, v2, ...]`.
    pub fn convert_list<S: AsRef<str>>(
        &self,
        kind: ValueKind,
        items: &[S],
    ) -> Result<String, ValueError> {
        let values = items
            .iter()
            .map(|item| self.convert(kind, item.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", values.join(", ")))
    }

    /// Convert an attribute value. `None` means the value is omitted.
    pub fn convert_value(
        &self,
        kind: ValueKind,
        value: &AttrValue,
    ) -> Result<Option<String>, ValueError> {
        if value.is_omitted() {
            return Ok(None);
        }
        match value {
            AttrValue::Absent => Ok(None),
            AttrValue::Scalar(text) => self.convert(kind, text).map(Some),
            AttrValue::List(items) => self.convert_list(kind, items).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Converter<'static> {
        Converter::new(&Identity)
    }

    #[test]
    fn test_text_is_escaped_and_quoted() {
        assert_eq!(conv().convert(ValueKind::Text, "a\"b").unwrap(), r#""a\"b""#);
    }

    #[test]
    fn test_typed_bool() {
        assert_eq!(js_bool(true), "true");
        assert_eq!(js_bool(false), "false");
    }

    #[test]
    fn test_unsigned_rejects_negative_and_garbage() {
        let c = conv();
        assert_eq!(c.convert(ValueKind::Unsigned, "42").unwrap(), "42");
        assert_eq!(c.convert(ValueKind::Unsigned, "007").unwrap(), "7");
        for bad in ["-1", "1.5", "ten", "", "+3", "99999999999"] {
            assert_eq!(
                c.convert(ValueKind::Unsigned, bad),
                Err(ValueError::NotUnsigned(bad.to_string())),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_url_resolves_virtual_paths_before_quoting() {
        let resolver = AppRoot::new("/myapp");
        let c = Converter::new(&resolver);
        assert_eq!(
            c.convert(ValueKind::Url, "~/jsnlog.logger").unwrap(),
            r#""/myapp/jsnlog.logger""#
        );
        assert_eq!(c.convert(ValueKind::Url, "/log").unwrap(), r#""/log""#);
        assert!(matches!(
            c.convert(ValueKind::Url, "not a url"),
            Err(ValueError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_levels() {
        let c = conv();
        assert_eq!(c.convert(ValueKind::Level, "WARN").unwrap(), "4000");
        assert_eq!(c.convert(ValueKind::Level, "debug").unwrap(), "2000");
        assert_eq!(c.convert(ValueKind::Level, "1500").unwrap(), "1500");
        assert_eq!(c.convert(ValueKind::Level, "ALL").unwrap(), "-2147483648");
        assert_eq!(c.convert(ValueKind::Level, "OFF").unwrap(), "2147483647");
        assert!(c.convert(ValueKind::Level, "LOUD").is_err());
    }

    #[test]
    fn test_regex_must_compile() {
        let c = conv();
        assert_eq!(
            c.convert(ValueKind::Regex, r"^10\.0\.").unwrap(),
            r#""^10\\.0\\.""#
        );
        assert!(matches!(
            c.convert(ValueKind::Regex, "([a-z"),
            Err(ValueError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_regex_allows_lookaround_and_backreferences() {
        let c = conv();
        assert_eq!(c.convert(ValueKind::Regex, "^(?!keep)").unwrap(), r#""^(?!keep)""#);
        assert_eq!(c.convert(ValueKind::Regex, r"(a)\1").unwrap(), r#""(a)\\1""#);
        assert_eq!(
            c.convert(ValueKind::Regex, "(?<=x)y").unwrap(),
            r#""(?\u003c=x)y""#
        );
    }

    #[test]
    fn test_identifier_is_unquoted() {
        let c = conv();
        assert_eq!(c.convert(ValueKind::Identifier, "a0").unwrap(), "a0");
        assert!(c.convert(ValueKind::Identifier, "0a").is_err());
        assert!(c.convert(ValueKind::Identifier, "a-b").is_err());
    }

    #[test]
    fn test_list_uses_item_kind() {
        let c = conv();
        assert_eq!(
            c.convert_list(ValueKind::Text, &["x", "y"]).unwrap(),
            r#"["x", "y"]"#
        );
        assert_eq!(c.convert_list::<&str>(ValueKind::Text, &[]).unwrap(), "[]");
        assert!(c.convert_list(ValueKind::Unsigned, &["1", "-2"]).is_err());
    }

    #[test]
    fn test_absent_and_empty_are_omitted_but_empty_list_is_not() {
        let c = conv();
        assert_eq!(c.convert_value(ValueKind::Text, &AttrValue::Absent).unwrap(), None);
        assert_eq!(
            c.convert_value(ValueKind::Text, &AttrValue::scalar("")).unwrap(),
            None
        );
        assert_eq!(
            c.convert_value(ValueKind::Text, &AttrValue::List(vec![])).unwrap(),
            Some("[]".to_string())
        );
    }
}
