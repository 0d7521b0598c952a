use crate::config::{RawScalar, text_of};
use crate::json::Attribute;
use crate::value::{AttrValue, ValueKind};
use serde::Deserialize;

/// One logger entry. A logger without a name is the root logger.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggerConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Names of appenders, as configured. `None` leaves the logger's
    /// appenders untouched; an empty list detaches all of them.
    #[serde(default)]
    pub appenders: Option<NameList>,

    #[serde(default)]
    pub level: Option<RawScalar>,

    #[serde(default)]
    pub ip_regex: Option<RawScalar>,

    #[serde(default)]
    pub user_agent_regex: Option<RawScalar>,

    #[serde(default)]
    pub disallow: Option<RawScalar>,

    #[serde(default)]
    pub once_only: Option<Vec<String>>,
}

/// Appender references: a JSON list, or one `;`-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    List(Vec<String>),
    Joined(String),
}

impl NameList {
    pub fn names(&self) -> Vec<String> {
        match self {
            NameList::List(names) => names.clone(),
            NameList::Joined(joined) => joined
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl LoggerConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn appender_names(&self) -> Option<Vec<String>> {
        self.appenders.as_ref().map(NameList::names)
    }

    /// Options passed to `setOptions`, in output order. `appenders` must
    /// already hold generated identifiers, not configured names.
    pub fn attributes(&self, appenders: AttrValue) -> Vec<Attribute> {
        vec![
            Attribute {
                name: "appenders",
                kind: ValueKind::Identifier,
                value: appenders,
            },
            Attribute::new("level", ValueKind::Level, text_of(&self.level)),
            Attribute::new("ipRegex", ValueKind::Regex, text_of(&self.ip_regex)),
            Attribute::new("userAgentRegex", ValueKind::Regex, text_of(&self.user_agent_regex)),
            Attribute::new("disallow", ValueKind::Regex, text_of(&self.disallow)),
            Attribute::new("onceOnly", ValueKind::Regex, self.once_only.clone()),
        ]
    }
}
