use crate::config::{RawScalar, text_of};
use crate::json::Attribute;
use crate::value::ValueKind;
use serde::Deserialize;

/// One appender entry. `kind` selects the creation method.
///
/// Parsed through [`RawAppender`], which rejects unknown keys and a `url` on
/// appenders that have no use for one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAppender")]
pub struct AppenderConfig {
    pub name: String,
    pub kind: AppenderKind,
    pub level: Option<RawScalar>,
    pub ip_regex: Option<RawScalar>,
    pub user_agent_regex: Option<RawScalar>,
    pub disallow: Option<RawScalar>,
    pub store_in_buffer_level: Option<RawScalar>,
    pub send_with_buffer_level: Option<RawScalar>,
    pub buffer_size: Option<RawScalar>,
    pub batch_size: Option<RawScalar>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppenderKind {
    Ajax { url: Option<RawScalar> },
    Console,
}

/// Appender entry exactly as it appears in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawAppender {
    pub kind: RawAppenderKind,

    pub name: String,

    #[serde(default)]
    pub url: Option<RawScalar>,

    #[serde(default)]
    pub level: Option<RawScalar>,

    #[serde(default)]
    pub ip_regex: Option<RawScalar>,

    #[serde(default)]
    pub user_agent_regex: Option<RawScalar>,

    #[serde(default)]
    pub disallow: Option<RawScalar>,

    #[serde(default)]
    pub store_in_buffer_level: Option<RawScalar>,

    #[serde(default)]
    pub send_with_buffer_level: Option<RawScalar>,

    #[serde(default)]
    pub buffer_size: Option<RawScalar>,

    #[serde(default)]
    pub batch_size: Option<RawScalar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawAppenderKind {
    Ajax,
    Console,
}

impl TryFrom<RawAppender> for AppenderConfig {
    type Error = String;

    fn try_from(raw: RawAppender) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.url) {
            (RawAppenderKind::Ajax, url) => AppenderKind::Ajax { url },
            (RawAppenderKind::Console, None) => AppenderKind::Console,
            (RawAppenderKind::Console, Some(_)) => {
                return Err(format!(
                    "console appender '{}' does not take a url",
                    raw.name
                ));
            }
        };
        Ok(Self {
            name: raw.name,
            kind,
            level: raw.level,
            ip_regex: raw.ip_regex,
            user_agent_regex: raw.user_agent_regex,
            disallow: raw.disallow,
            store_in_buffer_level: raw.store_in_buffer_level,
            send_with_buffer_level: raw.send_with_buffer_level,
            buffer_size: raw.buffer_size,
            batch_size: raw.batch_size,
        })
    }
}

impl AppenderKind {
    /// Method on the library object that creates this kind of appender.
    pub fn create_method(&self) -> &'static str {
        match self {
            AppenderKind::Ajax { .. } => "createAjaxAppender",
            AppenderKind::Console => "createConsoleAppender",
        }
    }
}

impl AppenderConfig {
    pub fn new(name: impl Into<String>, kind: AppenderKind) -> Self {
        Self {
            name: name.into(),
            kind,
            level: None,
            ip_regex: None,
            user_agent_regex: None,
            disallow: None,
            store_in_buffer_level: None,
            send_with_buffer_level: None,
            buffer_size: None,
            batch_size: None,
        }
    }

    /// Options passed to `setOptions`, in output order.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attrs = vec![
            Attribute::new("level", ValueKind::Level, text_of(&self.level)),
            Attribute::new("ipRegex", ValueKind::Regex, text_of(&self.ip_regex)),
            Attribute::new("userAgentRegex", ValueKind::Regex, text_of(&self.user_agent_regex)),
            Attribute::new("disallow", ValueKind::Regex, text_of(&self.disallow)),
            Attribute::new(
                "storeInBufferLevel",
                ValueKind::Level,
                text_of(&self.store_in_buffer_level),
            ),
            Attribute::new(
                "sendWithBufferLevel",
                ValueKind::Level,
                text_of(&self.send_with_buffer_level),
            ),
            Attribute::new("bufferSize", ValueKind::Unsigned, text_of(&self.buffer_size)),
            Attribute::new("batchSize", ValueKind::Unsigned, text_of(&self.batch_size)),
        ];
        if let AppenderKind::Ajax { url } = &self.kind {
            attrs.push(Attribute::new("url", ValueKind::Url, text_of(url)));
        }
        attrs
    }
}
