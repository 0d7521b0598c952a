//! Config layer: the parsed configuration tree (JSON, serde-friendly).
//!
//! Nothing here validates values. Scalars are kept as raw text and only the
//! compiler decides whether `"-3"` is an acceptable `bufferSize`.
//!
//! JSON shape:
//! {
//!   "enabled": true,                        // default true
//!   "maxMessages": 20,                      // optional
//!   "defaultAjaxUrl": "~/jsnlog.logger",    // optional
//!   "productionLibraryPath": "~/Scripts/jsnlog.min.js",
//!   "appenders": [
//!     { "kind": "ajax", "name": "ajax1", "url": "/log", "level": "WARN" },
//!     { "kind": "console", "name": "console1" }
//!   ],
//!   "loggers": [
//!     { "appenders": ["ajax1"] },           // root logger
//!     { "name": "app.db", "appenders": "ajax1;console1", "onceOnly": ["^x"] }
//!   ]
//! }

pub mod appender;
pub mod logger;

pub use appender::{AppenderConfig, AppenderKind};
pub use logger::{LoggerConfig, NameList};

use crate::json::Attribute;
use crate::value::ValueKind;
use anyhow::Context;
use serde::Deserialize;
use std::fs;

/// A scalar attribute value as written in the config file.
///
/// Strings, numbers and booleans are all accepted and kept as text, the way
/// a markup attribute would deliver them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl RawScalar {
    pub fn as_text(&self) -> String {
        match self {
            RawScalar::Text(s) => s.clone(),
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

pub(crate) fn text_of(value: &Option<RawScalar>) -> Option<String> {
    value.as_ref().map(RawScalar::as_text)
}

/// Root of the configuration tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub max_messages: Option<RawScalar>,

    #[serde(default)]
    pub default_ajax_url: Option<RawScalar>,

    #[serde(default)]
    pub production_library_path: Option<String>,

    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,

    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

fn default_enabled() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_messages: None,
            default_ajax_url: None,
            production_library_path: None,
            appenders: Vec::new(),
            loggers: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parse jsnlog configuration")
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
        Self::from_json_str(&text).with_context(|| format!("in config file {}", path))
    }

    /// Global options that follow the seeded client ip / request id fields.
    /// `enabled` is typed and handled separately.
    pub fn global_attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new("maxMessages", ValueKind::Unsigned, text_of(&self.max_messages)),
            Attribute::new("defaultAjaxUrl", ValueKind::Url, text_of(&self.default_ajax_url)),
        ]
    }
}
