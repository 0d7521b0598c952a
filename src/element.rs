//! Element creators: one per creatable kind (appender, logger).
//!
//! Each creator takes the next value of the pass-local [`Sequence`], derives
//! its script identifier from it, and records that identifier in the
//! pass-local [`NameTable`] under its configured name. Appenders must be
//! emitted before loggers so logger references resolve.

use crate::config::{AppenderConfig, LoggerConfig};
use crate::error::CompileError;
use crate::json::JsonFields;
use crate::render::LIBRARY_OBJECT;
use crate::value::escape::quote;
use crate::value::{AttrValue, Converter};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Appender,
    Logger,
}

impl ElementKind {
    /// Prefix of the generated script identifiers for this kind.
    pub fn identifier_prefix(self) -> &'static str {
        match self {
            ElementKind::Appender => "a",
            ElementKind::Logger => "logger",
        }
    }
}

/// Configured element name -> generated script identifier, per kind.
///
/// Loggers are tracked apart from appenders so a logger can never shadow
/// an appender of the same name.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    appenders: BTreeMap<String, String>,
    loggers: BTreeMap<String, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier previously bound to `name`, if any.
    pub fn register(&mut self, kind: ElementKind, name: &str, ident: &str) -> Option<String> {
        let table = match kind {
            ElementKind::Appender => &mut self.appenders,
            ElementKind::Logger => &mut self.loggers,
        };
        table.insert(name.to_string(), ident.to_string())
    }

    pub fn appender(&self, name: &str) -> Option<&str> {
        self.appenders.get(name).map(String::as_str)
    }
}

/// Source of unique identifier suffixes within one compilation pass.
#[derive(Debug, Default)]
pub struct Sequence {
    next: u32,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value the next element will receive.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Hand out the current value and move past it.
    pub fn advance(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}

/// Something the compiler can create in the generated script.
pub trait CreateElement {
    const KIND: ElementKind;

    /// Configured name, `""` when the element has none.
    fn configured_name(&self) -> &str;

    /// Emit the declaration and `setOptions` lines for this element.
    ///
    /// Advances `seq` by exactly one and registers the generated identifier
    /// in `names` on success.
    fn emit(
        &self,
        names: &mut NameTable,
        seq: &mut Sequence,
        conv: &Converter<'_>,
    ) -> Result<Vec<String>, CompileError>;
}

fn identifier(kind: ElementKind, seq: &mut Sequence) -> String {
    format!("{}{}", kind.identifier_prefix(), seq.advance())
}

impl CreateElement for AppenderConfig {
    const KIND: ElementKind = ElementKind::Appender;

    fn configured_name(&self) -> &str {
        &self.name
    }

    fn emit(
        &self,
        names: &mut NameTable,
        seq: &mut Sequence,
        conv: &Converter<'_>,
    ) -> Result<Vec<String>, CompileError> {
        let ident = identifier(Self::KIND, seq);
        let create = format!(
            "var {}={}.{}({});",
            ident,
            LIBRARY_OBJECT,
            self.kind.create_method(),
            quote(&self.name)
        );
        let options = JsonFields::from_attributes(&self.attributes(), conv)?;

        if let Some(prev) = names.register(Self::KIND, &self.name, &ident) {
            warn!(
                "appender name '{}' used more than once; '{}' replaces '{}' for later loggers",
                self.name, ident, prev
            );
        }
        debug!(appender = %self.name, ident = %ident, "emitted appender");

        Ok(vec![create, options.set_options(&ident)])
    }
}

impl LoggerConfig {
    /// Map configured appender names to their generated identifiers.
    fn resolve_appenders(&self, names: &NameTable) -> Result<AttrValue, CompileError> {
        let Some(configured) = self.appender_names() else {
            return Ok(AttrValue::Absent);
        };
        let mut idents = Vec::with_capacity(configured.len());
        for appender in configured {
            match names.appender(&appender) {
                Some(ident) => idents.push(ident.to_string()),
                None => {
                    return Err(CompileError::DanglingAppender {
                        logger: self.configured_name().to_string(),
                        appender,
                    });
                }
            }
        }
        Ok(AttrValue::List(idents))
    }
}

impl CreateElement for LoggerConfig {
    const KIND: ElementKind = ElementKind::Logger;

    fn configured_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    fn emit(
        &self,
        names: &mut NameTable,
        seq: &mut Sequence,
        conv: &Converter<'_>,
    ) -> Result<Vec<String>, CompileError> {
        let ident = identifier(Self::KIND, seq);
        let create = format!(
            "var {}={}({});",
            ident,
            LIBRARY_OBJECT,
            quote(self.configured_name())
        );
        let appenders = self.resolve_appenders(names)?;
        let options = JsonFields::from_attributes(&self.attributes(appenders), conv)?;

        names.register(Self::KIND, self.configured_name(), &ident);
        debug!(logger = %self.configured_name(), ident = %ident, "emitted logger");

        Ok(vec![create, options.set_options(&ident)])
    }
}
