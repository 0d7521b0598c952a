//! Root compiler: configuration tree -> inline configuration script.
//!
//! Output, in order:
//! 1) opening script tag (and the wrapper function when requested)
//! 2) `JL.setOptions(...)` with client ip, request id and global options
//! 3) appenders, then loggers (skipped entirely when disabled)
//! 4) wrapper close + guarded invocation, closing script tag
//! 5) optional `<script src=...>` for the library itself

use crate::config::Configuration;
use crate::element::{CreateElement, NameTable, Sequence};
use crate::error::CompileError;
use crate::json::JsonFields;
use crate::render::{CONFIGURE_FUNCTION, LIBRARY_OBJECT, ScriptBuffer};
use crate::value::url::absolute_url;
use crate::value::{Converter, PathResolver, ValueKind};
use tracing::{debug, info};

/// Per-request inputs of one compilation.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions<'a> {
    /// Empty means "omit".
    pub user_ip: &'a str,
    /// Empty means "omit".
    pub request_id: &'a str,
    /// Wrap the statements in a function that is invoked under a try/catch,
    /// so the script is a no-op if the library has not loaded. Turn off only
    /// when the library is guaranteed to be active already.
    pub wrap_in_closure: bool,
}

impl Default for CompileOptions<'_> {
    fn default() -> Self {
        Self {
            user_ip: "",
            request_id: "",
            wrap_in_closure: true,
        }
    }
}

/// Compile `config` into script text.
///
/// Pure in its inputs: the name table and sequence counter live only for
/// this call. Any invalid value aborts the whole compilation and no text is
/// returned.
pub fn compile(
    config: &Configuration,
    resolver: &dyn PathResolver,
    options: &CompileOptions<'_>,
) -> Result<String, CompileError> {
    let conv = Converter::new(resolver);

    let library_path = match config.production_library_path.as_deref() {
        Some(path) if !path.trim().is_empty() => Some(
            absolute_url(path, resolver)
                .map_err(|source| CompileError::InvalidLibraryPath { source })?,
        ),
        _ => None,
    };

    let mut buf = ScriptBuffer::new();
    buf.begin_script();
    if options.wrap_in_closure {
        buf.line(format!(
            "var {} = function ({}) {{",
            CONFIGURE_FUNCTION, LIBRARY_OBJECT
        ));
    }

    let mut global = JsonFields::new();
    global.push_text("clientIp", ValueKind::Text, options.user_ip, &conv)?;
    global.push_text("requestId", ValueKind::Text, options.request_id, &conv)?;
    global.push_bool("enabled", config.enabled);
    global.push_attributes(&config.global_attributes(), &conv)?;
    buf.line(global.set_options(LIBRARY_OBJECT));

    let mut names = NameTable::new();
    let mut seq = Sequence::new();
    if config.enabled {
        // Appenders first: loggers look their appenders up in `names`.
        emit_all(&config.appenders, &mut buf, &mut names, &mut seq, &conv)?;
        emit_all(&config.loggers, &mut buf, &mut names, &mut seq, &conv)?;
    } else {
        debug!(
            appenders = config.appenders.len(),
            loggers = config.loggers.len(),
            "logging disabled, no elements emitted"
        );
    }

    if options.wrap_in_closure {
        // Swallows every error of the invocation, including "JL is not defined".
        buf.line(format!(
            "}}; try {{ {}({}); }} catch(e) {{}};",
            CONFIGURE_FUNCTION, LIBRARY_OBJECT
        ));
    }
    buf.end_script();

    if let Some(path) = &library_path {
        buf.script_src(path);
    }

    info!(
        elements = seq.peek(),
        closure = options.wrap_in_closure,
        library = library_path.is_some(),
        "compiled logging configuration"
    );
    Ok(buf.into_text())
}

fn emit_all<E: CreateElement>(
    elements: &[E],
    buf: &mut ScriptBuffer,
    names: &mut NameTable,
    seq: &mut Sequence,
    conv: &Converter<'_>,
) -> Result<(), CompileError> {
    for element in elements {
        buf.extend(element.emit(names, seq, conv)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppenderConfig, AppenderKind, LoggerConfig, NameList};
    use crate::error::ValueError;
    use crate::value::{AppRoot, Identity};

    fn sample() -> Configuration {
        Configuration {
            appenders: vec![AppenderConfig::new(
                "ajax1",
                AppenderKind::Ajax { url: Some("/log".into()) },
            )],
            loggers: vec![LoggerConfig {
                appenders: Some(NameList::List(vec!["ajax1".to_string()])),
                ..LoggerConfig::root()
            }],
            ..Configuration::default()
        }
    }

    #[test]
    fn test_unwrapped_output() {
        let opts = CompileOptions {
            wrap_in_closure: false,
            ..CompileOptions::default()
        };
        let out = compile(&sample(), &Identity, &opts).unwrap();
        assert_eq!(
            out,
            "<script type=\"text/javascript\">\n\
             //<![CDATA[\n\
             JL.setOptions({\"enabled\": true});\n\
             var a0=JL.createAjaxAppender(\"ajax1\");\n\
             a0.setOptions({\"url\": \"/log\"});\n\
             var logger1=JL(\"\");\n\
             logger1.setOptions({\"appenders\": [a0]});\n\
             //]]>\n\
             </script>\n"
        );
    }

    #[test]
    fn test_disabled_emits_global_options_only() {
        let config = Configuration {
            enabled: false,
            ..sample()
        };
        let out = compile(&config, &Identity, &CompileOptions::default()).unwrap();
        assert!(out.contains("JL.setOptions({\"enabled\": false});"));
        assert!(!out.contains("var a0"));
        assert!(!out.contains("var logger"));
        assert!(out.contains("catch(e) {}"));
    }

    #[test]
    fn test_disabled_skips_element_validation() {
        let mut config = sample();
        config.enabled = false;
        config.loggers[0].appenders = Some(NameList::Joined("nowhere".to_string()));
        assert!(compile(&config, &Identity, &CompileOptions::default()).is_ok());
    }

    #[test]
    fn test_library_reference_comes_last() {
        let config = Configuration {
            production_library_path: Some("~/Scripts/jsnlog.min.js".to_string()),
            ..sample()
        };
        let out = compile(&config, &AppRoot::new("/site"), &CompileOptions::default()).unwrap();
        assert!(out.ends_with(
            "</script>\n<script type=\"text/javascript\" src=\"/site/Scripts/jsnlog.min.js\"></script>\n"
        ));
    }

    #[test]
    fn test_blank_library_path_is_ignored() {
        let config = Configuration {
            production_library_path: Some("  ".to_string()),
            ..sample()
        };
        let out = compile(&config, &Identity, &CompileOptions::default()).unwrap();
        assert!(!out.contains("src="));
    }

    #[test]
    fn test_bad_library_path() {
        let config = Configuration {
            production_library_path: Some("not a path".to_string()),
            ..sample()
        };
        let err = compile(&config, &Identity, &CompileOptions::default()).unwrap_err();
        assert_eq!(err.field(), "productionLibraryPath");
        assert_eq!(
            err,
            CompileError::InvalidLibraryPath {
                source: ValueError::MalformedUrl("not a path".to_string())
            }
        );
    }

    #[test]
    fn test_library_path_with_foreign_scheme() {
        for path in ["javascript:alert(1)", "data:text/javascript,alert(1)"] {
            let config = Configuration {
                production_library_path: Some(path.to_string()),
                ..sample()
            };
            let err = compile(&config, &Identity, &CompileOptions::default()).unwrap_err();
            assert_eq!(
                err,
                CompileError::InvalidLibraryPath {
                    source: ValueError::MalformedUrl(path.to_string())
                }
            );
        }
    }

    #[test]
    fn test_independent_passes() {
        let config = sample();
        let first = compile(&config, &Identity, &CompileOptions::default()).unwrap();
        let second = compile(&config, &Identity, &CompileOptions::default()).unwrap();
        assert_eq!(first, second);
        assert!(second.contains("var a0="));
    }
}
