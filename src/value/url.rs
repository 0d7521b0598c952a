//! Url shape checks and virtual path resolution.

use crate::error::ValueError;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix marking an application-relative ("virtual") path, e.g. `~/jsnlog.logger`.
pub const VIRTUAL_PATH_MARKER: char = '~';

const URL_CHAR: &str = r"[a-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]";
// Same set without ':'.
const PATH_CHAR: &str = r"[a-z0-9\-._~/?#\[\]@!$&'()*+,;=%]";

// http(s) or protocol-relative, a virtual path, or a path whose first
// segment has no ':' (so no other scheme such as `javascript:` gets through).
// No whitespace, double quotes, angle brackets, backslashes or control
// characters anywhere.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?:https?:)?//{u}+|~{u}*|{p}*[/?#]{u}*|{p}+)$",
        u = URL_CHAR,
        p = PATH_CHAR
    ))
    .expect("url pattern compiles")
});

/// Turns a virtual path into an absolute url. Supplied by the host.
pub trait PathResolver {
    fn resolve(&self, virtual_path: &str) -> String;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, virtual_path: &str) -> String {
        self(virtual_path)
    }
}

/// Resolver that hands paths back untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PathResolver for Identity {
    fn resolve(&self, virtual_path: &str) -> String {
        virtual_path.to_string()
    }
}

/// Resolver that maps `~` onto a fixed application root, e.g. `/app`.
#[derive(Debug, Clone)]
pub struct AppRoot {
    root: String,
}

impl AppRoot {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl PathResolver for AppRoot {
    fn resolve(&self, virtual_path: &str) -> String {
        let rest = virtual_path
            .strip_prefix(VIRTUAL_PATH_MARKER)
            .unwrap_or(virtual_path)
            .trim_start_matches('/');
        let root = self.root.trim_end_matches('/');
        format!("{}/{}", root, rest)
    }
}

pub fn is_url(text: &str) -> bool {
    URL_RE.is_match(text)
}

/// Validate `text` as a url and resolve it if it is a virtual path.
pub fn absolute_url(text: &str, resolver: &dyn PathResolver) -> Result<String, ValueError> {
    if !is_url(text) {
        return Err(ValueError::MalformedUrl(text.to_string()));
    }
    if text.starts_with(VIRTUAL_PATH_MARKER) {
        Ok(resolver.resolve(text))
    } else {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for ok in [
            "/log",
            "jsnlog.logger",
            "~/jsnlog.logger",
            "http://example.com/log?x=1&y=2",
            "HTTPS://example.com:8443/a/b#frag",
            "//cdn.example.com/jsnlog.min.js",
            "/api/log%20x",
            "logs/v1:ingest",
            "?route=log",
        ] {
            assert!(is_url(ok), "expected {:?} to be accepted", ok);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "has space",
            "quote\"d",
            "/a<b",
            "back\\slash",
            "line\nbreak",
            "javascript:alert(1)\"",
            "javascript:alert(1)",
            "JavaScript:void(0)//x",
            "data:text/javascript,alert(1)",
            "mailto:ops@example.com",
            "http:/missing-slash",
        ] {
            assert!(!is_url(bad), "expected {:?} to be rejected", bad);
        }
    }

    #[test]
    fn test_virtual_path_goes_through_resolver() {
        let resolver = |p: &str| format!("http://host{}", &p[1..]);
        assert_eq!(
            absolute_url("~/jsnlog.logger", &resolver).unwrap(),
            "http://host/jsnlog.logger"
        );
        assert_eq!(absolute_url("/plain", &resolver).unwrap(), "/plain");
    }

    #[test]
    fn test_malformed_is_not_resolved() {
        let resolver = |_: &str| -> String { panic!("resolver must not run") };
        assert_eq!(
            absolute_url("~/a b", &resolver),
            Err(ValueError::MalformedUrl("~/a b".to_string()))
        );
    }

    #[test]
    fn test_app_root_joins_cleanly() {
        assert_eq!(AppRoot::new("/app/").resolve("~/x.js"), "/app/x.js");
        assert_eq!(AppRoot::new("/").resolve("~/x.js"), "/x.js");
        assert_eq!(AppRoot::new("").resolve("~x.js"), "/x.js");
    }
}
