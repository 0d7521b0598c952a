//! Render layer: the root compiler and the script-tag text it wraps around
//! the generated statements.

pub mod script;

pub use script::{CompileOptions, compile};

/// Global object of the client-side logging library.
pub const LIBRARY_OBJECT: &str = "JL";

/// Function wrapping the generated statements when closure wrapping is on.
pub const CONFIGURE_FUNCTION: &str = "__jsnlog_configure";

/// Append-only sequence of output lines.
#[derive(Debug, Default)]
pub struct ScriptBuffer {
    lines: Vec<String>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.lines.extend(lines);
    }

    pub fn begin_script(&mut self) {
        self.line(r#"<script type="text/javascript">"#);
        self.line("//<![CDATA[");
    }

    pub fn end_script(&mut self) {
        self.line("//]]>");
        self.line("</script>");
    }

    /// `<script type="text/javascript" src="..."></script>`
    pub fn script_src(&mut self, url: &str) {
        self.line(format!(
            r#"<script type="text/javascript" src="{}"></script>"#,
            html_attr_escape(url)
        ));
    }

    /// Every line terminated by `\n`.
    pub fn into_text(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn html_attr_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
