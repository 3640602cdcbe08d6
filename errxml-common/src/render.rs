//! C program template.
//!
//! The emitted program prints an XML document when compiled and run against
//! the library:
//!
//! ```text
//! <?xml version="1.0" encoding="ISO-8859-1"?><nidocument>
//! <nicomment>NANOMSG library error codes</nicomment>
//! <nierror code="156384726">EINVAL: Invalid argument</nierror>
//! </nidocument>
//! ```
//!
//! Descriptions are resolved when the generated program runs, by calling
//! the lookup function with the error constant.

use crate::entry::ResolvedEntry;
use std::fmt::Write as _;

/// Text surrounding the per-entry statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramTemplate {
    /// Header providing the error constants and the lookup function.
    pub include: String,
    /// C function mapping an error constant to its description.
    pub lookup_fn: String,
    /// Text of the `<nicomment>` element.
    pub comment: String,
    pub code_base: u64,
}

impl ProgramTemplate {
    pub fn render_header(&self) -> String {
        let comment = c_escape(&xml_escape(&self.comment));
        let mut out = String::new();
        out.push('\n');
        out.push_str("#include <stdio.h>\n");
        let _ = writeln!(out, "#include <{}>", self.include);
        out.push_str("void main()\n{\n");
        out.push_str(
            "\tputs(\"<?xml version=\\\"1.0\\\" encoding=\\\"ISO-8859-1\\\"?><nidocument>\");\n",
        );
        let _ = writeln!(out, "\tputs(\"<nicomment>{comment}</nicomment>\");");
        out.push('\n');
        out
    }

    pub fn render_entry(&self, entry: &ResolvedEntry) -> String {
        format!(
            "\tprintf(\"<nierror code=\\\"{code}\\\">{name}: %s</nierror>\\n\", {lookup}({name}));\n",
            code = entry.code,
            name = entry.name,
            lookup = self.lookup_fn,
        )
    }

    pub fn render_footer(&self) -> String {
        "\n\tputs(\"</nidocument>\");\n}\n\n".to_string()
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            // Trigraphs.
            '?' => out.push_str("\\?"),
            _ => out.push(c),
        }
    }
    out
}
