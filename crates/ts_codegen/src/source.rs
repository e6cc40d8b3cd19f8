//! Line-oriented Rust source output.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write};

use ts_schema::NotationError;

const INDENT: &str = "    ";

/// Collects source text one indented line at a time.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.level {
            self.out.write_str(INDENT)?;
        }
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    /// Writes a line that opens a block.
    pub fn open(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.line(args)?;
        self.level += 1;
        Ok(())
    }

    /// Writes the line that closes the innermost block.
    pub fn close(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.level = self.level.saturating_sub(1);
        self.line(args)
    }

    pub fn blank(&mut self) -> fmt::Result {
        self.out.write_char('\n')
    }

    pub fn finish(self) -> String {
        self.out
    }
}

// -----------------------------------------------------------------------------
// Identifiers

/// Strict and reserved keywords that can be written as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self", "_"];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_alphanumeric())
}

/// Spells a field name as a Rust identifier, raw if it is a keyword.
pub(crate) fn field_ident(name: &str) -> Result<String, NotationError> {
    if !is_identifier(name) || PATH_KEYWORDS.contains(&name) {
        return Err(NotationError::unsupported(format!(
            "field `{name}` cannot be named in Rust source"
        )));
    }
    if KEYWORDS.contains(&name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(String::from(name))
    }
}

/// Checks that `path` names a type in Rust source and returns its last
/// segment.
pub(crate) fn type_name(path: &str) -> Result<&str, NotationError> {
    let invalid = || NotationError::unsupported(format!("`{path}` is not a Rust type path"));

    let relative = path.strip_prefix("::").unwrap_or(path);
    let mut segments = relative.split("::").enumerate().peekable();
    let mut last = None;
    while let Some((index, segment)) = segments.next() {
        let leading = index == 0 && !path.starts_with("::");
        let ok = if PATH_KEYWORDS.contains(&segment) {
            leading && segment != "_" && segments.peek().is_some()
        } else {
            is_identifier(segment) && !KEYWORDS.contains(&segment)
        };
        if !ok {
            return Err(invalid());
        }
        last = Some(segment);
    }
    last.ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::{SourceWriter, field_ident, type_name};

    #[test]
    fn writer_indents_blocks() {
        let mut writer = SourceWriter::new();
        writer.open(format_args!("fn f() {{")).unwrap();
        writer.line(format_args!("let x = {};", 1)).unwrap();
        writer.close(format_args!("}}")).unwrap();
        assert_eq!(writer.finish(), "fn f() {\n    let x = 1;\n}\n");
    }

    #[test]
    fn fields() {
        assert_eq!(field_ident("width").unwrap(), "width");
        assert_eq!(field_ident("type").unwrap(), "r#type");
        assert!(field_ident("self").is_err());
        assert!(field_ident("wire-name").is_err());
        assert!(field_ident("").is_err());
    }

    #[test]
    fn paths() {
        assert_eq!(type_name("app::scene::Node").unwrap(), "Node");
        assert_eq!(type_name("::app::Node").unwrap(), "Node");
        assert_eq!(type_name("crate::Node").unwrap(), "Node");
        assert_eq!(type_name("Node").unwrap(), "Node");

        assert!(type_name("geo.Square").is_err());
        assert!(type_name("app::Node<u8>").is_err());
        assert!(type_name("app::crate::Node").is_err());
        assert!(type_name("crate").is_err());
        assert!(type_name("app::").is_err());
    }
}
