//! Rendering of the rebuilt pool.
//!
//! The text matches what the old Python tooling wrote with
//! `json.dumps(obj)`: `", "` and `": "` separators and ASCII-only output,
//! so files produced before and after the rewrite diff cleanly.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::error::{Error, Result};
use crate::pool::Pool;

/// Serialize the pool to a single line of JSON (no trailing newline).
pub fn render(pool: &Pool) -> Result<String> {
    let mut buf = Vec::with_capacity(pool.len() * 24 + 2);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedAscii);
    pool.serialize(&mut ser).map_err(|source| Error::Render { source })?;
    String::from_utf8(buf).map_err(|source| Error::RenderUtf8 { source })
}

struct SpacedAscii;

/// Everything outside printable ASCII; control characters below 0x20 never
/// reach the fragment writer.
fn needs_escape(c: char) -> bool {
    !c.is_ascii() || c == '\x7f'
}

impl Formatter for SpacedAscii {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut rest = fragment;
        while let Some(pos) = rest.find(needs_escape) {
            writer.write_all(rest[..pos].as_bytes())?;
            let c = rest[pos..].chars().next().unwrap_or_default();
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            rest = &rest[pos + c.len_utf8()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_separators() {
        let pool = Pool::from_json(r#"{"x":"9.9.9.9","y":"10.0.0.1"}"#).unwrap();
        assert_eq!(render(&pool).unwrap(), r#"{"x": "9.9.9.9", "y": "10.0.0.1"}"#);
    }

    #[test]
    fn empty_pool() {
        assert_eq!(render(&Pool::default()).unwrap(), "{}");
    }

    #[test]
    fn non_ascii_is_escaped() {
        let mut pool = Pool::default();
        pool.insert("café", "😀");
        assert_eq!(
            render(&pool).unwrap(),
            r#"{"caf\u00e9": "\ud83d\ude00"}"#
        );
    }

    #[test]
    fn delete_is_escaped() {
        let pool = Pool::from_json(r#"{"x": "a\u007fb"}"#).unwrap();
        assert_eq!(render(&pool).unwrap(), r#"{"x": "a\u007fb"}"#);
    }

    #[test]
    fn control_characters_and_quotes() {
        let mut pool = Pool::default();
        pool.insert("a\"b", "tab\there");
        assert_eq!(render(&pool).unwrap(), r#"{"a\"b": "tab\there"}"#);
    }

    #[test]
    fn nested_values_keep_spacing() {
        let pool = Pool::from_json(r#"{"k":[1,2,{"a":null}]}"#).unwrap();
        assert_eq!(render(&pool).unwrap(), r#"{"k": [1, 2, {"a": null}]}"#);
    }
}
