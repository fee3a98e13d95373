//! Parsing of server log lines.

use crate::config::LineEnding;
use crate::error::{Error, Result};
use crate::types::PutRecord;

const PUT: &str = "PUT";
const ID_FIELD: usize = 3;
const ADDR_FIELD: usize = 1;

/// Parse one raw log line, terminator included.
///
/// Returns `Ok(None)` for lines that do not mention `PUT` anywhere.  A PUT
/// line that is too short or whose address has no port is an error; those
/// lines are never skipped silently.
pub fn parse_put_line(
    line_no: usize,
    raw: &str,
    ending: LineEnding,
) -> Result<Option<PutRecord>> {
    if !raw.contains(PUT) {
        return Ok(None);
    }

    let line = strip_ending(raw, ending);
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() <= ID_FIELD {
        return Err(Error::ShortLine {
            line: line_no,
            fields: fields.len(),
        });
    }

    let addr = fields[ADDR_FIELD];
    let (ip, _port) = addr.split_once(':').ok_or_else(|| Error::MissingPort {
        line: line_no,
        field: addr.to_string(),
    })?;

    Ok(Some(PutRecord {
        id: fields[ID_FIELD].to_string(),
        ip: ip.to_string(),
    }))
}

fn strip_ending(raw: &str, ending: LineEnding) -> &str {
    match ending {
        LineEnding::DropLastChar => match raw.char_indices().next_back() {
            Some((idx, _)) => &raw[..idx],
            None => raw,
        },
        LineEnding::TrimNewline => {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            line.strip_suffix('\r').unwrap_or(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Option<PutRecord>> {
        parse_put_line(1, raw, LineEnding::DropLastChar)
    }

    #[test]
    fn server_put_line() {
        let rec = parse("PUT 10.0.0.7:51234 : 42\n").unwrap().unwrap();
        assert_eq!(rec.id, "42");
        assert_eq!(rec.ip, "10.0.0.7");
    }

    #[test]
    fn non_put_lines_are_ignored() {
        assert_eq!(parse("GET 10.0.0.7:51234 : 42\n").unwrap(), None);
        assert_eq!(parse("OPTIONS 10.0.0.7:51234 : -1\n").unwrap(), None);
        assert_eq!(parse("\n").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn put_anywhere_in_line_qualifies() {
        let rec = parse("x 1.2.3.4:9000 y abc123\n").unwrap();
        assert_eq!(rec, None);

        let rec = parse("INPUT 1.2.3.4:9000 y abc123\n").unwrap().unwrap();
        assert_eq!(rec.id, "abc123");
        assert_eq!(rec.ip, "1.2.3.4");
    }

    #[test]
    fn only_first_colon_splits_the_address() {
        let rec = parse("PUT a:b:c : 7\n").unwrap().unwrap();
        assert_eq!(rec.ip, "a");
    }

    #[test]
    fn last_character_is_dropped_without_newline() {
        let rec = parse("PUT 1.2.3.4:9000 : 123").unwrap().unwrap();
        assert_eq!(rec.id, "12");
    }

    #[test]
    fn trim_newline_keeps_unterminated_line_intact() {
        let rec = parse_put_line(1, "PUT 1.2.3.4:9000 : 123", LineEnding::TrimNewline)
            .unwrap()
            .unwrap();
        assert_eq!(rec.id, "123");

        let rec = parse_put_line(1, "PUT 1.2.3.4:9000 : 123\r\n", LineEnding::TrimNewline)
            .unwrap()
            .unwrap();
        assert_eq!(rec.id, "123");
    }

    #[test]
    fn drop_last_char_respects_utf8_boundaries() {
        assert_eq!(strip_ending("PUT é", LineEnding::DropLastChar), "PUT ");
        assert_eq!(strip_ending("", LineEnding::DropLastChar), "");
    }

    #[test]
    fn consecutive_spaces_produce_empty_fields() {
        let rec = parse("PUT  1.2.3.4:1 id\n");
        // fields: ["PUT", "", "1.2.3.4:1", "id"]; field 1 is empty
        assert!(matches!(rec, Err(Error::MissingPort { field, .. }) if field.is_empty()));
    }

    #[test]
    fn short_put_line_is_an_error() {
        let err = parse_put_line(9, "PUT 1.2.3.4:1\n", LineEnding::DropLastChar).unwrap_err();
        assert!(matches!(err, Error::ShortLine { line: 9, fields: 2 }));
    }

    #[test]
    fn address_without_port_is_an_error() {
        let err = parse("PUT 1.2.3.4 : 5\n").unwrap_err();
        assert!(matches!(err, Error::MissingPort { line: 1, .. }));
    }
}
