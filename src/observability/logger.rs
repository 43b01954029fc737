//! Structured JSON diagnostic output
//!
//! One log line = one event. Keys are emitted in deterministic order:
//! `event` first, then `level`, then caller-supplied fields sorted
//! alphabetically. Writes are synchronous and unbuffered.

use std::fmt;
use std::io::{self, Write};

/// Diagnostic levels emitted by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Expected soft condition (e.g. record has no schema yet)
    Info,
    /// Suspicious but non-fatal condition (e.g. `properties` is not a map)
    Warn,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emit an INFO diagnostic to stdout
pub fn info(event: &str, fields: &[(&str, &str)]) {
    let _ = write_line(&mut io::stdout(), LogLevel::Info, event, fields);
}

/// Emit a WARN diagnostic to stderr
pub fn warn(event: &str, fields: &[(&str, &str)]) {
    let _ = write_line(&mut io::stderr(), LogLevel::Warn, event, fields);
}

fn write_line<W: Write>(
    writer: &mut W,
    level: LogLevel,
    event: &str,
    fields: &[(&str, &str)],
) -> io::Result<()> {
    let mut line = String::with_capacity(128);
    line.push_str("{\"event\":\"");
    escape_into(&mut line, event);
    line.push_str("\",\"level\":\"");
    line.push_str(level.as_str());
    line.push('"');

    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    for (key, value) in sorted {
        line.push_str(",\"");
        escape_into(&mut line, key);
        line.push_str("\":\"");
        escape_into(&mut line, value);
        line.push('"');
    }

    line.push_str("}\n");
    writer.write_all(line.as_bytes())?;
    writer.flush()
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(level: LogLevel, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        write_line(&mut buffer, level, event, fields).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_line_is_valid_json() {
        let line = capture(LogLevel::Info, "NO_SCHEMA", &[("record", "r1")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "NO_SCHEMA");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["record"], "r1");
    }

    #[test]
    fn test_fields_sorted_deterministically() {
        let a = capture(LogLevel::Warn, "E", &[("b", "2"), ("a", "1")]);
        let b = capture(LogLevel::Warn, "E", &[("a", "1"), ("b", "2")]);
        assert_eq!(a, b);
        assert!(a.find("\"a\"").unwrap() < a.find("\"b\"").unwrap());
    }

    #[test]
    fn test_escapes_embedded_json() {
        let line = capture(LogLevel::Warn, "BAD_PROPERTIES", &[("found", "\"quoted\"\n")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["found"], "\"quoted\"\n");
    }

    #[test]
    fn test_one_event_per_line() {
        let line = capture(LogLevel::Info, "E", &[("k", "v")]);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
