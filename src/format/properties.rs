//! Java-style `.properties` files.
//!
//! Line format:
//! - `#` or `!` as the first non-blank character starts a comment line
//! - a trailing odd run of backslashes joins the next line (its leading
//!   blanks are dropped)
//! - the key ends at the first unescaped `=`, `:` or blank; blanks and at
//!   most one `=`/`:` separate it from the value
//! - escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other `\c` is `c`

use super::{FileFormat, FormatParser, strip_bom};
use crate::error::FormatError;
use crate::tree::{ConfigTree, Scalar};
use std::collections::HashMap;

/// Parses property files into a flat object of string values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesParser;

impl FormatParser for PropertiesParser {
    fn parse(&self, input: &[u8]) -> Result<ConfigTree, FormatError> {
        let text = decode(strip_bom(input));
        let mut fields: Vec<(String, ConfigTree)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for line in logical_lines(&text) {
            let (key, value) = split_entry(&line)?;
            let value = ConfigTree::Scalar(Scalar::String(value));
            match positions.get(&key) {
                Some(&pos) => fields[pos].1 = value,
                None => {
                    positions.insert(key.clone(), fields.len());
                    fields.push((key, value));
                }
            }
        }

        Ok(ConfigTree::Object(fields))
    }

    fn format(&self) -> FileFormat {
        FileFormat::Properties
    }
}

/// UTF-8 when valid, otherwise ISO-8859-1.
fn decode(input: &[u8]) -> String {
    match std::str::from_utf8(input) {
        Ok(text) => text.to_string(),
        Err(_) => input.iter().map(|&b| b as char).collect(),
    }
}

/// A logical line and the 1-based number of its first physical line.
struct LogicalLine {
    number: usize,
    text: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (idx, physical) in physical_lines(text).enumerate() {
        let trimmed = physical.trim_start_matches(is_blank);

        let mut line = match current.take() {
            Some(mut line) => {
                line.text.push_str(trimmed);
                line
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                LogicalLine {
                    number: idx + 1,
                    text: trimmed.to_string(),
                }
            }
        };

        let trailing = line.text.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            line.text.pop();
            current = Some(line);
        } else {
            lines.push(line);
        }
    }

    // Continuation at end of input
    if let Some(line) = current {
        lines.push(line);
    }
    lines
}

/// Split on `\n`, `\r\n` and lone `\r`.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(['\n', '\r']) {
            Some(pos) => {
                let skip = if s[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[pos + skip..]);
                Some(&s[..pos])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

fn split_entry(line: &LogicalLine) -> Result<(String, String), FormatError> {
    let chars: Vec<char> = line.text.chars().collect();
    let mut key_len = 0;
    let mut value_start = chars.len();
    let mut has_separator = false;
    let mut escaped = false;

    while key_len < chars.len() {
        let c = chars[key_len];
        if !escaped && (c == '=' || c == ':') {
            value_start = key_len + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            value_start = key_len + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
        key_len += 1;
    }

    while value_start < chars.len() {
        let c = chars[value_start];
        if is_blank(c) {
            value_start += 1;
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            value_start += 1;
        } else {
            break;
        }
    }

    let key = unescape(&chars[..key_len], line.number)?;
    let value = unescape(&chars[value_start..], line.number)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line: usize) -> Result<String, FormatError> {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            'u' => {
                let high = hex_unit(chars, i, line)?;
                i += 4;
                if (0xD800..0xDC00).contains(&high)
                    && chars[i..].starts_with(&['\\', 'u'])
                    && let Ok(low) = hex_unit(chars, i + 2, line)
                    && (0xDC00..0xE000).contains(&low)
                {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    i += 6;
                } else {
                    // Lone surrogates can't be represented in a Rust string
                    out.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Four hex digits starting at `start`, as one UTF-16 code unit.
fn hex_unit(chars: &[char], start: usize, line: usize) -> Result<u32, FormatError> {
    let digits = chars.get(start..start + 4).unwrap_or(&chars[start.min(chars.len())..]);
    let hex: String = digits.iter().collect();
    if digits.len() != 4 || !digits.iter().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed_unicode(line, &hex));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| malformed_unicode(line, &hex))
}

fn malformed_unicode(line: usize, found: &str) -> FormatError {
    FormatError::Properties {
        line,
        message: format!("malformed \\uxxxx encoding: \\u{}", found),
    }
}
