//! JSON string escaping
//!
//! Writes string literals byte-compatibly with a strict JSON encoder:
//! - `"` and `\` get a backslash, `\n` `\r` `\t` use their short forms
//! - every other byte below 0x20 becomes `\u00XX` (lowercase hex)
//! - with HTML safety on, `<` `>` `&` also become `\u00XX`
//! - U+2028 and U+2029 are always escaped
//! - each byte of an invalid UTF-8 sequence becomes `\ufffd`
//!
//! Runs of bytes that need no escaping are copied with a single
//! `extend_from_slice`, so plain ASCII costs one scan and one copy.

use std::fmt;

const HEX: &[u8; 16] = b"0123456789abcdef";

const fn build_safe_set(escape_html: bool) -> [bool; 128] {
    let mut set = [false; 128];
    let mut b = 0x20;
    while b < 128 {
        let c = b as u8;
        set[b] = !(c == b'"'
            || c == b'\\'
            || (escape_html && (c == b'<' || c == b'>' || c == b'&')));
        b += 1;
    }
    set
}

/// ASCII bytes that can be copied verbatim into a JSON string.
static SAFE_SET: [bool; 128] = build_safe_set(false);

/// ASCII bytes that can be copied verbatim into a JSON string embedded in HTML.
static HTML_SAFE_SET: [bool; 128] = build_safe_set(true);

/// Append `value` as a quoted JSON string literal.
#[inline]
pub fn append_str(buf: &mut Vec<u8>, value: &str, escape_html: bool) {
    buf.push(b'"');
    escape_body(buf, value.as_bytes(), escape_html, true);
    buf.push(b'"');
}

/// Append raw bytes as a quoted JSON string literal.
///
/// The bytes are read in place, never copied into an intermediate string.
/// Invalid UTF-8 is replaced byte by byte with `\ufffd`.
#[inline]
pub fn append_bytes(buf: &mut Vec<u8>, value: &[u8], escape_html: bool) {
    buf.push(b'"');
    escape_body(buf, value, escape_html, false);
    buf.push(b'"');
}

/// Append the escaped form of `value` without surrounding quotes.
#[inline]
pub(crate) fn append_unquoted(buf: &mut Vec<u8>, value: &str, escape_html: bool) {
    escape_body(buf, value.as_bytes(), escape_html, true);
}

/// Escape `value` into a freshly allocated JSON string literal.
pub fn escape(value: &str, escape_html: bool) -> String {
    let mut buf = Vec::with_capacity(value.len() + 2);
    append_str(&mut buf, value, escape_html);
    // Only ASCII escapes and verbatim slices of valid input were written.
    String::from_utf8(buf).unwrap_or_default()
}

/// Escape `value` into a freshly allocated JSON string literal.
pub fn escape_bytes(value: &[u8], escape_html: bool) -> String {
    let mut buf = Vec::with_capacity(value.len() + 2);
    append_bytes(&mut buf, value, escape_html);
    String::from_utf8(buf).unwrap_or_default()
}

/// Escape without surrounding quotes.
///
/// `valid_utf8` skips decoding for input already known to be UTF-8.
fn escape_body(buf: &mut Vec<u8>, value: &[u8], escape_html: bool, valid_utf8: bool) {
    let safe = if escape_html { &HTML_SAFE_SET } else { &SAFE_SET };
    let mut start = 0;
    let mut i = 0;

    while i < value.len() {
        let b = value[i];
        if b < 0x80 {
            if safe[b as usize] {
                i += 1;
                continue;
            }
            buf.extend_from_slice(&value[start..i]);
            match b {
                b'\\' | b'"' => buf.extend_from_slice(&[b'\\', b]),
                b'\n' => buf.extend_from_slice(b"\\n"),
                b'\r' => buf.extend_from_slice(b"\\r"),
                b'\t' => buf.extend_from_slice(b"\\t"),
                _ => buf.extend_from_slice(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[(b >> 4) as usize],
                    HEX[(b & 0xF) as usize],
                ]),
            }
            i += 1;
            start = i;
            continue;
        }

        let size = if valid_utf8 {
            utf8_width(b)
        } else {
            match decode_width(&value[i..]) {
                Some(size) => size,
                None => {
                    buf.extend_from_slice(&value[start..i]);
                    buf.extend_from_slice(b"\\ufffd");
                    i += 1;
                    start = i;
                    continue;
                }
            }
        };

        // U+2028 LINE SEPARATOR and U+2029 PARAGRAPH SEPARATOR are valid JSON
        // but terminate statements when the output is evaluated as script.
        if size == 3 && b == 0xE2 && value[i + 1] == 0x80 && (value[i + 2] & 0xFE) == 0xA8 {
            buf.extend_from_slice(&value[start..i]);
            buf.extend_from_slice(b"\\u202");
            buf.push(HEX[(value[i + 2] & 0x0F) as usize]);
            i += size;
            start = i;
            continue;
        }

        i += size;
    }

    buf.extend_from_slice(&value[start..]);
}

/// Encoded length implied by a UTF-8 lead byte.
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Length of the valid UTF-8 scalar at the front of `bytes`, if any.
fn decode_width(bytes: &[u8]) -> Option<usize> {
    let size = match bytes[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let candidate = bytes.get(..size)?;
    std::str::from_utf8(candidate).ok().map(|_| size)
}

/// `fmt::Write` adapter that escapes everything written through it.
///
/// Lets `format_args!` output and chrono's delayed formatters stream straight
/// into an event buffer without an intermediate `String`.
pub(crate) struct EscapeWriter<'a> {
    buf: &'a mut Vec<u8>,
    escape_html: bool,
}

impl<'a> EscapeWriter<'a> {
    pub(crate) fn new(buf: &'a mut Vec<u8>, escape_html: bool) -> Self {
        Self { buf, escape_html }
    }
}

impl fmt::Write for EscapeWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        escape_body(self.buf, s.as_bytes(), self.escape_html, true);
        Ok(())
    }
}
