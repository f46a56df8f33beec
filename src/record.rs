//! Access-log line tokenizer.
//!
//! A line is split on whitespace, except inside `[...]` and `"..."` spans which
//! are captured whole. Tokens are then assigned positionally following the
//! common / combined log format:
//!
//! ```text
//! host ident user [date] "request" status size "referer" "user-agent"
//! ```
//!
//! Delimiters are stripped only from the date, request, referer and user-agent
//! positions; other fields keep their raw token, so a bracketed host is never
//! mistaken for an address.
//!
//! Inside quotes a backslash escapes the next byte, so `\"` doesn't close the
//! span (Apache writes embedded quotes that way).
//!
//! Tokens borrow the line buffer, so tokenizing never allocates.

/// Tokenizer state while scanning a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Bracket,
    Quote,
}

/// Iterator over the fields of one log line.
pub struct Tokens<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let line = self.line;
        while self.pos < line.len() && is_separator(line[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= line.len() {
            return None;
        }

        let start = self.pos;
        let mut mode = Mode::Plain;
        while self.pos < line.len() {
            match (mode, line[self.pos]) {
                (Mode::Plain, b) if is_separator(b) => break,
                (Mode::Plain, b'[') => mode = Mode::Bracket,
                (Mode::Plain, b'"') => mode = Mode::Quote,
                (Mode::Bracket, b']') => mode = Mode::Plain,
                (Mode::Quote, b'"') => mode = Mode::Plain,
                // escaped byte inside quotes, e.g. `\"` in a user agent
                (Mode::Quote, b'\\') => self.pos += 1,
                _ => {}
            }
            self.pos += 1;
        }
        self.pos = self.pos.min(line.len());

        Some(&line[start..self.pos])
    }
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Strip the opening delimiter of a bracketed or quoted field and its closing
/// counterpart when present. An unterminated span keeps the rest of the line.
fn strip_delimiters(token: &[u8]) -> &[u8] {
    let close = match token.first() {
        Some(b'[') => b']',
        Some(b'"') => b'"',
        _ => return token,
    };
    let inner = &token[1..];
    inner.strip_suffix(&[close]).unwrap_or(inner)
}

#[inline]
pub(crate) fn non_empty(token: &[u8]) -> Option<&[u8]> {
    (!token.is_empty()).then_some(token)
}

/// Fields of one access-log line. Absent fields are `None`, present fields are never empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub remote_host: Option<&'a [u8]>,
    pub identity: Option<&'a [u8]>,
    pub user: Option<&'a [u8]>,
    pub date: Option<&'a [u8]>,
    pub request: Option<&'a [u8]>,
    pub status_code: Option<&'a [u8]>,
    pub object_size: Option<&'a [u8]>,
    pub referer: Option<&'a [u8]>,
    pub user_agent: Option<&'a [u8]>,
}

impl<'a> LogRecord<'a> {
    /// Tokenize a line. Never fails: malformed input yields missing fields.
    pub fn parse(line: &'a [u8]) -> Self {
        let mut tokens = Tokens::new(line);
        let mut next = |spanned: bool| {
            let token = tokens.next()?;
            non_empty(if spanned {
                strip_delimiters(token)
            } else {
                token
            })
        };

        Self {
            remote_host: next(false),
            identity: next(false),
            user: next(false),
            date: next(true),
            request: next(true),
            status_code: next(false),
            object_size: next(false),
            referer: next(true),
            user_agent: next(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const COMMON: &[u8] =
        b"192.0.2.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /index.html HTTP/1.1\" 200 1024";

    #[test]
    fn test_common_log_format() {
        let record = LogRecord::parse(COMMON);
        assert_eq!(record.remote_host, Some(&b"192.0.2.1"[..]));
        assert_eq!(record.identity, Some(&b"-"[..]));
        assert_eq!(record.user, Some(&b"-"[..]));
        assert_eq!(record.date, Some(&b"10/Oct/2023:13:55:36 -0700"[..]));
        assert_eq!(record.request, Some(&b"GET /index.html HTTP/1.1"[..]));
        assert_eq!(record.status_code, Some(&b"200"[..]));
        assert_eq!(record.object_size, Some(&b"1024"[..]));
        assert_eq!(record.referer, None);
        assert_eq!(record.user_agent, None);
    }

    #[test]
    fn test_combined_log_format() {
        let line = b"2001:db8::1 - frank [10/Oct/2023:13:55:36 +0000] \"POST /api HTTP/2.0\" 201 17 \
                     \"https://example.com/a b\" \"Mozilla/5.0 (X11; Linux x86_64)\"\r\n";
        let record = LogRecord::parse(line);
        assert_eq!(record.remote_host, Some(&b"2001:db8::1"[..]));
        assert_eq!(record.user, Some(&b"frank"[..]));
        assert_eq!(record.request, Some(&b"POST /api HTTP/2.0"[..]));
        assert_eq!(record.referer, Some(&b"https://example.com/a b"[..]));
        assert_eq!(
            record.user_agent,
            Some(&b"Mozilla/5.0 (X11; Linux x86_64)"[..])
        );
    }

    #[test]
    fn test_missing_trailing_fields() {
        let record = LogRecord::parse(b"192.0.2.1 - - [10/Oct/2023:13:55:36 -0700]");
        assert_eq!(record.remote_host, Some(&b"192.0.2.1"[..]));
        assert_eq!(record.date, Some(&b"10/Oct/2023:13:55:36 -0700"[..]));
        assert_eq!(record.request, None);
        assert_eq!(record.status_code, None);
        assert_eq!(record.object_size, None);
    }

    #[test_case(b""; "empty line")]
    #[test_case(b"\n"; "newline only")]
    #[test_case(b"   \t  \r\n"; "whitespace only")]
    fn test_blank_lines(line: &[u8]) {
        assert_eq!(LogRecord::parse(line), LogRecord::default());
    }

    #[test]
    fn test_empty_quoted_request_is_missing() {
        let record = LogRecord::parse(b"192.0.2.1 - - [d] \"\" 400 0");
        assert_eq!(record.request, None);
        assert_eq!(record.status_code, Some(&b"400"[..]));
    }

    #[test]
    fn test_unterminated_quote_captures_rest_of_line() {
        let record = LogRecord::parse(b"192.0.2.1 - - [d] \"GET / HTTP/1.1 200 5");
        assert_eq!(record.request, Some(&b"GET / HTTP/1.1 200 5"[..]));
        assert_eq!(record.status_code, None);
    }

    #[test]
    fn test_unterminated_bracket_captures_rest_of_line() {
        let record = LogRecord::parse(b"192.0.2.1 - - [10/Oct/2023:13:55:36 \"GET /\" 200");
        assert_eq!(record.date, Some(&b"10/Oct/2023:13:55:36 \"GET /\" 200"[..]));
        assert_eq!(record.request, None);
    }

    #[test]
    fn test_delimiters_inside_other_spans_are_literal() {
        let record = LogRecord::parse(b"h i u [a \"b] \"GET /[x] HTTP/1.1\" 200 1");
        assert_eq!(record.date, Some(&b"a \"b"[..]));
        assert_eq!(record.request, Some(&b"GET /[x] HTTP/1.1"[..]));
        assert_eq!(record.object_size, Some(&b"1"[..]));
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let record = LogRecord::parse(b"h i u [d] \"GET /\" 200 1 \"-\" \"say \\\"hi\\\"\"");
        assert_eq!(record.user_agent, Some(&b"say \\\"hi\\\""[..]));
    }

    #[test]
    fn test_arbitrary_bytes() {
        let record = LogRecord::parse(b"\xff\xfe \x00 - [\x80] \"\xc3\x28\" 200 1");
        assert_eq!(record.remote_host, Some(&b"\xff\xfe"[..]));
        assert_eq!(record.identity, Some(&b"\x00"[..]));
        assert_eq!(record.user, Some(&b"-"[..]));
        assert_eq!(record.date, Some(&b"\x80"[..]));
        assert_eq!(record.request, Some(&b"\xc3\x28"[..]));
    }

    #[test]
    fn test_trailing_backslash_in_quote() {
        let record = LogRecord::parse(b"h i u [d] \"abc\\");
        assert_eq!(record.request, Some(&b"abc\\"[..]));
    }

    #[test]
    fn test_tokens() {
        let tokens: Vec<&[u8]> = Tokens::new(b"  a\t[b c]  \"d e\"f g ").collect();
        assert_eq!(
            tokens,
            vec![&b"a"[..], &b"[b c]"[..], &b"\"d e\"f"[..], &b"g"[..]]
        );
    }

    #[test]
    fn test_plain_fields_keep_their_delimiters() {
        let record = LogRecord::parse(b"[2001:db8::1] \"-\" [u] [d] \"GET /\" \"200\" [1]");
        assert_eq!(record.remote_host, Some(&b"[2001:db8::1]"[..]));
        assert_eq!(record.identity, Some(&b"\"-\""[..]));
        assert_eq!(record.user, Some(&b"[u]"[..]));
        assert_eq!(record.date, Some(&b"d"[..]));
        assert_eq!(record.request, Some(&b"GET /"[..]));
        assert_eq!(record.status_code, Some(&b"\"200\""[..]));
        assert_eq!(record.object_size, Some(&b"[1]"[..]));
    }

    #[test]
    fn test_escaped_quote_keeps_span_open() {
        let record = LogRecord::parse(b"h i u [d] \"GET /dir\\\" 200 1024");
        assert_eq!(record.request, Some(&b"GET /dir\\\" 200 1024"[..]));
        assert_eq!(record.status_code, None);
        assert_eq!(record.object_size, None);
    }
}
