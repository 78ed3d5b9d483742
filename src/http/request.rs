//! Request head parsing.
//!
//! # Responsibilities
//! - Read one request head (request-line + header lines + blank line) from
//!   an inbound connection, within bounds
//! - Produce the immutable [`RequestView`] the detection pipeline consumes
//!
//! # Design Decisions
//! - Header lines are kept verbatim and in order; duplicates are preserved
//!   because they feed the forwarded request unmodified
//! - The head is read as raw bytes and converted lossily; a client sending
//!   non-UTF-8 bytes is still scored and answered, never dropped
//! - Header count and line length are capped; excess is dropped, never an
//!   error (the feature statistics were trained on capped views)
//! - `Content-Length` parse failures fall back to 0 rather than failing the
//!   request; only an unusable request-line is a hard parse error

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Maximum number of retained header lines. Further lines are read and
/// discarded so the stream stays positioned at the request body.
pub const MAX_HEADER_LINES: usize = 20;

/// Maximum retained length of a single head line, in bytes.
pub const MAX_LINE_LEN: usize = 1024;

/// Request head parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Request-line had fewer than two whitespace-delimited segments.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Canonical, immutable view of one inbound request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    /// Request method token (verbatim, case preserved).
    pub method: String,
    /// Request-target up to the first `?`.
    pub path: String,
    /// Request-target after the first `?`, empty when absent.
    pub query: String,
    /// Trimmed `User-Agent` value, if the header was present.
    pub user_agent: Option<String>,
    /// Parsed `Content-Length` value; unparseable values collapse to 0.
    pub content_length: u64,
    /// Raw header lines in arrival order, duplicates preserved.
    pub header_lines: Vec<String>,
}

impl RequestView {
    /// Build a view from an already-read request line and header lines.
    pub fn from_head(request_line: &str, header_lines: Vec<String>) -> Result<Self, ParseError> {
        let mut segments = request_line.split_whitespace();
        let method = segments
            .next()
            .ok_or_else(|| ParseError::MalformedRequestLine(request_line.to_string()))?;
        let target = segments
            .next()
            .ok_or_else(|| ParseError::MalformedRequestLine(request_line.to_string()))?;
        // third segment is the protocol version, discarded

        let (path, query) = match target.split_once('?') {
            Some((p, q)) => (p.to_string(), q.to_string()),
            None => (target.to_string(), String::new()),
        };

        let mut user_agent = None;
        let mut content_length = 0u64;
        for line in &header_lines {
            if let Some(rest) = strip_prefix_ci(line, "User-Agent:") {
                user_agent = Some(rest.trim().to_string());
            } else if let Some(rest) = strip_prefix_ci(line, "Content-Length:") {
                content_length = rest.trim().parse().unwrap_or(0);
            }
        }

        Ok(Self {
            method: method.to_string(),
            path,
            query,
            user_agent,
            content_length,
            header_lines,
        })
    }
}

/// Read one request head from the stream: the request line plus header
/// lines up to the first blank line.
///
/// The head is read as raw bytes; sequences that are not valid UTF-8 are
/// replaced so obfuscated payloads still reach the scorer instead of
/// failing the read. Returns `None` when the peer closed the connection
/// before sending a request line. At most [`MAX_LINE_LEN`] bytes of any
/// line are buffered and headers beyond [`MAX_HEADER_LINES`] are dropped.
pub async fn read_head<R>(reader: &mut R) -> std::io::Result<Option<(String, Vec<String>)>>
where
    R: AsyncBufRead + Unpin,
{
    let mut request_line = None;
    let mut header_lines = Vec::new();

    loop {
        let line = match read_capped_line(reader).await? {
            Some(line) => line,
            // EOF: a partial head still yields what was read
            None => break,
        };
        if line.is_empty() {
            if request_line.is_none() {
                // tolerate leading blank lines before the request line
                continue;
            }
            break;
        }
        match request_line {
            None => request_line = Some(line),
            Some(_) => {
                if header_lines.len() < MAX_HEADER_LINES {
                    header_lines.push(line);
                }
            }
        }
    }

    Ok(request_line.map(|rl| (rl, header_lines)))
}

/// Read one head line, buffering at most [`MAX_LINE_LEN`] bytes of it; the
/// remainder of an overlong line is consumed and dropped so the stream
/// stays positioned at the next line. Invalid UTF-8 is replaced, the line
/// is trimmed, and `None` signals EOF before any byte of the line.
async fn read_capped_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::new();
    let mut limited = (&mut *reader).take(MAX_LINE_LEN as u64 + 1);
    let n = limited.read_until(b'\n', &mut raw).await?;
    if n == 0 {
        return Ok(None);
    }
    if raw.last() != Some(&b'\n') && n > MAX_LINE_LEN {
        discard_to_newline(reader).await?;
    }
    raw.truncate(MAX_LINE_LEN);
    Ok(Some(String::from_utf8_lossy(&raw).trim().to_string()))
}

/// Consume stream bytes up to and including the next `\n` (or EOF).
async fn discard_to_newline<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

/// Case-insensitive prefix strip over ASCII.
pub(crate) fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let (head, rest) = line.split_at_checked(prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn parses_method_path_query() {
        let view = RequestView::from_head("GET /a/b?x=1&y=2 HTTP/1.1", vec![]).unwrap();
        assert_eq!(view.method, "GET");
        assert_eq!(view.path, "/a/b");
        assert_eq!(view.query, "x=1&y=2");
    }

    #[test]
    fn missing_query_yields_empty_string() {
        let view = RequestView::from_head("GET /plain HTTP/1.1", vec![]).unwrap();
        assert_eq!(view.path, "/plain");
        assert_eq!(view.query, "");
    }

    #[test]
    fn version_is_optional() {
        let view = RequestView::from_head("GET /x", vec![]).unwrap();
        assert_eq!(view.path, "/x");
    }

    #[test]
    fn target_stops_at_second_space() {
        // raw SQLi payloads carry literal spaces; everything after the
        // second space is treated as protocol trailer
        let view =
            RequestView::from_head("GET /admin/login?user=admin' OR 1=1 -- HTTP/1.1", vec![])
                .unwrap();
        assert_eq!(view.path, "/admin/login");
        assert_eq!(view.query, "user=admin'");
    }

    #[test]
    fn single_token_line_is_malformed() {
        let err = RequestView::from_head("BADLINE", vec![]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedRequestLine(_)));
    }

    #[test]
    fn empty_line_is_malformed() {
        assert!(RequestView::from_head("", vec![]).is_err());
    }

    #[test]
    fn user_agent_and_content_length_are_indexed() {
        let headers = vec![
            "Host: example.com".to_string(),
            "user-agent:  sqlmap/1.0 ".to_string(),
            "Content-Length: 42".to_string(),
        ];
        let view = RequestView::from_head("POST /upload HTTP/1.1", headers).unwrap();
        assert_eq!(view.user_agent.as_deref(), Some("sqlmap/1.0"));
        assert_eq!(view.content_length, 42);
        assert_eq!(view.header_lines.len(), 3);
    }

    #[test]
    fn bad_content_length_falls_back_to_zero() {
        let headers = vec!["Content-Length: banana".to_string()];
        let view = RequestView::from_head("POST / HTTP/1.1", headers).unwrap();
        assert_eq!(view.content_length, 0);
    }

    #[tokio::test]
    async fn read_head_splits_request_line_and_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: h\r\nAccept: */*\r\n\r\nBODY".to_vec();
        let mut reader = BufReader::new(std::io::Cursor::new(raw));
        let (line, headers) = read_head(&mut reader).await.unwrap().unwrap();
        assert_eq!(line, "GET / HTTP/1.1");
        assert_eq!(headers, vec!["Host: h".to_string(), "Accept: */*".to_string()]);
    }

    #[tokio::test]
    async fn read_head_caps_header_count() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..50 {
            raw.push_str(&format!("X-H{i}: v\r\n"));
        }
        raw.push_str("\r\n");
        let mut reader = BufReader::new(std::io::Cursor::new(raw.into_bytes()));
        let (_, headers) = read_head(&mut reader).await.unwrap().unwrap();
        assert_eq!(headers.len(), MAX_HEADER_LINES);
    }

    #[tokio::test]
    async fn read_head_accepts_non_utf8_bytes() {
        let raw = b"GET /index.html HTTP/1.1\r\nReferer: /caf\xE9\r\n\r\n".to_vec();
        let mut reader = BufReader::new(std::io::Cursor::new(raw));
        let (line, headers) = read_head(&mut reader).await.unwrap().unwrap();
        assert_eq!(line, "GET /index.html HTTP/1.1");
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("Referer: /caf"));
    }

    #[tokio::test]
    async fn read_head_bounds_line_buffering_and_resynchronizes() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(8 * MAX_LINE_LEN));
        raw.extend_from_slice(b"\r\nHost: h\r\n\r\n");
        let mut reader = BufReader::new(std::io::Cursor::new(raw));
        let (line, headers) = read_head(&mut reader).await.unwrap().unwrap();
        assert_eq!(line, "GET / HTTP/1.1");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].len(), MAX_LINE_LEN);
        assert_eq!(headers[1], "Host: h");
    }

    #[tokio::test]
    async fn read_head_on_closed_stream_is_none() {
        let mut reader = BufReader::new(std::io::Cursor::new(Vec::new()));
        assert!(read_head(&mut reader).await.unwrap().is_none());
    }
}
