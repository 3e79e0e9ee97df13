//! Minimal HTTP/1.1 request parsing and response encoding.
//!
//! The server only ever answers local `GET`s for a handful of static
//! assets, so this covers exactly that: a request line, headers ignored,
//! `Connection: close` responses.

/// Maximum accepted size of a request head (request line + headers).
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
}

/// Parse the request head (everything before the blank line).
///
/// Returns `None` for a malformed request line. Query strings are
/// stripped from the path; headers are not interpreted.
pub fn parse_request_head(head: &str) -> Option<RequestHead> {
    let request_line = head.lines().next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    parts.next()?; // HTTP version must be present

    let path = target.split('?').next().unwrap_or(target).to_string();
    if !path.starts_with('/') {
        return None;
    }

    Some(RequestHead { method, path })
}

/// Encode a complete response with a body.
pub fn response(status: u16, reason: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {len}\r\n\
         Connection: close\r\n\
         \r\n",
        len = body.len(),
    );
    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}

pub fn not_found() -> Vec<u8> {
    response(404, "Not Found", "text/plain", b"Not Found")
}

pub fn method_not_allowed() -> Vec<u8> {
    response(405, "Method Not Allowed", "text/plain", b"Method Not Allowed")
}

pub fn bad_request() -> Vec<u8> {
    response(400, "Bad Request", "text/plain", b"Bad Request")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_get() {
        let head = parse_request_head("GET / HTTP/1.1\r\nHost: 127.0.0.1:5000\r\n").unwrap();
        assert_eq!(head.method, "GET");
        assert_eq!(head.path, "/");
    }

    #[test]
    fn parses_asset_path() {
        let head = parse_request_head("GET /img/logo.png HTTP/1.1\r\n").unwrap();
        assert_eq!(head.path, "/img/logo.png");
    }

    #[test]
    fn strips_query_string() {
        let head = parse_request_head("GET /index.html?v=2 HTTP/1.1\r\n").unwrap();
        assert_eq!(head.path, "/index.html");
    }

    #[test]
    fn rejects_missing_version() {
        assert!(parse_request_head("GET /\r\n").is_none());
    }

    #[test]
    fn rejects_relative_target() {
        assert!(parse_request_head("GET index.html HTTP/1.1\r\n").is_none());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_request_head("").is_none());
    }

    #[test]
    fn response_has_length_and_body() {
        let bytes = response(200, "OK", "text/html", b"<html>A</html>");
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/html\r\n"));
        assert!(text.contains("Content-Length: 14\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n<html>A</html>"));
    }

    #[test]
    fn canned_responses() {
        assert!(String::from_utf8(not_found()).unwrap().starts_with("HTTP/1.1 404"));
        assert!(String::from_utf8(method_not_allowed())
            .unwrap()
            .starts_with("HTTP/1.1 405"));
        assert!(String::from_utf8(bad_request()).unwrap().starts_with("HTTP/1.1 400"));
    }
}
