//! Minimal HTTP/1.1 transport over raw sockets.
//!
//! Used when the reqwest capability is unavailable. One connection per
//! request with `Connection: close`; TLS through `native-tls` for `https`.
//! Responses may be delimited by `Content-Length`, chunked encoding, or
//! connection close. Redirects are returned as-is and bodies are read as
//! UTF-8 with invalid bytes replaced; the `charset` parameter is ignored.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use native_tls::TlsConnector;
use sailthru_core::{PreparedRequest, Transport};
use sailthru_domain::{Result, SailthruError};
use tracing::debug;
use url::{Position, Url};

use crate::errors::EndpointResultExt;

/// Socket-level fallback transport.
#[derive(Debug, Clone, Default)]
pub struct SocketTransport {
    timeout: Option<Duration>,
}

impl SocketTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn connect(&self, url: &Url, endpoint: &str) -> Result<TcpStream> {
        let addrs = url.socket_addrs(|| None).at_endpoint(endpoint)?;

        let mut last_error = io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses");
        for addr in addrs {
            let attempt = match self.timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(self.timeout).at_endpoint(endpoint)?;
                    stream.set_write_timeout(self.timeout).at_endpoint(endpoint)?;
                    return Ok(stream);
                }
                Err(err) => last_error = err,
            }
        }
        Err(last_error).at_endpoint(endpoint)
    }
}

impl Transport for SocketTransport {
    fn name(&self) -> &'static str {
        "socket"
    }

    fn execute(&self, request: &PreparedRequest) -> Result<String> {
        let endpoint = request.endpoint();
        let url = Url::parse(request.url())
            .map_err(|e| SailthruError::transport(endpoint, format!("invalid URL: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| SailthruError::transport(endpoint, "URL has no host"))?
            .to_string();

        let wire = render_request(request, &url, &host);
        debug!(url = endpoint, method = %request.method(), "sending HTTP request");

        let stream = self.connect(&url, endpoint)?;
        let raw = match url.scheme() {
            "http" => exchange(stream, &wire).at_endpoint(endpoint)?,
            "https" => {
                let connector = TlsConnector::new().at_endpoint(endpoint)?;
                let domain = host.trim_start_matches('[').trim_end_matches(']');
                let tls = connector
                    .connect(domain, stream)
                    .map_err(|e| SailthruError::transport(endpoint, format!("TLS handshake failed: {e}")))?;
                exchange(tls, &wire).at_endpoint(endpoint)?
            }
            other => {
                return Err(SailthruError::transport(endpoint, format!("unsupported URL scheme: {other}")));
            }
        };

        let response = parse_response(&raw).map_err(|message| SailthruError::transport(endpoint, message))?;
        debug!(url = endpoint, status = response.status, bytes = response.body.len(), "received HTTP response");

        if response.body.is_empty() {
            return Err(SailthruError::transport(endpoint, "empty response body"));
        }
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}

fn render_request(request: &PreparedRequest, url: &Url, host: &str) -> Vec<u8> {
    let target = &url[Position::BeforePath..Position::AfterQuery];
    let host_header = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let mut head = format!("{} {} HTTP/1.1\r\nHost: {host_header}\r\n", request.method(), target);
    for (name, value) in request.headers() {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("Accept: */*\r\n");
    if let Some(body) = request.body() {
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    head.push_str("Connection: close\r\n\r\n");

    let mut wire = head.into_bytes();
    if let Some(body) = request.body() {
        wire.extend_from_slice(body.as_bytes());
    }
    wire
}

fn exchange<S: Read + Write>(mut stream: S, wire: &[u8]) -> io::Result<Vec<u8>> {
    stream.write_all(wire)?;
    stream.flush()?;

    let mut raw = Vec::new();
    match stream.read_to_end(&mut raw) {
        Ok(_) => Ok(raw),
        // Servers that skip the TLS close_notify end the stream this way.
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && !raw.is_empty() => Ok(raw),
        Err(err) => Err(err),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

fn parse_response(raw: &[u8]) -> std::result::Result<RawResponse, String> {
    let split = find(raw, b"\r\n\r\n").ok_or("malformed HTTP response: no header terminator")?;
    let head = std::str::from_utf8(&raw[..split]).map_err(|_| "malformed HTTP response headers")?;
    let payload = &raw[split + 4..];

    let mut lines = head.split("\r\n");
    let status = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or("malformed HTTP status line")?;

    let mut content_length = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else { continue };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().ok();
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = value.to_ascii_lowercase().contains("chunked");
        }
    }

    let body = if chunked {
        decode_chunked(payload)?
    } else if let Some(length) = content_length {
        payload.get(..length).ok_or("truncated HTTP response body")?.to_vec()
    } else {
        payload.to_vec()
    };

    Ok(RawResponse { status, body })
}

fn decode_chunked(mut payload: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let mut body = Vec::new();
    loop {
        let line_end = find(payload, b"\r\n").ok_or("malformed chunk size line")?;
        let size_line = std::str::from_utf8(&payload[..line_end]).map_err(|_| "malformed chunk size line")?;
        let size_hex = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_hex, 16).map_err(|_| format!("invalid chunk size: {size_hex}"))?;
        payload = &payload[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        let chunk = payload.get(..size).ok_or("truncated chunk")?;
        body.extend_from_slice(chunk);
        payload = payload.get(size + 2..).ok_or("truncated chunk")?;
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use sailthru_domain::{HttpMethod, ParameterMap};

    use super::*;

    #[test]
    fn renders_get_request_line_with_query() {
        let params = ParameterMap::new().with("list", "vip");
        let request = PreparedRequest::new(HttpMethod::Get, "http://localhost:8080/list", &params, "UA");
        let url = Url::parse(request.url()).unwrap();

        let wire = String::from_utf8(render_request(&request, &url, "localhost")).unwrap();
        assert!(wire.starts_with("GET /list?list=vip HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: UA\r\n"));
        assert!(!wire.contains("Content-Length"));
        assert!(wire.ends_with("Connection: close\r\n\r\n"));
    }

    #[test]
    fn renders_post_body_with_length() {
        let params = ParameterMap::new().with("email", "a@b.com");
        let request = PreparedRequest::new(HttpMethod::Post, "https://api.sailthru.com/email", &params, "UA");
        let url = Url::parse(request.url()).unwrap();

        let wire = String::from_utf8(render_request(&request, &url, "api.sailthru.com")).unwrap();
        assert!(wire.starts_with("POST /email HTTP/1.1\r\nHost: api.sailthru.com\r\n"));
        assert!(wire.contains("Content-Type: application/x-www-form-urlencoded\r\n"));
        assert!(wire.contains("Content-Length: 15\r\n"));
        assert!(wire.ends_with("\r\n\r\nemail=a%40b.com"));
    }

    #[test]
    fn parses_content_length_response() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\n{}trailing";
        assert_eq!(parse_response(raw), Ok(RawResponse { status: 200, body: b"{}".to_vec() }));
    }

    #[test]
    fn parses_chunked_response() {
        let raw = b"HTTP/1.1 400 Bad Request\r\nTransfer-Encoding: chunked\r\n\r\n4;ext=1\r\n{\"er\r\n7\r\nror\":2}\r\n0\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(response.body, br#"{"error":2}"#.to_vec());
    }

    #[test]
    fn reads_until_close_without_length() {
        let raw = b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nhello";
        assert_eq!(parse_response(raw).unwrap().body, b"hello".to_vec());
    }

    #[test]
    fn rejects_malformed_responses() {
        assert!(parse_response(b"garbage").is_err());
        assert!(parse_response(b"HTTP/1.1 abc\r\n\r\n").is_err());
        assert!(parse_response(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nshort").is_err());
        assert!(parse_response(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nzz\r\n").is_err());
    }
}
