// src/core/net.rs
// Minimal HTTP GET over plain TCP, no TLS; both result sites serve plain
// http: on port 80. HTTP/1.0 with `Connection: close` so the server ends
// the stream at the end (no chunked transfer).

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("only plain http:// urls are supported, got {url:?}")]
    UnsupportedUrl { url: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("HTTP error: {status}")]
    Status { status: String },
    #[error("malformed HTTP response")]
    Malformed,
}

/// Split an absolute `http://host[:port]/path` url into connection parts.
fn split_url(url: &str) -> Result<(&str, u16, &str), NetError> {
    let rest = url
        .strip_prefix("http://")
        .ok_or_else(|| NetError::UnsupportedUrl { url: s!(url) })?;
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    let (host, port) = match authority.split_once(':') {
        Some((h, p)) => {
            let port = p
                .parse()
                .map_err(|_| NetError::UnsupportedUrl { url: s!(url) })?;
            (h, port)
        }
        None => (authority, 80),
    };
    if host.is_empty() {
        return Err(NetError::UnsupportedUrl { url: s!(url) });
    }
    Ok((host, port, path))
}

/// Perform a plain HTTP GET request and return the response body.
///
/// This function:
/// 1. Connects via TCP with read/write timeouts.
/// 2. Sends a simple HTTP/1.0 GET request with `Connection: close`.
/// 3. Reads until EOF.
/// 4. Checks for a 200 status line.
/// 5. Returns the body after the header section.
pub fn http_get(url: &str, timeout: Duration) -> Result<String, NetError> {
    let (host, port, path) = split_url(url)?;

    let mut stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: swim_scrape/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    stream.write_all(req.as_bytes())?;
    stream.flush()?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(NetError::Status { status: s!(status) });
    }

    let body_idx = resp.find("\r\n\r\n").ok_or(NetError::Malformed)? + 4;
    Ok(resp[body_idx..].to_string())
}
