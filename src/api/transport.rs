// ============================================================================
// src/api/transport.rs – blocking HTTP over TCP or a Unix socket
// ============================================================================

use super::{ApiError, SECRET_HEADER};
use crate::config::ApiCfg;
use anyhow::{anyhow, Result};
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::time::Duration;

pub const UNIX_PROTOCOL: &str = "http+unix://";
const HTTP_PROTOCOL: &str = "http://";
const HTTPS_PROTOCOL: &str = "https://";

/// Status and body of one exchange; headers are consumed in transit.
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The internal API listens either on loopback TCP or on a Unix socket.
/// reqwest covers the TCP leg; the socket leg is a plain HTTP/1.1 exchange
/// over a UnixStream since reqwest's blocking client cannot dial one.
pub enum Transport {
    Tcp {
        http: reqwest::blocking::Client,
        base: String,
        user: Option<String>,
        password: Option<String>,
    },
    Unix {
        socket: PathBuf,
        timeout: Duration,
    },
}

impl Transport {
    pub fn from_config(cfg: &ApiCfg) -> Result<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);

        if let Some(path) = cfg.url.strip_prefix(UNIX_PROTOCOL) {
            if path.is_empty() {
                return Err(anyhow!("empty socket path in api.url"));
            }
            return Ok(Transport::Unix {
                socket: PathBuf::from(path),
                timeout,
            });
        }

        if cfg.url.starts_with(HTTP_PROTOCOL) || cfg.url.starts_with(HTTPS_PROTOCOL) {
            let http = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;
            return Ok(Transport::Tcp {
                http,
                base: cfg.url.trim_end_matches('/').to_string(),
                user: cfg.user.clone(),
                password: cfg.password.clone(),
            });
        }

        Err(anyhow!("unsupported protocol in api.url: {}", cfg.url))
    }

    pub fn get(&self, path: &str, secret_b64: Option<&str>) -> Result<RawResponse, ApiError> {
        match self {
            Transport::Tcp {
                http,
                base,
                user,
                password,
            } => {
                let mut req = http
                    .get(format!("{base}{path}"))
                    .header("Accept", "application/json");
                if let Some(secret) = secret_b64 {
                    req = req.header(SECRET_HEADER, secret);
                }
                if let (Some(user), Some(password)) = (user, password) {
                    req = req.basic_auth(user, Some(password));
                }

                let resp = req.send().map_err(|err| {
                    tracing::debug!(error = %err, "internal API request failed");
                    ApiError::Unreachable
                })?;
                let status = resp.status().as_u16();
                let body = resp.bytes().map_err(|_| ApiError::Unreachable)?.to_vec();
                Ok(RawResponse { status, body })
            }
            Transport::Unix { socket, timeout } => {
                let mut stream = UnixStream::connect(socket).map_err(|err| {
                    tracing::debug!(error = %err, socket = %socket.display(), "socket connect failed");
                    ApiError::Unreachable
                })?;
                stream
                    .set_read_timeout(Some(*timeout))
                    .and_then(|()| stream.set_write_timeout(Some(*timeout)))
                    .map_err(|_| ApiError::Unreachable)?;

                let mut request = format!(
                    "GET {path} HTTP/1.1\r\nHost: localhost\r\nAccept: application/json\r\nConnection: close\r\n"
                );
                if let Some(secret) = secret_b64 {
                    request.push_str(&format!("{SECRET_HEADER}: {secret}\r\n"));
                }
                request.push_str("\r\n");

                stream
                    .write_all(request.as_bytes())
                    .map_err(|_| ApiError::Unreachable)?;

                let mut raw = Vec::new();
                stream
                    .read_to_end(&mut raw)
                    .map_err(|_| ApiError::Unreachable)?;

                parse_response(&raw)
            }
        }
    }
}

/// Minimal HTTP/1.1 response reader for the socket leg. Understands
/// Content-Length, chunked bodies, and close-delimited bodies.
fn parse_response(raw: &[u8]) -> Result<RawResponse, ApiError> {
    let header_end = find_header_end(raw).ok_or(ApiError::Malformed)?;
    let head = std::str::from_utf8(&raw[..header_end]).map_err(|_| ApiError::Malformed)?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().ok_or(ApiError::Malformed)?;
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or(ApiError::Malformed)?;

    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().ok();
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && value.eq_ignore_ascii_case("chunked")
        {
            chunked = true;
        }
    }

    let rest = &raw[header_end + 4..];
    let body = if chunked {
        dechunk(rest)?
    } else if let Some(len) = content_length {
        rest.get(..len).ok_or(ApiError::Malformed)?.to_vec()
    } else {
        rest.to_vec()
    };

    Ok(RawResponse { status, body })
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn dechunk(mut rest: &[u8]) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    loop {
        let line_end = rest
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or(ApiError::Malformed)?;
        let size_str = std::str::from_utf8(&rest[..line_end]).map_err(|_| ApiError::Malformed)?;
        let size = usize::from_str_radix(size_str.trim(), 16).map_err(|_| ApiError::Malformed)?;
        rest = &rest[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        let chunk = rest.get(..size).ok_or(ApiError::Malformed)?;
        body.extend_from_slice(chunk);
        rest = rest.get(size + 2..).ok_or(ApiError::Malformed)?;
    }
}
