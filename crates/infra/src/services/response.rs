//! Response handling shared by every domain service

use hyper::ext::ReasonPhrase;
use nfield_domain::{ErrorKind, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::InfraError;

/// Turn an error status into the matching taxonomy error.
///
/// Must run before the body is read so that no deserialization is attempted
/// for a failed call. The error carries the reason phrase from the server's
/// status line, or the canonical phrase when the server sent the standard one.
pub fn validate_status_code(response: &Response) -> Result<()> {
    let server_reason = response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
    check_status(response.status(), server_reason)
}

/// Deserialize a JSON response body.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|err| InfraError::from(err).into())
}

fn check_status(status: StatusCode, server_reason: Option<String>) -> Result<()> {
    match ErrorKind::from_status(status.as_u16()) {
        Some(kind) => {
            let reason = server_reason
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| canonical_reason(status));
            warn!(%status, ?kind, %reason, "request rejected by server");
            Err(kind.into_error(reason))
        }
        None => Ok(()),
    }
}

fn canonical_reason(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

/// Serve one HTTP/1.1 exchange answering with `status_line` and no body.
#[cfg(test)]
pub(crate) fn serve_status_line(status_line: &'static str) -> std::net::SocketAddr {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut content_length = 0;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        write!(stream, "{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").unwrap();
        stream.flush().unwrap();
    });

    addr
}
