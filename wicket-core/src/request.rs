//! The inbound request and its body reader.

use crate::{
    body::{Body, Chunk},
    error::{BodyError, RequestError},
    headers::{HeaderValue, Headers},
};
use futures::StreamExt;
use std::sync::{Mutex, PoisonError};

/// An inbound request.
///
/// The request is immutable once built. A streamed body can be read only once;
/// see [`read_body`].
#[derive(Debug)]
pub struct Request {
    method: String,
    url: String,
    headers: Headers,
    body: Mutex<Option<Body>>,
}

impl Request {
    /// Create a request with an empty body and no headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: Mutex::new(Some(Body::Text(String::new()))),
        }
    }

    /// Build a request from raw host parts, rejecting a missing url or method.
    pub fn from_parts(
        method: Option<String>,
        url: Option<String>,
        headers: Headers,
        body: Body,
    ) -> Result<Self, RequestError> {
        let url = url.ok_or(RequestError::MissingUrl)?;
        let method = method.ok_or(RequestError::MissingMethod)?;
        Ok(Self::new(method, url).with_headers(headers).with_body(body))
    }

    /// Replace the headers.
    pub fn with_headers(self, headers: Headers) -> Self {
        Self { headers, ..self }
    }

    /// Set a single header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replace the body.
    pub fn with_body(self, body: impl Into<Body>) -> Self {
        Self {
            body: Mutex::new(Some(body.into())),
            ..self
        }
    }

    /// The request method, as sent.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request url: path and query, untouched.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    // A string body stays readable; a stream is handed out exactly once.
    fn take_body(&self) -> Result<Body, BodyError> {
        let mut slot = self.body.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(Body::Text(text)) = slot.as_ref() {
            return Ok(Body::Text(text.clone()));
        }
        slot.take().ok_or(BodyError::Consumed)
    }
}

/// Reads the whole request body as a string.
///
/// A string body is returned as-is. A stream is drained: byte chunks are
/// decoded as UTF-8 across chunk boundaries (invalid sequences become U+FFFD)
/// and text chunks are appended verbatim. Reading a stream a second time
/// fails with [`BodyError::Consumed`].
pub async fn read_body(request: &Request) -> Result<String, BodyError> {
    let mut stream = match request.take_body()? {
        Body::Text(text) => return Ok(text),
        Body::Stream(stream) => stream,
    };

    let mut decoder = Utf8Decoder::default();
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk? {
            Chunk::Text(part) => text.push_str(&part),
            Chunk::Bytes(bytes) => decoder.write(&bytes, &mut text),
        }
    }
    decoder.end(&mut text);
    Ok(text)
}

/// The client address: the first entry of a single-valued `x-forwarded-for`
/// header, otherwise the transport's remote address.
pub fn client_ip(headers: &Headers, remote: Option<&str>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(HeaderValue::as_str) {
        let first = forwarded.split(',').next().unwrap_or_default();
        return first.trim().to_string();
    }
    remote.unwrap_or("<unknown>").to_string()
}

#[derive(Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn write(&mut self, bytes: &[u8], out: &mut String) {
        self.pending.extend_from_slice(bytes);
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    out.push_str(valid);
                    self.pending.clear();
                    return;
                }
                Err(error) => {
                    let valid = error.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match error.error_len() {
                        Some(invalid) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + invalid);
                        }
                        // Incomplete sequence at the end; wait for the next chunk.
                        None => {
                            self.pending.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn end(self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push_str(&String::from_utf8_lossy(&self.pending));
        }
    }
}
