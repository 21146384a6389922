//! Request and response bodies.
//!
//! A body is either a complete string or a pull-based, finite stream of
//! opaque chunks. Streams are not restartable: once consumed they are gone.

use crate::error::StreamError;
use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::fmt;

/// One piece of a streamed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Raw bytes, not necessarily valid UTF-8 on their own.
    Bytes(Bytes),
    /// Already decoded text.
    Text(String),
}

impl From<Bytes> for Chunk {
    fn from(bytes: Bytes) -> Self {
        Chunk::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(bytes: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Chunk {
    fn from(bytes: &'static [u8]) -> Self {
        Chunk::Bytes(Bytes::from_static(bytes))
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

/// A one-shot stream of body chunks.
pub type ChunkStream = BoxStream<'static, Result<Chunk, StreamError>>;

/// A complete string or a stream of chunks.
pub enum Body {
    /// The whole body as one string.
    Text(String),
    /// A lazy sequence of chunks, consumed exactly once.
    Stream(ChunkStream),
}

impl Body {
    /// A complete string body.
    pub fn text(text: impl Into<String>) -> Self {
        Body::Text(text.into())
    }

    /// A streamed body from any chunk source.
    pub fn stream<S>(source: S) -> Self
    where
        S: Stream<Item = Result<Chunk, StreamError>> + Send + 'static,
    {
        Body::Stream(source.boxed())
    }

    /// A streamed body over chunks that are already in memory.
    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        I::IntoIter: Send + 'static,
        C: Into<Chunk> + Send + 'static,
    {
        Body::stream(stream::iter(chunks).map(|chunk| Ok(chunk.into())))
    }

    /// Returns the text if this is a complete string body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Stream(_) => f.debug_tuple("Stream").finish_non_exhaustive(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}
