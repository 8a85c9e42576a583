//! Byte streams passed between the HTTP layer and the storage engine.

use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use futures::stream::{self, StreamExt};

/// A byte stream type used for reading and writing file contents.
///
/// Uploads receive one from the request body; downloads hand one back that
/// owns the open file handle.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Wrap an in-memory list of chunks as a [`ByteStream`].
pub fn into_byte_stream<I>(chunks: I) -> ByteStream
where
    I: IntoIterator<Item = Bytes>,
    I::IntoIter: Send + 'static,
{
    Box::pin(stream::iter(chunks).map(Ok))
}
