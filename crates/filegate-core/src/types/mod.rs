//! Core type definitions shared across the FileGate workspace.

pub mod stream;

pub use stream::{ByteStream, into_byte_stream};
