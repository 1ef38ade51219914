//! Byte sources the decoder can be driven from.

use crate::error::BrainError;
use bytes::{Buf, Bytes, BytesMut};
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

const DEFAULT_CHUNK_SIZE: usize = 64;

/// A non-blocking supplier of bytes.
pub trait ByteSource {
    /// Next available byte, `Ok(None)` if nothing is available right now.
    fn poll_byte(&mut self) -> Result<Option<u8>, BrainError>;
}

macro_rules! impl_buf_source {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteSource for $ty {
                fn poll_byte(&mut self) -> Result<Option<u8>, BrainError> {
                    Ok(self.has_remaining().then(|| self.get_u8()))
                }
            }
        )*
    };
}

impl_buf_source!(Bytes, BytesMut, VecDeque<u8>, &[u8]);

/// Adapts any [`Read`] (serial port, file, pipe) into a [`ByteSource`].
///
/// Timeouts and `WouldBlock` count as "no byte available"; a zero-length read
/// means the source is closed.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pending: BytesMut,
    chunk_size: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            pending: BytesMut::with_capacity(chunk_size),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Bytes already read from the reader but not yet handed out
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Refill `pending` in place; only called once it has been drained.
    fn fill(&mut self) -> Result<bool, BrainError> {
        self.pending.clear();
        self.pending.resize(self.chunk_size, 0);
        let result = self.reader.read(&mut self.pending);
        self.pending.truncate(*result.as_ref().unwrap_or(&0));

        match result {
            Ok(0) => Err(BrainError::Disconnected),
            Ok(_) => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn poll_byte(&mut self) -> Result<Option<u8>, BrainError> {
        if !self.pending.has_remaining() && !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.pending.get_u8()))
    }
}
