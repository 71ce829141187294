//! Chunk sequence cursor.
//!
//! The wire representation is an ordered list of byte chunks. This module
//! exposes such a list as one logical stream through [`bytes::Buf`], so the
//! decoder never has to care where a chunk ends.

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A read cursor over an ordered sequence of chunks.
///
/// Reads that straddle a chunk boundary are assembled transparently; reads
/// inside one chunk slice it without copying.
#[derive(Debug, Clone)]
pub struct ChunkCursor {
    /// Chunks in stream order.
    chunks: Vec<Bytes>,
    /// Index of the chunk holding the next unread byte.
    index: usize,
    /// Offset of the next unread byte within that chunk.
    offset: usize,
    /// Total unread bytes.
    remaining: usize,
}

impl ChunkCursor {
    /// Creates a cursor positioned at the start of the first chunk.
    pub fn new(chunks: Vec<Bytes>) -> Self {
        let remaining = chunks.iter().map(Bytes::len).sum();
        let mut cursor = Self {
            chunks,
            index: 0,
            offset: 0,
            remaining,
        };
        cursor.skip_exhausted();
        cursor
    }

    /// Returns the number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.chunks[..self.index.min(self.chunks.len())]
            .iter()
            .map(Bytes::len)
            .sum::<usize>()
            + self.offset
    }

    /// Moves past empty and fully consumed chunks.
    fn skip_exhausted(&mut self) {
        while self.index < self.chunks.len() && self.offset >= self.chunks[self.index].len() {
            self.index += 1;
            self.offset = 0;
        }
    }
}

impl Buf for ChunkCursor {
    fn remaining(&self) -> usize {
        self.remaining
    }

    fn chunk(&self) -> &[u8] {
        match self.chunks.get(self.index) {
            Some(chunk) => &chunk[self.offset..],
            None => &[],
        }
    }

    fn advance(&mut self, mut cnt: usize) {
        assert!(
            cnt <= self.remaining,
            "cannot advance past end of chunk stream: {} > {}",
            cnt,
            self.remaining
        );

        self.remaining -= cnt;
        while cnt > 0 {
            let available = self.chunks[self.index].len() - self.offset;
            if cnt < available {
                self.offset += cnt;
                cnt = 0;
            } else {
                cnt -= available;
                self.index += 1;
                self.offset = 0;
            }
        }
        self.skip_exhausted();
    }

    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        assert!(
            len <= self.remaining,
            "cannot copy past end of chunk stream: {} > {}",
            len,
            self.remaining
        );

        if len == 0 {
            return Bytes::new();
        }

        let available = self.chunk().len();
        if len <= available {
            let bytes = self.chunks[self.index].slice(self.offset..self.offset + len);
            self.advance(len);
            return bytes;
        }

        let mut buf = BytesMut::with_capacity(len);
        buf.put(Buf::take(&mut *self, len));
        buf.freeze()
    }
}
