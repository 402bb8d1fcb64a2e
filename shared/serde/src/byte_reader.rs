use crate::error::SerdeErr;

/// Read cursor over a borrowed byte buffer.
///
/// Every read is all-or-nothing: a read that fails leaves the cursor where it
/// was.
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the buffer.
    pub fn peek_remaining(&self) -> &'b [u8] {
        &self.buffer[self.cursor..]
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let Some(byte) = self.buffer.get(self.cursor) else {
            return Err(SerdeErr::Exhausted {
                needed: 1,
                remaining: 0,
            });
        };
        self.cursor += 1;
        Ok(*byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'b [u8], SerdeErr> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(SerdeErr::Exhausted {
                needed: count,
                remaining,
            });
        }
        let start = self.cursor;
        self.cursor += count;
        Ok(&self.buffer[start..self.cursor])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let bytes = self.read_bytes(N)?;
        let mut output = [0u8; N];
        output.copy_from_slice(bytes);
        Ok(output)
    }

    /// Moves the cursor forward by `count` bytes that were already inspected
    /// through [`ByteReader::peek_remaining`].
    pub(crate) fn advance(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.buffer.len());
    }
}
