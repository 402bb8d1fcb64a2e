use crate::error::SerdeErr;

/// A sink for encoded bytes.
///
/// Implemented by [`ByteWriter`], which stores the bytes, and by
/// [`ByteCounter`], which only measures how many would have been written.
pub trait ByteWrite {
    fn write_byte(&mut self, byte: u8) -> Result<(), SerdeErr>;
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerdeErr>;
    fn bytes_written(&self) -> usize;
    fn is_counter(&self) -> bool;
}

/// Growable output buffer, optionally bounded by a capacity.
pub struct ByteWriter {
    buffer: Vec<u8>,
    capacity: Option<usize>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            capacity: None,
        }
    }

    /// Pre-allocates `size_hint` bytes. Does not limit growth.
    pub fn with_size_hint(size_hint: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(size_hint),
            capacity: None,
        }
    }

    /// A writer that fails with [`SerdeErr::CapacityExceeded`] instead of
    /// growing past `capacity` bytes.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            buffer: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn reserve_for(&self, additional: usize) -> Result<(), SerdeErr> {
        if let Some(capacity) = self.capacity {
            let attempted = self.buffer.len() + additional;
            if attempted > capacity {
                return Err(SerdeErr::CapacityExceeded {
                    capacity,
                    attempted,
                });
            }
        }
        Ok(())
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteWriter {
    fn write_byte(&mut self, byte: u8) -> Result<(), SerdeErr> {
        self.reserve_for(1)?;
        self.buffer.push(byte);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerdeErr> {
        self.reserve_for(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.buffer.len()
    }

    fn is_counter(&self) -> bool {
        false
    }
}

/// Counts bytes without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteCounter {
    count: usize,
}

impl ByteCounter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl ByteWrite for ByteCounter {
    fn write_byte(&mut self, _byte: u8) -> Result<(), SerdeErr> {
        self.count += 1;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerdeErr> {
        self.count += bytes.len();
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.count
    }

    fn is_counter(&self) -> bool {
        true
    }
}
