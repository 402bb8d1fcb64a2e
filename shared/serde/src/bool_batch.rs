//! Packed-boolean batches.
//!
//! Booleans are registered in schema order, packed eight to a byte (most
//! significant bit first) and written as one block: a varint32 count followed
//! by `ceil(count / 8)` bytes. The decode side reads the whole block up front
//! and hands the booleans back in the same order. The format is positional:
//! nothing on the wire says which boolean belongs to which field.
//!
//! This block layout is not the one used by encoders that flush each run of
//! packed booleans at the field position where it occurs, without a count.
//! Streams from such encoders cannot be read here, and streams written here
//! cannot be read by them.

use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    varint::{read_varint32, varint64_length, write_varint32},
};

/// Number of packed bytes needed for `count` booleans.
pub fn packed_length(count: usize) -> usize {
    count.div_ceil(8)
}

fn bit_at(packed: &[u8], index: usize) -> bool {
    packed[index / 8] & (0x80 >> (index % 8)) != 0
}

/// Collects booleans during the encode-side collect pass.
#[derive(Debug, Default, Clone)]
pub struct BoolEncoder {
    bools: Vec<bool>,
}

impl BoolEncoder {
    pub fn new() -> Self {
        Self { bools: Vec::new() }
    }

    pub fn encode_bool(&mut self, value: bool) {
        self.bools.push(value);
    }

    pub fn len(&self) -> usize {
        self.bools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bools.is_empty()
    }

    /// Packs the registered booleans. No further booleans can be registered.
    pub fn cook(self) -> CookedBools {
        let mut packed = Vec::with_capacity(packed_length(self.bools.len()));
        let mut scratch: u8 = 0;
        let mut scratch_index: u8 = 0;

        for bit in &self.bools {
            scratch <<= 1;
            if *bit {
                scratch |= 1;
            }
            scratch_index += 1;

            if scratch_index == 8 {
                packed.push(scratch);
                scratch = 0;
                scratch_index = 0;
            }
        }

        if scratch_index > 0 {
            packed.push(scratch << (8 - scratch_index));
        }

        CookedBools {
            packed,
            count: self.bools.len(),
            replayed: 0,
        }
    }
}

/// A finalized batch: the packed block plus a replay cursor for the write pass.
#[derive(Debug, Clone)]
pub struct CookedBools {
    packed: Vec<u8>,
    count: usize,
    replayed: usize,
}

impl CookedBools {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    /// Bytes the block occupies on the wire, count prefix included.
    pub fn block_length(&self) -> usize {
        varint64_length(self.count as u64) + self.packed.len()
    }

    pub fn write_block(&self, writer: &mut dyn ByteWrite) -> Result<(), SerdeErr> {
        write_varint32(writer, self.count as u32)?;
        writer.write_bytes(&self.packed)
    }

    /// Steps past the next boolean, checking it against `value`.
    pub fn replay(&mut self, value: bool) -> Result<(), SerdeErr> {
        if self.replayed >= self.count {
            return Err(SerdeErr::BoolBatchExhausted { count: self.count });
        }
        let index = self.replayed;
        self.replayed += 1;
        if bit_at(&self.packed, index) != value {
            return Err(SerdeErr::BoolReplayMismatch { index });
        }
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.count - self.replayed
    }
}

/// Reads a packed block and replays its booleans in order.
#[derive(Debug, Clone)]
pub struct BoolDecoder<'b> {
    packed: &'b [u8],
    count: usize,
    read: usize,
}

impl<'b> BoolDecoder<'b> {
    /// A decoder holding no booleans.
    pub fn empty() -> Self {
        Self {
            packed: &[],
            count: 0,
            read: 0,
        }
    }

    pub fn read_block(reader: &mut ByteReader<'b>, max_bools: usize) -> Result<Self, SerdeErr> {
        let count = read_varint32(reader)? as usize;
        if count > max_bools {
            return Err(SerdeErr::LengthLimit {
                length: count as u64,
                limit: max_bools as u64,
            });
        }
        let packed = reader.read_bytes(packed_length(count))?;
        Ok(Self {
            packed,
            count,
            read: 0,
        })
    }

    pub fn read_bool(&mut self) -> Result<bool, SerdeErr> {
        if self.read >= self.count {
            return Err(SerdeErr::BoolBatchExhausted { count: self.count });
        }
        let value = bit_at(self.packed, self.read);
        self.read += 1;
        Ok(value)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn remaining(&self) -> usize {
        self.count - self.read
    }
}
