//! Unsigned LEB128 varints and the zigzag mapping used for signed values.

use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr};

pub const MAX_VARINT32_BYTES: usize = 5;
pub const MAX_VARINT64_BYTES: usize = 10;

const PAYLOAD_MASK: u8 = 0x7F;
const CONTINUATION_BIT: u8 = 0x80;

pub fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

pub fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

pub fn zigzag_encode64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

pub fn write_varint32(writer: &mut dyn ByteWrite, value: u32) -> Result<(), SerdeErr> {
    write_varint64(writer, u64::from(value))
}

pub fn write_varint64(writer: &mut dyn ByteWrite, value: u64) -> Result<(), SerdeErr> {
    let mut scratch = [0u8; MAX_VARINT64_BYTES];
    let length = encode_varint(value, &mut scratch);
    writer.write_bytes(&scratch[..length])
}

/// Reads at most [`MAX_VARINT32_BYTES`]; bits above 32 in the final byte are
/// discarded.
pub fn read_varint32(reader: &mut ByteReader) -> Result<u32, SerdeErr> {
    let (value, length) = decode_varint(reader.peek_remaining(), MAX_VARINT32_BYTES)?;
    reader.advance(length);
    Ok(value as u32)
}

pub fn read_varint64(reader: &mut ByteReader) -> Result<u64, SerdeErr> {
    let (value, length) = decode_varint(reader.peek_remaining(), MAX_VARINT64_BYTES)?;
    reader.advance(length);
    Ok(value)
}

/// Number of bytes `value` occupies as a varint.
pub fn varint64_length(value: u64) -> usize {
    let mut scratch = [0u8; MAX_VARINT64_BYTES];
    encode_varint(value, &mut scratch)
}

fn encode_varint(mut value: u64, scratch: &mut [u8; MAX_VARINT64_BYTES]) -> usize {
    let mut length = 0;
    loop {
        let byte = (value as u8) & PAYLOAD_MASK;
        value >>= 7;
        if value == 0 {
            scratch[length] = byte;
            return length + 1;
        }
        scratch[length] = byte | CONTINUATION_BIT;
        length += 1;
    }
}

fn decode_varint(bytes: &[u8], max_bytes: usize) -> Result<(u64, usize), SerdeErr> {
    let mut value: u64 = 0;
    for (index, byte) in bytes.iter().take(max_bytes).enumerate() {
        value |= u64::from(byte & PAYLOAD_MASK) << (7 * index);
        if byte & CONTINUATION_BIT == 0 {
            return Ok((value, index + 1));
        }
    }

    if bytes.len() >= max_bytes {
        Err(SerdeErr::MalformedVarint { max_bytes })
    } else {
        Err(SerdeErr::Exhausted {
            needed: bytes.len() + 1,
            remaining: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_writer::ByteWriter;

    fn encode64(value: u64) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        write_varint64(&mut writer, value).unwrap();
        writer.to_bytes()
    }

    #[test]
    fn zigzag_small_values() {
        assert_eq!(zigzag_encode32(0), 0);
        assert_eq!(zigzag_encode32(-1), 1);
        assert_eq!(zigzag_encode32(1), 2);
        assert_eq!(zigzag_encode32(-5), 9);
        assert_eq!(zigzag_decode32(9), -5);
        assert_eq!(zigzag_encode64(-2), 3);
    }

    #[test]
    fn zigzag_extremes() {
        assert_eq!(zigzag_encode32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_decode32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_encode32(i32::MAX), u32::MAX - 1);
        assert_eq!(zigzag_decode64(zigzag_encode64(i64::MIN)), i64::MIN);
        assert_eq!(zigzag_decode64(zigzag_encode64(i64::MAX)), i64::MAX);
    }

    #[test]
    fn leb128_layout() {
        assert_eq!(encode64(0), vec![0x00]);
        assert_eq!(encode64(127), vec![0x7F]);
        assert_eq!(encode64(128), vec![0x80, 0x01]);
        assert_eq!(encode64(300), vec![0xAC, 0x02]);
        assert_eq!(encode64(u64::MAX).len(), MAX_VARINT64_BYTES);
        assert_eq!(varint64_length(u64::MAX), MAX_VARINT64_BYTES);
        assert_eq!(varint64_length(u64::from(u32::MAX)), MAX_VARINT32_BYTES);
    }

    #[test]
    fn read_back_values() {
        let mut writer = ByteWriter::new();
        write_varint32(&mut writer, u32::MAX).unwrap();
        write_varint64(&mut writer, 1 << 40).unwrap();
        write_varint32(&mut writer, 5).unwrap();
        let buffer = writer.to_bytes();

        let mut reader = ByteReader::new(&buffer);
        assert_eq!(read_varint32(&mut reader).unwrap(), u32::MAX);
        assert_eq!(read_varint64(&mut reader).unwrap(), 1 << 40);
        assert_eq!(read_varint32(&mut reader).unwrap(), 5);
        assert!(reader.is_empty());
    }

    #[test]
    fn overlong_varint_is_malformed() {
        let buffer = [0xFFu8; 12];

        let mut reader = ByteReader::new(&buffer);
        assert_eq!(
            read_varint32(&mut reader),
            Err(SerdeErr::MalformedVarint { max_bytes: 5 })
        );

        let mut reader = ByteReader::new(&buffer);
        assert_eq!(
            read_varint64(&mut reader),
            Err(SerdeErr::MalformedVarint { max_bytes: 10 })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn truncated_varint_is_exhausted_and_not_consumed() {
        let buffer = [0x80u8, 0x80];
        let mut reader = ByteReader::new(&buffer);

        assert_eq!(
            read_varint64(&mut reader),
            Err(SerdeErr::Exhausted {
                needed: 3,
                remaining: 2
            })
        );
        assert_eq!(reader.position(), 0);
    }
}
