use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    varint::{
        read_varint32, read_varint64, write_varint32, write_varint64, zigzag_decode32,
        zigzag_decode64, zigzag_encode32, zigzag_encode64,
    },
};

// Signed integers

pub fn write_i32(writer: &mut dyn ByteWrite, value: i32) -> Result<(), SerdeErr> {
    write_varint32(writer, zigzag_encode32(value))
}

pub fn read_i32(reader: &mut ByteReader) -> Result<i32, SerdeErr> {
    Ok(zigzag_decode32(read_varint32(reader)?))
}

pub fn write_i64(writer: &mut dyn ByteWrite, value: i64) -> Result<(), SerdeErr> {
    write_varint64(writer, zigzag_encode64(value))
}

pub fn read_i64(reader: &mut ByteReader) -> Result<i64, SerdeErr> {
    Ok(zigzag_decode64(read_varint64(reader)?))
}

// Fixed-width unsigned

pub fn write_u32_fixed(writer: &mut dyn ByteWrite, value: u32) -> Result<(), SerdeErr> {
    writer.write_bytes(&value.to_le_bytes())
}

pub fn read_u32_fixed(reader: &mut ByteReader) -> Result<u32, SerdeErr> {
    Ok(u32::from_le_bytes(reader.read_array::<4>()?))
}

/// An unsigned 32-bit value that always occupies 4 bytes on the wire.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Fixed32(pub u32);

impl Fixed32 {
    pub fn write(&self, writer: &mut dyn ByteWrite) -> Result<(), SerdeErr> {
        write_u32_fixed(writer, self.0)
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(read_u32_fixed(reader)?))
    }
}

// Floats

/// Lossless: the IEEE-754 bit pattern, varint-encoded.
pub fn write_f32(writer: &mut dyn ByteWrite, value: f32) -> Result<(), SerdeErr> {
    write_varint32(writer, value.to_bits())
}

pub fn read_f32(reader: &mut ByteReader) -> Result<f32, SerdeErr> {
    Ok(f32::from_bits(read_varint32(reader)?))
}

/// Lossy: `round(value * 2^precision)` as a zigzag varint. Scaled values
/// outside the i32 range saturate, NaN encodes as zero.
pub fn write_quantized_f32(
    writer: &mut dyn ByteWrite,
    value: f32,
    precision: u8,
) -> Result<(), SerdeErr> {
    write_i32(writer, quantize(value, precision))
}

pub fn read_quantized_f32(reader: &mut ByteReader, precision: u8) -> Result<f32, SerdeErr> {
    Ok(dequantize(read_i32(reader)?, precision))
}

fn scale(precision: u8) -> f32 {
    2f32.powi(i32::from(precision))
}

fn quantize(value: f32, precision: u8) -> i32 {
    (value * scale(precision)).round() as i32
}

fn dequantize(value: i32, precision: u8) -> f32 {
    value as f32 / scale(precision)
}

/// A float carried as a fixed-point integer with `PRECISION` fractional bits.
///
/// The precision is not written to the stream, so both ends must name the
/// same `Quantized<PRECISION>` type for a given field.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quantized<const PRECISION: u8> {
    value: f32,
}

impl<const PRECISION: u8> Quantized<PRECISION> {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn set(&mut self, value: f32) {
        self.value = value;
    }

    /// Largest difference between a value and its decoded form.
    pub fn max_error() -> f32 {
        0.5 / scale(PRECISION)
    }

    pub fn write(&self, writer: &mut dyn ByteWrite) -> Result<(), SerdeErr> {
        write_quantized_f32(writer, self.value, PRECISION)
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self::new(read_quantized_f32(reader, PRECISION)?))
    }
}

impl<const PRECISION: u8> From<f32> for Quantized<PRECISION> {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

// Strings

/// Writes the byte length as a 64-bit varint followed by the UTF-8 bytes.
pub fn write_string(writer: &mut dyn ByteWrite, value: &str) -> Result<(), SerdeErr> {
    write_varint64(writer, value.len() as u64)?;
    writer.write_bytes(value.as_bytes())
}

/// Reads the byte length as a 32-bit varint, then the payload.
///
/// The length prefix stays consumed when the payload itself cannot be read.
pub fn read_string(reader: &mut ByteReader, max_length: usize) -> Result<String, SerdeErr> {
    let length = read_varint32(reader)? as usize;
    if length > max_length {
        return Err(SerdeErr::LengthLimit {
            length: length as u64,
            limit: max_length as u64,
        });
    }
    let bytes = reader.read_bytes(length)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| SerdeErr::InvalidUtf8)
}
