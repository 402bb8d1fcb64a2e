//! # Entity Archive Serde
//! Byte-level primitives of the entity archive wire format: LEB128 varints,
//! zigzag-mapped signed integers, fixed-width integers, lossless and
//! quantized floats, length-prefixed strings and packed-boolean batches.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bool_batch;
mod byte_reader;
mod byte_writer;
mod error;
mod number;
mod varint;

pub use bool_batch::{packed_length, BoolDecoder, BoolEncoder, CookedBools};
pub use byte_reader::ByteReader;
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use number::{
    read_f32, read_i32, read_i64, read_quantized_f32, read_string, read_u32_fixed, write_f32,
    write_i32, write_i64, write_quantized_f32, write_string, write_u32_fixed, Fixed32, Quantized,
};
pub use varint::{
    read_varint32, read_varint64, varint64_length, write_varint32, write_varint64,
    zigzag_decode32, zigzag_decode64, zigzag_encode32, zigzag_encode64, MAX_VARINT32_BYTES,
    MAX_VARINT64_BYTES,
};
