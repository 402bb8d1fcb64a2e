//! Property tests for the byte-level primitives.
//!
//! Every integer encoding must be lossless over its whole domain, floats must
//! keep their exact bit pattern, and quantized floats must stay within half a
//! quantization step of their input.

use proptest::prelude::*;

use entity_archive_serde::{
    read_f32, read_i32, read_i64, read_quantized_f32, read_string, read_u32_fixed, read_varint32,
    read_varint64, varint64_length, write_f32, write_i32, write_i64, write_quantized_f32,
    write_string, write_u32_fixed, write_varint32, write_varint64, zigzag_decode32,
    zigzag_decode64, zigzag_encode32, zigzag_encode64, ByteReader, ByteWriter, Quantized,
};

const QUANTIZED_PRECISION: u8 = 8;

proptest! {
    #[test]
    fn prop_zigzag_is_a_bijection(value32 in any::<i32>(), value64 in any::<i64>()) {
        prop_assert_eq!(zigzag_decode32(zigzag_encode32(value32)), value32);
        prop_assert_eq!(zigzag_decode64(zigzag_encode64(value64)), value64);
    }

    #[test]
    fn prop_zigzag_keeps_small_magnitudes_small(value in -64i64..64) {
        // anything in [-64, 63] fits in a single varint byte
        prop_assert!(zigzag_encode64(value) < 128);
    }

    #[test]
    fn prop_varints_round_trip(value32 in any::<u32>(), value64 in any::<u64>()) {
        let mut writer = ByteWriter::new();
        write_varint32(&mut writer, value32).unwrap();
        write_varint64(&mut writer, value64).unwrap();
        let bytes = writer.to_bytes();

        prop_assert_eq!(
            bytes.len(),
            varint64_length(u64::from(value32)) + varint64_length(value64)
        );

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_varint32(&mut reader).unwrap(), value32);
        prop_assert_eq!(read_varint64(&mut reader).unwrap(), value64);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_signed_and_fixed_round_trip(
        signed32 in any::<i32>(),
        signed64 in any::<i64>(),
        fixed in any::<u32>(),
    ) {
        let mut writer = ByteWriter::new();
        write_i32(&mut writer, signed32).unwrap();
        write_i64(&mut writer, signed64).unwrap();
        write_u32_fixed(&mut writer, fixed).unwrap();
        let bytes = writer.to_bytes();

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_i32(&mut reader).unwrap(), signed32);
        prop_assert_eq!(read_i64(&mut reader).unwrap(), signed64);
        prop_assert_eq!(read_u32_fixed(&mut reader).unwrap(), fixed);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_floats_keep_their_bits(bits in any::<u32>()) {
        let value = f32::from_bits(bits);

        let mut writer = ByteWriter::new();
        write_f32(&mut writer, value).unwrap();
        let bytes = writer.to_bytes();

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_f32(&mut reader).unwrap().to_bits(), bits);
    }

    #[test]
    fn prop_quantized_error_is_bounded(value in -100_000.0f32..100_000.0) {
        let mut writer = ByteWriter::new();
        write_quantized_f32(&mut writer, value, QUANTIZED_PRECISION).unwrap();
        let bytes = writer.to_bytes();

        let mut reader = ByteReader::new(&bytes);
        let decoded = read_quantized_f32(&mut reader, QUANTIZED_PRECISION).unwrap();

        prop_assert!(
            (decoded - value).abs() <= Quantized::<QUANTIZED_PRECISION>::max_error(),
            "{} decoded as {}",
            value,
            decoded
        );
    }

    #[test]
    fn prop_strings_round_trip(value in "\\PC{0,64}") {
        let mut writer = ByteWriter::new();
        write_string(&mut writer, &value).unwrap();
        let bytes = writer.to_bytes();

        prop_assert_eq!(bytes.len(), varint64_length(value.len() as u64) + value.len());

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_string(&mut reader, 1024).unwrap(), value);
    }

    #[test]
    fn prop_truncated_varints_never_panic(value in any::<u64>(), cut in 0usize..10) {
        let mut writer = ByteWriter::new();
        write_varint64(&mut writer, value).unwrap();
        let bytes = writer.to_bytes();
        let cut = cut.min(bytes.len());

        let mut reader = ByteReader::new(&bytes[..cut]);
        let result = read_varint64(&mut reader);
        if cut == bytes.len() {
            prop_assert_eq!(result.unwrap(), value);
        } else {
            prop_assert!(result.is_err());
        }
    }
}
