use std::time::Duration;

use entity_archive_serde::{
    read_f32, read_i32, read_i64, read_quantized_f32, read_string, read_u32_fixed, read_varint32,
    read_varint64, write_f32, write_i32, write_i64, write_quantized_f32, write_string,
    write_u32_fixed, write_varint32, write_varint64, Fixed32, Quantized,
};

use crate::archive::{Archive, ReplicationPolicy, TransferError};

use super::collections::check_length;

/// A value that can be written to and read from an archive.
///
/// One method serves both directions. When encoding it writes the current
/// value; when decoding it reads a fresh value with the same codec and
/// assigns it. Composites transfer each of their fields in a fixed order
/// through [`Archive::transfer`] and keep going after a field fails:
///
/// ```ignore
/// fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
///     let mut success = archive.transfer("region", &mut self.region);
///     success &= archive.transfer("group_id", &mut self.group_id);
///     conclude(success, "MatchQueueRegionStatus")
/// }
/// ```
pub trait Transfer {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError>;
}

/// Turns the folded success of a composite's fields into its result.
pub fn conclude(success: bool, type_name: &'static str) -> Result<(), TransferError> {
    if success {
        Ok(())
    } else {
        Err(TransferError::FieldsFailed { type_name })
    }
}

macro_rules! impl_transfer_primitive {
    ($type:ty, $write:expr, $read:expr) => {
        impl Transfer for $type {
            fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
                archive.transfer_primitive(self, $write, $read)
            }
        }
    };
}

impl_transfer_primitive!(u32, |writer, value| write_varint32(writer, *value), read_varint32);
impl_transfer_primitive!(u64, |writer, value| write_varint64(writer, *value), read_varint64);
impl_transfer_primitive!(i32, |writer, value| write_i32(writer, *value), read_i32);
impl_transfer_primitive!(i64, |writer, value| write_i64(writer, *value), read_i64);
impl_transfer_primitive!(f32, |writer, value| write_f32(writer, *value), read_f32);
impl_transfer_primitive!(
    Fixed32,
    |writer, value| write_u32_fixed(writer, value.0),
    |reader| Ok(Fixed32(read_u32_fixed(reader)?))
);

impl<const PRECISION: u8> Transfer for Quantized<PRECISION> {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        archive.transfer_primitive(
            self,
            |writer, value| write_quantized_f32(writer, value.get(), PRECISION),
            |reader| Ok(Quantized::new(read_quantized_f32(reader, PRECISION)?)),
        )
    }
}

impl Transfer for String {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let max_length = archive.config().max_string_length;
        if archive.is_encoding() {
            check_length(self.len() as u64, max_length)?;
        }
        archive.transfer_primitive(
            self,
            |writer, value| write_string(writer, value),
            |reader| read_string(reader, max_length),
        )
    }
}

impl Transfer for bool {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        archive.transfer_bool(self)
    }
}

// Unknown channel bits are kept, newer peers may send them
impl Transfer for ReplicationPolicy {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        archive.transfer_primitive(
            self,
            |writer, value| write_varint32(writer, value.bits()),
            |reader| Ok(ReplicationPolicy::from_bits_retain(read_varint32(reader)?)),
        )
    }
}

/// Durations travel as signed microseconds.
impl Transfer for Duration {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let mut micros = i64::try_from(self.as_micros()).map_err(|_| {
            TransferError::TimestampOutOfRange { micros: i64::MAX }
        })?;
        archive.transfer_primitive(
            &mut micros,
            |writer, value| write_i64(writer, *value),
            read_i64,
        )?;

        if archive.is_decoding() {
            let unsigned = u64::try_from(micros)
                .map_err(|_| TransferError::TimestampOutOfRange { micros })?;
            *self = Duration::from_micros(unsigned);
        }
        Ok(())
    }
}
