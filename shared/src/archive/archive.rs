use log::{debug, warn};

use entity_archive_serde::{
    packed_length, varint64_length, BoolDecoder, BoolEncoder, ByteCounter, ByteReader, ByteWrite,
    ByteWriter, CookedBools, SerdeErr,
};

use crate::{prototype::PrototypeRefConverter, transfer::Transfer};

use super::{
    config::ArchiveConfig,
    error::{ArchiveError, TransferError},
    intent::ArchiveIntent,
    report::TransferReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveDirection {
    Encoding,
    Decoding,
}

// Encoding walks the object twice: a collect pass that registers packed
// bools and measures the payload, then a write pass that replays them.
enum Stream<'b> {
    Collecting {
        counter: ByteCounter,
        bools: BoolEncoder,
    },
    Writing {
        writer: ByteWriter,
        bools: CookedBools,
    },
    Reading {
        reader: ByteReader<'b>,
        bools: BoolDecoder<'b>,
    },
}

enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// A single walk over one object graph, in one direction, for one intent.
///
/// Archives are never built directly. [`Archive::encode`], [`Archive::decode`]
/// and [`Archive::measure`] open one, walk the root value and consume it.
/// Inside a walk, composites see the archive through
/// [`Transfer::transfer`](crate::Transfer::transfer) and hand it each of
/// their fields in a fixed order.
pub struct Archive<'b> {
    stream: Stream<'b>,
    intent: ArchiveIntent,
    prototypes: &'b dyn PrototypeRefConverter,
    config: &'b ArchiveConfig,
    path: Vec<PathSegment>,
    report: TransferReport,
}

impl<'b> Archive<'b> {
    fn new(
        stream: Stream<'b>,
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Self {
        Self {
            stream,
            intent,
            prototypes,
            config,
            path: Vec::new(),
            report: TransferReport::default(),
        }
    }

    fn collecting(
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Self {
        Self::new(
            Stream::Collecting {
                counter: ByteCounter::new(),
                bools: BoolEncoder::new(),
            },
            intent,
            prototypes,
            config,
        )
    }

    /// Encodes `value` into a new archive.
    ///
    /// `value` is borrowed mutably because encoding and decoding share one
    /// field list, but encoding never changes it. Callers holding only a
    /// shared reference can use [`Archive::encode_ref`].
    ///
    /// Every limit in `config` is checked while collecting, so nothing is
    /// written that `decode` with the same config would refuse.
    pub fn encode<T: Transfer + ?Sized>(
        value: &mut T,
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = Self::collecting(intent, prototypes, config);
        archive.transfer_scoped(value);
        archive.begin_write_pass()?;
        archive.transfer_scoped(value);
        archive.finish_write_pass()
    }

    /// Encodes a value held only by shared reference, by walking a clone
    /// of it.
    pub fn encode_ref<T: Transfer + Clone>(
        value: &T,
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Result<Vec<u8>, ArchiveError> {
        let mut snapshot = value.clone();
        Self::encode(&mut snapshot, intent, prototypes, config)
    }

    /// Decodes an archive into `value`, field by field.
    ///
    /// Fields that fail keep whatever they held before; every other field is
    /// still decoded. On success the report carries any warnings raised.
    pub fn decode<T: Transfer + ?Sized>(
        bytes: &'b [u8],
        value: &mut T,
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Result<TransferReport, ArchiveError> {
        let mut reader = ByteReader::new(bytes);
        let bools = BoolDecoder::read_block(&mut reader, config.max_packed_bools)
            .map_err(ArchiveError::BoolBlock)?;

        let mut archive = Self::new(
            Stream::Reading { reader, bools },
            intent,
            prototypes,
            config,
        );
        archive.transfer_scoped(value);
        archive.finish_read_pass()
    }

    /// Number of bytes [`Archive::encode`] would produce for `value`.
    pub fn measure<T: Transfer + ?Sized>(
        value: &mut T,
        intent: ArchiveIntent,
        prototypes: &'b dyn PrototypeRefConverter,
        config: &'b ArchiveConfig,
    ) -> Result<usize, ArchiveError> {
        let mut archive = Self::collecting(intent, prototypes, config);
        archive.transfer_scoped(value);

        if !archive.report.success() {
            return Err(ArchiveError::TransferFailed(archive.report));
        }
        match archive.stream {
            Stream::Collecting { counter, bools } => {
                let bool_count = bools.len();
                check_bool_count(bool_count, config)?;
                Ok(varint64_length(bool_count as u64) + packed_length(bool_count) + counter.count())
            }
            _ => Ok(0),
        }
    }

    // Walk phases

    fn begin_write_pass(&mut self) -> Result<(), ArchiveError> {
        if !self.report.success() {
            return Err(ArchiveError::TransferFailed(std::mem::take(&mut self.report)));
        }
        let Stream::Collecting { counter, bools } = &mut self.stream else {
            return Ok(());
        };

        check_bool_count(bools.len(), self.config)?;
        let payload_length = counter.count();
        let cooked = std::mem::take(bools).cook();

        let mut writer = ByteWriter::with_size_hint(cooked.block_length() + payload_length);
        writer.set_capacity(self.config.write_capacity);
        cooked
            .write_block(&mut writer)
            .map_err(ArchiveError::BoolBlock)?;

        self.stream = Stream::Writing {
            writer,
            bools: cooked,
        };
        // warnings are only raised once the bytes are real
        self.report = TransferReport::default();
        Ok(())
    }

    fn finish_write_pass(self) -> Result<Vec<u8>, ArchiveError> {
        if !self.report.success() {
            return Err(ArchiveError::TransferFailed(self.report));
        }
        match self.stream {
            Stream::Writing { writer, bools } => {
                if bools.remaining() > 0 {
                    return Err(ArchiveError::UnconsumedBools {
                        remaining: bools.remaining(),
                    });
                }
                let bytes = writer.to_bytes();
                debug!(
                    "Encoded {:?} archive: {} bytes, {} packed bool(s), {} field(s)",
                    self.intent,
                    bytes.len(),
                    bools.count(),
                    self.report.fields_transferred()
                );
                Ok(bytes)
            }
            _ => Err(ArchiveError::TransferFailed(self.report)),
        }
    }

    fn finish_read_pass(mut self) -> Result<TransferReport, ArchiveError> {
        if !self.report.success() {
            return Err(ArchiveError::TransferFailed(self.report));
        }
        let (trailing, bool_count, unread_bools) = match &self.stream {
            Stream::Reading { reader, bools } => (reader.remaining(), bools.count(), bools.remaining()),
            _ => (0, 0, 0),
        };
        if unread_bools > 0 {
            return Err(ArchiveError::UnconsumedBools {
                remaining: unread_bools,
            });
        }
        if trailing > 0 {
            self.record_warning(
                String::new(),
                format!("{} trailing byte(s) left unread", trailing),
            );
        }
        debug!(
            "Decoded {:?} archive: {} packed bool(s), {} field(s), {} warning(s)",
            self.intent,
            bool_count,
            self.report.fields_transferred(),
            self.report.warnings().len()
        );
        Ok(self.report)
    }

    // Field access

    /// Transfers a named field. Returns whether it succeeded; failures are
    /// recorded in the report under the field's path, so callers only need
    /// to fold the result into their own success.
    pub fn transfer<T: Transfer + ?Sized>(&mut self, name: &'static str, value: &mut T) -> bool {
        self.path.push(PathSegment::Field(name));
        let success = self.transfer_scoped(value);
        self.path.pop();
        success
    }

    /// Transfers the element at `index` of a collection.
    pub fn transfer_element<T: Transfer + ?Sized>(&mut self, index: usize, value: &mut T) -> bool {
        self.path.push(PathSegment::Index(index));
        let success = self.transfer_scoped(value);
        self.path.pop();
        success
    }

    fn transfer_scoped<T: Transfer + ?Sized>(&mut self, value: &mut T) -> bool {
        trace_field(self);

        let failures_before = self.report.failure_count();
        match value.transfer(self) {
            Ok(()) => {
                self.report.count_field();
                true
            }
            Err(error) => {
                // a failed composite has already recorded its own fields
                let recorded = matches!(error, TransferError::FieldsFailed { .. })
                    && self.report.failure_count() > failures_before;
                if !recorded {
                    let path = self.path_string();
                    self.report.record_failure(path, error);
                }
                false
            }
        }
    }

    /// Writes `value` with `write` when encoding; when decoding reads a fresh
    /// value with `read` and assigns it only if the read succeeded.
    pub fn transfer_primitive<T, W, R>(
        &mut self,
        value: &mut T,
        write: W,
        read: R,
    ) -> Result<(), TransferError>
    where
        W: FnOnce(&mut dyn ByteWrite, &T) -> Result<(), SerdeErr>,
        R: FnOnce(&mut ByteReader<'b>) -> Result<T, SerdeErr>,
    {
        let sink: &mut dyn ByteWrite = match &mut self.stream {
            Stream::Collecting { counter, .. } => counter,
            Stream::Writing { writer, .. } => writer,
            Stream::Reading { reader, .. } => {
                *value = read(reader)?;
                return Ok(());
            }
        };
        write(sink, value)?;
        Ok(())
    }

    /// Transfers a boolean through the packed bool block.
    pub fn transfer_bool(&mut self, value: &mut bool) -> Result<(), TransferError> {
        match &mut self.stream {
            Stream::Collecting { bools, .. } => bools.encode_bool(*value),
            Stream::Writing { bools, .. } => bools.replay(*value)?,
            Stream::Reading { bools, .. } => *value = bools.read_bool()?,
        }
        Ok(())
    }

    /// Records that `field` of the composite being transferred broke an
    /// invariant of the format, and logs it. Never fails the walk.
    pub fn warn(&mut self, field: &'static str, message: impl Into<String>) {
        if matches!(self.stream, Stream::Collecting { .. }) {
            return;
        }
        self.path.push(PathSegment::Field(field));
        let path = self.path_string();
        self.path.pop();
        self.record_warning(path, message.into());
    }

    fn record_warning(&mut self, path: String, message: String) {
        if path.is_empty() {
            warn!("Archive: {}", message);
        } else {
            warn!("Archive field `{}`: {}", path, message);
        }
        self.report.record_warning(path, message);
    }

    // Context

    pub fn direction(&self) -> ArchiveDirection {
        match self.stream {
            Stream::Reading { .. } => ArchiveDirection::Decoding,
            _ => ArchiveDirection::Encoding,
        }
    }

    pub fn is_encoding(&self) -> bool {
        self.direction() == ArchiveDirection::Encoding
    }

    pub fn is_decoding(&self) -> bool {
        self.direction() == ArchiveDirection::Decoding
    }

    pub fn intent(&self) -> ArchiveIntent {
        self.intent
    }

    pub fn config(&self) -> &'b ArchiveConfig {
        self.config
    }

    pub fn prototypes(&self) -> &'b dyn PrototypeRefConverter {
        self.prototypes
    }

    pub fn report(&self) -> &TransferReport {
        &self.report
    }

    /// Current stream offset. The collect pass does not count the packed
    /// bool block, which is only sized once every bool is known.
    pub fn position(&self) -> usize {
        match &self.stream {
            Stream::Collecting { counter, .. } => counter.count(),
            Stream::Writing { writer, .. } => writer.bytes_written(),
            Stream::Reading { reader, .. } => reader.position(),
        }
    }

    fn path_string(&self) -> String {
        let mut output = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !output.is_empty() {
                        output.push('.');
                    }
                    output.push_str(name);
                }
                PathSegment::Index(index) => {
                    output.push('[');
                    output.push_str(&index.to_string());
                    output.push(']');
                }
            }
        }
        output
    }
}

// Encoding refuses a block the decoder would reject for its size
fn check_bool_count(count: usize, config: &ArchiveConfig) -> Result<(), ArchiveError> {
    if count > config.max_packed_bools {
        return Err(ArchiveError::BoolBlock(SerdeErr::LengthLimit {
            length: count as u64,
            limit: config.max_packed_bools as u64,
        }));
    }
    Ok(())
}

cfg_if! {
    if #[cfg(feature = "field_trace")] {
        fn trace_field(archive: &Archive<'_>) {
            log::trace!(
                "{:?} `{}` at byte {}",
                archive.direction(),
                archive.path_string(),
                archive.position()
            );
        }
    } else {
        fn trace_field(_archive: &Archive<'_>) {}
    }
}
