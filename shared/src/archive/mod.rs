mod archive;
mod config;
mod error;
mod intent;
mod report;

pub use archive::{Archive, ArchiveDirection};
pub use config::ArchiveConfig;
pub use error::{ArchiveError, TransferError};
pub use intent::{ArchiveIntent, ReplicationPolicy};
pub use report::{ArchiveWarning, FieldFailure, TransferReport};
