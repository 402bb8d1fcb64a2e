mod collections;
mod transfer;
mod wire_enum;

pub(crate) use collections::check_length;
pub use transfer::{conclude, Transfer};
