use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    hash::Hash,
};

use entity_archive_serde::{read_varint64, write_varint64, SerdeErr};

use crate::archive::{Archive, TransferError};

use super::transfer::{conclude, Transfer};

// Collections are a varint64 element count followed by each element with
// its own codec. Decoding clears the destination first, so decoding into a
// populated collection yields exactly what was encoded. An element that fails
// is left out and the rest are still decoded.

// The limit holds in both directions, so nothing is encoded that the same
// config would refuse to decode.
fn transfer_length(archive: &mut Archive<'_>, length: usize) -> Result<usize, TransferError> {
    let limit = archive.config().max_collection_length;
    if archive.is_encoding() {
        check_length(length as u64, limit)?;
    }

    let mut wire_length = length as u64;
    archive.transfer_primitive(
        &mut wire_length,
        |writer, value| write_varint64(writer, *value),
        read_varint64,
    )?;

    if archive.is_decoding() {
        check_length(wire_length, limit)?;
    }
    Ok(wire_length as usize)
}

pub(crate) fn check_length(length: u64, limit: usize) -> Result<(), SerdeErr> {
    if length > limit as u64 {
        return Err(SerdeErr::LengthLimit {
            length,
            limit: limit as u64,
        });
    }
    Ok(())
}

impl<T: Transfer + Default> Transfer for Vec<T> {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let length = transfer_length(archive, self.len())?;
        let mut success = true;

        if archive.is_decoding() {
            self.clear();
            for index in 0..length {
                let mut element = T::default();
                if archive.transfer_element(index, &mut element) {
                    self.push(element);
                } else {
                    success = false;
                }
            }
        } else {
            for (index, element) in self.iter_mut().enumerate() {
                success &= archive.transfer_element(index, element);
            }
        }

        conclude(success, "Vec")
    }
}

impl<T: Transfer + Default + Clone + Ord> Transfer for BTreeSet<T> {
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let length = transfer_length(archive, self.len())?;
        let mut success = true;

        if archive.is_decoding() {
            self.clear();
            for index in 0..length {
                let mut element = T::default();
                if archive.transfer_element(index, &mut element) {
                    self.insert(element);
                } else {
                    success = false;
                }
            }
        } else {
            for (index, element) in self.iter().enumerate() {
                let mut element = element.clone();
                success &= archive.transfer_element(index, &mut element);
            }
        }

        conclude(success, "BTreeSet")
    }
}

impl<K, V> Transfer for BTreeMap<K, V>
where
    K: Transfer + Default + Clone + Ord,
    V: Transfer + Default,
{
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let length = transfer_length(archive, self.len())?;
        let mut success = true;

        if archive.is_decoding() {
            self.clear();
            for index in 0..length {
                let mut key = K::default();
                let mut value = V::default();
                let mut entry_success = archive.transfer_element(index, &mut key);
                entry_success &= archive.transfer_element(index, &mut value);
                if entry_success {
                    self.insert(key, value);
                } else {
                    success = false;
                }
            }
        } else {
            for (index, (key, value)) in self.iter_mut().enumerate() {
                let mut key = key.clone();
                success &= archive.transfer_element(index, &mut key);
                success &= archive.transfer_element(index, value);
            }
        }

        conclude(success, "BTreeMap")
    }
}

/// Entries are written in the map's iteration order, which is not stable
/// between runs. Prefer `BTreeMap` where the bytes themselves are compared.
impl<K, V> Transfer for HashMap<K, V>
where
    K: Transfer + Default + Clone + Eq + Hash,
    V: Transfer + Default,
{
    fn transfer(&mut self, archive: &mut Archive<'_>) -> Result<(), TransferError> {
        let length = transfer_length(archive, self.len())?;
        let mut success = true;

        if archive.is_decoding() {
            self.clear();
            for index in 0..length {
                let mut key = K::default();
                let mut value = V::default();
                let mut entry_success = archive.transfer_element(index, &mut key);
                entry_success &= archive.transfer_element(index, &mut value);
                if entry_success {
                    self.insert(key, value);
                } else {
                    success = false;
                }
            }
        } else {
            for (index, (key, value)) in self.iter_mut().enumerate() {
                let mut key = key.clone();
                success &= archive.transfer_element(index, &mut key);
                success &= archive.transfer_element(index, value);
            }
        }

        conclude(success, "HashMap")
    }
}
