//! Ordered-list editing shared by every list field in every section.
//!
//! Callers edit a clone of the section content and commit the whole record,
//! so these functions only ever see the list itself.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("No entry at index {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// A list element with named, individually replaceable fields.
pub trait Record: Clone {
    type Field: Copy;

    fn set_field(&mut self, field: Self::Field, value: String);
}

/// Replaces one field of the record at `index`; nothing else changes.
pub fn update<R: Record>(
    items: &mut [R],
    index: usize,
    field: R::Field,
    value: String,
) -> Result<(), ListError> {
    let len = items.len();
    let record = items
        .get_mut(index)
        .ok_or(ListError::OutOfRange { index, len })?;
    record.set_field(field, value);
    Ok(())
}

pub fn add<R>(items: &mut Vec<R>, record: R) {
    items.push(record);
}

/// Removes and returns the record at `index`, shifting later records left.
pub fn remove<R>(items: &mut Vec<R>, index: usize) -> Result<R, ListError> {
    if index >= items.len() {
        return Err(ListError::OutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}
