//! Header binding
//!
//! Associates header positions with the field map entries they feed.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::resolve::{FieldEntry, FieldMap};

/// Header positions bound to a record type's columns
#[derive(Debug, Clone)]
pub struct HeaderBinding {
    map: Arc<FieldMap>,
    /// Entry index per header position
    columns: Vec<Option<usize>>,
    unused: Vec<usize>,
    missing: Vec<usize>,
}

/// Bind a header to a field map.
///
/// Names match exactly. A column name may repeat; every copy binds to the
/// same entry.
pub fn bind<S: AsRef<str>>(header: &[S], map: Arc<FieldMap>) -> Result<HeaderBinding> {
    if header.is_empty() {
        return Err(Error::EmptyHeader);
    }

    let columns: Vec<Option<usize>> = header
        .iter()
        .map(|name| map.position(name.as_ref()))
        .collect();

    let unused = columns
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_none())
        .map(|(i, _)| i)
        .collect();

    let mut matched = vec![false; map.len()];
    for entry in columns.iter().flatten() {
        matched[*entry] = true;
    }
    let missing = matched
        .iter()
        .enumerate()
        .filter(|(_, hit)| !**hit)
        .map(|(i, _)| i)
        .collect();

    Ok(HeaderBinding {
        map,
        columns,
        unused,
        missing,
    })
}

impl HeaderBinding {
    /// The field map this header is bound to
    pub fn field_map(&self) -> &Arc<FieldMap> {
        &self.map
    }

    /// Number of header columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the header has no columns (never true for a built binding)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Entry bound to a header position
    pub fn column(&self, index: usize) -> Option<&FieldEntry> {
        self.columns
            .get(index)
            .copied()
            .flatten()
            .map(|i| &self.map.entries()[i])
    }

    /// Bound header positions with their entries, in header order
    pub fn bound(&self) -> impl Iterator<Item = (usize, &FieldEntry)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(col, entry)| entry.map(|i| (col, &self.map.entries()[i])))
    }

    /// Header positions no field consumes
    pub fn unused(&self) -> &[usize] {
        &self.unused
    }

    /// Entries no header column matched
    pub fn missing(&self) -> impl Iterator<Item = &FieldEntry> {
        self.missing.iter().map(|&i| &self.map.entries()[i])
    }

    /// Names of the entries no header column matched
    pub fn missing_names(&self) -> Vec<String> {
        self.missing().map(|e| e.name.clone()).collect()
    }
}
