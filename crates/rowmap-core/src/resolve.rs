//! Field resolution
//!
//! Turns a [`TypeDescriptor`] into a [`FieldMap`]: the ordered, deduplicated
//! list of columns a record type reads and writes.
//!
//! The field tree is walked breadth-first. Flattened sub-records without a
//! column name are expanded one level deeper. When several fields claim the
//! same column name, only the shallowest survive; if more than one field is
//! left at that depth the name is ambiguous and dropped altogether.

use std::any::TypeId;

use ahash::{AHashMap, AHashSet};

use crate::descriptor::{FieldShape, TypeDescriptor, TypeShape};
use crate::error::{Error, Result};
use crate::tag::Tag;
use crate::value::FieldType;

/// A bindable column of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Column name
    pub name: String,
    /// Declaration indices from the record root to the field
    pub path: Vec<usize>,
    /// Dotted Rust field path (e.g. `address.city`)
    pub field: String,
    /// Declared type of the field
    pub field_type: FieldType,
    /// Collapse zero values to empty cells on encode
    pub omitempty: bool,
}

impl FieldEntry {
    /// Embedding depth (0 for fields declared on the record itself)
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Resolved columns of one record type, in declaration order
#[derive(Debug, Clone)]
pub struct FieldMap {
    type_name: &'static str,
    type_id: TypeId,
    entries: Vec<FieldEntry>,
    index: AHashMap<String, usize>,
}

impl FieldMap {
    /// Rust name of the resolved type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Identity of the resolved type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    /// Look up an entry by column name
    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Position of a column name within [`entries`](Self::entries)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the type has no columns
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Candidate {
    entry: FieldEntry,
    depth: usize,
}

struct Pending {
    descriptor: TypeDescriptor,
    path: Vec<usize>,
    prefix: String,
}

/// Resolve the field map of a record type
pub fn resolve(descriptor: &TypeDescriptor) -> Result<FieldMap> {
    if let TypeShape::Scalar(ty) = descriptor.shape() {
        return Err(Error::invalid_type(
            descriptor.name(),
            format!("a single {ty} value is not a record of named fields"),
        ));
    }

    let mut candidates: Vec<Candidate> = Vec::new();
    // Types expanded on shallower levels; guards against cycles
    let mut expanded: AHashSet<TypeId> = AHashSet::new();
    let mut level = vec![Pending {
        descriptor: descriptor.clone(),
        path: Vec::new(),
        prefix: String::new(),
    }];
    let mut depth = 0;

    while !level.is_empty() {
        let mut next = Vec::new();
        let mut seen_here = Vec::with_capacity(level.len());

        for pending in level {
            let type_id = pending.descriptor.type_id();
            if expanded.contains(&type_id) {
                continue;
            }
            seen_here.push(type_id);

            let fields = match pending.descriptor.shape() {
                TypeShape::Record(fields) => fields,
                TypeShape::Scalar(_) => {
                    return Err(Error::invalid_type(
                        descriptor.name(),
                        format!(
                            "flattened field '{}' is not a record",
                            pending.prefix.trim_end_matches('.')
                        ),
                    ));
                }
            };

            for (index, field) in fields.iter().enumerate() {
                let tag = Tag::parse(field.tag.unwrap_or(""));
                if tag.is_ignored() {
                    continue;
                }

                let mut path = pending.path.clone();
                path.push(index);
                let rust_path = format!("{}{}", pending.prefix, field.name);

                match field.shape {
                    FieldShape::Record(describe) => {
                        if tag.has_name() {
                            return Err(Error::invalid_type(
                                descriptor.name(),
                                format!(
                                    "flattened field '{rust_path}' cannot be named column '{}'",
                                    tag.name
                                ),
                            ));
                        }
                        next.push(Pending {
                            descriptor: describe(),
                            path,
                            prefix: format!("{rust_path}."),
                        });
                    }
                    FieldShape::Cell(field_type) => candidates.push(Candidate {
                        entry: FieldEntry {
                            name: tag.name_or(field.name).to_string(),
                            path,
                            field: rust_path,
                            field_type,
                            omitempty: tag.omitempty,
                        },
                        depth,
                    }),
                    FieldShape::Opaque => {
                        return Err(Error::invalid_type(
                            descriptor.name(),
                            format!(
                                "field '{rust_path}' has no cell conversion; tag it \"-\" to skip it"
                            ),
                        ));
                    }
                }
            }
        }

        expanded.extend(seen_here);
        level = next;
        depth += 1;
    }

    let entries = dominant_fields(candidates);
    log::debug!(
        "Resolved {} columns for {}",
        entries.len(),
        descriptor.name()
    );

    let index = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.clone(), i))
        .collect();

    Ok(FieldMap {
        type_name: descriptor.name(),
        type_id: descriptor.type_id(),
        entries,
        index,
    })
}

/// Keep the single shallowest candidate per column name
fn dominant_fields(candidates: Vec<Candidate>) -> Vec<FieldEntry> {
    // name -> (minimum depth, candidates at that depth)
    let mut best: AHashMap<&str, (usize, usize)> = AHashMap::new();
    for c in &candidates {
        best.entry(c.entry.name.as_str())
            .and_modify(|(depth, count)| {
                if c.depth < *depth {
                    *depth = c.depth;
                    *count = 1;
                } else if c.depth == *depth {
                    *count += 1;
                }
            })
            .or_insert((c.depth, 1));
    }

    let winners: AHashSet<(String, usize)> = best
        .iter()
        .filter_map(|(name, &(depth, count))| {
            if count == 1 {
                Some((name.to_string(), depth))
            } else {
                log::debug!("Dropping ambiguous column '{name}' ({count} fields at depth {depth})");
                None
            }
        })
        .collect();

    let mut entries: Vec<FieldEntry> = candidates
        .into_iter()
        .filter(|c| winners.contains(&(c.entry.name.clone(), c.depth)))
        .map(|c| c.entry)
        .collect();

    // Declaration order: a flattened record's fields sit where it is declared
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}
