//! Well-known attribute lookup.
//!
//! The storage adapter owns the entity schema. The compiler only asks
//! whether a field name refers to one of its fixed columns; every other
//! field is treated as a generic metadata key.

use std::collections::BTreeSet;

/// Attribute names of the workflow entity that may be used unqualified.
pub const WORKFLOW_ATTRIBUTES: &[&str] = &[
    "bucket.name",
    "name",
    "project_name",
    "created_at",
    "last_revision_id",
];

/// Read-only lookup of well-known attribute names.
pub trait AttributeSchema {
    /// Returns true when `field` names a fixed entity attribute.
    fn is_well_known(&self, field: &str) -> bool;
}

impl<F> AttributeSchema for F
where
    F: Fn(&str) -> bool,
{
    fn is_well_known(&self, field: &str) -> bool {
        self(field)
    }
}

/// A fixed set of well-known attribute names.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WellKnownAttributes {
    names: BTreeSet<String>,
}

impl WellKnownAttributes {
    /// Create a schema from the given attribute names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The attributes of the workflow entity: bucket name, workflow name,
    /// project name, creation time and last revision id.
    pub fn workflow() -> Self {
        Self::new(WORKFLOW_ATTRIBUTES.iter().copied())
    }

    /// Iterate over the attribute names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl AttributeSchema for WellKnownAttributes {
    fn is_well_known(&self, field: &str) -> bool {
        self.names.contains(field)
    }
}
