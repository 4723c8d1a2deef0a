#![forbid(unsafe_code)]

//! The fixed catalog of filterable fields.

/// A human-readable label paired with the dotted attribute path it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub label: &'static str,
    pub path: &'static str,
    /// Sensitive fields render masked until the record is revealed.
    pub sensitive: bool,
}

impl FieldDescriptor {
    const fn new(label: &'static str, path: &'static str, sensitive: bool) -> Self {
        Self {
            label,
            path,
            sensitive,
        }
    }
}

/// The filterable attribute catalog, defined once at process start.
///
/// `name` doubles as the card title and is the only non-sensitive entry.
pub const FIELD_CATALOG: &[FieldDescriptor] = &[
    FieldDescriptor::new("Name", "name", false),
    FieldDescriptor::new("Email", "email", true),
    FieldDescriptor::new("Username", "username", true),
    FieldDescriptor::new("Phone", "phone", true),
    FieldDescriptor::new("Website", "website", true),
    FieldDescriptor::new("City", "address.city", true),
    FieldDescriptor::new("Company", "company.name", true),
];

/// Look up a catalog entry by its dotted path.
#[must_use]
pub fn descriptor_for(path: &str) -> Option<&'static FieldDescriptor> {
    FIELD_CATALOG.iter().find(|d| d.path == path)
}
