//! Field descriptor model and the baseline catalog.

pub mod standard;
pub mod types;

pub use standard::{is_standard_field, standard_fields};
pub use types::*;

/// Appended to display names of metadata fields that link to CRM records.
pub const LINK_GLYPH: &str = "🔗";

/// Find a descriptor by id.
pub fn find<'a>(fields: &'a [FieldDescriptor], id: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.id == id)
}

/// Find a descriptor by display name, ignoring ASCII case and the link glyph.
pub fn find_by_name<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields
        .iter()
        .find(|f| plain_name(&f.name).eq_ignore_ascii_case(name.trim()))
}

fn plain_name(name: &str) -> &str {
    name.trim_end_matches(LINK_GLYPH).trim()
}

/// Turn a payload key into a display label: `lead_source` → `Lead Source`.
pub fn humanize(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
