//! Named value transforms and the name-based transform suggestion.

use serde::{Deserialize, Serialize};

use crate::catalog::{FieldDescriptor, FieldType};

const TRUNCATE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    #[serde(rename = "phone_format")]
    PhoneFormat,
    #[serde(rename = "capitalize")]
    Capitalize,
    #[serde(rename = "uppercase")]
    Uppercase,
    #[serde(rename = "lowercase")]
    Lowercase,
    #[serde(rename = "truncate_100")]
    Truncate100,
}

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::PhoneFormat => "phone_format",
            Transform::Capitalize => "capitalize",
            Transform::Uppercase => "uppercase",
            Transform::Lowercase => "lowercase",
            Transform::Truncate100 => "truncate_100",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "phone_format" => Some(Transform::PhoneFormat),
            "capitalize" => Some(Transform::Capitalize),
            "uppercase" => Some(Transform::Uppercase),
            "lowercase" => Some(Transform::Lowercase),
            "truncate_100" => Some(Transform::Truncate100),
            _ => None,
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match self {
            Transform::PhoneFormat => format_phone(input),
            Transform::Capitalize => capitalize_words(input),
            Transform::Uppercase => input.to_uppercase(),
            Transform::Lowercase => input.to_lowercase(),
            Transform::Truncate100 => input.chars().take(TRUNCATE_LIMIT).collect(),
        }
    }
}

/// Keep digits and a leading `+`; drop spaces, dashes, parentheses and dots.
fn format_phone(input: &str) -> String {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if trimmed.starts_with('+') {
        format!("+{}", digits)
    } else {
        digits
    }
}

fn capitalize_words(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Advisory transform for a (source, target) pair; never overrides an explicit one.
pub fn suggest_transform(source: &FieldDescriptor, target_id: &str) -> Option<Transform> {
    if source.field_type != FieldType::String {
        return None;
    }
    if target_id.contains("phone") {
        Some(Transform::PhoneFormat)
    } else if target_id.contains("name") {
        Some(Transform::Capitalize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldCategory, FieldType};

    fn field(field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor::custom("x", "X", field_type, FieldCategory::Metadata, "")
    }

    #[test]
    fn phone_format_keeps_plus_and_digits() {
        assert_eq!(Transform::PhoneFormat.apply("+1 (555) 010-2030"), "+15550102030");
        assert_eq!(Transform::PhoneFormat.apply("555.010.2030"), "5550102030");
    }

    #[test]
    fn capitalize_each_word() {
        assert_eq!(Transform::Capitalize.apply("jANE  o'neil"), "Jane O'neil");
    }

    #[test]
    fn truncate_counts_chars() {
        let long = "é".repeat(150);
        assert_eq!(Transform::Truncate100.apply(&long).chars().count(), 100);
        assert_eq!(Transform::Truncate100.apply("short"), "short");
    }

    #[test]
    fn names_round_trip() {
        for t in [
            Transform::PhoneFormat,
            Transform::Capitalize,
            Transform::Uppercase,
            Transform::Lowercase,
            Transform::Truncate100,
        ] {
            assert_eq!(Transform::from_name(t.name()), Some(t));
            assert_eq!(serde_json::to_value(t).unwrap(), t.name());
        }
        assert_eq!(Transform::from_name("none"), None);
    }

    #[test]
    fn suggestions_by_target_name() {
        let s = field(FieldType::String);
        assert_eq!(suggest_transform(&s, "person.phone"), Some(Transform::PhoneFormat));
        assert_eq!(suggest_transform(&s, "person.name"), Some(Transform::Capitalize));
        assert_eq!(suggest_transform(&s, "deal.title"), None);
        assert_eq!(suggest_transform(&field(FieldType::Number), "person.phone"), None);
    }

    #[test]
    fn only_plain_strings_get_suggestions() {
        assert_eq!(suggest_transform(&field(FieldType::Text), "person.name"), None);
        assert_eq!(suggest_transform(&field(FieldType::Url), "person.phone"), None);
        assert_eq!(suggest_transform(&field(FieldType::Enum), "person.name"), None);
        // Case-sensitive substring match on the target id.
        assert_eq!(suggest_transform(&field(FieldType::String), "person.Phone_2"), None);
        assert_eq!(
            suggest_transform(&field(FieldType::String), "person.first_name"),
            Some(Transform::Capitalize)
        );
    }
}
