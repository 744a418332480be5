//! `{{call.field}}` placeholders in workflow action values.
//!
//! Placeholders resolve against one call record: `call.<dotted path>` reads the
//! call object and `event` is the event name. These are distinct from mapping
//! ids, which are bare dotted paths.

use serde::{Deserialize, Serialize};

use crate::mapping::preview::value_text;
use crate::parse::CallEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplatePart {
    Lit { value: String },
    Call { path: String },
    Event,
    /// A placeholder in an unknown namespace; rendered back verbatim.
    Unknown { raw: String },
}

/// Split a template into literal and placeholder parts.
pub fn parse_template(input: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut remaining = input;

    while let Some(start) = remaining.find("{{") {
        if start > 0 {
            parts.push(TemplatePart::Lit {
                value: remaining[..start].to_string(),
            });
        }

        let after_open = &remaining[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                parts.push(parse_placeholder(&after_open[..end]));
                remaining = &after_open[end + 2..];
            }
            None => {
                // Unclosed: the rest is literal.
                parts.push(TemplatePart::Lit {
                    value: remaining[start..].to_string(),
                });
                return parts;
            }
        }
    }

    if !remaining.is_empty() {
        parts.push(TemplatePart::Lit {
            value: remaining.to_string(),
        });
    }

    parts
}

fn parse_placeholder(inner: &str) -> TemplatePart {
    let trimmed = inner.trim();
    if trimmed == "event" {
        return TemplatePart::Event;
    }
    match trimmed.split_once('.') {
        Some(("call", path)) if !path.is_empty() => TemplatePart::Call {
            path: path.to_string(),
        },
        _ => TemplatePart::Unknown {
            raw: format!("{{{{{}}}}}", inner),
        },
    }
}

/// Substitute placeholders from `event`. Missing values render empty.
pub fn render(template: &str, event: &CallEvent) -> String {
    let mut out = String::with_capacity(template.len());
    for part in parse_template(template) {
        match part {
            TemplatePart::Lit { value } => out.push_str(&value),
            TemplatePart::Event => out.push_str(&event.event),
            TemplatePart::Call { path } => match event.lookup(&path) {
                Some(value) if !value.is_null() => out.push_str(&value_text(value)),
                _ => tracing::debug!(path = %path, "template placeholder has no value"),
            },
            TemplatePart::Unknown { raw } => out.push_str(&raw),
        }
    }
    out
}

/// Call paths a template refers to, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    parse_template(template)
        .into_iter()
        .filter_map(|part| match part {
            TemplatePart::Call { path } => Some(path),
            _ => None,
        })
        .collect()
}
