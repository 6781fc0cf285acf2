//! Workflow variables captured during process execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transfer::WorkflowInstanceKey;

/// A named value recorded by the workflow engine for one process instance.
///
/// `value` holds the text exactly as the exporter wrote it (JSON-escaped and
/// usually wrapped in quotes); use [`Variable::unescaped`] for the read views
/// and [`decode_value`] when forwarding it to a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub workflow_instance_key: WorkflowInstanceKey,
    #[schema(example = "debtorIban")]
    pub name: String,
    #[schema(example = "\"DE89370400440532013000\"")]
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

impl Variable {
    /// Returns the variable with its value unescaped for external use.
    pub fn unescaped(mut self) -> Self {
        self.value = unescape_value(&self.value);
        self
    }
}

/// Turns a stored variable value into its plain text form.
///
/// Backslash escapes are resolved twice (values are escaped once by the
/// engine and once more by the exporter), then a single leading and a single
/// trailing double quote are removed.
pub fn unescape_value(raw: &str) -> String {
    let once = unescape_escapes(raw);
    let twice = unescape_escapes(&once);
    let trimmed = twice.strip_prefix('"').unwrap_or(&twice);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Decodes a stored value once as a JSON string, for handing it on to a
/// workflow unchanged.
///
/// Values that are not a JSON string literal are returned as stored.
pub fn decode_value(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
}

fn unescape_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0c}'),
            Some(q @ ('"' | '\'' | '\\' | '/')) => out.push(q),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
