// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned record identifier. Most collections serve integer ids,
/// but a few legacy payloads carry them as strings; both shapes are kept
/// verbatim so route paths round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(number) => number.as_i64().map(Self::Int),
            serde_json::Value::String(text) if !text.trim().is_empty() => {
                Some(Self::Text(text.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;
    use serde_json::json;

    #[test]
    fn id_decodes_from_number_and_string_payloads() {
        assert_eq!(RecordId::from_value(&json!(42)), Some(RecordId::Int(42)));
        assert_eq!(
            RecordId::from_value(&json!("P-42")),
            Some(RecordId::Text("P-42".to_owned()))
        );
        assert_eq!(RecordId::from_value(&json!(null)), None);
        assert_eq!(RecordId::from_value(&json!("")), None);
        assert_eq!(RecordId::from_value(&json!([1])), None);
    }

    #[test]
    fn id_display_matches_route_segment_shape() {
        assert_eq!(RecordId::Int(7).to_string(), "7");
        assert_eq!(RecordId::from("P-42").to_string(), "P-42");
    }
}
