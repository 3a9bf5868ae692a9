//! YAML Parser
//!
//! Provides utilities for reading fields out of YAML theme documents.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        serde_yaml::from_str(yaml_str).map_err(|e| ParseError::ParseError(e.to_string()))
    }

    /// Parse YAML string containing multiple documents
    ///
    /// Documents may be separated by explicit `---` lines. A `theme:` key at
    /// column 0 also starts a new document, so several themes can be
    /// concatenated without separators.
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        use serde::Deserialize;

        let preprocessed = Self::preprocess_multi_document(yaml_str);

        let deserializer = serde_yaml::Deserializer::from_str(&preprocessed);
        let mut documents = Vec::new();

        for document in deserializer {
            let value = YamlValue::deserialize(document)
                .map_err(|e| ParseError::ParseError(e.to_string()))?;
            if !value.is_null() {
                documents.push(value);
            }
        }

        Ok(documents)
    }

    /// Insert `---` before every `theme:` at line start after the first
    fn preprocess_multi_document(yaml_str: &str) -> String {
        let mut result = String::with_capacity(yaml_str.len() + 16);
        let mut seen_definition = false;
        let mut recent_separator = false;

        for line in yaml_str.lines() {
            let trimmed = line.trim();

            let is_definition_start = !line.starts_with(' ')
                && !line.starts_with('\t')
                && trimmed.starts_with("theme:");

            if is_definition_start && seen_definition && !recent_separator {
                result.push_str("---\n");
            }
            if is_definition_start {
                seen_definition = true;
            }

            result.push_str(line);
            result.push('\n');

            if trimmed == "---" {
                recent_separator = true;
            } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
                recent_separator = false;
            }
        }

        result
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Err(ParseError::MissingField {
                field: field.to_string(),
            }),
            Some(value) => Self::as_string(value, field),
        }
    }

    /// Get an optional string field from YAML object
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get the first present string field among `fields`
    ///
    /// Used for fields that accept an alias (e.g. `id` / `qid`).
    pub fn get_string_any(obj: &YamlValue, fields: &[&str]) -> Result<String> {
        for field in fields {
            if Self::has_field(obj, field) {
                return Self::get_string(obj, field);
            }
        }
        Err(ParseError::MissingField {
            field: fields.join(" | "),
        })
    }

    /// Get an optional non-negative integer field from YAML object
    pub fn get_optional_u32(obj: &YamlValue, field: &str) -> Result<Option<u32>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| ParseError::TypeMismatch {
                    field: field.to_string(),
                    expected: "non-negative integer".to_string(),
                    actual: Self::type_name(value).to_string(),
                }),
        }
    }

    /// Get a required array field from YAML object
    pub fn get_array<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        let value = obj.get(field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })?;
        value.as_sequence().ok_or_else(|| ParseError::TypeMismatch {
            field: field.to_string(),
            expected: "sequence".to_string(),
            actual: Self::type_name(value).to_string(),
        })
    }

    /// Get a required object field from YAML object
    pub fn get_object<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a serde_yaml::Mapping> {
        let value = obj.get(field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })?;
        value.as_mapping().ok_or_else(|| ParseError::TypeMismatch {
            field: field.to_string(),
            expected: "mapping".to_string(),
            actual: Self::type_name(value).to_string(),
        })
    }

    /// Get an optional object field from YAML object
    pub fn get_optional_object<'a>(
        obj: &'a YamlValue,
        field: &str,
    ) -> Option<&'a serde_yaml::Mapping> {
        obj.get(field).and_then(|v| v.as_mapping())
    }

    /// Read a scalar as a string; numbers and booleans are rejected
    pub fn as_string(value: &YamlValue, field: &str) -> Result<String> {
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::TypeMismatch {
                field: field.to_string(),
                expected: "string".to_string(),
                actual: Self::type_name(value).to_string(),
            })
    }

    /// Convert a YAML mapping of strings to ordered pairs
    pub fn mapping_to_pairs(mapping: &serde_yaml::Mapping, field: &str) -> Result<Vec<(String, String)>> {
        mapping
            .iter()
            .map(|(key, value)| {
                let k = Self::as_string(key, field)?;
                let v = Self::as_string(value, &format!("{}.{}", field, k))?;
                Ok((k, v))
            })
            .collect()
    }

    /// Check if a field exists in YAML object
    pub fn has_field(obj: &YamlValue, field: &str) -> bool {
        obj.get(field).is_some()
    }

    /// Short name of a YAML value's type for error messages
    pub fn type_name(value: &YamlValue) -> &'static str {
        match value {
            YamlValue::Null => "null",
            YamlValue::Bool(_) => "bool",
            YamlValue::Number(_) => "number",
            YamlValue::String(_) => "string",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::Mapping(_) => "mapping",
            YamlValue::Tagged(_) => "tagged",
        }
    }

    /// Validate fields in a YAML object against a list of known fields
    /// Returns warnings for unknown fields with suggestions
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(mapping) = obj.as_mapping() {
            for (key, _) in mapping {
                if let Some(field_name) = key.as_str() {
                    if !known_fields.contains(&field_name) {
                        let typo_correction = FIELD_CORRECTIONS
                            .iter()
                            .find(|(typo, _)| *typo == field_name)
                            .map(|(_, correct)| *correct);

                        let suggestion = if let Some(correct) = typo_correction {
                            format!(" Did you mean '{}'?", correct)
                        } else if let Some(similar) = Self::find_similar_field(field_name, known_fields) {
                            format!(" Did you mean '{}'?", similar)
                        } else {
                            String::new()
                        };

                        let warning = format!("Unknown field '{}' in {}.{}", field_name, context, suggestion);
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }

        warnings
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name typos and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("question", "questions"),
    ("option", "options"),
    ("choices", "options"),
    ("rule", "rules"),
    ("fallbacks", "fallback"),
    ("default", "fallback"),
    ("desc", "description"),
    ("icon", "emoji"),
    ("humour_style", "humor_style"),
    ("flavour", "flavor"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, &c1) in s1_chars.iter().enumerate() {
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1,      // deletion
                    matrix[i + 1][j] + 1,      // insertion
                ),
                matrix[i][j] + cost,           // substitution
            );
        }
    }

    matrix[len1][len2]
}
