//! Theme parser
//!
//! Parses YAML theme definitions into [`Theme`] values.

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use serde_yaml::Value as YamlValue;
use shindan_core::{Condition, Question, QuestionKind, Rule, RuleSet, Theme, ThemeCard, TypeDef};
use std::collections::HashMap;

const THEME_FIELDS: &[&str] = &[
    "id",
    "title",
    "humor_style",
    "card",
    "questions",
    "rules",
    "types",
    "flavor",
];
const CARD_FIELDS: &[&str] = &["emoji", "title", "description"];
const QUESTION_FIELDS: &[&str] = &["id", "qid", "text", "type", "options", "weight"];
const RULES_FIELDS: &[&str] = &["map", "fallback"];
const RULE_FIELDS: &[&str] = &["if", "type_id"];
const TYPE_FIELDS: &[&str] = &["id", "type_id", "label", "emoji", "description"];

/// A parsed theme file
#[derive(Debug, Clone)]
pub struct ThemeDocument {
    pub theme: Theme,

    /// Flavor text per type id
    pub flavor: HashMap<String, String>,

    /// Unknown-field warnings collected while parsing
    pub warnings: Vec<String>,
}

/// Theme parser
pub struct ThemeParser;

impl ThemeParser {
    /// Parse a single theme document from YAML string
    pub fn parse(yaml_str: &str) -> Result<ThemeDocument> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse every theme document in a YAML string
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<ThemeDocument>> {
        YamlParser::parse_multi_document(yaml_str)?
            .iter()
            .map(Self::parse_from_yaml)
            .collect()
    }

    /// Parse a theme from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<ThemeDocument> {
        let theme_obj = yaml.get("theme").ok_or_else(|| ParseError::MissingField {
            field: "theme".to_string(),
        })?;

        let id = YamlParser::get_string(theme_obj, "id")?;
        let context = format!("theme '{}'", id);
        let mut warnings = YamlParser::validate_fields(theme_obj, THEME_FIELDS, &context);

        let title = YamlParser::get_string(theme_obj, "title")?;
        let humor_style = YamlParser::get_optional_string(theme_obj, "humor_style");

        let card = match theme_obj.get("card") {
            Some(card_obj) => {
                warnings.extend(YamlParser::validate_fields(card_obj, CARD_FIELDS, "card"));
                Some(Self::parse_card(card_obj)?)
            }
            None => None,
        };

        let questions = YamlParser::get_array(theme_obj, "questions")?
            .iter()
            .enumerate()
            .map(|(index, q)| {
                warnings.extend(YamlParser::validate_fields(
                    q,
                    QUESTION_FIELDS,
                    &format!("questions[{}]", index),
                ));
                Self::parse_question(q, index)
            })
            .collect::<Result<Vec<_>>>()?;

        if questions.is_empty() {
            return Err(ParseError::InvalidValue {
                field: "questions".to_string(),
                message: "a theme needs at least one question".to_string(),
            });
        }

        let rules_obj = theme_obj.get("rules").ok_or_else(|| ParseError::MissingField {
            field: "rules".to_string(),
        })?;
        warnings.extend(YamlParser::validate_fields(rules_obj, RULES_FIELDS, "rules"));
        let rules = Self::parse_rules(rules_obj, &mut warnings)?;

        let types = YamlParser::get_array(theme_obj, "types")?
            .iter()
            .enumerate()
            .map(|(index, t)| {
                warnings.extend(YamlParser::validate_fields(
                    t,
                    TYPE_FIELDS,
                    &format!("types[{}]", index),
                ));
                Self::parse_type(t)
            })
            .collect::<Result<Vec<_>>>()?;

        let flavor = match YamlParser::get_optional_object(theme_obj, "flavor") {
            Some(mapping) => YamlParser::mapping_to_pairs(mapping, "flavor")?
                .into_iter()
                .collect(),
            None => HashMap::new(),
        };

        let theme = Theme {
            id,
            title,
            humor_style,
            card,
            questions,
            rules,
            types,
        };

        Ok(ThemeDocument {
            theme,
            flavor,
            warnings,
        })
    }

    fn parse_card(yaml: &YamlValue) -> Result<ThemeCard> {
        Ok(ThemeCard {
            emoji: YamlParser::get_string(yaml, "emoji")?,
            title: YamlParser::get_string(yaml, "title")?,
            description: YamlParser::get_string(yaml, "description")?,
        })
    }

    /// Parse a question
    fn parse_question(yaml: &YamlValue, index: usize) -> Result<Question> {
        let id = YamlParser::get_string_any(yaml, &["id", "qid"])?;
        let text = YamlParser::get_string(yaml, "text")?;

        let kind = match YamlParser::get_optional_string(yaml, "type").as_deref() {
            None | Some("choice") => QuestionKind::Choice,
            Some(other) => {
                return Err(ParseError::InvalidValue {
                    field: format!("questions[{}].type", index),
                    message: format!("Unknown question type: {}", other),
                })
            }
        };

        let options_field = format!("questions[{}].options", index);
        let options = YamlParser::get_array(yaml, "options")?
            .iter()
            .enumerate()
            .map(|(i, v)| YamlParser::as_string(v, &format!("{}[{}]", options_field, i)))
            .collect::<Result<Vec<_>>>()?;

        if options.len() < 2 {
            return Err(ParseError::InvalidValue {
                field: options_field,
                message: format!("question '{}' needs at least 2 options, got {}", id, options.len()),
            });
        }

        let weight = YamlParser::get_optional_u32(yaml, "weight")?.unwrap_or(1);

        Ok(Question {
            id,
            text,
            kind,
            options,
            weight,
        })
    }

    /// Parse the `rules` block
    fn parse_rules(yaml: &YamlValue, warnings: &mut Vec<String>) -> Result<RuleSet> {
        let fallback = YamlParser::get_string(yaml, "fallback")?;

        let rules = match yaml.get("map") {
            None | Some(YamlValue::Null) => Vec::new(),
            Some(_) => YamlParser::get_array(yaml, "map")?
                .iter()
                .enumerate()
                .map(|(index, r)| {
                    warnings.extend(YamlParser::validate_fields(
                        r,
                        RULE_FIELDS,
                        &format!("rules.map[{}]", index),
                    ));
                    Self::parse_rule(r, index)
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(RuleSet { rules, fallback })
    }

    /// Parse a rule
    fn parse_rule(yaml: &YamlValue, index: usize) -> Result<Rule> {
        let type_id = YamlParser::get_string(yaml, "type_id")?;
        let predicate = YamlParser::get_object(yaml, "if")?;

        let conditions = YamlParser::mapping_to_pairs(predicate, &format!("rules.map[{}].if", index))?
            .into_iter()
            .map(|(question_id, expected)| Condition {
                question_id,
                expected,
            })
            .collect();

        Ok(Rule { conditions, type_id })
    }

    /// Parse a result type
    fn parse_type(yaml: &YamlValue) -> Result<TypeDef> {
        Ok(TypeDef {
            id: YamlParser::get_string_any(yaml, &["id", "type_id"])?,
            label: YamlParser::get_string(yaml, "label")?,
            emoji: YamlParser::get_string(yaml, "emoji")?,
            description: YamlParser::get_string(yaml, "description")?,
        })
    }
}
