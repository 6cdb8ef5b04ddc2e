use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::habit::{FieldKind, FieldRule, HabitType};
use crate::models::record::{FieldValue, Fields};

/// Keys that record output already uses for the day and capture time.
const RESERVED_FIELDS: &[&str] = &["date", "timestamp"];

/// Field-level rejection of a submission: one message per invalid field.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("invalid {habit} record: {}", field_list(.errors))]
pub struct ValidationErrors {
    pub habit: HabitType,
    pub errors: BTreeMap<String, String>,
}

fn field_list(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Full outcome of checking a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
    pub data: Fields,
}

/// Check every rule for the habit without stopping at the first failure.
///
/// Numeric text is coerced to numbers; blank optional fields are dropped.
/// Fields with no rule (notes, exercises, custom metrics) pass through untouched.
pub fn check(habit: &HabitType, fields: &Fields) -> Validation {
    let mut data = fields.clone();
    let mut errors = BTreeMap::new();

    for name in RESERVED_FIELDS {
        if data.remove(*name).is_some() {
            errors.insert(name.to_string(), format!("{} is a reserved field name", name));
        }
    }

    for rule in habit.rules() {
        let submitted = fields.get(rule.name).filter(|v| !v.is_blank());
        match check_field(rule, submitted) {
            Ok(Some(normalized)) => {
                data.insert(rule.name.to_string(), normalized);
            }
            Ok(None) => {
                data.remove(rule.name);
            }
            Err(msg) => {
                errors.insert(rule.name.to_string(), msg);
            }
        }
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
        data,
    }
}

/// Validate a submission, returning the normalized fields or the per-field errors.
pub fn validate(habit: &HabitType, fields: &Fields) -> Result<Fields, ValidationErrors> {
    let v = check(habit, fields);
    if v.is_valid {
        Ok(v.data)
    } else {
        tracing::debug!(habit = %habit, errors = v.errors.len(), "submission rejected");
        Err(ValidationErrors {
            habit: habit.clone(),
            errors: v.errors,
        })
    }
}

fn check_field(rule: &FieldRule, value: Option<&FieldValue>) -> Result<Option<FieldValue>, String> {
    let Some(value) = value else {
        return if rule.required {
            Err(format!("{} is required", rule.label))
        } else {
            Ok(None)
        };
    };

    match rule.kind {
        FieldKind::Text => match value {
            FieldValue::Text(s) => Ok(Some(FieldValue::Text(s.clone()))),
            FieldValue::Number(n) => Ok(Some(FieldValue::Text(n.to_string()))),
        },
        FieldKind::Number { min, max, unit } => {
            let n = value
                .as_number()
                .ok_or_else(|| format!("{} must be a number", rule.label))?;
            if n < min || n > max {
                let suffix = if unit.is_empty() {
                    String::new()
                } else {
                    format!(" {}", unit)
                };
                return Err(format!(
                    "{} must be between {} and {}{}",
                    rule.label, min, max, suffix
                ));
            }
            Ok(Some(FieldValue::Number(n)))
        }
    }
}
