use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::error::AppError;

/// Accumulated per-field validation failures for a single request.
///
/// Field order is stable (BTreeMap) so error payloads are deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Top-level message: the first failure, with a suffix counting the rest.
    pub fn message(&self) -> String {
        let total: usize = self.errors.values().map(Vec::len).sum();
        let first = self
            .errors
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());

        match total {
            0 | 1 => first,
            2 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {} more errors)", n - 1),
        }
    }

    /// Finish a validation pass: error out when any failure was recorded.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// Human-readable field name the way validation messages spell it
/// ("customer_id" -> "customer id").
pub fn field_label(field: &str) -> String {
    field.replace('_', " ")
}

/// Parse an optional integer query parameter, recording a failure on bad input.
pub fn optional_int(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(
                field,
                format!("The {} field must be an integer.", field_label(field)),
            );
            None
        }
    }
}

/// Parse an optional integer restricted to an inclusive range.
pub fn optional_int_between(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    min: i64,
    max: i64,
) -> Option<i64> {
    let value = optional_int(errors, field, raw)?;
    if value < min || value > max {
        errors.add(
            field,
            format!(
                "The {} field must be between {min} and {max}.",
                field_label(field)
            ),
        );
        return None;
    }
    Some(value)
}

/// Parse an optional integer with a lower bound only.
pub fn optional_int_min(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    min: i64,
) -> Option<i64> {
    let value = optional_int(errors, field, raw)?;
    if value < min {
        errors.add(
            field,
            format!("The {} field must be at least {min}.", field_label(field)),
        );
        return None;
    }
    Some(value)
}

/// Parse an optional bool-like parameter accepting true/false/0/1.
pub fn optional_bool(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<bool> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match raw {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            errors.add(
                field,
                format!("The selected {} is invalid.", field_label(field)),
            );
            None
        }
    }
}

/// Record the failure for a foreign key that resolved to nothing.
pub fn invalid_selection(errors: &mut ValidationErrors, field: &str) {
    errors.add(
        field,
        format!("The selected {} is invalid.", field_label(field)),
    );
}

/// Record the failure for a missing required field.
pub fn required(errors: &mut ValidationErrors, field: &str) {
    errors.add(field, format!("The {} field is required.", field_label(field)));
}
