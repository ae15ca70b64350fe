use crate::constants::*;
use crate::error::LedgerError;

/// Trims `value` and checks it is non-empty and at most `max_length` characters.
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidField {
            field: field_name.to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > max_length {
        return Err(LedgerError::InvalidField {
            field: field_name.to_string(),
            reason: format!("must be at most {} characters", max_length),
        });
    }
    Ok(trimmed.to_string())
}

/// Normalizes an optional free-text field: blank becomes `None`.
pub fn validate_optional_text(
    value: Option<&str>,
    field_name: &str,
    max_length: usize,
) -> Result<Option<String>, LedgerError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => validate_string_length(text, field_name, max_length).map(Some),
    }
}

pub fn validate_positive_amount(amount: f64, field_name: &str) -> Result<f64, LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "{} must be a positive number, got {}",
            field_name, amount
        )));
    }
    Ok(amount)
}

/// Checks an optional share field is finite and not negative. Zero is allowed.
pub fn validate_share_value(value: Option<f64>, field_name: &str) -> Result<(), LedgerError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(LedgerError::InvalidAmount(format!(
            "{} must be a non-negative number, got {}",
            field_name, v
        ))),
        _ => Ok(()),
    }
}

/// Rounds to currency precision. Only the presentation layer calls this.
pub fn round_currency(amount: f64) -> f64 {
    let factor = 10f64.powi(CURRENCY_DECIMALS);
    let rounded = (amount * factor).round() / factor;
    // avoid printing -0.0
    if rounded == 0.0 { 0.0 } else { rounded }
}
