//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! parsing and normalization so every entry point enforces the same rules.

use crate::{EngineError, ResultEngine};

/// Parses a non-negative decimal with at most two fractional digits into
/// hundredths.
///
/// Accepts `.` or `,` as decimal separator and an optional leading `+`.
/// `label` names the value in error messages.
pub(crate) fn parse_hundredths(s: &str, label: &str) -> ResultEngine<i64> {
    let invalid = || EngineError::InvalidAmount(format!("invalid {label}"));
    let overflow = || EngineError::InvalidAmount(format!("{label} too large"));

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(format!("empty {label}")));
    }
    if trimmed.starts_with('-') {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be negative"
        )));
    }

    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
    let rest = rest.replace(',', ".");
    let mut parts = rest.split('.');
    let whole_str = parts.next().ok_or_else(invalid)?;
    let frac_str = parts.next();

    if parts.next().is_some() {
        return Err(invalid());
    }

    // ".5" is accepted, "." alone is not
    let whole: i64 = match (whole_str.is_empty(), frac_str) {
        (true, Some(frac)) if !frac.is_empty() => 0,
        (true, _) => return Err(invalid()),
        (false, _) => {
            if !whole_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            whole_str.parse().map_err(|_| overflow())?
        }
    };

    let frac: i64 = match frac_str {
        None | Some("") => 0,
        Some(frac) => {
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            match frac.len() {
                1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => frac.parse::<i64>().map_err(|_| invalid())?,
                _ => {
                    return Err(EngineError::InvalidAmount(format!(
                        "{label} has too many decimals"
                    )));
                }
            }
        }
    };

    whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(overflow)
}

/// Trims a required text field, failing with `MissingField` when empty.
pub(crate) fn normalize_required(value: &str, form: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField(form.to_string()));
    }
    Ok(trimmed.to_string())
}
