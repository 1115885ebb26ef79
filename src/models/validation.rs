//! Field checks shared by the request types.
//!
//! Each check returns `AppError::InvalidRequest` naming the offending field.

use rust_decimal::Decimal;

use crate::error::AppError;

pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} must not be blank")));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: Decimal) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(format!("{field} must be positive")));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: Decimal) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::InvalidRequest(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// Minimal shape check: one `@` with something on both sides and a dot in the domain.
pub fn require_email(value: &str) -> Result<(), AppError> {
    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };

    if !valid {
        return Err(AppError::InvalidRequest("email is not valid".to_string()));
    }
    Ok(())
}

/// Validate a CPF and return it as the bare 11-digit string that gets stored.
///
/// `284.759.346-25` and `28475934625` normalize to the same value, so the
/// unique constraint on `customers.cpf` sees one tax id, not two.
pub fn normalize_cpf(value: &str) -> Result<String, AppError> {
    if !is_valid_cpf(value) {
        return Err(AppError::InvalidRequest("cpf is not valid".to_string()));
    }
    Ok(value.chars().filter(char::is_ascii_digit).collect())
}

/// Brazilian CPF: 11 digits, the last two being mod-11 check digits.
///
/// Punctuation (`123.456.789-09`) is tolerated. Sequences of one repeated
/// digit pass the checksum but are not issued, so they are rejected.
pub fn is_valid_cpf(value: &str) -> bool {
    let digits: Vec<u32> = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | '-'))
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}
