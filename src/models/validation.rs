use crate::errors::RelayError;

pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;
pub const MAX_OUTBOUND_MESSAGE_CHARS: usize = 4096;
pub const MAX_ORDER_PAGE_SIZE: u32 = 250;

/// Boundary check run on every inbound payload before it reaches an adapter.
pub trait Validate {
    fn validate(&self) -> Result<(), RelayError>;
}

pub fn validate_required(field: &str, value: &str) -> Result<(), RelayError> {
    if value.trim().is_empty() {
        return Err(RelayError::validation(format!("{} cannot be empty", field)));
    }

    Ok(())
}

pub fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), RelayError> {
    if value.chars().count() > max {
        return Err(RelayError::validation(format!(
            "{} too long (maximum {} characters)",
            field, max
        )));
    }

    Ok(())
}

pub fn validate_currency(currency: &str) -> Result<(), RelayError> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RelayError::validation(format!(
            "currency must be a three-letter code, got '{}'",
            currency
        )));
    }

    Ok(())
}

pub fn validate_amount(field: &str, value: Option<f64>) -> Result<(), RelayError> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err(RelayError::validation(format!(
            "{} must be a non-negative number",
            field
        ))),
    }
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), RelayError> {
    validate_required("phoneNumber", phone_number)?;

    let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);

    if digits.len() < 3 {
        return Err(RelayError::validation(
            "phoneNumber too short (minimum 3 digits)",
        ));
    }

    if digits.len() > 15 {
        return Err(RelayError::validation(
            "phoneNumber too long (maximum 15 digits)",
        ));
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RelayError::validation(
            "phoneNumber must contain only digits after an optional '+'",
        ));
    }

    Ok(())
}

pub fn validate_page_size(limit: u32) -> Result<(), RelayError> {
    if limit == 0 || limit > MAX_ORDER_PAGE_SIZE {
        return Err(RelayError::validation(format!(
            "limit must be between 1 and {}",
            MAX_ORDER_PAGE_SIZE
        )));
    }

    Ok(())
}
