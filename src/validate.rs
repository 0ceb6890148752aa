use crate::error::ValidationError;

/// Accepts the local Kenyan mobile format `0[71]XXXXXXXX` (10 digits,
/// `07…` or `01…`) and returns the international form: `254` followed by
/// the last 9 digits.
pub fn normalize_phone(input: &str) -> Result<String, ValidationError> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone);
    }
    if bytes[0] != b'0' || !(bytes[1] == b'7' || bytes[1] == b'1') {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(format!("254{}", &input[1..]))
}

pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount < 1 {
        return Err(ValidationError::AmountTooSmall);
    }
    Ok(())
}
