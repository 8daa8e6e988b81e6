#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a nickname")]
    BlankNickname,
}

/// Trims the nickname and rejects it if nothing is left.
pub fn validate_nickname(nickname: &str) -> Result<&str, ValidationError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankNickname);
    }
    Ok(trimmed)
}
