use super::ApiError;

pub fn validate_bot_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid bot ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_command_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Command name cannot be empty"));
    }

    if trimmed.len() > 100 {
        return Err(ApiError::validation(
            "Command name must be 100 characters or less",
        ));
    }

    Ok(trimmed)
}

pub fn validate_response_time(ms: i32) -> Result<i32, ApiError> {
    if ms < 0 {
        return Err(ApiError::validation(format!(
            "Invalid response time: {}. Must be a non-negative number of milliseconds",
            ms
        )));
    }
    Ok(ms)
}

pub fn validate_prompt(prompt: &str) -> Result<&str, ApiError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Prompt cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bot_id() {
        assert!(validate_bot_id(1).is_ok());
        assert!(validate_bot_id(12345).is_ok());
        assert!(validate_bot_id(0).is_err());
        assert!(validate_bot_id(-1).is_err());
    }

    #[test]
    fn test_validate_command_name() {
        assert!(validate_command_name("ping").is_ok());
        assert_eq!(validate_command_name("  ping  ").unwrap(), "ping");
        assert!(validate_command_name("").is_err());
        assert!(validate_command_name("   ").is_err());
        assert!(validate_command_name("a".repeat(101).as_str()).is_err());
    }

    #[test]
    fn test_validate_response_time() {
        assert!(validate_response_time(0).is_ok());
        assert!(validate_response_time(500).is_ok());
        assert!(validate_response_time(-1).is_err());
    }

    #[test]
    fn test_validate_prompt() {
        assert!(validate_prompt("make a greeting command").is_ok());
        assert!(validate_prompt("").is_err());
        assert!(validate_prompt("   ").is_err());
    }
}
