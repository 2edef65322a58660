//! Input validation for outgoing messages and settings fields

use crate::message::MAX_BODY_CHARS;

/// Maximum length of a display name, in characters
const MAX_USERNAME_CHARS: usize = 32;

/// Trims a composed message and checks that the store would accept it.
///
/// Returns the trimmed body on success.
pub fn validate_message(input: &str) -> Result<&str, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    let len = text.chars().count();
    if len > MAX_BODY_CHARS {
        return Err(format!(
            "Message too long ({} characters, max {})",
            len, MAX_BODY_CHARS
        ));
    }

    Ok(text)
}

/// Validates the local display name used to tell own messages from others
pub fn validate_username(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if name.chars().count() > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username too long (max {} characters)",
            MAX_USERNAME_CHARS
        ));
    }

    if name.contains(|c: char| c.is_control()) {
        return Err("Username contains invalid characters".to_string());
    }

    Ok(())
}

/// Validates a message store base URL and strips any trailing slash
pub fn validate_store_url(url: &str) -> Result<String, String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("Store URL cannot be empty".to_string());
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| "Store URL must start with http:// or https://".to_string())?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err("Store URL has no host".to_string());
    }

    if url.contains(char::is_whitespace) {
        return Err("Store URL cannot contain spaces".to_string());
    }

    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert_eq!(validate_message("hello").unwrap(), "hello");
        assert_eq!(validate_message("  padded  ").unwrap(), "padded");
        assert!(validate_message(&"x".repeat(140)).is_ok());

        assert!(validate_message("").is_err());
        assert!(validate_message("   \t ").is_err());
        assert!(validate_message(&"x".repeat(141)).is_err());
    }

    #[test]
    fn test_validate_message_counts_characters_not_bytes() {
        // 140 three-byte characters is still within the limit
        let text = "日".repeat(140);
        assert!(validate_message(&text).is_ok());
        assert!(validate_message(&format!("{}日", text)).is_err());
    }

    #[test]
    fn test_validate_message_trims_before_measuring() {
        let text = format!("  {}  ", "x".repeat(140));
        assert_eq!(validate_message(&text).unwrap().len(), 140);
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Bob the Builder").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("bad\nname").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_store_url() {
        assert_eq!(
            validate_store_url("https://chat.example.com/").unwrap(),
            "https://chat.example.com"
        );
        assert_eq!(
            validate_store_url("http://127.0.0.1:8080").unwrap(),
            "http://127.0.0.1:8080"
        );

        assert!(validate_store_url("").is_err());
        assert!(validate_store_url("chat.example.com").is_err());
        assert!(validate_store_url("ftp://chat.example.com").is_err());
        assert!(validate_store_url("https://").is_err());
        assert!(validate_store_url("https://chat example.com").is_err());
    }
}
