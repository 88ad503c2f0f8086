pub mod ip;
pub mod password;

/// Generate a URL-safe random token of the given byte length (hex encoded)
pub fn generate_secure_token(bytes: usize) -> String {
    (0..bytes)
        .map(|_| format!("{:02x}", rand::random::<u8>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secure_token_length() {
        let token = generate_secure_token(32);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_secure_token_unique() {
        assert_ne!(generate_secure_token(16), generate_secure_token(16));
    }
}
