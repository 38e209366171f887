use lettre::Address;

/// Address-syntax check used for contact methods and person records.
pub fn is_valid_email(value: &str) -> bool {
    value.parse::<Address>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("ada.lovelace+crm@mail.example.be"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
    }
}
