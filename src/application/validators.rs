use validator::ValidateEmail;

/// Checks that an address is deliverable-looking before it reaches the
/// contact table or a recipient list. Surrounding whitespace is ignored.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    !trimmed.is_empty() && trimmed.validate_email()
}
