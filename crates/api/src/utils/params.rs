//! Parameter-building helpers

use sailthru_domain::{Result, SailthruError};

/// Booleans travel as `1`/`0`.
pub fn flag(value: bool) -> i64 {
    i64::from(value)
}

/// Join values with commas, the way multi-valued fields are sent.
pub fn join<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|value| value.as_ref().to_string()).collect::<Vec<_>>().join(",")
}

/// Reject empty identifiers before a request is made.
///
/// # Errors
/// Returns `SailthruError::InvalidInput` naming `field` when `value` is blank.
pub fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SailthruError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_commas() {
        assert_eq!(join(["a@b.com", "c@d.com"]), "a@b.com,c@d.com");
        assert_eq!(join(Vec::<String>::new()), "");
    }

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("list", "vip").is_ok());
        assert!(matches!(require("list", "  "), Err(SailthruError::InvalidInput(msg)) if msg.contains("list")));
    }
}
