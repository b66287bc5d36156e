use regex::Regex;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("zone name is empty")]
    Empty,
    #[error("zone name too long (max 253 characters)")]
    TooLong,
    #[error("zone name contains an empty label")]
    EmptyLabel,
    #[error("zone name label too long (max 63 characters)")]
    LabelTooLong,
    #[error("zone name contains invalid characters (only a-z, 0-9, '.' and '-' allowed)")]
    InvalidCharacters,
    #[error("zone name labels must not start or end with '-'")]
    LeadingOrTrailingHyphen,
}

lazy_static::lazy_static! {
    /// Only lowercase letters, digits and '-'
    static ref LABEL_RE: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
}

/// Validate a DNS zone name such as `example.com` (trailing dot tolerated).
pub fn validate_zone_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim_end_matches('.');
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    if name.len() > 253 {
        return Err(ValidationError::TooLong);
    }
    for label in name.split('.') {
        validate_label(label)?;
    }

    Ok(())
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.len() > 63 {
        return Err(ValidationError::LabelTooLong);
    }
    if !LABEL_RE.is_match(label) {
        return Err(ValidationError::InvalidCharacters);
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::LeadingOrTrailingHyphen);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_zone_names() {
        assert!(validate_zone_name("example.com").is_ok());
        assert!(validate_zone_name("sub.example.co.uk").is_ok());
        assert!(validate_zone_name("xn--bcher-kva.example").is_ok());
        assert!(validate_zone_name("example.com.").is_ok());
    }

    #[test]
    fn rejects_empty_names() {
        assert!(matches!(validate_zone_name(""), Err(ValidationError::Empty)));
        assert!(matches!(
            validate_zone_name("."),
            Err(ValidationError::Empty)
        ));
    }

    #[test]
    fn rejects_bad_labels() {
        assert!(matches!(
            validate_zone_name("foo..com"),
            Err(ValidationError::EmptyLabel)
        ));
        assert!(matches!(
            validate_zone_name("Example.com"),
            Err(ValidationError::InvalidCharacters)
        ));
        assert!(matches!(
            validate_zone_name("foo_bar.com"),
            Err(ValidationError::InvalidCharacters)
        ));
        assert!(matches!(
            validate_zone_name("-foo.com"),
            Err(ValidationError::LeadingOrTrailingHyphen)
        ));
    }

    #[test]
    fn rejects_overlong_names() {
        let label = "a".repeat(64);
        assert!(matches!(
            validate_zone_name(&format!("{label}.com")),
            Err(ValidationError::LabelTooLong)
        ));

        let long = vec!["abcdefgh"; 30].join(".");
        assert!(matches!(
            validate_zone_name(&long),
            Err(ValidationError::TooLong)
        ));
    }
}
