use regex::Regex;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' is not canonical (missing trailing '.')")]
    NotCanonical(String),
    #[error("name is empty")]
    Empty,
    #[error("name '{0}' is too long (max 253 characters)")]
    TooLong(String),
    #[error("label '{0}' is empty or longer than 63 characters")]
    BadLabelLength(String),
    #[error("label '{0}' contains invalid characters")]
    InvalidCharacters(String),
}

lazy_static::lazy_static! {
    /// Letters, digits, '-', '_', '/' (RFC 2317 classless labels) and the '*' wildcard label
    static ref LABEL_RE: Regex = Regex::new(r"^(\*|[A-Za-z0-9_/-]+)$").unwrap();
}

/// True when the name carries the trailing root dot.
pub fn is_canonical(name: &str) -> bool {
    name.ends_with('.')
}

pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > 63 {
        return Err(ValidationError::BadLabelLength(label.to_string()));
    }
    if !LABEL_RE.is_match(label) {
        return Err(ValidationError::InvalidCharacters(label.to_string()));
    }
    Ok(())
}

/// Check a fully-qualified name such as `www.example.org.`.
///
/// The root zone `.` is accepted.
pub fn validate_canonical_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !is_canonical(name) {
        return Err(ValidationError::NotCanonical(name.to_string()));
    }
    if name == "." {
        return Ok(());
    }
    if name.len() > 254 {
        return Err(ValidationError::TooLong(name.to_string()));
    }
    for label in name[..name.len() - 1].split('.') {
        validate_label(label)?;
    }
    Ok(())
}
