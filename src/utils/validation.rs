//! Centralized validation and helper functions.

/// Maximum number of features accepted from a single input (DOS protection).
/// Bacterial genomes carry a few thousand features; this leaves ample room.
pub const MAX_FEATURES: usize = 1_000_000;

/// Longest organism name accepted; it becomes part of every input file name
pub const MAX_ORGANISM_NAME_LENGTH: usize = 200;

/// Check if adding another feature would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new feature.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_feature_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(record); // Safe to add
/// ```
#[must_use]
pub fn check_feature_limit(count: usize) -> Option<String> {
    if count >= MAX_FEATURES {
        Some(format!(
            "Too many features: adding another would exceed maximum of {MAX_FEATURES}"
        ))
    } else {
        None
    }
}

/// Organism name validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty organism name provided")]
    EmptyName,
    #[error("Organism name too long: exceeds {MAX_ORGANISM_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Invalid organism name '{0}': contains path separators or control characters")]
    InvalidName(String),
}

/// Validate an organism name before it is used to build file names.
///
/// The name is joined onto the input and output directories, so it must not
/// contain path separators, `..`, or control characters.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if the name is blank,
/// `ValidationError::NameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidName` if it could escape the directory.
///
/// # Examples
///
/// ```
/// use cogor::utils::validation::validate_organism_name;
///
/// assert_eq!(validate_organism_name(" ecoli_k12 ").unwrap(), "ecoli_k12");
/// assert!(validate_organism_name("../ecoli").is_err());
/// ```
pub fn validate_organism_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if trimmed.len() > MAX_ORGANISM_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if trimmed.contains("..")
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidName(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}
