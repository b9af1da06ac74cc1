//! Address minting and validation.
//!
//! An inbox address is `local@domain` where the domain comes from the
//! configured allow-list and the local part is either caller supplied or a
//! generated token.

use rand::Rng;
use thiserror::Error;

/// Maximum length of a local part (RFC 5321).
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Address validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Local part is too long.
    #[error("username must be at most {MAX_LOCAL_PART_LENGTH} characters")]
    LocalPartTooLong,

    /// Local part contains characters outside the accepted set.
    #[error("username can only contain letters, digits, '.', '_', '+' and '-'")]
    LocalPartInvalidChars,

    /// Local part starts or ends with a dot, or has consecutive dots.
    #[error("username cannot start or end with '.' or contain '..'")]
    LocalPartBadDots,

    /// Domain is not in the allow-list.
    #[error("domain is not allowed")]
    DomainNotAllowed,
}

/// Generate a random local part.
///
/// Tokens are lowercase hyphenated UUID v4 strings, so two calls collide
/// with negligible probability.
pub fn generate_local_part() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validate a caller supplied local part.
///
/// Requirements:
/// - Length: 1-64 characters (empty input is handled by the caller)
/// - Characters: ASCII letters, digits, `.`, `_`, `+`, `-`
/// - No leading, trailing or doubled `.`
///
/// # Examples
///
/// ```
/// use tempmail::inbox::validate_local_part;
///
/// assert!(validate_local_part("john.doe").is_ok());
/// assert!(validate_local_part("john..doe").is_err());
/// assert!(validate_local_part("john doe").is_err());
/// ```
pub fn validate_local_part(local: &str) -> Result<(), AddressError> {
    if local.len() > MAX_LOCAL_PART_LENGTH {
        return Err(AddressError::LocalPartTooLong);
    }

    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
    {
        return Err(AddressError::LocalPartInvalidChars);
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(AddressError::LocalPartBadDots);
    }

    Ok(())
}

/// Join a local part and a domain into an address.
pub fn build_address(local: &str, domain: &str) -> String {
    format!("{local}@{domain}")
}

/// The set of domains addresses may be minted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowList {
    domains: Vec<String>,
}

impl DomainAllowList {
    /// Build an allow-list. Entries are trimmed and lowercased; blanks and
    /// duplicates are dropped while keeping the first occurrence's order.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref().trim().to_ascii_lowercase();
            if !domain.is_empty() && !list.contains(&domain) {
                list.push(domain);
            }
        }
        Self { domains: list }
    }

    /// Domains in the list.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Number of domains.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Look up a requested domain, case-insensitively.
    ///
    /// Returns the list's canonical spelling.
    pub fn resolve(&self, requested: &str) -> Result<&str, AddressError> {
        let requested = requested.trim();
        self.domains
            .iter()
            .find(|d| d.eq_ignore_ascii_case(requested))
            .map(String::as_str)
            .ok_or(AddressError::DomainNotAllowed)
    }

    /// Pick a domain uniformly at random.
    ///
    /// Returns `None` only for an empty list.
    pub fn choose(&self) -> Option<&str> {
        if self.domains.is_empty() {
            return None;
        }
        let mut rng = rand::rng();
        let idx = rng.random_range(0..self.domains.len());
        Some(&self.domains[idx])
    }
}
