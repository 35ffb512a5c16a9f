/**
 * Input Validation
 *
 * Field rules shared by registration and login. Each rule records its
 * message in a `ValidationErrors` map instead of returning early, so a
 * request with several bad fields gets all of them reported at once.
 */

use crate::shared::error::ValidationErrors;

/// Minimum length of a user's name, in characters
pub const MIN_NAME_LEN: usize = 3;

/// Minimum length of a password, in characters
pub const MIN_PASSWORD_LEN: usize = 3;

/// Message recorded when an email is already registered
pub const EMAIL_TAKEN: &str = "The email has already been taken.";

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LABEL_LEN: usize = 63;

/// Require a non-empty value of at least `min` characters
///
/// Returns the value when it passes.
pub fn required_min_length(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
) -> Option<String> {
    let value = required(errors, field, value)?;

    if value.chars().count() < min {
        errors.add(
            field,
            format!("The {} field must be at least {} characters.", field, min),
        );
        return None;
    }

    Some(value.to_owned())
}

/// Require a syntactically valid email address
pub fn required_email(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    let value = required(errors, field, value)?;

    if !is_valid_email(value) {
        errors.add(
            field,
            format!("The {} field must be a valid email address.", field),
        );
        return None;
    }

    Some(value.to_owned())
}

fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            errors.add(field, format!("The {} field is required.", field));
            None
        }
    }
}

/// Validate email syntax
///
/// Accepts `local@domain` where:
/// - the local part uses RFC 5322 atom characters and dots, with no leading,
///   trailing or doubled dot
/// - the domain is one or more dot-separated labels of letters, digits and
///   inner hyphens
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || "!#$%&'*+/=?^_`{|}~-".contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_DOMAIN_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
