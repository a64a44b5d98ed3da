//! Kubernetes resource-name rules.
//!
//! Plans, maps and namespaces must be valid DNS-1123 subdomains: at most 253
//! characters of lowercase alphanumerics, `-` and `.`, where every
//! dot-separated label starts and ends with an alphanumeric.

use crate::error::CoreError;

/// Maximum length of a DNS-1123 subdomain.
pub const MAX_NAME_LEN: usize = 253;

/// Returns true if `name` is usable as a Kubernetes resource name.
pub fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    name.split('.').all(is_valid_label)
}

/// Like [`is_valid_k8s_name`] but reports the offending name.
pub fn check_k8s_name(name: &str) -> Result<(), CoreError> {
    if is_valid_k8s_name(name) {
        Ok(())
    } else {
        Err(CoreError::InvalidName(name.to_string()))
    }
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    is_lower_alnum(*first)
        && is_lower_alnum(*last)
        && bytes.iter().all(|b| is_lower_alnum(*b) || *b == b'-')
}

fn is_lower_alnum(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}
