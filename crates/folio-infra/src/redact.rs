//! Helpers for keeping personal data out of logs.

/// Mask an email address for logging: `jane@example.com` -> `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}@{domain}")
        }
        None => "***".to_string(),
    }
}
