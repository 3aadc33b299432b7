//! Field shape checks for employee payloads. Pure predicates over strings that
//! already passed the required-fields check.

/// Non-empty, ASCII letters and digits only.
pub fn valid_emp_id(emp_id: &str) -> bool {
    !emp_id.is_empty() && emp_id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Non-empty, ASCII letters and spaces only.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// `local@domain.tld`: exactly one `@`, non-empty local part, and a `.` in the
/// domain with at least one character on each side of it.
pub fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // some dot that is neither the first nor the last character of the domain
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
