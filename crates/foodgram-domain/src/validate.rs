//! Field validators and normalizers.
//!
//! Validators return `bool` (or `Option`/`Result` when they also normalize); callers map a
//! failure to their own error type.

use std::collections::{BTreeSet, HashMap};

/// `true` if `value` has at least `min` characters (not bytes).
pub fn has_min_len(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// `true` if `value` has at most `max` characters (not bytes).
pub fn has_max_len(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;

/// Validate a username: 3-32 characters from `[\w.@+-]`.
pub fn is_valid_username(username: &str) -> bool {
    if !has_min_len(username, USERNAME_MIN_LEN) || !has_max_len(username, USERNAME_MAX_LEN) {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '-'
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Validate a human-readable name (person or tag).
///
/// The whole string must be written in one alphabet, Latin or Cyrillic, plus spaces and
/// hyphens. Mixing alphabets, digits and other symbols is rejected.
pub fn is_single_alphabet_name(value: &str) -> bool {
    if !value.chars().any(|c| !is_separator(c)) {
        return false;
    }
    let latin = value.chars().all(|c| is_latin(c) || is_separator(c));
    let cyrillic = value.chars().all(|c| is_cyrillic(c) || is_separator(c));
    latin || cyrillic
}

/// Title-case a person's name.
///
/// Every word (split on space or hyphen) starts with an upper-case letter and continues in
/// lower case. Non-letters at the start of a word are dropped, so `"  -jean--luc"` becomes
/// `"Jean-Luc"`.
pub fn normalize_human_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut title = true;
    for c in name.chars() {
        if title {
            if !c.is_alphabetic() {
                continue;
            }
            out.extend(c.to_uppercase());
            title = false;
        } else {
            out.extend(c.to_lowercase());
            if is_separator(c) {
                title = true;
            }
        }
    }
    out.trim_end_matches(is_separator).to_owned()
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal email shape check: one `@` with non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
}

/// Normalize a hex color to `#RRGGBB` (upper case).
///
/// Accepts three or six hex digits, with or without a leading `#`, surrounded by any
/// whitespace. Returns `None` for anything else.
pub fn normalize_hex_color(color: &str) -> Option<String> {
    let digits = color.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits = digits.to_ascii_uppercase();
    match digits.len() {
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in digits.chars() {
                out.push(c);
                out.push(c);
            }
            Some(out)
        }
        6 => Some(format!("#{digits}")),
        _ => None,
    }
}

/// Validate a slug: non-empty, lower-case ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Match requested ids against the records that were found for them.
///
/// Returns the found records keyed by id, or the sorted list of ids that have no record.
pub fn resolve_ids<T>(
    requested: &[i32],
    found: impl IntoIterator<Item = T>,
    id_of: impl Fn(&T) -> i32,
) -> Result<HashMap<i32, T>, Vec<i32>> {
    let resolved: HashMap<i32, T> = found.into_iter().map(|t| (id_of(&t), t)).collect();
    let missing: BTreeSet<i32> = requested
        .iter()
        .copied()
        .filter(|id| !resolved.contains_key(id))
        .collect();
    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(missing.into_iter().collect())
    }
}
