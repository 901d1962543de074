use sea_orm::{DbErr, SqlErr, TransactionError};

/// `true` if the store rejected a write because of a unique or primary-key constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// `true` if the store rejected a write because a referenced row does not exist.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    foreign_key_violation(err).is_some()
}

/// The driver message of a foreign-key violation. It names the violated constraint.
pub fn foreign_key_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => Some(message),
        _ => None,
    }
}

/// Collapse a transaction error into the underlying `DbErr`.
pub fn flatten_transaction_error(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

/// Build a `LIKE` pattern matching values that contain `needle`.
///
/// `%`, `_` and `\` in `needle` are escaped with `\`, the default escape in PostgreSQL.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
