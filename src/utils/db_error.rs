/// Partial unique index guarding live account names.
pub const LIVE_ACCOUNT_INDEX: &str = "users_user_account_live_key";

/// Returns true when `e` is a unique violation raised by the live account index.
pub fn is_duplicate_account(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(LIVE_ACCOUNT_INDEX)
}

/// Escapes `%`, `_` and `\` and wraps the term for a substring `LIKE` match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
