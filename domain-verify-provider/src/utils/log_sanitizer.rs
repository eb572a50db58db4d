//! Keeps response bodies and session tokens out of logs

use std::borrow::Cow;

/// Bytes of a response body kept in log lines.
const BODY_LOG_LIMIT: usize = 256;

/// Characters of a secret left readable by [`mask_secret`].
const SECRET_PREFIX_CHARS: usize = 4;

/// Shorten a response body to at most [`BODY_LOG_LIMIT`] bytes, cut on a char boundary.
pub fn truncate_for_log(body: &str) -> Cow<'_, str> {
    if body.len() <= BODY_LOG_LIMIT {
        return Cow::Borrowed(body);
    }
    let cut = body
        .char_indices()
        .map(|(idx, _)| idx)
        .take_while(|&idx| idx <= BODY_LOG_LIMIT)
        .last()
        .unwrap_or(0);
    Cow::Owned(format!("{} (+{} bytes)", &body[..cut], body.len() - cut))
}

/// Show only the first few characters of a token.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= SECRET_PREFIX_CHARS * 2 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(SECRET_PREFIX_CHARS).collect();
    format!("{prefix}****")
}
