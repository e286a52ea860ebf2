/// Length of a full git commit SHA-1.
const FULL_HASH_LEN: usize = 40;
/// Length of the abbreviated hash reported in place of a full one.
const SHORT_HASH_LEN: usize = 7;

/// Shortens full 40 character commit hashes to 7 characters. Tags and
/// branch names pass through unchanged.
pub fn normalize_version(raw: &str) -> String {
    if raw.len() == FULL_HASH_LEN
        && raw.chars().all(|c| c.is_ascii_hexdigit())
    {
        return raw[..SHORT_HASH_LEN].to_string();
    }

    raw.to_string()
}
