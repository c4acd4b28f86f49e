//! Derivation of flag names and environment keys from field identifiers.

use heck::ToKebabCase;

/// Convert a field identifier into its default flag name.
///
/// Word boundaries are detected across case changes, underscores and digits
/// and joined with `-`.
///
/// # Examples
///
/// ```
/// use flagbind::derive_flag_name;
/// assert_eq!(derive_flag_name("MaxConnections"), "max-connections");
/// assert_eq!(derive_flag_name("max_connections"), "max-connections");
/// assert_eq!(derive_flag_name("HTTPServer"), "http-server");
/// ```
#[must_use]
pub fn derive_flag_name(ident: &str) -> String {
    ident.trim_start_matches("r#").to_kebab_case()
}

/// Build the default environment key for `flag_name`.
///
/// The key is `prefix` followed by the upper-cased name with `-` replaced by
/// `_`. The prefix is used verbatim; see [`normalize_env_prefix`].
///
/// # Examples
///
/// ```
/// use flagbind::derive_env_key;
/// assert_eq!(derive_env_key("APP_", "max-connections"), "APP_MAX_CONNECTIONS");
/// assert_eq!(derive_env_key("", "port"), "PORT");
/// ```
#[must_use]
pub fn derive_env_key(prefix: &str, flag_name: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + flag_name.len());
    key.push_str(prefix);
    key.extend(
        flag_name
            .chars()
            .map(|ch| if ch == '-' { '_' } else { ch.to_ascii_uppercase() }),
    );
    key
}

/// Normalize an environment prefix: upper-case with one trailing `_`.
///
/// An empty prefix stays empty.
#[must_use]
pub fn normalize_env_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('_');
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{}_", trimmed.to_ascii_uppercase())
}
