//! Environment fallback for flags not given on the command line.

/// Source of environment values; returns `None` for unset keys.
pub type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<String> + 'a>;

/// Lookup backed by the process environment.
pub(crate) fn process_env() -> EnvLookup<'static> {
    Box::new(|key| std::env::var(key).ok())
}

/// First key in `keys` with a non-empty value, together with that value.
pub(crate) fn first_value(lookup: &EnvLookup<'_>, keys: &[String]) -> Option<(String, String)> {
    keys.iter().find_map(|key| {
        lookup(key)
            .filter(|value| !value.is_empty())
            .map(|value| (key.clone(), value))
    })
}

/// Split an environment value into sequence elements.
///
/// Items are separated by commas; a surrounding `[` `]` pair is accepted so
/// the bracketed form shown in help can be pasted back.
pub(crate) fn split_list(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
