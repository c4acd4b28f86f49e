//! INI provider: `key = value` pairs grouped under `[section]` headers.
//!
//! Keys before the first header are top level; each section becomes a
//! nested table, with dotted headers (`[a.b]`) nesting further. Unquoted
//! values are typed the way figment types environment values, quoted values
//! stay strings.

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Metadata, Profile, Provider,
    value::{Dict, Tag, Value},
};
use thiserror::Error;

/// Malformed INI input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct IniError {
    /// One-based line number.
    pub line: usize,
    /// What was wrong with the line.
    pub message: String,
}

/// Figment provider holding parsed INI data.
#[derive(Debug, Clone)]
pub struct Ini {
    path: Utf8PathBuf,
    dict: Dict,
}

fn unquote(raw: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| raw.strip_prefix(quote)?.strip_suffix(quote))
}

fn typed(raw: &str) -> Value {
    match unquote(raw) {
        Some(text) => Value::from(text.to_owned()),
        None => raw
            .parse::<Value>()
            .unwrap_or_else(|_| Value::from(raw.to_owned())),
    }
}

/// Table reached by following `path` from `root`, created on demand.
fn table_at<'d>(root: &'d mut Dict, path: &[String]) -> Option<&'d mut Dict> {
    let Some((head, rest)) = path.split_first() else {
        return Some(root);
    };
    let entry = root
        .entry(head.clone())
        .or_insert_with(|| Value::Dict(Tag::Default, Dict::new()));
    match entry {
        Value::Dict(_, dict) => table_at(dict, rest),
        _ => None,
    }
}

impl Ini {
    /// Parse `contents`, attributing metadata to `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`IniError`] for unterminated headers, empty keys, lines
    /// without `=` or `:`, and sections that collide with plain keys.
    pub fn parse(path: impl Into<Utf8PathBuf>, contents: &str) -> Result<Self, IniError> {
        let mut dict = Dict::new();
        let mut section: Vec<String> = Vec::new();
        for (index, raw_line) in contents.lines().enumerate() {
            let line_no = index + 1;
            let err = |message: &str| IniError {
                line: line_no,
                message: message.to_owned(),
            };
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| err("unterminated section header"))?
                    .trim();
                section = name
                    .split('.')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_owned)
                    .collect();
                table_at(&mut dict, &section).ok_or_else(|| err("section collides with a value"))?;
                continue;
            }
            let (raw_key, raw_value) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(|| err("expected `key = value`"))?;
            let key = raw_key.trim();
            if key.is_empty() {
                return Err(err("empty key"));
            }
            let table =
                table_at(&mut dict, &section).ok_or_else(|| err("section collides with a value"))?;
            table.insert(key.to_owned(), typed(raw_value.trim()));
        }
        Ok(Self {
            path: path.into(),
            dict,
        })
    }

    /// Path the data was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Provider for Ini {
    fn metadata(&self) -> Metadata {
        Metadata::from("INI file", self.path.as_std_path())
    }

    fn data(&self) -> Result<figment::value::Map<Profile, Dict>, figment::Error> {
        Ok(Profile::Default.collect(self.dict.clone()))
    }
}
