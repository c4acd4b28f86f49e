//! Usage text rendered as an aligned option table.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::set::FieldBinding;

const INDENT: &str = "    ";
const GAP: &str = "  ";

/// Column widths observed while flags are registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HelpLayout {
    short: usize,
    names: usize,
    label: usize,
    env: usize,
}

/// Header lines printed above the option table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header<'h> {
    pub(crate) name: &'h str,
    pub(crate) version: Option<&'h str>,
    pub(crate) description: Option<&'h str>,
    pub(crate) build_time: Option<DateTime<Utc>>,
}

fn short_cell(binding: &FieldBinding<'_>) -> String {
    match binding.short() {
        Some(ch) if binding.short_deprecated().is_none() => format!("-{ch},"),
        _ => String::new(),
    }
}

fn names_cell(binding: &FieldBinding<'_>) -> String {
    binding
        .long_names()
        .map(|name| format!("--{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn label_cell(binding: &FieldBinding<'_>) -> String {
    if binding.is_bool_flag() {
        String::new()
    } else {
        binding.type_label().into_owned()
    }
}

fn env_cell(binding: &FieldBinding<'_>) -> String {
    if binding.env_keys().is_empty() {
        String::new()
    } else {
        format!("[{}]", binding.env_keys().join(", "))
    }
}

fn push_cell(row: &mut String, cell: &str, width: usize) {
    if width > 0 {
        row.push_str(&format!("{cell:<width$}{GAP}"));
    }
}

impl HelpLayout {
    /// Widen the columns to fit `binding`. Hidden flags are ignored.
    pub(crate) fn observe(&mut self, binding: &FieldBinding<'_>) {
        if binding.is_hidden() {
            return;
        }
        self.short = self.short.max(short_cell(binding).chars().count());
        self.names = self.names.max(names_cell(binding).chars().count());
        self.label = self.label.max(label_cell(binding).chars().count());
        self.env = self.env.max(env_cell(binding).chars().count());
    }

    /// Whether any visible flag was observed.
    pub(crate) const fn is_empty(&self) -> bool {
        self.names == 0
    }

    fn row(&self, binding: &FieldBinding<'_>, current: &str) -> String {
        let mut row = String::from(INDENT);
        if self.short > 0 {
            row.push_str(&format!("{:<width$} ", short_cell(binding), width = self.short));
        }
        push_cell(&mut row, &names_cell(binding), self.names);
        push_cell(&mut row, &label_cell(binding), self.label);
        push_cell(&mut row, &env_cell(binding), self.env);
        row.push_str(binding.usage());
        if !current.is_empty() {
            if !binding.usage().is_empty() {
                row.push(' ');
            }
            row.push_str(&format!("(default: \"{current}\")"));
        }
        row.truncate(row.trim_end().len());
        row
    }
}

/// Render the complete help text.
///
/// `default_of` supplies the text shown as each flag's default.
pub(crate) fn render<'b, F>(
    header: &Header<'_>,
    layout: &HelpLayout,
    bindings: &[FieldBinding<'b>],
    default_of: F,
) -> String
where
    F: Fn(&FieldBinding<'b>) -> String,
{
    let mut out = String::from(header.name);
    if let Some(version) = header.version {
        out.push_str(&format!(" - version {version}"));
    }
    if let Some(build) = header.build_time {
        out.push_str(" - build ");
        out.push_str(&build.to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    out.push('\n');
    if let Some(description) = header.description {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&format!("\nUsage:\n{INDENT}{} [OPTIONS]\n", header.name));
    if layout.is_empty() {
        return out;
    }
    out.push_str("\nOptions:\n");
    for binding in bindings.iter().filter(|binding| !binding.is_hidden()) {
        out.push_str(&layout.row(binding, &default_of(binding)));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::FieldBinding;
    use crate::tag::FieldTags;

    fn binding<'a>(tags: &FieldTags, env: &[&str], value: &'a mut dyn crate::FlagValue) -> FieldBinding<'a> {
        let meta = tags.parse().expect("bound field");
        FieldBinding::new(meta, env.iter().map(|k| (*k).to_owned()).collect(), value)
    }

    fn header(name: &str) -> Header<'_> {
        Header {
            name,
            version: None,
            description: None,
            build_time: None,
        }
    }

    #[test]
    fn aligns_columns_across_rows() {
        let mut host = String::from("localhost");
        let mut verbose = false;
        let bindings = vec![
            binding(
                &FieldTags::new("host").flag("host h").usage("server host"),
                &["HOST"],
                &mut host,
            ),
            binding(&FieldTags::new("verbose").usage("chatty output"), &[], &mut verbose),
        ];
        let mut layout = HelpLayout::default();
        for b in &bindings {
            layout.observe(b);
        }
        let text = render(&header("app"), &layout, &bindings, FieldBinding::format_value);
        let expected = [
            "app",
            "",
            "Usage:",
            "    app [OPTIONS]",
            "",
            "Options:",
            "    -h, --host     string  [HOST]  server host (default: \"localhost\")",
            "        --verbose                  chatty output",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn header_lists_version_build_and_description() {
        let build = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let head = Header {
            name: "app",
            version: Some("1.2.3"),
            description: Some("does things"),
            build_time: Some(build),
        };
        let text = render(&head, &HelpLayout::default(), &[], FieldBinding::format_value);
        assert!(text.starts_with("app - version 1.2.3 - build 2023-11-14T22:13:20Z\ndoes things\n"));
        assert!(!text.contains("Options:"));
    }

    #[test]
    fn hidden_flags_are_omitted() {
        let mut secret = String::from("x");
        let bindings = vec![binding(&FieldTags::new("secret").hidden(true), &[], &mut secret)];
        let mut layout = HelpLayout::default();
        layout.observe(&bindings[0]);
        assert!(layout.is_empty());
        let text = render(&header("app"), &layout, &bindings, FieldBinding::format_value);
        assert!(!text.contains("secret"));
    }
}
