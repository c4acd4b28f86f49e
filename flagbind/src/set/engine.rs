//! Translation of bindings into a `clap::Command` and back.

use std::ffi::OsString;

use clap::parser::ValueSource as ClapSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use super::FieldBinding;
use crate::value::Kind;

/// Argument id collecting positional arguments.
pub(crate) const POSITIONAL_ID: &str = "__positional";
const HELP_ID: &str = "__help";
const VERSION_ID: &str = "__version";

/// Metadata for the generated command.
pub(crate) struct CommandSpec<'s> {
    pub(crate) name: &'s str,
    pub(crate) version: Option<&'s str>,
    pub(crate) help: String,
}

fn accepts_negative(kind: &Kind) -> bool {
    match kind {
        Kind::SignedInt | Kind::Float => true,
        Kind::Sequence(inner) => accepts_negative(inner),
        _ => false,
    }
}

fn arg_for(binding: &FieldBinding<'_>) -> Arg {
    let name = binding.name().to_owned();
    let mut arg = Arg::new(name.clone())
        .long(name)
        .value_parser(value_parser!(String))
        .help(binding.usage().to_owned())
        .hide(binding.is_hidden());
    for alias in binding.aliases() {
        arg = arg.visible_alias(alias.clone());
    }
    if let Some(short) = binding.short() {
        arg = if binding.short_deprecated().is_some() {
            arg.short_alias(short)
        } else {
            arg.short(short)
        };
    }
    arg = if binding.is_sequence() {
        arg.action(ArgAction::Append).num_args(1)
    } else if binding.is_bool_flag() {
        arg.action(ArgAction::Set)
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
    } else {
        arg.action(ArgAction::Set).num_args(1)
    };
    if accepts_negative(&binding.kind()) {
        arg = arg.allow_negative_numbers(true);
    }
    arg
}

fn claims_long(bindings: &[FieldBinding<'_>], long: &str) -> bool {
    bindings.iter().any(|binding| binding.answers_to(long))
}

fn claims_short(bindings: &[FieldBinding<'_>], short: char) -> bool {
    bindings.iter().any(|binding| binding.short() == Some(short))
}

/// Build the command for `bindings`.
///
/// Bindings that reuse `-h`/`--help` or `-V`/`--version` take precedence;
/// the built-in flag keeps whichever spelling is still free.
pub(crate) fn build_command(spec: CommandSpec<'_>, bindings: &[FieldBinding<'_>]) -> Command {
    let mut command = Command::new(spec.name.to_owned())
        .args_override_self(true)
        .override_usage(format!("{} [OPTIONS]", spec.name))
        .override_help(spec.help)
        .arg(
            Arg::new(POSITIONAL_ID)
                .action(ArgAction::Append)
                .num_args(1..)
                .value_parser(value_parser!(String))
                .hide(true),
        );

    if claims_long(bindings, "help") || claims_short(bindings, 'h') {
        command = command.disable_help_flag(true);
        if !claims_long(bindings, "help") {
            command = command.arg(Arg::new(HELP_ID).long("help").action(ArgAction::Help));
        }
    }

    if let Some(version) = spec.version {
        command = command.version(version.to_owned());
        if claims_long(bindings, "version") || claims_short(bindings, 'V') {
            command = command.disable_version_flag(true);
            if !claims_long(bindings, "version") {
                command = command.arg(
                    Arg::new(VERSION_ID)
                        .long("version")
                        .action(ArgAction::Version),
                );
            }
        }
    }

    bindings
        .iter()
        .fold(command, |command, binding| command.arg(arg_for(binding)))
}

/// Values given on the command line for `binding`, in order.
pub(crate) fn explicit_values(matches: &ArgMatches, binding: &FieldBinding<'_>) -> Option<Vec<String>> {
    let id = binding.name();
    if matches.value_source(id) != Some(ClapSource::CommandLine) {
        return None;
    }
    let values = matches
        .try_get_many::<String>(id)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    Some(values)
}

/// Positional arguments in order.
pub(crate) fn positional(matches: &ArgMatches) -> Vec<String> {
    matches
        .try_get_many::<String>(POSITIONAL_ID)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Shorthands spelled on the command line, in order.
///
/// Walks short clusters such as `-vn 3` the way the engine does: a
/// value-taking shorthand consumes the rest of its cluster, or the next
/// argument when the cluster ends with it.
pub(crate) fn used_shorts(args: &[OsString], bindings: &[FieldBinding<'_>]) -> Vec<char> {
    let short_takes_value = |short: char| {
        bindings
            .iter()
            .find(|binding| binding.short() == Some(short))
            .map(|binding| !binding.is_bool_flag())
    };
    let long_takes_value = |name: &str| {
        bindings
            .iter()
            .find(|binding| binding.answers_to(name))
            .is_some_and(|binding| !binding.is_bool_flag())
    };

    let mut used = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--" {
            break;
        }
        if let Some(long) = arg.strip_prefix("--") {
            skip_next = !long.contains('=') && long_takes_value(long);
            continue;
        }
        let Some(cluster) = arg.strip_prefix('-') else {
            continue;
        };
        for (index, ch) in cluster.char_indices() {
            match short_takes_value(ch) {
                None => break,
                Some(false) => used.push(ch),
                Some(true) => {
                    used.push(ch);
                    let rest = cluster.get(index + ch.len_utf8()..).unwrap_or_default();
                    skip_next = rest.is_empty();
                    break;
                }
            }
        }
    }
    used
}
