//! Translation of the option registry into a clap command

use crate::registry::{OptionType, Registry, Value};
use clap::builder::{BoolishValueParser, TypedValueParser};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use indexmap::IndexMap;
use tracing::debug;

/// Id of the positional argument collecting everything not matched to an option
const REMAIN_ID: &str = "::remain";

/// Values coerced from one command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResult {
    /// Option values given on the command line, in declaration order
    pub values: IndexMap<String, Value>,

    /// Positional arguments not matched to any option
    pub remain: Vec<String>,

    /// The argument list as handed to the parser
    pub original: Vec<String>,

    /// The argument list after shorthand expansion
    pub cooked: Vec<String>,
}

impl ParsedResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether a boolean option was given
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_number)
    }
}

fn coerce_string(raw: &str) -> Result<Value, String> {
    Ok(Value::String(raw.to_string()))
}

fn coerce_number(raw: &str) -> Result<Value, String> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| format!("'{}' is not a number", raw))
}

/// Build the clap command for the registered options.
///
/// Shorthands are not registered with clap; they are expanded into long
/// flags beforehand by [`expand_shorthands`], and [`route_args`] hands clap
/// every option in its `--<name>[=<value>]` form with the remain list after a
/// `--` terminator. Booleans take an optional attached value so that
/// `--debug=false` parses.
pub fn build_command(program: &str, registry: &Registry) -> Command {
    let mut cmd = Command::new(program.to_string())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .args_override_self(true)
        .arg(
            Arg::new(REMAIN_ID)
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(value_parser!(String))
                .value_hint(ValueHint::FilePath),
        );

    for def in registry.iter() {
        let arg = Arg::new(def.name.clone())
            .long(def.name.clone())
            .help(def.description.clone());

        let arg = match &def.ty {
            OptionType::Boolean => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new().map(Value::Bool)),
            OptionType::String => arg
                .action(ArgAction::Set)
                .value_name(def.name.to_uppercase())
                .value_parser(coerce_string),
            OptionType::Number => arg
                .action(ArgAction::Set)
                .value_name(def.name.to_uppercase())
                .value_parser(coerce_number),
            OptionType::Custom(coercion) => {
                let coercion = coercion.clone();
                arg.action(ArgAction::Set)
                    .value_name(def.name.to_uppercase())
                    .value_parser(move |raw: &str| coercion.apply(raw))
            }
        };

        cmd = cmd.arg(arg);
    }

    cmd
}

/// Rewrite shorthand flags into the long flags they stand for.
///
/// `-p` becomes `--port`, `-p=80` becomes `--port=80` and a cluster such as
/// `-dv` expands letter by letter when every letter is a known shorthand.
/// The first element (the binary name) and everything after `--` are kept
/// as they are.
pub fn expand_shorthands(argv: &[String], shorthands: &IndexMap<String, String>) -> Vec<String> {
    let mut cooked = Vec::with_capacity(argv.len());
    let mut positional_only = false;

    for (i, arg) in argv.iter().enumerate() {
        if i == 0 || positional_only {
            cooked.push(arg.clone());
            continue;
        }

        if arg == "--" {
            positional_only = true;
            cooked.push(arg.clone());
            continue;
        }

        match arg.strip_prefix('-') {
            Some(flag) if !flag.is_empty() && !flag.starts_with('-') => {
                match expand_flag(flag, shorthands) {
                    Some(expanded) => cooked.extend(expanded),
                    None => cooked.push(arg.clone()),
                }
            }
            _ => cooked.push(arg.clone()),
        }
    }

    cooked
}

fn expand_flag(flag: &str, shorthands: &IndexMap<String, String>) -> Option<Vec<String>> {
    let (key, inline) = match flag.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (flag, None),
    };

    let mut expanded = if let Some(long) = shorthands.get(key) {
        vec![long.clone()]
    } else if key.chars().count() > 1 {
        key.chars()
            .map(|c| shorthands.get(c.to_string().as_str()).cloned())
            .collect::<Option<Vec<_>>>()?
    } else {
        return None;
    };

    if let (Some(value), Some(last)) = (inline, expanded.last_mut()) {
        last.push('=');
        last.push_str(value);
    }

    Some(expanded)
}

/// Split an expanded argument list into option tokens for clap and the remain list.
///
/// Registered options come out as `--name` or `--name=value`. A value option
/// without an attached value takes the next argument unless that argument is
/// itself a registered option or `--`. A Boolean takes a following `true` or
/// `false`, and `--no-<name>` turns it off. Unknown flags, lone dashes and
/// positionals all go to the remain list in the order given.
pub fn route_args(cooked: &[String], types: &IndexMap<String, OptionType>) -> (Vec<String>, Vec<String>) {
    let mut options = Vec::new();
    let mut remain = Vec::new();
    let mut positional_only = false;
    let mut args = cooked.iter().skip(1).peekable();

    while let Some(arg) = args.next() {
        if positional_only {
            remain.push(arg.clone());
            continue;
        }
        if arg == "--" {
            positional_only = true;
            continue;
        }

        let Some(body) = arg.strip_prefix("--") else {
            remain.push(arg.clone());
            continue;
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match types.get(name) {
            Some(ty) => {
                let value = match inline {
                    Some(value) => Some(value.to_string()),
                    None if ty.is_flag() => args.next_if(|next| is_bool_word(next)).cloned(),
                    None => args.next_if(|next| !is_option(next, types)).cloned(),
                };
                options.push(match value {
                    Some(value) => format!("--{}={}", name, value),
                    None => format!("--{}", name),
                });
            }
            None => match negated_flag(name, inline, types) {
                Some(flag) => options.push(format!("--{}=false", flag)),
                None => {
                    debug!(arg = %arg, "unknown flag kept as a positional argument");
                    remain.push(arg.clone());
                }
            },
        }
    }

    (options, remain)
}

fn is_bool_word(arg: &str) -> bool {
    arg == "true" || arg == "false"
}

/// Whether `arg` would be read as a registered option
fn is_option(arg: &str, types: &IndexMap<String, OptionType>) -> bool {
    if arg == "--" {
        return true;
    }
    match arg.strip_prefix("--") {
        Some(body) => {
            let name = body.split_once('=').map_or(body, |(name, _)| name);
            types.contains_key(name) || negated_flag(name, None, types).is_some()
        }
        None => false,
    }
}

/// `no-debug` names the Boolean `debug` when no option is called `no-debug`
fn negated_flag<'a>(
    name: &'a str,
    inline: Option<&str>,
    types: &IndexMap<String, OptionType>,
) -> Option<&'a str> {
    let flag = name.strip_prefix("no-")?;
    match (inline, types.get(flag)) {
        (None, Some(ty)) if ty.is_flag() => Some(flag),
        _ => None,
    }
}

/// Parse an argument list against the registry
pub fn parse_args(
    program: &str,
    registry: &Registry,
    argv: Vec<String>,
) -> Result<ParsedResult, clap::Error> {
    let cooked = expand_shorthands(&argv, &registry.shorthand_map());
    debug!(?cooked, "expanded shorthands");

    let types = registry.type_map();
    let (options, positionals) = route_args(&cooked, &types);

    let mut clap_args = Vec::with_capacity(cooked.len() + 1);
    clap_args.push(program.to_string());
    clap_args.extend(options);
    clap_args.push("--".to_string());
    clap_args.extend(positionals);

    let matches = build_command(program, registry).try_get_matches_from(clap_args)?;
    let values = collect_values(&matches, &types);
    let remain = matches
        .get_many::<String>(REMAIN_ID)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(ParsedResult {
        values,
        remain,
        original: argv,
        cooked,
    })
}

/// Pick the options actually given on the command line
fn collect_values(matches: &ArgMatches, types: &IndexMap<String, OptionType>) -> IndexMap<String, Value> {
    let mut values = IndexMap::new();

    for name in types.keys() {
        if matches.value_source(name) != Some(ValueSource::CommandLine) {
            continue;
        }
        if let Some(value) = matches.get_one::<Value>(name) {
            values.insert(name.clone(), value.clone());
        }
    }

    values
}
