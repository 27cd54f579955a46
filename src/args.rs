//! Parsing of free-form `--arg` values from the command line.

use crate::config::DefaultArg;

/// Parse `name`, `name=value` or `name=v1,v2` into a switch and its values.
///
/// Leading dashes on the name are accepted and stripped, so `--arg
/// --markers` and `--arg markers` mean the same thing. An empty value list
/// after `=` yields a single empty value.
pub fn parse_extra_arg(raw: &str) -> Result<DefaultArg, String> {
    let (name, values) = match raw.split_once('=') {
        Some((name, values)) => (name, values.split(',').map(str::to_string).collect()),
        None => (raw, Vec::new()),
    };

    let switch = name.trim().trim_start_matches('-');
    if switch.is_empty() {
        return Err(format!("missing switch name in '{}'", raw));
    }

    Ok(DefaultArg {
        switch: switch.to_string(),
        values,
    })
}
