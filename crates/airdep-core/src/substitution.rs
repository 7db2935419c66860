//! Repository-scoped `{key}` substitution over package file values.
//!
//! Every string leaf of a package file is scanned once; each `{key}` whose
//! key has a configured value is replaced, and every other brace sequence is
//! copied verbatim. Replacement text is never rescanned, so values that
//! themselves contain `{...}` do not expand further. Mapping keys are left
//! untouched.

use std::collections::BTreeMap;

use crate::value::Value;

/// Replace every known `{key}` in `input` with its value from `vars`.
pub fn substitute_str(input: &str, vars: &BTreeMap<String, String>) -> String {
    if vars.is_empty() || !input.contains('{') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let replaced = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            vars.get(key).map(|value| (value, close))
        });
        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Apply [`substitute_str`] to every string leaf of `value`, recursively.
pub fn substitute_value(value: Value, vars: &BTreeMap<String, String>) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(&s, vars)),
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| substitute_value(item, vars))
                .collect(),
        ),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, substitute_value(v, vars)))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Layer `overrides` on top of `defaults`; override keys win.
pub fn layered(
    defaults: &BTreeMap<String, String>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = defaults.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
